//! Ask command - one message against a thread, reply on stdout

use clap::Args;

use crate::config::AppConfig;
use crate::domain::ThreadId;
use crate::infrastructure::logging::init_logging;

#[derive(Debug, Args)]
pub struct AskArgs {
    /// Thread to continue; a new one is started when omitted
    #[arg(long)]
    pub thread: Option<String>,

    /// Message to send
    pub question: String,
}

pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let thread_id = match args.thread {
        Some(id) => ThreadId::new(id)?,
        None => ThreadId::generate(),
    };

    let service = crate::create_conversation_service(&config).await?;
    let turn = service.send_message(&thread_id, &args.question).await?;

    println!("{}", turn.reply);
    eprintln!("thread: {} (route {}, version {})", turn.thread_id, turn.route, turn.version);
    if let Some(error) = turn.error {
        eprintln!("warning: {}: {}", error.kind, error.message);
    }

    Ok(())
}
