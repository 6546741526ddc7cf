//! Answer generation domain

mod generator;

pub use generator::{AnswerGenerator, QueryRegenerator};

#[cfg(test)]
pub use generator::mock::{MockAnswerGenerator, MockQueryRegenerator};
