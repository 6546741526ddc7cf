//! RAG graph execution

mod executor_impl;

pub use executor_impl::RagGraphExecutor;
