use async_trait::async_trait;

pub use crate::config::{Location, Units};
use crate::engine::result::QueryResult;
use crate::error::Error;

pub mod client;
pub mod result;

/// This trait is implemented by all knowledge engines that can answer questions.
#[async_trait]
pub trait KnowledgeEngine: Send + Sync {
    /// Get a short answer that can be spoken.
    ///
    /// Returns `None` if the engine did not understand the question or has no answer.
    ///
    /// # Arguments
    ///
    /// * `query`: The question to answer.
    /// * `location`: Where the question is asked from.
    /// * `units`: The unit system of the answer.
    async fn spoken(
        &self,
        query: &str,
        location: &Location,
        units: Units,
    ) -> Result<Option<String>, Error>;

    /// Get the full results of a query, split into pods.
    ///
    /// Returns `None` if the engine could not process the query.
    async fn full_results(
        &self,
        query: &str,
        location: &Location,
        units: Units,
    ) -> Result<Option<QueryResult>, Error>;

    /// Get the full results of a query without processing them.
    async fn full_results_raw(&self, query: &str) -> Result<Option<String>, Error>;
}
