mod response;
pub use response::{Response, Rows};

mod value;
pub use value::Value;

use crate::{async_trait, Result};

/// Runs compiled SQL against a live connection.
///
/// Implementations own the connection. Every statement handed to one executor
/// is expected to run on the same connection, in the order received, so that
/// cursor-bound state (such as temporary tables) is visible to later
/// statements.
#[async_trait]
pub trait Executor: Send {
    /// Execute a single statement and return its result.
    async fn exec(&mut self, sql: &str) -> Result<Response>;
}

#[async_trait]
impl<E: Executor + ?Sized> Executor for &mut E {
    async fn exec(&mut self, sql: &str) -> Result<Response> {
        (**self).exec(sql).await
    }
}

#[async_trait]
impl<E: Executor + ?Sized> Executor for Box<E> {
    async fn exec(&mut self, sql: &str) -> Result<Response> {
        (**self).exec(sql).await
    }
}
