// Standard library
use std::future::Future;

// 3rd party crates
use async_trait::async_trait;
use serde_json::Value;

/// Error type task bodies may fail with. Whatever the body returns passes
/// through the wrapper unchanged.
pub type BodyError = Box<dyn std::error::Error + Send + Sync>;

/// The unit of work wrapped by a rate-limited task.
///
/// The body receives the invocation's full positional argument list,
/// client id included, exactly as the caller supplied it.
#[async_trait]
pub trait TaskBody: Send + Sync {
    async fn run(&self, args: Vec<Value>) -> Result<Value, BodyError>;
}

/// Any `Fn(Vec<Value>) -> Future<Result<Value, BodyError>>` closure is a
/// task body, so call sites can register plain async functions.
#[async_trait]
impl<F, Fut> TaskBody for F
where
    F: Fn(Vec<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, BodyError>> + Send + 'static,
{
    async fn run(&self, args: Vec<Value>) -> Result<Value, BodyError> {
        (self)(args).await
    }
}