pub mod arith;
pub use arith::ArithString;

pub mod dialect;
pub use dialect::Dialect;

pub mod driver;
pub use driver::{Executor, Response};

mod error;
pub use error::{Error, IntoError};

/// A Result type alias that uses datadiff's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
