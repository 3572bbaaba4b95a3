use crate::Result;

use chrono::NaiveDateTime;
use std::fmt::Debug;

/// Rules for rendering identifiers and scalar values as text for one SQL
/// variant.
///
/// The compiler never inspects the text a dialect returns. Errors returned by
/// a dialect are propagated to the caller unchanged.
pub trait Dialect: Debug + Send + Sync + 'static {
    /// Human readable name of the dialect, used in log output.
    fn name(&self) -> &str;

    /// Quote an identifier so it can be used verbatim in a statement.
    fn quote(&self, ident: &str) -> String;

    /// Render a timestamp literal.
    fn render_timestamp(&self, value: &NaiveDateTime) -> Result<String>;
}
