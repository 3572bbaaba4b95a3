use super::Error;

/// Error when a statement interpreter is driven out of order.
///
/// This occurs when:
/// - The interpreter is advanced while the last yielded statement still
///   awaits its result
/// - A result is supplied when no statement is pending, including after the
///   sequence is exhausted
/// - The statement sequence awaits a result from an interpreter that was dropped
#[derive(Debug)]
pub(super) struct InterpreterError {
    message: Box<str>,
}

impl std::error::Error for InterpreterError {}

impl core::fmt::Display for InterpreterError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "interpreter protocol violation: {}", self.message)
    }
}

impl Error {
    /// Creates an interpreter protocol error.
    pub fn interpreter(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Interpreter(InterpreterError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an interpreter protocol error.
    pub fn is_interpreter(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Interpreter(_))
    }
}
