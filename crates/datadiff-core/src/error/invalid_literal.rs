use super::Error;

/// Error when a literal value cannot be rendered as SQL text.
///
/// This occurs when:
/// - A byte sequence is not valid UTF-8
/// - An alphanumeric string contains characters outside `[0-9A-Za-z]`
/// - Arithmetic on an arithmetic string leaves its representable range
#[derive(Debug)]
pub(super) struct InvalidLiteralError {
    message: Box<str>,
}

impl std::error::Error for InvalidLiteralError {}

impl core::fmt::Display for InvalidLiteralError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid literal: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid literal error.
    pub fn invalid_literal(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidLiteral(InvalidLiteralError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid literal error.
    pub fn is_invalid_literal(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidLiteral(_))
    }
}
