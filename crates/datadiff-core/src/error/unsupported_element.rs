use super::Error;

/// Error when an element cannot be dispatched in the position it was found.
///
/// This occurs when:
/// - A lazy statement sequence is nested inside a node whose output must be
///   inline SQL text
/// - A caller requires text from an element that compiles to an interpreter
///
/// This always indicates a defect at the call site and is never retried.
#[derive(Debug)]
pub(super) struct UnsupportedElementError {
    message: Box<str>,
}

impl std::error::Error for UnsupportedElementError {}

impl core::fmt::Display for UnsupportedElementError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported element: {}", self.message)
    }
}

impl Error {
    /// Creates an unsupported element error.
    pub fn unsupported_element(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedElement(
            UnsupportedElementError {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unsupported element error.
    pub fn is_unsupported_element(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedElement(_))
    }
}
