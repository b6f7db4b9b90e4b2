//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.

use super::types::Error;
use crate::ooxml::error::OoxmlError;

impl From<OoxmlError> for Error {
    fn from(err: OoxmlError) -> Self {
        match err {
            OoxmlError::LayoutUnavailable(kind) => Error::LayoutUnavailable(kind),
            other => Error::Ooxml(other),
        }
    }
}

impl From<crate::ooxml::opc::error::OpcError> for Error {
    fn from(err: crate::ooxml::opc::error::OpcError) -> Self {
        Error::Ooxml(OoxmlError::Opc(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::layout::LayoutKind;

    #[test]
    fn test_layout_unavailable_is_lifted() {
        let err: Error = OoxmlError::LayoutUnavailable(LayoutKind::Content).into();
        assert!(matches!(err, Error::LayoutUnavailable(LayoutKind::Content)));
    }

    #[test]
    fn test_other_writer_errors_are_wrapped() {
        let err: Error = OoxmlError::Xml("bad".to_string()).into();
        assert!(matches!(err, Error::Ooxml(OoxmlError::Xml(_))));
        assert!(err.to_string().contains("bad"));
    }
}
