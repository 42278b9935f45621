//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from the errors
//! of the crates we build on to the unified Error type.

use super::types::Error;

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlError(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlError(format!("Invalid attribute: {}", err))
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::XmlError(format!("Invalid UTF-8: {}", err))
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::InvalidImage(format!("Invalid base64 data: {}", err))
    }
}

#[cfg(feature = "image-probe")]
impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::InvalidImage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_error_maps_to_invalid_image() {
        use base64::Engine;
        let err = base64::engine::general_purpose::STANDARD
            .decode("@@@")
            .unwrap_err();
        assert!(matches!(Error::from(err), Error::InvalidImage(_)));
    }

    #[test]
    fn test_precondition_messages() {
        let err = Error::NoOpenTable {
            operation: "add a row",
        };
        assert_eq!(err.to_string(), "Cannot add a row: no table is open");
    }
}
