//! Error types for the Flickr client.
//!
//! # Design
//! Two disjoint failure kinds reach callers. `TransportError` means the call
//! never produced a service-level outcome: the network failed, or the body
//! was not a well-formed `rsp` document. `FlickrError::Service` means the
//! service answered `stat="fail"` and carries its own code and message.
//! Interface methods propagate both unchanged; nothing is retried.

use thiserror::Error;

/// Failures while turning raw XML bytes into a document tree.
#[derive(Debug, Error)]
pub enum XmlError {
    /// An error from the underlying quick-xml reader.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// A malformed attribute on an element.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// The document contained no root element.
    #[error("missing root element")]
    MissingRoot,

    /// Text or a name could not be decoded.
    #[error("failed to decode XML text: {0}")]
    Decode(String),

    /// An end tag did not match the element it closes, or the input ended early.
    #[error("unbalanced XML: {0}")]
    Unbalanced(String),
}

/// The request never reached a meaningful service-level outcome.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connecting, sending, or reading the body failed.
    #[error("network failure: {0}")]
    Network(String),

    /// The HTTP layer answered with a non-success status and no envelope.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body was not a usable `rsp` document.
    #[error("malformed response document: {0}")]
    MalformedDocument(String),

    /// The document root was something other than `rsp`.
    #[error("unexpected root element <{0}>")]
    UnexpectedRoot(String),
}

impl From<XmlError> for TransportError {
    fn from(err: XmlError) -> Self {
        TransportError::MalformedDocument(err.to_string())
    }
}

/// Errors returned by every resource interface method.
#[derive(Debug, Error)]
pub enum FlickrError {
    /// See [`TransportError`].
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service returned `stat="fail"` with this code and message.
    #[error("Flickr error {code}: {message}")]
    Service { code: String, message: String },

    /// Client configuration was incomplete or invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl FlickrError {
    /// The service error code, if this is a service error.
    pub fn code(&self) -> Option<&str> {
        match self {
            FlickrError::Service { code, .. } => Some(code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FlickrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_displays_code_and_message() {
        let err = FlickrError::Service {
            code: "1".to_string(),
            message: "User not found".to_string(),
        };
        assert_eq!(err.to_string(), "Flickr error 1: User not found");
        assert_eq!(err.code(), Some("1"));
    }

    #[test]
    fn transport_error_is_transparent() {
        let err = FlickrError::from(TransportError::UnexpectedRoot("html".to_string()));
        assert_eq!(err.to_string(), "unexpected root element <html>");
        assert!(err.code().is_none());
    }

    #[test]
    fn xml_error_becomes_malformed_document() {
        let err = TransportError::from(XmlError::MissingRoot);
        assert!(matches!(err, TransportError::MalformedDocument(msg) if msg == "missing root element"));
    }
}
