//! The `rsp` response envelope.
//!
//! # Design
//! Every response is `<rsp stat="ok">payload</rsp>` or
//! `<rsp stat="fail"><err code=".." msg=".."/></rsp>`. `Envelope` holds
//! exactly one of the two. Reading the payload of a failed envelope, or the
//! error of a successful one, is a bug in the caller and panics.

use crate::error::{FlickrError, TransportError};
use crate::xml::{self, Element};

/// A parsed response: the payload element or the service's error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    /// `stat="ok"` with the root's child elements. The first one is the
    /// payload; a few methods (`flickr.*.getContext`) answer with siblings.
    /// Methods with no result (e.g. `flickr.test.null`) carry none.
    Ok(Vec<Element>),
    /// `stat="fail"`.
    Err { code: String, message: String },
}

impl Envelope {
    /// Parse a raw response body.
    pub fn parse(body: &str) -> Result<Envelope, TransportError> {
        let root = xml::parse(body)?;
        Envelope::from_document(root)
    }

    /// Interpret an already-parsed document.
    pub fn from_document(root: Element) -> Result<Envelope, TransportError> {
        if root.name() != "rsp" {
            return Err(TransportError::UnexpectedRoot(root.name().to_string()));
        }
        let stat = root.attr("stat").map(str::to_string);
        match stat.as_deref() {
            Some("ok") => Ok(Envelope::Ok(root.into_children())),
            Some("fail") => {
                let err = root.child("err").ok_or_else(|| {
                    TransportError::MalformedDocument("failed response has no <err> element".to_string())
                })?;
                Ok(Envelope::Err {
                    code: err.attr_or_empty("code"),
                    message: err.attr_or_empty("msg"),
                })
            }
            other => Err(TransportError::MalformedDocument(format!(
                "unknown response status {:?}",
                other.unwrap_or("")
            ))),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Envelope::Err { .. })
    }

    /// The payload element.
    ///
    /// # Panics
    /// If the envelope is an error.
    pub fn payload(&self) -> Option<&Element> {
        self.payload_collection().first()
    }

    /// Every child element of the root, in document order.
    ///
    /// # Panics
    /// If the envelope is an error.
    pub fn payload_collection(&self) -> &[Element] {
        match self {
            Envelope::Ok(payload) => payload,
            Envelope::Err { .. } => panic!("payload() called on an error envelope"),
        }
    }

    /// # Panics
    /// If the envelope is not an error.
    pub fn error_code(&self) -> &str {
        match self {
            Envelope::Err { code, .. } => code,
            Envelope::Ok(_) => panic!("error_code() called on a successful envelope"),
        }
    }

    /// # Panics
    /// If the envelope is not an error.
    pub fn error_message(&self) -> &str {
        match self {
            Envelope::Err { message, .. } => message,
            Envelope::Ok(_) => panic!("error_message() called on a successful envelope"),
        }
    }

    /// Convert into the payload, turning a service error into
    /// [`FlickrError::Service`].
    pub fn into_result(self) -> Result<Vec<Element>, FlickrError> {
        match self {
            Envelope::Ok(payload) => Ok(payload),
            Envelope::Err { code, message } => Err(FlickrError::Service { code, message }),
        }
    }
}
