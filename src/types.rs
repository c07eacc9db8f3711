//! Contacts and attachments built from raw webhook records

use crate::error::{Error, Result};
use crate::lenient;
use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Standard alphabet, accepting bodies with or without trailing `=` padding
const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// An email participant (sender or recipient)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name with surrounding quotes and spaces removed
    pub name: String,

    /// First token of the email field that contains an `@`
    pub email: Option<String>,

    /// Provider routing suffix (e.g. `ahoy` in `jane+ahoy@...`)
    pub mailbox_hash: Option<String>,

    /// `Name <email>` form
    pub full: String,
}

impl Contact {
    /// Build a contact from the provider's name and email fields.
    ///
    /// The email field sometimes carries display-name noise
    /// (`John Doe john@example.com`); only the address token is kept in
    /// `email`, while `full` is rebuilt from the raw field.
    #[must_use]
    pub fn from_full(name: &str, email_field: &str, mailbox_hash: Option<&str>) -> Self {
        let name = name
            .trim_matches(|c| matches!(c, ' ' | '"' | '\''))
            .to_string();

        let email = email_field
            .split(' ')
            .find(|token| token.contains('@'))
            .map(str::to_string);

        let full = format!("{name} <{email_field}>");

        Self {
            name,
            email,
            mailbox_hash: mailbox_hash.map(str::to_string),
            full,
        }
    }

    /// Build a contact from a `{Name, Email, MailboxHash}` JSON record.
    ///
    /// Missing or mistyped fields become empty, never an error.
    #[must_use]
    pub fn from_record(value: &Value) -> Self {
        let record: ContactRecord = lenient::record(value);

        Self::from_full(
            record.name.as_deref().unwrap_or_default(),
            record.email.as_deref().unwrap_or_default(),
            record.mailbox_hash.as_deref(),
        )
    }

    /// Build contacts from a list of records, preserving order.
    ///
    /// A single record object is treated as a one-element list; anything
    /// else (absent, null, scalar) yields no contacts.
    #[must_use]
    pub fn list_from_value(value: Option<&Value>) -> Vec<Self> {
        match value {
            Some(Value::Array(records)) => records.iter().map(Self::from_record).collect(),
            Some(record @ Value::Object(_)) => vec![Self::from_record(record)],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ContactRecord {
    #[serde(rename = "Name", default, deserialize_with = "lenient::string")]
    name: Option<String>,
    #[serde(rename = "Email", default, deserialize_with = "lenient::string")]
    email: Option<String>,
    #[serde(rename = "MailboxHash", default, deserialize_with = "lenient::string")]
    mailbox_hash: Option<String>,
}

/// A file attached to the inbound message
///
/// The body is kept base64-encoded; [`Attachment::content`] decodes on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// File name
    pub name: String,

    /// Content-ID for inline parts, absent for regular attachments
    pub content_id: Option<String>,

    /// MIME type as reported by the provider
    pub content_type: String,

    /// Decoded size in bytes as reported by the provider
    pub content_length: u64,

    #[serde(rename = "content")]
    raw_content: String,
}

impl Attachment {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        content_id: Option<String>,
        content_type: impl Into<String>,
        content_length: u64,
        raw_content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            content_id,
            content_type: content_type.into(),
            content_length,
            raw_content: raw_content.into(),
        }
    }

    /// Build an attachment from a `{Name, ContentID, ContentType,
    /// ContentLength, Content}` JSON record.
    #[must_use]
    pub fn from_record(value: &Value) -> Self {
        let record: AttachmentRecord = lenient::record(value);

        Self::new(
            record.name.unwrap_or_default(),
            record.content_id,
            record.content_type.unwrap_or_default(),
            record.content_length,
            record.content.unwrap_or_default(),
        )
    }

    /// Build attachments from the `Attachments` list, preserving order
    #[must_use]
    pub fn list_from_value(value: Option<&Value>) -> Vec<Self> {
        match value {
            Some(Value::Array(records)) => records.iter().map(Self::from_record).collect(),
            _ => Vec::new(),
        }
    }

    /// The base64 text exactly as received
    #[must_use]
    pub const fn raw_content(&self) -> &str {
        self.raw_content.as_str()
    }

    /// Decode the body.
    ///
    /// Line breaks and other whitespace inserted by base64 encoders are
    /// ignored, as is missing padding. Each call decodes afresh.
    pub fn content(&self) -> Result<Vec<u8>> {
        let compact: String = self
            .raw_content
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        BASE64_LENIENT.decode(compact.as_bytes()).map_err(|e| {
            tracing::debug!("Attachment {} has invalid base64 content: {e}", self.name);
            Error::Decode(format!("{}: {e}", self.name))
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct AttachmentRecord {
    #[serde(rename = "Name", default, deserialize_with = "lenient::string")]
    name: Option<String>,
    #[serde(rename = "ContentID", default, deserialize_with = "lenient::string")]
    content_id: Option<String>,
    #[serde(rename = "ContentType", default, deserialize_with = "lenient::string")]
    content_type: Option<String>,
    #[serde(rename = "ContentLength", default, deserialize_with = "lenient::length")]
    content_length: u64,
    #[serde(rename = "Content", default, deserialize_with = "lenient::string")]
    content: Option<String>,
}
