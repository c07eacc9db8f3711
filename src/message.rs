//! Inbound message assembled from a webhook body

use crate::date::Timestamp;
use crate::error::{Error, Result};
use crate::headers::{HeaderIndex, upper_first};
use crate::types::{Attachment, Contact};
use serde_json::{Map, Value};
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::trace;

/// A received message, read-only once constructed
///
/// Contacts, headers and attachments are built on first access and cached.
/// The cache is thread-safe, so a message can be shared across threads.
#[derive(Debug)]
pub struct InboundMessage {
    payload: Map<String, Value>,
    date: Timestamp,
    timezone: String,
    from: OnceLock<Contact>,
    to: OnceLock<Vec<Contact>>,
    cc: OnceLock<Vec<Contact>>,
    bcc: OnceLock<Vec<Contact>>,
    headers: OnceLock<HeaderIndex>,
    attachments: OnceLock<Vec<Attachment>>,
}

/// A value returned by [`InboundMessage::get`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Property<'a> {
    Contact(&'a Contact),
    Contacts(&'a [Contact]),
    Headers(&'a HeaderIndex),
    Attachments(&'a [Attachment]),
    Date(&'a Timestamp),
    Text(&'a str),
    OptionalText(Option<&'a str>),
    Bool(bool),
    Number(f64),
    /// A payload field with no dedicated accessor
    Raw(&'a Value),
}

impl<'a> Property<'a> {
    /// Text content, if this property is textual
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Self::Text(s) => Some(s),
            Self::OptionalText(s) => s,
            Self::Raw(value) => value.as_str(),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }
}

impl InboundMessage {
    /// Parse a webhook body.
    ///
    /// Fails only when the text is not JSON or is not a JSON object; every
    /// missing or malformed field inside degrades to an empty value.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| Error::InvalidPayload(e.to_string()))?;
        Self::from_value(value)
    }

    /// Parse a webhook body straight from request bytes
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| Error::InvalidPayload(e.to_string()))?;
        Self::from_value(value)
    }

    /// Wrap an already decoded payload
    pub fn from_value(value: Value) -> Result<Self> {
        let found = kind(&value);
        let Value::Object(payload) = value else {
            return Err(Error::InvalidPayload(format!(
                "expected a JSON object, got {found}"
            )));
        };

        let date = Timestamp::parse(
            payload
                .get("Date")
                .and_then(Value::as_str)
                .unwrap_or_default(),
        );
        let timezone = date.timezone_name();

        let message_id = payload
            .get("MessageID")
            .and_then(Value::as_str)
            .unwrap_or("<none>");
        trace!(
            "Assembled inbound message {message_id} ({} fields)",
            payload.len()
        );

        Ok(Self {
            payload,
            date,
            timezone,
            from: OnceLock::new(),
            to: OnceLock::new(),
            cc: OnceLock::new(),
            bcc: OnceLock::new(),
            headers: OnceLock::new(),
            attachments: OnceLock::new(),
        })
    }

    /// Look up a property by name.
    ///
    /// The first letter of `name` is uppercased before matching, so `isSpam`
    /// and `IsSpam` are the same property. Names without an accessor fall
    /// back to the top-level payload field of the same name.
    pub fn get(&self, name: &str) -> Result<Property<'_>> {
        let key = upper_first(name);

        let property = match key.as_str() {
            "From" => Property::Contact(self.from()),
            "To" => Property::Contacts(self.to()),
            "Cc" => Property::Contacts(self.cc()),
            "Bcc" => Property::Contacts(self.bcc()),
            "Headers" => Property::Headers(self.headers()),
            "Attachments" => Property::Attachments(self.attachments()),
            "Date" => Property::Date(self.date()),
            "Timezone" => Property::Text(self.timezone()),
            "IsSpam" => Property::Bool(self.is_spam()),
            "SpamScore" => Property::Number(self.spam_score()),
            "SpamStatus" => Property::Text(self.spam_status()),
            "MessageId" => Property::Text(self.message_id()),
            "MessageIdFromHeaders" => Property::OptionalText(self.message_id_from_headers()),
            "OriginalDate" => Property::Text(self.original_date()),
            "OriginalRecipient" => Property::Text(self.original_recipient()),
            "MailboxHash" => Property::Text(self.mailbox_hash()),
            "ReplyTo" => Property::Text(self.reply_to()),
            "Subject" => Property::Text(self.subject()),
            "Tag" => Property::Text(self.tag()),
            "TextBody" => Property::Text(self.text_body()),
            "HtmlBody" => Property::Text(self.html_body()),
            "StrippedTextReply" => Property::Text(self.stripped_text_reply()),
            _ => {
                return self
                    .raw(&key)
                    .map(Property::Raw)
                    .ok_or_else(|| Error::UnknownProperty(name.to_string()));
            }
        };

        Ok(property)
    }

    /// Sender, empty when `FromFull` is missing
    #[must_use]
    pub fn from(&self) -> &Contact {
        self.from.get_or_init(|| {
            self.payload.get("FromFull").map_or_else(
                || Contact::from_full("", "", None),
                Contact::from_record,
            )
        })
    }

    #[must_use]
    pub fn to(&self) -> &[Contact] {
        self.to
            .get_or_init(|| Contact::list_from_value(self.payload.get("ToFull")))
    }

    #[must_use]
    pub fn cc(&self) -> &[Contact] {
        self.cc
            .get_or_init(|| Contact::list_from_value(self.payload.get("CcFull")))
    }

    #[must_use]
    pub fn bcc(&self) -> &[Contact] {
        self.bcc
            .get_or_init(|| Contact::list_from_value(self.payload.get("BccFull")))
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderIndex {
        self.headers
            .get_or_init(|| HeaderIndex::from_value(self.payload.get("Headers")))
    }

    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        self.attachments
            .get_or_init(|| Attachment::list_from_value(self.payload.get("Attachments")))
    }

    /// Normalized receipt date
    #[must_use]
    pub const fn date(&self) -> &Timestamp {
        &self.date
    }

    /// UTC offset label of the receipt date, e.g. `+02:00`
    #[must_use]
    pub const fn timezone(&self) -> &str {
        self.timezone.as_str()
    }

    #[must_use]
    pub fn is_spam(&self) -> bool {
        self.headers().is_spam()
    }

    #[must_use]
    pub fn spam_score(&self) -> f64 {
        self.headers().spam_score()
    }

    #[must_use]
    pub fn spam_status(&self) -> &str {
        self.headers().spam_status()
    }

    /// `Message-ID` as sent by the originating mail server
    #[must_use]
    pub fn message_id_from_headers(&self) -> Option<&str> {
        self.headers().message_id()
    }

    /// Id assigned by the provider (`MessageID`)
    #[must_use]
    pub fn message_id(&self) -> &str {
        self.text("MessageID")
    }

    /// The `Date` field exactly as received
    #[must_use]
    pub fn original_date(&self) -> &str {
        self.text("Date")
    }

    #[must_use]
    pub fn original_recipient(&self) -> &str {
        self.text("OriginalRecipient")
    }

    #[must_use]
    pub fn mailbox_hash(&self) -> &str {
        self.text("MailboxHash")
    }

    #[must_use]
    pub fn reply_to(&self) -> &str {
        self.text("ReplyTo")
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        self.text("Subject")
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        self.text("Tag")
    }

    #[must_use]
    pub fn text_body(&self) -> &str {
        self.text("TextBody")
    }

    #[must_use]
    pub fn html_body(&self) -> &str {
        self.text("HtmlBody")
    }

    #[must_use]
    pub fn stripped_text_reply(&self) -> &str {
        self.text("StrippedTextReply")
    }

    /// A top-level payload field, untouched
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// The whole decoded payload
    #[must_use]
    pub const fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    fn text(&self, key: &str) -> &str {
        self.payload
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

impl FromStr for InboundMessage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json(s)
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
