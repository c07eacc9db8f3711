// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Postmark Inbound
//!
//! A strongly-typed, read-only view over the JSON body that Postmark posts to
//! an inbound webhook.
//!
//! # Features
//!
//! - Lenient date parsing that tolerates trailing timezone comments
//! - Typed contacts, headers and attachments, built lazily
//! - Spam score and status derived from spam filter headers
//! - Passthrough access to payload fields without a dedicated accessor
//!
//! # Example
//!
//! ```rust
//! use postmark_inbound::InboundMessage;
//!
//! let body = r#"{
//!     "Date": "Wed, 6 Sep 2017 19:11:00 +0200 (CEST)",
//!     "FromFull": {"Name": "John Doe", "Email": "john@example.com"},
//!     "Headers": [{"Name": "X-Spam-Status", "Value": "No"}]
//! }"#;
//! let message = InboundMessage::from_json(body).unwrap();
//!
//! assert_eq!(message.from().full, "John Doe <john@example.com>");
//! assert_eq!(message.timezone(), "+02:00");
//! assert!(!message.is_spam());
//! ```

mod date;
mod error;
mod headers;
mod lenient;
mod message;
mod types;

pub use date::{DAY_ABBREVIATIONS, Timestamp};
pub use error::{Error, Result};
pub use headers::{
    DEFAULT_SPAM_SCORE, DEFAULT_SPAM_STATUS, HeaderIndex, MESSAGE_ID_HEADER, SPAM_SCORE_HEADER,
    SPAM_STATUS_HEADER,
};
pub use message::{InboundMessage, Property};
pub use types::{Attachment, Contact};
