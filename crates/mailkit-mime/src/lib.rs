//! # mailkit-mime
//!
//! MIME message parsing and generation library for email.
//!
//! ## Features
//!
//! - **Message parsing**: Recursive multipart parsing into a section tree
//! - **Message generation**: Plain, HTML and alternative bodies with attachments
//! - **Lenient input**: Malformed headers, unknown encodings and stray text are tolerated
//! - **Headers**: Ordered header lists with parameters and RFC 2047 decoding
//!
//! ## Quick Start
//!
//! ### Parsing MIME Messages
//!
//! ```ignore
//! use mailkit_mime::MimeMessage;
//!
//! let raw_message = "From: sender@example.com\r\n\
//!                    To: recipient@example.com\r\n\
//!                    Subject: Test\r\n\
//!                    Content-Type: text/plain\r\n\
//!                    \r\n\
//!                    Hello, World!";
//!
//! let message = MimeMessage::parse(raw_message)?;
//! println!("Subject: {}", message.subject);
//! println!("Body: {}", message.body_text());
//! ```
//!
//! ### Building MIME Messages
//!
//! ```ignore
//! use mailkit_mime::{Address, CreateOptions, MimeMessage};
//!
//! let mut message = MimeMessage::new();
//! message.from = Some(Address::parse("Sender <sender@example.com>"));
//! message.to.push("recipient@example.com");
//! message.subject = "Document".to_string();
//! message.set_body_text("Please find the attached document.");
//! message.set_body_html("<p>Please find the attached document.</p>");
//! message.attach("document.pdf");
//!
//! let wire = message.to_mime_with(&CreateOptions::new().with_mailer("Acme"))?;
//! ```
//!
//! ### Saving Attachments
//!
//! ```ignore
//! let message = MimeMessage::parse(&raw)?;
//! for attachment in &message.attachments {
//!     if let Some(name) = attachment.disposition.base_name() {
//!         attachment.save(downloads.join(name))?;
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod address;
mod content_type;
mod creator;
mod disposition;
mod error;
mod header;
mod message;
mod section;
mod transfer;

pub mod config;
pub mod parser;
pub mod token;

pub use address::{Address, Addresses, check_email};
pub use config::CreateOptions;
pub use content_type::{ContentType, MediaKind};
pub use creator::PREAMBLE;
pub use disposition::{ContentDisposition, DispositionKind};
pub use error::{Error, Result};
pub use header::{Header, Headers, names};
pub use message::MimeMessage;
pub use section::{Section, Sections};
pub use transfer::TransferEncoding;
