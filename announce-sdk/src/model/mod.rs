//! Editable document tree: a [`Document`] owns [`Message`]s, which own
//! [`Embed`]s, which own [`Field`]s.
//!
//! Derived values (lengths, sizes, wire projections) are recomputed on every call.

use crate::{non_empty, wire::*, ColorValue, SmolStr, Timestamp};

pub mod document;
pub mod embed;
pub mod field;
pub mod message;

pub use document::Document;
pub use embed::Embed;
pub use field::Field;
pub use message::Message;

/// First non-blank line of `text`, trimmed
fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}

#[inline]
fn has_text(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Length as counted against Discord's character limits
#[inline]
pub fn text_len(text: &str) -> usize {
    text.chars().count()
}

fn owned(value: Option<SmolStr>) -> String {
    value.map(String::from).unwrap_or_default()
}
