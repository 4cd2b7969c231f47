#[macro_use]
extern crate serde;

pub use bytes::Bytes;
pub use smol_str::SmolStr;
pub use timestamp::Timestamp;

pub mod body;
pub mod color;
pub mod json;
pub mod model;
pub mod wire;

pub use body::{Body, Multipart, Part};
pub use color::ColorValue;
pub use json::{check, import_message, stringify_message, ImportError, StructuralError};
pub use model::{Document, Embed, Field, Message};
pub use wire::*;

fn is_false(value: &bool) -> bool {
    !*value
}

/// `None` for empty strings, used wherever the wire format omits empty text
fn non_empty(value: &str) -> Option<SmolStr> {
    match value {
        "" => None,
        value => Some(SmolStr::from(value)),
    }
}
