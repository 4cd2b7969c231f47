//! Wire shapes accepted by the message-creation endpoint.
//!
//! Every optional member is omitted rather than sent empty. The few members
//! that distinguish "clear" from "leave untouched" (`content`, `embeds`, embed
//! `color`) are `Option<Option<T>>`, where the outer `None` omits the key and
//! `Some(None)` serializes an explicit `null`.

use super::*;

use serde::{Deserialize, Deserializer};

bitflags::bitflags! {
    pub struct MessageFlags: u32 {
        /// Do not include any embeds when serializing this message
        const SUPPRESS_EMBEDS        = 1 << 2;

        /// Deliver the message without triggering push or desktop notifications
        const SUPPRESS_NOTIFICATIONS = 1 << 12;
    }
}

serde_shims::impl_serde_for_bitflags!(MessageFlags);

/// Present-but-null deserializes to `Some(None)`, absent falls back to `default`
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<SmolStr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<SmolStr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<SmolStr>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<SmolStr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<SmolStr>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub inline: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<SmolStr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<SmolStr>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<SmolStr>,
}

impl ImageData {
    #[inline]
    pub fn new(url: impl Into<SmolStr>) -> Self {
        ImageData { url: Some(url.into()) }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<SmolStr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<SmolStr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<SmolStr>,

    /// Accent color as `0xRRGGBB`, `null` when the primary embed has no color
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub color: Option<Option<u32>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<FooterData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ImageData>,
}

impl EmbedData {
    /// If this embed is nothing but an image grouped under `url`, returns that image.
    ///
    /// These are the extra objects produced when a gallery is expanded.
    pub fn gallery_image(&self, url: &str) -> Option<&SmolStr> {
        if self.title.is_some()
            || self.description.is_some()
            || self.color.is_some()
            || !self.fields.is_empty()
            || self.author.is_some()
            || self.footer.is_some()
            || self.timestamp.is_some()
            || self.thumbnail.is_some()
            || self.url.as_deref() != Some(url)
        {
            return None;
        }

        self.image.as_ref()?.url.as_ref()
    }
}

/// A binary file attached to a message. Never part of the JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub filename: SmolStr,
    pub content_type: Option<SmolStr>,
    pub data: Bytes,
}

impl Attachment {
    pub fn new(filename: impl Into<SmolStr>, data: impl Into<Bytes>) -> Self {
        Attachment {
            filename: filename.into(),
            content_type: None,
            data: data.into(),
        }
    }

    #[inline]
    pub fn with_content_type(mut self, content_type: impl Into<SmolStr>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageData {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub content: Option<Option<SmolStr>>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Option<Vec<EmbedData>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<SmolStr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<SmolStr>,

    /// Sent as multipart file parts, so never (de)serialized
    #[serde(skip)]
    pub files: Vec<Attachment>,

    /// `[]` replaces the existing attachment list with nothing, absent leaves it alone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<serde_json::Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_name: Option<SmolStr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
}
