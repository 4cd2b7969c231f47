use super::*;

use crate::{json::stringify_message, Body};

pub const DEFAULT_USERNAME: &str = "Junction Announcer";
pub const DEFAULT_AVATAR: &str =
    "https://cdn.discordapp.com/app-icons/1320744210240114688/6b4d4e3c90fc3d0b6897b7890721cc37.png?size=256";
pub const DEFAULT_BADGE: &str = "Bot";

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub content: String,
    pub username: String,
    pub avatar: String,
    pub embeds: Vec<Embed>,
    pub thread_name: String,
    pub reference: String,
    pub timestamp: Option<Timestamp>,
    pub badge: Option<String>,
    pub suppress_embeds: bool,
    /// Silent message
    pub suppress_notifications: bool,

    /// Attached files, kept out of every snapshot and JSON export
    pub files: Vec<Attachment>,
}

impl Default for Message {
    fn default() -> Self {
        Message {
            content: String::new(),
            username: DEFAULT_USERNAME.to_owned(),
            avatar: DEFAULT_AVATAR.to_owned(),
            embeds: Vec::new(),
            thread_name: String::new(),
            reference: String::new(),
            timestamp: None,
            badge: Some(DEFAULT_BADGE.to_owned()),
            suppress_embeds: false,
            suppress_notifications: false,
            files: Vec::new(),
        }
    }
}

impl Message {
    pub fn new() -> Self {
        Message::default()
    }

    pub fn has_content(&self) -> bool {
        has_text(&self.content)
    }

    pub fn has_extras(&self) -> bool {
        !self.embeds.is_empty() || !self.files.is_empty()
    }

    pub fn embed_length(&self) -> usize {
        self.embeds.iter().map(Embed::length).sum()
    }

    /// Number of wire embeds after gallery expansion
    pub fn size(&self) -> usize {
        self.embeds.iter().map(Embed::size).sum()
    }

    pub fn flags(&self) -> MessageFlags {
        let mut flags = MessageFlags::empty();
        flags.set(MessageFlags::SUPPRESS_EMBEDS, self.suppress_embeds);
        flags.set(MessageFlags::SUPPRESS_NOTIFICATIONS, self.suppress_notifications);
        flags
    }

    pub fn data(&self) -> MessageData {
        let embeds: Vec<EmbedData> = self.embeds.iter().flat_map(Embed::data).collect();
        let flags = self.flags();

        MessageData {
            content: Some(non_empty(&self.content)),
            embeds: Some((!embeds.is_empty()).then_some(embeds)),
            username: non_empty(&self.username),
            avatar_url: non_empty(&self.avatar),
            files: self.files.clone(),
            attachments: self.files.is_empty().then(Vec::new),
            thread_name: non_empty(&self.thread_name),
            flags: (!flags.is_empty()).then_some(flags),
        }
    }

    /// Request body for the message-creation endpoint, multipart when files are attached
    pub fn body(&self) -> Body {
        Body::new(&self.data())
    }

    /// JSON export of [`Message::data`], files excluded
    pub fn to_json(&self, pretty: bool) -> String {
        stringify_message(&self.data(), pretty)
    }

    /// Builds a whole message from a wire snapshot. Members the wire format
    /// does not carry take their defaults, and `files` is left empty.
    ///
    /// An empty username or avatar is omitted on export, so it comes back as
    /// the default override when that export is imported again.
    pub fn from_data(data: MessageData) -> Self {
        Message::from_data_with(data, Message::default())
    }

    /// Like [`Message::from_data`], filling whatever `data` lacks from `base`
    /// instead of the built-in defaults.
    pub fn from_data_with(data: MessageData, base: Message) -> Self {
        let defaults = Message {
            files: Vec::new(),
            ..base
        };
        let flags = data.flags.unwrap_or_else(MessageFlags::empty);

        let mut embeds: Vec<Embed> = Vec::new();

        for embed in data.embeds.flatten().unwrap_or_default() {
            if let Some(last) = embeds.last_mut() {
                if !last.gallery.is_empty() {
                    if let Some(image) = embed.gallery_image(&last.url) {
                        last.gallery.push(image.to_string());
                        continue;
                    }
                }
            }

            embeds.push(Embed::from_data(embed));
        }

        Message {
            content: owned(data.content.flatten()),
            username: data.username.map(String::from).unwrap_or(defaults.username),
            avatar: data.avatar_url.map(String::from).unwrap_or(defaults.avatar),
            embeds,
            thread_name: owned(data.thread_name),
            suppress_embeds: flags.contains(MessageFlags::SUPPRESS_EMBEDS),
            suppress_notifications: flags.contains(MessageFlags::SUPPRESS_NOTIFICATIONS),
            ..defaults
        }
    }

    /// Replaces the entire tree with `data` in one assignment, taking anything
    /// `data` leaves out from `base`. Attached files cannot be expressed in JSON
    /// and are carried over untouched.
    pub fn apply_data(&mut self, data: MessageData, base: Message) {
        let files = std::mem::take(&mut self.files);

        *self = Message {
            files,
            ..Message::from_data_with(data, base)
        };
    }
}
