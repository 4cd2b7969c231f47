//! Form-level checks run before a message may be saved.
//!
//! The document model accepts any text. These checks mirror Discord's limits
//! and report each problem against the path of the offending input.

use once_cell::sync::Lazy;
use regex::Regex;

use sdk::model::text_len;
use sdk::{Document, Embed, Message};

use crate::config::Limits;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:https?://|[%{])").expect("URL pattern is valid"));

/// Empty values pass, everything else must look like an http(s) URL or a template
pub fn is_url(value: &str) -> bool {
    value.is_empty() || URL_PATTERN.is_match(value)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path}: {message}")]
pub struct FormError {
    pub path: String,
    pub message: String,
}

struct Checker<'a> {
    limits: &'a Limits,
    errors: Vec<FormError>,
}

impl Checker<'_> {
    fn error(&mut self, path: String, message: String) {
        self.errors.push(FormError { path, message });
    }

    fn max_length(&mut self, path: impl FnOnce() -> String, value: &str, max: usize) {
        if text_len(value) > max {
            self.error(path(), format!("Exceeds maximum length of {max}"));
        }
    }

    fn required(&mut self, path: impl FnOnce() -> String, value: &str) -> bool {
        let present = !value.is_empty();
        if !present {
            self.error(path(), "Required".to_owned());
        }
        present
    }

    fn url(&mut self, path: impl FnOnce() -> String, value: &str) {
        if !is_url(value) {
            self.error(path(), "Invalid URL".to_owned());
        }
    }

    fn message(&mut self, message: &Message, path: &str) {
        let limits = self.limits;

        self.max_length(|| format!("{path}.content"), &message.content, limits.content);

        let size = message.size();
        if size > limits.embeds {
            self.error(format!("{path}.embeds"), format!("Exceeds maximum of {} embeds", limits.embeds));
        }

        let embed_length = message.embed_length();
        if embed_length > limits.embed_total {
            self.error(
                format!("{path}.embeds"),
                format!("Embed text exceeds maximum combined length of {}", limits.embed_total),
            );
        }

        if message.files.len() > limits.files {
            self.error(format!("{path}.files"), format!("Exceeds maximum of {} files", limits.files));
        }

        for (idx, embed) in message.embeds.iter().enumerate() {
            self.embed(embed, &format!("{path}.embeds[{idx}]"));
        }
    }

    fn embed(&mut self, embed: &Embed, path: &str) {
        let limits = self.limits;

        self.max_length(|| format!("{path}.title"), &embed.title, limits.title);
        self.max_length(|| format!("{path}.description"), &embed.description, limits.description);
        self.url(|| format!("{path}.url"), &embed.url);

        if embed.fields.len() > limits.fields {
            self.error(format!("{path}.fields"), format!("Exceeds maximum of {} fields", limits.fields));
        }

        for (idx, field) in embed.fields.iter().enumerate() {
            let field_path = |key: &str| format!("{path}.fields[{idx}].{key}");

            if self.required(|| field_path("name"), &field.name) {
                self.max_length(|| field_path("name"), &field.name, limits.field_name);
            }

            if self.required(|| field_path("value"), &field.value) {
                self.max_length(|| field_path("value"), &field.value, limits.field_value);
            }
        }

        self.max_length(|| format!("{path}.author"), &embed.author, limits.author);
        self.url(|| format!("{path}.authorUrl"), &embed.author_url);
        self.url(|| format!("{path}.authorIcon"), &embed.author_icon);

        self.max_length(|| format!("{path}.footer"), &embed.footer, limits.footer);
        self.url(|| format!("{path}.footerIcon"), &embed.footer_icon);

        // only the first bad image is reported
        if let Some(idx) = embed.gallery.iter().position(|image| !is_url(image)) {
            self.error(format!("{path}.gallery"), format!("Image {}: Invalid URL", idx + 1));
        }

        self.url(|| format!("{path}.thumbnail"), &embed.thumbnail);
    }
}

pub fn check_message(message: &Message, limits: &Limits, path: &str) -> Vec<FormError> {
    let mut checker = Checker {
        limits,
        errors: Vec::new(),
    };

    checker.message(message, path);
    checker.errors
}

pub fn check_document(document: &Document, limits: &Limits) -> Vec<FormError> {
    let mut checker = Checker {
        limits,
        errors: Vec::new(),
    };

    for (idx, message) in document.iter().enumerate() {
        checker.message(message, &format!("messages[{idx}]"));
    }

    checker.errors
}

#[cfg(test)]
mod tests {
    use super::*;

    use sdk::{Attachment, Field};

    fn check(message: &Message) -> Vec<String> {
        check_message(message, &Limits::default(), "messages[0]")
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_is_url() {
        assert!(is_url(""));
        assert!(is_url("https://example.com"));
        assert!(is_url("http://example.com"));
        assert!(is_url("{avatar}"));
        assert!(is_url("%server_icon%"));
        assert!(!is_url("example.com"));
        assert!(!is_url("ftp://example.com"));
    }

    #[test]
    fn test_valid_message() {
        let message = Message {
            content: "x".repeat(2000),
            embeds: vec![Embed {
                title: "Title".into(),
                url: "https://example.com".into(),
                fields: vec![Field::new("name", "value")],
                gallery: vec!["https://img/1".into()],
                ..Embed::default()
            }],
            ..Message::new()
        };

        assert_eq!(check(&message), Vec::<String>::new());
    }

    #[test]
    fn test_content_too_long() {
        let message = Message {
            content: "x".repeat(2001),
            ..Message::new()
        };

        assert_eq!(check(&message), ["messages[0].content: Exceeds maximum length of 2000"]);
    }

    #[test]
    fn test_embed_problems() {
        let message = Message {
            embeds: vec![Embed {
                title: "t".repeat(257),
                url: "example.com".into(),
                fields: vec![Field::new("", "value"), Field::new("name", "v".repeat(1025))],
                gallery: vec!["https://img/1".into(), "img/2".into(), "img/3".into()],
                ..Embed::default()
            }],
            ..Message::new()
        };

        assert_eq!(
            check(&message),
            [
                "messages[0].embeds[0].title: Exceeds maximum length of 256",
                "messages[0].embeds[0].url: Invalid URL",
                "messages[0].embeds[0].fields[0].name: Required",
                "messages[0].embeds[0].fields[1].value: Exceeds maximum length of 1024",
                "messages[0].embeds[0].gallery: Image 2: Invalid URL",
            ]
        );
    }

    #[test]
    fn test_aggregate_limits() {
        let mut message = Message {
            embeds: vec![Embed {
                gallery: (0..11).map(|i| format!("https://img/{i}")).collect(),
                description: "d".repeat(4000),
                ..Embed::default()
            }],
            ..Message::new()
        };
        message.embeds.push(Embed {
            description: "d".repeat(2001),
            ..Embed::default()
        });

        for i in 0..11 {
            message.files.push(Attachment::new(format!("{i}.txt"), &b""[..]));
        }

        assert_eq!(
            check(&message),
            [
                "messages[0].embeds: Exceeds maximum of 10 embeds",
                "messages[0].embeds: Embed text exceeds maximum combined length of 6000",
                "messages[0].files: Exceeds maximum of 10 files",
            ]
        );
    }

    #[test]
    fn test_document_paths() {
        let mut document = Document::new();
        document.push(Message {
            content: "x".repeat(2001),
            ..Message::new()
        });

        let errors = check_document(&document, &Limits::default());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "messages[1].content");
    }
}
