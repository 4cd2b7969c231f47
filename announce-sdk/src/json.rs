//! JSON export and validated import of [`MessageData`].

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::{wire::*, Timestamp};

/// Serializes a message payload. `files` never appear in the output.
pub fn stringify_message(data: &MessageData, pretty: bool) -> String {
    let res = match pretty {
        true => serde_json::to_string_pretty(data),
        false => serde_json::to_string(data),
    };

    // only string keys and plain values, so serialization cannot fail
    res.expect("MessageData is always serializable")
}

/// A type mismatch found at `path` (e.g. `$.embeds[0].color`)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path}: {message}")]
pub struct StructuralError {
    pub path: String,
    pub message: Cow<'static, str>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("{0}")]
    Syntax(String),

    #[error("Invalid message structure ({} errors)", .0.len())]
    Structure(Vec<StructuralError>),
}

impl ImportError {
    /// One line per problem, as shown beneath the JSON editor
    pub fn messages(&self) -> Vec<String> {
        match self {
            ImportError::Syntax(msg) => vec![msg.clone()],
            ImportError::Structure(errors) => errors.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Strict JSON parse, reporting only the description of the syntax problem
pub fn parse_json(text: &str) -> Result<Value, String> {
    serde_json::from_str(text).map_err(|e| e.to_string())
}

/// Parses and validates `text`, returning the payload only if it has no errors at all.
/// Flag bits the editor has no toggle for are dropped.
pub fn import_message(text: &str) -> Result<MessageData, ImportError> {
    let mut value = parse_json(text).map_err(ImportError::Syntax)?;

    let errors = validate_message(&value, "$");
    if !errors.is_empty() {
        return Err(ImportError::Structure(errors));
    }

    if let Some(flags) = value.get_mut("flags") {
        let bits = flags.as_u64().and_then(|f| u32::try_from(f).ok()).unwrap_or_default();
        *flags = MessageFlags::from_bits_truncate(bits).bits().into();
    }

    serde_json::from_value(value).map_err(|e| {
        ImportError::Structure(vec![StructuralError {
            path: "$".to_owned(),
            message: Cow::Owned(e.to_string()),
        }])
    })
}

/// Every problem with `text`. Applying it must be blocked while this is non-empty.
pub fn check(text: &str) -> Vec<String> {
    match import_message(text) {
        Ok(_) => Vec::new(),
        Err(e) => e.messages(),
    }
}

/// Checks `value` against the message shape, collecting every mismatch.
///
/// Unknown keys are tolerated and absent keys are fine, but a present key
/// must have the expected type.
pub fn validate_message(value: &Value, path: &str) -> Vec<StructuralError> {
    let mut v = Validator::default();
    v.message(value, path);
    v.errors
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    String,
    NullableString,
    Boolean,
    Array,
    Color,
    Flags,
    Timestamp,
}

impl Expect {
    fn matches(self, value: &Value) -> bool {
        match self {
            Expect::String => value.is_string(),
            Expect::NullableString => value.is_string() || value.is_null(),
            Expect::Boolean => value.is_boolean(),
            Expect::Array => value.is_array(),
            Expect::Color => value.is_null() || matches!(value.as_u64(), Some(c) if c <= 0xFFFFFF),
            Expect::Flags => matches!(value.as_u64(), Some(f) if u32::try_from(f).is_ok()),
            Expect::Timestamp => matches!(value.as_str(), Some(ts) if Timestamp::parse(ts).is_some()),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Expect::String => "Expected string",
            Expect::NullableString => "Expected string or null",
            Expect::Boolean => "Expected boolean",
            Expect::Array => "Expected array",
            Expect::Color => "Expected integer color between 0 and 16777215, or null",
            Expect::Flags => "Expected unsigned 32-bit integer",
            Expect::Timestamp => "Expected ISO 8601 timestamp string",
        }
    }
}

#[derive(Default)]
struct Validator {
    errors: Vec<StructuralError>,
}

impl Validator {
    fn error(&mut self, path: String, message: &'static str) {
        self.errors.push(StructuralError {
            path,
            message: Cow::Borrowed(message),
        });
    }

    fn object<'a>(&mut self, value: &'a Value, path: &str) -> Option<&'a Map<String, Value>> {
        let obj = value.as_object();
        if obj.is_none() {
            self.error(path.to_owned(), "Expected object");
        }
        obj
    }

    fn keys(&mut self, obj: &Map<String, Value>, path: &str, keys: &[(&str, Expect)]) {
        for &(key, expect) in keys {
            if let Some(value) = obj.get(key) {
                if !expect.matches(value) {
                    self.error(format!("{path}.{key}"), expect.describe());
                }
            }
        }
    }

    /// Present key holding an object checked against `keys`
    fn nested(&mut self, obj: &Map<String, Value>, path: &str, key: &str, keys: &[(&str, Expect)]) {
        if let Some(value) = obj.get(key) {
            let path = format!("{path}.{key}");
            if let Some(nested) = self.object(value, &path) {
                self.keys(nested, &path, keys);
            }
        }
    }

    fn message(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else { return };

        self.keys(obj, path, &[
            ("content",     Expect::NullableString),
            ("username",    Expect::String),
            ("avatar_url",  Expect::String),
            ("files",       Expect::Array),
            ("attachments", Expect::Array),
            ("thread_name", Expect::NullableString),
            ("flags",       Expect::Flags),
        ]);

        match obj.get("embeds") {
            None | Some(Value::Null) => {}
            Some(Value::Array(embeds)) => {
                for (idx, embed) in embeds.iter().enumerate() {
                    self.embed(embed, &format!("{path}.embeds[{idx}]"));
                }
            }
            Some(_) => self.error(format!("{path}.embeds"), "Expected array or null"),
        }
    }

    fn embed(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else { return };

        self.keys(obj, path, &[
            ("title",       Expect::String),
            ("description", Expect::String),
            ("url",         Expect::String),
            ("timestamp",   Expect::Timestamp),
            ("color",       Expect::Color),
        ]);

        self.nested(obj, path, "footer", &[("text", Expect::String), ("icon_url", Expect::String)]);
        self.nested(obj, path, "image", &[("url", Expect::String)]);
        self.nested(obj, path, "thumbnail", &[("url", Expect::String)]);

        self.nested(obj, path, "author", &[
            ("name",     Expect::String),
            ("url",      Expect::String),
            ("icon_url", Expect::String),
        ]);

        match obj.get("fields") {
            None => {}
            Some(Value::Array(fields)) => {
                for (idx, field) in fields.iter().enumerate() {
                    let path = format!("{path}.fields[{idx}]");
                    if let Some(field) = self.object(field, &path) {
                        self.keys(field, &path, &[
                            ("name",   Expect::String),
                            ("value",  Expect::String),
                            ("inline", Expect::Boolean),
                        ]);
                    }
                }
            }
            Some(_) => self.error(format!("{path}.fields"), "Expected array"),
        }
    }
}
