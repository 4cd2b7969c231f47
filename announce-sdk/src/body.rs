//! Request bodies for the message-creation endpoint.

use crate::{json::stringify_message, wire::*, Bytes, SmolStr};

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// `application/json` body, used when there are no files
    Json(String),

    /// `multipart/form-data` body with an optional `payload_json` part and one part per file
    Multipart(Multipart),
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Multipart {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: String,
    pub filename: Option<SmolStr>,
    pub content_type: Option<SmolStr>,
    pub data: Bytes,
}

impl Part {
    pub fn text(name: impl Into<String>, text: String) -> Self {
        Part {
            name: name.into(),
            filename: None,
            content_type: None,
            data: Bytes::from(text),
        }
    }

    pub fn file(name: impl Into<String>, file: &Attachment) -> Self {
        Part {
            name: name.into(),
            filename: Some(file.filename.clone()),
            content_type: file.content_type.clone(),
            data: file.data.clone(),
        }
    }
}

impl Multipart {
    pub fn get(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|part| part.name == name)
    }
}

impl Body {
    pub fn new(data: &MessageData) -> Body {
        let json = stringify_message(data, false);

        if data.files.is_empty() {
            return Body::Json(json);
        }

        let mut form = Multipart::default();

        if json != "{}" {
            form.parts.push(Part::text("payload_json", json));
        }

        for (idx, file) in data.files.iter().enumerate() {
            form.parts.push(Part::file(format!("file[{idx}]"), file));
        }

        Body::Multipart(form)
    }

    /// MIME type of the body. The multipart boundary is chosen by the HTTP client.
    pub fn content_type(&self) -> &'static str {
        match self {
            Body::Json(_) => "application/json",
            Body::Multipart(_) => "multipart/form-data",
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Body::Multipart(_))
    }

    /// Attaches this body to a request, leaving sending to the caller
    #[cfg(feature = "reqwest")]
    pub fn into_request(self, req: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, reqwest::Error> {
        use reqwest::{header::CONTENT_TYPE, multipart};

        Ok(match self {
            Body::Json(json) => req.header(CONTENT_TYPE, "application/json").body(json),
            Body::Multipart(form) => {
                let mut out = multipart::Form::new();

                for part in form.parts {
                    let mut p = multipart::Part::stream(part.data);

                    if let Some(filename) = part.filename {
                        p = p.file_name(filename.to_string());
                    }

                    if let Some(content_type) = part.content_type {
                        p = p.mime_str(&content_type)?;
                    }

                    out = out.part(part.name, p);
                }

                req.multipart(out)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Message;

    #[test]
    fn test_json_without_files() {
        let message = Message {
            content: "hello".into(),
            ..Message::new()
        };

        let body = message.body();
        assert_eq!(body.content_type(), "application/json");
        assert_eq!(body, Body::Json(message.to_json(false)));
    }

    #[test]
    fn test_multipart_with_files() {
        let mut message = Message {
            content: "see attached".into(),
            ..Message::new()
        };
        message.files.push(Attachment::new("a.png", &b"png"[..]).with_content_type("image/png"));
        message.files.push(Attachment::new("b.txt", &b"txt"[..]));

        let Body::Multipart(form) = message.body() else {
            panic!("expected multipart");
        };

        let names: Vec<_> = form.parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["payload_json", "file[0]", "file[1]"]);

        let payload = form.get("payload_json").unwrap();
        assert_eq!(payload.filename, None);
        assert_eq!(payload.data, Bytes::from(message.to_json(false)));
        assert!(!std::str::from_utf8(&payload.data).unwrap().contains("attachments"));

        let file = form.get("file[0]").unwrap();
        assert_eq!(file.filename.as_deref(), Some("a.png"));
        assert_eq!(file.content_type.as_deref(), Some("image/png"));
        assert_eq!(&file.data[..], b"png");

        assert_eq!(form.get("file[1]").unwrap().filename.as_deref(), Some("b.txt"));
    }

    #[test]
    fn test_vacuous_payload_is_skipped() {
        let data = MessageData {
            files: vec![Attachment::new("only.bin", &b"\x00"[..])],
            ..Default::default()
        };

        let Body::Multipart(form) = Body::new(&data) else {
            panic!("expected multipart");
        };

        assert_eq!(form.parts.len(), 1);
        assert_eq!(form.parts[0].name, "file[0]");
    }
}
