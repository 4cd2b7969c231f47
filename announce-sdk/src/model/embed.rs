use super::*;

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub url: String,
    pub color: ColorValue,
    pub fields: Vec<Field>,

    pub author: String,
    pub author_url: String,
    pub author_icon: String,

    pub footer: String,
    pub footer_icon: String,
    pub timestamp: Option<Timestamp>,

    /// Image URLs. The first is the embed's own image, the rest are sent as
    /// extra embeds sharing this embed's `url` so clients group them together.
    pub gallery: Vec<String>,
    pub thumbnail: String,
}

impl Embed {
    /// Characters counted against the per-message embed text limit
    pub fn length(&self) -> usize {
        text_len(&self.title)
            + text_len(&self.description)
            + self.fields.iter().map(Field::length).sum::<usize>()
            + text_len(&self.author)
            + text_len(&self.footer)
    }

    /// Number of wire embeds this embed expands to. Never zero.
    pub fn size(&self) -> usize {
        self.gallery.len().max(1)
    }

    pub fn has_title(&self) -> bool {
        has_text(&self.title)
    }

    pub fn has_description(&self) -> bool {
        has_text(&self.description)
    }

    pub fn has_author(&self) -> bool {
        has_text(&self.author)
    }

    pub fn has_footer(&self) -> bool {
        has_text(&self.footer) || self.timestamp.is_some()
    }

    pub fn display_name(&self) -> Option<&str> {
        first_line(&self.author)
            .or_else(|| first_line(&self.title))
            .or_else(|| first_line(&self.description))
            .or_else(|| self.fields.iter().find_map(Field::display_name))
            .or_else(|| first_line(&self.footer))
    }

    pub fn data(&self) -> Vec<EmbedData> {
        let author = self.has_author().then(|| AuthorData {
            name: Some(self.author.as_str().into()),
            url: non_empty(&self.author_url),
            icon_url: non_empty(&self.author_icon),
        });

        // a timestamp alone renders without a footer object, but an icon needs one
        let footer = (has_text(&self.footer) || (self.timestamp.is_some() && !self.footer_icon.is_empty()))
            .then(|| FooterData {
                text: non_empty(&self.footer),
                icon_url: non_empty(&self.footer_icon),
            });

        let mut embeds = Vec::with_capacity(self.size());

        embeds.push(EmbedData {
            title: non_empty(&self.title),
            description: non_empty(&self.description),
            url: non_empty(&self.url),
            color: Some(self.color.raw()),
            fields: self.fields.iter().map(Field::data).collect(),
            author,
            footer,
            timestamp: self.timestamp,
            image: self.gallery.first().map(|url| ImageData::new(url.as_str())),
            thumbnail: non_empty(&self.thumbnail).map(ImageData::new),
        });

        for image in self.gallery.iter().skip(1) {
            embeds.push(EmbedData {
                url: Some(self.url.as_str().into()),
                image: Some(ImageData::new(image.as_str())),
                ..EmbedData::default()
            });
        }

        embeds
    }

    /// Builds an embed from its primary wire object. Gallery extras are
    /// folded back in by [`Message::from_data`].
    pub fn from_data(data: EmbedData) -> Self {
        let author = data.author.unwrap_or_default();
        let footer = data.footer.unwrap_or_default();

        Embed {
            title: owned(data.title),
            description: owned(data.description),
            url: owned(data.url),
            color: ColorValue::from(data.color.flatten()),
            fields: data.fields.into_iter().map(Field::from_data).collect(),
            author: owned(author.name),
            author_url: owned(author.url),
            author_icon: owned(author.icon_url),
            footer: owned(footer.text),
            footer_icon: owned(footer.icon_url),
            timestamp: data.timestamp,
            gallery: data.image.and_then(|image| image.url).map(String::from).into_iter().collect(),
            thumbnail: owned(data.thumbnail.and_then(|image| image.url)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn to_json(embed: &Embed) -> serde_json::Value {
        serde_json::to_value(embed.data()).unwrap()
    }

    #[test]
    fn test_empty_embed() {
        let embed = Embed::default();

        assert_eq!(embed.size(), 1);
        assert_eq!(embed.length(), 0);
        assert_eq!(embed.display_name(), None);

        let data = embed.data();
        assert_eq!(data.len(), 1);
        assert!(data[0].fields.is_empty());
        assert_eq!(to_json(&embed), json!([{ "color": null }]));
    }

    #[test]
    fn test_gallery_expansion() {
        let embed = Embed {
            title: "Patch notes".into(),
            url: "https://example.com/notes".into(),
            color: ColorValue::from_raw(0x5865f2),
            gallery: vec!["https://img/a.png".into(), "https://img/b.png".into(), "https://img/c.png".into()],
            ..Embed::default()
        };

        assert_eq!(embed.size(), 3);

        assert_eq!(
            to_json(&embed),
            json!([
                {
                    "title": "Patch notes",
                    "url": "https://example.com/notes",
                    "color": 0x5865f2,
                    "image": { "url": "https://img/a.png" },
                },
                { "url": "https://example.com/notes", "image": { "url": "https://img/b.png" } },
                { "url": "https://example.com/notes", "image": { "url": "https://img/c.png" } },
            ])
        );
    }

    #[test]
    fn test_full_primary_embed() {
        let embed = Embed {
            title: "Title".into(),
            description: "Description".into(),
            fields: vec![Field::new("Name", "Value").inline(true), Field::new("", "Only value")],
            author: "Author".into(),
            author_url: "https://example.com/author".into(),
            footer: "Footer".into(),
            footer_icon: "https://example.com/icon.png".into(),
            timestamp: Timestamp::parse("2024-05-01T12:30:00.000Z"),
            thumbnail: "https://example.com/thumb.png".into(),
            ..Embed::default()
        };

        assert_eq!(embed.length(), 5 + 11 + 4 + 5 + 10 + 6 + 6);
        assert_eq!(embed.display_name(), Some("Author"));

        assert_eq!(
            to_json(&embed),
            json!([{
                "title": "Title",
                "description": "Description",
                "color": null,
                "fields": [
                    { "name": "Name", "value": "Value", "inline": true },
                    { "value": "Only value" },
                ],
                "author": { "name": "Author", "url": "https://example.com/author" },
                "footer": { "text": "Footer", "icon_url": "https://example.com/icon.png" },
                "timestamp": "2024-05-01T12:30:00.000Z",
                "thumbnail": { "url": "https://example.com/thumb.png" },
            }])
        );
    }

    #[test]
    fn test_footer_rules() {
        let mut embed = Embed {
            timestamp: Timestamp::parse("2024-05-01T12:30:00.000Z"),
            ..Embed::default()
        };

        assert!(embed.has_footer());
        assert_eq!(embed.data()[0].footer, None);

        embed.footer_icon = "https://example.com/icon.png".into();
        assert_eq!(
            embed.data()[0].footer,
            Some(FooterData {
                text: None,
                icon_url: Some("https://example.com/icon.png".into()),
            })
        );

        embed.timestamp = None;
        assert!(!embed.has_footer());
        assert_eq!(embed.data()[0].footer, None);
    }

    #[test]
    fn test_blank_author_is_omitted() {
        let embed = Embed {
            author: "   ".into(),
            author_url: "https://example.com".into(),
            ..Embed::default()
        };

        assert!(!embed.has_author());
        assert_eq!(embed.data()[0].author, None);
    }

    #[test]
    fn test_display_name_falls_through_fields() {
        let embed = Embed {
            fields: vec![Field::new(" ", " "), Field::new("", "\nsecond field")],
            footer: "footer".into(),
            ..Embed::default()
        };

        assert_eq!(embed.display_name(), Some("second field"));
    }
}
