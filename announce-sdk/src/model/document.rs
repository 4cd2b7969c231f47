use super::*;

/// An ordered batch of messages, never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    messages: Vec<Message>,
}

impl Default for Document {
    fn default() -> Self {
        Document {
            messages: vec![Message::new()],
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Document::default()
    }

    /// Starts a document from existing messages, falling back to a single
    /// empty message if there are none.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        match messages.is_empty() {
            true => Document::new(),
            false => Document { messages },
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.messages.push(Message::new());
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Removes the message at `index`, unless it is the only one left.
    pub fn remove(&mut self, index: usize) -> Option<Message> {
        if self.messages.len() <= 1 || index >= self.messages.len() {
            return None;
        }

        Some(self.messages.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Message> {
        self.messages.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut document = Document::new();
        assert_eq!(document.len(), 1);
        assert_eq!(document.get(0), Some(&Message::new()));

        document.push(Message {
            content: "second".into(),
            ..Message::new()
        });
        document.push(Message::new());
        assert_eq!(document.len(), 3);

        document.clear();
        assert_eq!(document.len(), 1);
        assert_eq!(document.messages(), &[Message::new()]);
    }

    #[test]
    fn test_never_empty() {
        let mut document = Document::new();
        assert_eq!(document.remove(0), None);
        assert!(!document.is_empty());

        document.push(Message::new());
        assert!(document.remove(1).is_some());
        assert_eq!(document.remove(5), None);

        assert_eq!(Document::from_messages(Vec::new()).len(), 1);
    }
}
