use sdk::{Body, Document, Message};

use crate::{
    config::Config,
    form::{self, FormError},
    Error,
};

/// What happened to the document, passed to every observer after the fact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Edited(usize),
    Imported(usize),
    Pushed(usize),
    Removed(usize),
    Cleared,
}

pub type Observer = Box<dyn FnMut(Change, &Document)>;

/// Owns the document being edited. All writes go through here so that
/// observers see each change exactly once, after it is complete.
pub struct EditorState {
    pub config: Config,
    document: Document,
    observers: Vec<Observer>,
}

impl EditorState {
    pub fn new(config: Config) -> Self {
        EditorState {
            document: Document::from_messages(vec![config.new_message()]),
            observers: Vec::new(),
            config,
        }
    }

    #[inline]
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn message(&self, index: usize) -> Result<&Message, Error> {
        self.document.get(index).ok_or(Error::MissingMessage(index))
    }

    pub fn subscribe(&mut self, observer: impl FnMut(Change, &Document) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&mut self, change: Change) {
        trace!(?change, "Document changed");

        for observer in &mut self.observers {
            observer(change, &self.document);
        }
    }

    /// Applies `f` to the message at `index` and notifies observers
    pub fn mutate<R>(&mut self, index: usize, f: impl FnOnce(&mut Message) -> R) -> Result<R, Error> {
        let message = self.document.get_mut(index).ok_or(Error::MissingMessage(index))?;
        let res = f(message);
        self.emit(Change::Edited(index));
        Ok(res)
    }

    pub fn push_message(&mut self) -> usize {
        self.document.push(self.config.new_message());
        let index = self.document.len() - 1;
        self.emit(Change::Pushed(index));
        index
    }

    pub fn remove_message(&mut self, index: usize) -> Option<Message> {
        let removed = self.document.remove(index)?;
        self.emit(Change::Removed(index));
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.document.clear();

        // reapply configured overrides to the fresh message
        if let Some(message) = self.document.get_mut(0) {
            *message = self.config.new_message();
        }

        self.emit(Change::Cleared);
    }

    /// Replaces the message at `index` with the JSON in `text`. Nothing changes
    /// unless the text parses and validates cleanly. Attached files are kept,
    /// and keys the text leaves out take the configured overrides.
    pub fn import(&mut self, index: usize, text: &str) -> Result<(), Error> {
        let message = self.document.get_mut(index).ok_or(Error::MissingMessage(index))?;

        let data = match sdk::import_message(text) {
            Ok(data) => data,
            Err(e) => {
                debug!(index, error = %e, "Rejected message import");
                return Err(e.into());
            }
        };

        message.apply_data(data, self.config.new_message());
        self.emit(Change::Imported(index));

        Ok(())
    }

    pub fn export(&self, index: usize) -> Result<String, Error> {
        Ok(self.message(index)?.to_json(self.config.parsed.pretty))
    }

    pub fn validate(&self) -> Vec<FormError> {
        form::check_document(&self.document, self.config.limits())
    }

    /// Body to hand to the HTTP client, refused while the message fails form checks
    pub fn save(&self, index: usize) -> Result<Body, Error> {
        let message = self.message(index)?;

        let errors = form::check_message(message, self.config.limits(), &format!("messages[{index}]"));
        if !errors.is_empty() {
            warn!(index, problems = errors.len(), "Refusing to save invalid message");
            return Err(Error::Invalid(errors));
        }

        let body = message.body();
        info!(index, content_type = body.content_type(), files = message.files.len(), "Prepared message body");

        Ok(body)
    }
}
