use super::*;

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Field {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }

    #[inline]
    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    /// Label shown for the field in collapsed editor lists
    pub fn display_name(&self) -> Option<&str> {
        first_line(&self.name).or_else(|| first_line(&self.value))
    }

    pub fn length(&self) -> usize {
        text_len(&self.name) + text_len(&self.value)
    }

    pub fn data(&self) -> FieldData {
        FieldData {
            name: non_empty(&self.name),
            value: non_empty(&self.value),
            inline: self.inline,
        }
    }

    pub fn from_data(data: FieldData) -> Self {
        Field {
            name: owned(data.name),
            value: owned(data.value),
            inline: data.inline,
        }
    }
}
