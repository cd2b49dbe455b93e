use crate::color::NoteColor;

const EMPTY_TITLE: &str = "<Empty>";
const NO_TITLE: &str = "Untitled";
const MAX_TITLE_CHARS: usize = 12;

/// The persisted unit of content: written text plus a color tag.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    text: String,
    color: NoteColor,
}

impl Note {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: NoteColor::default(),
        }
    }

    pub(crate) fn from_parts(text: String, color: NoteColor) -> Self {
        Self { text, color }
    }

    /// Same note with the text replaced; the color keeps its value.
    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: self.color,
        }
    }

    /// Same note with the color tag replaced; the text keeps its value.
    #[must_use]
    pub fn with_color(&self, color: NoteColor) -> Self {
        Self {
            text: self.text.clone(),
            color,
        }
    }

    #[must_use]
    pub fn get_text(&self) -> &str {
        self.text.as_str()
    }

    #[must_use]
    pub fn get_color(&self) -> NoteColor {
        self.color
    }

    #[must_use]
    pub fn get_title(&self) -> &str {
        if self.text.is_empty() {
            EMPTY_TITLE
        } else {
            self.text.lines().next().map_or(NO_TITLE, |line| {
                match line.char_indices().nth(MAX_TITLE_CHARS) {
                    None => line,
                    Some((byte_index, _)) => &line[..byte_index],
                }
            })
        }
    }
}

#[test]
fn new_note_defaults_to_light_yellow() {
    let note = Note::new("hello");
    assert_eq!(note.get_text(), "hello");
    assert_eq!(note.get_color(), NoteColor::LightYellow);
}

#[test]
fn with_text_replaces_only_the_text() {
    let note = Note::new("old").with_color(NoteColor::LightRed);
    let updated = note.with_text("new");
    assert_eq!(updated.get_text(), "new");
    assert_eq!(updated.get_color(), NoteColor::LightRed);
    // the original value is untouched
    assert_eq!(note.get_text(), "old");
    assert_eq!(note.get_color(), NoteColor::LightRed);
}

#[test]
fn with_color_replaces_only_the_color() {
    let note = Note::new("shopping");
    let updated = note.with_color(NoteColor::LightGreen);
    assert_eq!(updated.get_color(), NoteColor::LightGreen);
    assert_eq!(updated.get_text(), "shopping");
    assert_eq!(note.get_color(), NoteColor::LightYellow);
}

#[test]
fn title_is_first_line_capped_to_char_budget() {
    assert_eq!(Note::new("").get_title(), EMPTY_TITLE);
    assert_eq!(Note::new("shopping\nmilk, bread").get_title(), "shopping");
    assert_eq!(
        Note::new("a very long first line indeed").get_title(),
        "a very long "
    );
}
