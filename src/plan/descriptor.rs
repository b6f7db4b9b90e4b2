//! Slide descriptors: the unit of a slide plan.
use serde::{Deserialize, Serialize};

/// Which layout role a slide plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    /// Deck title slide; shows the configured deck title and subtitle
    Title,
    /// Headline plus bullet list
    #[default]
    Content,
}

/// Abstract description of one slide.
///
/// For [`SlideKind::Title`] descriptors `title` and `bullets` are carried but
/// not rendered. `notes` applies to every kind; an empty string yields empty
/// notes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlideDescriptor {
    #[serde(rename = "type", default)]
    pub kind: SlideKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl SlideDescriptor {
    /// A title slide with no notes.
    pub fn title_slide() -> Self {
        Self {
            kind: SlideKind::Title,
            ..Default::default()
        }
    }

    /// A content slide with `title` and one bullet per item.
    pub fn content<I, S>(title: &str, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: SlideKind::Content,
            title: title.to_string(),
            bullets: bullets.into_iter().map(Into::into).collect(),
            notes: String::new(),
        }
    }

    /// Set the speaker notes.
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_string();
        self
    }

    #[inline]
    pub fn is_title(&self) -> bool {
        self.kind == SlideKind::Title
    }
}
