//! Deck-level rendering configuration.
use crate::common::unit::inches_to_emu;
use serde::{Deserialize, Serialize};

/// Size, placement and font of the per-slide footer.
///
/// The box is anchored from the bottom-right corner of the page: its
/// top-left corner sits at `(width - right_inset, height - bottom_inset)`.
/// Lengths are in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterStyle {
    pub width: i64,
    pub height: i64,
    pub right_inset: i64,
    pub bottom_inset: i64,
    pub font_size_pt: f64,
}

impl FooterStyle {
    /// Top-left corner of the footer box on a page of `width` × `height`.
    pub fn origin(&self, width: i64, height: i64) -> (i64, i64) {
        (width - self.right_inset, height - self.bottom_inset)
    }
}

impl Default for FooterStyle {
    fn default() -> Self {
        Self {
            width: inches_to_emu(1.3),
            height: inches_to_emu(0.4),
            right_inset: inches_to_emu(1.4),
            bottom_inset: inches_to_emu(0.5),
            font_size_pt: 10.0,
        }
    }
}

/// Deck title, subtitle and footer style used by a [`Renderer`].
///
/// [`Renderer`]: crate::render::Renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub footer: FooterStyle,
}

impl DeckConfig {
    pub fn new(title: &str, subtitle: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            footer: FooterStyle::default(),
        }
    }

    pub fn with_footer(mut self, footer: FooterStyle) -> Self {
        self.footer = footer;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::Geometry;

    #[test]
    fn test_default_footer() {
        let footer = FooterStyle::default();
        assert_eq!(footer.width, 1_188_720);
        assert_eq!(footer.height, 365_760);
        assert_eq!(footer.font_size_pt, 10.0);

        let Geometry { width, height } = Geometry::WIDESCREEN;
        assert_eq!(footer.origin(width, height), (12_188_952 - 1_280_160, 6_858_000 - 457_200));
    }

    #[test]
    fn test_with_footer() {
        let footer = FooterStyle {
            font_size_pt: 12.0,
            ..Default::default()
        };
        let config = DeckConfig::new("Deck", "Sub").with_footer(footer);
        assert_eq!(config.title, "Deck");
        assert_eq!(config.subtitle, "Sub");
        assert_eq!(config.footer.font_size_pt, 12.0);
    }
}
