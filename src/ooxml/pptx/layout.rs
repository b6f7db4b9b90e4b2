//! Slide layouts and the layout catalog.
//!
//! A [`SlideLayout`] names the placeholder regions a slide bound to it
//! receives. The [`LayoutCatalog`] is what a presentation draws layouts from;
//! [`LayoutCatalog::standard`] provides the two layouts every deck needs, a
//! title slide and a title-and-content slide, positioned for any page size.

use crate::common::unit::inches_to_emu;
use smallvec::SmallVec;
use std::fmt;

/// Page size of a presentation in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    pub width: i64,
    pub height: i64,
}

impl Geometry {
    /// 16:9 widescreen, 13.33" x 7.5".
    pub const WIDESCREEN: Geometry = Geometry {
        width: 12_188_952,
        height: 6_858_000,
    };

    /// 4:3 standard, 10" x 7.5".
    pub const STANDARD_4_3: Geometry = Geometry {
        width: 9_144_000,
        height: 6_858_000,
    };

    pub const fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    /// Build a geometry from a size in inches.
    pub fn from_inches(width: f64, height: f64) -> Self {
        Self {
            width: inches_to_emu(width),
            height: inches_to_emu(height),
        }
    }

    /// Scale a rectangle given on the 10" x 7.5" reference page onto this
    /// page, returning `(x, y, cx, cy)`.
    fn scale(&self, x: i64, y: i64, cx: i64, cy: i64) -> (i64, i64, i64, i64) {
        let sx = |v: i64| v * self.width / Self::STANDARD_4_3.width;
        let sy = |v: i64| v * self.height / Self::STANDARD_4_3.height;
        (sx(x), sy(y), sx(cx), sy(cy))
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::WIDESCREEN
    }
}

/// The two layout roles a slide plan can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Headline plus an optional subtitle
    Title,
    /// Headline plus one multi-paragraph body
    Content,
}

impl LayoutKind {
    /// Value of the `type` attribute on `<p:sldLayout>`.
    pub fn layout_type(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "obj",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => f.write_str("title"),
            Self::Content => f.write_str("content"),
        }
    }
}

/// Placeholder regions a layout can define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    /// Centered headline of a title slide (`ctrTitle`)
    CenteredTitle,
    /// Headline of a content slide (`title`)
    Title,
    /// Subtitle of a title slide (`subTitle`)
    Subtitle,
    /// Body text region (`body`)
    Body,
}

impl PlaceholderKind {
    /// Value of the `type` attribute on `<p:ph>`.
    pub fn ph_type(&self) -> &'static str {
        match self {
            Self::CenteredTitle => "ctrTitle",
            Self::Title => "title",
            Self::Subtitle => "subTitle",
            Self::Body => "body",
        }
    }

    /// Value of the `idx` attribute on `<p:ph>`, if any.
    pub fn idx(&self) -> Option<u32> {
        match self {
            Self::CenteredTitle | Self::Title => None,
            Self::Subtitle | Self::Body => Some(1),
        }
    }

    #[inline]
    pub fn is_headline(&self) -> bool {
        matches!(self, Self::CenteredTitle | Self::Title)
    }
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CenteredTitle | Self::Title => f.write_str("headline"),
            Self::Subtitle => f.write_str("subtitle"),
            Self::Body => f.write_str("body"),
        }
    }
}

/// A placeholder region declared by a layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderSpec {
    pub kind: PlaceholderKind,
    /// Shape name, copied onto every slide placeholder
    pub name: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    /// Prompt text shown in an unfilled placeholder
    pub prompt: Option<String>,
}

impl PlaceholderSpec {
    pub fn new(kind: PlaceholderKind, name: &str, rect: (i64, i64, i64, i64)) -> Self {
        let (x, y, width, height) = rect;
        Self {
            kind,
            name: name.to_string(),
            x,
            y,
            width,
            height,
            prompt: None,
        }
    }

    pub fn with_prompt(mut self, prompt: &str) -> Self {
        self.prompt = Some(prompt.to_string());
        self
    }
}

/// A slide layout: a named set of placeholder regions.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideLayout {
    kind: LayoutKind,
    name: String,
    placeholders: SmallVec<[PlaceholderSpec; 3]>,
    /// Notes text a new slide on this layout starts with
    default_notes: Option<String>,
}

impl SlideLayout {
    pub fn new(kind: LayoutKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            placeholders: SmallVec::new(),
            default_notes: None,
        }
    }

    /// Add a placeholder region. A region of the same kind is replaced.
    pub fn with_placeholder(mut self, spec: PlaceholderSpec) -> Self {
        self.placeholders.retain(|p| p.kind != spec.kind);
        self.placeholders.push(spec);
        self
    }

    pub fn with_default_notes(mut self, notes: &str) -> Self {
        self.default_notes = Some(notes.to_string());
        self
    }

    #[inline]
    pub fn kind(&self) -> LayoutKind {
        self.kind
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn placeholders(&self) -> &[PlaceholderSpec] {
        &self.placeholders
    }

    pub fn placeholder(&self, kind: PlaceholderKind) -> Option<&PlaceholderSpec> {
        self.placeholders.iter().find(|p| p.kind == kind)
    }

    #[inline]
    pub fn default_notes(&self) -> Option<&str> {
        self.default_notes.as_deref()
    }
}

/// Ordered set of layouts, at most one per [`LayoutKind`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutCatalog {
    layouts: Vec<SlideLayout>,
}

impl LayoutCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The title slide and title-and-content layouts, sized for `geometry`.
    ///
    /// Placeholder rectangles follow the default PowerPoint template and are
    /// scaled from its 4:3 page.
    pub fn standard(geometry: &Geometry) -> Self {
        let title = SlideLayout::new(LayoutKind::Title, "Title Slide")
            .with_placeholder(
                PlaceholderSpec::new(
                    PlaceholderKind::CenteredTitle,
                    "Title 1",
                    geometry.scale(685_800, 2_130_425, 7_772_400, 1_470_025),
                )
                .with_prompt("Click to edit Master title style"),
            )
            .with_placeholder(
                PlaceholderSpec::new(
                    PlaceholderKind::Subtitle,
                    "Subtitle 2",
                    geometry.scale(1_371_600, 3_886_200, 6_400_800, 1_752_600),
                )
                .with_prompt("Click to edit Master subtitle style"),
            );

        let content = SlideLayout::new(LayoutKind::Content, "Title and Content")
            .with_placeholder(
                PlaceholderSpec::new(
                    PlaceholderKind::Title,
                    "Title 1",
                    geometry.scale(457_200, 274_638, 8_229_600, 1_143_000),
                )
                .with_prompt("Click to edit Master title style"),
            )
            .with_placeholder(
                PlaceholderSpec::new(
                    PlaceholderKind::Body,
                    "Content Placeholder 2",
                    geometry.scale(457_200, 1_600_200, 8_229_600, 4_525_963),
                )
                .with_prompt("Click to edit Master text styles"),
            );

        Self::new().with_layout(title).with_layout(content)
    }

    /// Add a layout, replacing any layout of the same kind in place.
    pub fn with_layout(mut self, layout: SlideLayout) -> Self {
        match self.layouts.iter().position(|l| l.kind == layout.kind) {
            Some(i) => self.layouts[i] = layout,
            None => self.layouts.push(layout),
        }
        self
    }

    /// Remove the layout of `kind`, if present.
    pub fn without(mut self, kind: LayoutKind) -> Self {
        self.layouts.retain(|l| l.kind != kind);
        self
    }

    pub fn get(&self, kind: LayoutKind) -> Option<&SlideLayout> {
        self.layouts.iter().find(|l| l.kind == kind)
    }

    /// Zero-based position of the layout of `kind`; layout parts are
    /// numbered from it.
    pub fn position(&self, kind: LayoutKind) -> Option<usize> {
        self.layouts.iter().position(|l| l.kind == kind)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &SlideLayout> {
        self.layouts.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}
