//! Slide plan rendering.
use crate::common::error::{Error, Result};
use crate::ooxml::pptx::{
    Alignment, Geometry, LayoutCatalog, LayoutKind, MutablePresentation, MutableSlide,
    PlaceholderKind,
};
use crate::plan::{SlideDescriptor, SlideKind, SlidePlan};
use crate::render::{DeckConfig, Document};
use tracing::{debug, info, warn};

/// Name given to the footer text box of every slide.
const FOOTER_NAME: &str = "Slide Number";

/// Turns slide plans into documents.
///
/// A renderer is immutable; every call to [`render`](Self::render) builds a
/// fresh [`Document`], so one renderer can be shared between threads.
///
/// # Examples
///
/// ```rust
/// use deckwright::plan::{SlideDescriptor, SlidePlan};
/// use deckwright::render::{DeckConfig, Renderer};
/// use deckwright::ooxml::pptx::Geometry;
///
/// let plan: SlidePlan = vec![
///     SlideDescriptor::title_slide(),
///     SlideDescriptor::content("Motivation", ["A", "B"]).with_notes("n1"),
/// ]
/// .into();
///
/// let renderer = Renderer::new(DeckConfig::new("Talk", "Speaker"));
/// let doc = renderer.render(&plan, Geometry::WIDESCREEN)?;
/// assert_eq!(doc.slide_count(), 2);
/// assert_eq!(doc.slides()[1].notes().text(), "n1");
/// # Ok::<(), deckwright::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Renderer {
    config: DeckConfig,
}

impl Renderer {
    pub fn new(config: DeckConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// Render `plan` onto pages of `geometry` using the standard layouts.
    pub fn render(&self, plan: &SlidePlan, geometry: Geometry) -> Result<Document> {
        self.render_with_layouts(plan, geometry, LayoutCatalog::standard(&geometry))
    }

    /// Render `plan` drawing slide layouts from `layouts`.
    ///
    /// Slides are emitted in plan order. Each one is numbered in a
    /// bottom-right footer and carries the descriptor's notes in place of
    /// any layout default. Fails without producing a document when a
    /// required layout or placeholder is missing.
    pub fn render_with_layouts(
        &self,
        plan: &SlidePlan,
        geometry: Geometry,
        layouts: LayoutCatalog,
    ) -> Result<Document> {
        let mut pres = MutablePresentation::with_layouts(geometry, layouts);
        pres.set_title(&self.config.title);

        let total = plan.len();
        for (index, descriptor) in plan.iter().enumerate() {
            let position = index + 1;
            let kind = layout_kind(descriptor.kind);
            let slide = pres.add_slide(kind).map_err(|e| {
                warn!(position, layout = %kind, error = %e, "Cannot add slide");
                e
            })?;
            match descriptor.kind {
                SlideKind::Title => self.fill_title(slide)?,
                SlideKind::Content => fill_content(slide, descriptor)?,
            }
            self.add_footer(slide, geometry, position, total);

            let notes = slide.notes_mut();
            notes.clear();
            notes.set_text(&descriptor.notes);

            debug!(
                position,
                kind = %kind,
                bullets = descriptor.bullets.len(),
                "Rendered slide"
            );
        }

        info!(
            slides = total,
            width = geometry.width,
            height = geometry.height,
            "Rendered slide plan"
        );
        Ok(Document::new(pres))
    }

    /// Headline and subtitle of a title slide come from the deck config.
    fn fill_title(&self, slide: &mut MutableSlide) -> Result<()> {
        match slide.headline_mut() {
            Some(headline) => headline.set_text(&self.config.title),
            None => return Err(placeholder_missing(slide, PlaceholderKind::CenteredTitle)),
        }
        if let Some(subtitle) = slide.placeholder_mut(PlaceholderKind::Subtitle) {
            subtitle.set_text(&self.config.subtitle);
        }
        Ok(())
    }

    fn add_footer(&self, slide: &mut MutableSlide, geometry: Geometry, position: usize, total: usize) {
        let style = &self.config.footer;
        let (x, y) = style.origin(geometry.width, geometry.height);
        slide
            .add_text_box(FOOTER_NAME, x, y, style.width, style.height)
            .text_frame_mut()
            .add_paragraph(&format!("{}/{}", position, total))
            .set_alignment(Alignment::Right)
            .set_font_size(style.font_size_pt);
    }
}

fn layout_kind(kind: SlideKind) -> LayoutKind {
    match kind {
        SlideKind::Title => LayoutKind::Title,
        SlideKind::Content => LayoutKind::Content,
    }
}

/// Headline from the descriptor, then one level-0 body paragraph per bullet.
fn fill_content(slide: &mut MutableSlide, descriptor: &SlideDescriptor) -> Result<()> {
    match slide.headline_mut() {
        Some(headline) => headline.set_text(&descriptor.title),
        None => return Err(placeholder_missing(slide, PlaceholderKind::Title)),
    }
    match slide.placeholder_mut(PlaceholderKind::Body) {
        Some(body) => {
            body.clear();
            for bullet in &descriptor.bullets {
                body.add_paragraph(bullet).set_level(0);
            }
        },
        None => return Err(placeholder_missing(slide, PlaceholderKind::Body)),
    }
    Ok(())
}

fn placeholder_missing(slide: &MutableSlide, placeholder: PlaceholderKind) -> Error {
    warn!(layout = slide.layout_name(), %placeholder, "Placeholder missing");
    Error::PlaceholderMissing {
        layout: slide.layout_name().to_string(),
        placeholder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::{DeckSummary, PlaceholderSpec, SlideLayout};

    fn renderer() -> Renderer {
        Renderer::new(DeckConfig::new(
            "REGMLAME: Regularized Maximum Likelihood and Minimum Evolution",
            "Speaker: <Your Name>  •  Affiliation  •  Date",
        ))
    }

    fn footer_text(slide: &MutableSlide) -> String {
        slide
            .text_boxes()
            .next()
            .map(|shape| shape.text_frame().text())
            .unwrap_or_default()
    }

    #[test]
    fn test_two_slide_example() {
        let plan: SlidePlan = vec![
            SlideDescriptor::title_slide(),
            SlideDescriptor::content("Motivation", ["A", "B"]).with_notes("n1"),
        ]
        .into();
        let doc = renderer().render(&plan, Geometry::WIDESCREEN).unwrap();

        assert_eq!(doc.slide_count(), 2);
        assert_eq!(footer_text(&doc.slides()[0]), "1/2");
        assert_eq!(footer_text(&doc.slides()[1]), "2/2");

        let content = &doc.slides()[1];
        assert_eq!(content.title().as_deref(), Some("Motivation"));
        let body: Vec<&str> = content
            .placeholder(PlaceholderKind::Body)
            .unwrap()
            .paragraphs()
            .iter()
            .map(|p| p.text())
            .collect();
        assert_eq!(body, vec!["A", "B"]);
        assert_eq!(content.notes().text(), "n1");
        assert!(doc.slides()[0].notes().is_empty());
    }

    #[test]
    fn test_title_slide_uses_deck_config() {
        let mut descriptor = SlideDescriptor::content("Ignored", ["ignored"]);
        descriptor.kind = SlideKind::Title;
        let plan: SlidePlan = vec![descriptor].into();

        let doc = renderer().render(&plan, Geometry::WIDESCREEN).unwrap();
        let slide = &doc.slides()[0];
        assert_eq!(slide.layout_kind(), LayoutKind::Title);
        assert_eq!(slide.title().as_deref(), Some(renderer().config().title.as_str()));
        assert_eq!(
            slide.placeholder(PlaceholderKind::Subtitle).unwrap().text(),
            "Speaker: <Your Name>  •  Affiliation  •  Date"
        );
        assert_eq!(doc.title(), Some(renderer().config().title.as_str()));
    }

    #[test]
    fn test_zero_bullets_clears_prompt() {
        let plan: SlidePlan = vec![SlideDescriptor::content("Empty", Vec::<String>::new())].into();
        let doc = renderer().render(&plan, Geometry::WIDESCREEN).unwrap();
        let body = doc.slides()[0].placeholder(PlaceholderKind::Body).unwrap();
        assert_eq!(body.paragraph_count(), 0);
    }

    #[test]
    fn test_footer_geometry() {
        let plan: SlidePlan = vec![SlideDescriptor::content("One", ["x"])].into();
        let doc = renderer().render(&plan, Geometry::WIDESCREEN).unwrap();

        let footer = doc.slides()[0].text_boxes().next().unwrap();
        assert_eq!(footer.name(), FOOTER_NAME);
        assert_eq!(
            footer.bounds(),
            Some((12_188_952 - 1_280_160, 6_858_000 - 457_200, 1_188_720, 365_760))
        );
        let para = &footer.text_frame().paragraphs()[0];
        assert_eq!(para.alignment(), Some(Alignment::Right));
        assert_eq!(para.font_size(), Some(10.0));
    }

    #[test]
    fn test_default_notes_replaced() {
        let geometry = Geometry::WIDESCREEN;
        let standard = LayoutCatalog::standard(&geometry);
        let catalog = standard
            .iter()
            .map(|layout| layout.clone().with_default_notes("Layout notes"))
            .fold(LayoutCatalog::new(), LayoutCatalog::with_layout);

        let plan: SlidePlan = vec![
            SlideDescriptor::title_slide(),
            SlideDescriptor::content("Notes", ["x"]).with_notes("Mine"),
        ]
        .into();
        let doc = renderer().render_with_layouts(&plan, geometry, catalog).unwrap();
        assert!(doc.slides()[0].notes().is_empty());
        assert_eq!(doc.slides()[1].notes().text(), "Mine");
    }

    #[test]
    fn test_missing_content_layout() {
        let geometry = Geometry::WIDESCREEN;
        let catalog = LayoutCatalog::standard(&geometry).without(LayoutKind::Content);
        let plan: SlidePlan = vec![
            SlideDescriptor::title_slide(),
            SlideDescriptor::content("Motivation", ["A"]),
        ]
        .into();

        let err = renderer().render_with_layouts(&plan, geometry, catalog).unwrap_err();
        assert!(matches!(err, Error::LayoutUnavailable(LayoutKind::Content)));
    }

    #[test]
    fn test_missing_body_placeholder() {
        let geometry = Geometry::WIDESCREEN;
        let title_only = SlideLayout::new(LayoutKind::Content, "Title Only").with_placeholder(
            PlaceholderSpec::new(PlaceholderKind::Title, "Title 1", (0, 0, 1_000, 1_000)),
        );
        let catalog = LayoutCatalog::standard(&geometry).with_layout(title_only);
        let plan: SlidePlan = vec![SlideDescriptor::content("Motivation", ["A"])].into();

        match renderer().render_with_layouts(&plan, geometry, catalog).unwrap_err() {
            Error::PlaceholderMissing {
                layout,
                placeholder,
            } => {
                assert_eq!(layout, "Title Only");
                assert_eq!(placeholder, PlaceholderKind::Body);
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_title_slide_without_subtitle() {
        let geometry = Geometry::STANDARD_4_3;
        let title_only = SlideLayout::new(LayoutKind::Title, "Title Only").with_placeholder(
            PlaceholderSpec::new(PlaceholderKind::CenteredTitle, "Title 1", (0, 0, 1_000, 1_000)),
        );
        let catalog = LayoutCatalog::standard(&geometry).with_layout(title_only);
        let plan: SlidePlan = vec![SlideDescriptor::title_slide()].into();

        let doc = renderer().render_with_layouts(&plan, geometry, catalog).unwrap();
        assert!(doc.slides()[0].placeholder(PlaceholderKind::Subtitle).is_none());
        assert_eq!(footer_text(&doc.slides()[0]), "1/1");
    }

    #[test]
    fn test_empty_plan() {
        let doc = renderer().render(&SlidePlan::default(), Geometry::WIDESCREEN).unwrap();
        assert_eq!(doc.slide_count(), 0);
        assert!(!doc.to_bytes().unwrap().is_empty());
    }

    #[test]
    fn test_blank_and_padded_text_kept() {
        let plan: SlidePlan = vec![
            SlideDescriptor::content("", [" x ", "", "  "]),
            SlideDescriptor::content("  Mot  ", Vec::<String>::new()).with_notes(" n \n"),
        ]
        .into();
        let doc = renderer().render(&plan, Geometry::WIDESCREEN).unwrap();

        let first = &doc.slides()[0];
        assert_eq!(first.title().as_deref(), Some(""));
        let body: Vec<&str> = first
            .placeholder(PlaceholderKind::Body)
            .unwrap()
            .paragraphs()
            .iter()
            .map(|p| p.text())
            .collect();
        assert_eq!(body, vec![" x ", "", "  "]);
        assert_eq!(doc.slides()[1].title().as_deref(), Some("  Mot  "));
        assert_eq!(doc.slides()[1].notes().text(), " n \n");

        let summary = DeckSummary::from_bytes(&doc.to_bytes().unwrap()).unwrap();
        assert_eq!(summary.slides[0].headline.as_deref(), Some(""));
        assert_eq!(summary.slides[0].body_texts(), vec![" x ", "", "  "]);
        assert_eq!(summary.slides[1].headline.as_deref(), Some("  Mot  "));
        assert!(summary.slides[1].body.is_empty());
        assert_eq!(summary.slides[1].notes, " n \n");
    }

    #[test]
    fn test_control_characters_read_back() {
        let plan: SlidePlan = vec![
            SlideDescriptor::content("T\u{B}x", ["a\u{B}b", "line1\nline2", "x\u{1}_x0041_"])
                .with_notes("n\u{1}"),
        ]
        .into();
        let doc = renderer().render(&plan, Geometry::WIDESCREEN).unwrap();
        let summary = DeckSummary::from_bytes(&doc.to_bytes().unwrap()).unwrap();

        let slide = &summary.slides[0];
        assert_eq!(slide.headline.as_deref(), Some("T\nx"));
        assert_eq!(slide.body_texts(), vec!["a\nb", "line1\nline2", "x\u{1}_x0041_"]);
        assert_eq!(slide.notes, "n\u{1}");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn text_strategy() -> impl Strategy<Value = String> {
            r"[ a-zA-Z0-9&<>_λΣé]{0,16}"
        }

        fn notes_strategy() -> impl Strategy<Value = String> {
            r"[ a-zA-Z0-9&<_λé\n]{0,20}"
        }

        fn descriptor_strategy() -> impl Strategy<Value = SlideDescriptor> {
            (
                prop::bool::weighted(0.2),
                text_strategy(),
                prop::collection::vec(text_strategy(), 0..6),
                prop::option::of(notes_strategy()),
            )
                .prop_map(|(is_title, title, bullets, notes)| {
                    let mut descriptor = SlideDescriptor::content(&title, bullets);
                    if is_title {
                        descriptor.kind = SlideKind::Title;
                    }
                    descriptor.notes = notes.unwrap_or_default();
                    descriptor
                })
        }

        fn plan_strategy() -> impl Strategy<Value = SlidePlan> {
            prop::collection::vec(descriptor_strategy(), 0..12).prop_map(SlidePlan::from)
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn prop_slides_follow_plan(plan in plan_strategy()) {
                let doc = renderer().render(&plan, Geometry::WIDESCREEN).unwrap();
                prop_assert_eq!(doc.slide_count(), plan.len());

                let total = plan.len();
                for (index, (slide, descriptor)) in doc.slides().iter().zip(plan.iter()).enumerate() {
                    prop_assert_eq!(footer_text(slide), format!("{}/{}", index + 1, total));
                    prop_assert_eq!(slide.notes().text(), descriptor.notes.clone());

                    if descriptor.is_title() {
                        prop_assert_eq!(slide.layout_kind(), LayoutKind::Title);
                        continue;
                    }
                    prop_assert_eq!(slide.title(), Some(descriptor.title.clone()));
                    let body = slide.placeholder(PlaceholderKind::Body).unwrap();
                    prop_assert_eq!(body.paragraph_count(), descriptor.bullets.len());
                    for (para, bullet) in body.paragraphs().iter().zip(&descriptor.bullets) {
                        prop_assert_eq!(para.text(), bullet.as_str());
                        prop_assert_eq!(para.level(), 0);
                    }
                }
            }

            #[test]
            fn prop_written_package_reads_back(plan in plan_strategy()) {
                let doc = renderer().render(&plan, Geometry::WIDESCREEN).unwrap();
                let summary = DeckSummary::from_bytes(&doc.to_bytes().unwrap()).unwrap();
                prop_assert_eq!(summary.slide_count(), plan.len());

                for (slide, descriptor) in summary.slides.iter().zip(plan.iter()) {
                    prop_assert_eq!(&slide.notes, &descriptor.notes);
                    if !descriptor.is_title() {
                        prop_assert_eq!(slide.headline.as_deref(), Some(descriptor.title.as_str()));
                        prop_assert_eq!(slide.body_texts(), descriptor.bullets.iter().map(String::as_str).collect::<Vec<_>>());
                    }
                }
            }
        }
    }
}
