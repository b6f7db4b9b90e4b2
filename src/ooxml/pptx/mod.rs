//! PowerPoint (.pptx) presentation support.
//!
//! This module builds PresentationML packages and reads them back:
//!
//! - [`LayoutCatalog`]: the slide layouts a presentation offers
//! - [`MutablePresentation`]: slides bound to layouts, with placeholders,
//!   text boxes and speaker notes
//! - [`Package`]: the assembled OPC package, ready to be written
//! - [`DeckSummary`]: text content of a written package
//!
//! # Example
//!
//! ```rust
//! use deckwright::ooxml::pptx::{Alignment, Geometry, LayoutKind, MutablePresentation, PlaceholderKind};
//!
//! let mut pres = MutablePresentation::new(Geometry::WIDESCREEN);
//! let slide = pres.add_slide(LayoutKind::Content)?;
//! if let Some(body) = slide.placeholder_mut(PlaceholderKind::Body) {
//!     body.clear();
//!     body.add_paragraph("First point");
//! }
//! slide
//!     .add_text_box("Footer", 10_000_000, 6_400_000, 1_188_720, 365_760)
//!     .text_frame_mut()
//!     .add_paragraph("1/1")
//!     .set_alignment(Alignment::Right);
//! slide.notes_mut().set_text("Open with the problem.");
//!
//! let bytes = pres.to_bytes()?;
//! assert!(!bytes.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod layout;
pub mod package;
pub mod reader;
pub mod template;
pub mod writer;

pub use layout::{Geometry, LayoutCatalog, LayoutKind, PlaceholderKind, PlaceholderSpec, SlideLayout};
pub use package::Package;
pub use reader::{DeckSummary, ParagraphSummary, SlideSummary, TextBoxSummary};
pub use writer::{
    Alignment, MutablePresentation, MutableShape, MutableSlide, NotesSlide, TextFrame,
    TextParagraph,
};
