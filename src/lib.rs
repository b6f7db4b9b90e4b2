//! Deckwright - render slide plans into PowerPoint presentations
//!
//! This library turns an ordered list of abstract slide descriptions into a
//! `.pptx` deck. Every slide is bound to a layout, filled with its headline
//! and bullets, numbered in a bottom-right footer and given its speaker
//! notes.
//!
//! # Features
//!
//! - **Slide plans**: plain, serializable data ([`SlidePlan`]), optionally
//!   loaded from YAML (`yaml` feature, on by default)
//! - **Rendering**: layout selection, placeholder population, footers and
//!   notes ([`Renderer`])
//! - **Persistence**: complete PresentationML packages written to disk
//!   ([`persist`])
//! - **Read-back**: text content of written decks
//!   ([`ooxml::pptx::DeckSummary`])
//!
//! # Example
//!
//! ```no_run
//! use deckwright::{persist, DeckConfig, Geometry, Renderer, SlideDescriptor, SlidePlan};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let plan: SlidePlan = vec![
//!     SlideDescriptor::title_slide().with_notes("Introduce the talk."),
//!     SlideDescriptor::content("Motivation", ["A", "B"]).with_notes("n1"),
//! ]
//! .into();
//!
//! let renderer = Renderer::new(DeckConfig::new("My Talk", "Speaker • Affiliation • Date"));
//! let document = renderer.render(&plan, Geometry::WIDESCREEN)?;
//! persist(&document, "presentations/talk.pptx")?;
//! # Ok(())
//! # }
//! ```

/// Shared errors, unit conversion and XML helpers
pub mod common;

/// PresentationML package writing and reading
///
/// This module builds the OPC container and the PresentationML parts of a
/// `.pptx` file, and reads written packages back.
pub mod ooxml;

/// Slide descriptors and plans
pub mod plan;

/// Plan rendering and document persistence
pub mod render;

pub use common::error::{Error, Result};
pub use plan::{SlideDescriptor, SlideKind, SlidePlan};
pub use render::{DeckConfig, Document, FooterStyle, Geometry, Renderer, persist};
