//! Rendering slide plans into presentations.
//!
//! [`Renderer`] maps each [`SlideDescriptor`](crate::plan::SlideDescriptor)
//! onto a layout-bound slide, numbers it and attaches its speaker notes.
//! [`persist`] writes the resulting [`Document`] to disk.

mod config;
mod document;
mod persist;
mod renderer;

pub use crate::ooxml::pptx::Geometry;
pub use config::{DeckConfig, FooterStyle};
pub use document::Document;
pub use persist::persist;
pub use renderer::Renderer;
