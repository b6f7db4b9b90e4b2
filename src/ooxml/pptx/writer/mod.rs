//! Mutable presentation writer components for PPTX.

pub mod notes;
pub mod pres;
pub mod shape;
pub mod slide;
pub mod text;

// Re-export main types
pub use notes::NotesSlide;
pub use pres::MutablePresentation;
pub use shape::MutableShape;
pub use slide::MutableSlide;
pub use text::{Alignment, TextFrame, TextParagraph};
