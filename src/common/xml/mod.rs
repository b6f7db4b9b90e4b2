//! XML text helpers shared by the package writer and reader.

mod escape;

pub use escape::{escape_xml, push_escaped, push_escaped_text, unescape_text, unescape_xml};
