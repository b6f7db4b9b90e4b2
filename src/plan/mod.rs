//! Slide plans.
//!
//! A [`SlidePlan`] is the ordered, immutable list of slide descriptors a
//! renderer turns into a document. Plans are plain data: build them in code,
//! or decode them from YAML with the `yaml` feature.
//!
//! ```rust
//! use deckwright::plan::{SlideDescriptor, SlidePlan};
//!
//! let plan: SlidePlan = vec![
//!     SlideDescriptor::title_slide(),
//!     SlideDescriptor::content("Motivation", ["A", "B"]).with_notes("n1"),
//! ]
//! .into();
//! assert_eq!(plan.len(), 2);
//! assert!(plan.get(0).is_some_and(|d| d.is_title()));
//! ```

mod descriptor;
#[cfg(feature = "yaml")]
mod source;

pub use descriptor::{SlideDescriptor, SlideKind};

use serde::{Deserialize, Serialize};

/// Ordered sequence of slide descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlidePlan {
    slides: Vec<SlideDescriptor>,
}

impl SlidePlan {
    pub fn new(slides: Vec<SlideDescriptor>) -> Self {
        Self { slides }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Descriptor at zero-based `index`.
    pub fn get(&self, index: usize) -> Option<&SlideDescriptor> {
        self.slides.get(index)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, SlideDescriptor> {
        self.slides.iter()
    }

    #[inline]
    pub fn descriptors(&self) -> &[SlideDescriptor] {
        &self.slides
    }
}

impl From<Vec<SlideDescriptor>> for SlidePlan {
    fn from(slides: Vec<SlideDescriptor>) -> Self {
        Self::new(slides)
    }
}

impl FromIterator<SlideDescriptor> for SlidePlan {
    fn from_iter<T: IntoIterator<Item = SlideDescriptor>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SlidePlan {
    type Item = &'a SlideDescriptor;
    type IntoIter = std::slice::Iter<'a, SlideDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_preserved() {
        let plan: SlidePlan = ["one", "two", "three"]
            .into_iter()
            .map(|t| SlideDescriptor::content(t, Vec::<String>::new()))
            .collect();
        let titles: Vec<&str> = plan.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
        assert!(plan.get(3).is_none());
    }

    #[test]
    fn test_empty_plan() {
        let plan = SlidePlan::default();
        assert!(plan.is_empty());
        assert_eq!((&plan).into_iter().count(), 0);
    }
}
