//! YAML slide plan sources.
//!
//! A plan file is a sequence of records with the optional keys `type`
//! (`title` or `content`, default `content`), `title`, `bullets` and
//! `notes`.

use super::SlidePlan;
use crate::common::error::{Error, Result};
use std::path::Path;

impl SlidePlan {
    /// Decode a plan from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml).map_err(|e| Error::Plan(e.to_string()))
    }

    /// Read and decode the plan file at `path`.
    pub fn from_yaml_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| Error::Plan(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&yaml)
    }

    /// Encode the plan as YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_saphyr::to_string(self).map_err(|e| Error::Plan(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::common::error::Error;
    use crate::plan::{SlideKind, SlidePlan};
    use std::io::Write;

    const PLAN: &str = r#"
- type: title
  notes: "Introduce the motivation.\nHero image of a tree."
- title: "Motivation: Why a new score?"
  bullets:
    - ML is powerful but structurally biased
    - "Goal: stabilize inference via regularization"
  notes: Emphasize bias is mathematical.
- title: Empty body
"#;

    #[test]
    fn test_from_yaml_str() {
        let plan = SlidePlan::from_yaml_str(PLAN).unwrap();
        assert_eq!(plan.len(), 3);

        let title = plan.get(0).unwrap();
        assert_eq!(title.kind, SlideKind::Title);
        assert_eq!(title.notes, "Introduce the motivation.\nHero image of a tree.");

        let content = plan.get(1).unwrap();
        assert_eq!(content.kind, SlideKind::Content);
        assert_eq!(content.title, "Motivation: Why a new score?");
        assert_eq!(content.bullets.len(), 2);

        let empty = plan.get(2).unwrap();
        assert!(empty.bullets.is_empty());
        assert!(empty.notes.is_empty());
    }

    #[test]
    fn test_invalid_kind() {
        let err = SlidePlan::from_yaml_str("- type: chart\n").unwrap_err();
        assert!(matches!(err, Error::Plan(_)));
    }

    #[test]
    fn test_from_yaml_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PLAN.as_bytes()).unwrap();
        let plan = SlidePlan::from_yaml_path(file.path()).unwrap();
        assert_eq!(plan.len(), 3);

        let missing = SlidePlan::from_yaml_path(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(Error::Plan(_))));
    }

    #[test]
    fn test_yaml_round_trip() {
        let plan = SlidePlan::from_yaml_str(PLAN).unwrap();
        let yaml = plan.to_yaml_string().unwrap();
        assert_eq!(SlidePlan::from_yaml_str(&yaml).unwrap(), plan);
    }
}
