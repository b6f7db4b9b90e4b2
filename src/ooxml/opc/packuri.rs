//! Part names inside an OPC package.
//!
//! A [`PackURI`] is the absolute, slash-separated name of a part, such as
//! `/ppt/slides/slide3.xml`. Relationship targets are stored relative to the
//! directory of their source part and resolved back through this type.

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackURI {
    uri: String,
}

impl PackURI {
    /// Create a new PackURI. The URI must begin with a forward slash.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self, String> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(format!("PackURI must begin with slash, got '{}'", uri));
        }
        Ok(PackURI { uri })
    }

    /// Resolve a relative reference (like `../slideLayouts/slideLayout1.xml`)
    /// against a base URI (like `/ppt/slides`).
    pub fn from_rel_ref(base_uri: &str, relative_ref: &str) -> Result<Self, String> {
        let joined = if base_uri.ends_with('/') {
            format!("{}{}", base_uri, relative_ref)
        } else {
            format!("{}/{}", base_uri, relative_ref)
        };
        Self::new(Self::normalize_path(&joined))
    }

    /// Directory portion, e.g. `/ppt/slides` for `/ppt/slides/slide1.xml`.
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// File name portion, e.g. `slide1.xml`. Empty for the package URI `/`.
    pub fn filename(&self) -> &str {
        self.uri
            .rfind('/')
            .map(|pos| &self.uri[pos + 1..])
            .unwrap_or("")
    }

    /// Extension without the leading period, e.g. `xml`.
    pub fn ext(&self) -> &str {
        let filename = self.filename();
        filename
            .rfind('.')
            .map(|pos| &filename[pos + 1..])
            .unwrap_or("")
    }

    /// Zip member name: the URI without its leading slash.
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    /// Reference to this part relative to `base_uri`, as written into a
    /// `.rels` Target attribute.
    pub fn relative_ref(&self, base_uri: &str) -> String {
        if base_uri == "/" {
            return self.membername().to_string();
        }

        let from_parts: Vec<&str> = base_uri.split('/').filter(|s| !s.is_empty()).collect();
        let to_parts: Vec<&str> = self.uri.split('/').filter(|s| !s.is_empty()).collect();

        let common = from_parts
            .iter()
            .zip(to_parts.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut result = "../".repeat(from_parts.len() - common);
        result.push_str(&to_parts[common..].join("/"));
        result
    }

    /// URI of the `.rels` part holding this part's relationships, e.g.
    /// `/ppt/slides/_rels/slide1.xml.rels`.
    pub fn rels_uri(&self) -> Result<PackURI, String> {
        let base_uri = self.base_uri();
        let rels_uri = if base_uri == "/" {
            format!("/_rels/{}.rels", self.filename())
        } else {
            format!("{}/_rels/{}.rels", base_uri, self.filename())
        };
        Self::new(rels_uri)
    }

    /// Full URI string.
    pub fn as_str(&self) -> &str {
        &self.uri
    }

    /// Resolve `.` and `..` segments.
    fn normalize_path(path: &str) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for part in path.split('/') {
            match part {
                "" | "." => {},
                ".." => {
                    parts.pop();
                },
                _ => parts.push(part),
            }
        }
        format!("/{}", parts.join("/"))
    }
}

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

/// The package pseudo-partname, representing the package itself
pub const PACKAGE_URI: &str = "/";

/// The URI for the [Content_Types].xml part
pub const CONTENT_TYPES_URI: &str = "/[Content_Types].xml";
