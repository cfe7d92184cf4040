//! Structured paths locating leaf values inside a JSON document
//!
//! A path is an explicit sequence of segments, never a delimiter-joined
//! string: depth is the segment count, so a field name containing an exotic
//! character can never be mis-ranked.

use smallvec::SmallVec;
use std::fmt;

/// One step into a JSON document: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object field name
    Key(String),
    /// Array element index
    Index(usize),
}

impl PathSegment {
    /// Whether the string form of this segment contains `token` as a plain
    /// substring. Tokens are opaque text, not regex syntax.
    pub fn contains_token(&self, token: &str) -> bool {
        match self {
            PathSegment::Key(k) => k.contains(token),
            PathSegment::Index(i) => i.to_string().contains(token),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => write!(f, "{k}"),
            PathSegment::Index(i) => write!(f, "{i}"),
        }
    }
}

/// An ordered sequence of [`PathSegment`]s from the document root to a leaf.
///
/// Most export schemas nest shallowly; eight inline segments cover the
/// common case without heap allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPath {
    segments: SmallVec<[PathSegment; 8]>,
}

impl JsonPath {
    /// The empty path, addressing the document root itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Number of segments. A bare scalar document has depth 0.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The segments in root-to-leaf order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// The leaf-most segment, if any.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// A new path extended by an object key.
    pub fn child_key(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self { segments }
    }

    /// A new path extended by an array index.
    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Whether any segment of this path contains `token` as a substring.
    pub fn matches_token(&self, token: &str) -> bool {
        self.segments.iter().any(|s| s.contains_token(token))
    }
}

impl FromIterator<PathSegment> for JsonPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for JsonPath {
    /// Dotted rendering for diagnostics only; nothing may parse this form
    /// back into segments.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "$");
        }
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}
