//! Item paths locating an item inside a questionnaire tree

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between link ids when a path is rendered
pub const PATH_SEPARATOR: char = '/';

/// Path of an item in a questionnaire or response tree, as the sequence of
/// `linkId`s from the root item down to the item itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ItemPath {
    segments: Vec<String>,
}

impl ItemPath {
    /// The empty path (questionnaire root)
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Path consisting of a single top-level link id
    pub fn new(link_id: impl Into<String>) -> Self {
        Self {
            segments: vec![link_id.into()],
        }
    }

    /// Path of a child item
    pub fn child(&self, link_id: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(link_id.into());
        Self { segments }
    }

    /// Parent path, `None` for the root
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Link id of the addressed item
    pub fn link_id(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Nesting depth (number of segments)
    #[inline]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Check if this is the root path
    #[inline]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Check if `other` lies inside the subtree addressed by this path
    pub fn contains(&self, other: &Self) -> bool {
        other.segments.len() >= self.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl From<String> for ItemPath {
    fn from(value: String) -> Self {
        if value.is_empty() {
            return Self::root();
        }
        Self {
            segments: value.split(PATH_SEPARATOR).map(str::to_string).collect(),
        }
    }
}

impl From<&str> for ItemPath {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ItemPath> for String {
    fn from(path: ItemPath) -> Self {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_and_display() {
        let path = ItemPath::new("vitals").child("bp").child("systolic");
        assert_eq!(path.to_string(), "vitals/bp/systolic");
        assert_eq!(path.depth(), 3);
        assert_eq!(path.link_id(), Some("systolic"));
    }

    #[test]
    fn test_parent() {
        let path = ItemPath::from("a/b");
        assert_eq!(path.parent(), Some(ItemPath::new("a")));
        assert_eq!(ItemPath::new("a").parent(), Some(ItemPath::root()));
        assert_eq!(ItemPath::root().parent(), None);
    }

    #[test]
    fn test_contains() {
        let group = ItemPath::new("group");
        assert!(group.contains(&group.child("q1")));
        assert!(group.contains(&group));
        assert!(!group.contains(&ItemPath::new("other")));
        assert!(ItemPath::root().contains(&group));
    }

    #[test]
    fn test_root_round_trip_through_string() {
        assert_eq!(ItemPath::from(String::new()), ItemPath::root());
        assert_eq!(String::from(ItemPath::root()), "");
    }
}
