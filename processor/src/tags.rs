//! Tag sets and rule tag matching.

use std::collections::BTreeSet;

use fieldmap_parser::Tag;

/// The tags active for a transformation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    names: BTreeSet<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for TagSet {
    fn from(names: [S; N]) -> Self {
        names.into_iter().collect()
    }
}

/// Decide whether a rule with `tags` takes part in a call.
///
/// Untagged rules and calls without an active set always match. Otherwise
/// one satisfied tag is enough: `name` when it is active, `!name` when it
/// is not.
pub fn tags_match(tags: &[Tag], active: Option<&TagSet>) -> bool {
    let Some(active) = active else {
        return true;
    };
    if tags.is_empty() {
        return true;
    }
    tags.iter()
        .any(|tag| active.contains(&tag.name) != tag.negated)
}
