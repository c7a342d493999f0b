//! Processor configuration.

use crate::TagSet;

/// Behavior switches for a `Processor`.
#[derive(Debug, Clone, Default)]
pub struct ProcessorOptions {
    /// Tags used when a call does not pass its own. `None` disables
    /// filtering.
    pub tags: Option<TagSet>,
    /// Skip rules whose source value evaluates to `None`.
    pub ignore_none: bool,
    /// Skip mandatory rules with missing fields instead of failing.
    pub ignore_missing: bool,
}

impl ProcessorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(mut self, tags: impl Into<TagSet>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_ignore_none(mut self, ignore: bool) -> Self {
        self.ignore_none = ignore;
        self
    }

    pub fn with_ignore_missing(mut self, ignore: bool) -> Self {
        self.ignore_missing = ignore;
        self
    }
}
