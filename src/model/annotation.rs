use tracing::warn;

use crate::core::Coordinates;

use super::{Anchor, AnnotationDefinition};

/// Words per line when chart titles are wrapped.
pub const TITLE_WORDS_PER_LINE: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationModel {
    name: String,
    offset: Coordinates,
    anchor: Anchor,
}

impl AnnotationModel {
    #[must_use]
    pub fn new(definition: &AnnotationDefinition) -> Self {
        Self {
            name: definition.name.clone(),
            offset: definition.offset,
            anchor: definition.anchor.clone(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn offset(&self) -> Coordinates {
        self.offset
    }

    #[must_use]
    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    /// Data index the anchor points at for an owner holding `len` records.
    ///
    /// Unrecognized anchor strings fall back to `0`; indices past the end are
    /// clamped to the last record.
    #[must_use]
    pub fn anchor_index(&self, len: usize) -> usize {
        let last = len.saturating_sub(1);
        match &self.anchor {
            Anchor::Start => 0,
            Anchor::End => last,
            Anchor::Index(index) if *index > last => {
                warn!(
                    annotation = %self.name,
                    index,
                    len,
                    "annotation anchor past the data, clamping"
                );
                last
            }
            Anchor::Index(index) => *index,
            Anchor::Unrecognized(anchor) => {
                warn!(
                    annotation = %self.name,
                    anchor = %anchor,
                    "unrecognized annotation anchor, using index 0"
                );
                0
            }
        }
    }
}

/// Splits `label` into lines of at most `words_per_line` words.
///
/// Words inside a line are joined by two spaces.
#[must_use]
pub fn word_wrap(label: &str, words_per_line: usize) -> Vec<String> {
    let words: Vec<&str> = label.split(' ').collect();
    words
        .chunks(words_per_line.max(1))
        .map(|line| line.join("  "))
        .collect()
}
