//! Turns and the score entries accumulated within them.
//!
//! A turn holds entries in arrival order. The only supported edit is
//! dropping the most recent one.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// How a score entry was produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreType {
    /// Quick-tap value from the preset catalogue.
    #[default]
    Preset,
    /// Free-form value typed in by the player.
    Custom,
}

/// One scoring roll within a turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub id: String,
    pub points: u32,
    #[serde(rename = "type", default)]
    pub score_type: ScoreType,
    #[serde(default)]
    pub label: Option<String>,
}

impl ScoreEntry {
    /// Create an unlabelled entry.
    #[must_use]
    pub fn new(id: impl Into<String>, points: u32, score_type: ScoreType) -> Self {
        Self {
            id: id.into(),
            points,
            score_type,
            label: None,
        }
    }

    /// Attach a display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A player's turn in progress.
///
/// SmallVec keeps the common case (a handful of rolls) off the heap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub id: String,
    #[serde(default)]
    pub entries: SmallVec<[ScoreEntry; 4]>,
    #[serde(default)]
    pub is_busted: bool,
}

impl Turn {
    /// Create an empty turn.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entries: SmallVec::new(),
            is_busted: false,
        }
    }

    /// Sum of entry points, or 0 once busted. Saturates at `u32::MAX`.
    #[must_use]
    pub fn turn_total(&self) -> u32 {
        self.checked_total().unwrap_or(u32::MAX)
    }

    /// Sum of entry points, or `None` if it doesn't fit in a `u32`.
    #[must_use]
    pub fn checked_total(&self) -> Option<u32> {
        if self.is_busted {
            return Some(0);
        }
        self.entries.iter().try_fold(0u32, |total, e| total.checked_add(e.points))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn add_entry(mut self, entry: ScoreEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Drop the last entry. No-op on an empty turn.
    #[must_use]
    pub fn remove_last_entry(mut self) -> Self {
        self.entries.pop();
        self
    }

    #[must_use]
    pub fn bust(mut self) -> Self {
        self.is_busted = true;
        self
    }
}
