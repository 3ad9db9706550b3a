//! Preset score catalogue.
//!
//! The canonical single-roll values offered as quick-tap buttons. An entry
//! marked [`ScoreType::Preset`](super::ScoreType::Preset) must carry one of
//! these values.

/// A preset score with its display label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresetScore {
    pub points: u32,
    pub label: &'static str,
}

impl PresetScore {
    const fn new(points: u32, label: &'static str) -> Self {
        Self { points, label }
    }
}

/// All presets in display order.
pub const PRESET_SCORES: [PresetScore; 12] = [
    PresetScore::new(50, "One 5"),
    PresetScore::new(100, "One 1"),
    PresetScore::new(150, "1 + 5"),
    PresetScore::new(200, "Two 1s / Three 2s"),
    PresetScore::new(250, "Two 1s + 5"),
    PresetScore::new(300, "Three 1s / Three 3s"),
    PresetScore::new(400, "Four 1s / Three 4s"),
    PresetScore::new(500, "Five 1s / Three 5s"),
    PresetScore::new(600, "Six 1s / Three 6s"),
    PresetScore::new(1000, "Three 1s (first roll)"),
    PresetScore::new(1500, "Four 1s (first roll)"),
    PresetScore::new(2000, "Five 1s (first roll)"),
];

/// Look up the preset carrying `points`.
#[must_use]
pub fn preset_for(points: u32) -> Option<&'static PresetScore> {
    PRESET_SCORES.iter().find(|p| p.points == points)
}

/// Is `points` one of the preset values?
#[must_use]
pub fn is_preset_value(points: u32) -> bool {
    preset_for(points).is_some()
}
