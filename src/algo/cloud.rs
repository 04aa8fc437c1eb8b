use serde::Serialize;

use super::wordfreq::{WordCloudConfig, WordCount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One word as handed to the word-cloud renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudWord {
    pub word: String,
    pub count: usize,
    /// Frequency relative to the most frequent word, in (0, 1].
    pub weight: f64,
    pub orientation: Orientation,
    /// Index into the renderer's colour palette.
    pub color_slot: usize,
}

/// Prepare ranked frequencies for spatial layout.
///
/// Keeps the first `max_words` entries and draws orientation and colour from
/// a generator seeded with `config.seed`, so identical input always yields an
/// identical plan. Expects `frequencies` ranked by count descending.
pub fn plan(frequencies: &[WordCount], config: &WordCloudConfig) -> Vec<CloudWord> {
    let max_count = match frequencies.first() {
        Some(top) if top.count > 0 => top.count as f64,
        _ => return Vec::new(),
    };
    let mut rng = LcgRng::new(config.seed);

    frequencies
        .iter()
        .take(config.max_words)
        .map(|entry| {
            let orientation = if rng.next_f64() < config.prefer_horizontal {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let color_slot = match config.palette_size {
                0 => 0,
                size => (rng.next() % size as u64) as usize,
            };
            CloudWord {
                word: entry.word.clone(),
                count: entry.count,
                weight: entry.count as f64 / max_count,
                orientation,
                color_slot,
            }
        })
        .collect()
}

/// Simple Linear Congruential Generator for deterministic layout choices.
struct LcgRng {
    state: u64,
}

impl LcgRng {
    fn new(seed: u64) -> Self {
        Self { state: seed.wrapping_add(1) }
    }

    fn next(&mut self) -> u64 {
        // LCG constants from Numerical Recipes
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.state >> 11
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        self.next() as f64 / (1u64 << 53) as f64
    }
}
