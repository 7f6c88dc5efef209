use std::sync::OnceLock;

use regex::Regex;

use crate::geometry::BoundingBox;
use crate::types::{LineItem, RecognitionResult};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// ASCII digits only: `\d` would also accept other Unicode digit scripts.
re!(re_code, r"^[0-9]{3}$");
re!(re_price, r"[0-9]+(?:,[0-9]+)?\.[0-9]{2}$");

/// Maximum vertical distance (exclusive, in pixels) between an anchor and a
/// line for the line to belong to that anchor's item.
pub const DEFAULT_THRESHOLD: u32 = 10;

pub(crate) fn is_code(text: &str) -> bool {
    re_code().is_match(text)
}

pub(crate) fn is_price(text: &str) -> bool {
    re_price().is_match(text)
}

// ── Reconstruction ───────────────────────────────────────────────────────────

/// Rebuilds bill line items from recognized words using vertical proximity.
#[derive(Debug, Clone, Copy)]
pub struct LineItemReconstructor {
    pub threshold: u32,
}

impl Default for LineItemReconstructor {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD }
    }
}

impl LineItemReconstructor {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    /// Two passes over the document: collect every 3-digit anchor word, then
    /// attach each line's words to every anchor lying within the threshold.
    pub fn reconstruct(&self, result: &RecognitionResult) -> Vec<LineItem> {
        let mut items = Self::discover_anchors(result);
        self.associate(result, &mut items);
        items
    }

    fn discover_anchors(result: &RecognitionResult) -> Vec<LineItem> {
        result
            .words()
            .filter(|w| is_code(&w.text))
            .filter_map(|w| match w.text.parse::<u16>() {
                Ok(code) => Some(LineItem::new(code, w.bounding_box.map(|b| b.y))),
                Err(e) => {
                    tracing::debug!("Skipping unparsable anchor '{}': {e}", w.text);
                    None
                }
            })
            .collect()
    }

    fn associate(&self, result: &RecognitionResult, items: &mut [LineItem]) {
        for line in result.lines() {
            // The line's own box decides proximity, not its words' boxes.
            let Some(line_y) = line.bounding_box.map(|b| b.y) else {
                continue;
            };

            // Every item within range takes the line, not just the nearest one.
            // Two anchors closer than the threshold therefore share a line's
            // words; this is kept as-is and left for callers to disambiguate.
            for item in items.iter_mut() {
                let Some(anchor_y) = item.anchor_y else {
                    continue;
                };
                if BoundingBox::vertical_distance(anchor_y, line_y) >= self.threshold {
                    continue;
                }

                for word in &line.words {
                    if is_price(&word.text) {
                        item.price.clone_from(&word.text);
                    } else if !is_code(&word.text) {
                        item.description.push_str(&word.text);
                    }
                }
            }
        }
    }
}

/// Reconstruct line items with the default proximity threshold.
pub fn reconstruct(result: &RecognitionResult) -> Vec<LineItem> {
    LineItemReconstructor::default().reconstruct(result)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
