use serde::{Deserialize, Deserializer, Serialize};

use crate::geometry::BoundingBox;

/// Parse a `boundingBox` string once at the payload boundary. A malformed box
/// becomes `None` so one bad coordinate never rejects the whole document.
fn lenient_box<'de, D>(deserializer: D) -> Result<Option<BoundingBox>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|r| BoundingBox::parse(&r).ok()))
}

/// Leaf unit of recognition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    #[serde(default, deserialize_with = "lenient_box")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default)]
    pub text: String,
}

impl Word {
    pub fn new(text: impl Into<String>, bounding_box: Option<BoundingBox>) -> Self {
        Self { bounding_box, text: text.into() }
    }
}

/// A recognized line. Its own box is reported independently of its words'
/// boxes and may differ slightly from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    #[serde(default, deserialize_with = "lenient_box")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default)]
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    #[serde(default, deserialize_with = "lenient_box")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default)]
    pub lines: Vec<Line>,
}

/// Full payload returned by the recognition service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionResult {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub text_angle: f64,
    #[serde(default)]
    pub orientation: String,
    #[serde(default)]
    pub regions: Vec<Region>,
}

impl RecognitionResult {
    /// Lines in document order (region, then line).
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.regions.iter().flat_map(|r| r.lines.iter())
    }

    /// Words in document order (region, then line, then word).
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.lines().flat_map(|l| l.words.iter())
    }
}

/// A reconstructed bill entry, keyed by the 3-digit code that anchors it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Vertical position of the anchor word. `None` when its box was
    /// malformed; such an item never picks up any line.
    pub anchor_y: Option<u32>,
    pub code: u16,
    pub description: String,
    /// Last price-like token seen among the associated lines.
    pub price: String,
}

impl LineItem {
    pub fn new(code: u16, anchor_y: Option<u32>) -> Self {
        Self {
            anchor_y,
            code,
            description: String::new(),
            price: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_service_payload() {
        let payload = json!({
            "language": "en",
            "textAngle": -0.5,
            "orientation": "Up",
            "regions": [{
                "boundingBox": "0,0,300,200",
                "lines": [{
                    "boundingBox": "10,50,200,20",
                    "words": [
                        {"boundingBox": "10,50,20,20", "text": "101"},
                        {"boundingBox": "40,50,60,20", "text": "Widget"}
                    ]
                }]
            }]
        });

        let r: RecognitionResult = serde_json::from_value(payload).unwrap();
        assert_eq!(r.language, "en");
        assert_eq!(r.text_angle, -0.5);
        assert_eq!(r.regions.len(), 1);
        let line = &r.regions[0].lines[0];
        assert_eq!(line.bounding_box, Some(BoundingBox::new(10, 50, 200, 20)));
        assert_eq!(line.words[1].text, "Widget");
    }

    #[test]
    fn malformed_box_becomes_none() {
        let payload = json!({
            "regions": [{
                "boundingBox": "garbage",
                "lines": [{
                    "boundingBox": "1,2,3",
                    "words": [{"boundingBox": "1,x,3,4", "text": "abc"}]
                }]
            }]
        });

        let r: RecognitionResult = serde_json::from_value(payload).unwrap();
        assert_eq!(r.regions[0].bounding_box, None);
        assert_eq!(r.regions[0].lines[0].bounding_box, None);
        assert_eq!(r.regions[0].lines[0].words[0].bounding_box, None);
        assert_eq!(r.regions[0].lines[0].words[0].text, "abc");
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let r: RecognitionResult = serde_json::from_value(json!({})).unwrap();
        assert!(r.regions.is_empty());
        assert_eq!(r.orientation, "");

        let r: RecognitionResult =
            serde_json::from_value(json!({"regions": [{"lines": [{}]}]})).unwrap();
        assert!(r.regions[0].lines[0].words.is_empty());
        assert_eq!(r.regions[0].lines[0].bounding_box, None);
    }

    #[test]
    fn traversal_preserves_document_order() {
        let word = |t: &str| Word::new(t, None);
        let r = RecognitionResult {
            regions: vec![
                Region {
                    bounding_box: None,
                    lines: vec![
                        Line { bounding_box: None, words: vec![word("a"), word("b")] },
                        Line { bounding_box: None, words: vec![word("c")] },
                    ],
                },
                Region {
                    bounding_box: None,
                    lines: vec![Line { bounding_box: None, words: vec![word("d")] }],
                },
            ],
            ..Default::default()
        };

        let texts: Vec<&str> = r.words().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, ["a", "b", "c", "d"]);
        assert_eq!(r.lines().count(), 3);
    }

    #[test]
    fn line_item_serializes_camel_case() {
        let item = LineItem {
            anchor_y: Some(50),
            code: 101,
            description: "Widget".into(),
            price: "12.00".into(),
        };
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"anchorY": 50, "code": 101, "description": "Widget", "price": "12.00"})
        );
    }
}
