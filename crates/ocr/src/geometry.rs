use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoxParseError {
    #[error("Bounding box must have 4 fields, found {0}")]
    WrongFieldCount(usize),
    #[error("Bounding box component is not a non-negative integer: '{0}'")]
    InvalidComponent(String),
}

/// Pixel rectangle reported by the recognition service as `"x,y,width,height"`.
///
/// Only `y` takes part in line-item matching; the other components are kept so
/// the box can be written back out unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn parse(raw: &str) -> Result<Self, BoxParseError> {
        let fields: Vec<&str> = raw.split(',').collect();
        if fields.len() != 4 {
            return Err(BoxParseError::WrongFieldCount(fields.len()));
        }

        let mut parsed = [0u32; 4];
        for (slot, field) in parsed.iter_mut().zip(&fields) {
            let field = field.trim();
            *slot = field
                .parse()
                .map_err(|_| BoxParseError::InvalidComponent(field.to_string()))?;
        }

        let [x, y, width, height] = parsed;
        Ok(Self { x, y, width, height })
    }

    /// Absolute difference between two vertical coordinates.
    pub fn vertical_distance(a_y: u32, b_y: u32) -> u32 {
        a_y.abs_diff(b_y)
    }
}

impl FromStr for BoundingBox {
    type Err = BoxParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

impl Serialize for BoundingBox {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BoundingBox {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_well_formed_box() {
        let b = BoundingBox::parse("10,50,20,20").unwrap();
        assert_eq!(b, BoundingBox::new(10, 50, 20, 20));
    }

    #[test]
    fn parse_tolerates_spaces_around_fields() {
        let b = BoundingBox::parse(" 5, 52 ,200,20 ").unwrap();
        assert_eq!(b.y, 52);
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        assert_eq!(
            BoundingBox::parse("10,50,20"),
            Err(BoxParseError::WrongFieldCount(3))
        );
        assert_eq!(BoundingBox::parse(""), Err(BoxParseError::WrongFieldCount(1)));
        assert_eq!(
            BoundingBox::parse("1,2,3,4,5"),
            Err(BoxParseError::WrongFieldCount(5))
        );
    }

    #[test]
    fn parse_rejects_non_numeric_and_negative() {
        assert_eq!(
            BoundingBox::parse("10,abc,20,20"),
            Err(BoxParseError::InvalidComponent("abc".into()))
        );
        assert!(BoundingBox::parse("10,-5,20,20").is_err());
        assert!(BoundingBox::parse("10,,20,20").is_err());
    }

    #[test]
    fn vertical_distance_is_symmetric() {
        assert_eq!(BoundingBox::vertical_distance(50, 52), 2);
        assert_eq!(BoundingBox::vertical_distance(52, 50), 2);
        assert_eq!(BoundingBox::vertical_distance(0, u32::MAX), u32::MAX);
    }

    #[test]
    fn display_matches_wire_format() {
        let b = BoundingBox::new(5, 80, 200, 20);
        assert_eq!(b.to_string(), "5,80,200,20");
        assert_eq!(serde_json::to_string(&b).unwrap(), "\"5,80,200,20\"");
    }

    #[test]
    fn strict_deserialize_reports_parse_error() {
        let b: BoundingBox = serde_json::from_str("\"1,2,3,4\"").unwrap();
        assert_eq!(b, BoundingBox::new(1, 2, 3, 4));
        let err = serde_json::from_str::<BoundingBox>("\"1,2\"").unwrap_err();
        assert!(err.to_string().contains("4 fields"));
    }
}
