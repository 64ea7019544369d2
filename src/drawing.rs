//! Sheep drawing data contract
//!
//! Drawings are owned by the host page (persistence, stroke capture) and
//! consumed read-only here. The JSON shape is
//! `{id, body, hindLegs, frontLegs, createdAt, removed}` with strokes
//! `{points: [{x, y}], color, size}` in the 300x240 logical canvas.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A captured pen sample in logical canvas units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// One continuous pen gesture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<Point>,
    /// CSS colour string, e.g. `#333333`
    pub color: String,
    /// Pen width in logical canvas units
    pub size: f32,
}

impl Stroke {
    pub fn new(points: Vec<Point>, color: impl Into<String>, size: f32) -> Self {
        Self {
            points,
            color: color.into(),
            size,
        }
    }

    /// Strokes with fewer than two points carry no line to draw
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }
}

/// The three stroke layers of a drawing, in paint order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    HindLegs,
    Body,
    FrontLegs,
}

impl Layer {
    /// Back-to-front order used when painting a creature
    pub const PAINT_ORDER: [Layer; 3] = [Layer::HindLegs, Layer::Body, Layer::FrontLegs];
}

/// A user drawing as stored by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawing {
    pub id: String,
    #[serde(default)]
    pub body: Vec<Stroke>,
    #[serde(default)]
    pub hind_legs: Vec<Stroke>,
    #[serde(default)]
    pub front_legs: Vec<Stroke>,
    /// Unix timestamp (ms)
    #[serde(default)]
    pub created_at: f64,
    #[serde(default)]
    pub removed: bool,
}

impl Drawing {
    pub fn new(
        id: impl Into<String>,
        body: Vec<Stroke>,
        hind_legs: Vec<Stroke>,
        front_legs: Vec<Stroke>,
    ) -> Self {
        Self {
            id: id.into(),
            body,
            hind_legs,
            front_legs,
            created_at: 0.0,
            removed: false,
        }
    }

    pub fn layer(&self, layer: Layer) -> &[Stroke] {
        match layer {
            Layer::HindLegs => &self.hind_legs,
            Layer::Body => &self.body,
            Layer::FrontLegs => &self.front_legs,
        }
    }

    /// True when all three layers are empty
    pub fn is_blank(&self) -> bool {
        self.body.is_empty() && self.hind_legs.is_empty() && self.front_legs.is_empty()
    }

    /// Decode a JSON drawing list, keeping only the active (not removed) ones
    pub fn roster_from_json(json: &str) -> Result<Vec<Drawing>> {
        let all: Vec<Drawing> = serde_json::from_str(json)?;
        Ok(all.into_iter().filter(|d| !d.removed).collect())
    }
}

/// Parse a CSS colour (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`)
/// into RGBA components in 0..1
pub fn parse_css_color(s: &str) -> Result<[f32; 4]> {
    let s = s.trim();
    let invalid = || Error::InvalidColor(s.to_string());

    if let Some(hex) = s.strip_prefix('#') {
        let digits: Vec<u8> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()
            .ok_or_else(invalid)?;
        let channels: Vec<f32> = match digits.len() {
            3 | 4 => digits.iter().map(|d| (d * 17) as f32 / 255.0).collect(),
            6 | 8 => digits
                .chunks(2)
                .map(|pair| (pair[0] * 16 + pair[1]) as f32 / 255.0)
                .collect(),
            _ => return Err(invalid()),
        };
        let alpha = channels.get(3).copied().unwrap_or(1.0);
        return Ok([channels[0], channels[1], channels[2], alpha]);
    }

    let lower = s.to_ascii_lowercase();
    let args = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(invalid)?;
    let values: Vec<f32> = args
        .split(',')
        .map(|v| v.trim().parse::<f32>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| invalid())?;
    match values.as_slice() {
        [r, g, b] => Ok([r / 255.0, g / 255.0, b / 255.0, 1.0]),
        [r, g, b, a] => Ok([r / 255.0, g / 255.0, b / 255.0, a.clamp(0.0, 1.0)]),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_needs_two_points() {
        let dot = Stroke::new(vec![Point::new(0.0, 0.0)], "#000", 3.0);
        let empty = Stroke::new(Vec::new(), "#000", 3.0);
        let line = Stroke::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)], "#000", 3.0);
        assert!(!dot.is_drawable());
        assert!(!empty.is_drawable());
        assert!(line.is_drawable());
    }

    #[test]
    fn test_blank_drawing() {
        let blank = Drawing::new("a", Vec::new(), Vec::new(), Vec::new());
        assert!(blank.is_blank());

        let legs = vec![Stroke::new(vec![Point::new(0.0, 0.0)], "#000", 3.0)];
        let drawn = Drawing::new("b", Vec::new(), legs, Vec::new());
        assert!(!drawn.is_blank());
    }

    #[test]
    fn test_roster_json_contract() {
        let json = r##"[
            {"id": "A",
             "body": [{"points": [{"x": 0, "y": 0}, {"x": 10, "y": 10}],
                       "color": "#333333", "size": 4}],
             "hindLegs": [], "frontLegs": [], "createdAt": 1700000000000, "removed": false},
            {"id": "B", "body": [], "hindLegs": [], "frontLegs": [],
             "createdAt": 1, "removed": true}
        ]"##;
        let roster = Drawing::roster_from_json(json).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id, "A");
        assert_eq!(roster[0].body[0].points[1], Point::new(10.0, 10.0));
        assert_eq!(roster[0].created_at, 1_700_000_000_000.0);
    }

    #[test]
    fn test_roster_json_rejects_garbage() {
        assert!(matches!(Drawing::roster_from_json("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(parse_css_color("#ffffff").unwrap(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(parse_css_color("#000").unwrap(), [0.0, 0.0, 0.0, 1.0]);
        let c = parse_css_color("#e74c3c").unwrap();
        assert!((c[0] - 231.0 / 255.0).abs() < 1e-6);
        assert!((c[1] - 76.0 / 255.0).abs() < 1e-6);
        let translucent = parse_css_color("#ff000080").unwrap();
        assert!((translucent[3] - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_rgb_functions() {
        assert_eq!(parse_css_color("rgb(255, 0, 0)").unwrap(), [1.0, 0.0, 0.0, 1.0]);
        let c = parse_css_color("rgba(0,0,0,0.15)").unwrap();
        assert!((c[3] - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(parse_css_color("papayawhip").is_err());
        assert!(parse_css_color("#12345").is_err());
        assert!(parse_css_color("#ggg").is_err());
        assert!(parse_css_color("rgb(1,2)").is_err());
    }
}
