//! Built-in sample sheep
//!
//! Used to populate an empty planet and by the native runner.

use std::f32::consts::TAU;

use crate::drawing::{Drawing, Point, Stroke};

const INK: &str = "#333333";
const HIND_INK: &str = "#e74c3c";
const FRONT_INK: &str = "#3498db";

/// Closed oval path sampled at `steps + 1` points
fn oval(cx: f32, cy: f32, rx: f32, ry: f32) -> Vec<Point> {
    let steps = 20;
    (0..=steps)
        .map(|i| {
            let a = i as f32 / steps as f32 * TAU;
            Point::new(cx + a.cos() * rx, cy + a.sin() * ry)
        })
        .collect()
}

fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Vec<Point> {
    vec![Point::new(x1, y1), Point::new(x2, y2)]
}

fn path(points: &[(f32, f32)]) -> Vec<Point> {
    points.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

/// Round body with wool bumps
pub fn fluffy() -> Drawing {
    let body = vec![
        Stroke::new(oval(150.0, 120.0, 65.0, 45.0), INK, 4.0),
        Stroke::new(oval(210.0, 95.0, 22.0, 20.0), INK, 3.0),
        Stroke::new(path(&[(218.0, 90.0), (219.0, 90.0)]), INK, 4.0),
        Stroke::new(path(&[(200.0, 78.0), (195.0, 68.0), (205.0, 72.0)]), INK, 2.0),
        Stroke::new(oval(120.0, 85.0, 15.0, 12.0), INK, 2.0),
        Stroke::new(oval(145.0, 80.0, 15.0, 12.0), INK, 2.0),
        Stroke::new(oval(170.0, 82.0, 15.0, 12.0), INK, 2.0),
    ];
    let hind_legs = vec![
        Stroke::new(line(105.0, 155.0, 100.0, 200.0), HIND_INK, 3.0),
        Stroke::new(line(125.0, 155.0, 120.0, 200.0), HIND_INK, 3.0),
    ];
    let front_legs = vec![
        Stroke::new(line(175.0, 155.0, 180.0, 200.0), FRONT_INK, 3.0),
        Stroke::new(line(195.0, 155.0, 200.0, 200.0), FRONT_INK, 3.0),
    ];
    Drawing::new("sample-fluffy", body, hind_legs, front_legs)
}

/// Tall and slender, with a tail
pub fn skinny() -> Drawing {
    let body = vec![
        Stroke::new(oval(150.0, 115.0, 50.0, 35.0), INK, 3.0),
        Stroke::new(oval(205.0, 95.0, 18.0, 22.0), INK, 3.0),
        Stroke::new(path(&[(212.0, 90.0), (213.0, 90.0)]), INK, 3.0),
        Stroke::new(path(&[(100.0, 105.0), (85.0, 95.0), (90.0, 100.0)]), INK, 2.0),
    ];
    let hind_legs = vec![
        Stroke::new(line(115.0, 145.0, 112.0, 205.0), HIND_INK, 2.0),
        Stroke::new(line(130.0, 145.0, 127.0, 205.0), HIND_INK, 2.0),
    ];
    let front_legs = vec![
        Stroke::new(line(175.0, 145.0, 178.0, 205.0), FRONT_INK, 2.0),
        Stroke::new(line(188.0, 145.0, 191.0, 205.0), FRONT_INK, 2.0),
    ];
    Drawing::new("sample-skinny", body, hind_legs, front_legs)
}

/// Small and round
pub fn baby() -> Drawing {
    let body = vec![
        Stroke::new(oval(150.0, 135.0, 40.0, 32.0), INK, 4.0),
        Stroke::new(oval(190.0, 118.0, 18.0, 17.0), INK, 3.0),
        Stroke::new(path(&[(196.0, 114.0), (197.0, 114.0)]), INK, 5.0),
        Stroke::new(path(&[(183.0, 104.0), (178.0, 95.0), (188.0, 100.0)]), INK, 2.0),
    ];
    let hind_legs = vec![
        Stroke::new(line(122.0, 162.0, 120.0, 200.0), HIND_INK, 3.0),
        Stroke::new(line(138.0, 162.0, 136.0, 200.0), HIND_INK, 3.0),
    ];
    let front_legs = vec![
        Stroke::new(line(162.0, 162.0, 165.0, 200.0), FRONT_INK, 3.0),
        Stroke::new(line(178.0, 162.0, 181.0, 200.0), FRONT_INK, 3.0),
    ];
    Drawing::new("sample-baby", body, hind_legs, front_legs)
}

/// All built-in sheep
pub fn sample_drawings() -> Vec<Drawing> {
    vec![fluffy(), skinny(), baby()]
}
