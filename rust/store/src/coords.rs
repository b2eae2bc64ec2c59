// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed-point projected coordinates.

/// Scale factor between fixed-point storage and floating-point degrees.
pub const COORD_SCALE: f64 = 1e7;

/// A projected coordinate pair, stored fixed-point at 1e-7 resolution.
/// Immutable once written to a point store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Projected {
    pub x: i32,
    pub y: i32,
}

impl Projected {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Quantizes floating-point coordinates into fixed-point storage form.
    pub fn from_degrees(x: f64, y: f64) -> Self {
        Self {
            x: (x * COORD_SCALE).round() as i32,
            y: (y * COORD_SCALE).round() as i32,
        }
    }

    pub fn x_degrees(&self) -> f64 {
        self.x as f64 / COORD_SCALE
    }

    pub fn y_degrees(&self) -> f64 {
        self.y as f64 / COORD_SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_round_trip() {
        let p = Projected::from_degrees(13.3777041, 52.5162778);
        assert_eq!(p.x, 133_777_041);
        assert_eq!(p.y, 525_162_778);
        assert!((p.x_degrees() - 13.3777041).abs() < 1e-7);
        assert!((p.y_degrees() - 52.5162778).abs() < 1e-7);
    }

    #[test]
    fn negative_coordinates() {
        let p = Projected::from_degrees(-0.1276474, 51.5073219);
        assert_eq!(p.x, -1_276_474);
        assert!((p.x_degrees() + 0.1276474).abs() < 1e-7);
    }
}
