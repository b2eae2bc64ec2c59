// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry value types produced by assembly.
//!
//! Canonical form: rings are closed (first coordinate repeated at the
//! end); outer rings wind counter-clockwise, inner rings clockwise.

use nalgebra::Point2;

use crate::winding::{point_in_ring, signed_area};

/// A resolved coordinate in projected space.
pub type Coord = Point2<f64>;

/// An open sequence of coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Linestring {
    pub coords: Vec<Coord>,
}

impl Linestring {
    pub fn new(coords: Vec<Coord>) -> Self {
        Self { coords }
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// A closed ring. Valid rings have at least four coordinates including
/// the closing repeat of the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ring {
    pub coords: Vec<Coord>,
}

/// Minimum coordinate count of a non-degenerate closed ring (triangle
/// plus the closing repeat).
pub const MIN_RING_COORDS: usize = 4;

impl Ring {
    pub fn new(coords: Vec<Coord>) -> Self {
        Self { coords }
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Whether the first and last coordinates coincide.
    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    /// Appends the first coordinate if the ring does not already close.
    pub fn close(&mut self) {
        if !self.coords.is_empty() && !self.is_closed() {
            self.coords.push(self.coords[0]);
        }
    }

    /// Positive for counter-clockwise winding, negative for clockwise.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.coords)
    }

    /// Reverses into counter-clockwise winding if needed.
    pub fn orient_outer(&mut self) {
        if self.signed_area() < 0.0 {
            self.coords.reverse();
        }
    }

    /// Reverses into clockwise winding if needed.
    pub fn orient_inner(&mut self) {
        if self.signed_area() > 0.0 {
            self.coords.reverse();
        }
    }

    /// Ray-cast containment test against this ring's boundary.
    pub fn contains(&self, point: &Coord) -> bool {
        point_in_ring(point, &self.coords)
    }

    /// Whether the ring carries too few coordinates to bound an area.
    pub fn is_degenerate(&self) -> bool {
        self.coords.len() < MIN_RING_COORDS
    }
}

/// An area bounded by one outer ring with zero or more holes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    pub outer: Ring,
    pub inners: Vec<Ring>,
}

impl Polygon {
    pub fn new(outer: Ring) -> Self {
        Self {
            outer,
            inners: Vec::new(),
        }
    }
}

/// Zero or more polygons assembled from one group.
pub type MultiPolygon = Vec<Polygon>;

/// Zero or more linestrings assembled from one group.
pub type MultiLinestring = Vec<Linestring>;
