// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Atlas-Lite Geometry
//!
//! Ring assembly and geometry construction over the atlas-lite object
//! store. Turns group member lists — unordered open chains that may need
//! reversing, concatenating and nesting — into polygons with holes,
//! multipolygons and linestrings, tolerating malformed or incomplete
//! input without failing the surrounding run.

pub mod assembler;
pub mod batch;
pub mod error;
pub mod rings;
pub mod types;
pub mod winding;

// Re-export nalgebra's point type used for coordinates
pub use nalgebra::Point2;

pub use assembler::GeometryAssembler;
pub use batch::assemble_pending;
pub use error::{Error, Result};
pub use rings::{assemble_rings, RingAssembly};
pub use types::{Coord, Linestring, MultiLinestring, MultiPolygon, Polygon, Ring};
pub use winding::{point_in_ring, ring_encloses, signed_area};
