// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar winding and containment primitives shared by ring assembly.

use crate::types::Coord;

/// Area below which a ring is reported as collapsed.
pub const MIN_RING_AREA: f64 = 1e-12;

/// Signed area of a coordinate loop (shoelace). Positive for
/// counter-clockwise winding, negative for clockwise. A trailing closing
/// coordinate may be present or not; the wrap-around edge covers both.
pub fn signed_area(coords: &[Coord]) -> f64 {
    if coords.len() < 3 {
        return 0.0;
    }
    let n = coords.len();
    let mut doubled = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        doubled += coords[i].x * coords[j].y - coords[j].x * coords[i].y;
    }
    doubled * 0.5
}

/// Ray-cast point-in-polygon test against a single ring boundary.
/// Points on the boundary may report either way.
pub fn point_in_ring(point: &Coord, ring: &[Coord]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let n = ring.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = &ring[i];
        let pj = &ring[j];
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Whether any vertex of `candidate` lies strictly inside `ring`.
/// Assembled rings only meet at shared boundary vertices, so one interior
/// vertex decides containment.
pub fn ring_encloses(ring: &[Coord], candidate: &[Coord]) -> bool {
    candidate.iter().any(|point| point_in_ring(point, ring))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Vec<Coord> {
        vec![
            Coord::new(0.0, 0.0),
            Coord::new(1.0, 0.0),
            Coord::new(1.0, 1.0),
            Coord::new(0.0, 1.0),
        ]
    }

    #[test]
    fn area_sign_tracks_winding() {
        let ccw = unit_square();
        let cw: Vec<Coord> = ccw.iter().rev().cloned().collect();
        assert_relative_eq!(signed_area(&ccw), 1.0);
        assert_relative_eq!(signed_area(&cw), -1.0);
    }

    #[test]
    fn closing_coordinate_does_not_change_area() {
        let mut closed = unit_square();
        closed.push(closed[0]);
        assert_relative_eq!(signed_area(&closed), 1.0);
    }

    #[test]
    fn too_few_points_have_zero_area() {
        assert_eq!(signed_area(&unit_square()[..2]), 0.0);
    }

    #[test]
    fn ray_cast_containment() {
        let square = unit_square();
        assert!(point_in_ring(&Coord::new(0.5, 0.5), &square));
        assert!(!point_in_ring(&Coord::new(-0.5, 0.5), &square));
        assert!(!point_in_ring(&Coord::new(0.5, 1.5), &square));
    }

    #[test]
    fn enclosure_uses_any_interior_vertex() {
        let outer = unit_square();
        let hole = vec![
            Coord::new(0.25, 0.25),
            Coord::new(0.75, 0.25),
            Coord::new(0.75, 0.75),
            Coord::new(0.25, 0.75),
        ];
        let disjoint = vec![
            Coord::new(2.0, 2.0),
            Coord::new(3.0, 2.0),
            Coord::new(3.0, 3.0),
        ];
        assert!(ring_encloses(&outer, &hole));
        assert!(!ring_encloses(&outer, &disjoint));
    }
}
