// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry construction over a populated object store.
//!
//! All operations are pure reads: the assembler holds no mutable state
//! and may be called from many threads concurrently for independent
//! groups. A malformed or partially unresolvable group yields a smaller
//! or empty result for that group only; sibling objects are unaffected.

use atlas_lite_store::{ChainId, ChainStore, ObjectStore, PointId, PointStore};

use crate::error::{Error, Result};
use crate::rings::{assemble_rings, RingAssembly};
use crate::types::{Coord, Linestring, MultiLinestring, MultiPolygon, Polygon, Ring};
use crate::winding::{ring_encloses, MIN_RING_AREA};

/// Read-only geometry assembly over an [`ObjectStore`].
pub struct GeometryAssembler<'a, P: PointStore, C: ChainStore> {
    store: &'a ObjectStore<P, C>,
}

impl<'a, P: PointStore, C: ChainStore> GeometryAssembler<'a, P, C> {
    pub fn new(store: &'a ObjectStore<P, C>) -> Self {
        Self { store }
    }

    /// Resolves point ids to coordinates under the store's integrity
    /// policy: a missing id either fails this chain or is omitted.
    fn resolve_coords(&self, point_ids: &[PointId]) -> Result<Vec<Coord>> {
        let mut coords = Vec::with_capacity(point_ids.len());
        for &id in point_ids {
            if let Some(pos) = self.store.resolve_point(id)? {
                coords.push(Coord::new(pos.x_degrees(), pos.y_degrees()));
            }
        }
        Ok(coords)
    }

    /// Builds an open linestring from a point-id sequence.
    pub fn chain_to_linestring(&self, point_ids: &[PointId]) -> Result<Linestring> {
        Ok(Linestring::new(self.resolve_coords(point_ids)?))
    }

    /// Builds a simple polygon from a point-id sequence, auto-closing and
    /// correcting to canonical winding. A sequence that cannot bound an
    /// area is an error.
    pub fn chain_to_polygon(&self, point_ids: &[PointId]) -> Result<Polygon> {
        let mut outer = Ring::new(self.resolve_coords(point_ids)?);
        outer.close();
        if outer.is_degenerate() {
            return Err(Error::DegenerateRing {
                points: outer.len(),
            });
        }
        outer.orient_outer();
        Ok(Polygon::new(outer))
    }

    /// Builds one linestring per outer member, verbatim: no ring closure
    /// is attempted. Used when a group models a route or path rather
    /// than an area.
    pub fn group_to_multi_linestring(&self, outer: &[ChainId]) -> Result<MultiLinestring> {
        let mut lines = Vec::with_capacity(outer.len());
        for points in self.member_point_lists(outer)? {
            let line = self.chain_to_linestring(&points)?;
            if !line.is_empty() {
                lines.push(line);
            }
        }
        Ok(lines)
    }

    /// Assembles a multipolygon from a group's outer and inner member
    /// chains: merge each set into closed rings, build a polygon per
    /// outer ring, then assign every inner ring to the outer polygon
    /// containing it.
    pub fn group_to_multi_polygon(
        &self,
        outer: &[ChainId],
        inner: &[ChainId],
    ) -> Result<MultiPolygon> {
        let outer_rings = self.assembled_rings(outer, "outer")?;
        let inner_rings = self.assembled_rings(inner, "inner")?;

        let mut polygons: MultiPolygon = Vec::with_capacity(outer_rings.len());
        for ring in outer_rings {
            if let Some(mut ring) = self.finish_ring(ring)? {
                ring.orient_outer();
                polygons.push(Polygon::new(ring));
            }
        }

        for ring in inner_rings {
            let Some(mut ring) = self.finish_ring(ring)? else {
                continue;
            };
            ring.orient_inner();
            let home = polygons
                .iter_mut()
                .find(|polygon| ring_encloses(&polygon.outer.coords, &ring.coords));
            match home {
                Some(polygon) => polygon.inners.push(ring),
                None => {
                    // Malformed input: a hole with no surrounding area.
                    if self.store.diagnostics().verbose {
                        tracing::warn!(points = ring.len(), "dropping uncontained inner ring");
                    }
                }
            }
        }

        Ok(polygons)
    }

    /// Runs ring assembly over one member set, resolving the member
    /// chain ids first. Leftover open segments are skipped silently
    /// (logged when verbose), never emitted.
    fn assembled_rings(&self, members: &[ChainId], role: &str) -> Result<Vec<Vec<PointId>>> {
        let RingAssembly { rings, leftovers } =
            assemble_rings(self.member_point_lists(members)?);
        if !leftovers.is_empty() && self.store.diagnostics().verbose {
            tracing::debug!(
                role,
                count = leftovers.len(),
                "skipping open chains that formed no ring"
            );
        }
        Ok(rings)
    }

    /// Resolves member chain ids to their point lists under the
    /// integrity policy; a missing chain either fails the group or is
    /// omitted.
    fn member_point_lists(&self, members: &[ChainId]) -> Result<Vec<Vec<PointId>>> {
        let mut lists = Vec::with_capacity(members.len());
        for &id in members {
            if let Some(points) = self.store.resolve_chain(id)? {
                lists.push(points.to_vec());
            }
        }
        Ok(lists)
    }

    /// Resolves an assembled ring to coordinates and validates it.
    /// Too-few-point rings are dropped; a collapsed (zero-area) ring is
    /// reported but still emitted as best-effort geometry.
    fn finish_ring(&self, point_ids: Vec<PointId>) -> Result<Option<Ring>> {
        let mut ring = Ring::new(self.resolve_coords(&point_ids)?);
        ring.close();
        if ring.is_degenerate() {
            if self.store.diagnostics().verbose {
                tracing::debug!(points = ring.len(), "dropping ring with too few points");
            }
            return Ok(None);
        }
        if ring.signed_area().abs() < MIN_RING_AREA && self.store.diagnostics().verbose {
            tracing::warn!(points = ring.len(), "emitting collapsed ring");
        }
        Ok(Some(ring))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_lite_store::{Diagnostics, MemoryChainStore, MemoryPointStore, Projected};

    fn store_with_unit_square() -> ObjectStore<MemoryPointStore, MemoryChainStore> {
        let store = ObjectStore::new(
            MemoryPointStore::new(),
            MemoryChainStore::new(),
            Diagnostics::default(),
        );
        store.points.insert(1, Projected::from_degrees(0.0, 0.0));
        store.points.insert(2, Projected::from_degrees(1.0, 0.0));
        store.points.insert(3, Projected::from_degrees(1.0, 1.0));
        store.points.insert(4, Projected::from_degrees(0.0, 1.0));
        store
    }

    #[test]
    fn chain_to_polygon_auto_closes_and_orients() {
        let store = store_with_unit_square();
        let assembler = GeometryAssembler::new(&store);

        // Clockwise and unclosed on input.
        let polygon = assembler.chain_to_polygon(&[4, 3, 2, 1]).unwrap();
        assert!(polygon.outer.is_closed());
        assert!(polygon.outer.signed_area() > 0.0);
        assert_eq!(polygon.outer.len(), 5);
    }

    #[test]
    fn chain_to_polygon_rejects_degenerate_input() {
        let store = store_with_unit_square();
        let assembler = GeometryAssembler::new(&store);
        assert!(matches!(
            assembler.chain_to_polygon(&[1, 2]),
            Err(Error::DegenerateRing { .. })
        ));
    }

    #[test]
    fn chain_to_linestring_is_verbatim() {
        let store = store_with_unit_square();
        let assembler = GeometryAssembler::new(&store);
        let line = assembler.chain_to_linestring(&[1, 2, 3]).unwrap();
        assert_eq!(line.len(), 3);
        assert_eq!(line.coords[0], Coord::new(0.0, 0.0));
    }

    #[test]
    fn multi_linestring_does_not_close_rings() {
        let store = store_with_unit_square();
        store.chains.insert(10, vec![1, 2, 3].into());
        store.chains.insert(11, vec![3, 4].into());
        let assembler = GeometryAssembler::new(&store);

        let lines = assembler.group_to_multi_linestring(&[10, 11]).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 3);
        assert_eq!(lines[1].len(), 2);
    }

    #[test]
    fn degenerate_assembled_ring_is_dropped_not_fatal() {
        let store = store_with_unit_square();
        // Closes on itself but bounds nothing.
        store.chains.insert(10, vec![1, 2, 1].into());
        let assembler = GeometryAssembler::new(&store);

        let polygons = assembler.group_to_multi_polygon(&[10], &[]).unwrap();
        assert!(polygons.is_empty());
    }
}
