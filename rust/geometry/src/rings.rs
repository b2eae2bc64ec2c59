// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ring assembly over point-id sequences.
//!
//! Group members arrive as an unordered set of open chains. Treating
//! chains as undirected edges between their endpoint identifiers, any two
//! chains sharing an endpoint merge into one longer chain (reversing
//! either side to align point order) until the chain closes on itself or
//! nothing shares an endpoint with it anymore. Every merge consumes a
//! segment, so the loop is bounded by the member count: malformed input
//! stalls into leftovers instead of hanging.

use atlas_lite_store::PointId;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Outcome of ring assembly over one member set.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RingAssembly {
    /// Closed rings: first id equals last id.
    pub rings: Vec<Vec<PointId>>,
    /// Open segments left when no further merge made progress. These are
    /// dangling or incomplete members and never become part of a ring.
    pub leftovers: Vec<Vec<PointId>>,
}

/// Merges an unordered set of chains into closed rings.
pub fn assemble_rings(members: Vec<Vec<PointId>>) -> RingAssembly {
    let mut out = RingAssembly::default();

    // Segments eligible for merging. Chains that already close on
    // themselves are rings outright; a chain without two endpoints is
    // dangling input.
    let mut pool: Vec<Option<Vec<PointId>>> = Vec::new();
    for member in members {
        match member.len() {
            0 => {}
            1 => out.leftovers.push(member),
            _ if member.first() == member.last() => out.rings.push(member),
            _ => pool.push(Some(member)),
        }
    }

    // Endpoint id → pool indices. Entries go stale as segments are
    // consumed; lookups skip them.
    let mut by_endpoint: FxHashMap<PointId, SmallVec<[usize; 4]>> = FxHashMap::default();
    for (i, slot) in pool.iter().enumerate() {
        if let Some(seg) = slot {
            by_endpoint.entry(seg[0]).or_default().push(i);
            by_endpoint.entry(seg[seg.len() - 1]).or_default().push(i);
        }
    }

    for seed in 0..pool.len() {
        let Some(mut current) = pool[seed].take() else {
            continue;
        };

        loop {
            if current.first() == current.last() {
                out.rings.push(current);
                break;
            }
            if !extend_once(&mut current, &mut pool, &by_endpoint) {
                // No unconsumed segment shares either endpoint: no
                // further progress is possible for this component.
                out.leftovers.push(current);
                break;
            }
        }
    }

    out
}

/// Attaches one unconsumed segment to either end of `current`, reversing
/// sides as needed. Returns `false` when nothing shares an endpoint.
fn extend_once(
    current: &mut Vec<PointId>,
    pool: &mut [Option<Vec<PointId>>],
    by_endpoint: &FxHashMap<PointId, SmallVec<[usize; 4]>>,
) -> bool {
    let back = current[current.len() - 1];
    if let Some(other) = take_segment_at(pool, by_endpoint, back) {
        splice_at_back(current, other, back);
        return true;
    }

    let front = current[0];
    if let Some(other) = take_segment_at(pool, by_endpoint, front) {
        current.reverse();
        splice_at_back(current, other, front);
        return true;
    }

    false
}

/// Consumes the first pool segment with `endpoint` at either end.
fn take_segment_at(
    pool: &mut [Option<Vec<PointId>>],
    by_endpoint: &FxHashMap<PointId, SmallVec<[usize; 4]>>,
    endpoint: PointId,
) -> Option<Vec<PointId>> {
    let candidates = by_endpoint.get(&endpoint)?;
    for &i in candidates {
        if pool[i].is_some() {
            return pool[i].take();
        }
    }
    None
}

/// Appends `other` so its points continue from `current`'s back, which
/// holds `shared`. The duplicated junction id is kept once.
fn splice_at_back(current: &mut Vec<PointId>, mut other: Vec<PointId>, shared: PointId) {
    if other[0] != shared {
        other.reverse();
    }
    current.extend_from_slice(&other[1..]);
}
