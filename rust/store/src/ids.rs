// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identifier types shared across the store.
//!
//! Points, chains and groups draw from disjoint, monotonically issued
//! unsigned ranges. Groups do not get a namespace of their own: synthetic
//! group identifiers are issued downward from the top of the chain id
//! space, leaving the parser-issued (ascending) range untouched.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a projected point.
pub type PointId = u64;

/// Identifier of an ordered point sequence.
pub type ChainId = u64;

/// Identifier of a named grouping of chains. Shares the chain id space.
pub type GroupId = u64;

/// Sentinel marking an identifier that has not been assigned.
pub const UNASSIGNED: u64 = u64::MAX;

/// Issues synthetic group identifiers, decrementing from just below the
/// [`UNASSIGNED`] sentinel so they never collide with chain ids coming
/// from the parser.
#[derive(Debug)]
pub struct SyntheticIds {
    next: AtomicU64,
}

impl SyntheticIds {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(UNASSIGNED - 1),
        }
    }

    /// Claims the next synthetic id.
    pub fn next_id(&self) -> GroupId {
        self.next.fetch_sub(1, Ordering::Relaxed)
    }

    /// Restarts issuance from the top of the range.
    pub fn reset(&self) {
        self.next.store(UNASSIGNED - 1, Ordering::Relaxed);
    }
}

impl Default for SyntheticIds {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_ids_decrement() {
        let ids = SyntheticIds::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_eq!(a, UNASSIGNED - 1);
        assert_eq!(b, a - 1);
    }

    #[test]
    fn synthetic_ids_never_hit_sentinel() {
        let ids = SyntheticIds::new();
        assert_ne!(ids.next_id(), UNASSIGNED);
    }

    #[test]
    fn reset_restarts_range() {
        let ids = SyntheticIds::new();
        ids.next_id();
        ids.next_id();
        ids.reset();
        assert_eq!(ids.next_id(), UNASSIGNED - 1);
    }
}
