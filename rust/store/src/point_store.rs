// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point storage contract and the in-memory reference implementation.
//!
//! Production deployments back points with an out-of-core, sorted,
//! compressed store whose byte layout is owned by that implementation;
//! the contract here is what the facade and the assembler rely on.

use std::path::Path;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::coords::Projected;
use crate::error::Result;
use crate::handles::PointHandle;
use crate::ids::PointId;

/// Contract for point storage.
///
/// Implementations synchronize internally: handles stay valid across
/// concurrent reads from other threads. Handle validity across structural
/// growth initiated elsewhere is a precondition on the implementation,
/// not something callers can recover from.
pub trait PointStore: Send + Sync {
    /// Inserts a point under `id`, returning a handle for later reads.
    /// Inserting an id again replaces the whole stored value.
    fn insert(&self, id: PointId, pos: Projected) -> PointHandle;

    /// Reads a point through its handle. Amortized O(1).
    fn get(&self, handle: PointHandle) -> Option<Projected>;

    /// Looks a point up by identifier.
    fn at(&self, id: PointId) -> Option<Projected>;

    /// Number of points currently stored.
    fn count(&self) -> usize;

    /// Forward-only visitation of every (id, point) pair.
    fn for_each(&self, visit: &mut dyn FnMut(PointId, Projected));

    /// Attaches an out-of-core backing file. In-memory implementations
    /// accept and ignore the path.
    fn open(&self, _path: &Path) -> Result<()> {
        Ok(())
    }

    /// Releases backing storage and starts empty.
    fn reopen(&self);

    /// Empties the store in place.
    fn clear(&self);
}

#[derive(Default)]
struct PointSlab {
    slots: SlotMap<PointHandle, (PointId, Projected)>,
    by_id: FxHashMap<PointId, PointHandle>,
}

/// In-memory point store. Suitable for tests, embedding and small
/// extracts; planet-scale runs substitute an out-of-core implementation
/// behind the same trait.
#[derive(Default)]
pub struct MemoryPointStore {
    slab: RwLock<PointSlab>,
}

impl MemoryPointStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PointStore for MemoryPointStore {
    fn insert(&self, id: PointId, pos: Projected) -> PointHandle {
        let mut slab = self.slab.write();
        if let Some(&handle) = slab.by_id.get(&id) {
            slab.slots[handle] = (id, pos);
            return handle;
        }
        let handle = slab.slots.insert((id, pos));
        slab.by_id.insert(id, handle);
        handle
    }

    fn get(&self, handle: PointHandle) -> Option<Projected> {
        self.slab.read().slots.get(handle).map(|(_, pos)| *pos)
    }

    fn at(&self, id: PointId) -> Option<Projected> {
        let slab = self.slab.read();
        slab.by_id
            .get(&id)
            .and_then(|handle| slab.slots.get(*handle))
            .map(|(_, pos)| *pos)
    }

    fn count(&self) -> usize {
        self.slab.read().slots.len()
    }

    fn for_each(&self, visit: &mut dyn FnMut(PointId, Projected)) {
        let slab = self.slab.read();
        for (_, (id, pos)) in slab.slots.iter() {
            visit(*id, *pos);
        }
    }

    fn reopen(&self) {
        *self.slab.write() = PointSlab::default();
    }

    fn clear(&self) {
        let mut slab = self.slab.write();
        slab.slots.clear();
        slab.by_id.clear();
    }
}

impl std::fmt::Debug for MemoryPointStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryPointStore")
            .field("point_count", &self.count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_read_back() {
        let store = MemoryPointStore::new();
        let handle = store.insert(7, Projected::new(10, 20));

        assert_eq!(store.get(handle), Some(Projected::new(10, 20)));
        assert_eq!(store.at(7), Some(Projected::new(10, 20)));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn missing_id_is_none() {
        let store = MemoryPointStore::new();
        assert_eq!(store.at(42), None);
    }

    #[test]
    fn reinsert_replaces_whole_value() {
        let store = MemoryPointStore::new();
        let first = store.insert(7, Projected::new(1, 1));
        let second = store.insert(7, Projected::new(2, 2));

        assert_eq!(first, second);
        assert_eq!(store.at(7), Some(Projected::new(2, 2)));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn for_each_visits_all() {
        let store = MemoryPointStore::new();
        store.insert(1, Projected::new(1, 0));
        store.insert(2, Projected::new(2, 0));

        let mut seen = Vec::new();
        store.for_each(&mut |id, _| seen.push(id));
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn handle_invalid_after_reopen() {
        let store = MemoryPointStore::new();
        let handle = store.insert(1, Projected::new(1, 1));
        store.reopen();
        assert_eq!(store.get(handle), None);
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn clear_empties_in_place() {
        let store = MemoryPointStore::new();
        store.insert(1, Projected::new(1, 1));
        store.clear();
        assert_eq!(store.count(), 0);
        assert_eq!(store.at(1), None);
    }
}
