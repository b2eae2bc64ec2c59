// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Chain storage contract and the in-memory reference implementation.
//!
//! A chain is an ordered sequence of point identifiers. Chains are
//! immutable once committed; the only update is whole-chain replacement.
//! Stored chains are handed out as `Arc<[PointId]>` so readers never
//! copy the point list.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::error::Result;
use crate::handles::ChainHandle;
use crate::ids::{ChainId, PointId};

/// Contract for chain storage. Same synchronization and handle-validity
/// expectations as [`crate::point_store::PointStore`].
pub trait ChainStore: Send + Sync {
    /// Commits a chain under `id`, returning a handle for later reads.
    /// Committing an id again replaces the whole chain.
    fn insert(&self, id: ChainId, points: Arc<[PointId]>) -> ChainHandle;

    /// Reads a chain through its handle. Amortized O(1).
    fn get(&self, handle: ChainHandle) -> Option<Arc<[PointId]>>;

    /// Looks a chain up by identifier.
    fn at(&self, id: ChainId) -> Option<Arc<[PointId]>>;

    /// Number of chains currently stored.
    fn count(&self) -> usize;

    /// Forward-only visitation of every (id, chain) pair.
    fn for_each(&self, visit: &mut dyn FnMut(ChainId, &Arc<[PointId]>));

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
struct ChainSlab {
    slots: SlotMap<ChainHandle, (ChainId, Arc<[PointId]>)>,
    by_id: FxHashMap<ChainId, ChainHandle>,
}

/// In-memory chain store.
#[derive(Default)]
pub struct MemoryChainStore {
    slab: RwLock<ChainSlab>,
}

impl MemoryChainStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChainStore for MemoryChainStore {
    fn insert(&self, id: ChainId, points: Arc<[PointId]>) -> ChainHandle {
        let mut slab = self.slab.write();
        if let Some(&handle) = slab.by_id.get(&id) {
            slab.slots[handle] = (id, points);
            return handle;
        }
        let handle = slab.slots.insert((id, points));
        slab.by_id.insert(id, handle);
        handle
    }

    fn get(&self, handle: ChainHandle) -> Option<Arc<[PointId]>> {
        self.slab
            .read()
            .slots
            .get(handle)
            .map(|(_, points)| Arc::clone(points))
    }

    fn at(&self, id: ChainId) -> Option<Arc<[PointId]>> {
        let slab = self.slab.read();
        slab.by_id
            .get(&id)
            .and_then(|handle| slab.slots.get(*handle))
            .map(|(_, points)| Arc::clone(points))
    }

    fn count(&self) -> usize {
        self.slab.read().slots.len()
    }

    fn for_each(&self, visit: &mut dyn FnMut(ChainId, &Arc<[PointId]>)) {
        let slab = self.slab.read();
        for (_, (id, points)) in slab.slots.iter() {
            visit(*id, points);
        }
    }

    fn reopen(&self) {
        *self.slab.write() = ChainSlab::default();
    }

    fn clear(&self) {
        let mut slab = self.slab.write();
        slab.slots.clear();
        slab.by_id.clear();
    }
}

impl std::fmt::Debug for MemoryChainStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryChainStore")
            .field("chain_count", &self.count())
            .finish()
    }
}
