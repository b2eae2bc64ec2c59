// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The object store facade.
//!
//! Composes point and chain storage with the scan-pass indices behind one
//! surface: lifecycle (`open`/`reopen`/`clear`), the configuration
//! toggles, the query operations the scripting collaborator calls per
//! object, and the point/chain resolution policy geometry assembly runs
//! on. The backing store implementations can change without touching
//! callers of this facade.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::chain_store::ChainStore;
use crate::coords::Projected;
use crate::error::{Error, Result};
use crate::group_scan::{GroupScanIndex, TagLookup, TagMap};
use crate::ids::{ChainId, GroupId, PointId, SyntheticIds};
use crate::pending::{PendingEntry, PendingGroupStore};
use crate::point_store::PointStore;
use crate::used_members::UsedMembers;

/// Diagnostics context handed to the store and assembler at construction.
/// Replaces ambient global verbosity state; when `verbose` is false the
/// chatty per-object paths stay quiet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Diagnostics {
    pub verbose: bool,
}

impl Diagnostics {
    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

/// Keeps map primitives in memory (or out of core, per the store
/// implementations) for later access during scripting and assembly.
pub struct ObjectStore<P: PointStore, C: ChainStore> {
    pub points: P,
    pub chains: C,
    used_members: UsedMembers,
    group_scan: GroupScanIndex,
    pending_groups: PendingGroupStore,
    synthetic_ids: SyntheticIds,
    compact_mode: AtomicBool,
    enforce_integrity: AtomicBool,
    diagnostics: Diagnostics,
}

impl<P: PointStore, C: ChainStore> ObjectStore<P, C> {
    pub fn new(points: P, chains: C, diagnostics: Diagnostics) -> Self {
        Self {
            points,
            chains,
            used_members: UsedMembers::new(),
            group_scan: GroupScanIndex::new(),
            pending_groups: PendingGroupStore::new(),
            synthetic_ids: SyntheticIds::new(),
            compact_mode: AtomicBool::new(false),
            enforce_integrity: AtomicBool::new(true),
            diagnostics,
        }
    }

    // --- Lifecycle ---

    /// Attaches an out-of-core backing file for point and chain data.
    /// The file format is owned by the store implementations.
    pub fn open(&self, path: &Path) -> Result<()> {
        tracing::debug!(path = %path.display(), "attaching backing file");
        self.points.open(path)?;
        self.chains.open(path)?;
        Ok(())
    }

    /// Releases and reallocates every sub-structure.
    pub fn reopen(&self) {
        self.points.reopen();
        self.chains.reopen();
        self.used_members.reset();
        self.group_scan.clear();
        self.pending_groups.reopen();
        self.synthetic_ids.reset();
    }

    /// Empties every sub-structure in place, keeping allocations for the
    /// next run.
    pub fn clear(&self) {
        self.points.clear();
        self.chains.clear();
        self.used_members.clear();
        self.group_scan.clear();
        self.pending_groups.clear();
        self.synthetic_ids.reset();
    }

    // --- Configuration toggles ---

    /// Selects the sizing heuristic used when the used-member tracker is
    /// first reserved.
    pub fn set_compact_mode(&self, compact: bool) {
        self.compact_mode.store(compact, Ordering::Relaxed);
    }

    pub fn compact_mode(&self) -> bool {
        self.compact_mode.load(Ordering::Relaxed)
    }

    /// Governs the missing-point/chain policy: `true` fails the affected
    /// chain or group, `false` tolerates the omission.
    pub fn set_enforce_integrity(&self, enforce: bool) {
        self.enforce_integrity.store(enforce, Ordering::Relaxed);
    }

    pub fn integrity_enforced(&self) -> bool {
        self.enforce_integrity.load(Ordering::Relaxed)
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    // --- Used-member tracking ---

    /// Sizes the used-member tracker from the current point count, once
    /// per run. Must complete before concurrent `mark_member_used` calls
    /// begin.
    pub fn ensure_used_members_inited(&self) -> Result<()> {
        if self.used_members.is_inited() {
            return Ok(());
        }
        self.used_members
            .reserve(self.compact_mode(), self.points.count())
    }

    pub fn mark_member_used(&self, id: ChainId) {
        self.used_members.insert(id);
    }

    pub fn is_member_used(&self, id: ChainId) -> bool {
        self.used_members.at(id)
    }

    // --- Group scan index ---

    pub fn record_group_membership(&self, group: GroupId, chain: ChainId) {
        self.group_scan.record_membership(group, chain);
    }

    pub fn store_group_tags(&self, group: GroupId, tags: TagMap) {
        self.group_scan.store_tags(group, tags);
    }

    pub fn chain_in_any_group(&self, chain: ChainId) -> bool {
        self.group_scan.chain_in_any_group(chain)
    }

    pub fn groups_for_chain(&self, chain: ChainId) -> Vec<GroupId> {
        self.group_scan.groups_for_chain(chain)
    }

    pub fn group_tag(&self, group: GroupId, key: &str) -> TagLookup {
        self.group_scan.tag_value(group, key)
    }

    // --- Pending groups ---

    /// Defers member lists for later resolution. Appends; see
    /// [`PendingGroupStore::insert_front`].
    pub fn insert_pending_groups(&self, entries: Vec<PendingEntry>) {
        self.pending_groups.insert_front(entries);
    }

    pub fn pending_group_count(&self) -> usize {
        self.pending_groups.size()
    }

    pub fn pending_group_snapshot(&self) -> Vec<PendingEntry> {
        self.pending_groups.snapshot()
    }

    // --- Identifier issuance ---

    /// Issues a synthetic group id from the decrementing sub-range at the
    /// top of the chain id space.
    pub fn next_synthetic_group_id(&self) -> GroupId {
        self.synthetic_ids.next_id()
    }

    // --- Resolution policy shared with geometry assembly ---

    /// Resolves a point id under the integrity policy: `Ok(Some)` when
    /// present, `Err` when absent and integrity is enforced, `Ok(None)`
    /// (omit and continue) otherwise.
    pub fn resolve_point(&self, id: PointId) -> Result<Option<Projected>> {
        match self.points.at(id) {
            Some(pos) => Ok(Some(pos)),
            None if self.integrity_enforced() => Err(Error::PointMissing(id)),
            None => {
                if self.diagnostics.verbose {
                    tracing::debug!(point = id, "omitting unresolvable point");
                }
                Ok(None)
            }
        }
    }

    /// Resolves a chain id under the same policy as [`Self::resolve_point`].
    pub fn resolve_chain(&self, id: ChainId) -> Result<Option<Arc<[PointId]>>> {
        match self.chains.at(id) {
            Some(points) => Ok(Some(points)),
            None if self.integrity_enforced() => Err(Error::ChainMissing(id)),
            None => {
                if self.diagnostics.verbose {
                    tracing::debug!(chain = id, "omitting unresolvable chain");
                }
                Ok(None)
            }
        }
    }

    /// Logs the size of every sub-structure.
    pub fn report_size(&self) {
        tracing::info!(
            points = self.points.count(),
            chains = self.chains.count(),
            tracked_chains = self.group_scan.tracked_chain_count(),
            pending_groups = self.pending_groups.size(),
            "store size"
        );
    }
}

impl<P: PointStore, C: ChainStore> std::fmt::Debug for ObjectStore<P, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStore")
            .field("points", &self.points.count())
            .field("chains", &self.chains.count())
            .field("pending_groups", &self.pending_groups.size())
            .field("enforce_integrity", &self.integrity_enforced())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain_store::MemoryChainStore;
    use crate::pending::GroupMembers;
    use crate::point_store::MemoryPointStore;

    fn store() -> ObjectStore<MemoryPointStore, MemoryChainStore> {
        ObjectStore::new(
            MemoryPointStore::new(),
            MemoryChainStore::new(),
            Diagnostics::default(),
        )
    }

    #[test]
    fn integrity_enforced_by_default() {
        let store = store();
        assert!(store.integrity_enforced());
        assert!(matches!(
            store.resolve_point(1),
            Err(Error::PointMissing(1))
        ));
    }

    #[test]
    fn best_effort_mode_omits_missing_points() {
        let store = store();
        store.set_enforce_integrity(false);
        assert!(matches!(store.resolve_point(1), Ok(None)));
        assert!(matches!(store.resolve_chain(1), Ok(None)));
    }

    #[test]
    fn resolve_present_point() {
        let store = store();
        store.points.insert(1, Projected::new(5, 6));
        assert_eq!(store.resolve_point(1).unwrap(), Some(Projected::new(5, 6)));
    }

    #[test]
    fn used_member_passthrough() {
        let store = store();
        store.ensure_used_members_inited().unwrap();
        store.mark_member_used(9);
        assert!(store.is_member_used(9));
        assert!(!store.is_member_used(10));
    }

    #[test]
    fn ensure_used_members_inited_is_idempotent() {
        let store = store();
        store.set_compact_mode(true);
        store.ensure_used_members_inited().unwrap();
        store.ensure_used_members_inited().unwrap();
    }

    #[test]
    fn reopen_resets_everything() {
        let store = store();
        store.points.insert(1, Projected::new(1, 1));
        store.chains.insert(2, vec![1].into());
        store.mark_member_used(2);
        store.record_group_membership(100, 2);
        store.insert_pending_groups(vec![(
            100,
            GroupMembers {
                outer: vec![2],
                inner: vec![],
            },
        )]);

        store.reopen();

        assert_eq!(store.points.count(), 0);
        assert_eq!(store.chains.count(), 0);
        assert!(!store.is_member_used(2));
        assert!(!store.chain_in_any_group(2));
        assert_eq!(store.pending_group_count(), 0);
    }

    #[test]
    fn synthetic_group_ids_descend_from_top_of_chain_space() {
        let store = store();
        let a = store.next_synthetic_group_id();
        let b = store.next_synthetic_group_id();
        assert!(a > b);
        assert_eq!(a, crate::ids::UNASSIGNED - 1);
    }

    #[test]
    fn group_tag_passthrough_keeps_legacy_sentinel() {
        let store = store();
        let mut tags = TagMap::default();
        tags.insert("kind".to_string(), "boundary".to_string());
        store.store_group_tags(100, tags);

        assert_eq!(
            store.group_tag(100, "kind"),
            TagLookup::Found("boundary".to_string())
        );
        assert_eq!(store.group_tag(100, "other").unwrap_or_empty(), "");
        assert_eq!(store.group_tag(999, "kind").unwrap_or_empty(), "");
    }
}
