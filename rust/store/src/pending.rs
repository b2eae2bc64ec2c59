// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batched holding area for groups whose member lists are resolved later.
//!
//! Anticipates nested groupings (a group whose members are themselves
//! groups). Populated during the main pass; consumed by batch assembly,
//! or not at all.

use parking_lot::Mutex;

use crate::ids::{ChainId, GroupId};

/// Member chain ids of one group, partitioned by ring role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMembers {
    pub outer: Vec<ChainId>,
    pub inner: Vec<ChainId>,
}

pub type PendingEntry = (GroupId, GroupMembers);

/// Lock-protected store of deferred group member lists.
#[derive(Default)]
pub struct PendingGroupStore {
    entries: Mutex<Vec<PendingEntry>>,
}

impl PendingGroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases the current backing storage and starts from a fresh
    /// allocation, returning memory immediately instead of retaining
    /// capacity the way an in-place clear would.
    pub fn reopen(&self) {
        *self.entries.lock() = Vec::new();
    }

    // TODO: rename to insert_back once script-facing callers are
    // migrated; this has always appended, and downstream consumers rely
    // on the append order.
    /// Bulk-appends entries. Despite the name, entries go at the END in
    /// the order given.
    pub fn insert_front(&self, new_entries: Vec<PendingEntry>) {
        self.entries.lock().extend(new_entries);
    }

    /// Number of pending entries.
    pub fn size(&self) -> usize {
        self.entries.lock().len()
    }

    /// Empties the store in place.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Copy of everything currently pending, in insertion order.
    pub fn snapshot(&self) -> Vec<PendingEntry> {
        self.entries.lock().clone()
    }
}

impl std::fmt::Debug for PendingGroupStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingGroupStore")
            .field("pending", &self.size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(group: GroupId, outer: &[ChainId]) -> PendingEntry {
        (
            group,
            GroupMembers {
                outer: outer.to_vec(),
                inner: Vec::new(),
            },
        )
    }

    #[test]
    fn insert_front_appends() {
        let pending = PendingGroupStore::new();
        pending.insert_front(vec![entry(1, &[10])]);
        pending.insert_front(vec![entry(2, &[20]), entry(3, &[30])]);

        let snapshot = pending.snapshot();
        let order: Vec<GroupId> = snapshot.iter().map(|(group, _)| *group).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert_eq!(pending.size(), 3);
    }

    #[test]
    fn reopen_releases_entries() {
        let pending = PendingGroupStore::new();
        pending.insert_front(vec![entry(1, &[10])]);
        pending.reopen();
        assert_eq!(pending.size(), 0);
    }

    #[test]
    fn clear_empties_in_place() {
        let pending = PendingGroupStore::new();
        pending.insert_front(vec![entry(1, &[10]), entry(2, &[20])]);
        pending.clear();
        assert_eq!(pending.size(), 0);
        assert!(pending.snapshot().is_empty());
    }
}
