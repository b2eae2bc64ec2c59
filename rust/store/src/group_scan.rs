// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reverse index from chains to the groups that reference them, plus a
//! snapshot of each group's tags.
//!
//! Built during the scan pass so the main pass can decide, for a chain
//! with no significant tags of its own, whether to inherit tags from an
//! owning group. Entries are never removed except by `clear`.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::ids::{ChainId, GroupId};

/// Tag snapshot of a group: unique keys, insertion order irrelevant.
pub type TagMap = FxHashMap<String, String>;

/// Outcome of a tag lookup. Keeps "no such group", "no such key" and
/// "key present with an empty value" distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagLookup {
    /// No tag snapshot has been stored for the group.
    GroupUnknown,
    /// The group is known but carries no such key.
    KeyMissing,
    /// The key is present with this value (possibly empty).
    Found(String),
}

impl TagLookup {
    /// Legacy view: both kinds of absence collapse to the empty string.
    pub fn unwrap_or_empty(self) -> String {
        match self {
            TagLookup::Found(value) => value,
            TagLookup::GroupUnknown | TagLookup::KeyMissing => String::new(),
        }
    }

    /// The value, if the key was present.
    pub fn found(self) -> Option<String> {
        match self {
            TagLookup::Found(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Default)]
struct ScanInner {
    // Most chains belong to one or two groups; keep those inline.
    groups_for_chain: FxHashMap<ChainId, SmallVec<[GroupId; 4]>>,
    group_tags: FxHashMap<GroupId, TagMap>,
}

/// Thread-safe scan-pass index over group membership and tags.
#[derive(Default)]
pub struct GroupScanIndex {
    inner: RwLock<ScanInner>,
}

impl GroupScanIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `group` references `chain`. Appends in discovery
    /// order; duplicate (group, chain) pairs are kept, not deduplicated.
    pub fn record_membership(&self, group: GroupId, chain: ChainId) {
        self.inner
            .write()
            .groups_for_chain
            .entry(chain)
            .or_default()
            .push(group);
    }

    /// Stores the tag snapshot for `group`, replacing any earlier one.
    pub fn store_tags(&self, group: GroupId, tags: TagMap) {
        self.inner.write().group_tags.insert(group, tags);
    }

    /// Whether any group references `chain`.
    pub fn chain_in_any_group(&self, chain: ChainId) -> bool {
        self.inner.read().groups_for_chain.contains_key(&chain)
    }

    /// The groups referencing `chain`, in discovery order. Empty if none.
    pub fn groups_for_chain(&self, chain: ChainId) -> Vec<GroupId> {
        self.inner
            .read()
            .groups_for_chain
            .get(&chain)
            .map(|groups| groups.to_vec())
            .unwrap_or_default()
    }

    /// Looks up one tag of a group.
    pub fn tag_value(&self, group: GroupId, key: &str) -> TagLookup {
        let inner = self.inner.read();
        match inner.group_tags.get(&group) {
            None => TagLookup::GroupUnknown,
            Some(tags) => match tags.get(key) {
                None => TagLookup::KeyMissing,
                Some(value) => TagLookup::Found(value.clone()),
            },
        }
    }

    /// Number of chains known to belong to at least one group.
    pub fn tracked_chain_count(&self) -> usize {
        self.inner.read().groups_for_chain.len()
    }

    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.groups_for_chain.clear();
        inner.group_tags.clear();
    }
}

impl std::fmt::Debug for GroupScanIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("GroupScanIndex")
            .field("tracked_chains", &inner.groups_for_chain.len())
            .field("tagged_groups", &inner.group_tags.len())
            .finish()
    }
}
