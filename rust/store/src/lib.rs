// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Atlas-Lite Store
//!
//! Identifier-addressed object store for planet-scale map primitives.
//!
//! Raw primitives arrive from an external parser as points (fixed-point
//! projected coordinate pairs), chains (ordered point-id sequences) and
//! groups (tagged, unordered collections of chains split into outer and
//! inner roles). This crate keeps them addressable by stable identifier
//! while backing memory grows, and maintains the thread-safe auxiliary
//! indices two scan passes populate concurrently:
//!
//! - [`UsedMembers`] — which chains any group references, so the main
//!   pass can discard the rest
//! - [`GroupScanIndex`] — chain → owning groups, plus per-group tag
//!   snapshots for tag inheritance
//! - [`PendingGroupStore`] — deferred group member lists, resolved later
//!   by geometry assembly
//!
//! The [`ObjectStore`] facade composes these with pluggable point/chain
//! storage ([`PointStore`]/[`ChainStore`] traits; in-memory
//! implementations included) and carries the integrity policy geometry
//! assembly resolves identifiers under.

pub mod chain_store;
pub mod coords;
pub mod error;
pub mod group_scan;
pub mod handles;
pub mod ids;
pub mod object_store;
pub mod pending;
pub mod point_store;
pub mod used_members;

pub use chain_store::{ChainStore, MemoryChainStore};
pub use coords::{Projected, COORD_SCALE};
pub use error::{Error, Result};
pub use group_scan::{GroupScanIndex, TagLookup, TagMap};
pub use handles::{ChainHandle, PointHandle};
pub use ids::{ChainId, GroupId, PointId, SyntheticIds, UNASSIGNED};
pub use object_store::{Diagnostics, ObjectStore};
pub use pending::{GroupMembers, PendingEntry, PendingGroupStore};
pub use point_store::{MemoryPointStore, PointStore};
pub use used_members::UsedMembers;
