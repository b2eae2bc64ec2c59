// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parallel assembly of every pending group.
//!
//! The main pass defers group member lists into the store's pending
//! area; this consumes a snapshot of them and builds one multipolygon
//! per group across worker threads. Assembly is read-only, so groups are
//! fanned out with no locking. A group that fails or produces nothing is
//! skipped, never fatal to the batch.

use atlas_lite_store::{ChainStore, GroupId, ObjectStore, PointStore};
use rayon::prelude::*;

use crate::assembler::GeometryAssembler;
use crate::types::MultiPolygon;

/// Assembles multipolygons for all pending groups, in pending order.
/// Groups yielding no polygons are absent from the result.
pub fn assemble_pending<P: PointStore, C: ChainStore>(
    store: &ObjectStore<P, C>,
) -> Vec<(GroupId, MultiPolygon)> {
    let pending = store.pending_group_snapshot();

    pending
        .par_iter()
        .filter_map(|(group, members)| {
            let assembler = GeometryAssembler::new(store);
            match assembler.group_to_multi_polygon(&members.outer, &members.inner) {
                Ok(polygons) if !polygons.is_empty() => Some((*group, polygons)),
                Ok(_) => {
                    if store.diagnostics().verbose {
                        tracing::debug!(group, "pending group produced no polygons");
                    }
                    None
                }
                Err(err) => {
                    if store.diagnostics().verbose {
                        tracing::debug!(group, error = %err, "skipping unresolvable pending group");
                    }
                    None
                }
            }
        })
        .collect()
}
