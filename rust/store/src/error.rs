// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for store operations.

use crate::ids::{ChainId, PointId};

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A chain references a point id absent from the point store.
    #[error("point {0} not present in point store")]
    PointMissing(PointId),

    /// A group references a chain id absent from the chain store.
    #[error("chain {0} not present in chain store")]
    ChainMissing(ChainId),

    /// A sizing reservation could not be satisfied by the allocator.
    #[error("used-member reservation of {requested_bits} bits failed")]
    CapacityExceeded { requested_bits: usize },

    /// Attaching a backing file failed.
    #[error("failed to attach backing file: {0}")]
    Io(#[from] std::io::Error),
}
