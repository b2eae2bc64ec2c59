// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry assembly.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during geometry assembly.
#[derive(Error, Debug)]
pub enum Error {
    /// A ring collapsed below the minimum point count.
    #[error("ring has too few points: {points}")]
    DegenerateRing { points: usize },

    /// Identifier resolution failed under the integrity policy.
    #[error("store error: {0}")]
    Store(#[from] atlas_lite_store::Error),
}
