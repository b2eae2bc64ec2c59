// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opaque handle types for arena-based primitive storage.
//!
//! Handles are generational `slotmap` keys, never raw addresses: a handle
//! is dereferenced only through the store that issued it and stays valid
//! while that store's backing memory grows. A handle must not be retained
//! across `reopen`/`clear`.

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a stored point.
    pub struct PointHandle;

    /// Handle to a stored chain.
    pub struct ChainHandle;
}
