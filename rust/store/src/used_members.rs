// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thread-safe tracking of chains referenced by at least one group.
//!
//! The scan pass over groups marks every member chain here, so the main
//! pass can discard chains nothing will ever ask for instead of storing
//! them all. Mutation and reads both go through the lock; an id past the
//! current end reads as unused rather than growing the bit vector.

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::ids::ChainId;

const WORD_BITS: usize = 64;

/// Slack added when an insert lands past the current end, amortizing
/// repeated growth under the write lock.
const GROW_SLACK_BITS: usize = 256;

/// Worst-case reservation when not running compact: the full chain id
/// range seen in planet-scale inputs. 2^31 bits is 256 MB of words.
const FULL_RANGE_BITS: usize = 1 << 31;

#[derive(Default)]
struct Bits {
    words: Vec<u64>,
    inited: bool,
}

/// Growable bit vector indexed by chain id, `true` iff some group
/// references the chain.
#[derive(Default)]
pub struct UsedMembers {
    bits: RwLock<Bits>,
}

impl UsedMembers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sizes the bit vector once per run, before concurrent inserts
    /// start, so the hot insert path never hits a resize storm. A second
    /// call after initialization has no effect.
    ///
    /// Under compact mode chains run at roughly one-ninth of the point
    /// count; one-eighth of `size_hint` leaves a safety margin. Otherwise
    /// the reservation covers the full id range.
    pub fn reserve(&self, compact: bool, size_hint: usize) -> Result<()> {
        let mut bits = self.bits.write();
        if bits.inited {
            return Ok(());
        }
        bits.inited = true;

        let want_bits = if compact {
            size_hint / 8
        } else {
            FULL_RANGE_BITS
        };
        let want_words = want_bits.div_ceil(WORD_BITS);
        bits.words
            .try_reserve(want_words)
            .map_err(|_| Error::CapacityExceeded {
                requested_bits: want_bits,
            })?;
        Ok(())
    }

    /// Whether `reserve` has run since construction or the last `reset`.
    pub fn is_inited(&self) -> bool {
        self.bits.read().inited
    }

    /// Marks a chain as referenced by a group.
    pub fn insert(&self, id: ChainId) {
        let mut bits = self.bits.write();
        let bit = id as usize;
        let word = bit / WORD_BITS;
        if word >= bits.words.len() {
            let grow_words = (bit + GROW_SLACK_BITS) / WORD_BITS + 1;
            bits.words.resize(grow_words, 0);
        }
        bits.words[word] |= 1u64 << (bit % WORD_BITS);
    }

    /// Whether any group references `id`. Ids beyond the current size
    /// read as unused.
    pub fn at(&self, id: ChainId) -> bool {
        let bits = self.bits.read();
        let bit = id as usize;
        let word = bit / WORD_BITS;
        match bits.words.get(word) {
            Some(w) => w & (1u64 << (bit % WORD_BITS)) != 0,
            None => false,
        }
    }

    /// Empties the bit vector. Initialization state is untouched; a run
    /// reuses the sizing decision made up front.
    pub fn clear(&self) {
        self.bits.write().words.clear();
    }

    /// Empties the bit vector and forgets the sizing decision, so the
    /// next run can `reserve` afresh.
    pub fn reset(&self) {
        *self.bits.write() = Bits::default();
    }
}

impl std::fmt::Debug for UsedMembers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bits = self.bits.read();
        f.debug_struct("UsedMembers")
            .field("words", &bits.words.len())
            .field("inited", &bits.inited)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_at() {
        let used = UsedMembers::new();
        used.insert(5);
        assert!(used.at(5));
        assert!(!used.at(4));
        assert!(!used.at(6));
    }

    #[test]
    fn at_beyond_size_is_false() {
        let used = UsedMembers::new();
        used.insert(1);
        assert!(!used.at(1_000_000));
    }

    #[test]
    fn insert_grows_with_slack() {
        let used = UsedMembers::new();
        used.insert(10_000);
        assert!(used.at(10_000));
        // Slack means a nearby follow-up insert needs no further growth.
        used.insert(10_001);
        assert!(used.at(10_001));
    }

    #[test]
    fn reserve_is_idempotent() {
        let used = UsedMembers::new();
        used.reserve(true, 8_000).unwrap();
        assert!(used.is_inited());
        // Second call with different arguments changes nothing.
        used.reserve(true, 80_000_000).unwrap();
        assert!(used.is_inited());
    }

    #[test]
    fn clear_keeps_inited() {
        let used = UsedMembers::new();
        used.reserve(true, 8_000).unwrap();
        used.insert(3);
        used.clear();
        assert!(!used.at(3));
        assert!(used.is_inited());
    }

    #[test]
    fn reset_forgets_inited() {
        let used = UsedMembers::new();
        used.reserve(true, 8_000).unwrap();
        used.reset();
        assert!(!used.is_inited());
    }
}
