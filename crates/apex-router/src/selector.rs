// SPDX-FileCopyrightText: 2026 Apex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic backend selection.
//!
//! The same message from the same user must always land on the same backend,
//! across processes and releases. Std's `DefaultHasher` makes no such
//! guarantee, so the seed is an explicit FNV-1a 64 of the selection key.

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a 64-bit over the input bytes.
pub fn fnv1a_64(input: &str) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in input.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Stateless selector over candidate backend lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicSelector;

impl DeterministicSelector {
    /// Selection seed in `0..100`, derived from the message text and, when
    /// known, the user id. Keying the user id in front keeps one user's
    /// repeat of an identical message stable while still spreading distinct
    /// users across candidates.
    pub fn seed(message: &str, user_id: Option<&str>) -> u64 {
        let hash = match user_id {
            Some(user) => fnv1a_64(&format!("{user}:{message}")),
            None => fnv1a_64(message),
        };
        hash % 100
    }

    /// Pick a candidate by seed. `None` only when the list is empty.
    pub fn pick<'a>(candidates: &'a [String], seed: u64) -> Option<&'a str> {
        if candidates.is_empty() {
            return None;
        }
        let index = seed as usize % candidates.len();
        Some(candidates[index].as_str())
    }
}
