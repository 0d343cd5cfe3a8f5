//! Copyright © 2025-2026 Dunimd Team. All Rights Reserved.
//!
//! This file is part of Vista.
//! The Vista project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Vista Random Module
//!
//! Fold-multiplier derivation for the randomized ordering stages.
//!
//! Every record carries a stable random scalar in `[0, 1)`
//! ([`crate::schema::RECORD_RAND_FIELD`]), fixed once at record creation.
//! A randomized stage draws a single integer multiplier at construction
//! time; compilation orders records by `multiplier mod record_rand` as a
//! transient computed key. The multiplier is the only per-stage randomness:
//! a seeded draw comes from a seed-local generator (same seed, same
//! multiplier, same order), an unseeded draw from the thread-local
//! generator, which is safe for concurrent stage construction.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Inclusive lower bound of the fold multiplier.
pub const FOLD_MULTIPLIER_MIN: i64 = 10_000_000;

/// Exclusive upper bound of the fold multiplier.
pub const FOLD_MULTIPLIER_MAX: i64 = 10_000_000_000;

/// Draws a fold multiplier, seed-locally when a seed is given.
pub fn fold_multiplier(seed: Option<u64>) -> i64 {
    match seed {
        Some(seed) => fold_multiplier_from(&mut StdRng::seed_from_u64(seed)),
        None => fold_multiplier_from(&mut rand::thread_rng()),
    }
}

/// Draws a fold multiplier from a caller-supplied source.
pub fn fold_multiplier_from<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    rng.gen_range(FOLD_MULTIPLIER_MIN..FOLD_MULTIPLIER_MAX)
}
