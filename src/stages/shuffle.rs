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

//! Reproducible randomized ordering stages.
//!
//! Both stages fix a fold multiplier at construction time and order records
//! by `multiplier mod record_rand` as a transient computed key, so one
//! stage instance always compiles the same operations. Reconstructing a
//! stage from the same seed redraws the same multiplier; an unseeded stage
//! draws a fresh one per instance.

use rand::Rng;
use serde_json::{json, Value};

use crate::errors::Result;
use crate::random::{fold_multiplier, fold_multiplier_from};
use crate::stage::{optional_seed, required_i64, ParamMap, ViewStage};
use crate::stages::{match_none, ASCENDING};

/// Pseudo-randomly reorders the records in the view.
#[derive(Clone, Debug)]
pub struct Shuffle {
    seed: Option<u64>,
    multiplier: i64,
}

impl Shuffle {
    pub fn new(seed: Option<u64>) -> Self {
        Shuffle {
            seed,
            multiplier: fold_multiplier(seed),
        }
    }

    /// Creates an unseeded stage drawing its multiplier from the given
    /// source.
    pub fn with_source<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Shuffle {
            seed: None,
            multiplier: fold_multiplier_from(rng),
        }
    }

    /// The random seed in use, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub(crate) fn from_params(params: &ParamMap) -> Result<Self> {
        Ok(Shuffle::new(optional_seed(params, "seed")?))
    }
}

impl ViewStage for Shuffle {
    fn name(&self) -> &'static str {
        "shuffle"
    }

    fn compile(&self) -> Vec<Value> {
        vec![
            json!({ "$set": { "_rand_shuffle": { "$mod": [self.multiplier, "$_rand"] } } }),
            json!({ "$sort": { "_rand_shuffle": ASCENDING } }),
            json!({ "$unset": "_rand_shuffle" }),
        ]
    }

    fn params(&self) -> Vec<(&'static str, Value)> {
        vec![("seed", json!(self.seed))]
    }
}

/// Pseudo-randomly selects the given number of records from the view.
///
/// A non-positive size compiles to a match-nothing pipeline regardless of
/// the seed.
#[derive(Clone, Debug)]
pub struct Take {
    size: i64,
    seed: Option<u64>,
    multiplier: i64,
}

impl Take {
    pub fn new(size: i64, seed: Option<u64>) -> Self {
        Take {
            size,
            seed,
            multiplier: fold_multiplier(seed),
        }
    }

    /// Creates an unseeded stage drawing its multiplier from the given
    /// source.
    pub fn with_source<R: Rng + ?Sized>(size: i64, rng: &mut R) -> Self {
        Take {
            size,
            seed: None,
            multiplier: fold_multiplier_from(rng),
        }
    }

    /// The number of records to select.
    pub fn size(&self) -> i64 {
        self.size
    }

    /// The random seed in use, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub(crate) fn from_params(params: &ParamMap) -> Result<Self> {
        Ok(Take::new(
            required_i64(params, "size")?,
            optional_seed(params, "seed")?,
        ))
    }
}

impl ViewStage for Take {
    fn name(&self) -> &'static str {
        "take"
    }

    fn compile(&self) -> Vec<Value> {
        if self.size <= 0 {
            return vec![match_none()];
        }

        vec![
            json!({ "$set": { "_rand_take": { "$mod": [self.multiplier, "$_rand"] } } }),
            json!({ "$sort": { "_rand_take": ASCENDING } }),
            json!({ "$limit": self.size }),
            json!({ "$unset": "_rand_take" }),
        ]
    }

    fn params(&self) -> Vec<(&'static str, Value)> {
        vec![("size", json!(self.size)), ("seed", json!(self.seed))]
    }
}
