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

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Value};

use crate::errors::{Result, VistaError};
use crate::stage::{required_str_list, ParamMap, ViewStage};

// Record ids are object-id strings: 24 lowercase hex characters.
fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("^[0-9a-f]{24}$").expect("static pattern"))
}

fn validate_record_ids(record_ids: &[String]) -> Result<()> {
    for id in record_ids {
        if !id_pattern().is_match(id) {
            return Err(VistaError::construction(format!(
                "'{id}' is not a valid record id"
            )));
        }
    }
    Ok(())
}

fn ids_to_ops(record_ids: &[String]) -> Vec<Value> {
    record_ids.iter().map(|id| json!({ "$oid": id })).collect()
}

/// Removes the records with the given ids from the view.
#[derive(Clone, Debug)]
pub struct Exclude {
    record_ids: Vec<String>,
}

impl Exclude {
    /// Creates the stage, rejecting malformed record ids.
    pub fn new<I, S>(record_ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let record_ids: Vec<String> = record_ids.into_iter().map(Into::into).collect();
        validate_record_ids(&record_ids)?;
        Ok(Exclude { record_ids })
    }

    /// The record ids to exclude.
    pub fn record_ids(&self) -> &[String] {
        &self.record_ids
    }

    pub(crate) fn from_params(params: &ParamMap) -> Result<Self> {
        Exclude::new(required_str_list(params, "record_ids")?)
    }
}

impl ViewStage for Exclude {
    fn name(&self) -> &'static str {
        "exclude"
    }

    fn compile(&self) -> Vec<Value> {
        vec![json!({
            "$match": { "_id": { "$not": { "$in": ids_to_ops(&self.record_ids) } } }
        })]
    }

    fn params(&self) -> Vec<(&'static str, Value)> {
        vec![("record_ids", json!(self.record_ids))]
    }
}

/// Keeps only the records with the given ids.
#[derive(Clone, Debug)]
pub struct Select {
    record_ids: Vec<String>,
}

impl Select {
    /// Creates the stage, rejecting malformed record ids.
    pub fn new<I, S>(record_ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let record_ids: Vec<String> = record_ids.into_iter().map(Into::into).collect();
        validate_record_ids(&record_ids)?;
        Ok(Select { record_ids })
    }

    /// The record ids to select.
    pub fn record_ids(&self) -> &[String] {
        &self.record_ids
    }

    pub(crate) fn from_params(params: &ParamMap) -> Result<Self> {
        Select::new(required_str_list(params, "record_ids")?)
    }
}

impl ViewStage for Select {
    fn name(&self) -> &'static str {
        "select"
    }

    fn compile(&self) -> Vec<Value> {
        vec![json!({
            "$match": { "_id": { "$in": ids_to_ops(&self.record_ids) } }
        })]
    }

    fn params(&self) -> Vec<(&'static str, Value)> {
        vec![("record_ids", json!(self.record_ids))]
    }
}
