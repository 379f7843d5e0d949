// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Domain model for pandemic statistics.

use chrono::NaiveDate;
use serde::Deserialize;

/// One report row for a country or province on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Report {
    /// Country name (e.g., "Mexico").
    pub country: String,
    /// Province or state, when the country reports at that granularity.
    #[serde(default)]
    pub province: Option<String>,
    /// Report date.
    pub date: NaiveDate,
    /// Cumulative confirmed cases.
    pub confirmed: u64,
    /// Cumulative deaths.
    pub deaths: u64,
    /// Cumulative recoveries.
    pub recovered: u64,
    /// Currently active cases.
    pub active: u64,
}

/// Worldwide aggregate totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Totals {
    /// Cumulative confirmed cases.
    pub confirmed: u64,
    /// Cumulative recoveries.
    pub recovered: u64,
    /// Cases currently in critical condition.
    pub critical: u64,
    /// Cumulative deaths.
    pub deaths: u64,
}
