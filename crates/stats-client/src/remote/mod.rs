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

//! Remote data source layer.
//!
//! This module provides a trait-based abstraction over the remote
//! statistics service. Currently implements the RapidAPI-style pandemic
//! endpoints; alternative backends implement [`StatsSource`].

mod rapidapi;

pub use rapidapi::{RapidApiConfig, RapidApiSource, DEFAULT_API_HOST, DEFAULT_BASE_URL};

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{Report, Totals};

/// Errors a remote source can report.
///
/// These never escape the repository boundary; the repository translates
/// them into the pipeline's failure taxonomy.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The request could not be sent or the transport failed mid-flight.
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not in the expected shape.
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

/// Asynchronous remote source of pandemic statistics.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Fetch the latest report rows for a country on a given date.
    async fn latest_country_report(
        &self,
        name: &str,
        date: NaiveDate,
    ) -> Result<Vec<Report>, SourceError>;

    /// Fetch the latest worldwide totals.
    async fn latest_totals(&self) -> Result<Totals, SourceError>;
}
