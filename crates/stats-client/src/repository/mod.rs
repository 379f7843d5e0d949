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

//! Connectivity-gated statistics repository.
//!
//! The repository is the single translation boundary between the remote
//! source and the rest of the pipeline: every operation checks connectivity
//! once, short-circuits without touching the source when disconnected, and
//! converts any source error into the [`Failure`] taxonomy.

use chrono::NaiveDate;
use log::warn;

use crate::connectivity::ConnectivityProbe;
use crate::either::{Either, FetchResult};
use crate::failure::Failure;
use crate::model::{Report, Totals};
use crate::remote::StatsSource;

/// Repository gating remote statistics calls behind a connectivity check.
///
/// Holds no mutable state; one instance is safe to share across concurrent
/// callers.
#[derive(Debug)]
pub struct StatsRepository<P, S> {
    probe: P,
    source: S,
}

impl<P, S> StatsRepository<P, S>
where
    P: ConnectivityProbe,
    S: StatsSource,
{
    /// Create a repository from a connectivity probe and a remote source.
    #[must_use]
    pub fn new(probe: P, source: S) -> Self {
        Self { probe, source }
    }

    /// Latest report rows for a country on a given date.
    ///
    /// The probe is queried exactly once. When disconnected, the source is
    /// not invoked at all.
    pub async fn latest_country_report(
        &self,
        name: &str,
        date: NaiveDate,
    ) -> FetchResult<Vec<Report>> {
        if !self.probe.is_connected() {
            return Either::left(Failure::NetworkConnection);
        }

        match self.source.latest_country_report(name, date).await {
            Ok(reports) => Either::right(reports),
            Err(e) => {
                warn!("Country report request for '{}' failed: {}", name, e);
                Either::left(Failure::ServerError)
            }
        }
    }

    /// Latest worldwide totals.
    ///
    /// The probe is queried exactly once. When disconnected, the source is
    /// not invoked at all.
    pub async fn latest_totals(&self) -> FetchResult<Totals> {
        if !self.probe.is_connected() {
            return Either::left(Failure::NetworkConnection);
        }

        match self.source.latest_totals().await {
            Ok(totals) => Either::right(totals),
            Err(e) => {
                warn!("Totals request failed: {}", e);
                Either::left(Failure::ServerError)
            }
        }
    }
}
