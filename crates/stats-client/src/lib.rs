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

//! Client library for fetching and observing pandemic statistics.
//!
//! This library provides a modular, network-aware fetch pipeline. It
//! supports multiple layers that can be used independently or composed
//! together:
//!
//! - **Either layer**: Strictly-typed two-branch results with a total
//!   `fold` consumer, instead of exception-style control flow
//! - **Repository layer**: Remote calls gated behind a connectivity check,
//!   with all transport errors translated into a closed failure taxonomy
//! - **State layer**: Each fetch published as an observable
//!   `Loading → Success | Failed` sequence for presentation code to render
//!
//! # Quick Start
//!
//! Use the [`StatsClient`] type for full-stack operation:
//!
//! ```no_run
//! use stats_client::{FetchState, RapidApiConfig, StatsClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = StatsClient::new(RapidApiConfig::default());
//!
//!     match client.fetch_totals().wait_terminal().await {
//!         Some(FetchState::Success(totals)) => {
//!             println!("confirmed: {}", totals.confirmed);
//!         }
//!         Some(FetchState::Failed(failure)) => eprintln!("fetch failed: {failure}"),
//!         _ => eprintln!("fetch cancelled"),
//!     }
//! }
//! ```
//!
//! # Using Individual Layers
//!
//! ## Either Layer Only
//!
//! ```
//! use stats_client::{Either, FetchResult};
//!
//! let result: FetchResult<u64> = Either::right(42);
//! let rendered = result.fold(
//!     |failure| format!("failed: {failure}"),
//!     |value| format!("value: {value}"),
//! );
//! assert_eq!(rendered, "value: 42");
//! ```
//!
//! ## Repository Layer Only
//!
//! ```no_run
//! use stats_client::{RapidApiConfig, RapidApiSource, StatsRepository, TcpProbe};
//!
//! # async fn example() {
//! let repository = StatsRepository::new(
//!     TcpProbe::default(),
//!     RapidApiSource::new(RapidApiConfig::default()),
//! );
//!
//! let result = repository.latest_totals().await;
//! result.fold(
//!     |failure| eprintln!("fetch failed: {failure}"),
//!     |totals| println!("confirmed: {}", totals.confirmed),
//! );
//! # }
//! ```

pub mod connectivity;
pub mod either;
pub mod failure;
pub mod model;
pub mod remote;
pub mod repository;
pub mod state;

use std::sync::Arc;

use chrono::NaiveDate;

pub use connectivity::{ConnectivityProbe, StaticProbe, TcpProbe};
pub use either::{Either, FetchResult};
pub use failure::Failure;
pub use model::{Report, Totals};
pub use remote::{RapidApiConfig, RapidApiSource, SourceError, StatsSource};
pub use repository::StatsRepository;
pub use state::{spawn_fetch, FetchState, FetchTask};

/// Full-stack statistics client that wires all layers together.
///
/// The client composes a connectivity probe, a remote source, and the
/// repository, and exposes fetch operations that each run on a background
/// task publishing a fresh `Loading → terminal` state sequence.
pub struct StatsClient<P = TcpProbe, S = RapidApiSource> {
    repository: Arc<StatsRepository<P, S>>,
}

impl<P, S> std::fmt::Debug for StatsClient<P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsClient").finish_non_exhaustive()
    }
}

impl StatsClient {
    /// Create a client with the default wiring: a [`TcpProbe`] and a
    /// [`RapidApiSource`] with the given configuration.
    #[must_use]
    pub fn new(config: RapidApiConfig) -> Self {
        Self::with_parts(TcpProbe::default(), RapidApiSource::new(config))
    }
}

impl<P, S> StatsClient<P, S>
where
    P: ConnectivityProbe + Send + Sync + 'static,
    S: StatsSource + 'static,
{
    /// Create a client from a custom probe and source.
    #[must_use]
    pub fn with_parts(probe: P, source: S) -> Self {
        Self {
            repository: Arc::new(StatsRepository::new(probe, source)),
        }
    }

    /// Start fetching the latest report rows for a country.
    ///
    /// Each call is an independent logical fetch with its own state
    /// sequence. Must be called from within a Tokio runtime.
    #[must_use]
    pub fn fetch_country_report(&self, name: &str, date: NaiveDate) -> FetchTask<Vec<Report>> {
        let repository = Arc::clone(&self.repository);
        let name = name.to_string();

        spawn_fetch(async move { repository.latest_country_report(&name, date).await })
    }

    /// Start fetching the latest worldwide totals.
    ///
    /// Each call is an independent logical fetch with its own state
    /// sequence. Must be called from within a Tokio runtime.
    #[must_use]
    pub fn fetch_totals(&self) -> FetchTask<Totals> {
        let repository = Arc::clone(&self.repository);

        spawn_fetch(async move { repository.latest_totals().await })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    fn sample_totals() -> Totals {
        Totals {
            confirmed: 3_381_014,
            recovered: 1_070_505,
            critical: 50_987,
            deaths: 239_603,
        }
    }

    struct StubSource;

    #[async_trait]
    impl StatsSource for StubSource {
        async fn latest_country_report(
            &self,
            name: &str,
            date: NaiveDate,
        ) -> Result<Vec<Report>, SourceError> {
            Ok(vec![Report {
                country: name.to_string(),
                province: None,
                date,
                confirmed: 1,
                deaths: 0,
                recovered: 0,
                active: 1,
            }])
        }

        async fn latest_totals(&self) -> Result<Totals, SourceError> {
            Ok(sample_totals())
        }
    }

    // Stands in for the source in paths where it must never be reached.
    struct UnreachableSource;

    #[async_trait]
    impl StatsSource for UnreachableSource {
        async fn latest_country_report(
            &self,
            _name: &str,
            _date: NaiveDate,
        ) -> Result<Vec<Report>, SourceError> {
            panic!("source must not be invoked while disconnected");
        }

        async fn latest_totals(&self) -> Result<Totals, SourceError> {
            panic!("source must not be invoked while disconnected");
        }
    }

    #[tokio::test]
    async fn test_client_fetch_totals_success() {
        let client = StatsClient::with_parts(StaticProbe::connected(), StubSource);

        let terminal = client.fetch_totals().wait_terminal().await;

        assert_eq!(terminal, Some(FetchState::Success(sample_totals())));
    }

    #[tokio::test]
    async fn test_client_fetch_report_disconnected() {
        let client = StatsClient::with_parts(StaticProbe::disconnected(), UnreachableSource);
        let date = NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();

        let terminal = client.fetch_country_report("Mexico", date).wait_terminal().await;

        assert_eq!(terminal, Some(FetchState::Failed(Failure::NetworkConnection)));
    }

    #[tokio::test]
    async fn test_client_refetch_is_independent() {
        let client = StatsClient::with_parts(StaticProbe::connected(), StubSource);

        let first = client.fetch_totals().wait_terminal().await;
        let second = client.fetch_totals().wait_terminal().await;

        assert_eq!(first, Some(FetchState::Success(sample_totals())));
        assert_eq!(second, first);
    }
}
