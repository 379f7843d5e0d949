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

//! RapidAPI-backed statistics source.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use super::{SourceError, StatsSource};
use crate::model::{Report, Totals};

/// Default service base URL.
pub const DEFAULT_BASE_URL: &str = "https://covid-19-data.p.rapidapi.com";

/// Default RapidAPI host header value.
pub const DEFAULT_API_HOST: &str = "covid-19-data.p.rapidapi.com";

const RAPIDAPI_KEY_HEADER: &str = "x-rapidapi-key";
const RAPIDAPI_HOST_HEADER: &str = "x-rapidapi-host";

/// Configuration for the RapidAPI statistics service.
#[derive(Debug, Clone)]
pub struct RapidApiConfig {
    /// Service base URL.
    pub base_url: String,
    /// API key; requests without one are rejected by the service.
    pub api_key: Option<String>,
    /// RapidAPI host header value.
    pub api_host: String,
}

impl Default for RapidApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            api_host: DEFAULT_API_HOST.to_string(),
        }
    }
}

/// Statistics source backed by the RapidAPI pandemic endpoints.
#[derive(Debug, Clone)]
pub struct RapidApiSource {
    client: reqwest::Client,
    config: RapidApiConfig,
}

impl RapidApiSource {
    /// Create a source with the given configuration.
    #[must_use]
    pub fn new(config: RapidApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, SourceError>
    where
        T: DeserializeOwned,
    {
        let url = endpoint_url(&self.config.base_url, path);

        let mut request = self
            .client
            .get(&url)
            .header(RAPIDAPI_HOST_HEADER, &self.config.api_host);

        if let Some(key) = &self.config.api_key {
            request = request.header(RAPIDAPI_KEY_HEADER, key);
        }

        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl StatsSource for RapidApiSource {
    async fn latest_country_report(
        &self,
        name: &str,
        date: NaiveDate,
    ) -> Result<Vec<Report>, SourceError> {
        let query = [
            ("name", name.to_string()),
            ("date", date.to_string()),
        ];

        self.get_json("report", &query).await
    }

    async fn latest_totals(&self) -> Result<Totals, SourceError> {
        // The service wraps the single totals object in an array.
        let rows: Vec<Totals> = self.get_json("totals", &[]).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| SourceError::Decode("empty totals response".to_string()))
    }
}

fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_path() {
        assert_eq!(
            endpoint_url("https://covid-19-data.p.rapidapi.com", "totals"),
            "https://covid-19-data.p.rapidapi.com/totals"
        );
    }

    #[test]
    fn test_endpoint_url_tolerates_trailing_slash() {
        assert_eq!(
            endpoint_url("https://example.com/", "report"),
            "https://example.com/report"
        );
    }

    #[test]
    fn test_default_config_targets_service() {
        let config = RapidApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_host, DEFAULT_API_HOST);
        assert!(config.api_key.is_none());
    }
}
