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

//! Application configuration management.
//!
//! This module handles persistent configuration storage using TOML format.
//! It covers the statistics service endpoint, the API key, and the
//! connectivity probe target.

use serde::{Deserialize, Serialize};
use stats_client::connectivity::DEFAULT_PROBE_ADDRESS;
use stats_client::remote::{DEFAULT_API_HOST, DEFAULT_BASE_URL};

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    /// Statistics service base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// RapidAPI host header value
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// API key (optional, env var takes precedence)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Connectivity probe target in host:port format
    #[serde(default = "default_probe_address")]
    pub probe_address: String,

    /// Connectivity probe timeout in milliseconds
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

// Default value functions for serde
fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

fn default_probe_address() -> String {
    DEFAULT_PROBE_ADDRESS.to_string()
}

fn default_probe_timeout_ms() -> u64 {
    400
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_host: default_api_host(),
            api_key: None,
            probe_address: default_probe_address(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load("covidtrack", "config")
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<std::path::PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path("covidtrack", "config")
    }

    /// Resolve the API key from environment variable or config
    pub fn resolve_api_key(&self) -> Option<String> {
        // Check environment variable first
        if let Ok(key) = std::env::var("COVIDTRACK_API_KEY") {
            if !key.is_empty() {
                return Some(key);
            }
        }

        // Fall back to config
        self.api_key.clone().filter(|key| !key.is_empty())
    }
}
