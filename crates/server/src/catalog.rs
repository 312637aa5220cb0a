//! Static catalog of supported states and their cities.
//!
//! Backs the state/city pickers in the clients. Ships with a built-in list;
//! `STATES_CITIES_PATH` points at a JSON file (`{"State": ["City", ...]}`)
//! to override it. A broken override falls back to the built-in list with a
//! warning rather than failing startup.

use std::path::Path;

use indexmap::IndexMap;
use tracing::{info, warn};

use leadmap_core::{CatalogConfig, LeadmapError};

/// Built-in state → cities data.
const BUILT_IN: &str = include_str!("../data/states_cities.json");

pub struct CityCatalog {
    states: IndexMap<String, Vec<String>>,
}

impl CityCatalog {
    pub fn load(config: &CatalogConfig) -> Self {
        if let Some(path) = &config.states_cities_path {
            match load_override(path) {
                Ok(states) => {
                    let catalog = Self { states };
                    info!(
                        "Loaded city catalog from {} ({} states)",
                        path.display(),
                        catalog.states.len()
                    );
                    return catalog;
                }
                Err(e) => {
                    warn!(
                        "Failed to load city catalog from {}: {}, using built-in list",
                        path.display(),
                        e
                    );
                }
            }
        }
        Self::built_in()
    }

    pub fn built_in() -> Self {
        let states = serde_json::from_str(BUILT_IN)
            .unwrap_or_else(|e| panic!("built-in states_cities.json is invalid: {}", e));
        Self { states }
    }

    pub fn states(&self) -> Vec<&str> {
        self.states.keys().map(String::as_str).collect()
    }

    pub fn cities(&self, state: &str) -> Option<&[String]> {
        self.states.get(state).map(Vec::as_slice)
    }
}

fn load_override(path: &Path) -> Result<IndexMap<String, Vec<String>>, LeadmapError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| LeadmapError::Serialize(e.to_string()))
}
