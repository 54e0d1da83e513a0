//! Structured reference records for the retrieval-backed domains.
//!
//! Each domain (races, spells, classes) is a read-only JSON file under
//! `<data_dir>/reference/<domain>.json` holding a flat name → description
//! map. Files are loaded and cached on first access per domain; a
//! missing or unreadable file yields an empty map, logged, not an error.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::section::RagDomain;

/// Per-domain record map, keyed by record name.
pub type RecordMap = BTreeMap<String, String>;

/// Lazily loaded per-domain reference data.
pub struct ReferenceData {
    reference_dir: PathBuf,
    cache: Mutex<HashMap<RagDomain, Arc<RecordMap>>>,
}

impl ReferenceData {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            reference_dir: data_dir.into().join("reference"),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Records for a domain, loading the file on first access.
    pub fn records(&self, domain: RagDomain) -> Arc<RecordMap> {
        let mut cache = self.cache.lock().expect("reference cache poisoned");
        if let Some(records) = cache.get(&domain) {
            return Arc::clone(records);
        }

        let records = Arc::new(self.load(domain));
        cache.insert(domain, Arc::clone(&records));
        records
    }

    /// Record names for a domain, in stable sorted order.
    pub fn names(&self, domain: RagDomain) -> Vec<String> {
        self.records(domain).keys().cloned().collect()
    }

    fn load(&self, domain: RagDomain) -> RecordMap {
        let path = self.reference_dir.join(format!("{}.json", domain.as_str()));
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(
                    "Reference data for '{}' not available at {}: {}",
                    domain.as_str(),
                    path.display(),
                    err
                );
                return RecordMap::new();
            }
        };

        match serde_json::from_str::<RecordMap>(&raw) {
            Ok(map) => {
                tracing::info!("Loaded {} '{}' records", map.len(), domain.as_str());
                map
            }
            Err(err) => {
                tracing::warn!("Reference data for '{}' is malformed: {}", domain.as_str(), err);
                RecordMap::new()
            }
        }
    }
}
