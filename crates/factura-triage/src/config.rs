//! Triage configuration

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::recall::RecallConfig;

/// Triage runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    /// SQLite database file path
    pub db_path: String,
    /// Directory holding the input JSON files
    pub data_dir: String,
    /// Recall tuning
    pub recall: RecallConfig,
    /// Minimum confidence for auto-applying corrections
    pub auto_apply_threshold: f64,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            db_path: "db/memory.db".to_string(),
            data_dir: "data".to_string(),
            recall: RecallConfig::default(),
            auto_apply_threshold: crate::AUTO_APPLY_THRESHOLD,
        }
    }
}

impl TriageConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        if let Ok(path) = std::env::var("FACTURA_DB_PATH") {
            cfg.db_path = path;
        }
        if let Ok(dir) = std::env::var("FACTURA_DATA_DIR") {
            cfg.data_dir = dir;
        }

        // Recall tuning
        if let Ok(val) = std::env::var("FACTURA_DECAY_AGE_DAYS") {
            if let Ok(v) = val.parse() {
                cfg.recall.decay_age_days = v;
            }
        }
        if let Ok(val) = std::env::var("FACTURA_DECAY_PENALTY") {
            if let Ok(v) = val.parse() {
                cfg.recall.decay_penalty = v;
            }
        }
        if let Ok(val) = std::env::var("FACTURA_MIN_EFFECTIVE_CONFIDENCE") {
            if let Ok(v) = val.parse() {
                cfg.recall.min_effective_confidence = v;
            }
        }
        if let Ok(val) = std::env::var("FACTURA_MEMORY_WEIGHT") {
            if let Ok(v) = val.parse() {
                cfg.recall.memory_weight = v;
            }
        }

        // Decision tuning
        if let Ok(val) = std::env::var("FACTURA_AUTO_APPLY_THRESHOLD") {
            if let Ok(v) = val.parse() {
                cfg.auto_apply_threshold = v;
            }
        }

        Ok(cfg)
    }

    /// Path of the extracted-invoices input file
    pub fn invoices_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("invoices_extracted.json")
    }

    /// Path of the human-corrections input file
    pub fn corrections_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("human_corrections.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine_constants() {
        let cfg = TriageConfig::default();
        assert_eq!(cfg.db_path, "db/memory.db");
        assert_eq!(cfg.data_dir, "data");
        assert!((cfg.recall.decay_age_days - crate::DECAY_AGE_DAYS).abs() < 1e-9);
        assert!((cfg.recall.decay_penalty - crate::DECAY_PENALTY).abs() < 1e-9);
        assert!(
            (cfg.recall.min_effective_confidence - crate::MIN_EFFECTIVE_CONFIDENCE).abs() < 1e-9
        );
        assert!((cfg.recall.memory_weight - crate::MEMORY_CONFIDENCE_WEIGHT).abs() < 1e-9);
        assert!((cfg.auto_apply_threshold - crate::AUTO_APPLY_THRESHOLD).abs() < 1e-9);
    }

    #[test]
    fn test_input_paths_join_data_dir() {
        let mut cfg = TriageConfig::default();
        cfg.data_dir = "samples".to_string();
        assert_eq!(
            cfg.invoices_path(),
            PathBuf::from("samples/invoices_extracted.json")
        );
        assert_eq!(
            cfg.corrections_path(),
            PathBuf::from("samples/human_corrections.json")
        );
    }
}
