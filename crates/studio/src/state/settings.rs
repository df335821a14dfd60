//! Studio settings

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::geometry::CAD_PLAN_ELEVATION;

/// Bulk import tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Objects admitted per chunk
    pub chunk_size: usize,
    /// Pause between chunks in milliseconds (0 = plain yield)
    pub yield_ms: u64,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            chunk_size: 50,
            yield_ms: 1,
        }
    }
}

/// CAD plan import settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CadSettings {
    /// Segments shorter than this are dropped
    pub min_segment_length: f64,
    /// Segments used to approximate a full circle
    pub circle_segments: u32,
    /// Segments used to approximate an arc
    pub arc_segments: u32,
    /// Height of imported plans above the ground
    pub plan_elevation: f64,
}

impl Default for CadSettings {
    fn default() -> Self {
        Self {
            min_segment_length: 1e-6,
            circle_segments: 32,
            arc_segments: 16,
            plan_elevation: CAD_PLAN_ELEVATION,
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undo steps kept
    pub undo_limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { undo_limit: 100 }
    }
}

/// All studio settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioSettings {
    pub import: ImportSettings,
    pub cad: CadSettings,
    pub history: HistorySettings,
}

impl StudioSettings {
    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "archscene", "archscene")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the platform config dir, or defaults if absent/invalid
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring settings file: {e:#}"),
                }
            }
        }
        Self::default()
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Save settings to the platform config dir
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                if std::fs::create_dir_all(parent).is_err() {
                    return;
                }
            }
            if let Ok(json) = serde_json::to_string_pretty(self) {
                if let Err(e) = std::fs::write(&path, json) {
                    tracing::warn!("Failed to save settings to {}: {e}", path.display());
                }
            }
        }
    }
}
