//! JSON configuration for the `chart_extract` tool.
//!
//! ```json
//! {
//!   "input_path": "plots/figure3.png",
//!   "output": { "json_out": "out/figure3.json", "debug_dir": "out/figure3" },
//!   "params": { "curves": { "grid_size": 80 } },
//!   "manual_calibration": { "x_min": 0, "x_max": 10, "y_min": -5, "y_max": 5 }
//! }
//! ```
use crate::ExtractorParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    pub json_out: Option<PathBuf>,
    /// Edge map and per-color masks are written here when set.
    pub debug_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct ManualCalibration {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input_path: PathBuf,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub params: ExtractorParams,
    #[serde(default)]
    pub manual_calibration: Option<ManualCalibration>,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}
