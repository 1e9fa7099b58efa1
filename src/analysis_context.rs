use serde::Deserialize;
use std::fs;
use std::path::Path;
use crate::error::StatsError;
use crate::team_stats::Perspective;

// Tunables for a matchup analysis. Every field is optional in a config file
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisContext {
    pub recent_form_window: usize,

    pub home_perspective: Perspective,
    pub away_perspective: Perspective,

    pub fallback_confidence: u8,    // Used when the prediction service is unavailable
}

impl Default for AnalysisContext {
    fn default() -> Self {
        Self {
            recent_form_window: 5,

            home_perspective: Perspective::Home,
            away_perspective: Perspective::Away,

            fallback_confidence: 50,
        }
    }
}

impl AnalysisContext {
    pub fn from_json_file<P: AsRef<Path>>(file_path: P) -> Result<Self, StatsError> {
        let data = fs::read_to_string(file_path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, StatsError> {
        Ok(serde_json::from_str(data)?)
    }
}
