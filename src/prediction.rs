use log::warn;
use serde::{Deserialize, Serialize};
use crate::error::StatsError;
use crate::team_stats::*;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub winner: String,
    pub confidence_score: u8,   // 0-100
    pub reasoning: String,
    pub key_factors: Vec<String>,
    pub betting_tips: Vec<String>,
}

// An external prediction service. Treated as opaque and allowed to fail.
pub trait MatchPredictor {
    fn predict(&self, prompt: &str, home: &TeamStatistics, away: &TeamStatistics) -> Result<PredictionResult, StatsError>;
}

// Home side described from home games only, away side from away games only
pub fn matchup_prompt(home: &TeamStatistics, away: &TeamStatistics) -> String {
    let mut prompt = String::from(
        "Act as a football data analyst. Predict the match below using the home record of the home side \
         and the away record of the away side.\n\n"
    );

    for (role, stats) in [("Home side", home), ("Away side", away)] {
        let context = stats.perspective.label().to_lowercase();
        prompt += &format!("{role}: {} ({} matches)\n", stats.team_name, stats.matches_played);
        prompt += &format!("- Win rate ({context}): {:.1}%\n", stats.win_rate());
        prompt += &format!("- Goals scored per match ({context}): {:.2}\n", stats.goals_for_per_match());
        prompt += &format!("- Goals conceded per match ({context}): {:.2}\n", stats.goals_against_per_match());
        prompt += &format!("- Shots on target per match: {}\n", stats.avg_shots_on_target);
        prompt += &format!("- Corners per match: {}\n\n", stats.avg_corners);
    }

    prompt += "Return JSON with the predicted winner (or \"Draw\"), a confidence score from 0 to 100, \
               a short reasoning paragraph, three key statistical factors and four betting tips.";

    prompt
}

// Deterministic guess from the win counts, used whenever the service can't answer
pub fn fallback_prediction(home: &TeamStatistics, away: &TeamStatistics, confidence: u8) -> PredictionResult {
    let winner = if home.wins > away.wins { &home.team_name } else { &away.team_name };

    PredictionResult {
        winner: winner.clone(),
        confidence_score: confidence.min(100),
        reasoning: "Automatic prediction based on number of wins (prediction service unavailable).".to_string(),
        key_factors: vec!["Win history".to_string()],
        betting_tips: vec!["Match winner market".to_string(), "Over/Under goals".to_string()],
    }
}

// Asks the predictor if there is one, falling back to the local guess on any failure
pub fn predict_matchup(
    predictor: Option<&dyn MatchPredictor>,
    home: &TeamStatistics,
    away: &TeamStatistics,
    fallback_confidence: u8,
) -> PredictionResult {
    let Some(predictor) = predictor else {
        return fallback_prediction(home, away, fallback_confidence);
    };

    let prompt = matchup_prompt(home, away);
    match predictor.predict(&prompt, home, away) {
        Ok(prediction) => prediction,
        Err(e) => {
            warn!("Prediction for {} vs {} failed: {e}", home.team_name, away.team_name);
            fallback_prediction(home, away, fallback_confidence)
        }
    }
}
