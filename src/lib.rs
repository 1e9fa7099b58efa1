pub mod analysis_context;
pub mod data_loader;
pub mod error;
pub mod form;
pub mod prediction;
pub mod report;
pub mod team_stats;
pub mod util;


pub use analysis_context::AnalysisContext;
pub use data_loader::{load_matches, parse_matches, FullTimeResult, MatchRecord, Score, Side, SideEvents};
pub use error::StatsError;
pub use form::{recent_form, unique_teams, FormEntry};
pub use prediction::{predict_matchup, MatchPredictor, PredictionResult};
pub use report::Matchup;
pub use team_stats::{compute_team_statistics, Outcome, Perspective, TeamStatistics};
