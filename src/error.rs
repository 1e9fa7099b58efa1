use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Prediction service unavailable: {0}")]
    PredictionUnavailable(String),

    #[error("Team not found in dataset: {team}")]
    UnknownTeam { team: String },

    #[error("No usable match records in {path}")]
    NoMatches { path: String },
}
