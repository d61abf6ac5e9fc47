use thiserror::Error;

/// Errors surfaced while building a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid report JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised only under strict overflow checking; the default build logs
    /// overflow and keeps going.
    #[error("{events} frame overflow event(s) in final layout")]
    Overflow { events: u32 },
}
