use mandi_core::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{field} \"{value}\" not offered by the query form")]
    SelectionNotFound { field: &'static str, value: String },

    #[error("no recognizable result table on the results page")]
    NoDataTable,

    #[error("query page missing expected element {element}")]
    MalformedPage { element: String },

    #[error("form submission failed after {attempts} attempts: {reason}")]
    SubmitFailed { attempts: u32, reason: String },

    #[error("{field} options did not populate within {timeout_secs}s")]
    DependentListTimeout {
        field: &'static str,
        timeout_secs: u64,
    },
}

/// Boundary conversion into the engine-facing taxonomy: selection and
/// table outcomes map one-to-one, everything else is an automation
/// failure tagged with the stage it died in.
impl From<ScrapeError> for SourceError {
    fn from(err: ScrapeError) -> Self {
        match err {
            ScrapeError::SelectionNotFound { field, value } => {
                SourceError::SelectionNotFound { field, value }
            }
            ScrapeError::NoDataTable => SourceError::NoDataTable,
            ScrapeError::Http(e) => SourceError::Automation {
                stage: "transport",
                reason: e.to_string(),
            },
            ScrapeError::MalformedPage { element } => SourceError::Automation {
                stage: "page-parse",
                reason: format!("missing element {element}"),
            },
            ScrapeError::SubmitFailed { attempts, reason } => SourceError::Automation {
                stage: "submit",
                reason: format!("failed after {attempts} attempts: {reason}"),
            },
            ScrapeError::DependentListTimeout {
                field,
                timeout_secs,
            } => SourceError::Automation {
                stage: "dependent-list",
                reason: format!("{field} options did not populate within {timeout_secs}s"),
            },
        }
    }
}
