//! Error types for the Publi Pricing Engine

use thiserror::Error;

/// Result type for pricing engine operations
pub type Result<T> = std::result::Result<T, CalculatorError>;

/// Errors that can occur while pricing a deal
#[derive(Error, Debug)]
pub enum CalculatorError {
    /// No positive trailing reach average could be obtained; nothing can be
    /// priced without it. Client-correctable (wrong creator, empty window).
    #[error("insufficient metrics: {0}")]
    InsufficientMetrics(String),

    /// Content delivery was requested with zero quantity across all formats.
    #[error("no deliverables selected: content delivery requires at least one format quantity")]
    NoDeliverablesSelected,

    /// A required collaborator (metrics report, CPM) failed. Optional
    /// collaborators never surface here; they degrade to neutral defaults.
    #[error("collaborator failure: {0}")]
    Collaborator(#[from] anyhow::Error),
}

impl CalculatorError {
    /// Machine-checkable marker for callers that map errors onto a transport.
    pub fn kind(&self) -> &'static str {
        match self {
            CalculatorError::InsufficientMetrics(_) => "insufficient_metrics",
            CalculatorError::NoDeliverablesSelected => "no_deliverables_selected",
            CalculatorError::Collaborator(_) => "collaborator_failure",
        }
    }

    /// HTTP-equivalent status the caller should surface.
    pub fn status_code(&self) -> u16 {
        match self {
            CalculatorError::InsufficientMetrics(_) | CalculatorError::NoDeliverablesSelected => {
                422
            }
            CalculatorError::Collaborator(_) => 502,
        }
    }

    /// True when the caller supplied parameters that cannot be priced, as
    /// opposed to an infrastructure failure.
    pub fn is_client_correctable(&self) -> bool {
        self.status_code() == 422
    }
}
