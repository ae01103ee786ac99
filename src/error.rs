use thiserror::Error;

/// Errors raised by the GOAP planner.
///
/// Failing to find a plan is not an error: [`Planner::plan`](crate::Planner::plan)
/// reports it as `Ok(None)`. The variants here cover malformed queries and
/// exhausted search budgets.
///
/// # Examples
///
/// ```
/// use goap_planner::GoapError;
///
/// let err = GoapError::InvalidInput("goal is empty".to_string());
/// assert_eq!(format!("{}", err), "Invalid planning input: goal is empty");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GoapError {
    /// The goal or the action set is empty
    #[error("Invalid planning input: {0}")]
    InvalidInput(String),

    /// An action reported a negative or non-finite cost
    #[error("Invalid action cost: {0}")]
    InvalidActionCost(String),

    /// No registered action carries the requested name
    #[error("Action not found: {0}")]
    ActionNotFound(String),

    /// The search created more nodes than the configured limit allows
    #[error("Search exceeded the limit of {0} nodes")]
    SearchLimitExceeded(usize),
}

/// Result type alias for GOAP operations.
pub type Result<T> = std::result::Result<T, GoapError>;
