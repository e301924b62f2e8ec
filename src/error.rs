use thiserror::Error;

/// Errors produced while compiling a ruleset or replaying a plan.
///
/// Running out of time or running out of states to explore is not an error;
/// those outcomes are reported through [`crate::SearchOutcome`].
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Item declared more than once: {0}")]
    DuplicateItem(String),
    #[error("Unknown item '{item}' referenced by {context}")]
    UnknownItem { context: String, item: String },
    #[error("Recipe '{recipe}' has invalid cost {cost}; costs must be finite and non-negative")]
    InvalidCost { recipe: String, cost: f64 },
    #[error("Unknown recipe: {0}")]
    UnknownRecipe(String),
    #[error("Recipe precondition not met: {0}")]
    PreconditionNotMet(String),
    #[error("Predecessor chain does not terminate after {0} steps")]
    PredecessorCycle(usize),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;
