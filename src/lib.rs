mod error;
mod goal;
mod heuristic;
mod planner;
mod problem;
mod recipe;
mod rules;
mod search;
mod state;

pub use error::{PlanError, Result};
pub use goal::Goal;
pub use heuristic::{
    CraftingHeuristic, CraftingPolicy, Heuristic, HeuristicContext, ZeroHeuristic, DISCOURAGED,
};
pub use planner::{Planner, DEFAULT_TIME_LIMIT};
pub use problem::{Problem, Successor};
pub use recipe::Recipe;
pub use rules::{RecipeDef, Requires, RuleSet};
pub use search::{BestFirstSearch, Plan, PlanStep, SearchOutcome, SearchStats};
pub use state::{ItemId, Items, State, StateDisplay};
