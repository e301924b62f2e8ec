//! # Planner
//!
//! The [`Planner`] ties a compiled [`Problem`] to a heuristic and a time
//! budget. It is the entry point most callers need:
//!
//! 1. Describe the rules as a [`crate::RuleSet`] (or load them from JSON)
//! 2. Compile them into a [`Problem`]
//! 3. Build a planner and call [`Planner::plan`]
//!
//! ```
//! use craftplan::{Planner, RecipeDef, RuleSet, SearchOutcome};
//! use std::time::Duration;
//!
//! let problem = RuleSet::new(["wood", "plank", "bench"])
//!     .goal("bench", 1)
//!     .recipe("punch for wood", RecipeDef::new(4.0).produces("wood", 1))
//!     .recipe("craft plank", RecipeDef::new(1.0).consumes("wood", 1).produces("plank", 4))
//!     .recipe("craft bench", RecipeDef::new(1.0).consumes("plank", 4).produces("bench", 1))
//!     .compile()
//!     .unwrap();
//!
//! let planner = Planner::new(problem).with_time_limit(Duration::from_secs(5));
//! match planner.plan().unwrap() {
//!     SearchOutcome::Found(plan) => {
//!         let actions: Vec<_> = plan.actions().collect();
//!         assert_eq!(actions, ["punch for wood", "craft plank", "craft bench"]);
//!         assert_eq!(plan.total_cost(), 6.0);
//!     }
//!     other => panic!("no plan: {:?}", other),
//! }
//! ```

use crate::heuristic::{CraftingHeuristic, Heuristic};
use crate::search::{BestFirstSearch, SearchOutcome};
use crate::{Problem, Result};
use std::time::Duration;

/// Time budget used when none is given.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(30);

/// Runs time-bounded searches over one compiled [`Problem`].
///
/// The problem is read-only once built, so a planner can be shared by
/// reference and each call to [`Planner::plan`] gets its own bookkeeping.
pub struct Planner {
    problem: Problem,
    search: BestFirstSearch,
    time_limit: Duration,
}

impl Planner {
    /// Creates a planner using uniform-cost search and the default time limit.
    pub fn new(problem: Problem) -> Self {
        Self {
            problem,
            search: BestFirstSearch::default(),
            time_limit: DEFAULT_TIME_LIMIT,
        }
    }

    /// Replaces the heuristic strategy.
    pub fn with_heuristic(mut self, heuristic: Box<dyn Heuristic>) -> Self {
        self.search = BestFirstSearch::new(heuristic);
        self
    }

    /// Uses the Minecraft crafting heuristic resolved against this problem's items.
    pub fn with_crafting_heuristic(self) -> Self {
        let heuristic = CraftingHeuristic::minecraft(self.problem.items());
        self.with_heuristic(Box::new(heuristic))
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Searches for a plan from the problem's initial state.
    ///
    /// # Errors
    ///
    /// Only engine invariant failures are errors; timeouts and unreachable
    /// goals come back as [`SearchOutcome::TimedOut`] and
    /// [`SearchOutcome::Exhausted`].
    pub fn plan(&self) -> Result<SearchOutcome> {
        self.search.search(&self.problem, self.time_limit)
    }
}
