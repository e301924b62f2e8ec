//! # Compiled recipes
//!
//! A [`Recipe`] is the compiled form of a declarative rule: a named, costed
//! transformation of one [`State`] into another, gated by a precondition.
//!
//! * `requires` — items that must be held (quantity ≥ 1) and are not used up
//! * `consumes` — items that must be available and are subtracted
//! * `produces` — items that are added
//!
//! Recipes are built by [`crate::RuleSet::compile`], which resolves every item
//! name against the universe up front, so checking and applying a recipe
//! never performs a name lookup.
//!
//! ```
//! use craftplan::{RecipeDef, RuleSet};
//!
//! let problem = RuleSet::new(["wood", "plank"])
//!     .initial("wood", 1)
//!     .goal("plank", 1)
//!     .recipe("craft plank", RecipeDef::new(1.0).consumes("wood", 1).produces("plank", 4))
//!     .compile()
//!     .unwrap();
//!
//! let recipe = problem.recipe("craft plank").unwrap();
//! let start = problem.initial_state();
//! assert!(recipe.check(start));
//!
//! let next = recipe.apply(start).unwrap();
//! assert_eq!(problem.items().quantity(&next, "plank"), 4);
//! assert_eq!(problem.items().quantity(&next, "wood"), 0);
//! // The input state is left untouched.
//! assert_eq!(problem.items().quantity(start, "wood"), 1);
//! ```

use crate::state::ItemId;
use crate::{PlanError, Result, State};

#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    name: String,
    cost: f64,
    requires: Vec<ItemId>,
    consumes: Vec<(ItemId, u32)>,
    produces: Vec<(ItemId, u32)>,
}

impl Recipe {
    pub(crate) fn new(
        name: String,
        cost: f64,
        requires: Vec<ItemId>,
        consumes: Vec<(ItemId, u32)>,
        produces: Vec<(ItemId, u32)>,
    ) -> Result<Self> {
        if !cost.is_finite() || cost < 0.0 {
            return Err(PlanError::InvalidCost { recipe: name, cost });
        }

        Ok(Self {
            name,
            cost,
            requires,
            consumes,
            produces,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn requires(&self) -> &[ItemId] {
        &self.requires
    }

    pub fn consumes(&self) -> &[(ItemId, u32)] {
        &self.consumes
    }

    pub fn produces(&self) -> &[(ItemId, u32)] {
        &self.produces
    }

    /// True if this recipe produces `item`.
    pub fn is_producer_of(&self, item: ItemId) -> bool {
        self.produces.iter().any(|&(id, _)| id == item)
    }

    /// True if this recipe consumes `item`.
    pub fn is_consumer_of(&self, item: ItemId) -> bool {
        self.consumes.iter().any(|&(id, _)| id == item)
    }

    /// True if this recipe needs `item` held without consuming it.
    pub fn is_gated_by(&self, item: ItemId) -> bool {
        self.requires.contains(&item)
    }

    /// Checks whether this recipe can be applied in `state`.
    ///
    /// Every consumed amount must be available and every required item must
    /// be held at least once. Produced amounts must not push a quantity past
    /// `u32::MAX`.
    pub fn check(&self, state: &State) -> bool {
        self.consumes
            .iter()
            .all(|&(item, amount)| state.get(item) >= amount)
            && self.requires.iter().all(|&item| state.get(item) >= 1)
            && self
                .produces
                .iter()
                .all(|&(item, amount)| state.get(item).checked_add(amount).is_some())
    }

    /// Applies this recipe to `state`, returning the resulting state.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::PreconditionNotMet`] if [`Recipe::check`] fails.
    pub fn apply(&self, state: &State) -> Result<State> {
        if !self.check(state) {
            return Err(PlanError::PreconditionNotMet(self.name.clone()));
        }
        Ok(self.transition(state))
    }

    /// Builds the successor of a state that already passed [`Recipe::check`].
    pub(crate) fn transition(&self, state: &State) -> State {
        let mut next = state.clone();
        for &(item, amount) in &self.produces {
            next.add(item, amount);
        }
        for &(item, amount) in &self.consumes {
            next.remove(item, amount);
        }
        next
    }
}
