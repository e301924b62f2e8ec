//! # Compiled planning problems
//!
//! A [`Problem`] bundles everything a search needs and never changes once
//! compiled: the item universe, the recipes in declaration order, the initial
//! state and the goal. It is the implicit graph the search walks; the edges
//! out of a state come from [`Problem::successors`].

use crate::goal::Goal;
use crate::recipe::Recipe;
use crate::{Items, PlanError, Result, State};

/// One outgoing edge of the implicit state graph.
#[derive(Debug, Clone)]
pub struct Successor<'p> {
    /// Position of `recipe` in declaration order.
    pub index: usize,
    pub recipe: &'p Recipe,
    pub state: State,
    pub cost: f64,
}

#[derive(Debug, Clone)]
pub struct Problem {
    items: Items,
    recipes: Vec<Recipe>,
    initial: State,
    goal: Goal,
}

impl Problem {
    pub(crate) fn new(items: Items, recipes: Vec<Recipe>, initial: State, goal: Goal) -> Self {
        Self {
            items,
            recipes,
            initial,
            goal,
        }
    }

    pub fn items(&self) -> &Items {
        &self.items
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn initial_state(&self) -> &State {
        &self.initial
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn is_goal(&self, state: &State) -> bool {
        self.goal.is_satisfied(state)
    }

    pub fn recipe(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.name() == name)
    }

    /// Lazily yields every recipe applicable in `state`, in declaration order.
    ///
    /// The iterator holds no state beyond `state` itself, so calling this
    /// again on the same state yields the same successors in the same order.
    ///
    /// ```
    /// use craftplan::{RecipeDef, RuleSet};
    ///
    /// let problem = RuleSet::new(["wood", "plank"])
    ///     .initial("wood", 1)
    ///     .recipe("punch for wood", RecipeDef::new(4.0).produces("wood", 1))
    ///     .recipe("craft plank", RecipeDef::new(1.0).consumes("wood", 1).produces("plank", 4))
    ///     .recipe("craft bench", RecipeDef::new(1.0).consumes("plank", 4))
    ///     .compile()
    ///     .unwrap();
    ///
    /// let names: Vec<_> = problem
    ///     .successors(problem.initial_state())
    ///     .map(|s| s.recipe.name())
    ///     .collect();
    /// assert_eq!(names, ["punch for wood", "craft plank"]);
    /// ```
    pub fn successors<'p>(&'p self, state: &'p State) -> impl Iterator<Item = Successor<'p>> + 'p {
        self.recipes
            .iter()
            .enumerate()
            .filter(move |(_, recipe)| recipe.check(state))
            .map(move |(index, recipe)| Successor {
                index,
                recipe,
                state: recipe.transition(state),
                cost: recipe.cost(),
            })
    }

    /// Re-applies a sequence of recipe names from the initial state.
    ///
    /// Each step is applied with the checked [`Recipe::apply`], so replaying
    /// an invalid sequence reports the first step that cannot be taken.
    ///
    /// # Errors
    ///
    /// * [`PlanError::UnknownRecipe`] for a name no recipe carries
    /// * [`PlanError::PreconditionNotMet`] for a step whose precondition fails
    pub fn replay<'a, I>(&self, actions: I) -> Result<State>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut state = self.initial.clone();
        for action in actions {
            let recipe = self
                .recipe(action)
                .ok_or_else(|| PlanError::UnknownRecipe(action.to_string()))?;
            state = recipe.apply(&state)?;
        }
        Ok(state)
    }
}
