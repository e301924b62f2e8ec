//! # Declarative rulesets
//!
//! A [`RuleSet`] is the uncompiled description of a planning problem: the item
//! universe, the initial inventory, the goal and the recipes. It deserializes
//! from the JSON layout used by crafting rule files:
//!
//! ```json
//! {
//!   "Items": ["wood", "plank"],
//!   "Initial": {"wood": 1},
//!   "Goal": {"plank": 1},
//!   "Recipes": {
//!     "craft plank": {"Consumes": {"wood": 1}, "Produces": {"plank": 4}, "Time": 1}
//!   }
//! }
//! ```
//!
//! Rulesets can also be assembled in code:
//!
//! ```
//! use craftplan::{RecipeDef, RuleSet};
//!
//! let problem = RuleSet::new(["wood", "plank", "bench"])
//!     .goal("bench", 1)
//!     .recipe("punch for wood", RecipeDef::new(4.0).produces("wood", 1))
//!     .recipe("craft plank", RecipeDef::new(1.0).consumes("wood", 1).produces("plank", 4))
//!     .recipe("craft bench", RecipeDef::new(1.0).consumes("plank", 4).produces("bench", 1))
//!     .compile()
//!     .unwrap();
//!
//! assert_eq!(problem.recipes().len(), 3);
//! ```
//!
//! [`RuleSet::compile`] validates every item reference and every cost before
//! any search can start.

use crate::goal::Goal;
use crate::recipe::Recipe;
use crate::state::ItemId;
use crate::{Items, Problem, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The uncompiled planning problem.
///
/// Maps keep document order, which becomes the recipe declaration order the
/// successor generator iterates in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuleSet {
    pub items: Vec<String>,
    #[serde(default)]
    pub initial: IndexMap<String, u32>,
    #[serde(default)]
    pub goal: IndexMap<String, u32>,
    #[serde(default)]
    pub recipes: IndexMap<String, RecipeDef>,
}

/// Declarative definition of a single recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecipeDef {
    #[serde(default)]
    pub requires: Requires,
    #[serde(default)]
    pub consumes: IndexMap<String, u32>,
    #[serde(default)]
    pub produces: IndexMap<String, u32>,
    pub time: f64,
}

/// Items a recipe needs held but does not use up.
///
/// Accepts either a list of names or a map of name to flag; names flagged
/// `false` are not required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requires {
    Names(Vec<String>),
    Flags(IndexMap<String, bool>),
}

impl Default for Requires {
    fn default() -> Self {
        Requires::Names(Vec::new())
    }
}

impl Requires {
    pub fn names(&self) -> Vec<&str> {
        match self {
            Requires::Names(names) => names.iter().map(String::as_str).collect(),
            Requires::Flags(flags) => flags
                .iter()
                .filter(|(_, required)| **required)
                .map(|(name, _)| name.as_str())
                .collect(),
        }
    }

    fn push(&mut self, name: String) {
        match self {
            Requires::Names(names) => {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
            Requires::Flags(flags) => {
                flags.insert(name, true);
            }
        }
    }
}

impl RuleSet {
    /// Starts a ruleset over the given item universe.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parses a ruleset from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a ruleset file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded ruleset from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    pub fn initial(mut self, item: impl Into<String>, quantity: u32) -> Self {
        self.initial.insert(item.into(), quantity);
        self
    }

    pub fn goal(mut self, item: impl Into<String>, quantity: u32) -> Self {
        self.goal.insert(item.into(), quantity);
        self
    }

    /// Adds a recipe; a recipe with the same name is replaced in place.
    pub fn recipe(mut self, name: impl Into<String>, def: RecipeDef) -> Self {
        self.recipes.insert(name.into(), def);
        self
    }

    /// Compiles the ruleset into a searchable [`Problem`].
    ///
    /// # Errors
    ///
    /// * [`PlanError::DuplicateItem`](crate::PlanError::DuplicateItem) if the universe repeats a name
    /// * [`PlanError::UnknownItem`](crate::PlanError::UnknownItem) if the initial inventory, the goal or a
    ///   recipe names an item outside the universe
    /// * [`PlanError::InvalidCost`](crate::PlanError::InvalidCost) if a recipe cost is negative or not finite
    pub fn compile(&self) -> Result<Problem> {
        let items = Items::new(self.items.iter().cloned())?;

        let mut initial = items.empty_state();
        for (name, &quantity) in &self.initial {
            let id = items.resolve(name, || "initial inventory".to_string())?;
            initial.set(id, quantity);
        }

        let requirements = self
            .goal
            .iter()
            .map(|(name, &quantity)| Ok((items.resolve(name, || "goal".to_string())?, quantity)))
            .collect::<Result<Vec<_>>>()?;

        let recipes = self
            .recipes
            .iter()
            .map(|(name, def)| def.compile(name, &items))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Compiled {} recipes over {} items",
            recipes.len(),
            items.len()
        );

        Ok(Problem::new(items, recipes, initial, Goal::new(requirements)))
    }
}

impl RecipeDef {
    pub fn new(time: f64) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    pub fn requires(mut self, item: impl Into<String>) -> Self {
        self.requires.push(item.into());
        self
    }

    pub fn consumes(mut self, item: impl Into<String>, quantity: u32) -> Self {
        self.consumes.insert(item.into(), quantity);
        self
    }

    pub fn produces(mut self, item: impl Into<String>, quantity: u32) -> Self {
        self.produces.insert(item.into(), quantity);
        self
    }

    fn compile(&self, name: &str, items: &Items) -> Result<Recipe> {
        let context = || format!("recipe '{}'", name);

        let requires = self
            .requires
            .names()
            .into_iter()
            .map(|item| items.resolve(item, context))
            .collect::<Result<Vec<_>>>()?;
        let consumes = resolve_amounts(&self.consumes, items, context)?;
        let produces = resolve_amounts(&self.produces, items, context)?;

        Recipe::new(name.to_string(), self.time, requires, consumes, produces)
    }
}

fn resolve_amounts(
    amounts: &IndexMap<String, u32>,
    items: &Items,
    context: impl Fn() -> String + Copy,
) -> Result<Vec<(ItemId, u32)>> {
    amounts
        .iter()
        .map(|(item, &amount)| Ok((items.resolve(item, context)?, amount)))
        .collect()
}
