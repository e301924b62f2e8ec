//! # Heuristic strategies
//!
//! A [`Heuristic`] scores one edge of the search graph. The score is added to
//! the accumulated path cost to form the frontier priority, so lower scores
//! are explored sooner. Scores need not be admissible: they may be negative
//! to pull an edge forward, or [`DISCOURAGED`] to push it behind every finite
//! alternative.
//!
//! Strategies are swappable without touching the search engine:
//!
//! * [`ZeroHeuristic`] turns the search into uniform-cost search
//! * [`CraftingHeuristic`] encodes crafting tie-break policy from a
//!   [`CraftingPolicy`]
//! * any `Fn(&State, &State, &Recipe, &HeuristicContext) -> f64` closure
//!
//! ```
//! use craftplan::{Heuristic, HeuristicContext, Recipe, State};
//!
//! // Prefer recipes that consume something over ones that only gather.
//! let prefer_crafting = |_next: &State, _prev: &State, recipe: &Recipe, _ctx: &HeuristicContext| {
//!     if recipe.consumes().is_empty() { 5.0 } else { 0.0 }
//! };
//! let boxed: Box<dyn Heuristic> = Box::new(prefer_crafting);
//! ```

use crate::goal::Goal;
use crate::recipe::Recipe;
use crate::state::ItemId;
use crate::{Items, Problem, State};

/// Score that keeps an edge behind every finite-priority alternative.
pub const DISCOURAGED: f64 = f64::INFINITY;

/// Facts derived once per search run and handed to every heuristic call.
#[derive(Debug, Clone)]
pub struct HeuristicContext {
    items: Items,
    goal: Goal,
    goal_mask: Vec<bool>,
}

impl HeuristicContext {
    pub fn new(problem: &Problem) -> Self {
        let mut goal_mask = vec![false; problem.items().len()];
        for &(item, _) in problem.goal().requirements() {
            goal_mask[item.index()] = true;
        }
        Self {
            items: problem.items().clone(),
            goal: problem.goal().clone(),
            goal_mask,
        }
    }

    pub fn items(&self) -> &Items {
        &self.items
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    /// True if the goal puts a lower bound on `item`.
    pub fn goal_requires(&self, item: ItemId) -> bool {
        self.goal_mask.get(item.index()).copied().unwrap_or(false)
    }
}

/// A pluggable scoring function biasing exploration order.
pub trait Heuristic: Send + Sync {
    /// Scores the edge `prev --recipe--> next`.
    fn score(&self, next: &State, prev: &State, recipe: &Recipe, ctx: &HeuristicContext) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(&State, &State, &Recipe, &HeuristicContext) -> f64 + Send + Sync,
{
    fn score(&self, next: &State, prev: &State, recipe: &Recipe, ctx: &HeuristicContext) -> f64 {
        self(next, prev, recipe, ctx)
    }
}

/// Zero heuristic, for plain uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn score(&self, _next: &State, _prev: &State, _recipe: &Recipe, _ctx: &HeuristicContext) -> f64 {
        0.0
    }
}

/// Named crafting policy, resolved against an item universe by
/// [`CraftingHeuristic::new`].
///
/// Names that are not part of the universe are ignored, so one policy can be
/// shared across rulesets that use only part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct CraftingPolicy {
    /// Items worth holding at most once.
    pub tools: Vec<String>,
    /// Tool families, weakest tier first.
    pub tiers: Vec<Vec<String>>,
    /// Tools that unlock whole branches of the recipe graph.
    pub stations: Vec<String>,
    /// Byproducts that should be turned into something else right away.
    pub intermediates: Vec<String>,
    /// Soft caps on speculative accumulation.
    pub caps: Vec<(String, u32)>,
    pub station_bonus: f64,
    pub goal_tool_bonus: f64,
    pub intermediate_bonus: f64,
    pub cap_penalty: f64,
}

impl CraftingPolicy {
    /// Tuning for Minecraft-style crafting rules.
    pub fn minecraft() -> Self {
        fn names(names: &[&str]) -> Vec<String> {
            names.iter().map(|n| n.to_string()).collect()
        }

        Self {
            tools: names(&[
                "bench",
                "furnace",
                "cart",
                "wooden_pickaxe",
                "stone_pickaxe",
                "iron_pickaxe",
                "wooden_axe",
                "stone_axe",
                "iron_axe",
            ]),
            tiers: vec![
                names(&["wooden_pickaxe", "stone_pickaxe", "iron_pickaxe"]),
                names(&["wooden_axe", "stone_axe", "iron_axe"]),
            ],
            stations: names(&["bench", "furnace"]),
            intermediates: names(&["ore", "coal"]),
            caps: [
                ("wood", 1),
                ("plank", 4),
                ("stick", 4),
                ("cobble", 8),
                ("coal", 1),
                ("ore", 1),
                ("ingot", 6),
            ]
            .iter()
            .map(|&(name, cap)| (name.to_string(), cap))
            .collect(),
            station_bonus: -1000.0,
            goal_tool_bonus: -100.0,
            intermediate_bonus: -100.0,
            cap_penalty: 100.0,
        }
    }
}

impl Default for CraftingPolicy {
    fn default() -> Self {
        Self::minecraft()
    }
}

/// Crafting tie-break policy over resolved item ids.
///
/// Hard exclusions return [`DISCOURAGED`]:
/// * producing a tool that is already held in the quantity the goal asks
///   for (one, when the goal does not mention it)
/// * using a tool while a stronger tier of the same family is held
///
/// Everything else adds up:
/// * first acquisition of a station earns `station_bonus`
/// * first acquisition of a tool the goal asks for earns `goal_tool_bonus`
/// * consuming an intermediate earns `intermediate_bonus`
/// * each capped item held above its cap adds `cap_penalty`
#[derive(Debug, Clone)]
pub struct CraftingHeuristic {
    tools: Vec<ItemId>,
    // (tool, stronger tools of the same family)
    stronger: Vec<(ItemId, Vec<ItemId>)>,
    stations: Vec<ItemId>,
    intermediates: Vec<ItemId>,
    caps: Vec<(ItemId, u32)>,
    station_bonus: f64,
    goal_tool_bonus: f64,
    intermediate_bonus: f64,
    cap_penalty: f64,
}

impl CraftingHeuristic {
    pub fn new(items: &Items, policy: &CraftingPolicy) -> Self {
        let resolve = |names: &Vec<String>| -> Vec<ItemId> {
            names.iter().filter_map(|name| items.id(name)).collect()
        };

        let mut stronger = Vec::new();
        for family in &policy.tiers {
            let family = resolve(family);
            for (tier, &tool) in family.iter().enumerate() {
                let better = family[tier + 1..].to_vec();
                if !better.is_empty() {
                    stronger.push((tool, better));
                }
            }
        }

        let heuristic = Self {
            tools: resolve(&policy.tools),
            stronger,
            stations: resolve(&policy.stations),
            intermediates: resolve(&policy.intermediates),
            caps: policy
                .caps
                .iter()
                .filter_map(|(name, cap)| items.id(name).map(|id| (id, *cap)))
                .collect(),
            station_bonus: policy.station_bonus,
            goal_tool_bonus: policy.goal_tool_bonus,
            intermediate_bonus: policy.intermediate_bonus,
            cap_penalty: policy.cap_penalty,
        };
        log::debug!(
            "Crafting heuristic tracks {} tools, {} tiered tools, {} caps",
            heuristic.tools.len(),
            heuristic.stronger.len(),
            heuristic.caps.len()
        );
        heuristic
    }

    /// Minecraft tuning resolved against `items`.
    pub fn minecraft(items: &Items) -> Self {
        Self::new(items, &CraftingPolicy::minecraft())
    }

    fn is_excluded(
        &self,
        next: &State,
        prev: &State,
        recipe: &Recipe,
        ctx: &HeuristicContext,
    ) -> bool {
        let duplicate_tool = self.tools.iter().any(|&tool| {
            let wanted = ctx.goal().required(tool).unwrap_or(1).max(1);
            prev.get(tool) >= 1 && recipe.is_producer_of(tool) && next.get(tool) > wanted
        });

        let weaker_tier = self.stronger.iter().any(|(tool, better)| {
            recipe.is_gated_by(*tool) && better.iter().any(|&b| prev.get(b) >= 1)
        });

        duplicate_tool || weaker_tier
    }
}

impl Heuristic for CraftingHeuristic {
    fn score(&self, next: &State, prev: &State, recipe: &Recipe, ctx: &HeuristicContext) -> f64 {
        if self.is_excluded(next, prev, recipe, ctx) {
            return DISCOURAGED;
        }

        let mut value = 0.0;

        for &tool in &self.tools {
            if prev.get(tool) == 0 && next.get(tool) > 0 {
                if self.stations.contains(&tool) {
                    value += self.station_bonus;
                } else if ctx.goal_requires(tool) {
                    value += self.goal_tool_bonus;
                }
            }
        }

        if self.intermediates.iter().any(|&item| recipe.is_consumer_of(item)) {
            value += self.intermediate_bonus;
        }

        for &(item, cap) in &self.caps {
            if next.get(item) > cap && !ctx.goal_requires(item) {
                value += self.cap_penalty;
            }
        }

        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecipeDef, RuleSet};

    fn problem() -> Problem {
        RuleSet::new([
            "bench",
            "wood",
            "plank",
            "stick",
            "cobble",
            "ore",
            "coal",
            "ingot",
            "furnace",
            "wooden_pickaxe",
            "stone_pickaxe",
        ])
        .goal("stone_pickaxe", 1)
        .recipe("punch for wood", RecipeDef::new(4.0).produces("wood", 1))
        .recipe(
            "craft bench",
            RecipeDef::new(1.0).consumes("plank", 4).produces("bench", 1),
        )
        .recipe(
            "craft stone_pickaxe at bench",
            RecipeDef::new(1.0)
                .requires("bench")
                .consumes("cobble", 3)
                .consumes("stick", 2)
                .produces("stone_pickaxe", 1),
        )
        .recipe(
            "wooden_pickaxe for cobble",
            RecipeDef::new(4.0).requires("wooden_pickaxe").produces("cobble", 1),
        )
        .recipe(
            "smelt ore in furnace",
            RecipeDef::new(5.0)
                .requires("furnace")
                .consumes("coal", 1)
                .consumes("ore", 1)
                .produces("ingot", 1),
        )
        .compile()
        .unwrap()
    }

    fn score(problem: &Problem, prev: &State, recipe: &str) -> f64 {
        let ctx = HeuristicContext::new(problem);
        let heuristic = CraftingHeuristic::minecraft(problem.items());
        let recipe = problem.recipe(recipe).unwrap();
        let next = recipe.apply(prev).unwrap();
        heuristic.score(&next, prev, recipe, &ctx)
    }

    #[test]
    fn test_zero_heuristic() {
        let problem = problem();
        let ctx = HeuristicContext::new(&problem);
        let start = problem.initial_state();
        let recipe = problem.recipe("punch for wood").unwrap();
        let next = recipe.apply(start).unwrap();
        assert_eq!(ZeroHeuristic.score(&next, start, recipe, &ctx), 0.0);
    }

    #[test]
    fn test_closure_is_a_heuristic() {
        let problem = problem();
        let ctx = HeuristicContext::new(&problem);
        let by_cost = |_: &State, _: &State, recipe: &Recipe, _: &HeuristicContext| recipe.cost() * 2.0;
        let start = problem.initial_state();
        let recipe = problem.recipe("punch for wood").unwrap();
        let next = recipe.apply(start).unwrap();
        assert_eq!(by_cost.score(&next, start, recipe, &ctx), 8.0);
    }

    #[test]
    fn test_context_goal_mask() {
        let problem = problem();
        let ctx = HeuristicContext::new(&problem);
        assert!(ctx.goal_requires(problem.items().id("stone_pickaxe").unwrap()));
        assert!(!ctx.goal_requires(problem.items().id("bench").unwrap()));
    }

    #[test]
    fn test_station_bonus() {
        let problem = problem();
        let prev = problem.items().state_from([("plank", 4)]).unwrap();
        assert_eq!(score(&problem, &prev, "craft bench"), -1000.0);
    }

    #[test]
    fn test_duplicate_tool_discouraged() {
        let problem = problem();
        let prev = problem
            .items()
            .state_from([("plank", 4), ("bench", 1)])
            .unwrap();
        assert_eq!(score(&problem, &prev, "craft bench"), DISCOURAGED);
    }

    #[test]
    fn test_duplicate_tool_allowed_up_to_goal_quantity() {
        let problem = RuleSet::new(["wood", "bench"])
            .goal("bench", 2)
            .recipe(
                "craft bench",
                RecipeDef::new(1.0).consumes("wood", 1).produces("bench", 1),
            )
            .compile()
            .unwrap();

        let prev = problem
            .items()
            .state_from([("wood", 1), ("bench", 1)])
            .unwrap();
        assert_eq!(score(&problem, &prev, "craft bench"), 0.0);

        let prev = problem
            .items()
            .state_from([("wood", 1), ("bench", 2)])
            .unwrap();
        assert_eq!(score(&problem, &prev, "craft bench"), DISCOURAGED);
    }

    #[test]
    fn test_weaker_tier_discouraged() {
        let problem = problem();
        let prev = problem
            .items()
            .state_from([("wooden_pickaxe", 1), ("stone_pickaxe", 1)])
            .unwrap();
        assert_eq!(score(&problem, &prev, "wooden_pickaxe for cobble"), DISCOURAGED);

        let prev = problem.items().state_from([("wooden_pickaxe", 1)]).unwrap();
        assert_eq!(score(&problem, &prev, "wooden_pickaxe for cobble"), 0.0);
    }

    #[test]
    fn test_goal_tool_bonus() {
        let problem = problem();
        let prev = problem
            .items()
            .state_from([("bench", 1), ("cobble", 3), ("stick", 2)])
            .unwrap();
        assert_eq!(score(&problem, &prev, "craft stone_pickaxe at bench"), -100.0);
    }

    #[test]
    fn test_intermediate_bonus() {
        let problem = problem();
        let prev = problem
            .items()
            .state_from([("furnace", 1), ("coal", 1), ("ore", 1)])
            .unwrap();
        assert_eq!(score(&problem, &prev, "smelt ore in furnace"), -100.0);
    }

    #[test]
    fn test_accumulation_cap_penalty() {
        let problem = problem();
        let prev = problem.items().state_from([("wood", 1)]).unwrap();
        assert_eq!(score(&problem, &prev, "punch for wood"), 100.0);

        let prev = problem.items().empty_state();
        assert_eq!(score(&problem, &prev, "punch for wood"), 0.0);
    }

    #[test]
    fn test_policy_ignores_unknown_names() {
        let items = Items::new(["wood"]).unwrap();
        let heuristic = CraftingHeuristic::minecraft(&items);
        assert!(heuristic.tools.is_empty());
        assert!(heuristic.stronger.is_empty());
        assert_eq!(heuristic.caps.len(), 1);
    }
}
