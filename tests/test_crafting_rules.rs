//! Planning against a full Minecraft-style crafting ruleset.

use craftplan::{
    BestFirstSearch, CraftingHeuristic, Plan, Planner, Problem, RuleSet, SearchOutcome,
    ZeroHeuristic,
};
use std::path::Path;
use std::thread;
use std::time::Duration;

const LIMIT: Duration = Duration::from_secs(30);

fn load_rules() -> RuleSet {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/crafting.json");
    RuleSet::from_path(path).expect("Failed to load crafting rules")
}

/// Rules with the goal replaced and an optional head-start inventory.
fn rules_for(goal: &str, initial: &[(&str, u32)]) -> RuleSet {
    let mut rules = load_rules();
    rules.goal.clear();
    rules.initial.clear();
    let mut rules = rules.goal(goal, 1);
    for &(item, quantity) in initial {
        rules = rules.initial(item, quantity);
    }
    rules
}

fn found(outcome: SearchOutcome) -> Plan {
    match outcome {
        SearchOutcome::Found(plan) => plan,
        other => panic!("expected a plan, got {:?}", other),
    }
}

/// Replaying the actions must reproduce every reported state.
fn assert_replays(problem: &Problem, plan: &Plan) {
    let mut state = problem.initial_state().clone();
    for step in plan.steps() {
        let recipe = problem.recipe(&step.action).expect("plan names a known recipe");
        state = recipe.apply(&state).expect("plan step is applicable");
        assert_eq!(state, step.state, "state after '{}'", step.action);
        assert_eq!(step.cost, recipe.cost());
    }
    assert!(problem.is_goal(&state));
    assert_eq!(problem.replay(plan.actions()).unwrap(), state);
}

#[test]
fn test_load_fixture() {
    let problem = load_rules().compile().unwrap();
    assert_eq!(problem.items().len(), 17);
    assert_eq!(problem.recipes().len(), 25);
    assert_eq!(problem.recipes()[0].name(), "craft wooden_pickaxe at bench");
    assert_eq!(problem.recipes()[24].name(), "iron_pickaxe for coal");
    assert_eq!(problem.initial_state(), &problem.items().empty_state());
}

#[test]
fn test_wooden_pickaxe_from_scratch_is_optimal() {
    let problem = rules_for("wooden_pickaxe", &[]).compile().unwrap();
    let plan = found(BestFirstSearch::default().search(&problem, LIMIT).unwrap());

    // Three punches, three plank crafts, bench, sticks, pickaxe.
    assert_eq!(plan.total_cost(), 18.0);
    assert_eq!(plan.len(), 9);
    assert_eq!(plan.actions().filter(|a| *a == "punch for wood").count(), 3);
    assert_replays(&problem, &plan);
}

#[test]
fn test_stone_pickaxe_with_head_start() {
    let initial = [("bench", 1), ("wooden_pickaxe", 1), ("stick", 2)];
    let problem = rules_for("stone_pickaxe", &initial).compile().unwrap();
    let plan = found(BestFirstSearch::default().search(&problem, LIMIT).unwrap());

    let actions: Vec<_> = plan.actions().collect();
    assert_eq!(
        actions,
        [
            "wooden_pickaxe for cobble",
            "wooden_pickaxe for cobble",
            "wooden_pickaxe for cobble",
            "craft stone_pickaxe at bench",
        ]
    );
    assert_eq!(plan.total_cost(), 13.0);
    assert_replays(&problem, &plan);
}

#[test]
fn test_crafting_heuristic_finds_valid_plan() {
    let initial = [("bench", 1), ("wooden_pickaxe", 1), ("stick", 2)];
    let problem = rules_for("stone_pickaxe", &initial).compile().unwrap();
    let planner = Planner::new(problem)
        .with_crafting_heuristic()
        .with_time_limit(LIMIT);
    let plan = found(planner.plan().unwrap());
    assert_replays(planner.problem(), &plan);
}

#[test]
fn test_search_is_deterministic() {
    let problem = rules_for("wooden_pickaxe", &[]).compile().unwrap();
    let search = BestFirstSearch::default();
    let first = found(search.search(&problem, LIMIT).unwrap());
    let second = found(search.search(&problem, LIMIT).unwrap());
    assert_eq!(first.steps(), second.steps());
    assert_eq!(first.stats().expanded, second.stats().expanded);
    assert_eq!(first.stats().generated, second.stats().generated);
}

#[test]
fn test_crafting_heuristic_from_scratch() {
    let problem = rules_for("iron_pickaxe", &[]).compile().unwrap();
    let planner = Planner::new(problem)
        .with_crafting_heuristic()
        .with_time_limit(LIMIT);
    let plan = found(planner.plan().unwrap());

    assert!(plan.actions().any(|a| a == "craft iron_pickaxe at bench"));
    assert_replays(planner.problem(), &plan);
}

#[test]
fn test_crafting_heuristic_is_deterministic() {
    let problem = rules_for("iron_pickaxe", &[]).compile().unwrap();
    let search = BestFirstSearch::new(Box::new(CraftingHeuristic::minecraft(problem.items())));
    let first = found(search.search(&problem, LIMIT).unwrap());
    let second = found(search.search(&problem, LIMIT).unwrap());
    assert_eq!(first.steps(), second.steps());
    assert_eq!(first.stats().expanded, second.stats().expanded);
    assert_eq!(first.stats().generated, second.stats().generated);
}

#[test]
fn test_independent_searches_run_in_parallel() {
    let initial = [("bench", 1), ("wooden_pickaxe", 1), ("stick", 2)];
    let problem = rules_for("stone_pickaxe", &initial).compile().unwrap();

    let (uniform, crafting) = thread::scope(|scope| {
        let uniform = scope.spawn(|| {
            BestFirstSearch::new(Box::new(ZeroHeuristic)).search(&problem, LIMIT)
        });
        let crafting = scope.spawn(|| {
            let heuristic = CraftingHeuristic::minecraft(problem.items());
            BestFirstSearch::new(Box::new(heuristic)).search(&problem, LIMIT)
        });
        (uniform.join().unwrap(), crafting.join().unwrap())
    });

    assert_replays(&problem, &found(uniform.unwrap()));
    assert_replays(&problem, &found(crafting.unwrap()));
}
