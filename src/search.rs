use crate::heuristic::{Heuristic, HeuristicContext, ZeroHeuristic};
use crate::{PlanError, Problem, Result, State};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// One step of a plan: the recipe taken and the state it led to.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanStep {
    pub state: State,
    pub action: String,
    pub cost: f64,
}

/// Counters describing one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchStats {
    /// Distinct states whose successors were generated.
    pub expanded: usize,
    /// Successor states produced by the successor generator.
    pub generated: usize,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

/// An ordered sequence of recipe applications reaching a goal state.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    start: State,
    steps: Vec<PlanStep>,
    stats: SearchStats,
}

impl Plan {
    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of the edge costs along the plan.
    pub fn total_cost(&self) -> f64 {
        self.steps.iter().map(|step| step.cost).sum()
    }

    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.action.as_str())
    }

    /// The goal state reached by the plan; the start state for an empty plan.
    pub fn final_state(&self) -> &State {
        self.steps.last().map_or(&self.start, |step| &step.state)
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

/// How a search run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// A goal state was popped from the frontier.
    Found(Plan),
    /// The deadline passed before a goal state was found.
    TimedOut(SearchStats),
    /// Every reachable state was explored without reaching the goal.
    Exhausted(SearchStats),
}

impl SearchOutcome {
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            SearchOutcome::Found(plan) => Some(plan),
            _ => None,
        }
    }

    pub fn into_plan(self) -> Option<Plan> {
        match self {
            SearchOutcome::Found(plan) => Some(plan),
            _ => None,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Found(plan) => plan.stats(),
            SearchOutcome::TimedOut(stats) | SearchOutcome::Exhausted(stats) => stats,
        }
    }
}

/// A discovered state with its best-known path.
#[derive(Debug)]
struct Node {
    state: Rc<State>,
    /// Predecessor on the best path found so far; `None` only for the start.
    parent: Option<usize>,
    /// Index of the recipe that produced this state from `parent`.
    recipe: Option<usize>,
    g_cost: f64,
    expanded: bool,
}

/// A frontier entry; ordered by priority, then by state, then by path cost.
#[derive(Debug)]
struct FrontierEntry {
    priority: f64,
    g_cost: f64,
    state: Rc<State>,
    idx: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.state.cmp(&other.state))
            .then_with(|| self.g_cost.total_cmp(&other.g_cost))
    }
}

/// Bookkeeping owned by a single search run.
struct SearchContext {
    nodes: Vec<Node>,
    index: HashMap<Rc<State>, usize>,
    open_set: BinaryHeap<Reverse<FrontierEntry>>,
    stats: SearchStats,
}

impl SearchContext {
    fn new(initial_state: &State) -> Self {
        let state = Rc::new(initial_state.clone());
        let mut index = HashMap::new();
        index.insert(Rc::clone(&state), 0);

        let mut open_set = BinaryHeap::new();
        open_set.push(Reverse(FrontierEntry {
            priority: 0.0,
            g_cost: 0.0,
            state: Rc::clone(&state),
            idx: 0,
        }));

        Self {
            nodes: vec![Node {
                state,
                parent: None,
                recipe: None,
                g_cost: 0.0,
                expanded: false,
            }],
            index,
            open_set,
            stats: SearchStats::default(),
        }
    }

    /// Pops the best live entry, skipping entries superseded by a cheaper path.
    fn next_node(&mut self) -> Option<usize> {
        while let Some(Reverse(entry)) = self.open_set.pop() {
            if entry.g_cost <= self.nodes[entry.idx].g_cost {
                return Some(entry.idx);
            }
        }
        None
    }

    fn mark_expanded(&mut self, idx: usize) {
        let node = &mut self.nodes[idx];
        if !node.expanded {
            node.expanded = true;
            self.stats.expanded += 1;
        }
    }

    /// Records `state` as reached from `parent` via `recipe` at `g_cost` and
    /// queues it, unless an equal or cheaper path is already known.
    fn relax(&mut self, state: State, parent: usize, recipe: usize, g_cost: f64, h_cost: f64) {
        let idx = match self.index.get(&state) {
            Some(&idx) => {
                let node = &mut self.nodes[idx];
                if g_cost >= node.g_cost {
                    return;
                }
                node.g_cost = g_cost;
                node.parent = Some(parent);
                node.recipe = Some(recipe);
                idx
            }
            None => {
                let idx = self.nodes.len();
                let state = Rc::new(state);
                self.index.insert(Rc::clone(&state), idx);
                self.nodes.push(Node {
                    state,
                    parent: Some(parent),
                    recipe: Some(recipe),
                    g_cost,
                    expanded: false,
                });
                idx
            }
        };

        let mut priority = g_cost + h_cost;
        if priority.is_nan() {
            priority = f64::INFINITY;
        }
        self.open_set.push(Reverse(FrontierEntry {
            priority,
            g_cost,
            state: Rc::clone(&self.nodes[idx].state),
            idx,
        }));
    }

    /// Walks predecessor links from `goal_idx` back to the start.
    fn reconstruct_path(&self, problem: &Problem, goal_idx: usize) -> Result<Vec<PlanStep>> {
        let mut path = Vec::new();
        let mut current = goal_idx;

        while let Some(parent) = self.nodes[current].parent {
            if path.len() >= self.nodes.len() {
                return Err(PlanError::PredecessorCycle(path.len()));
            }
            let node = &self.nodes[current];
            let recipe = node
                .recipe
                .map(|r| &problem.recipes()[r])
                .ok_or(PlanError::PredecessorCycle(path.len()))?;
            path.push(PlanStep {
                state: State::clone(&node.state),
                action: recipe.name().to_string(),
                cost: recipe.cost(),
            });
            current = parent;
        }

        path.reverse();
        Ok(path)
    }
}

/// Time-bounded best-first search over the state graph of a [`Problem`].
///
/// Frontier priority is accumulated cost plus the heuristic score of the edge
/// that reached the state. With [`ZeroHeuristic`] this is uniform-cost
/// search and plans are cost-optimal; with an inadmissible heuristic it trades
/// optimality for speed.
pub struct BestFirstSearch {
    heuristic: Box<dyn Heuristic>,
}

impl BestFirstSearch {
    pub fn new(heuristic: Box<dyn Heuristic>) -> Self {
        Self { heuristic }
    }

    /// Searches for a plan, checking the deadline once per frontier pop.
    ///
    /// Running out of time or out of states is reported through
    /// [`SearchOutcome`], not as an error.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::PredecessorCycle`] if the predecessor links of the
    /// goal state do not lead back to the start. This indicates an engine bug.
    pub fn search(&self, problem: &Problem, time_limit: Duration) -> Result<SearchOutcome> {
        let start = Instant::now();
        let ctx = HeuristicContext::new(problem);
        let mut context = SearchContext::new(problem.initial_state());

        log::debug!(
            "Starting search over {} recipes with a {:?} limit",
            problem.recipes().len(),
            time_limit
        );

        loop {
            if start.elapsed() >= time_limit {
                context.stats.elapsed = start.elapsed();
                log::info!(
                    "Search timed out after {:?} ({} states expanded)",
                    context.stats.elapsed,
                    context.stats.expanded
                );
                return Ok(SearchOutcome::TimedOut(context.stats));
            }

            let Some(current_idx) = context.next_node() else {
                context.stats.elapsed = start.elapsed();
                log::info!(
                    "Search exhausted the frontier after {} states",
                    context.stats.expanded
                );
                return Ok(SearchOutcome::Exhausted(context.stats));
            };

            let current = Rc::clone(&context.nodes[current_idx].state);
            let current_cost = context.nodes[current_idx].g_cost;

            if problem.is_goal(&current) {
                let steps = context.reconstruct_path(problem, current_idx)?;
                context.stats.elapsed = start.elapsed();
                log::info!(
                    "Found plan of {} actions with cost {} in {:?} ({} states expanded)",
                    steps.len(),
                    current_cost,
                    context.stats.elapsed,
                    context.stats.expanded
                );
                return Ok(SearchOutcome::Found(Plan {
                    start: problem.initial_state().clone(),
                    steps,
                    stats: context.stats,
                }));
            }

            context.mark_expanded(current_idx);
            log::trace!("Expanding state at cost {}", current_cost);

            for successor in problem.successors(&current) {
                let h_cost = self
                    .heuristic
                    .score(&successor.state, &current, successor.recipe, &ctx);
                context.stats.generated += 1;
                context.relax(
                    successor.state,
                    current_idx,
                    successor.index,
                    current_cost + successor.cost,
                    h_cost,
                );
            }
        }
    }
}

impl Default for BestFirstSearch {
    fn default() -> Self {
        Self::new(Box::new(ZeroHeuristic))
    }
}
