use crate::state::ItemId;
use crate::State;

/// Minimum quantities a state must hold to count as a goal state.
///
/// Items not listed are unconstrained, so the predicate is monotone: a state
/// that dominates a goal state is itself a goal state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Goal {
    requirements: Vec<(ItemId, u32)>,
}

impl Goal {
    pub(crate) fn new(requirements: Vec<(ItemId, u32)>) -> Self {
        Self { requirements }
    }

    pub fn requirements(&self) -> &[(ItemId, u32)] {
        &self.requirements
    }

    /// Minimum quantity asked for `item`, if the goal constrains it.
    pub fn required(&self, item: ItemId) -> Option<u32> {
        self.requirements
            .iter()
            .find(|&&(id, _)| id == item)
            .map(|&(_, quantity)| quantity)
    }

    pub fn is_satisfied(&self, state: &State) -> bool {
        self.requirements
            .iter()
            .all(|&(item, quantity)| state.get(item) >= quantity)
    }
}
