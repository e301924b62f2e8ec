//! # Inventory states
//!
//! A [`State`] is a complete snapshot of inventory quantities: one count for
//! every item in the declared [`Items`] universe. States are plain values with
//! structural equality, hashing and a total order, so they can key the search
//! bookkeeping directly.
//!
//! ## Basic Usage
//!
//! ```
//! use craftplan::Items;
//!
//! let items = Items::new(["wood", "plank"]).unwrap();
//! let state = items.state_from([("wood", 1)]).unwrap();
//!
//! assert_eq!(items.quantity(&state, "wood"), 1);
//! assert_eq!(items.quantity(&state, "plank"), 0);
//! // Names outside the universe read as zero.
//! assert_eq!(items.quantity(&state, "diamond"), 0);
//! assert_eq!(state.display(&items).to_string(), "{wood: 1}");
//! ```

use crate::{PlanError, Result};
use std::collections::HashMap;
use std::fmt;

/// Dense index of an item inside an [`Items`] universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(usize);

impl ItemId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The fixed, ordered universe of item names.
///
/// Declaration order is the canonical order of every [`State`] built from
/// this universe; it drives both iteration and the state ordering used for
/// tie-breaking during search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Items {
    names: Vec<String>,
    index: HashMap<String, ItemId>,
}

impl Items {
    /// Builds a universe from item names in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::DuplicateItem`] if a name appears twice.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items = Self {
            names: Vec::new(),
            index: HashMap::new(),
        };
        for name in names {
            let name = name.into();
            if items.index.contains_key(&name) {
                return Err(PlanError::DuplicateItem(name));
            }
            items.index.insert(name.clone(), ItemId(items.names.len()));
            items.names.push(name);
        }
        Ok(items)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Looks up the id of an item name.
    pub fn id(&self, name: &str) -> Option<ItemId> {
        self.index.get(name).copied()
    }

    /// Looks up the id of an item name, reporting `context` when it is unknown.
    pub(crate) fn resolve(&self, name: &str, context: impl FnOnce() -> String) -> Result<ItemId> {
        self.id(name).ok_or_else(|| PlanError::UnknownItem {
            context: context(),
            item: name.to_string(),
        })
    }

    pub fn name(&self, id: ItemId) -> &str {
        &self.names[id.0]
    }

    /// Iterates `(id, name)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (ItemId(i), name.as_str()))
    }

    /// A state holding zero of every item.
    pub fn empty_state(&self) -> State {
        State {
            quantities: vec![0; self.names.len()].into_boxed_slice(),
        }
    }

    /// Overlays a sparse inventory on the zero-filled universe.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::UnknownItem`] for names outside the universe.
    pub fn state_from<'a, I>(&self, inventory: I) -> Result<State>
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let mut state = self.empty_state();
        for (name, quantity) in inventory {
            let id = self.resolve(name, || "inventory".to_string())?;
            state.set(id, quantity);
        }
        Ok(state)
    }

    /// Quantity of `name` in `state`; items outside the universe read as zero.
    pub fn quantity(&self, state: &State, name: &str) -> u32 {
        self.id(name).map_or(0, |id| state.get(id))
    }
}

/// A complete snapshot of inventory quantities.
///
/// Quantities are stored in the declared item order of the [`Items`] universe
/// the state was built from, so the derived `Ord` is a lexicographic
/// comparison over that canonical order and `Hash`/`Eq` are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    quantities: Box<[u32]>,
}

impl State {
    pub fn get(&self, id: ItemId) -> u32 {
        self.quantities.get(id.0).copied().unwrap_or(0)
    }

    /// Sets the quantity of an item.
    ///
    /// Only reachable through an owned state; states handed to the search
    /// are shared immutably and never change afterwards.
    pub fn set(&mut self, id: ItemId, quantity: u32) {
        self.quantities[id.0] = quantity;
    }

    /// Adds `amount`; callers must have checked the quantity stays in range.
    pub(crate) fn add(&mut self, id: ItemId, amount: u32) {
        let held = self.quantities[id.0];
        match held.checked_add(amount) {
            Some(total) => self.quantities[id.0] = total,
            None => panic!("produced {amount} of item #{} while holding {held}", id.0),
        }
    }

    /// Subtracts `amount`; callers must have checked availability first.
    pub(crate) fn remove(&mut self, id: ItemId, amount: u32) {
        let held = self.quantities[id.0];
        match held.checked_sub(amount) {
            Some(left) => self.quantities[id.0] = left,
            None => panic!("consumed {amount} of item #{} while holding {held}", id.0),
        }
    }

    pub fn quantities(&self) -> &[u32] {
        &self.quantities
    }

    /// True if every quantity of `self` is at least the matching one of `other`.
    pub fn dominates(&self, other: &State) -> bool {
        self.quantities.len() == other.quantities.len()
            && self
                .quantities
                .iter()
                .zip(other.quantities.iter())
                .all(|(a, b)| a >= b)
    }

    /// Renders the non-zero items of this state by name.
    pub fn display<'a>(&'a self, items: &'a Items) -> StateDisplay<'a> {
        StateDisplay { state: self, items }
    }
}

/// [`fmt::Display`] adapter returned by [`State::display`].
pub struct StateDisplay<'a> {
    state: &'a State,
    items: &'a Items,
}

impl fmt::Display for StateDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (id, name) in self.items.iter() {
            let quantity = self.state.get(id);
            if quantity == 0 {
                continue;
            }
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, quantity)?;
            first = false;
        }
        write!(f, "}}")
    }
}
