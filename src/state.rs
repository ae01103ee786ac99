//! # World state for Goal-Oriented Action Planning (GOAP)
//!
//! This module provides [`WorldState`], the boolean snapshot the planner reasons
//! about, and the [`Fact`] trait for the symbolic keys it is indexed by.
//!
//! A `WorldState` plays several roles in the planner:
//!
//! - **Snapshot**: what the agent currently believes about the world
//! - **Goal**: the facts the agent wants to hold, as a partial assignment
//! - **Preconditions**: facts that must hold before an action can run
//! - **Effects**: facts an action overwrites once it has run
//!
//! A fact missing from a state is *unknown*, not false. A state only satisfies
//! a partial assignment when it holds every listed fact with the listed value.
//!
//! ## Basic Usage
//!
//! ```
//! use goap_planner::{world_state, WorldState};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
//! enum Guard {
//!     SeeTarget,
//!     TargetCaught,
//! }
//!
//! let mut current: WorldState<Guard> = world_state![Guard::SeeTarget => true];
//! let goal = world_state![Guard::TargetCaught => true];
//! assert!(!current.satisfies(&goal));
//!
//! current.set(Guard::TargetCaught, true);
//! assert!(current.satisfies(&goal));
//! assert_eq!(current.get(Guard::SeeTarget), Some(true));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

/// A symbolic identifier for a boolean world fact.
///
/// Facts are meant to come from a small, closed set, so the usual choice is a
/// fieldless enum deriving `Copy`, `Eq`, `Hash` and `Ord`. Any such type is a
/// `Fact` automatically; the planner never looks inside it.
pub trait Fact: Copy + Eq + Hash + Ord + fmt::Debug {}

impl<T> Fact for T where T: Copy + Eq + Hash + Ord + fmt::Debug {}

/// A mapping from facts to boolean values.
///
/// The same type is used for full snapshots and for partial assignments
/// (goals, preconditions and effects). Entries are kept ordered by fact so
/// iteration and formatting are stable between runs.
///
/// # Examples
///
/// ```
/// use goap_planner::WorldState;
///
/// let mut state = WorldState::new();
/// state.set("door_open", false);
/// state.set("has_key", true);
///
/// assert_eq!(state.get("has_key"), Some(true));
/// assert_eq!(state.get("window_open"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorldState<F: Fact> {
    facts: BTreeMap<F, bool>,
}

impl<F: Fact> WorldState<F> {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self {
            facts: BTreeMap::new(),
        }
    }

    /// Returns the value of `fact`, or `None` when the state says nothing about it.
    ///
    /// Absent facts are never defaulted to `false`; a caller that needs a
    /// value must handle the `None` case.
    pub fn get(&self, fact: F) -> Option<bool> {
        self.facts.get(&fact).copied()
    }

    /// Returns `true` if `fact` is present with exactly `value`.
    pub fn is_set(&self, fact: F, value: bool) -> bool {
        self.get(fact) == Some(value)
    }

    /// Returns `true` if the state holds any value for `fact`.
    pub fn contains(&self, fact: F) -> bool {
        self.facts.contains_key(&fact)
    }

    /// Inserts `fact` with `value`, overwriting any previous value.
    pub fn set(&mut self, fact: F, value: bool) {
        self.facts.insert(fact, value);
    }

    /// Forgets `fact`, returning its previous value.
    pub fn remove(&mut self, fact: F) -> Option<bool> {
        self.facts.remove(&fact)
    }

    /// Number of facts with a known value.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Iterates over `(fact, value)` pairs in fact order.
    pub fn iter(&self) -> impl Iterator<Item = (F, bool)> + '_ {
        self.facts.iter().map(|(fact, value)| (*fact, *value))
    }

    /// Checks whether this state satisfies a partial assignment.
    ///
    /// Every fact in `partial` must be present here with the same value. Facts
    /// missing from this state fail the check. An empty `partial` is always
    /// satisfied.
    ///
    /// # Examples
    ///
    /// ```
    /// use goap_planner::WorldState;
    ///
    /// let mut state = WorldState::new();
    /// state.set("has_key", true);
    /// state.set("door_open", false);
    ///
    /// let mut goal = WorldState::new();
    /// assert!(state.satisfies(&goal));
    ///
    /// goal.set("door_open", true);
    /// assert!(!state.satisfies(&goal));
    ///
    /// let mut unknown = WorldState::new();
    /// unknown.set("lights_on", false);
    /// assert!(!state.satisfies(&unknown));
    /// ```
    pub fn satisfies(&self, partial: &WorldState<F>) -> bool {
        partial
            .facts
            .iter()
            .all(|(fact, value)| self.facts.get(fact) == Some(value))
    }

    /// Returns the part of `partial` that this state does not satisfy.
    ///
    /// The result is empty exactly when `self.satisfies(partial)`.
    pub fn unsatisfied(&self, partial: &WorldState<F>) -> WorldState<F> {
        partial
            .iter()
            .filter(|(fact, value)| !self.is_set(*fact, *value))
            .collect()
    }

    /// Overwrites this state with every fact in `effects`.
    pub fn apply(&mut self, effects: &WorldState<F>) {
        self.facts.extend(effects.iter());
    }

    /// Returns a copy of this state with `effects` applied.
    pub fn with_applied(&self, effects: &WorldState<F>) -> WorldState<F> {
        let mut next = self.clone();
        next.apply(effects);
        next
    }
}

impl<F: Fact> Default for WorldState<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Fact> FromIterator<(F, bool)> for WorldState<F> {
    fn from_iter<I: IntoIterator<Item = (F, bool)>>(iter: I) -> Self {
        Self {
            facts: iter.into_iter().collect(),
        }
    }
}

impl<F: Fact> Extend<(F, bool)> for WorldState<F> {
    fn extend<I: IntoIterator<Item = (F, bool)>>(&mut self, iter: I) {
        self.facts.extend(iter);
    }
}

impl<F: Fact, const N: usize> From<[(F, bool); N]> for WorldState<F> {
    fn from(pairs: [(F, bool); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<F: Fact> fmt::Display for WorldState<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (fact, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {}", fact, value)?;
            first = false;
        }
        write!(f, "}}")
    }
}

/// Builds a [`WorldState`] from `fact => value` pairs.
///
/// ```
/// use goap_planner::world_state;
///
/// let state = world_state!["armed" => true, "alert" => false];
/// assert_eq!(state.get("armed"), Some(true));
/// assert_eq!(state.len(), 2);
/// ```
#[macro_export]
macro_rules! world_state {
    () => {
        $crate::WorldState::new()
    };
    ($($fact:expr => $value:expr),+ $(,)?) => {{
        let mut state = $crate::WorldState::new();
        $(state.set($fact, $value);)+
        state
    }};
}
