//! # Planner Module for Goal-Oriented Action Planning (GOAP)
//!
//! The planner is the entry point of the crate. It owns the actions an agent
//! can perform and turns a world snapshot plus a goal into a [`Plan`]:
//!
//! 1. Every registered action is reset, so targets left over from an
//!    abandoned plan never leak into the new one
//! 2. The search expands every achievable action from the snapshot, never
//!    repeating an action along a path
//! 3. The cheapest goal-satisfying path is returned, or `None` if there is none
//!
//! ## Basic Usage
//!
//! ```
//! use goap_planner::{world_state, BasicAction, Planner};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
//! enum Guard {
//!     SeeTarget,
//!     TargetCaught,
//!     AtWaypoint,
//!     PatrolComplete,
//! }
//!
//! let catch = BasicAction::new("catch_target", 1.0)
//!     .unwrap()
//!     .with_precondition(Guard::SeeTarget, true)
//!     .with_effect(Guard::TargetCaught, true);
//! let patrol = BasicAction::new("patrol", 1.0)
//!     .unwrap()
//!     .with_precondition(Guard::AtWaypoint, false)
//!     .with_effect(Guard::AtWaypoint, true)
//!     .with_effect(Guard::PatrolComplete, true);
//!
//! let mut planner = Planner::new(vec![catch, patrol]);
//!
//! let current = world_state![Guard::SeeTarget => true, Guard::AtWaypoint => false];
//! let goal = world_state![Guard::TargetCaught => true];
//!
//! let plan = planner.plan(&current, &goal).unwrap().expect("target is visible");
//! assert_eq!(plan.names(), ["catch_target"]);
//! assert_eq!(plan.cost(), 1.0);
//!
//! // Without sight of the target there is no way to catch it
//! let current = world_state![Guard::SeeTarget => false, Guard::AtWaypoint => false];
//! assert!(planner.plan(&current, &goal).unwrap().is_none());
//! ```

use std::marker::PhantomData;

use crate::action::Action;
use crate::plan::Plan;
use crate::search::{self, SearchStats};
use crate::state::{Fact, WorldState};
use crate::{GoapError, Result};

/// Limits applied to a planning call.
///
/// The default places no limits, which searches the whole tree.
///
/// # Examples
///
/// ```
/// use goap_planner::PlannerConfig;
///
/// let config = PlannerConfig::new().with_max_depth(4).with_max_nodes(10_000);
/// assert_eq!(config.max_depth, Some(4));
/// assert_eq!(config.max_nodes, Some(10_000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Paths longer than this many actions are treated as dead ends
    pub max_depth: Option<usize>,
    /// Most nodes a search may create, root included. Planning fails with
    /// [`GoapError::SearchLimitExceeded`] when the search needs one more
    pub max_nodes: Option<usize>,
}

impl PlannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }
}

/// The core planning component in a GOAP system.
///
/// A `Planner` holds the actions an agent has registered and finds the
/// cheapest sequence of them that transforms a world snapshot into one
/// satisfying a goal. Plans refer to actions by their index in
/// [`actions`](Planner::actions); adding keeps existing indices, removing shifts
/// the ones after the removed action, so plans computed earlier go stale and
/// [`Plan::actions`](crate::Plan::actions) rejects them.
///
/// Planning takes `&mut self` because it resets every action first.
///
/// # Performance Considerations
///
/// The search visits every ordering of achievable actions without merging
/// equal states, so its cost grows exponentially with the number of actions.
/// It is meant for sets of tens of actions. Use
/// [`PlannerConfig::with_max_nodes`] to put a hard bound on a single call.
pub struct Planner<F: Fact, A: Action<F>> {
    actions: Vec<A>,
    config: PlannerConfig,
    _fact: PhantomData<fn() -> F>,
}

impl<F: Fact, A: Action<F>> Planner<F, A> {
    /// Creates a planner over `actions` with the default configuration.
    pub fn new(actions: Vec<A>) -> Self {
        Self::with_config(actions, PlannerConfig::default())
    }

    pub fn with_config(actions: Vec<A>, config: PlannerConfig) -> Self {
        Self {
            actions,
            config,
            _fact: PhantomData,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PlannerConfig) {
        self.config = config;
    }

    /// Registered actions, in registration order.
    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    pub fn action(&self, index: usize) -> Option<&A> {
        self.actions.get(index)
    }

    /// Mutable access for the driver, e.g. to run a plan step's hooks.
    pub fn action_mut(&mut self, index: usize) -> Option<&mut A> {
        self.actions.get_mut(index)
    }

    /// Looks up the first action called `name`, returning its index too.
    pub fn find_action(&self, name: &str) -> Option<(usize, &A)> {
        self.actions
            .iter()
            .enumerate()
            .find(|(_, action)| action.name() == name)
    }

    /// Registers `action` and returns its index.
    pub fn add_action(&mut self, action: A) -> usize {
        log::debug!("Registering action '{}'", action.name());
        self.actions.push(action);
        self.actions.len() - 1
    }

    /// Unregisters the first action called `name` and hands it back.
    ///
    /// # Errors
    ///
    /// Returns [`GoapError::ActionNotFound`] if no action has that name.
    pub fn remove_action(&mut self, name: &str) -> Result<A> {
        let (index, _) = self
            .find_action(name)
            .ok_or_else(|| GoapError::ActionNotFound(name.to_string()))?;
        log::debug!("Removing action '{}'", name);
        Ok(self.actions.remove(index))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Finds the cheapest plan taking `current` to a state satisfying `goal`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(plan))` - the cheapest plan found; empty if `current` already satisfies `goal`
    /// * `Ok(None)` - no sequence of registered actions reaches `goal`
    ///
    /// Among plans of equal cost the one with fewer steps wins, then the one
    /// whose actions were registered earlier.
    ///
    /// # Errors
    ///
    /// * [`GoapError::InvalidInput`] if `goal` is empty, or if no actions are
    ///   registered and `current` does not already satisfy `goal`
    /// * [`GoapError::InvalidActionCost`] if an action reports a negative or non-finite cost
    /// * [`GoapError::SearchLimitExceeded`] if the configured node limit is reached
    ///
    /// # Examples
    ///
    /// ```
    /// use goap_planner::{world_state, BasicAction, Planner};
    ///
    /// let mut planner = Planner::new(vec![
    ///     BasicAction::new("go_to_store", 1.0)
    ///         .unwrap()
    ///         .with_precondition("at_home", true)
    ///         .with_effect("at_home", false)
    ///         .with_effect("at_store", true),
    ///     BasicAction::new("buy_food", 2.0)
    ///         .unwrap()
    ///         .with_precondition("at_store", true)
    ///         .with_precondition("has_money", true)
    ///         .with_effect("has_food", true),
    /// ]);
    ///
    /// let current = world_state!["at_home" => true, "has_money" => true];
    /// let goal = world_state!["has_food" => true];
    ///
    /// let plan = planner.plan(&current, &goal).unwrap().unwrap();
    /// assert_eq!(plan.names(), ["go_to_store", "buy_food"]);
    /// assert_eq!(plan.cost(), 3.0);
    /// ```
    pub fn plan(&mut self, current: &WorldState<F>, goal: &WorldState<F>) -> Result<Option<Plan>> {
        search::plan(&mut self.actions, current, goal, &self.config)
    }

    /// Same as [`plan`](Planner::plan), also reporting how much searching was done.
    pub fn plan_with_stats(
        &mut self,
        current: &WorldState<F>,
        goal: &WorldState<F>,
    ) -> Result<(Option<Plan>, SearchStats)> {
        search::plan_with_stats(&mut self.actions, current, goal, &self.config)
    }
}

impl<F: Fact, A: Action<F> + Clone> Clone for Planner<F, A> {
    fn clone(&self) -> Self {
        Self::with_config(self.actions.clone(), self.config.clone())
    }
}
