//! # Action Module for Goal-Oriented Action Planning (GOAP)
//!
//! Actions are the units of change the planner chains together. Each one
//! declares:
//!
//! * a **cost**, added up along a plan to compare alternatives
//! * **preconditions**, the facts that must hold before it can run
//! * **effects**, the facts it overwrites once it has run
//! * whether it needs a spatial **target** before the driver can run it
//!
//! The planner only reads the declarative half of the contract. The
//! execution hooks ([`Action::pre_perform`] and [`Action::post_perform`]) are
//! for whatever drives the plan afterwards.
//!
//! ## Basic Usage
//!
//! ```
//! use goap_planner::{Action, BasicAction, WorldState};
//!
//! let catch = BasicAction::<&str>::new("catch_target", 1.0)
//!     .unwrap()
//!     .with_precondition("see_target", true)
//!     .with_effect("target_caught", true)
//!     .requiring_target();
//!
//! let mut state = WorldState::new();
//! state.set("see_target", true);
//!
//! if catch.is_achievable_given(&state) {
//!     catch.apply_effects(&mut state);
//! }
//! assert_eq!(state.get("target_caught"), Some(true));
//! ```
//!
//! ## Custom Actions
//!
//! Behaviours that need their own execution logic implement [`Action`]
//! directly:
//!
//! ```
//! use goap_planner::{world_state, Action, WorldState};
//!
//! struct Patrol {
//!     preconditions: WorldState<&'static str>,
//!     effects: WorldState<&'static str>,
//!     waypoint: Option<usize>,
//!     next: usize,
//! }
//!
//! impl Action<&'static str> for Patrol {
//!     fn name(&self) -> &str {
//!         "patrol"
//!     }
//!     fn cost(&self) -> f32 {
//!         1.0
//!     }
//!     fn preconditions(&self) -> &WorldState<&'static str> {
//!         &self.preconditions
//!     }
//!     fn effects(&self) -> &WorldState<&'static str> {
//!         &self.effects
//!     }
//!     fn requires_target(&self) -> bool {
//!         true
//!     }
//!     fn has_target(&self) -> bool {
//!         self.waypoint.is_some()
//!     }
//!     fn reset(&mut self) {
//!         self.waypoint = None;
//!     }
//!     fn pre_perform(&mut self) -> bool {
//!         self.waypoint = Some(self.next);
//!         self.next += 1;
//!         true
//!     }
//! }
//!
//! let mut patrol = Patrol {
//!     preconditions: world_state!["at_waypoint" => false],
//!     effects: world_state!["at_waypoint" => true, "patrol_complete" => true],
//!     waypoint: None,
//!     next: 0,
//! };
//! assert!(patrol.pre_perform());
//! assert!(patrol.has_target());
//! patrol.reset();
//! assert!(!patrol.has_target());
//! ```

use crate::state::{Fact, WorldState};
use crate::{GoapError, Result};

/// The capability set the planner and the execution driver need from an action.
///
/// Implementors declare their preconditions, effects and cost up front. The
/// planner calls [`reset`](Action::reset) on every action before it searches
/// and otherwise only reads the declarative methods.
pub trait Action<F: Fact> {
    /// A name identifying the action, used for lookup and logging.
    fn name(&self) -> &str;

    /// The additive cost of running this action. Must be finite and `>= 0.0`.
    fn cost(&self) -> f32;

    /// Facts that must hold before this action can run.
    fn preconditions(&self) -> &WorldState<F>;

    /// Facts this action overwrites once it has run.
    fn effects(&self) -> &WorldState<F>;

    /// Whether the driver has to bring the agent to a target before running this action.
    fn requires_target(&self) -> bool {
        false
    }

    /// Whether the action currently holds a target.
    fn has_target(&self) -> bool {
        false
    }

    /// Checks whether every precondition holds in `state`.
    fn is_achievable_given(&self, state: &WorldState<F>) -> bool {
        state.satisfies(self.preconditions())
    }

    /// Overwrites `state` with this action's effects.
    fn apply_effects(&self, state: &mut WorldState<F>) {
        state.apply(self.effects());
    }

    /// Clears any target or progress cached by a previous plan.
    fn reset(&mut self) {}

    /// Runs before the action is performed. Returning `false` aborts the plan.
    fn pre_perform(&mut self) -> bool {
        true
    }

    /// Runs after the action is performed. Returns `true` once the action is complete.
    fn post_perform(&mut self) -> bool {
        true
    }
}

impl<F: Fact, A: Action<F> + ?Sized> Action<F> for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn cost(&self) -> f32 {
        (**self).cost()
    }

    fn preconditions(&self) -> &WorldState<F> {
        (**self).preconditions()
    }

    fn effects(&self) -> &WorldState<F> {
        (**self).effects()
    }

    fn requires_target(&self) -> bool {
        (**self).requires_target()
    }

    fn has_target(&self) -> bool {
        (**self).has_target()
    }

    fn is_achievable_given(&self, state: &WorldState<F>) -> bool {
        (**self).is_achievable_given(state)
    }

    fn apply_effects(&self, state: &mut WorldState<F>) {
        (**self).apply_effects(state)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn pre_perform(&mut self) -> bool {
        (**self).pre_perform()
    }

    fn post_perform(&mut self) -> bool {
        (**self).post_perform()
    }
}

/// Rejects costs that would break additive path comparison.
pub(crate) fn validate_cost(name: &str, cost: f32) -> Result<()> {
    if !cost.is_finite() || cost < 0.0 {
        return Err(GoapError::InvalidActionCost(format!("{}: {}", name, cost)));
    }
    Ok(())
}

/// A data-only action.
///
/// `BasicAction` carries a name, a cost, preconditions and effects, and an
/// optional target of type `T` that the owner sets before execution. Actions
/// built with [`BasicAction::targeting`] require that target; plain
/// [`BasicAction::new`] actions can still be flagged with
/// [`requiring_target`](BasicAction::requiring_target) when the driver tracks
/// the target itself. The execution hooks always succeed, so it suits actions
/// whose real behaviour lives in the driver.
///
/// # Examples
///
/// ```
/// use goap_planner::{Action, BasicAction, WorldState};
///
/// let mut goto = BasicAction::<&str, (f32, f32)>::targeting("goto_checkpoint", 2.0)
///     .unwrap()
///     .with_precondition("at_checkpoint", false)
///     .with_effect("at_checkpoint", true);
///
/// assert!(goto.requires_target());
/// assert!(!goto.has_target());
///
/// goto.set_target((4.0, 2.5));
/// assert_eq!(goto.target(), Some(&(4.0, 2.5)));
///
/// goto.reset();
/// assert!(!goto.has_target());
///
/// let mut state = WorldState::new();
/// state.set("at_checkpoint", false);
/// assert!(goto.is_achievable_given(&state));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BasicAction<F: Fact, T = ()> {
    name: String,
    cost: f32,
    preconditions: WorldState<F>,
    effects: WorldState<F>,
    requires_target: bool,
    target: Option<T>,
}

impl<F: Fact> BasicAction<F> {
    /// Creates an action with no preconditions, no effects and no target slot.
    ///
    /// # Errors
    ///
    /// Returns [`GoapError::InvalidActionCost`] if `cost` is negative, NaN or infinite.
    pub fn new(name: impl Into<String>, cost: f32) -> Result<Self> {
        Self::build(name.into(), cost, false)
    }
}

impl<F: Fact, T> BasicAction<F, T> {
    /// Creates an action that needs a target of type `T` before it can run.
    ///
    /// # Errors
    ///
    /// Returns [`GoapError::InvalidActionCost`] if `cost` is negative, NaN or infinite.
    pub fn targeting(name: impl Into<String>, cost: f32) -> Result<Self> {
        Self::build(name.into(), cost, true)
    }

    fn build(name: String, cost: f32, requires_target: bool) -> Result<Self> {
        validate_cost(&name, cost)?;

        Ok(Self {
            name,
            cost,
            preconditions: WorldState::new(),
            effects: WorldState::new(),
            requires_target,
            target: None,
        })
    }

    pub fn with_precondition(mut self, fact: F, value: bool) -> Self {
        self.preconditions.set(fact, value);
        self
    }

    pub fn with_effect(mut self, fact: F, value: bool) -> Self {
        self.effects.set(fact, value);
        self
    }

    /// Marks the action as needing a target before it can run.
    pub fn requiring_target(mut self) -> Self {
        self.requires_target = true;
        self
    }

    pub fn preconditions_mut(&mut self) -> &mut WorldState<F> {
        &mut self.preconditions
    }

    pub fn effects_mut(&mut self) -> &mut WorldState<F> {
        &mut self.effects
    }

    pub fn set_target(&mut self, target: T) {
        self.target = Some(target);
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    pub fn take_target(&mut self) -> Option<T> {
        self.target.take()
    }
}

impl<F: Fact, T> Action<F> for BasicAction<F, T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn cost(&self) -> f32 {
        self.cost
    }

    fn preconditions(&self) -> &WorldState<F> {
        &self.preconditions
    }

    fn effects(&self) -> &WorldState<F> {
        &self.effects
    }

    fn requires_target(&self) -> bool {
        self.requires_target
    }

    fn has_target(&self) -> bool {
        self.target.is_some()
    }

    fn reset(&mut self) {
        self.target = None;
    }
}
