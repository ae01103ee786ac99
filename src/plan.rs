//! Plans returned by the planner.
//!
//! A [`Plan`] is an ordered list of [`PlanStep`]s. Steps refer back to the
//! action list the plan was computed over by index, so the driver can borrow
//! each action mutably when it is time to run it.

use std::fmt;

use crate::action::Action;
use crate::state::{Fact, WorldState};
use crate::{GoapError, Result};

/// One step of a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanStep {
    index: usize,
    name: String,
    cost: f32,
    requires_target: bool,
}

impl PlanStep {
    pub(crate) fn new<F: Fact, A: Action<F>>(index: usize, action: &A) -> Self {
        Self {
            index,
            name: action.name().to_string(),
            cost: action.cost(),
            requires_target: action.requires_target(),
        }
    }

    /// Position of the action in the list the plan was computed over.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> f32 {
        self.cost
    }

    /// Whether the driver must acquire a target before running this step.
    pub fn requires_target(&self) -> bool {
        self.requires_target
    }
}

/// An ordered sequence of actions that takes the initial state to the goal.
///
/// An empty plan means the goal already held when planning started.
///
/// # Examples
///
/// ```
/// use goap_planner::{BasicAction, Planner, WorldState};
///
/// let fetch = BasicAction::new("fetch", 2.0).unwrap().with_effect("fetched", true);
/// let mut planner = Planner::new(vec![fetch]);
///
/// let mut goal = WorldState::new();
/// goal.set("fetched", true);
///
/// let plan = planner.plan(&WorldState::new(), &goal).unwrap().unwrap();
/// assert_eq!(plan.len(), 1);
/// assert_eq!(plan.cost(), 2.0);
/// assert_eq!(plan.to_string(), "fetch (cost 2)");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Plan {
    steps: Vec<PlanStep>,
    cost: f32,
}

impl Plan {
    pub(crate) fn new(steps: Vec<PlanStep>, cost: f32) -> Self {
        Self { steps, cost }
    }

    /// The plan for a goal that already holds.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total cost accumulated along the plan.
    pub fn cost(&self) -> f32 {
        self.cost
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanStep> {
        self.steps.iter()
    }

    /// Action indices in execution order.
    pub fn indices(&self) -> Vec<usize> {
        self.steps.iter().map(PlanStep::index).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(PlanStep::name).collect()
    }

    /// Resolves each step against the action list the plan was computed over.
    ///
    /// # Errors
    ///
    /// Returns [`GoapError::ActionNotFound`] if a step's index is out of range
    /// or now holds an action with a different name, which happens when
    /// actions were removed after planning.
    pub fn actions<'a, F, A>(&self, actions: &'a [A]) -> Result<Vec<&'a A>>
    where
        F: Fact,
        A: Action<F>,
    {
        self.steps
            .iter()
            .map(|step| match actions.get(step.index) {
                Some(action) if action.name() == step.name => Ok(action),
                _ => Err(GoapError::ActionNotFound(format!(
                    "{} (plan step at index {})",
                    step.name, step.index
                ))),
            })
            .collect()
    }

    /// Replays the plan's effects onto `initial`.
    ///
    /// Returns the predicted state after each step, so the last element is
    /// the state the plan is expected to end in. An empty plan yields an
    /// empty vector.
    ///
    /// # Errors
    ///
    /// Fails like [`Plan::actions`] when the plan no longer matches `actions`.
    pub fn predicted_states<F, A>(
        &self,
        initial: &WorldState<F>,
        actions: &[A],
    ) -> Result<Vec<WorldState<F>>>
    where
        F: Fact,
        A: Action<F>,
    {
        let mut state = initial.clone();
        let states = self
            .actions(actions)?
            .into_iter()
            .map(|action| {
                action.apply_effects(&mut state);
                state.clone()
            })
            .collect();
        Ok(states)
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a PlanStep;
    type IntoIter = std::slice::Iter<'a, PlanStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Plan {
    type Item = PlanStep;
    type IntoIter = std::vec::IntoIter<PlanStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            write!(f, "<empty>")?;
        } else {
            write!(f, "{}", self.names().join(" -> "))?;
        }
        write!(f, " (cost {})", self.cost)
    }
}
