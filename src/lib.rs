//! A STRIPS-style Goal-Oriented Action Planner over boolean world facts.
//!
//! Given actions with preconditions, effects and costs, a world snapshot and a
//! goal, the [`Planner`] finds the cheapest ordered sequence of actions whose
//! effects take the snapshot to a state satisfying the goal.

mod action;
mod error;
mod plan;
mod planner;
pub mod search;
mod state;

pub use action::{Action, BasicAction};
pub use error::{GoapError, Result};
pub use plan::{Plan, PlanStep};
pub use planner::{Planner, PlannerConfig};
pub use search::SearchStats;
pub use state::{Fact, WorldState};
