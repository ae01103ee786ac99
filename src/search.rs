//! Exhaustive forward tree search over hypothetical world states.
//!
//! Starting from the initial snapshot, every achievable action spawns a child
//! node holding a copy of its parent's state with the action's effects
//! applied. Children that satisfy the goal become leaves; the rest are expanded
//! again with the action that produced them removed from the usable set, so no
//! action repeats along a path and the depth is bounded by the number of
//! actions. The cheapest leaf wins.
//!
//! Nodes live in an arena and point at their parent by index, so the plan is
//! read back with an upward walk from the chosen leaf.

use crate::action::{validate_cost, Action};
use crate::plan::{Plan, PlanStep};
use crate::planner::PlannerConfig;
use crate::state::{Fact, WorldState};
use crate::{GoapError, Result};

/// Counters describing one planning call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes created, including the root
    pub nodes: usize,
    /// Goal-satisfying leaves discovered
    pub leaves: usize,
    /// Actions achievable from the initial state
    pub achievable_at_root: usize,
}

#[derive(Debug, Clone)]
struct Node<F: Fact> {
    parent: Option<usize>,
    action: Option<usize>,
    cost: f32,
    depth: usize,
    state: WorldState<F>,
}

/// Arena of search nodes plus the leaves found so far.
struct SearchTree<'a, F: Fact, A: Action<F>> {
    actions: &'a [A],
    goal: &'a WorldState<F>,
    config: &'a PlannerConfig,
    nodes: Vec<Node<F>>,
    leaves: Vec<usize>,
}

impl<'a, F: Fact, A: Action<F>> SearchTree<'a, F, A> {
    fn new(
        actions: &'a [A],
        initial: &WorldState<F>,
        goal: &'a WorldState<F>,
        config: &'a PlannerConfig,
    ) -> Self {
        let root = Node {
            parent: None,
            action: None,
            cost: 0.0,
            depth: 0,
            state: initial.clone(),
        };

        Self {
            actions,
            goal,
            config,
            nodes: vec![root],
            leaves: Vec::new(),
        }
    }

    /// Expands `parent` with every usable action achievable in its state.
    fn build(&mut self, parent: usize, usable: &[usize]) -> Result<()> {
        if let Some(max_depth) = self.config.max_depth {
            if self.nodes[parent].depth >= max_depth {
                return Ok(());
            }
        }

        for &index in usable {
            if !self.actions[index].is_achievable_given(&self.nodes[parent].state) {
                continue;
            }

            let child = self.push_child(parent, index)?;

            if self.nodes[child].state.satisfies(self.goal) {
                log::trace!(
                    "Leaf {} via '{}' at depth {} with cost {}",
                    child,
                    self.actions[index].name(),
                    self.nodes[child].depth,
                    self.nodes[child].cost
                );
                self.leaves.push(child);
                continue;
            }

            let subset: Vec<usize> = usable.iter().copied().filter(|&i| i != index).collect();
            self.build(child, &subset)?;
        }

        Ok(())
    }

    fn push_child(&mut self, parent: usize, index: usize) -> Result<usize> {
        if let Some(max_nodes) = self.config.max_nodes {
            if self.nodes.len() >= max_nodes {
                return Err(GoapError::SearchLimitExceeded(max_nodes));
            }
        }

        let action = &self.actions[index];
        let parent_node = &self.nodes[parent];

        let mut state = parent_node.state.clone();
        action.apply_effects(&mut state);

        let node = Node {
            parent: Some(parent),
            action: Some(index),
            cost: parent_node.cost + action.cost(),
            depth: parent_node.depth + 1,
            state,
        };
        log::trace!(
            "Node {} <- {} via '{}' (cost {})",
            self.nodes.len(),
            parent,
            action.name(),
            node.cost
        );

        self.nodes.push(node);
        Ok(self.nodes.len() - 1)
    }

    /// Cheapest leaf; ties go to the shallower leaf, then to the one found first.
    fn cheapest_leaf(&self) -> Option<usize> {
        self.leaves.iter().copied().min_by(|&a, &b| {
            let (a, b) = (&self.nodes[a], &self.nodes[b]);
            a.cost.total_cmp(&b.cost).then(a.depth.cmp(&b.depth))
        })
    }

    /// Walks parent links from `leaf` back to the root.
    fn reconstruct(&self, leaf: usize) -> Plan {
        let mut steps = Vec::with_capacity(self.nodes[leaf].depth);
        let mut current = Some(leaf);

        while let Some(idx) = current {
            let node = &self.nodes[idx];
            if let Some(index) = node.action {
                steps.push(PlanStep::new::<F, A>(index, &self.actions[index]));
            }
            current = node.parent;
        }

        steps.reverse();
        Plan::new(steps, self.nodes[leaf].cost)
    }

    fn stats(&self, achievable_at_root: usize) -> SearchStats {
        SearchStats {
            nodes: self.nodes.len(),
            leaves: self.leaves.len(),
            achievable_at_root,
        }
    }
}

fn validate<F: Fact, A: Action<F>>(actions: &[A], goal: &WorldState<F>) -> Result<()> {
    if goal.is_empty() {
        return Err(GoapError::InvalidInput("goal is empty".to_string()));
    }
    for action in actions {
        validate_cost(action.name(), action.cost())?;
    }
    Ok(())
}

/// Finds the cheapest sequence of `actions` that takes `initial` to a state
/// satisfying `goal`.
///
/// Every action is reset first. Returns `Ok(Some(plan))` on success, an empty
/// plan if `initial` already satisfies `goal`, and `Ok(None)` when no sequence
/// reaches the goal.
///
/// # Errors
///
/// * [`GoapError::InvalidInput`] if `goal` is empty, or if `actions` is empty
///   and `initial` does not already satisfy `goal`
/// * [`GoapError::InvalidActionCost`] if an action reports a negative or non-finite cost
/// * [`GoapError::SearchLimitExceeded`] if `config.max_nodes` is reached
///
/// # Examples
///
/// ```
/// use goap_planner::{search, world_state, BasicAction, PlannerConfig};
///
/// let mut actions = vec![
///     BasicAction::new("catch", 1.0)
///         .unwrap()
///         .with_precondition("see_target", true)
///         .with_effect("target_caught", true),
/// ];
///
/// let initial = world_state!["see_target" => true];
/// let goal = world_state!["target_caught" => true];
///
/// let plan = search::plan(&mut actions, &initial, &goal, &PlannerConfig::default())
///     .unwrap()
///     .expect("catching is possible");
/// assert_eq!(plan.names(), ["catch"]);
/// ```
pub fn plan<F: Fact, A: Action<F>>(
    actions: &mut [A],
    initial: &WorldState<F>,
    goal: &WorldState<F>,
    config: &PlannerConfig,
) -> Result<Option<Plan>> {
    plan_with_stats(actions, initial, goal, config).map(|(plan, _)| plan)
}

/// Same as [`plan`], also reporting how much searching was done.
pub fn plan_with_stats<F: Fact, A: Action<F>>(
    actions: &mut [A],
    initial: &WorldState<F>,
    goal: &WorldState<F>,
    config: &PlannerConfig,
) -> Result<(Option<Plan>, SearchStats)> {
    validate(actions, goal)?;

    for action in actions.iter_mut() {
        action.reset();
    }

    let actions: &[A] = actions;
    let achievable_at_root = actions
        .iter()
        .filter(|action| action.is_achievable_given(initial))
        .count();
    log::debug!(
        "Planning for goal {} from {} with {} actions ({} achievable)",
        goal,
        initial,
        actions.len(),
        achievable_at_root
    );

    if initial.satisfies(goal) {
        log::debug!("Goal {} already satisfied", goal);
        let stats = SearchStats {
            nodes: 1,
            leaves: 0,
            achievable_at_root,
        };
        return Ok((Some(Plan::empty()), stats));
    }
    if actions.is_empty() {
        return Err(GoapError::InvalidInput("no actions available".to_string()));
    }

    let mut tree = SearchTree::new(actions, initial, goal, config);
    let usable: Vec<usize> = (0..actions.len()).collect();
    if let Err(err) = tree.build(0, &usable) {
        log::warn!("Planning for goal {} aborted: {}", goal, err);
        return Err(err);
    }

    let stats = tree.stats(achievable_at_root);
    match tree.cheapest_leaf() {
        Some(leaf) => {
            let plan = tree.reconstruct(leaf);
            log::info!(
                "Found plan {} after {} nodes and {} leaves",
                plan,
                stats.nodes,
                stats.leaves
            );
            Ok((Some(plan), stats))
        }
        None => {
            log::warn!(
                "No plan reaches goal {} ({} unsatisfied facts, {} nodes searched)",
                goal,
                initial.unsatisfied(goal).len(),
                stats.nodes
            );
            Ok((None, stats))
        }
    }
}
