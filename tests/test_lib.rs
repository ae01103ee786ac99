use goap_planner::{world_state, Action, BasicAction, GoapError, Planner, WorldState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Guard {
    SeeTarget,
    TargetCaught,
    AtWaypoint,
    PatrolComplete,
}

/// Chases whatever the guard can currently see.
struct CatchTarget {
    preconditions: WorldState<Guard>,
    effects: WorldState<Guard>,
    visible: Option<u32>,
    target: Option<u32>,
}

impl CatchTarget {
    fn new(visible: Option<u32>) -> Self {
        Self {
            preconditions: world_state![Guard::SeeTarget => true],
            effects: world_state![Guard::TargetCaught => true],
            visible,
            target: None,
        }
    }
}

impl Action<Guard> for CatchTarget {
    fn name(&self) -> &str {
        "catch_target"
    }

    fn cost(&self) -> f32 {
        1.0
    }

    fn preconditions(&self) -> &WorldState<Guard> {
        &self.preconditions
    }

    fn effects(&self) -> &WorldState<Guard> {
        &self.effects
    }

    fn requires_target(&self) -> bool {
        true
    }

    fn has_target(&self) -> bool {
        self.target.is_some()
    }

    fn reset(&mut self) {
        self.target = None;
    }

    fn pre_perform(&mut self) -> bool {
        self.target = self.visible;
        self.target.is_some()
    }

    fn post_perform(&mut self) -> bool {
        self.target.take().is_some()
    }
}

/// Walks a loop of waypoints.
struct Patrol {
    preconditions: WorldState<Guard>,
    effects: WorldState<Guard>,
    waypoints: Vec<(i32, i32)>,
    next: usize,
    target: Option<(i32, i32)>,
}

impl Patrol {
    fn new(waypoints: Vec<(i32, i32)>) -> Self {
        Self {
            preconditions: world_state![Guard::AtWaypoint => false],
            effects: world_state![Guard::AtWaypoint => true, Guard::PatrolComplete => true],
            waypoints,
            next: 0,
            target: None,
        }
    }
}

impl Action<Guard> for Patrol {
    fn name(&self) -> &str {
        "patrol"
    }

    fn cost(&self) -> f32 {
        1.0
    }

    fn preconditions(&self) -> &WorldState<Guard> {
        &self.preconditions
    }

    fn effects(&self) -> &WorldState<Guard> {
        &self.effects
    }

    fn requires_target(&self) -> bool {
        true
    }

    fn has_target(&self) -> bool {
        self.target.is_some()
    }

    fn reset(&mut self) {
        self.target = None;
    }

    fn pre_perform(&mut self) -> bool {
        if self.waypoints.is_empty() {
            return false;
        }
        self.target = Some(self.waypoints[self.next]);
        self.next = (self.next + 1) % self.waypoints.len();
        true
    }
}

fn guard_planner(visible: Option<u32>) -> Planner<Guard, Box<dyn Action<Guard>>> {
    let actions: Vec<Box<dyn Action<Guard>>> = vec![
        Box::new(CatchTarget::new(visible)),
        Box::new(Patrol::new(vec![(0, 0), (10, 0), (10, 10)])),
    ];
    Planner::new(actions)
}

/// Catch the target when it is in sight, otherwise keep patrolling.
fn goal_for(state: &WorldState<Guard>) -> WorldState<Guard> {
    if state.is_set(Guard::SeeTarget, true) {
        world_state![Guard::TargetCaught => true]
    } else {
        world_state![Guard::PatrolComplete => true]
    }
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catches_visible_target() {
        init_logger();
        let mut planner = guard_planner(Some(7));
        let current = world_state![Guard::SeeTarget => true, Guard::AtWaypoint => false];
        let goal = world_state![Guard::TargetCaught => true];

        let plan = planner.plan(&current, &goal).unwrap().unwrap();
        assert_eq!(plan.names(), ["catch_target"]);
        assert_eq!(plan.cost(), 1.0);
    }

    #[test]
    fn test_no_plan_without_sight_of_target() {
        init_logger();
        let mut planner = guard_planner(None);
        let current = world_state![Guard::SeeTarget => false, Guard::AtWaypoint => false];
        let goal = world_state![Guard::TargetCaught => true];

        let result = planner.plan(&current, &goal).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_patrols_when_nothing_is_seen() {
        init_logger();
        let mut planner = guard_planner(None);
        let current = world_state![Guard::SeeTarget => false, Guard::AtWaypoint => false];

        let plan = planner.plan(&current, &goal_for(&current)).unwrap().unwrap();
        assert_eq!(plan.names(), ["patrol"]);
        assert!(plan.steps()[0].requires_target());
    }

    #[test]
    fn test_goal_already_reached() {
        init_logger();
        let mut planner = guard_planner(None);
        let current = world_state![Guard::SeeTarget => false, Guard::PatrolComplete => true];

        let plan = planner.plan(&current, &goal_for(&current)).unwrap().unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_driving_a_plan_sets_and_clears_targets() {
        init_logger();
        let mut planner = guard_planner(Some(3));
        let current = world_state![Guard::SeeTarget => true, Guard::AtWaypoint => false];

        let plan = planner.plan(&current, &goal_for(&current)).unwrap().unwrap();
        let mut predicted = current.clone();
        for step in &plan {
            let action = planner.action_mut(step.index()).unwrap();
            assert!(action.is_achievable_given(&predicted));
            assert!(action.pre_perform());
            assert_eq!(action.has_target(), step.requires_target());
            assert!(action.post_perform());
            action.apply_effects(&mut predicted);
        }
        assert!(predicted.is_set(Guard::TargetCaught, true));
    }

    #[test]
    fn test_stale_targets_cleared_before_planning() {
        init_logger();
        let mut planner = guard_planner(Some(3));
        for index in 0..planner.len() {
            assert!(planner.action_mut(index).unwrap().pre_perform());
        }
        assert!(planner.actions().iter().all(|action| action.has_target()));

        // the plan is abandoned and a new one requested
        let current = world_state![Guard::SeeTarget => false, Guard::AtWaypoint => false];
        planner.plan(&current, &goal_for(&current)).unwrap();

        assert!(planner.actions().iter().all(|action| !action.has_target()));
    }

    #[test]
    fn test_replanning_is_stable() {
        init_logger();
        let mut planner = guard_planner(Some(1));
        let current = world_state![Guard::SeeTarget => true, Guard::AtWaypoint => false];
        let goal = goal_for(&current);

        let first = planner.plan(&current, &goal).unwrap();
        let second = planner.plan(&current, &goal).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_queries() {
        init_logger();
        let mut planner = guard_planner(None);
        let current = world_state![Guard::SeeTarget => true];

        let result = planner.plan(&current, &WorldState::new());
        assert!(matches!(result, Err(GoapError::InvalidInput(_))));

        let mut empty: Planner<Guard, BasicAction<Guard>> = Planner::new(Vec::new());
        let result = empty.plan(&current, &goal_for(&current));
        assert!(matches!(result, Err(GoapError::InvalidInput(_))));
    }

    #[test]
    fn test_basic_workflow() {
        init_logger();
        let gather_wood = BasicAction::new("gather_wood", 1.0)
            .unwrap()
            .with_precondition("has_axe", true)
            .with_effect("has_wood", true);
        let build_house = BasicAction::new("build_house", 2.0)
            .unwrap()
            .with_precondition("has_wood", true)
            .with_effect("has_house", true);
        let mut planner = Planner::new(vec![build_house, gather_wood]);

        let current = world_state![
            "has_axe" => true,
            "has_wood" => false,
            "has_house" => false,
        ];
        let goal = world_state!["has_house" => true];

        let plan = planner.plan(&current, &goal).unwrap().unwrap();
        assert_eq!(plan.names(), ["gather_wood", "build_house"]);
        assert_eq!(plan.cost(), 3.0);
    }

    #[test]
    fn test_multiple_paths_to_goal() {
        init_logger();
        let expensive = BasicAction::new("expensive_action", 5.0)
            .unwrap()
            .with_precondition("start", true)
            .with_effect("goal", true);
        let cheap = BasicAction::new("cheap_action", 1.0)
            .unwrap()
            .with_precondition("start", true)
            .with_effect("goal", true);
        let mut planner = Planner::new(vec![expensive, cheap]);

        let plan = planner
            .plan(&world_state!["start" => true], &world_state!["goal" => true])
            .unwrap()
            .unwrap();
        assert_eq!(plan.names(), ["cheap_action"]);
    }

    #[test]
    fn test_invalid_action_cost() {
        let result = BasicAction::<&str>::new("invalid_action", -0.5);
        assert!(matches!(result, Err(GoapError::InvalidActionCost(_))));
    }

    fn step(
        name: &str,
        cost: f32,
        pre: &[&'static str],
        eff: &[&'static str],
    ) -> BasicAction<&'static str> {
        let mut action = BasicAction::new(name, cost).unwrap();
        action
            .preconditions_mut()
            .extend(pre.iter().map(|fact| (*fact, true)));
        action
            .effects_mut()
            .extend(eff.iter().map(|fact| (*fact, true)));
        action
    }

    #[test]
    fn test_complex_planning_scenario() {
        init_logger();
        let actions = vec![
            step(
                "final_inspection",
                1.0,
                &["has_interior", "has_safety_checks"],
                &["has_completed_house"],
            ),
            step(
                "interior_finishing",
                4.0,
                &["has_utilities", "has_windows_in", "has_doors_in"],
                &["has_interior"],
            ),
            step(
                "install_utilities",
                6.0,
                &["has_roof", "has_utility_plans"],
                &["has_utilities"],
            ),
            step("install_doors", 2.0, &["has_walls", "has_roof"], &["has_doors_in"]),
            step("install_windows", 2.0, &["has_walls", "has_roof"], &["has_windows_in"]),
            step(
                "install_roof",
                5.0,
                &["has_walls", "has_processed_wood"],
                &["has_roof"],
            ),
            step(
                "build_walls",
                4.0,
                &["has_foundation", "has_processed_wood"],
                &["has_walls"],
            ),
            step(
                "build_foundation",
                3.0,
                &["has_processed_stone"],
                &["has_foundation"],
            ),
            step(
                "process_materials",
                2.0,
                &["has_wood", "has_stone"],
                &["has_processed_wood", "has_processed_stone"],
            ),
            step("gather_resources", 1.0, &["has_tools"], &["has_wood", "has_stone"]),
            step("hire_crew", 40.0, &["has_tools"], &["has_completed_house"]),
        ];
        let mut planner = Planner::new(actions);

        let current = world_state![
            "has_tools" => true,
            "has_utility_plans" => true,
            "has_safety_checks" => true,
        ];
        let goal = world_state!["has_completed_house" => true];

        let plan = planner.plan(&current, &goal).unwrap().unwrap();
        assert_eq!(plan.names().first(), Some(&"gather_resources"));
        assert_eq!(plan.names().last(), Some(&"final_inspection"));
        assert_eq!(plan.len(), 10);
        assert_eq!(plan.cost(), 30.0);

        // every step must be achievable in the state the previous steps predict
        let mut state = current.clone();
        for action in plan.actions(planner.actions()).unwrap() {
            assert!(
                action.is_achievable_given(&state),
                "Precondition not met for action {}: {}",
                action.name(),
                state.unsatisfied(action.preconditions())
            );
            action.apply_effects(&mut state);
        }
        assert!(state.satisfies(&goal));

        // the crew is the only way left once the roof cannot go on
        planner.remove_action("install_roof").unwrap();
        assert!(matches!(
            plan.actions(planner.actions()),
            Err(GoapError::ActionNotFound(_))
        ));
        let plan = planner.plan(&current, &goal).unwrap().unwrap();
        assert_eq!(plan.names(), ["hire_crew"]);
        assert_eq!(plan.cost(), 40.0);
    }

    #[test]
    fn test_removing_an_action_invalidates_earlier_plans() {
        init_logger();
        let first = BasicAction::new("a", 1.0).unwrap().with_effect("mid", true);
        let second = BasicAction::new("b", 1.0)
            .unwrap()
            .with_precondition("mid", true)
            .with_effect("done", true);
        let mut planner = Planner::new(vec![first, second]);
        let current = WorldState::new();
        let goal = world_state!["done" => true];

        let plan = planner.plan(&current, &goal).unwrap().unwrap();
        assert_eq!(plan.names(), ["a", "b"]);
        assert_eq!(plan.predicted_states(&current, planner.actions()).unwrap().len(), 2);

        planner.remove_action("a").unwrap();
        let result = plan.actions(planner.actions());
        assert!(matches!(result, Err(GoapError::ActionNotFound(_))));
        let result = plan.predicted_states(&current, planner.actions());
        assert!(matches!(result, Err(GoapError::ActionNotFound(_))));
    }
}
