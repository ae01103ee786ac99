use std::error::Error;

use goap_planner::{world_state, Action, Planner, WorldState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Guard {
    SeeTarget,
    TargetCaught,
    AtWaypoint,
    PatrolComplete,
}

/// The world the guard senses each tick
struct Environment {
    intruder: Option<(u32, (i32, i32))>,
    position: (i32, i32),
}

impl Environment {
    fn snapshot(&self) -> WorldState<Guard> {
        world_state![
            Guard::SeeTarget => self.intruder.is_some(),
            Guard::AtWaypoint => false,
        ]
    }
}

/// Chases the intruder in sight
struct CatchTarget {
    preconditions: WorldState<Guard>,
    effects: WorldState<Guard>,
    target: Option<u32>,
}

impl CatchTarget {
    fn new() -> Self {
        Self {
            preconditions: world_state![Guard::SeeTarget => true],
            effects: world_state![Guard::TargetCaught => true],
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
}

/// Walks a loop of waypoints, one per run
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

/// Catch the intruder when it is in sight, otherwise keep patrolling
fn goal_for(state: &WorldState<Guard>) -> WorldState<Guard> {
    if state.is_set(Guard::SeeTarget, true) {
        world_state![Guard::TargetCaught => true]
    } else {
        world_state![Guard::PatrolComplete => true]
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Create actions
    let actions: Vec<Box<dyn Action<Guard>>> = vec![
        Box::new(CatchTarget::new()),
        Box::new(Patrol::new(vec![(0, 0), (10, 0), (10, 10), (0, 10)])),
    ];
    let mut planner = Planner::new(actions);

    let mut env = Environment {
        intruder: None,
        position: (0, 0),
    };

    for tick in 0..6 {
        // An intruder shows up on the fourth tick
        if tick == 3 {
            env.intruder = Some((42, (7, 3)));
        }

        let current = env.snapshot();
        let goal = goal_for(&current);
        println!("tick {}: state {} goal {}", tick, current, goal);

        let plan = match planner.plan(&current, &goal)? {
            Some(plan) => plan,
            None => {
                println!("  no plan, idling");
                continue;
            }
        };
        println!("  plan: {}", plan);

        for step in &plan {
            let action = planner
                .action_mut(step.index())
                .ok_or_else(|| format!("action {} vanished", step.name()))?;

            if !action.pre_perform() {
                println!("  {} could not start, replanning", step.name());
                break;
            }

            // Acquire and reach the target for actions that need one
            if step.requires_target() && !action.has_target() {
                if let Some((id, position)) = env.intruder {
                    println!("  chasing intruder {} at {:?}", id, position);
                    env.position = position;
                }
            }
            if step.name() == "catch_target" {
                if let Some((id, _)) = env.intruder.take() {
                    println!("  caught intruder {}", id);
                }
            }

            if !action.post_perform() {
                println!("  {} failed, replanning", step.name());
                break;
            }
            println!("  done: {} (guard at {:?})", step.name(), env.position);
        }
    }

    Ok(())
}
