//! Property tests for the lifecycle-hook pairing guarantees
//!
//! Randomized transition sequences over a fully-connected graph, with
//! every strategy instrumented. Whatever path the brain takes:
//! - every strategy's hook stream alternates enter, exit, enter, ...
//! - exits of the outgoing state land before enters of the incoming one
//! - the state clock resets on a change and otherwise accumulates

use glam::Vec2;
use grimwatch::agent::{Abilities, Body};
use grimwatch::brain::{
    Action, BrainBuilder, Decision, Host, InitContext, StateDef, TickContext,
};
use grimwatch::core::config::AiConfig;
use grimwatch::core::error::Result as AiResult;
use grimwatch::core::types::Faction;
use grimwatch::world::World;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Enter(String),
    Exit(String),
}

type EventLog = Rc<RefCell<Vec<Event>>>;

/// Guard that flips randomly, instrumented with the shared log
struct FlipGuard {
    tag: String,
    log: EventLog,
}

impl Decision for FlipGuard {
    fn name(&self) -> &'static str {
        "flip_guard"
    }

    fn decide(&mut self, ctx: &mut TickContext<'_>) -> AiResult<bool> {
        Ok(ctx.rng.gen_bool(0.3))
    }

    fn on_enter(&mut self, _ctx: &mut TickContext<'_>) {
        self.log.borrow_mut().push(Event::Enter(self.tag.clone()));
    }

    fn on_exit(&mut self, _ctx: &mut TickContext<'_>) {
        self.log.borrow_mut().push(Event::Exit(self.tag.clone()));
    }
}

/// Do-nothing action, instrumented with the shared log
struct LoggedAction {
    tag: String,
    log: EventLog,
}

impl Action for LoggedAction {
    fn name(&self) -> &'static str {
        "logged_action"
    }

    fn perform(&mut self, _ctx: &mut TickContext<'_>) -> AiResult<()> {
        Ok(())
    }

    fn on_enter(&mut self, _ctx: &mut TickContext<'_>) {
        self.log.borrow_mut().push(Event::Enter(self.tag.clone()));
    }

    fn on_exit(&mut self, _ctx: &mut TickContext<'_>) {
        self.log.borrow_mut().push(Event::Exit(self.tag.clone()));
    }
}

const STATES: [&str; 3] = ["alpha", "beta", "gamma"];

/// Per-strategy streams must strictly alternate enter/exit starting with
/// an enter
fn assert_alternation(log: &[Event], tags: &[String]) {
    for tag in tags {
        let mut expect_enter = true;
        for event in log {
            match event {
                Event::Enter(t) if t == tag => {
                    assert!(expect_enter, "{}: double enter", tag);
                    expect_enter = false;
                }
                Event::Exit(t) if t == tag => {
                    assert!(!expect_enter, "{}: exit without enter", tag);
                    expect_enter = true;
                }
                _ => {}
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn hook_pairing_survives_random_transition_sequences(
        seed in any::<u64>(),
        ticks in 1usize..200,
    ) {
        let log: EventLog = EventLog::default();
        let mut tags = Vec::new();

        let mut builder = BrainBuilder::new("fuzz");
        for (i, name) in STATES.iter().enumerate() {
            let mut def = StateDef::new(*name);
            // Two random edges out of every state
            for hop in [1usize, 2] {
                let tag = format!("{}_guard{}", name, hop);
                tags.push(tag.clone());
                def = def.when(
                    FlipGuard { tag, log: Rc::clone(&log) },
                    STATES[(i + hop) % STATES.len()],
                );
            }
            let tag = format!("{}_action", name);
            tags.push(tag.clone());
            def = def.action(LoggedAction { tag, log: Rc::clone(&log) });
            builder = builder.state(def);
        }
        let mut brain = builder.initial("alpha").build().unwrap();

        let mut body = Body::new(Faction::Wardens, Vec2::ZERO, 100.0);
        let mut abilities = Abilities::default();
        let world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let config = AiConfig::default();
        let mut host = Host {
            body: &mut body,
            abilities: &mut abilities,
            world: &world,
            rng: &mut rng,
            config: &config,
        };

        brain.init(&mut InitContext::from_host(&host));
        brain.activate(&mut host);

        let dt = 0.1f32;
        let mut previous_time = brain.blackboard().time_in_state;
        let mut previous_state = brain.current_state().index();

        for _ in 0..ticks {
            brain.tick(&mut host, dt);
            let time = brain.blackboard().time_in_state;
            let state = brain.current_state().index();
            if state == previous_state {
                // No change: the clock only accumulates
                prop_assert!((time - (previous_time + dt)).abs() < 1e-4);
            } else {
                // Change: reset to zero, then advanced by this tick
                prop_assert!((time - dt).abs() < 1e-4);
            }
            previous_time = time;
            previous_state = state;
        }
        brain.deactivate(&mut host);

        // With the final deactivate, every enter is matched by an exit
        assert_alternation(&log.borrow(), &tags);
        let enters = log.borrow().iter().filter(|e| matches!(e, Event::Enter(_))).count();
        let exits = log.borrow().iter().filter(|e| matches!(e, Event::Exit(_))).count();
        prop_assert_eq!(enters, exits);

        // Exits of the outgoing state precede enters of the incoming one:
        // scanning the log, a new enter may only appear when no strategy
        // of another state is still open
        let mut open: Option<char> = None; // first letter of the open state
        let mut open_count = 0usize;
        for event in log.borrow().iter() {
            match event {
                Event::Enter(tag) => {
                    let state = tag.chars().next().unwrap();
                    if let Some(current) = open {
                        prop_assert_eq!(
                            current, state,
                            "entered a state while another was still open"
                        );
                    }
                    open = Some(state);
                    open_count += 1;
                }
                Event::Exit(_) => {
                    open_count -= 1;
                    if open_count == 0 {
                        open = None;
                    }
                }
            }
        }
    }
}
