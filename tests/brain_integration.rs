//! End-to-end scenarios for the brain engine
//!
//! These run real decisions and actions against the skirmish host, plus
//! a few engine-level flows wired with the stock strategies.

use glam::Vec2;
use grimwatch::agent::{Abilities, AimControl, Body, Locomotion, WeaponMount};
use grimwatch::brain::{
    Action, BrainBuilder, Host, InitContext, StateDef, TickContext, TransitionDef,
};
use grimwatch::core::config::AiConfig;
use grimwatch::core::error::Result;
use grimwatch::core::types::{EntityId, Faction};
use grimwatch::decisions::TargetIsNull;
use grimwatch::sim::Skirmish;
use grimwatch::world::{World, WorldEntity};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::rc::Rc;

struct Rig {
    body: Body,
    abilities: Abilities,
    world: World,
    rng: ChaCha8Rng,
    config: AiConfig,
}

impl Rig {
    fn new() -> Self {
        Self {
            body: Body::new(Faction::Wardens, Vec2::ZERO, 100.0),
            abilities: Abilities {
                locomotion: Some(Locomotion::new(5.0)),
                weapon: Some(WeaponMount::new(8, 0.2, 30.0, 10.0)),
                aim: Some(AimControl::default()),
            },
            world: World::new(),
            rng: ChaCha8Rng::seed_from_u64(11),
            config: AiConfig::default(),
        }
    }

    fn host(&mut self) -> Host<'_> {
        Host {
            body: &mut self.body,
            abilities: &mut self.abilities,
            world: &self.world,
            rng: &mut self.rng,
            config: &self.config,
        }
    }
}

/// Minimal observable action: counts activations and performs
struct Counter {
    enters: Rc<RefCell<u32>>,
    performs: Rc<RefCell<u32>>,
}

impl Action for Counter {
    fn name(&self) -> &'static str {
        "counter"
    }

    fn perform(&mut self, _ctx: &mut TickContext<'_>) -> Result<()> {
        *self.performs.borrow_mut() += 1;
        Ok(())
    }

    fn on_enter(&mut self, _ctx: &mut TickContext<'_>) {
        *self.enters.borrow_mut() += 1;
    }
}

#[test]
fn idle_with_target_null_guard_switches_to_chase_when_target_appears() {
    let enters = Rc::new(RefCell::new(0));
    let performs = Rc::new(RefCell::new(0));

    // Idle holds while the target slot is empty; any target means chase
    let mut brain = BrainBuilder::new("sentry")
        .state(StateDef::new("idle").transition(
            TransitionDef::on(TargetIsNull::new())
                .to("idle")
                .otherwise("chase"),
        ))
        .state(StateDef::new("chase").action(Counter {
            enters: Rc::clone(&enters),
            performs: Rc::clone(&performs),
        }))
        .initial("idle")
        .build()
        .unwrap();

    let mut rig = Rig::new();
    {
        let mut host = rig.host();
        brain.init(&mut InitContext::from_host(&host));
        brain.activate(&mut host);
    }

    // Without a target the guard holds its state
    brain.tick(&mut rig.host(), 0.1);
    assert_eq!(brain.current_state_name(), "idle");
    assert_eq!(*enters.borrow(), 0);

    // A valid reference lands in the slot (an external spotter, say)
    brain
        .blackboard_mut()
        .set_target(EntityId::new(), Vec2::new(5.0, 5.0));
    brain.tick(&mut rig.host(), 0.1);

    assert_eq!(brain.current_state_name(), "chase");
    // Chase's strategies were entered and already ran this tick
    assert_eq!(*enters.borrow(), 1);
    assert_eq!(*performs.borrow(), 1);
}

#[test]
fn reset_returns_to_initial_state_and_clears_target() {
    let mut brain = BrainBuilder::new("sentry")
        .state(StateDef::new("idle").transition(
            TransitionDef::on(TargetIsNull::new())
                .to("idle")
                .otherwise("attack"),
        ))
        .state(StateDef::new("attack"))
        .initial("idle")
        .build()
        .unwrap();

    let mut rig = Rig::new();
    {
        let mut host = rig.host();
        brain.init(&mut InitContext::from_host(&host));
        brain.activate(&mut host);
    }

    brain
        .blackboard_mut()
        .set_target(EntityId::new(), Vec2::ONE);
    brain.tick(&mut rig.host(), 0.1);
    assert_eq!(brain.current_state_name(), "attack");

    let host = rig.host();
    brain.reset(&mut InitContext::from_host(&host));
    assert_eq!(brain.current_state_name(), "idle");
    assert!(brain.blackboard().target.is_none());
}

#[test]
fn guard_cannot_see_through_cover() {
    let mut config = AiConfig::default();
    config.view_cone_degrees = 180.0;
    let mut skirmish = Skirmish::new(7, config);

    // A wall dead between the guard post and the raider approach
    skirmish.world.add_obstacle(Vec2::new(10.0, 0.0), 2.0);
    let guard = skirmish
        .spawn_guard(Vec2::ZERO, vec![Vec2::ZERO])
        .unwrap();
    skirmish.spawn_dummy(Vec2::new(20.0, 0.0), Faction::Raiders);

    for _ in 0..20 {
        skirmish.tick(0.1);
    }
    let brain = skirmish.npc(guard).unwrap().brain.as_ref().unwrap();
    assert_eq!(brain.current_state_name(), "patrol");
    assert!(brain.blackboard().target.is_none());

    // Same distance, clear line: spotted
    skirmish.world.upsert_entity(WorldEntity {
        id: EntityId::new(),
        position: Vec2::new(0.0, 20.0),
        faction: Faction::Raiders,
        alive: true,
    });
    for _ in 0..5 {
        skirmish.tick(0.1);
    }
    let brain = skirmish.npc(guard).unwrap().brain.as_ref().unwrap();
    assert_eq!(brain.current_state_name(), "chase");
    assert!(brain.blackboard().target.is_some());
}

#[test]
fn guard_downs_intruder_and_returns_to_patrol() {
    let mut config = AiConfig::default();
    config.view_cone_degrees = 180.0;
    // Keep the victim down for the whole test
    config.respawn_delay = 1000.0;
    let mut skirmish = Skirmish::new(8, config);

    let guard = skirmish
        .spawn_guard(Vec2::ZERO, vec![Vec2::ZERO, Vec2::new(4.0, 0.0)])
        .unwrap();
    let intruder = skirmish.spawn_dummy(Vec2::new(18.0, 0.0), Faction::Raiders);

    // Plenty of time to spot, close, shoot, and disengage
    for _ in 0..400 {
        skirmish.tick(0.1);
    }

    assert!(skirmish.npc(intruder).unwrap().body.is_down());
    let brain = skirmish.npc(guard).unwrap().brain.as_ref().unwrap();
    // Dead target was cleared and the guard went back to its round
    assert_eq!(brain.current_state_name(), "patrol");
    assert!(brain.blackboard().target.is_none());
    assert!(skirmish.stats().shots_fired > 0);
    assert!(skirmish.stats().downs >= 1);
}

#[test]
fn possessed_guard_freezes_then_resumes() {
    let mut skirmish = Skirmish::new(9, AiConfig::default());
    let guard = skirmish
        .spawn_guard(Vec2::ZERO, vec![Vec2::ZERO, Vec2::new(10.0, 0.0)])
        .unwrap();

    skirmish.possess(guard, true);
    for _ in 0..25 {
        skirmish.tick(0.1);
    }
    {
        let brain = skirmish.npc(guard).unwrap().brain.as_ref().unwrap();
        assert!(!brain.is_active());
        assert_eq!(brain.blackboard().time_in_state, 0.0);
    }

    skirmish.possess(guard, false);
    for _ in 0..5 {
        skirmish.tick(0.1);
    }
    let brain = skirmish.npc(guard).unwrap().brain.as_ref().unwrap();
    assert!(brain.is_active());
    assert!(brain.blackboard().time_in_state > 0.0);
}
