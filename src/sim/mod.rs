//! Skirmish host: the update loop that owns NPCs and drives their brains
//!
//! One tick is: refresh the perceivable world, let every brain think
//! (commands come out), integrate commands (movement, weapon cadence),
//! resolve shots, then handle downs and respawns. Brains tick
//! synchronously on this single thread - no other brain's tick ever
//! interleaves.

pub mod archetypes;

use crate::agent::{Abilities, AimControl, Body, Locomotion, WeaponMount};
use crate::brain::{Brain, Host, InitContext};
use crate::core::config::AiConfig;
use crate::core::error::Result;
use crate::core::types::{EntityId, Faction, Tick};
use crate::world::{World, WorldEntity};
use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// One AI-controlled (or possessed) character
pub struct Npc {
    pub body: Body,
    pub abilities: Abilities,
    pub brain: Option<Brain>,
    /// A human is driving the body; the brain keeps its state but does
    /// not tick
    pub possessed: bool,
    downed: bool,
    respawn_in: f32,
}

/// Running tallies for reports
#[derive(Debug, Clone, Default, Serialize)]
pub struct SkirmishStats {
    pub shots_fired: u64,
    pub hits: u64,
    pub downs: u64,
    pub respawns: u64,
}

/// A hitscan shot waiting for resolution
struct Shot {
    shooter: EntityId,
    origin: Vec2,
    dir: Vec2,
    range: f32,
    damage: f32,
}

/// The arena: world, NPCs, seeded rng, and the tick driver
pub struct Skirmish {
    pub world: World,
    npcs: Vec<Npc>,
    rng: ChaCha8Rng,
    config: AiConfig,
    tick_count: Tick,
    stats: SkirmishStats,
}

impl Skirmish {
    pub fn new(seed: u64, config: AiConfig) -> Self {
        Self {
            world: World::new(),
            npcs: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
            tick_count: 0,
            stats: SkirmishStats::default(),
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn tick_count(&self) -> Tick {
        self.tick_count
    }

    pub fn stats(&self) -> &SkirmishStats {
        &self.stats
    }

    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    pub fn npc(&self, id: EntityId) -> Option<&Npc> {
        self.npcs.iter().find(|n| n.body.id == id)
    }

    /// Spawn a warden guard patrolling the given waypoints
    pub fn spawn_guard(&mut self, post: Vec2, waypoints: Vec<Vec2>) -> Result<EntityId> {
        let brain = archetypes::guard_brain(&self.config, waypoints)?;
        Ok(self.insert(
            Body::new(Faction::Wardens, post, 100.0),
            standard_loadout(),
            Some(brain),
        ))
    }

    /// Spawn a raider prowling for wardens
    pub fn spawn_raider(&mut self, at: Vec2) -> Result<EntityId> {
        let brain = archetypes::raider_brain(&self.config)?;
        Ok(self.insert(
            Body::new(Faction::Raiders, at, 80.0),
            standard_loadout(),
            Some(brain),
        ))
    }

    /// Spawn a brainless bystander (useful as a target dummy)
    pub fn spawn_dummy(&mut self, at: Vec2, faction: Faction) -> EntityId {
        self.insert(Body::new(faction, at, 100.0), Abilities::default(), None)
    }

    fn insert(&mut self, body: Body, abilities: Abilities, brain: Option<Brain>) -> EntityId {
        let id = body.id;
        self.world.upsert_entity(WorldEntity {
            id,
            position: body.position,
            faction: body.faction,
            alive: true,
        });
        self.npcs.push(Npc {
            body,
            abilities,
            brain,
            possessed: false,
            downed: false,
            respawn_in: 0.0,
        });
        self.boot_brain(self.npcs.len() - 1);
        tracing::info!(npc = %id, "spawned");
        id
    }

    fn boot_brain(&mut self, index: usize) {
        let Skirmish {
            world,
            npcs,
            rng,
            config,
            ..
        } = self;
        let npc = &mut npcs[index];
        if let Some(brain) = npc.brain.as_mut() {
            let mut host = Host {
                body: &mut npc.body,
                abilities: &mut npc.abilities,
                world,
                rng: &mut *rng,
                config,
            };
            brain.init(&mut InitContext::from_host(&host));
            brain.activate(&mut host);
        }
    }

    /// Toggle human possession: the brain's activity flag flips, state
    /// and blackboard stay frozen as-is
    pub fn possess(&mut self, id: EntityId, possessed: bool) {
        if let Some(npc) = self.npcs.iter_mut().find(|n| n.body.id == id) {
            npc.possessed = possessed;
            if let Some(brain) = npc.brain.as_mut() {
                brain.set_active(!possessed);
            }
            tracing::info!(npc = %id, possessed, "possession changed");
        }
    }

    /// Hot-swap the whole controller on a live character
    ///
    /// Explicit handshake: the old brain's exit hooks run (releasing any
    /// held commands), then the new brain initializes and enters. The
    /// old brain is handed back still holding its final FSM state.
    pub fn swap_brain(&mut self, id: EntityId, mut new_brain: Brain) -> Option<Brain> {
        let Skirmish {
            world,
            npcs,
            rng,
            config,
            ..
        } = self;
        let npc = npcs.iter_mut().find(|n| n.body.id == id)?;
        let mut host = Host {
            body: &mut npc.body,
            abilities: &mut npc.abilities,
            world,
            rng: &mut *rng,
            config,
        };
        if let Some(old) = npc.brain.as_mut() {
            old.deactivate(&mut host);
        }
        new_brain.init(&mut InitContext::from_host(&host));
        new_brain.activate(&mut host);
        tracing::info!(npc = %id, brain = new_brain.name(), "brain swapped");
        std::mem::replace(&mut npc.brain, Some(new_brain))
    }

    /// Advance the arena by one frame
    pub fn tick(&mut self, dt: f32) {
        self.refresh_world();
        self.think(dt);
        let shots = self.integrate(dt);
        self.resolve_shots(shots);
        self.handle_downs(dt);
        self.tick_count += 1;
    }

    /// Push fresh entity snapshots into the perceivable world
    fn refresh_world(&mut self) {
        for npc in &self.npcs {
            self.world.upsert_entity(WorldEntity {
                id: npc.body.id,
                position: npc.body.position,
                faction: npc.body.faction,
                alive: !npc.body.is_down(),
            });
        }
    }

    /// Tick every active brain
    fn think(&mut self, dt: f32) {
        let Skirmish {
            world,
            npcs,
            rng,
            config,
            ..
        } = self;
        for npc in npcs.iter_mut() {
            if npc.possessed || npc.body.is_down() || npc.body.stun_remaining > 0.0 {
                continue;
            }
            if let Some(brain) = npc.brain.as_mut() {
                let mut host = Host {
                    body: &mut npc.body,
                    abilities: &mut npc.abilities,
                    world,
                    rng: &mut *rng,
                    config,
                };
                brain.tick(&mut host, dt);
            }
        }
    }

    /// Integrate commands: movement, facing, weapon cadence
    fn integrate(&mut self, dt: f32) -> Vec<Shot> {
        let mut shots = Vec::new();
        for npc in self.npcs.iter_mut() {
            let body = &mut npc.body;
            body.stun_remaining = (body.stun_remaining - dt).max(0.0);
            if body.is_down() {
                continue;
            }

            if let Some(locomotion) = &npc.abilities.locomotion {
                body.position += locomotion.desired_velocity * dt;
                if locomotion.desired_velocity.length_squared() > 1e-6 {
                    body.facing = locomotion.desired_velocity.normalize();
                }
            }

            // An explicit aim point overrides movement facing
            let aim_point = npc.abilities.aim.as_ref().and_then(|a| a.aim_point);
            if let Some(point) = aim_point {
                let to_point = point - body.position;
                if to_point.length_squared() > 1e-6 {
                    body.facing = to_point.normalize();
                }
            }

            if let Some(weapon) = npc.abilities.weapon.as_mut() {
                weapon.cooldown = (weapon.cooldown - dt).max(0.0);
                if weapon.reload_remaining > 0.0 {
                    weapon.reload_remaining -= dt;
                    if weapon.reload_remaining <= 0.0 {
                        weapon.reload_remaining = 0.0;
                        weapon.rounds_loaded = weapon.magazine_size;
                        tracing::debug!(npc = %body.id, "reload complete");
                    }
                }
                if weapon.can_fire() {
                    weapon.cooldown = weapon.fire_interval;
                    weapon.rounds_loaded -= 1;
                    shots.push(Shot {
                        shooter: body.id,
                        origin: body.position,
                        dir: body.facing,
                        range: weapon.range,
                        damage: weapon.damage,
                    });
                    self.stats.shots_fired += 1;
                }
            }
        }
        shots
    }

    /// Hitscan resolution: first body along the ray takes the damage
    fn resolve_shots(&mut self, shots: Vec<Shot>) {
        for shot in shots {
            let mut best: Option<(usize, f32)> = None;
            for (i, npc) in self.npcs.iter().enumerate() {
                if npc.body.id == shot.shooter || npc.body.is_down() {
                    continue;
                }
                let t = (npc.body.position - shot.origin).dot(shot.dir);
                if t <= 0.0 || t > shot.range {
                    continue;
                }
                let lateral = npc
                    .body
                    .position
                    .distance(shot.origin + shot.dir * t);
                if lateral > self.config.shot_hit_radius {
                    continue;
                }
                if self.world.line_blocked(shot.origin, npc.body.position) {
                    continue;
                }
                if best.map_or(true, |(_, best_t)| t < best_t) {
                    best = Some((i, t));
                }
            }
            if let Some((i, _)) = best {
                let victim = &mut self.npcs[i].body;
                victim.apply_damage(shot.damage);
                self.stats.hits += 1;
                tracing::debug!(
                    shooter = %shot.shooter,
                    victim = %victim.id,
                    health = victim.health,
                    "shot connected"
                );
            }
        }
    }

    /// Deactivate freshly downed NPCs, count down and execute respawns
    fn handle_downs(&mut self, dt: f32) {
        let Skirmish {
            world,
            npcs,
            rng,
            config,
            stats,
            ..
        } = self;
        for npc in npcs.iter_mut() {
            if npc.body.is_down() && !npc.downed {
                npc.downed = true;
                npc.respawn_in = config.respawn_delay;
                stats.downs += 1;
                tracing::info!(npc = %npc.body.id, "downed");
                if let Some(brain) = npc.brain.as_mut() {
                    let mut host = Host {
                        body: &mut npc.body,
                        abilities: &mut npc.abilities,
                        world,
                        rng: &mut *rng,
                        config,
                    };
                    brain.deactivate(&mut host);
                }
            } else if npc.downed {
                npc.respawn_in -= dt;
                if npc.respawn_in <= 0.0 {
                    npc.body.respawn();
                    npc.downed = false;
                    stats.respawns += 1;
                    tracing::info!(npc = %npc.body.id, "respawned");
                    if let Some(brain) = npc.brain.as_mut() {
                        let mut host = Host {
                            body: &mut npc.body,
                            abilities: &mut npc.abilities,
                            world,
                            rng: &mut *rng,
                            config,
                        };
                        brain.reset(&mut InitContext::from_host(&host));
                        if !npc.possessed {
                            brain.activate(&mut host);
                        }
                    }
                }
            }
        }
    }
}

/// Locomotion + weapon + aim, the loadout the stock brains assume
fn standard_loadout() -> Abilities {
    Abilities {
        locomotion: Some(Locomotion::new(5.0)),
        weapon: Some(WeaponMount::new(8, 0.25, 30.0, 12.0)),
        aim: Some(AimControl::default()),
    }
}
