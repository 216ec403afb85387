//! # Behaviors
//!
//! Finite-state behavior per agent archetype.
//!
//! A [`Behavior`] is a tagged enum carrying each archetype's own state (path
//! buffer, charges, confusion timer, disguise origin). Transitions replace
//! the variant in place, so anything holding the agent keeps seeing the same
//! agent with a new behavior.

use crate::{
    find_path, AgentConfig, CostField, Direction, DungeonMap, MessageSink, Path, Position,
};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// The single thing an agent does on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Do nothing
    Wait,
    /// Step into an empty cell
    Move(Direction),
    /// Attack whatever blocks the cell, otherwise step into it
    Bump(Direction),
    /// Attack the blocking agent in that direction
    Melee(Direction),
    /// Hit the target from range for a fixed amount
    Cast { damage: u32 },
    /// Pick up the item underfoot
    Pickup,
    /// Turn spent shaking off confusion
    Recover,
    /// Turn spent dropping a disguise
    Reveal,
}

/// Everything an agent knows when choosing its action.
#[derive(Debug, Clone, Copy)]
pub struct Perception<'a> {
    pub map: &'a DungeonMap,
    pub name: &'a str,
    pub position: Position,
    pub hp: u32,
    pub max_hp: u32,
    pub inventory_full: bool,
    /// Where the target stands, if there is one
    pub target: Option<Position>,
    pub target_name: &'a str,
    /// Whether the agent's own cell is inside the target's field of view
    pub visible: bool,
    /// Cells occupied by movement-blocking agents, the agent itself included
    pub blockers: &'a [Position],
    /// Floor items in a stable order
    pub items: &'a [Position],
}

impl Perception<'_> {
    fn distance_to_target(&self) -> Option<u32> {
        self.target.map(|target| self.position.chebyshev_distance(target))
    }

    fn direction_to(&self, pos: Position) -> Option<Direction> {
        Direction::from_delta(pos - self.position)
    }
}

/// Behavior archetypes and their state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Behavior {
    /// Always waits
    #[default]
    Idle,
    /// Chases the target and attacks in melee
    Pursuer { path: Path },
    /// Melee when adjacent, casts from short range while charges last
    Caster { path: Path, charges: u32 },
    /// Walks to floor items and picks them up
    LootSeeker { path: Path, cursor: usize },
    /// Stumbles randomly, then goes back to `previous`
    Confused {
        turns_remaining: u32,
        previous: Box<Behavior>,
    },
    /// Waits until damaged or displaced, then becomes a pursuer for good
    Disguised { origin: Option<Position> },
}

impl Behavior {
    pub fn pursuer() -> Self {
        Behavior::Pursuer { path: Path::new() }
    }

    pub fn caster(charges: u32) -> Self {
        Behavior::Caster {
            path: Path::new(),
            charges,
        }
    }

    pub fn loot_seeker() -> Self {
        Behavior::LootSeeker {
            path: Path::new(),
            cursor: 0,
        }
    }

    pub fn disguised() -> Self {
        Behavior::Disguised { origin: None }
    }

    /// Archetype name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Behavior::Idle => "idle",
            Behavior::Pursuer { .. } => "pursuer",
            Behavior::Caster { .. } => "caster",
            Behavior::LootSeeker { .. } => "loot-seeker",
            Behavior::Confused { .. } => "confused",
            Behavior::Disguised { .. } => "disguised",
        }
    }

    /// Confuses the agent for `turns` turns, saving the current behavior.
    ///
    /// Confusing an already confused agent only resets the timer.
    pub fn confuse(&mut self, turns: u32) {
        match self {
            Behavior::Confused {
                turns_remaining, ..
            } => *turns_remaining = turns,
            _ => {
                let previous = std::mem::take(self);
                *self = Behavior::Confused {
                    turns_remaining: turns,
                    previous: Box::new(previous),
                };
            }
        }
    }

    /// Chooses this tick's action, updating archetype state.
    pub fn decide(
        &mut self,
        perception: &Perception<'_>,
        config: &AgentConfig,
        rng: &mut StdRng,
        log: &mut dyn MessageSink,
    ) -> Action {
        match self {
            Behavior::Idle => Action::Wait,
            Behavior::Pursuer { path } => pursue(path, perception, config, rng),
            Behavior::Caster { path, charges } => {
                cast_or_pursue(path, charges, perception, config, log)
            }
            Behavior::LootSeeker { path, cursor } => {
                seek_loot(path, cursor, perception, config, rng)
            }
            Behavior::Confused {
                turns_remaining, ..
            } if *turns_remaining > 0 => {
                *turns_remaining -= 1;
                stumble(rng)
            }
            Behavior::Confused { .. } => {
                if let Behavior::Confused { previous, .. } = std::mem::take(self) {
                    *self = *previous;
                }
                log.notify(format!("The {} is no longer confused", perception.name));
                Action::Recover
            }
            Behavior::Disguised { origin } => {
                // Origin from an earlier tick; movement shows up at most one tick late.
                let moved = origin.map_or(false, |origin| origin != perception.position);
                *origin = Some(perception.position);

                if perception.hp < perception.max_hp || moved {
                    *self = Behavior::pursuer();
                    log.notify(format!("The {} reveals its disguise", perception.name));
                    Action::Reveal
                } else {
                    Action::Wait
                }
            }
        }
    }
}

/// Fresh cost field and path from the agent to `destination`.
fn path_to(perception: &Perception<'_>, destination: Position, config: &AgentConfig) -> Path {
    let field = CostField::build(
        perception.map,
        perception.blockers.iter().copied(),
        config.crowding_penalty,
    );
    let path = find_path(&field, perception.position, destination, config.step_weights);
    debug!(
        "{} pathing {} -> {}: {} steps",
        perception.name,
        perception.position,
        destination,
        path.len()
    );
    path
}

/// Pops the next step of `path` as a direction. A step that is no longer
/// adjacent means the path went stale; it is dropped.
fn follow(path: &mut Path, perception: &Perception<'_>) -> Option<Direction> {
    let step = path.next_step()?;
    match perception.direction_to(step) {
        Some(direction) => Some(direction),
        None => {
            path.clear();
            None
        }
    }
}

/// Random bump into a walkable neighbor, or a wait if boxed in.
fn wander(perception: &Perception<'_>, rng: &mut StdRng) -> Action {
    let open: Vec<Direction> = Direction::all()
        .into_iter()
        .filter(|direction| perception.map.is_walkable(perception.position + direction.to_delta()))
        .collect();

    match open.choose(rng) {
        Some(&direction) => Action::Bump(direction),
        None => Action::Wait,
    }
}

/// Random bump in any of the eight directions, walls included.
fn stumble(rng: &mut StdRng) -> Action {
    let directions = Direction::all();
    match directions.choose(rng) {
        Some(&direction) => Action::Bump(direction),
        None => Action::Wait,
    }
}

fn pursue(
    path: &mut Path,
    perception: &Perception<'_>,
    config: &AgentConfig,
    rng: &mut StdRng,
) -> Action {
    if perception.visible {
        if let Some(target) = perception.target {
            if perception.position.chebyshev_distance(target) <= 1 {
                return perception
                    .direction_to(target)
                    .map_or(Action::Wait, Action::Melee);
            }
            *path = path_to(perception, target, config);
        }
    }

    match follow(path, perception) {
        Some(direction) => Action::Move(direction),
        None => wander(perception, rng),
    }
}

fn cast_or_pursue(
    path: &mut Path,
    charges: &mut u32,
    perception: &Perception<'_>,
    config: &AgentConfig,
    log: &mut dyn MessageSink,
) -> Action {
    if perception.visible {
        if let (Some(target), Some(distance)) = (perception.target, perception.distance_to_target()) {
            if distance == 1 {
                return perception
                    .direction_to(target)
                    .map_or(Action::Wait, Action::Melee);
            } else if distance > 1 && distance < config.ranged_limit && *charges > 0 {
                *charges -= 1;
                log.notify(format!(
                    "{} hurls projectile at {} for {} damage",
                    perception.name, perception.target_name, config.spell_damage
                ));
                return Action::Cast {
                    damage: config.spell_damage,
                };
            }
            *path = path_to(perception, target, config);
        }
    }

    follow(path, perception).map_or(Action::Wait, Action::Move)
}

fn seek_loot(
    path: &mut Path,
    cursor: &mut usize,
    perception: &Perception<'_>,
    config: &AgentConfig,
    rng: &mut StdRng,
) -> Action {
    if perception.items.is_empty() || perception.inventory_full {
        return wander(perception, rng);
    }

    *cursor %= perception.items.len();
    let item = perception.items[*cursor];
    let distance = perception.position.chebyshev_distance(item);

    if distance == 0 {
        path.clear();
        return Action::Pickup;
    } else if distance > 1 && distance < config.loot_reach {
        *path = path_to(perception, item, config);
    } else if distance > config.loot_reach {
        // Round-robin to the next item; it is not necessarily any closer.
        *cursor = (*cursor + 1) % perception.items.len();
    }

    match follow(path, perception) {
        Some(direction) => Action::Bump(direction),
        None => wander(perception, rng),
    }
}
