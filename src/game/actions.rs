//! # Actions
//!
//! Applying an agent's chosen [`Action`] to the world.
//!
//! Actions that cannot happen (walking into a wall, hitting empty air,
//! picking up with full pockets) are no-ops rather than errors, so a
//! confused agent stumbling into a wall simply loses its turn.

use crate::{Action, AgentId, DelveResult, Direction, GameEvent, World};
use log::debug;

impl Action {
    /// Carries out the action for `actor`, returning what happened.
    ///
    /// Fails only when `actor` is not in the world. Dead agents never act.
    pub fn execute(self, world: &mut World, actor: AgentId) -> DelveResult<Vec<GameEvent>> {
        let index = world.index_of(actor)?;
        if !world.agent_at_index(index).is_alive() {
            return Ok(Vec::new());
        }

        match self {
            Action::Wait | Action::Recover => Ok(Vec::new()),
            Action::Move(direction) => Ok(step(world, actor, direction)),
            Action::Bump(direction) => {
                let destination = world.agent_at_index(index).position + direction.to_delta();
                match world.blocking_agent_at(destination) {
                    Some(other) if other != actor => melee(world, actor, direction),
                    _ => Ok(step(world, actor, direction)),
                }
            }
            Action::Melee(direction) => melee(world, actor, direction),
            Action::Cast { damage } => match world.target().filter(|target| target.is_alive()) {
                Some(target) => {
                    let target_id = target.id;
                    world.damage(target_id, damage, Some(actor))
                }
                None => Ok(Vec::new()),
            },
            Action::Pickup => Ok(pick_up(world, index)),
            Action::Reveal => {
                let agent = world.agent_at_index(index);
                agent.name = "Mimic".to_string();
                agent.glyph = 'M';
                agent.fighter.power = 4;
                agent.fighter.defense = 2;
                Ok(vec![GameEvent::DisguiseRevealed { agent_id: actor }])
            }
        }
    }
}

fn step(world: &mut World, actor: AgentId, direction: Direction) -> Vec<GameEvent> {
    let Some(agent) = world.agent(actor) else {
        return Vec::new();
    };
    let from = agent.position;
    let to = from + direction.to_delta();

    if !world.map.is_walkable(to) || world.blocking_agent_at(to).is_some() {
        debug!("{} cannot move {:?} from {}", agent.name, direction, from);
        return Vec::new();
    }

    if let Some(agent) = world.agent_mut(actor) {
        agent.position = to;
    }
    vec![GameEvent::AgentMoved {
        agent_id: actor,
        from,
        to,
    }]
}

fn melee(world: &mut World, actor: AgentId, direction: Direction) -> DelveResult<Vec<GameEvent>> {
    let Some(attacker) = world.agent(actor).cloned() else {
        return Ok(Vec::new());
    };
    let destination = attacker.position + direction.to_delta();
    let Some(defender) = world.blocking_agent_at(destination).and_then(|id| world.agent(id)) else {
        debug!("{} swings at nothing", attacker.name);
        return Ok(Vec::new());
    };

    let defender_id = defender.id;
    let damage = attacker.fighter.power.saturating_sub(defender.fighter.defense);
    let description = format!("{} attacks {}", attacker.name, defender.name);

    if damage == 0 {
        let text = format!("{} but does no damage.", description);
        world.messages.add(text.clone());
        return Ok(vec![GameEvent::Message { text }]);
    }

    let text = format!("{} for {} hit points.", description, damage);
    world.messages.add(text.clone());
    let mut events = vec![GameEvent::Message { text }];
    events.extend(world.damage(defender_id, damage, Some(actor))?);
    Ok(events)
}

fn pick_up(world: &mut World, index: usize) -> Vec<GameEvent> {
    let agent = world.agent_at_index(index);
    if agent.inventory.is_full() {
        return Vec::new();
    }
    let position = agent.position;

    let Some(item) = world.take_item_at(position) else {
        return Vec::new();
    };

    let agent = world.agent_at_index(index);
    let text = format!("{} picks up the {}!", agent.name, item.name);
    let events = vec![GameEvent::ItemPickedUp {
        agent_id: agent.id,
        item_id: item.id,
    }];
    agent.inventory.items.push(item);
    world.messages.add(text);
    events
}
