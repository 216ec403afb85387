//! # World State
//!
//! The single owner of the map, agents, floor items and the message log.
//!
//! Agents act one at a time in spawn order. Every change an action makes is
//! written straight into the world, so the next agent to decide in the same
//! tick already sees it.

use crate::{
    line, Action, Agent, AgentConfig, AgentId, DelveError, DelveResult, DungeonMap, Faction,
    GameEvent, Item, ItemId, MessageLog, Perception, Position,
};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A dungeon level with everything standing on it.
#[derive(Debug, Clone)]
pub struct World {
    pub map: DungeonMap,
    pub config: AgentConfig,
    pub messages: MessageLog,
    /// Completed ticks
    pub turn_number: u64,
    agents: Vec<Agent>,
    items: Vec<Item>,
    target: Option<AgentId>,
    rng: StdRng,
}

impl World {
    pub fn new(map: DungeonMap, config: AgentConfig, seed: u64) -> Self {
        Self {
            map,
            config,
            messages: MessageLog::new(),
            turn_number: 0,
            agents: Vec::new(),
            items: Vec::new(),
            target: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Adds an agent at its current position.
    ///
    /// The first player-faction agent becomes the target automatically.
    pub fn spawn(&mut self, agent: Agent) -> DelveResult<AgentId> {
        if !self.map.is_walkable(agent.position) {
            return Err(DelveError::InvalidAction(format!(
                "Cannot spawn {} on unwalkable cell {}",
                agent.name, agent.position
            )));
        }

        let id = agent.id;
        if agent.faction == Faction::Player && self.target.is_none() {
            self.target = Some(id);
        }
        debug!("Spawned {} ({}) at {}", agent.name, agent.behavior.kind(), agent.position);
        self.agents.push(agent);
        Ok(id)
    }

    /// Places an item on the floor.
    pub fn drop_item(&mut self, item: Item) -> DelveResult<ItemId> {
        if !self.map.is_walkable(item.position) {
            return Err(DelveError::InvalidAction(format!(
                "Cannot drop {} on unwalkable cell {}",
                item.name, item.position
            )));
        }
        let id = item.id;
        self.items.push(item);
        Ok(id)
    }

    pub fn set_target(&mut self, id: AgentId) -> DelveResult<()> {
        self.index_of(id)?;
        self.target = Some(id);
        Ok(())
    }

    pub fn target_id(&self) -> Option<AgentId> {
        self.target
    }

    pub fn target(&self) -> Option<&Agent> {
        self.target.and_then(|id| self.agent(id))
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|agent| agent.id == id)
    }

    /// The living agent blocking `pos`, if any.
    pub fn blocking_agent_at(&self, pos: Position) -> Option<AgentId> {
        self.agents
            .iter()
            .find(|agent| agent.blocks_movement && agent.position == pos)
            .map(|agent| agent.id)
    }

    /// Positions of every movement-blocking agent, one entry per agent.
    pub fn blockers(&self) -> Vec<Position> {
        self.agents
            .iter()
            .filter(|agent| agent.blocks_movement)
            .map(|agent| agent.position)
            .collect()
    }

    pub fn item_positions(&self) -> Vec<Position> {
        self.items.iter().map(|item| item.position).collect()
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub(crate) fn index_of(&self, id: AgentId) -> DelveResult<usize> {
        self.agents
            .iter()
            .position(|agent| agent.id == id)
            .ok_or_else(|| DelveError::InvalidState(format!("Agent {} not found", id)))
    }

    pub(crate) fn agent_at_index(&mut self, index: usize) -> &mut Agent {
        &mut self.agents[index]
    }

    pub(crate) fn take_item_at(&mut self, pos: Position) -> Option<Item> {
        let index = self.items.iter().position(|item| item.position == pos)?;
        Some(self.items.remove(index))
    }

    /// Recomputes the target's field of view.
    ///
    /// A cell is visible when it lies within the sight radius and the line
    /// from the target reaches it without crossing an opaque tile. Opaque
    /// cells themselves are visible so walls get drawn.
    pub fn update_visibility(&mut self) {
        self.map.clear_visibility();

        let origin = match self.target() {
            Some(target) if target.is_alive() => target.position,
            _ => return,
        };

        let radius = self.config.sight_radius as i32;
        self.map.reveal(origin);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let cell = Position::new(origin.x + dx, origin.y + dy);
                if !self.map.in_bounds(cell) || origin.euclidean_distance(cell) > radius as f64 {
                    continue;
                }
                for step in line(origin, cell).into_iter().skip(1) {
                    self.map.reveal(step);
                    if !self.map.is_transparent(step) {
                        break;
                    }
                }
            }
        }
    }

    /// Asks an agent's behavior for this tick's action.
    ///
    /// Dead agents always wait.
    pub fn decide(&mut self, id: AgentId) -> DelveResult<Action> {
        let index = self.index_of(id)?;
        if !self.agents[index].is_alive() {
            return Ok(Action::Wait);
        }

        let target = self
            .target()
            .filter(|target| target.is_alive())
            .map(|target| (target.position, target.name.clone()));
        let blockers = self.blockers();
        let items = self.item_positions();

        let agent = &mut self.agents[index];
        let mut behavior = std::mem::take(&mut agent.behavior);
        let name = agent.name.clone();
        let perception = Perception {
            map: &self.map,
            name: &name,
            position: agent.position,
            hp: agent.fighter.hp,
            max_hp: agent.fighter.max_hp,
            inventory_full: agent.inventory.is_full(),
            target: target.as_ref().map(|(position, _)| *position),
            target_name: target.as_ref().map_or("", |(_, name)| name.as_str()),
            visible: target.is_some() && self.map.is_visible(agent.position),
            blockers: &blockers,
            items: &items,
        };

        let action = behavior.decide(&perception, &self.config, &mut self.rng, &mut self.messages);
        self.agents[index].behavior = behavior;
        Ok(action)
    }

    /// Applies an action on behalf of an agent.
    pub fn apply(&mut self, id: AgentId, action: Action) -> DelveResult<Vec<GameEvent>> {
        action.execute(self, id)
    }

    /// Deals external damage, killing the agent if it drops to zero.
    pub fn damage(&mut self, id: AgentId, amount: u32, source: Option<AgentId>) -> DelveResult<Vec<GameEvent>> {
        let index = self.index_of(id)?;
        let agent = &mut self.agents[index];
        if !agent.is_alive() {
            return Ok(Vec::new());
        }

        let lost = agent.fighter.take_damage(amount);
        let mut events = vec![GameEvent::AgentDamaged {
            agent_id: id,
            damage: lost,
            source,
        }];
        if !agent.is_alive() {
            events.extend(self.kill(index, source));
        }
        Ok(events)
    }

    /// Confuses an agent for `turns` ticks.
    pub fn confuse(&mut self, id: AgentId, turns: u32) -> DelveResult<()> {
        let index = self.index_of(id)?;
        let agent = &mut self.agents[index];
        agent.behavior.confuse(turns);
        self.messages.add(format!(
            "The eyes of the {} look vacant, as it starts to stumble around!",
            agent.name
        ));
        Ok(())
    }

    /// Runs one turn: every living agent other than the target decides and
    /// acts, in spawn order.
    pub fn tick(&mut self) -> DelveResult<Vec<GameEvent>> {
        self.update_visibility();

        let actors: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|agent| Some(agent.id) != self.target)
            .map(|agent| agent.id)
            .collect();

        let mut events = Vec::new();
        for id in actors {
            if !self.agent(id).map_or(false, Agent::is_alive) {
                continue;
            }
            let action = self.decide(id)?;
            events.extend(self.apply(id, action)?);
        }

        self.turn_number += 1;
        Ok(events)
    }

    /// Turns a dead agent into remains that no longer block or act.
    fn kill(&mut self, index: usize, killer: Option<AgentId>) -> Vec<GameEvent> {
        let agent = &mut self.agents[index];
        let message = if agent.faction == Faction::Player {
            "You died!".to_string()
        } else {
            format!("{} is dead!", agent.name)
        };

        agent.glyph = '%';
        agent.blocks_movement = false;
        agent.behavior = Default::default();
        agent.name = format!("remains of {}", agent.name);
        let agent_id = agent.id;

        self.messages.add(message.clone());
        vec![
            GameEvent::AgentDied { agent_id, killer },
            GameEvent::Message { text: message },
        ]
    }
}
