//! # Agents
//!
//! The minimal entity data the decision logic reads and writes.

use crate::{Behavior, Position};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for agents.
pub type AgentId = Uuid;

/// Unique identifier for items.
pub type ItemId = Uuid;

/// Which side an agent is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// The agent every hostile archetype is after
    Player,
    Hostile,
}

/// Health and combat numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    pub hp: u32,
    pub max_hp: u32,
    pub power: u32,
    pub defense: u32,
}

impl Fighter {
    pub fn new(hp: u32, defense: u32, power: u32) -> Self {
        Self {
            hp,
            max_hp: hp,
            power,
            defense,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_damaged(&self) -> bool {
        self.hp < self.max_hp
    }

    /// Subtracts up to `amount` hit points and returns how many were lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }
}

/// Something that can lie on the floor or sit in an inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub glyph: char,
    pub position: Position,
}

impl Item {
    pub fn new(name: impl Into<String>, glyph: char, position: Position) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            glyph,
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub capacity: usize,
    pub items: Vec<Item>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }
}

/// An autonomous actor on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub glyph: char,
    pub faction: Faction,
    pub position: Position,
    pub blocks_movement: bool,
    pub fighter: Fighter,
    pub inventory: Inventory,
    pub behavior: Behavior,
}

impl Agent {
    /// Creates a blocking agent with an empty, zero-capacity inventory.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Agent, Behavior, Faction, Fighter, Position};
    ///
    /// let orc = Agent::new("Orc", 'o', Faction::Hostile, Fighter::new(10, 0, 4), Behavior::pursuer());
    /// assert!(orc.is_alive());
    /// assert!(orc.blocks_movement);
    /// assert!(orc.inventory.is_full());
    /// ```
    pub fn new(
        name: impl Into<String>,
        glyph: char,
        faction: Faction,
        fighter: Fighter,
        behavior: Behavior,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            glyph,
            faction,
            position: Position::new(0, 0),
            blocks_movement: true,
            fighter,
            inventory: Inventory::default(),
            behavior,
        }
    }

    pub fn with_inventory(mut self, capacity: usize) -> Self {
        self.inventory = Inventory::new(capacity);
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.fighter.is_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fighter_damage_saturates() {
        let mut fighter = Fighter::new(5, 1, 2);
        assert!(!fighter.is_damaged());
        assert_eq!(fighter.take_damage(3), 3);
        assert!(fighter.is_damaged());
        assert_eq!(fighter.take_damage(10), 2);
        assert_eq!(fighter.hp, 0);
        assert!(!fighter.is_alive());
    }

    #[test]
    fn test_inventory_capacity() {
        let mut inventory = Inventory::new(1);
        assert!(!inventory.is_full());
        inventory.items.push(Item::new("Dagger", '/', Position::new(0, 0)));
        assert!(inventory.is_full());
    }

    #[test]
    fn test_agent_ids_unique() {
        let a = Agent::new("a", 'a', Faction::Hostile, Fighter::new(1, 0, 0), Behavior::Idle);
        let b = Agent::new("b", 'b', Faction::Hostile, Fighter::new(1, 0, 0), Behavior::Idle);
        assert_ne!(a.id, b.id);
        assert_eq!(a.at(Position::new(3, 4)).position, Position::new(3, 4));
    }
}
