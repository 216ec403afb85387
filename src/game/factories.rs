//! Prebuilt agents and items.
//!
//! Every factory returns a fresh value with a new id, placed at the origin;
//! use [`Agent::at`] to position it before spawning.

use crate::{config, Agent, Behavior, Faction, Fighter, Item, Position};

pub fn player() -> Agent {
    Agent::new(
        "Player",
        '\u{263A}',
        Faction::Player,
        Fighter::new(1000, 100, 2),
        Behavior::Idle,
    )
    .with_inventory(26)
}

/// Training target that never acts.
pub fn dummy() -> Agent {
    Agent::new("Dummy", 'D', Faction::Hostile, Fighter::new(10, 0, 3), Behavior::Idle)
}

pub fn orc() -> Agent {
    Agent::new("Orc", 'o', Faction::Hostile, Fighter::new(10, 0, 4), Behavior::pursuer())
}

pub fn troll() -> Agent {
    Agent::new("Troll", 'T', Faction::Hostile, Fighter::new(20, 2, 5), Behavior::pursuer())
}

pub fn caster() -> Agent {
    Agent::new(
        "Caster",
        'c',
        Faction::Hostile,
        Fighter::new(10, 0, 3),
        Behavior::caster(config::DEFAULT_SPELL_USES),
    )
}

/// Loot seeker with room for two items.
pub fn goblin() -> Agent {
    Agent::new("Goblin", 'g', Faction::Hostile, Fighter::new(2, 1, 4), Behavior::loot_seeker())
        .with_inventory(2)
}

/// A mimic posing as furniture.
pub fn table() -> Agent {
    Agent::new("Table", '+', Faction::Hostile, Fighter::new(20, 0, 0), Behavior::disguised())
}

pub fn health_potion(position: Position) -> Item {
    Item::new("Health potion", '!', position)
}

pub fn dagger(position: Position) -> Item {
    Item::new("Dagger", '/', position)
}
