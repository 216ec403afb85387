//! # AI Module
//!
//! Agents, their behavior state machines, and the cost fields they path over.
//!
//! Each tick an agent's [`Behavior`] looks at a [`Perception`] snapshot and
//! produces exactly one [`Action`]. Unreachable targets are normal: an agent
//! that cannot path anywhere falls back to wandering or waiting.

pub mod agent;
pub mod behavior;
pub mod cost;

pub use agent::*;
pub use behavior::*;
pub use cost::*;

use crate::{config, DelveResult, StepWeights};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tuning knobs shared by every agent's decision logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Added to a cell's cost for every blocking agent standing on it
    pub crowding_penalty: u32,
    /// Cardinal and diagonal step multipliers
    pub step_weights: StepWeights,
    /// Casters cast only when the target is strictly closer than this
    pub ranged_limit: u32,
    /// Damage dealt by a single cast
    pub spell_damage: u32,
    /// Charges a freshly spawned caster starts with
    pub spell_uses: u32,
    /// Loot seekers path only to items strictly closer than this
    pub loot_reach: u32,
    /// Field of view radius around the target
    pub sight_radius: u32,
}

impl AgentConfig {
    pub fn new() -> Self {
        Self {
            crowding_penalty: config::DEFAULT_CROWDING_PENALTY,
            step_weights: StepWeights::default(),
            ranged_limit: config::DEFAULT_RANGED_LIMIT,
            spell_damage: config::DEFAULT_SPELL_DAMAGE,
            spell_uses: config::DEFAULT_SPELL_USES,
            loot_reach: config::DEFAULT_LOOT_REACH,
            sight_radius: config::DEFAULT_SIGHT_RADIUS,
        }
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> DelveResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiver for one-line notifications emitted on behavior transitions.
///
/// Implementations must not fail; a notification is fire-and-forget.
pub trait MessageSink {
    fn notify(&mut self, message: String);
}

impl MessageSink for Vec<String> {
    fn notify(&mut self, message: String) {
        self.push(message);
    }
}
