//! # Game Module
//!
//! The turn-based world that owns agents and items and applies their actions.
//!
//! This module contains:
//! - [`World`], which builds perceptions, runs decisions and advances ticks
//! - Action application and the [`GameEvent`]s it produces
//! - Agent factories with the stats of each archetype
//! - The bounded [`MessageLog`] that behavior notifications land in

pub mod actions;
pub mod factories;
pub mod state;

pub use actions::*;
pub use state::*;

use crate::{config, AgentId, ItemId, MessageSink, Position};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Something that happened while applying an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    AgentMoved {
        agent_id: AgentId,
        from: Position,
        to: Position,
    },
    AgentDamaged {
        agent_id: AgentId,
        damage: u32,
        source: Option<AgentId>,
    },
    AgentDied {
        agent_id: AgentId,
        killer: Option<AgentId>,
    },
    ItemPickedUp {
        agent_id: AgentId,
        item_id: ItemId,
    },
    DisguiseRevealed {
        agent_id: AgentId,
    },
    Message {
        text: String,
    },
}

/// Bounded list of one-line notifications, oldest first.
///
/// # Examples
///
/// ```
/// use delve::MessageLog;
///
/// let mut log = MessageLog::with_capacity(2);
/// log.add("one");
/// log.add("two");
/// log.add("three");
/// assert_eq!(log.iter().collect::<Vec<_>>(), vec!["two", "three"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    capacity: usize,
    messages: VecDeque<String>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::with_capacity(config::MAX_LOG_MESSAGES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            messages: VecDeque::new(),
        }
    }

    /// Appends a message, dropping the oldest once full.
    pub fn add(&mut self, text: impl Into<String>) {
        let text = text.into();
        info!("{}", text);
        if self.capacity == 0 {
            return;
        }
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(text);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.back().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.messages.iter().map(String::as_str)
    }

    pub fn contains(&self, text: &str) -> bool {
        self.messages.iter().any(|message| message == text)
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageSink for MessageLog {
    fn notify(&mut self, message: String) {
        self.add(message);
    }
}
