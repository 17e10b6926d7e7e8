//! Commands (side effects) produced by the update functions
//!
//! Engines describe what should happen next; the host executes it.

use crate::time::Generation;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A command to be executed by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cmd<M> {
    /// No operation
    None,

    /// Batch multiple commands
    Batch(Vec<Cmd<M>>),

    /// Start delivering one tick per `every`, stamped with `generation`
    StartTimer { generation: Generation, every: Duration },

    /// Stop the timer started under `generation`
    StopTimer { generation: Generation },

    /// Deliver `msg` back to the engine after `delay`
    Schedule { msg: M, delay: Duration },

    /// Show a transient notification
    Notify(Notification),
}

/// A transient, non-blocking notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    /// Icon name for the front end
    pub icon: String,
}

impl<M> Cmd<M> {
    /// Create an empty command
    pub fn none() -> Self {
        Cmd::None
    }

    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd<M>>) -> Self {
        // Flatten nested batches and filter out None
        let mut flattened: Vec<Cmd<M>> = cmds
            .into_iter()
            .flat_map(|cmd| match cmd {
                Cmd::None => vec![],
                Cmd::Batch(inner) => inner,
                other => vec![other],
            })
            .collect();

        match flattened.len() {
            0 => Cmd::None,
            1 => flattened.remove(0),
            _ => Cmd::Batch(flattened),
        }
    }

    /// Create a schedule command
    pub fn schedule(msg: M, delay: Duration) -> Self {
        Cmd::Schedule { msg, delay }
    }

    /// Create a notification command
    pub fn notify(
        title: impl Into<String>,
        message: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Cmd::Notify(Notification {
            title: title.into(),
            message: message.into(),
            icon: icon.into(),
        })
    }

    /// Check if this is a None command
    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }

    /// Iterate over the leaf commands of this command
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Cmd<M>> + '_> {
        match self {
            Cmd::None => Box::new(std::iter::empty()),
            Cmd::Batch(cmds) => Box::new(cmds.iter().flat_map(|c| c.iter())),
            other => Box::new(std::iter::once(other)),
        }
    }
}
