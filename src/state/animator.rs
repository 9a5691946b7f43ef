//! Typing animation state machine.
//!
//! DESIGN
//! ======
//! `AnimatorState` is a cursor into a `RoleList`. Each `tick` advances it by
//! exactly one frame and reports the text to display plus the delay before
//! the next tick, so the driver only has to schedule and render.
//!
//! Phases cycle `Typing -> PausingAtFull -> Deleting -> PausingBeforeNext ->
//! Typing`. A pause phase is the wait that follows the tick which entered it;
//! the next tick leaves it and moves one character.

#[cfg(test)]
#[path = "animator_test.rs"]
mod animator_test;

use crate::error::{PortfolioError, Result};

/// Ordered, non-empty list of strings to animate. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleList {
    roles: Vec<String>,
}

impl RoleList {
    /// Rejects an empty list and empty entries.
    pub fn new<I, S>(roles: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles: Vec<String> = roles.into_iter().map(Into::into).collect();
        if roles.is_empty() || roles.iter().any(String::is_empty) {
            return Err(PortfolioError::EmptyRoleList);
        }
        Ok(Self { roles })
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn get(&self, index: usize) -> &str {
        &self.roles[index % self.roles.len()]
    }

    fn char_len(&self, index: usize) -> usize {
        self.get(index).chars().count()
    }
}

/// Delays between ticks, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTiming {
    pub type_ms: u32,
    pub delete_ms: u32,
    pub pause_full_ms: u32,
    pub pause_next_ms: u32,
}

impl Default for TypingTiming {
    fn default() -> Self {
        Self { type_ms: 100, delete_ms: 50, pause_full_ms: 2000, pause_next_ms: 500 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Typing,
    PausingAtFull,
    Deleting,
    PausingBeforeNext,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimatorState {
    role_index: usize,
    char_index: usize,
    phase: Phase,
    delay_ms: u32,
}

impl AnimatorState {
    pub fn role_index(&self) -> usize {
        self.role_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_deleting(&self) -> bool {
        matches!(self.phase, Phase::PausingAtFull | Phase::Deleting)
    }

    /// Delay the last tick asked for before the next one.
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Prefix of the current role matching `char_index`.
    pub fn visible_text(&self, roles: &RoleList) -> String {
        roles.get(self.role_index).chars().take(self.char_index).collect()
    }

    /// Advance one frame and return the text to display.
    pub fn tick(&mut self, roles: &RoleList, timing: &TypingTiming) -> String {
        if self.is_deleting() {
            self.char_index = self.char_index.saturating_sub(1);
            if self.char_index == 0 {
                self.role_index = (self.role_index + 1) % roles.len();
                self.phase = Phase::PausingBeforeNext;
                self.delay_ms = timing.pause_next_ms;
            } else {
                self.phase = Phase::Deleting;
                self.delay_ms = timing.delete_ms;
            }
        } else {
            let len = roles.char_len(self.role_index);
            self.char_index = (self.char_index + 1).min(len);
            if self.char_index == len {
                self.phase = Phase::PausingAtFull;
                self.delay_ms = timing.pause_full_ms;
            } else {
                self.phase = Phase::Typing;
                self.delay_ms = timing.type_ms;
            }
        }
        self.visible_text(roles)
    }
}
