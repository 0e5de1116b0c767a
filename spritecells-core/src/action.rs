//! Action system for undo/redo functionality
//!
//! ## Architecture
//!
//! - `Action` trait: defines `redo()` (apply) and `undo()` (reverse)
//! - `ActionHistory`: a bounded, linear log of actions with a head index
//!
//! The history is a single sequence plus an `index` pointing at the last
//! applied action (the "head"). Undo walks the head backwards, redo walks it
//! forwards. Recording a new action while there is undone history discards
//! that future branch.
//!
//! ## Capacity
//!
//! The log holds at most `capacity` actions. When a new action is recorded
//! on a full log the oldest entry is evicted. Eviction is silent and
//! permanent: undoing everything afterwards stops at the eviction point and
//! can no longer reach the state before the evicted action.

use log::debug;

/// Default number of actions kept in the history
pub const DEFAULT_CAPACITY: usize = 100;

/// A reversible edit
///
/// `undo()` must exactly reverse the observable effect of `redo()`. The
/// history only ever calls them in alternating order, starting with `undo()`
/// for an action that has been recorded as done.
pub trait Action {
    /// State the action operates on
    type Target;

    /// Apply (or re-apply) this action
    fn redo(&self, target: &mut Self::Target);

    /// Reverse this action
    fn undo(&self, target: &mut Self::Target);

    /// Get a human-readable name for this action (for diagnostics and UI)
    fn name(&self) -> String;
}

/// Bounded linear undo/redo log
#[derive(Debug)]
pub struct ActionHistory<A> {
    actions: Vec<A>,

    /// Position of the head in `actions`; `None` when nothing is applied
    index: Option<usize>,

    capacity: usize,
}

impl<A: Action> Default for ActionHistory<A> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<A: Action> ActionHistory<A> {
    /// Create an empty history holding at most `capacity` actions (minimum 1)
    pub fn new(capacity: usize) -> Self {
        Self {
            actions: Vec::new(),
            index: None,
            capacity: capacity.max(1),
        }
    }

    /// Record an action whose effect has already been applied by the caller
    pub fn done(&mut self, action: A) {
        // Discard the undone branch
        let keep = self.index.map_or(0, |i| i + 1);
        self.actions.truncate(keep);

        if self.actions.len() >= self.capacity {
            let evicted = self.actions.remove(0);
            debug!("history full, evicting '{}'", evicted.name());
        }

        debug!("done '{}'", action.name());
        self.actions.push(action);
        self.index = Some(self.actions.len() - 1);
    }

    /// Apply an action and record it
    pub fn perform(&mut self, action: A, target: &mut A::Target) {
        action.redo(target);
        self.done(action);
    }

    /// Undo the head action.
    ///
    /// Returns true if an action was undone, false if there was nothing to undo.
    pub fn undo(&mut self, target: &mut A::Target) -> bool {
        let Some(i) = self.index else {
            return false;
        };
        let action = &self.actions[i];
        debug!("undo '{}'", action.name());
        action.undo(target);
        self.index = i.checked_sub(1);
        true
    }

    /// Redo the next undone action.
    ///
    /// Returns true if an action was redone, false if there was nothing ahead.
    pub fn redo(&mut self, target: &mut A::Target) -> bool {
        let next = self.index.map_or(0, |i| i + 1);
        let Some(action) = self.actions.get(next) else {
            return false;
        };
        debug!("redo '{}'", action.name());
        action.redo(target);
        self.index = Some(next);
        true
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.index.is_some()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.index.map_or(0, |i| i + 1) < self.actions.len()
    }

    /// The last applied action
    pub fn head(&self) -> Option<&A> {
        self.index.map(|i| &self.actions[i])
    }

    /// Name of the action the next undo would reverse
    pub fn undo_name(&self) -> Option<String> {
        self.head().map(|a| a.name())
    }

    /// Name of the action the next redo would apply
    pub fn redo_name(&self) -> Option<String> {
        let next = self.index.map_or(0, |i| i + 1);
        self.actions.get(next).map(|a| a.name())
    }

    /// Index of the head, `None` when everything is undone
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Number of recorded actions, applied or undone
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, shrinking the log if needed.
    ///
    /// Undone actions past the head are dropped first, then the oldest
    /// applied ones. The head always keeps pointing at the same action.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        let excess = self.actions.len().saturating_sub(self.capacity);
        if excess == 0 {
            return;
        }

        let applied = self.index.map_or(0, |i| i + 1);
        let from_redo = excess.min(self.actions.len() - applied);
        self.actions.truncate(self.actions.len() - from_redo);

        let from_front = excess - from_redo;
        if from_front > 0 {
            debug!("history shrunk, evicting {} action(s)", from_front);
            self.actions.drain(0..from_front);
            self.index = self.index.and_then(|i| i.checked_sub(from_front));
        }
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.actions.clear();
        self.index = None;
    }
}
