use std::collections::VecDeque;

use crate::{EditOp, Scene};

/// The configuration of [`EditHistory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryConfig {
    /// The maximum number of operations kept, unbounded if [`None`].
    ///
    /// When exceeded, the oldest applied operation is dropped and can no longer be undone.
    pub max_len: Option<usize>,
}

/// The linear undo/redo history.
///
/// Operations before the cursor are applied, operations from the cursor on can be redone.
#[derive(Debug, Default)]
pub struct EditHistory {
    ops: VecDeque<EditOp>,
    cursor: usize,
    config: HistoryConfig,
}

impl EditHistory {
    /// Create a new unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new history with the configuration.
    pub fn new_with(config: HistoryConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> HistoryConfig {
        self.config
    }

    /// Whether there is an applied operation to undo.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether there is an undone operation to redo.
    pub fn can_redo(&self) -> bool {
        self.cursor < self.ops.len()
    }

    /// Get the number of applied operations.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the number of operations kept.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if no operation is kept.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Undo the last applied operation, returns whether there was one.
    pub fn undo(&mut self, scene: &mut Scene) -> bool {
        if !self.can_undo() {
            return false;
        }

        self.cursor -= 1;
        let op = &mut self.ops[self.cursor];
        log::debug!("Undoing {} operation", op.name());
        op.undo(scene);
        true
    }

    /// Redo the next undone operation, returns whether there was one.
    pub fn redo(&mut self, scene: &mut Scene) -> bool {
        if !self.can_redo() {
            return false;
        }

        let op = &mut self.ops[self.cursor];
        log::debug!("Applying {} operation", op.name());
        op.apply(scene);
        self.cursor += 1;
        true
    }

    /// Discard the redoable operations, push `op` and apply it.
    pub fn add(&mut self, op: impl Into<EditOp>, scene: &mut Scene) {
        let discarded = self.ops.len() - self.cursor;
        if discarded > 0 {
            log::debug!("Discarding {discarded} redoable operations");
            self.ops.truncate(self.cursor);
        }

        self.ops.push_back(op.into());
        self.redo(scene);

        if let Some(max_len) = self.config.max_len {
            while self.ops.len() > max_len && self.cursor > 0 {
                self.ops.pop_front();
                self.cursor -= 1;
            }
        }
    }

    /// Drop every operation without undoing them.
    pub fn clear(&mut self) {
        log::info!("Clearing {} operations from history", self.ops.len());

        self.ops.clear();
        self.cursor = 0;
    }
}
