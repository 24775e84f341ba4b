use crate::stroke::Stroke;
use std::sync::Arc;

/// Ordered strokes plus the redo stack.
///
/// The stroke list is copy-on-write: [`StrokeHistory::shared`] hands out a
/// cheap snapshot, and later mutations clone the list instead of changing
/// what a snapshot holder sees.
#[derive(Debug, Clone, Default)]
pub struct StrokeHistory {
    /// Strokes that can be undone, oldest first
    strokes: Arc<Vec<Stroke>>,
    /// Strokes that can be redone, most recently undone last
    redo_stack: Vec<Stroke>,
}

impl StrokeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a freshly started stroke. Starting new work invalidates
    /// forward history, so the redo stack is dropped.
    pub fn push(&mut self, stroke: Stroke) {
        Arc::make_mut(&mut self.strokes).push(stroke);
        self.redo_stack.clear();
    }

    /// Replaces the in-progress (last) stroke. Returns false when empty.
    pub fn replace_last(&mut self, stroke: Stroke) -> bool {
        match Arc::make_mut(&mut self.strokes).last_mut() {
            Some(last) => {
                *last = stroke;
                true
            }
            None => false,
        }
    }

    pub fn last(&self) -> Option<&Stroke> {
        self.strokes.last()
    }

    /// In-place access to the in-progress stroke. Outstanding snapshots keep
    /// the previous version.
    pub fn last_mut(&mut self) -> Option<&mut Stroke> {
        if self.strokes.is_empty() {
            return None;
        }
        Arc::make_mut(&mut self.strokes).last_mut()
    }

    /// Moves the last stroke onto the redo stack.
    pub fn undo(&mut self) -> bool {
        if self.strokes.is_empty() {
            return false;
        }
        match Arc::make_mut(&mut self.strokes).pop() {
            Some(stroke) => {
                self.redo_stack.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Moves the most recently undone stroke back onto the history.
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(stroke) => {
                Arc::make_mut(&mut self.strokes).push(stroke);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        if !self.strokes.is_empty() {
            self.strokes = Arc::default();
        }
        self.redo_stack.clear();
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn redo_strokes(&self) -> &[Stroke] {
        &self.redo_stack
    }

    /// Snapshot of the stroke list that later edits will not touch.
    pub fn shared(&self) -> Arc<Vec<Stroke>> {
        Arc::clone(&self.strokes)
    }

    pub fn can_undo(&self) -> bool {
        !self.strokes.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}
