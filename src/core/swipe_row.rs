//! Swipe-to-delete rows.
//!
//! A row slides left over a fixed-width action strip.  While the pointer is
//! down the row follows it directly (clamped so it can never move right of
//! its rest position); on release it settles to fully open or fully closed
//! depending on where it ended and which way it was last moving.

use std::time::Duration;

use super::easing::Easing;
use super::transition::{AnimatedValue, TransitionState};

/// Geometry and timing shared by every row in a list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    /// Width of the revealed action strip.
    pub delete_width: f64,
    /// Fraction of `delete_width` a drag must cover to commit a direction.
    pub snap_fraction: f64,
    pub settle: Duration,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            delete_width: 12.0,
            snap_fraction: 0.2,
            settle: Duration::from_millis(300),
        }
    }
}

impl SwipeConfig {
    /// Leftward releases past this open the row.
    pub fn open_threshold(&self) -> f64 {
        -self.delete_width * self.snap_fraction
    }

    /// Rightward releases short of this close the row.
    pub fn close_threshold(&self) -> f64 {
        -self.delete_width * (1.0 - self.snap_fraction)
    }

    /// Rest position for a release at `end` after starting at `start`.
    pub fn settle_target(&self, start: f64, end: f64) -> f64 {
        let delta = end - start;
        if delta < 0.0 && end < self.open_threshold() {
            return -self.delete_width;
        }
        if delta > 0.0 && end > self.close_threshold() {
            return 0.0;
        }
        if end < -self.delete_width / 2.0 {
            -self.delete_width
        } else {
            0.0
        }
    }
}

/// Something the owning list must act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Delete(u64),
}

#[derive(Debug, Clone, Copy)]
struct DragStart {
    pointer: f64,
    offset: f64,
}

/// Offset state for one row.  Knows its id, not its content.
#[derive(Debug, Clone)]
pub struct SwipeRow {
    id: u64,
    config: SwipeConfig,
    offset: AnimatedValue,
    drag: Option<DragStart>,
    open: bool,
}

impl SwipeRow {
    pub fn new(id: u64, config: SwipeConfig) -> Self {
        Self {
            id,
            config,
            offset: AnimatedValue::new(0.0, config.settle, Easing::EaseOut),
            drag: None,
            open: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Pointer went down on the row.  Interrupts any settle in flight.
    pub fn drag_start(&mut self, pointer: f64) {
        let current = self.offset.value();
        self.offset.jump(current);
        self.drag = Some(DragStart {
            pointer,
            offset: current,
        });
    }

    pub fn drag_move(&mut self, pointer: f64) {
        let Some(start) = self.drag else {
            return;
        };
        let next = (start.offset + pointer - start.pointer).clamp(-self.config.delete_width, 0.0);
        self.offset.jump(next);
    }

    /// Pointer released: settle to a rest position.
    pub fn drag_end(&mut self, now: Duration) {
        let Some(start) = self.drag.take() else {
            return;
        };
        let end = self.offset.value();
        let target = self.config.settle_target(start.offset, end);
        self.commit(target, now);
    }

    /// Animate to the opposite rest position (keyboard path).
    pub fn toggle(&mut self, now: Duration) {
        self.drag = None;
        let target = if self.open { 0.0 } else { -self.config.delete_width };
        self.commit(target, now);
    }

    /// Animate closed if open.
    pub fn close(&mut self, now: Duration) {
        if self.open || self.offset.value() != 0.0 {
            self.drag = None;
            self.commit(0.0, now);
        }
    }

    fn commit(&mut self, target: f64, now: Duration) {
        let open = target < 0.0;
        if open != self.open {
            tracing::debug!(id = self.id, open, "swipe row settled");
        }
        self.open = open;
        self.offset.set(target, now);
    }

    pub fn tick(&mut self, now: Duration) {
        self.offset.advance(now);
    }

    /// Does a press `from_right` cells from the row's right edge land on the
    /// exposed action strip?
    pub fn hits_action(&self, from_right: f64) -> bool {
        from_right >= 0.0 && from_right < self.revealed()
    }

    /// Tap on the row.  Only a tap on the exposed strip produces an action.
    pub fn tap(&self, from_right: f64) -> Option<RowAction> {
        self.hits_action(from_right).then_some(RowAction::Delete(self.id))
    }

    /// Current offset, in `[-delete_width, 0]`.
    pub fn offset(&self) -> f64 {
        self.offset.value()
    }

    /// Width of the action strip currently visible.
    pub fn revealed(&self) -> f64 {
        -self.offset.value()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn flag(&self) -> &'static str {
        if self.open {
            "open"
        } else {
            "closed"
        }
    }

    pub fn state(&self) -> TransitionState {
        if self.offset.is_animating() {
            TransitionState::Animating
        } else {
            TransitionState::Idle
        }
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }
}

/// Content shown on a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: u64,
    pub title: String,
    pub detail: String,
}

impl ListItem {
    pub fn new(id: u64, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// The owner of the list data.  Rows only hold offsets; deletion happens here.
#[derive(Debug, Clone)]
pub struct SwipeList {
    items: Vec<ListItem>,
    rows: Vec<SwipeRow>,
    dragging: Option<usize>,
}

impl SwipeList {
    pub fn new(items: Vec<ListItem>, config: SwipeConfig) -> Self {
        let rows = items.iter().map(|item| SwipeRow::new(item.id, config)).collect();
        Self {
            items,
            rows,
            dragging: None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items paired with their row state, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&ListItem, &SwipeRow)> {
        self.items.iter().zip(self.rows.iter())
    }

    pub fn row(&self, index: usize) -> Option<&SwipeRow> {
        self.rows.get(index)
    }

    pub fn begin_drag(&mut self, index: usize, pointer: f64) {
        if let Some(row) = self.rows.get_mut(index) {
            row.drag_start(pointer);
            self.dragging = Some(index);
        }
    }

    pub fn drag_to(&mut self, pointer: f64) {
        if let Some(row) = self.dragging.and_then(|i| self.rows.get_mut(i)) {
            row.drag_move(pointer);
        }
    }

    pub fn end_drag(&mut self, now: Duration) {
        let Some(index) = self.dragging.take() else {
            return;
        };
        if let Some(row) = self.rows.get_mut(index) {
            row.drag_end(now);
        }
        self.close_others(index, now);
    }

    pub fn toggle(&mut self, index: usize, now: Duration) {
        if let Some(row) = self.rows.get_mut(index) {
            row.toggle(now);
        }
        self.close_others(index, now);
    }

    /// At most one row shows its action strip.
    fn close_others(&mut self, index: usize, now: Duration) {
        if !self.rows.get(index).is_some_and(SwipeRow::is_open) {
            return;
        }
        for (i, row) in self.rows.iter_mut().enumerate() {
            if i != index {
                row.close(now);
            }
        }
    }

    /// Route a tap to the row at `index`; deletes the item when it lands on
    /// the exposed action.  Returns the removed item.
    pub fn tap(&mut self, index: usize, from_right: f64) -> Option<ListItem> {
        let action = self.rows.get(index)?.tap(from_right)?;
        self.apply(action)
    }

    /// Delete the row at `index` if its action strip is showing.
    pub fn delete_if_open(&mut self, index: usize) -> Option<ListItem> {
        let row = self.rows.get(index)?;
        if !row.is_open() {
            return None;
        }
        self.apply(RowAction::Delete(row.id()))
    }

    pub fn apply(&mut self, action: RowAction) -> Option<ListItem> {
        match action {
            RowAction::Delete(id) => self.remove(id),
        }
    }

    pub fn remove(&mut self, id: u64) -> Option<ListItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        self.rows.remove(index);
        self.dragging = match self.dragging {
            Some(d) if d == index => None,
            Some(d) if d > index => Some(d - 1),
            other => other,
        };
        let item = self.items.remove(index);
        tracing::debug!(id, title = %item.title, "list item deleted");
        Some(item)
    }

    pub fn tick(&mut self, now: Duration) {
        for row in &mut self.rows {
            row.tick(now);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.rows.iter().any(|r| r.state() == TransitionState::Animating)
    }
}
