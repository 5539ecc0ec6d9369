//! Pointer Lock
//!
//! Tracks whether the pointer is captured for mouse look, and accumulates raw
//! mouse motion between frames. The sandbox starts released: the first click
//! only captures the pointer, Escape releases it. Motion received while
//! released is discarded.

/// What the window layer should do after a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorAction {
    /// No action needed
    None,
    /// Re-apply grab and visibility to the window
    ApplyState,
}

#[derive(Debug, Clone)]
pub struct PointerLock {
    locked: bool,
    has_focus: bool,
    dirty: bool,
    delta_x: f32,
    delta_y: f32,
}

impl Default for PointerLock {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerLock {
    /// Released, focused, and dirty so the window picks up the initial state.
    pub fn new() -> Self {
        Self {
            locked: false,
            has_focus: true,
            dirty: true,
            delta_x: 0.0,
            delta_y: 0.0,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Sets the lock state. Returns `true` if it changed.
    ///
    /// Releasing drops any motion accumulated so the next capture does not jump.
    pub fn set_locked(&mut self, locked: bool) -> bool {
        if self.locked == locked {
            return false;
        }
        self.locked = locked;
        self.dirty = true;
        if !locked {
            self.delta_x = 0.0;
            self.delta_y = 0.0;
        }
        true
    }

    pub fn handle_escape(&mut self) -> CursorAction {
        if self.set_locked(false) {
            CursorAction::ApplyState
        } else {
            CursorAction::None
        }
    }

    /// A click while released captures the pointer.
    pub fn handle_click(&mut self) -> CursorAction {
        if self.set_locked(true) {
            CursorAction::ApplyState
        } else {
            CursorAction::None
        }
    }

    pub fn handle_focus_gained(&mut self) -> CursorAction {
        self.has_focus = true;
        self.dirty = true;
        CursorAction::ApplyState
    }

    /// Keeps the lock preference; the grab is restored on focus gain.
    pub fn handle_focus_lost(&mut self) {
        self.has_focus = false;
        self.delta_x = 0.0;
        self.delta_y = 0.0;
    }

    pub fn should_cursor_be_grabbed(&self) -> bool {
        self.locked && self.has_focus
    }

    pub fn should_cursor_be_visible(&self) -> bool {
        !self.should_cursor_be_grabbed()
    }

    /// Adds raw motion. Ignored unless the pointer is grabbed.
    #[inline]
    pub fn accumulate_delta(&mut self, dx: f32, dy: f32) {
        if self.should_cursor_be_grabbed() {
            self.delta_x += dx;
            self.delta_y += dy;
        }
    }

    /// Returns the accumulated motion and resets it to zero.
    #[inline]
    pub fn consume_delta(&mut self) -> (f32, f32) {
        let delta = (self.delta_x, self.delta_y);
        self.delta_x = 0.0;
        self.delta_y = 0.0;
        delta
    }

    pub fn status_message(&self) -> &'static str {
        if self.locked {
            "ESC to release pointer"
        } else {
            "Click to capture pointer"
        }
    }
}
