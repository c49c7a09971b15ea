use std::collections::HashSet;

use super::types::Key;

/// Input deltas accumulated between two delivered frames.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Keys pressed since the last frame (repeats excluded).
    pub keys_pressed: HashSet<Key>,

    /// Pointer motion while the primary button was held, in logical pixels.
    pub drag: (f32, f32),

    /// Accumulated wheel motion.
    pub wheel: f32,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.drag = (0.0, 0.0);
        self.wheel = 0.0;
    }

    pub fn is_empty(&self) -> bool {
        self.keys_pressed.is_empty() && self.drag == (0.0, 0.0) && self.wheel == 0.0
    }
}
