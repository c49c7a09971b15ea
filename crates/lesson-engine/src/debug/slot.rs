use crate::host::Environment;

use super::panel::DebugPanel;

/// Owner of at most one live `DebugPanel`.
///
/// Creating a panel disposes the one already held, so repeated setup never
/// stacks panels.
#[derive(Debug, Default)]
pub struct PanelSlot {
    panel: Option<DebugPanel>,
    created: u64,
    disposed: u64,
}

impl PanelSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh panel named `name`, replacing any existing one.
    ///
    /// Returns `None` without touching the slot when the environment is not
    /// interactive.
    pub fn create(&mut self, env: Environment, name: &str) -> Option<&mut DebugPanel> {
        if !env.interactive {
            log::debug!("not creating debug panel '{name}': environment is headless");
            return None;
        }

        self.dispose();
        self.created += 1;
        log::info!("debug panel '{name}' created");
        Some(self.panel.insert(DebugPanel::new(name)))
    }

    pub fn get(&self) -> Option<&DebugPanel> {
        self.panel.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut DebugPanel> {
        self.panel.as_mut()
    }

    /// Drops the held panel. Returns `false` if there was none.
    pub fn dispose(&mut self) -> bool {
        match self.panel.take() {
            Some(panel) => {
                self.disposed += 1;
                log::info!("debug panel '{}' disposed", panel.name());
                true
            }
            None => false,
        }
    }

    /// Panels created through this slot and not yet disposed.
    pub fn live(&self) -> u64 {
        self.created - self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creating_twice_leaves_one_live_panel() {
        let mut slot = PanelSlot::new();
        slot.create(Environment::interactive(), "first");
        slot.create(Environment::interactive(), "second");

        assert_eq!(slot.live(), 1);
        assert_eq!(slot.get().map(DebugPanel::name), Some("second"));
    }

    #[test]
    fn headless_environment_creates_nothing() {
        let mut slot = PanelSlot::new();
        assert!(slot.create(Environment::headless(), "gui").is_none());
        assert_eq!(slot.live(), 0);
    }

    #[test]
    fn dispose_is_idempotent() {
        let mut slot = PanelSlot::new();
        slot.create(Environment::interactive(), "gui");

        assert!(slot.dispose());
        assert!(!slot.dispose());
        assert_eq!(slot.live(), 0);
        assert!(slot.get().is_none());
    }
}
