use std::collections::HashMap;

use super::signals::{ListenerHandle, WindowEventKind, WindowListener, WindowSignals};

/// The window listeners one lesson has registered, at most one per event kind.
///
/// Lets a lesson drop everything it subscribed to in one call at teardown.
#[derive(Debug, Default)]
pub struct WindowListeners {
    handles: HashMap<WindowEventKind, ListenerHandle>,
}

impl WindowListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `listener`, first removing any listener already held for `kind`.
    pub fn replace(
        &mut self,
        signals: &mut WindowSignals,
        kind: WindowEventKind,
        listener: WindowListener,
    ) -> ListenerHandle {
        if let Some(previous) = self.handles.remove(&kind) {
            signals.unsubscribe(previous);
            log::debug!("replaced {kind:?} listener");
        }
        let handle = signals.subscribe(kind, listener);
        self.handles.insert(kind, handle);
        handle
    }

    /// Removes the listener held for `kind`; no-op if none is held.
    pub fn remove(&mut self, signals: &mut WindowSignals, kind: WindowEventKind) -> bool {
        match self.handles.remove(&kind) {
            Some(handle) => signals.unsubscribe(handle),
            None => false,
        }
    }

    /// Removes every held listener. Returns how many were still registered.
    pub fn remove_all(&mut self, signals: &mut WindowSignals) -> usize {
        self.handles
            .drain()
            .filter(|(_, handle)| signals.unsubscribe(*handle))
            .count()
    }

    pub fn get(&self, kind: WindowEventKind) -> Option<ListenerHandle> {
        self.handles.get(&kind).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
