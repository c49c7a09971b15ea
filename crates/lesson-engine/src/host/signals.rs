use super::window::HostWindow;

/// Window events lessons can subscribe to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum WindowEventKind {
    Resize,
    Focus,
    Blur,
}

/// Callback invoked when a subscribed window event fires.
pub type WindowListener = Box<dyn FnMut(&dyn HostWindow)>;

/// Opaque reference to one registered listener.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ListenerHandle {
    kind: WindowEventKind,
    id: u64,
}

impl ListenerHandle {
    pub fn kind(self) -> WindowEventKind {
        self.kind
    }
}

struct Entry {
    handle: ListenerHandle,
    listener: WindowListener,
}

/// Registry of window-event listeners, owned by the runtime.
///
/// Listeners fire in subscription order. Removal is by handle and idempotent.
#[derive(Default)]
pub struct WindowSignals {
    entries: Vec<Entry>,
    next_id: u64,
}

impl WindowSignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: WindowEventKind, listener: WindowListener) -> ListenerHandle {
        let handle = ListenerHandle { kind, id: self.next_id };
        self.next_id += 1;
        self.entries.push(Entry { handle, listener });
        handle
    }

    /// Removes a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        before != self.entries.len()
    }

    /// Invokes every listener registered for `kind`; returns how many ran.
    pub fn emit(&mut self, kind: WindowEventKind, host: &dyn HostWindow) -> usize {
        let mut fired = 0;
        for entry in self.entries.iter_mut().filter(|e| e.handle.kind == kind) {
            (entry.listener)(host);
            fired += 1;
        }
        fired
    }

    pub fn is_registered(&self, handle: ListenerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn listener_count(&self, kind: WindowEventKind) -> usize {
        self.entries.iter().filter(|e| e.handle.kind == kind).count()
    }
}
