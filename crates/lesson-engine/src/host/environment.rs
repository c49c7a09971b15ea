/// Capabilities of the environment a lesson is being set up in.
///
/// Interactive-only pieces (debug panels, orbit controls) check this instead
/// of probing the platform themselves.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Environment {
    /// A user can see and interact with the surface.
    pub interactive: bool,
}

impl Environment {
    pub const fn interactive() -> Self {
        Self { interactive: true }
    }

    pub const fn headless() -> Self {
        Self { interactive: false }
    }
}
