//! Typed contact events delivered by the physics layer.

/// Classification of the surface the character touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SurfaceKind {
    /// Walkable level geometry. Only ground contacts change grounding.
    #[default]
    Ground,
    /// Anything else (props, triggers, hazards).
    Other,
}

/// Contact began or ended with a surface of the given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    Enter(SurfaceKind),
    Exit(SurfaceKind),
}

impl ContactEvent {
    #[must_use]
    pub fn surface(self) -> SurfaceKind {
        match self {
            ContactEvent::Enter(kind) | ContactEvent::Exit(kind) => kind,
        }
    }
}
