// ── Backend connectivity ──

/// Outcome of the most recently applied refresh cycle.
///
/// Starts out `Disconnected` until the first cycle succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectivityState {
    Live,
    #[default]
    Disconnected,
}

impl ConnectivityState {
    /// Indicator text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Live => "Live",
            Self::Disconnected => "Disconnected",
        }
    }

    /// Style class the indicator is drawn with.
    pub fn style_class(self) -> &'static str {
        match self {
            Self::Live => "connected",
            Self::Disconnected => "disconnected",
        }
    }

    pub fn is_live(self) -> bool {
        self == Self::Live
    }
}
