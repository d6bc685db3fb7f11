//! Connectivity indicator: ●/○ with color mapping.

use ratatui::style::Style;
use ratatui::text::Span;
use watchpost_core::ConnectivityState;

use crate::theme;

/// Returns a styled `Span` with the status dot and label.
pub fn connectivity_span(state: ConnectivityState) -> Span<'static> {
    let color = match state {
        ConnectivityState::Live => theme::SUCCESS_GREEN,
        ConnectivityState::Disconnected => theme::ERROR_RED,
    };
    Span::styled(
        format!("{} {}", connectivity_char(state), state.label()),
        Style::default().fg(color),
    )
}

/// Returns the status dot character without styling.
pub fn connectivity_char(state: ConnectivityState) -> &'static str {
    match state {
        ConnectivityState::Live => "●",
        ConnectivityState::Disconnected => "○",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_is_green_dot() {
        let span = connectivity_span(ConnectivityState::Live);
        assert_eq!(span.content, "● Live");
        assert_eq!(span.style.fg, Some(theme::SUCCESS_GREEN));
    }

    #[test]
    fn disconnected_is_red_ring() {
        let span = connectivity_span(ConnectivityState::Disconnected);
        assert_eq!(span.content, "○ Disconnected");
        assert_eq!(span.style.fg, Some(theme::ERROR_RED));
    }
}
