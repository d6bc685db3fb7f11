//! Application core: event loop, action dispatch, status bar, help overlay.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use watchpost_core::{ConnectivityState, Monitor};

use crate::action::Action;
use crate::component::Component;
use crate::data_bridge::spawn_data_bridge;
use crate::event::{Cadence, Event, TerminalEvents};
use crate::screens::dashboard::DashboardScreen;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::status_indicator;

/// Top-level application state and event loop.
pub struct App {
    monitor: Monitor,
    dashboard: DashboardScreen,
    /// Whether the app should keep running.
    running: bool,
    /// Mirrors the connectivity of the last view state received.
    connectivity: ConnectivityState,
    help_visible: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(monitor: Monitor) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let dashboard = DashboardScreen::new(monitor.config().base_url.as_str());

        Self {
            monitor,
            dashboard,
            running: true,
            connectivity: ConnectivityState::default(),
            help_visible: false,
            action_tx,
            action_rx,
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;

        self.dashboard.init(self.action_tx.clone())?;
        self.dashboard.set_focused(true);
        debug!(component = self.dashboard.id(), "mounted");

        let cancel = CancellationToken::new();
        let bridge = tokio::spawn(spawn_data_bridge(
            self.monitor.clone(),
            self.action_tx.clone(),
            cancel.clone(),
        ));

        let mut events =
            TerminalEvents::new(Cadence::for_refresh(self.monitor.config().refresh_interval));

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize | Event::Render => self.action_tx.send(Action::Render)?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        cancel.cancel();
        bridge.await?;
        drop(tui);
        info!("TUI event loop ended");
        Ok(())
    }

    /// Global keys are handled here; the rest go to the dashboard.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                KeyCode::Char('q') => Ok(Some(Action::Quit)),
                _ => Ok(None),
            };
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Char('r')) => return Ok(Some(Action::Refresh)),
            _ => {}
        }

        self.dashboard.handle_key_event(key)
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::Refresh => {
                debug!("manual refresh requested");
                self.monitor.trigger();
            }

            Action::Render => {}

            other => {
                if let Action::ViewUpdated(state) = other {
                    self.connectivity = state.connectivity;
                }
                if let Some(follow_up) = self.dashboard.update(other)? {
                    self.action_tx.send(follow_up)?;
                }
            }
        }

        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let [content, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        self.dashboard.render(frame, content);
        self.render_status_bar(frame, status);

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::raw(" "),
            status_indicator::connectivity_span(self.connectivity),
            Span::styled(" │ ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("refresh  ", theme::key_hint()),
            Span::styled("j/k ", theme::key_hint_key()),
            Span::styled("scroll alerts  ", theme::key_hint()),
            Span::styled("? ", theme::key_hint_key()),
            Span::styled("help  ", theme::key_hint()),
            Span::styled("q ", theme::key_hint_key()),
            Span::styled("quit", theme::key_hint()),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 44u16.min(area.width.saturating_sub(4));
        let help_height = 14u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let entry = |keys: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(keys, theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled("  Alerts", Style::default().fg(theme::NEON_CYAN))),
            Line::from(Span::styled("  ──────", theme::key_hint())),
            entry("  j/k ↑/↓   ", "Scroll down / up"),
            entry("  g/G       ", "Newest / oldest"),
            Line::from(""),
            Line::from(Span::styled("  Global", Style::default().fg(theme::NEON_CYAN))),
            Line::from(Span::styled("  ──────", theme::key_hint())),
            entry("  r         ", "Refresh now"),
            entry("  ?         ", "This help"),
            entry("  q Ctrl+c  ", "Quit"),
            Line::from(""),
            Line::from(Span::styled("           Esc or ? to close", theme::key_hint())),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}
