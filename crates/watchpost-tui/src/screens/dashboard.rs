//! Dashboard screen: header, metric cards, nodes table, alerts table.
//!
//! Purely a reader of [`ViewState`]: every string drawn here was produced
//! by the core renderers. This screen only lays rows out and maps style
//! classes to colors.

use std::sync::Arc;

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};
use throbber_widgets_tui::{Throbber, ThrobberState};

use watchpost_core::{AlertRow, MetricCard, NodeRow, ViewState};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

const CARD_WIDTH: u16 = 26;
const CARD_HEIGHT: u16 = 3;
const MAX_CARD_ROWS: usize = 3;

pub struct DashboardScreen {
    focused: bool,
    base_url: String,
    view: Arc<ViewState>,
    /// Index of the first alert row drawn.
    alert_offset: usize,
    throbber_state: ThrobberState,
}

impl DashboardScreen {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            focused: false,
            base_url: base_url.into(),
            view: Arc::new(ViewState::default()),
            alert_offset: 0,
            throbber_state: ThrobberState::default(),
        }
    }

    fn alert_count(&self) -> usize {
        self.view.views.alerts.len()
    }

    fn last_alert_index(&self) -> usize {
        self.alert_count().saturating_sub(1)
    }

    fn waiting_for_first_snapshot(&self) -> bool {
        self.view.last_success.is_none()
    }

    fn updated_label(&self) -> String {
        match self.view.last_success {
            Some(at) => {
                let secs = (Utc::now() - at).num_seconds().max(0);
                format!("updated {secs}s ago")
            }
            None => "waiting for first snapshot".into(),
        }
    }

    /// Cards laid out per row for the given inner width.
    fn cards_per_row(width: u16) -> usize {
        usize::from((width / CARD_WIDTH).max(1))
    }

    /// Height of the metrics panel, borders included.
    fn metrics_height(&self, width: u16) -> u16 {
        let count = self.view.views.metrics.len();
        if count == 0 {
            return 3;
        }
        let per_row = Self::cards_per_row(width.saturating_sub(2));
        let rows = count.div_ceil(per_row).min(MAX_CARD_ROWS);
        u16::try_from(rows).unwrap_or(1) * CARD_HEIGHT + 2
    }

    fn panel(title: String) -> Block<'static> {
        Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default())
    }

    // ── Header ───────────────────────────────────────────────────

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let [left, right] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(34)]).areas(area);

        let mut spans = vec![
            Span::styled(" watchpost ", theme::title_style()),
            Span::styled(self.base_url.clone(), Style::default().fg(theme::CORAL)),
        ];
        if self.view.is_stale() {
            spans.push(Span::styled(
                "  showing last good snapshot",
                Style::default().fg(theme::ELECTRIC_YELLOW),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), left);

        if self.waiting_for_first_snapshot() {
            let throbber = Throbber::default()
                .label(self.updated_label())
                .style(theme::key_hint())
                .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
            frame.render_stateful_widget(throbber, right, &mut self.throbber_state.clone());
        } else {
            frame.render_widget(
                Paragraph::new(Span::styled(self.updated_label(), theme::key_hint()))
                    .alignment(Alignment::Right),
                right,
            );
        }
    }

    // ── Metrics ──────────────────────────────────────────────────

    fn render_metrics(&self, frame: &mut Frame, area: Rect) {
        let metrics = &self.view.views.metrics;
        let block = Self::panel(format!(" Metrics ({}) ", metrics.len()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if metrics.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  No metrics reported", theme::key_hint())),
                inner,
            );
            return;
        }

        let per_row = Self::cards_per_row(inner.width);
        let (shown, hidden) = visible_cards(metrics.len(), per_row);
        let slots = shown + usize::from(hidden > 0);

        let row_areas = Layout::vertical(
            (0..slots.div_ceil(per_row)).map(|_| Constraint::Length(CARD_HEIGHT)),
        )
        .split(inner);
        let ratio = u32::try_from(per_row).unwrap_or(1);
        let cells: Vec<Rect> = row_areas
            .iter()
            .flat_map(|row| {
                Layout::horizontal((0..per_row).map(|_| Constraint::Ratio(1, ratio)))
                    .split(*row)
                    .to_vec()
            })
            .collect();

        for (card, cell) in metrics.iter().take(shown).zip(cells.iter()) {
            render_card(frame, card, *cell);
        }
        if let Some(cell) = cells.get(shown).filter(|_| hidden > 0) {
            let marker = MetricCard {
                label: "metrics".into(),
                value: format!("+{hidden} more"),
            };
            render_card(frame, &marker, *cell);
        }
    }

    // ── Nodes ────────────────────────────────────────────────────

    fn render_nodes(&self, frame: &mut Frame, area: Rect) {
        let nodes = &self.view.views.nodes;
        let block = Self::panel(format!(" Nodes ({}) ", nodes.len()));

        if nodes.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new(Span::styled("  No nodes reported", theme::key_hint())),
                inner,
            );
            return;
        }

        let header = Row::new(
            ["Node", "Health", "Uptime (s)", "Last Seen (s)", "Last Seq"]
                .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let rows: Vec<Row> = nodes.iter().map(node_row).collect();
        let widths = [
            Constraint::Fill(2),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(10),
        ];

        let table = Table::new(rows, widths).header(header).block(block);
        frame.render_widget(table, area);
    }

    // ── Alerts ───────────────────────────────────────────────────

    fn render_alerts(&self, frame: &mut Frame, area: Rect) {
        let alerts = &self.view.views.alerts;
        let title = if alerts.is_empty() {
            " Alerts (0) ".to_string()
        } else {
            format!(
                " Alerts ({}) [{}/{}] ",
                alerts.len(),
                self.alert_offset + 1,
                alerts.len()
            )
        };
        let block = Self::panel(title).border_style(if self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        });

        if alerts.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new(Span::styled("  No alerts yet", theme::key_hint())),
                inner,
            );
            return;
        }

        let header = Row::new(
            ["Time (UTC)", "Alert", "Node", "Class", "Latency (ms)"]
                .map(|h| Cell::from(h).style(theme::table_header())),
        );
        let rows: Vec<Row> = alerts.iter().skip(self.alert_offset).map(alert_row).collect();
        let widths = [
            Constraint::Length(24),
            Constraint::Length(12),
            Constraint::Fill(1),
            Constraint::Length(10),
            Constraint::Length(13),
        ];

        let table = Table::new(rows, widths).header(header).block(block);
        frame.render_widget(table, area);
    }
}

/// Cards drawn and cards folded into the overflow marker. When the grid
/// overflows, the last slot goes to the marker.
fn visible_cards(count: usize, per_row: usize) -> (usize, usize) {
    let capacity = per_row * MAX_CARD_ROWS;
    if count <= capacity {
        (count, 0)
    } else {
        let shown = capacity.saturating_sub(1);
        (shown, count - shown)
    }
}

fn render_card(frame: &mut Frame, card: &MetricCard, area: Rect) {
    let block = Block::default()
        .title(Span::styled(format!(" {} ", card.label), theme::key_hint()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_default());
    let paragraph = Paragraph::new(Span::styled(card.value.clone(), theme::metric_value()))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

fn node_row(node: &NodeRow) -> Row<'static> {
    Row::new(vec![
        Cell::from(node.id.clone()).style(theme::table_row()),
        Cell::from(node.health.clone())
            .style(Style::default().fg(theme::health_color(node.health_class))),
        Cell::from(node.uptime.clone()).style(theme::table_row()),
        Cell::from(node.last_seen_age.clone()).style(theme::table_row()),
        Cell::from(node.last_sequence.clone()).style(theme::table_row()),
    ])
}

fn alert_row(alert: &AlertRow) -> Row<'static> {
    Row::new(vec![
        Cell::from(alert.timestamp.clone()).style(Style::default().fg(theme::ELECTRIC_YELLOW)),
        Cell::from(alert.short_id.clone()).style(theme::table_row()),
        Cell::from(alert.source_node.clone()).style(theme::table_row()),
        Cell::from(alert.classification.clone()).style(
            Style::default().fg(theme::classification_color(&alert.classification_class)),
        ),
        Cell::from(alert.latency.clone()).style(theme::table_row()),
    ])
}

impl Component for DashboardScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::ScrollToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Action::ScrollToBottom),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ViewUpdated(state) => {
                self.view = Arc::clone(state);
                self.alert_offset = self.alert_offset.min(self.last_alert_index());
            }
            Action::Tick if self.waiting_for_first_snapshot() => {
                self.throbber_state.calc_next();
            }
            Action::ScrollDown => {
                self.alert_offset = (self.alert_offset + 1).min(self.last_alert_index());
            }
            Action::ScrollUp => {
                self.alert_offset = self.alert_offset.saturating_sub(1);
            }
            Action::ScrollToTop => self.alert_offset = 0,
            Action::ScrollToBottom => self.alert_offset = self.last_alert_index(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let nodes_height = u16::try_from(self.view.views.nodes.len())
            .unwrap_or(u16::MAX)
            .saturating_add(3)
            .max(4);

        let [header, metrics, nodes, alerts] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(self.metrics_height(area.width)),
            Constraint::Max(nodes_height),
            Constraint::Min(6),
        ])
        .areas(area);

        self.render_header(frame, header);
        self.render_metrics(frame, metrics);
        self.render_nodes(frame, nodes);
        self.render_alerts(frame, alerts);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Dashboard"
    }
}
