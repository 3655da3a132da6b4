use std::path::PathBuf;

use anyhow::Error;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{error, info};

use crate::dashboard::{render_cycle, DashboardView, Filters};

use super::charts::{draw_book_counts, draw_genre_ratings, draw_revenue_votes, draw_top_rated};
use super::helpers::{centered_rect, format_count, format_rating, format_revenue, surface_error};
use super::sidebar::{Focus, Sidebar, YEAR_PAGE};

/// Title bar height including its border.
const HEADER_HEIGHT: u16 = 3;
/// Height of the row of metric tiles.
const METRICS_HEIGHT: u16 = 4;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Width of the filter sidebar.
const SIDEBAR_WIDTH: u16 = 30;

/// Result of the most recent render cycle. A failed cycle replaces every chart
/// with its error; stale charts are never kept around.
enum Snapshot {
    Ready(DashboardView),
    Failed(String),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central dashboard state. It owns the path to the database, never a
/// connection: every refresh opens and closes its own.
pub struct App {
    db_path: PathBuf,
    filters: Filters,
    genre_options: Vec<String>,
    sidebar: Sidebar,
    snapshot: Snapshot,
    status: Option<StatusMessage>,
}

impl App {
    /// Build the app and run the first render cycle.
    pub fn new(db_path: PathBuf, filters: Filters) -> Self {
        let mut app = Self {
            db_path,
            filters,
            genre_options: Vec::new(),
            sidebar: Sidebar::default(),
            snapshot: Snapshot::Failed("Dashboard not loaded yet".to_string()),
            status: None,
        };
        app.refresh();
        app
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// The view of the last successful cycle, if the last cycle succeeded.
    pub fn view(&self) -> Option<&DashboardView> {
        match &self.snapshot {
            Snapshot::Ready(view) => Some(view),
            Snapshot::Failed(_) => None,
        }
    }

    /// Run a full render cycle with the current filters.
    pub fn refresh(&mut self) {
        match render_cycle(&self.db_path, &self.filters) {
            Ok(view) => {
                self.genre_options = view.genre_names.clone();
                self.sidebar.ensure_in_bounds(self.genre_options.len());
                self.snapshot = Snapshot::Ready(view);
                self.clear_status();
            }
            Err(err) => {
                let err = Error::new(err);
                let message = format!("{err:#}");
                error!(error = %message, "render cycle failed");
                self.snapshot = Snapshot::Failed(message);
                self.set_status(surface_error(&err), StatusKind::Error);
            }
        }
    }

    /// Apply one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => self.sidebar.focus = self.sidebar.focus.next(),
            KeyCode::BackTab => self.sidebar.focus = self.sidebar.focus.previous(),
            KeyCode::Char('r') => {
                self.refresh();
                if self.view().is_some() {
                    self.set_status("Dashboard refreshed", StatusKind::Info);
                }
            }
            _ => match self.sidebar.focus {
                Focus::Genres => self.handle_genre_key(code),
                Focus::YearFrom | Focus::YearTo => self.handle_year_key(code),
            },
        }
        false
    }

    fn handle_genre_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.sidebar.move_cursor(-1, self.genre_options.len())
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.sidebar.move_cursor(1, self.genre_options.len())
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(genre) = self.genre_options.get(self.sidebar.cursor).cloned() {
                    let picked = self.filters.genres.toggle(&genre);
                    info!(genre = %genre, picked, "genre filter changed");
                    self.refresh();
                }
            }
            KeyCode::Char('c') => {
                if !self.filters.genres.is_empty() {
                    self.filters.genres.clear();
                    info!("genre filter cleared");
                    self.refresh();
                }
            }
            _ => {}
        }
    }

    fn handle_year_key(&mut self, code: KeyCode) {
        let delta = match code {
            KeyCode::Left | KeyCode::Char('h') => -1,
            KeyCode::Right | KeyCode::Char('l') => 1,
            KeyCode::PageDown => -YEAR_PAGE,
            KeyCode::PageUp => YEAR_PAGE,
            _ => return,
        };

        let before = self.filters.years;
        match self.sidebar.focus {
            Focus::YearFrom => self.filters.years.shift_lo(delta),
            Focus::YearTo => self.filters.years.shift_hi(delta),
            Focus::Genres => {}
        }
        if self.filters.years != before {
            info!(lo = self.filters.years.lo, hi = self.filters.years.hi, "year filter changed");
            self.refresh();
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(METRICS_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(chunks[2]);
        self.sidebar.draw(
            frame,
            body[0],
            &self.genre_options,
            &self.filters.genres,
            self.filters.years,
        );

        match &self.snapshot {
            Snapshot::Ready(view) => {
                self.draw_metrics(frame, chunks[1], view);
                self.draw_charts(frame, body[1], view);
            }
            Snapshot::Failed(message) => {
                let dashboard_area = Rect {
                    x: body[1].x,
                    y: chunks[1].y,
                    width: body[1].width,
                    height: chunks[1].height + body[1].height,
                };
                self.draw_failure(frame, dashboard_area, message);
            }
        }

        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "Book Analytics Dashboard",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", self.db_path.display()),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, area);
    }

    fn draw_metrics(&self, frame: &mut Frame, area: Rect, view: &DashboardView) {
        let summary = &view.summary;
        let tiles = [
            ("Total Books", format_count(summary.total_books)),
            (
                "Average Rating",
                format_rating(summary.average_rating_or_zero()),
            ),
            ("Total Votes", format_count(summary.total_votes_or_zero())),
            (
                "Total Revenue (M)",
                format_revenue(summary.total_revenue_or_zero()),
            ),
        ];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);

        for ((label, value), column) in tiles.into_iter().zip(columns.iter()) {
            let tile = Paragraph::new(Line::from(Span::styled(
                value,
                Style::default().add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(label));
            frame.render_widget(tile, *column);
        }
    }

    fn draw_charts(&self, frame: &mut Frame, area: Rect, view: &DashboardView) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        draw_genre_ratings(frame, top[0], &view.genre_ratings);
        draw_top_rated(frame, top[1], &view.top_rated);
        draw_revenue_votes(frame, bottom[0], &view.revenue_votes);
        draw_book_counts(frame, bottom[1], &view.genre_year_counts);
    }

    fn draw_failure(&self, frame: &mut Frame, area: Rect, message: &str) {
        let popup = centered_rect(80, 50, area);
        frame.render_widget(Clear, popup);
        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(
                "The dashboard could not be loaded",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(message.to_string()),
            Line::from(""),
            Line::from(Span::styled(
                "Press r to retry.",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Error"));
        frame.render_widget(paragraph, popup);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let focus_keys = match self.sidebar.focus {
            Focus::Genres => "↑/↓ move  Space toggle genre  c clear",
            Focus::YearFrom | Focus::YearTo => "←/→ year  PgUp/PgDn ±10",
        };
        Line::from(vec![
            Span::raw(focus_keys),
            Span::styled(
                "  Tab next filter  r refresh  q quit",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
