use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::filters::{GenreSelection, YearRange, MAX_YEAR, MIN_YEAR};

/// Rows reserved below the genre list for the year slider.
const YEAR_PANEL_HEIGHT: u16 = 6;
/// Years moved by one PageUp/PageDown press on a slider handle.
pub(crate) const YEAR_PAGE: i64 = 10;

/// Which sidebar control receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Focus {
    #[default]
    Genres,
    YearFrom,
    YearTo,
}

impl Focus {
    pub(crate) fn next(self) -> Self {
        match self {
            Focus::Genres => Focus::YearFrom,
            Focus::YearFrom => Focus::YearTo,
            Focus::YearTo => Focus::Genres,
        }
    }

    pub(crate) fn previous(self) -> Self {
        match self {
            Focus::Genres => Focus::YearTo,
            Focus::YearFrom => Focus::Genres,
            Focus::YearTo => Focus::YearFrom,
        }
    }
}

/// Cursor state of the sidebar. The filter values themselves live in
/// [`crate::dashboard::Filters`]; this only tracks where the user is.
#[derive(Debug, Default)]
pub(crate) struct Sidebar {
    pub(crate) focus: Focus,
    pub(crate) cursor: usize,
}

impl Sidebar {
    pub(crate) fn move_cursor(&mut self, offset: isize, option_count: usize) {
        if option_count == 0 {
            self.cursor = 0;
            return;
        }
        let max_index = option_count as isize - 1;
        self.cursor = (self.cursor as isize + offset).clamp(0, max_index) as usize;
    }

    /// Keep the cursor on a real option after the option list changed size.
    pub(crate) fn ensure_in_bounds(&mut self, option_count: usize) {
        if option_count == 0 {
            self.cursor = 0;
        } else if self.cursor >= option_count {
            self.cursor = option_count - 1;
        }
    }

    pub(crate) fn draw(
        &self,
        frame: &mut Frame,
        area: Rect,
        options: &[String],
        selection: &GenreSelection,
        years: YearRange,
    ) {
        let block = Block::default().borders(Borders::ALL).title("Filters");
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(YEAR_PANEL_HEIGHT)])
            .split(inner);

        self.draw_genres(frame, chunks[0], options, selection);
        self.draw_years(frame, chunks[1], years);
    }

    fn draw_genres(
        &self,
        frame: &mut Frame,
        area: Rect,
        options: &[String],
        selection: &GenreSelection,
    ) {
        let focused = self.focus == Focus::Genres;
        let title = if selection.is_empty() {
            "Genre (all)".to_string()
        } else {
            format!("Genre ({} picked)", selection.iter().count())
        };
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .title(Span::styled(title, heading_style(focused)));

        if options.is_empty() {
            let paragraph = Paragraph::new(Span::styled(
                "No genres available",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = options
            .iter()
            .map(|name| {
                let marker = if selection.contains(name) { "[x]" } else { "[ ]" };
                ListItem::new(Line::from(format!("{marker} {name}")))
            })
            .collect();

        let highlight = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let list = List::new(items).block(block).highlight_style(highlight);
        let mut state = ListState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_years(&self, frame: &mut Frame, area: Rect, years: YearRange) {
        let from_focused = self.focus == Focus::YearFrom;
        let to_focused = self.focus == Focus::YearTo;
        let track_width = area.width.saturating_sub(2) as usize;

        let lines = vec![
            Line::from(Span::styled(
                "Publication Year",
                heading_style(from_focused || to_focused),
            )),
            Line::from(vec![
                Span::raw("From "),
                Span::styled(years.lo.to_string(), value_style(from_focused)),
                Span::raw("  To "),
                Span::styled(years.hi.to_string(), value_style(to_focused)),
            ]),
            Line::from(Span::styled(
                slider_track(years, track_width),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(Span::styled(
                format!("{MIN_YEAR}{:>width$}", MAX_YEAR, width = track_width.saturating_sub(4)),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn heading_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    }
}

fn value_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    }
}

/// Draw the two-handle slider as text: thin line outside the selection, thick
/// line inside, a dot on each handle.
pub(crate) fn slider_track(years: YearRange, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let span = (MAX_YEAR - MIN_YEAR) as f64;
    let position = |year: i64| -> usize {
        let clamped = year.clamp(MIN_YEAR, MAX_YEAR);
        (((clamped - MIN_YEAR) as f64 / span) * (width - 1) as f64).round() as usize
    };
    let lo = position(years.lo);
    let hi = position(years.hi);

    (0..width)
        .map(|idx| {
            if idx == lo || idx == hi {
                '●'
            } else if lo < idx && idx < hi {
                '━'
            } else {
                '─'
            }
        })
        .collect()
}
