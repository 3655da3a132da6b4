//! Chart widgets for the four dashboard panels. Each function draws one panel
//! into the area it is given and falls back to an empty-state message when the
//! filtered rows leave nothing to plot.

use std::collections::BTreeMap;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, List, ListItem,
    Paragraph, Wrap,
};
use ratatui::Frame;

use crate::dashboard::ChartKind;
use crate::models::{GenreRating, GenreYearCount, RevenueVotes, TopRatedBook};

use super::helpers::{format_count, format_rating, padded_bounds, series_color};

/// Shown inside a chart whose rows were all filtered away (or never existed).
pub(crate) const EMPTY_STATE: &str = "No data for the current filters";
/// Ratings are plotted as hundredths so two decimals survive the `u64` bars.
const RATING_SCALE: f64 = 100.0;

fn chart_block(kind: ChartKind) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            kind.title(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
}

pub(crate) fn draw_empty(frame: &mut Frame, area: Rect, kind: ChartKind) {
    let paragraph = Paragraph::new(Span::styled(
        EMPTY_STATE,
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(chart_block(kind));
    frame.render_widget(paragraph, area);
}

/// Color ramp for rating bars, dark for weak genres and bright for strong ones.
fn rating_color(rating: f64) -> Color {
    match rating {
        r if r >= 8.5 => Color::LightGreen,
        r if r >= 7.5 => Color::Green,
        r if r >= 6.5 => Color::Cyan,
        r if r >= 5.0 => Color::Blue,
        _ => Color::Magenta,
    }
}

pub(crate) fn draw_genre_ratings(frame: &mut Frame, area: Rect, rows: &[GenreRating]) {
    let kind = ChartKind::AverageRatingByGenre;
    if rows.is_empty() {
        draw_empty(frame, area, kind);
        return;
    }

    let bars: Vec<Bar> = rows
        .iter()
        .map(|row| {
            Bar::default()
                .label(Line::from(row.genre.clone()))
                .value((row.avg_rating * RATING_SCALE).round().max(0.0) as u64)
                .text_value(format_rating(row.avg_rating))
                .style(Style::default().fg(rating_color(row.avg_rating)))
        })
        .collect();

    let inner_width = area.width.saturating_sub(2);
    let bar_width = (inner_width / rows.len() as u16).saturating_sub(1).clamp(3, 12);

    let chart = BarChart::default()
        .block(chart_block(kind))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .max((10.0 * RATING_SCALE) as u64)
        .value_style(Style::default().fg(Color::Black).add_modifier(Modifier::BOLD));
    frame.render_widget(chart, area);
}

pub(crate) fn draw_top_rated(frame: &mut Frame, area: Rect, rows: &[TopRatedBook]) {
    let kind = ChartKind::TopRatedBooksByYear;
    if rows.is_empty() {
        draw_empty(frame, area, kind);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let points: Vec<(f64, f64)> = rows
        .iter()
        .map(|row| (row.publication_year as f64, row.top_rating))
        .collect();
    let x_bounds = padded_bounds(points.iter().map(|(x, _)| *x));
    let y_bounds = padded_bounds(points.iter().map(|(_, y)| *y));

    let dataset = Dataset::default()
        .name("top rating")
        .marker(Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::Yellow))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(chart_block(kind))
        .x_axis(
            Axis::default()
                .title("Year")
                .bounds(x_bounds)
                .labels(year_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title("Rating")
                .bounds(y_bounds)
                .labels(value_labels(y_bounds, 2)),
        );
    frame.render_widget(chart, chunks[0]);

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| ListItem::new(Line::from(row.to_string())))
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Titles"));
    frame.render_widget(list, chunks[1]);
}

pub(crate) fn draw_revenue_votes(frame: &mut Frame, area: Rect, rows: &[RevenueVotes]) {
    let kind = ChartKind::RevenueVsVotes;
    let points: Vec<(f64, f64)> = rows.iter().filter_map(RevenueVotes::point).collect();
    if points.is_empty() {
        draw_empty(frame, area, kind);
        return;
    }

    let x_bounds = padded_bounds(points.iter().map(|(x, _)| *x));
    let y_bounds = padded_bounds(points.iter().map(|(_, y)| *y));

    let dataset = Dataset::default()
        .name(format!("{} books", format_count(points.len() as i64)))
        .marker(Marker::Braille)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::LightMagenta))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(chart_block(kind))
        .x_axis(
            Axis::default()
                .title("Votes")
                .bounds(x_bounds)
                .labels(value_labels(x_bounds, 0)),
        )
        .y_axis(
            Axis::default()
                .title("Revenue (Millions)")
                .bounds(y_bounds)
                .labels(value_labels(y_bounds, 1)),
        );
    frame.render_widget(chart, area);
}

/// Group the flat count rows into one `(year, count)` series per genre.
pub(crate) fn series_by_genre(rows: &[GenreYearCount]) -> BTreeMap<&str, Vec<(f64, f64)>> {
    let mut series: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
    for row in rows {
        series
            .entry(row.genre.as_str())
            .or_default()
            .push((row.publication_year as f64, row.book_count as f64));
    }
    series
}

pub(crate) fn draw_book_counts(frame: &mut Frame, area: Rect, rows: &[GenreYearCount]) {
    let kind = ChartKind::BookCountByGenreYear;
    if rows.is_empty() {
        draw_empty(frame, area, kind);
        return;
    }

    let series = series_by_genre(rows);
    let x_bounds = padded_bounds(rows.iter().map(|row| row.publication_year as f64));
    let max_count = rows.iter().map(|row| row.book_count).max().unwrap_or(0);
    let y_bounds = [0.0, (max_count as f64 * 1.1).max(1.0)];

    let datasets: Vec<Dataset> = series
        .iter()
        .enumerate()
        .map(|(idx, (genre, points))| {
            Dataset::default()
                .name(genre.to_string())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(series_color(idx)))
                .data(points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(chart_block(kind))
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
        .x_axis(
            Axis::default()
                .title("Year")
                .bounds(x_bounds)
                .labels(year_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title("Number of Books")
                .bounds(y_bounds)
                .labels(value_labels(y_bounds, 0)),
        );
    frame.render_widget(chart, area);
}

fn year_labels(bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|year| format!("{}", year.round() as i64))
        .collect()
}

fn value_labels(bounds: [f64; 2], decimals: usize) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|value| format!("{value:.decimals$}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_split_into_one_series_per_genre() {
        let rows = vec![
            GenreYearCount {
                publication_year: 1965,
                genre: "Sci-Fi".into(),
                book_count: 2,
            },
            GenreYearCount {
                publication_year: 1965,
                genre: "Fantasy".into(),
                book_count: 1,
            },
            GenreYearCount {
                publication_year: 1970,
                genre: "Sci-Fi".into(),
                book_count: 4,
            },
        ];
        let series = series_by_genre(&rows);
        assert_eq!(series.len(), 2);
        assert_eq!(series["Sci-Fi"], vec![(1965.0, 2.0), (1970.0, 4.0)]);
        assert_eq!(series["Fantasy"], vec![(1965.0, 1.0)]);
    }

    #[test]
    fn labels_span_the_bounds() {
        assert_eq!(year_labels([1950.0, 2024.0]), vec!["1950", "1987", "2024"]);
        assert_eq!(value_labels([0.0, 10.0], 1), vec!["0.0", "5.0", "10.0"]);
    }

    #[test]
    fn strong_genres_get_bright_bars() {
        assert_eq!(rating_color(9.1), Color::LightGreen);
        assert_eq!(rating_color(3.0), Color::Magenta);
    }
}
