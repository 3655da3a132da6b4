//! One render cycle of the dashboard: open the store, run the whole catalog in
//! sequence, close the store, then shape the results with the active filters.
//! Nothing is kept between cycles.

use std::path::Path;
use std::time::Instant;

use tracing::{info, info_span};

use crate::db::{with_store, Store};
use crate::error::DashboardResult;
use crate::filters::{filter_by_genre, filter_by_year_range, GenreSelection, YearRange};
use crate::models::{GenreRating, GenreYearCount, RevenueVotes, SummaryMetrics, TopRatedBook};

/// Sidebar state that shapes a cycle's results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub genres: GenreSelection,
    pub years: YearRange,
}

/// Raw, unfiltered results of every catalog query.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub summary: SummaryMetrics,
    pub genre_names: Vec<String>,
    pub genre_ratings: Vec<GenreRating>,
    pub top_rated: Vec<TopRatedBook>,
    pub revenue_votes: Vec<RevenueVotes>,
    pub genre_year_counts: Vec<GenreYearCount>,
}

impl DashboardData {
    /// Run the catalog against an open store. The first failing query aborts
    /// the whole fetch.
    pub fn fetch(store: &Store) -> DashboardResult<Self> {
        Ok(Self {
            summary: store.summary_metrics()?,
            genre_names: store.genre_names()?,
            genre_ratings: store.average_rating_by_genre()?,
            top_rated: store.top_rated_books_by_year()?,
            revenue_votes: store.revenue_vs_votes()?,
            genre_year_counts: store.book_count_by_genre_year()?,
        })
    }
}

/// The charts of the dashboard, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    AverageRatingByGenre,
    TopRatedBooksByYear,
    RevenueVsVotes,
    BookCountByGenreYear,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::AverageRatingByGenre,
        ChartKind::TopRatedBooksByYear,
        ChartKind::RevenueVsVotes,
        ChartKind::BookCountByGenreYear,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::AverageRatingByGenre => "Average Book Rating by Genre",
            ChartKind::TopRatedBooksByYear => "Top-Rated Books by Year",
            ChartKind::RevenueVsVotes => "Revenue vs. Votes",
            ChartKind::BookCountByGenreYear => "Book Count by Genre Over the Years",
        }
    }
}

/// What the presentation layer draws: the summary plus each chart's rows after
/// filtering.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    pub summary: SummaryMetrics,
    pub genre_names: Vec<String>,
    pub genre_ratings: Vec<GenreRating>,
    pub top_rated: Vec<TopRatedBook>,
    pub revenue_votes: Vec<RevenueVotes>,
    pub genre_year_counts: Vec<GenreYearCount>,
}

impl DashboardView {
    /// The genre selection narrows the rating bars; the year range narrows the
    /// top-rated and book-count charts. The summary and the revenue scatter
    /// always cover the whole store.
    pub fn build(data: &DashboardData, filters: &Filters) -> Self {
        Self {
            summary: data.summary.clone(),
            genre_names: data.genre_names.clone(),
            genre_ratings: filter_by_genre(&data.genre_ratings, &filters.genres),
            top_rated: filter_by_year_range(&data.top_rated, filters.years),
            revenue_votes: data.revenue_votes.clone(),
            genre_year_counts: filter_by_year_range(&data.genre_year_counts, filters.years),
        }
    }

    /// Whether a chart has nothing to plot and should show its empty state.
    pub fn is_empty(&self, chart: ChartKind) -> bool {
        match chart {
            ChartKind::AverageRatingByGenre => self.genre_ratings.is_empty(),
            ChartKind::TopRatedBooksByYear => self.top_rated.is_empty(),
            ChartKind::RevenueVsVotes => self.revenue_votes.iter().all(|r| r.point().is_none()),
            ChartKind::BookCountByGenreYear => self.genre_year_counts.is_empty(),
        }
    }
}

/// Perform one full render cycle against the database at `path`.
pub fn render_cycle(path: &Path, filters: &Filters) -> DashboardResult<DashboardView> {
    let span = info_span!("render_cycle", db = %path.display());
    let _entered = span.enter();
    let started = Instant::now();

    let data = with_store(path, DashboardData::fetch)?;
    let view = DashboardView::build(&data, filters);

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        genres = view.genre_ratings.len(),
        top_rated = view.top_rated.len(),
        points = view.revenue_votes.len(),
        series_points = view.genre_year_counts.len(),
        "render cycle finished"
    );
    Ok(view)
}
