//! Core library surface for the book analytics dashboard.
//!
//! The query catalog and the sidebar filters are usable on their own; the
//! `bin` target layers the terminal UI and the plain-text report on top.
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod filters;
pub mod logging;
pub mod models;
pub mod report;
pub mod ui;

#[cfg(test)]
mod test_support;

/// One render cycle and the state that shapes it.
pub use dashboard::{render_cycle, ChartKind, DashboardData, DashboardView, Filters};

/// Scoped access to the book database and its query catalog.
pub use db::{with_store, QueryId, Store};

pub use error::{DashboardError, DashboardResult};
pub use filters::{filter_by_genre, filter_by_year_range, GenreSelection, YearRange};
pub use models::{GenreRating, GenreYearCount, RevenueVotes, SummaryMetrics, TopRatedBook};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
