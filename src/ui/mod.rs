//! Ratatui front-end for the book analytics dashboard: a title bar, four metric
//! tiles, the filter sidebar and a 2x2 grid of charts.

mod app;
mod charts;
mod helpers;
mod sidebar;
mod terminal;

pub use app::App;
pub use helpers::{format_count, format_rating, format_revenue};
pub use terminal::run_app;
