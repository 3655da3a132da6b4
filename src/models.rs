//! Row types produced by the query catalog. Each struct is the exact shape one
//! chart consumes; field names match the column aliases in the SQL so the
//! mapping between the two stays obvious when either side changes.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
/// One bar of the "average rating by genre" chart.
pub struct GenreRating {
    /// Genre name as stored in `genres.name`.
    pub genre: String,
    /// Mean rating of the genre, already rounded to two decimals by SQLite.
    pub avg_rating: f64,
}

#[derive(Debug, Clone, PartialEq)]
/// A book whose rating ties the best rating of its publication year.
pub struct TopRatedBook {
    /// Year the book was published.
    pub publication_year: i64,
    /// Title of the book.
    pub title: String,
    /// Best rating recorded for that year.
    pub top_rating: f64,
}

impl fmt::Display for TopRatedBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({:.2})",
            self.publication_year, self.title, self.top_rating
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One point of the revenue vs. votes scatter. Either stat may be missing in
/// the store, so both stay optional until the chart decides how to plot them.
pub struct RevenueVotes {
    /// Title of the book.
    pub title: String,
    /// Reader votes, when recorded.
    pub votes: Option<i64>,
    /// Revenue in millions, when recorded.
    pub revenue_millions: Option<f64>,
}

impl RevenueVotes {
    /// Plot coordinates, or `None` when either axis value is unknown.
    pub fn point(&self) -> Option<(f64, f64)> {
        match (self.votes, self.revenue_millions) {
            (Some(votes), Some(revenue)) => Some((votes as f64, revenue)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Number of books a genre published in a given year.
pub struct GenreYearCount {
    /// Publication year of the counted books.
    pub publication_year: i64,
    /// Genre of the counted books.
    pub genre: String,
    /// Number of books for the year and genre pair.
    pub book_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// The four headline numbers shown above the charts. The stat aggregates are
/// SQL `NULL` whenever `book_stats` holds no usable rows.
pub struct SummaryMetrics {
    /// Row count of `books`, stats or not.
    pub total_books: i64,
    /// Mean of every non-null rating.
    pub average_rating: Option<f64>,
    /// Sum of every non-null vote count.
    pub total_votes: Option<i64>,
    /// Sum of every non-null revenue, in millions.
    pub total_revenue: Option<f64>,
}

impl SummaryMetrics {
    pub fn average_rating_or_zero(&self) -> f64 {
        self.average_rating.unwrap_or(0.0)
    }

    pub fn total_votes_or_zero(&self) -> i64 {
        self.total_votes.unwrap_or(0)
    }

    pub fn total_revenue_or_zero(&self) -> f64 {
        self.total_revenue.unwrap_or(0.0)
    }
}
