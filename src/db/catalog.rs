//! The fixed catalog of dashboard queries. Every query is addressed by a
//! [`QueryId`] and executed through the connection's prepared statement cache;
//! none of them takes parameters today, and any that ever does must bind them
//! instead of formatting them into the SQL text.

use std::fmt;

use rusqlite::{CachedStatement, Row};
use tracing::{debug, warn};

use crate::error::{DashboardError, DashboardResult};
use crate::models::{GenreRating, GenreYearCount, RevenueVotes, SummaryMetrics, TopRatedBook};

use super::connection::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryId {
    AverageRatingByGenre,
    TopRatedBooksByYear,
    RevenueVsVotes,
    BookCountByGenreYear,
    GenreNames,
    TotalBooks,
    AverageRating,
    TotalVotes,
    TotalRevenue,
}

impl QueryId {
    pub const ALL: [QueryId; 9] = [
        QueryId::AverageRatingByGenre,
        QueryId::TopRatedBooksByYear,
        QueryId::RevenueVsVotes,
        QueryId::BookCountByGenreYear,
        QueryId::GenreNames,
        QueryId::TotalBooks,
        QueryId::AverageRating,
        QueryId::TotalVotes,
        QueryId::TotalRevenue,
    ];

    pub fn name(self) -> &'static str {
        match self {
            QueryId::AverageRatingByGenre => "avg_rating_by_genre",
            QueryId::TopRatedBooksByYear => "top_rated_books_by_year",
            QueryId::RevenueVsVotes => "revenue_vs_votes",
            QueryId::BookCountByGenreYear => "book_count_by_genre_year",
            QueryId::GenreNames => "genre_names",
            QueryId::TotalBooks => "total_books",
            QueryId::AverageRating => "average_rating",
            QueryId::TotalVotes => "total_votes",
            QueryId::TotalRevenue => "total_revenue",
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            // Unrated stats rows are skipped so a genre whose books all lack a
            // rating does not show up as a NULL bar.
            QueryId::AverageRatingByGenre => {
                "SELECT g.name AS genre,
                        ROUND(AVG(bs.rating), 2) AS avg_rating
                 FROM genres g
                 JOIN books b ON g.id = b.genre_id
                 JOIN book_stats bs ON b.id = bs.book_id
                 WHERE bs.rating IS NOT NULL
                 GROUP BY g.name
                 ORDER BY avg_rating DESC, g.name"
            }
            // Correlated subquery: the yearly maximum is recomputed per row.
            // Fine for a catalogue of books; revisit if the table grows by
            // orders of magnitude.
            QueryId::TopRatedBooksByYear => {
                "SELECT b.publication_year,
                        b.title,
                        bs.rating AS top_rating
                 FROM books b
                 JOIN book_stats bs ON b.id = bs.book_id
                 WHERE bs.rating = (
                     SELECT MAX(bs2.rating)
                     FROM book_stats bs2
                     JOIN books b2 ON b2.id = bs2.book_id
                     WHERE b2.publication_year = b.publication_year
                 )
                 ORDER BY b.publication_year, b.title"
            }
            // Vote counts loaded through a float column come back as REAL;
            // the cast keeps them integral and leaves NULL alone.
            QueryId::RevenueVsVotes => {
                "SELECT b.title,
                        CAST(bs.votes AS INTEGER) AS votes,
                        bs.revenue_millions
                 FROM books b
                 JOIN book_stats bs ON b.id = bs.book_id"
            }
            QueryId::BookCountByGenreYear => {
                "SELECT b.publication_year,
                        g.name AS genre,
                        COUNT(*) AS book_count
                 FROM books b
                 JOIN genres g ON g.id = b.genre_id
                 GROUP BY b.publication_year, g.name
                 ORDER BY b.publication_year, g.name"
            }
            QueryId::GenreNames => "SELECT name FROM genres ORDER BY name",
            QueryId::TotalBooks => "SELECT COUNT(*) FROM books",
            QueryId::AverageRating => "SELECT AVG(rating) FROM book_stats",
            QueryId::TotalVotes => "SELECT CAST(SUM(votes) AS INTEGER) FROM book_stats",
            QueryId::TotalRevenue => "SELECT SUM(revenue_millions) FROM book_stats",
        }
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Store {
    /// Prepared statement for a catalog entry, reused across calls on the same
    /// connection.
    pub fn statement(&self, id: QueryId) -> DashboardResult<CachedStatement<'_>> {
        self.connection()
            .prepare_cached(id.sql())
            .map_err(|err| DashboardError::from_query(id.name(), err))
    }

    /// Run a catalog query and map every row through `map_row`.
    fn fetch_rows<T, F>(&self, id: QueryId, map_row: F) -> DashboardResult<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.statement(id)?;
        let rows = stmt
            .query_map([], map_row)
            .map_err(|err| DashboardError::from_query(id.name(), err))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| DashboardError::from_query(id.name(), err))?;

        if rows.is_empty() {
            warn!(query = %id, "query returned no rows");
        } else {
            debug!(query = %id, rows = rows.len(), "query finished");
        }
        Ok(rows)
    }

    /// Run a single-value aggregate query.
    fn fetch_scalar<T>(&self, id: QueryId) -> DashboardResult<T>
    where
        T: rusqlite::types::FromSql,
    {
        let mut stmt = self.statement(id)?;
        let value = stmt
            .query_row([], |row| row.get(0))
            .map_err(|err| DashboardError::from_query(id.name(), err))?;
        Ok(value)
    }

    /// Average rating per genre, best first.
    pub fn average_rating_by_genre(&self) -> DashboardResult<Vec<GenreRating>> {
        self.fetch_rows(QueryId::AverageRatingByGenre, |row| {
            Ok(GenreRating {
                genre: row.get(0)?,
                avg_rating: row.get(1)?,
            })
        })
    }

    /// Every book tied for the best rating of its publication year.
    pub fn top_rated_books_by_year(&self) -> DashboardResult<Vec<TopRatedBook>> {
        self.fetch_rows(QueryId::TopRatedBooksByYear, |row| {
            Ok(TopRatedBook {
                publication_year: row.get(0)?,
                title: row.get(1)?,
                top_rating: row.get(2)?,
            })
        })
    }

    pub fn revenue_vs_votes(&self) -> DashboardResult<Vec<RevenueVotes>> {
        self.fetch_rows(QueryId::RevenueVsVotes, |row| {
            Ok(RevenueVotes {
                title: row.get(0)?,
                votes: row.get(1)?,
                revenue_millions: row.get(2)?,
            })
        })
    }

    pub fn book_count_by_genre_year(&self) -> DashboardResult<Vec<GenreYearCount>> {
        self.fetch_rows(QueryId::BookCountByGenreYear, |row| {
            Ok(GenreYearCount {
                publication_year: row.get(0)?,
                genre: row.get(1)?,
                book_count: row.get(2)?,
            })
        })
    }

    /// Options for the genre multi-select.
    pub fn genre_names(&self) -> DashboardResult<Vec<String>> {
        self.fetch_rows(QueryId::GenreNames, |row| row.get(0))
    }

    /// Headline numbers. `COUNT` never yields NULL; the stat aggregates do
    /// whenever `book_stats` is empty.
    pub fn summary_metrics(&self) -> DashboardResult<SummaryMetrics> {
        Ok(SummaryMetrics {
            total_books: self.fetch_scalar(QueryId::TotalBooks)?,
            average_rating: self.fetch_scalar(QueryId::AverageRating)?,
            total_votes: self.fetch_scalar(QueryId::TotalVotes)?,
            total_revenue: self.fetch_scalar(QueryId::TotalRevenue)?,
        })
    }
}
