//! Post-query filters driven by the sidebar. They never touch the database:
//! each takes a slice of already-fetched rows and returns the rows that pass,
//! leaving the input untouched.
//!
//! Column access goes through small traits, so asking to filter a row type by
//! a column it does not carry is a compile error rather than a runtime
//! surprise.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::models::{GenreRating, GenreYearCount, TopRatedBook};

/// Lowest year the sidebar slider can reach.
pub const MIN_YEAR: i64 = 1950;
/// Highest year the sidebar slider can reach.
pub const MAX_YEAR: i64 = 2023;

/// Rows that carry a `genre` column.
pub trait GenreColumn {
    fn genre(&self) -> &str;
}

/// Rows that carry a `publication_year` column.
pub trait PublicationYearColumn {
    fn publication_year(&self) -> i64;
}

impl GenreColumn for GenreRating {
    fn genre(&self) -> &str {
        &self.genre
    }
}

impl GenreColumn for GenreYearCount {
    fn genre(&self) -> &str {
        &self.genre
    }
}

impl PublicationYearColumn for TopRatedBook {
    fn publication_year(&self) -> i64 {
        self.publication_year
    }
}

impl PublicationYearColumn for GenreYearCount {
    fn publication_year(&self) -> i64 {
        self.publication_year
    }
}

/// Genres picked in the multi-select. Empty means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreSelection {
    selected: BTreeSet<String>,
}

impl GenreSelection {
    pub fn new<I, S>(genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected: genres.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, genre: &str) -> bool {
        self.selected.contains(genre)
    }

    /// Whether a row with this genre survives the filter.
    pub fn admits(&self, genre: &str) -> bool {
        self.is_empty() || self.contains(genre)
    }

    /// Flip membership of `genre`; returns whether it is now selected.
    pub fn toggle(&mut self, genre: &str) -> bool {
        if self.selected.remove(genre) {
            false
        } else {
            self.selected.insert(genre.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }
}

/// Inclusive `[lo, hi]` publication year bounds. An inverted range is allowed
/// and simply admits nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub lo: i64,
    pub hi: i64,
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            lo: MIN_YEAR,
            hi: MAX_YEAR,
        }
    }
}

impl YearRange {
    pub fn new(lo: i64, hi: i64) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, year: i64) -> bool {
        self.lo <= year && year <= self.hi
    }

    pub fn as_range(&self) -> RangeInclusive<i64> {
        self.lo..=self.hi
    }

    /// Move the lower handle by `delta`, staying inside the slider bounds and
    /// never passing the upper handle.
    pub fn shift_lo(&mut self, delta: i64) {
        let ceiling = self.hi.clamp(MIN_YEAR, MAX_YEAR);
        self.lo = self.lo.saturating_add(delta).clamp(MIN_YEAR, ceiling);
    }

    /// Move the upper handle by `delta`, staying inside the slider bounds and
    /// never passing the lower handle.
    pub fn shift_hi(&mut self, delta: i64) {
        let floor = self.lo.clamp(MIN_YEAR, MAX_YEAR);
        self.hi = self.hi.saturating_add(delta).clamp(floor, MAX_YEAR);
    }
}

/// Keep rows whose genre is selected; an empty selection keeps everything.
pub fn filter_by_genre<T>(rows: &[T], selection: &GenreSelection) -> Vec<T>
where
    T: GenreColumn + Clone,
{
    rows.iter()
        .filter(|row| selection.admits(row.genre()))
        .cloned()
        .collect()
}

/// Keep rows published within `range`, both ends included.
pub fn filter_by_year_range<T>(rows: &[T], range: YearRange) -> Vec<T>
where
    T: PublicationYearColumn + Clone,
{
    rows.iter()
        .filter(|row| range.contains(row.publication_year()))
        .cloned()
        .collect()
}
