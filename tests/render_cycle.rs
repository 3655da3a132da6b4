use std::path::{Path, PathBuf};

use book_analytics_dashboard::{
    filter_by_year_range, render_cycle, with_store, DashboardData, DashboardError, Filters,
    GenreSelection, YearRange,
};
use rusqlite::{params, Connection};

fn fixture(dir: &Path, books: &[(&str, i64, &str, Option<f64>)]) -> PathBuf {
    let path = dir.join("database.db");
    let conn = Connection::open(&path).expect("create db");
    conn.execute_batch(
        "CREATE TABLE genres (id INTEGER PRIMARY KEY, name TEXT NOT NULL UNIQUE);
         CREATE TABLE books (id INTEGER PRIMARY KEY, title TEXT, publication_year INTEGER, genre_id INTEGER);
         CREATE TABLE book_stats (book_id INTEGER PRIMARY KEY, rating REAL, votes INTEGER, revenue_millions REAL);",
    )
    .expect("schema");

    for (title, year, genre, rating) in books {
        conn.execute("INSERT OR IGNORE INTO genres (name) VALUES (?1)", params![genre])
            .expect("genre");
        conn.execute(
            "INSERT INTO books (title, publication_year, genre_id)
             SELECT ?1, ?2, id FROM genres WHERE name = ?3",
            params![title, year, genre],
        )
        .expect("book");
        if let Some(rating) = rating {
            let id = conn.last_insert_rowid();
            conn.execute(
                "INSERT INTO book_stats (book_id, rating, votes, revenue_millions)
                 VALUES (?1, ?2, 100, 1.5)",
                params![id, rating],
            )
            .expect("stats");
        }
    }
    path
}

#[test]
fn tied_top_ratings_produce_one_row_per_book() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = fixture(
        dir.path(),
        &[
            ("Dune", 1965, "Sci-Fi", Some(8.5)),
            ("Foundation", 1965, "Sci-Fi", Some(8.5)),
        ],
    );

    let view = render_cycle(&path, &Filters::default()).expect("render cycle");
    let rows: Vec<_> = view
        .top_rated
        .iter()
        .map(|row| (row.publication_year, row.title.as_str(), row.top_rating))
        .collect();
    assert_eq!(rows, vec![(1965, "Dune", 8.5), (1965, "Foundation", 8.5)]);
}

#[test]
fn empty_stats_table_yields_zero_summary_without_failing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = fixture(
        dir.path(),
        &[
            ("Dune", 1965, "Sci-Fi", None),
            ("Emma", 1815, "Romance", None),
        ],
    );

    let view = render_cycle(&path, &Filters::default()).expect("render cycle");
    assert_eq!(view.summary.total_books, 2);
    assert_eq!(view.summary.average_rating, None);
    assert_eq!(view.summary.total_votes_or_zero(), 0);
    assert_eq!(view.summary.total_revenue_or_zero(), 0.0);
    assert!(view.genre_ratings.is_empty());
    assert!(view.top_rated.is_empty());
}

#[test]
fn filters_apply_after_the_queries() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = fixture(
        dir.path(),
        &[
            ("Dune", 1965, "Sci-Fi", Some(8.5)),
            ("Neuromancer", 1984, "Sci-Fi", Some(8.0)),
            ("The Hobbit", 1951, "Fantasy", Some(9.0)),
        ],
    );

    let filters = Filters {
        genres: GenreSelection::new(["Fantasy"]),
        years: YearRange::new(1960, 1990),
    };
    let view = render_cycle(&path, &filters).expect("render cycle");

    assert_eq!(view.genre_ratings.len(), 1);
    assert_eq!(view.genre_ratings[0].genre, "Fantasy");
    let years: Vec<_> = view.top_rated.iter().map(|r| r.publication_year).collect();
    assert_eq!(years, vec![1965, 1984]);
    // The scatter and the options list are never filtered.
    assert_eq!(view.revenue_votes.len(), 3);
    assert_eq!(view.genre_names, vec!["Fantasy", "Sci-Fi"]);
}

#[test]
fn year_filter_is_idempotent_over_real_results() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = fixture(
        dir.path(),
        &[
            ("A", 1950, "Drama", Some(5.0)),
            ("B", 1999, "Drama", Some(6.0)),
            ("C", 2023, "Drama", Some(7.0)),
        ],
    );

    let data = with_store(&path, DashboardData::fetch).expect("fetch");
    let range = YearRange::new(1950, 1999);
    let once = filter_by_year_range(&data.genre_year_counts, range);
    assert_eq!(filter_by_year_range(&once, range), once);
    assert_eq!(once.len(), 2);
    assert!(filter_by_year_range(&data.genre_year_counts, YearRange::new(2024, 2023)).is_empty());
}

#[test]
fn unreachable_store_aborts_the_cycle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = render_cycle(&dir.path().join("nope.db"), &Filters::default())
        .expect_err("missing file must fail");
    assert!(matches!(err, DashboardError::Connection { .. }));
}

#[test]
fn foreign_database_is_a_schema_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("other.db");
    Connection::open(&path)
        .expect("create db")
        .execute_batch("CREATE TABLE songs (id INTEGER PRIMARY KEY, title TEXT);")
        .expect("schema");

    let err = render_cycle(&path, &Filters::default()).expect_err("schema mismatch");
    assert!(matches!(err, DashboardError::Schema(_)));
}
