//! SQLite fixtures shared by the unit tests.

use std::path::PathBuf;

use rusqlite::{params, Connection};
use tempfile::TempDir;

pub(crate) const SCHEMA: &str = "
    CREATE TABLE genres (id INTEGER PRIMARY KEY, name TEXT NOT NULL UNIQUE);
    CREATE TABLE books (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        publication_year INTEGER NOT NULL,
        genre_id INTEGER NOT NULL REFERENCES genres(id)
    );
    CREATE TABLE book_stats (
        book_id INTEGER PRIMARY KEY REFERENCES books(id),
        rating REAL,
        votes INTEGER,
        revenue_millions REAL
    );";

pub(crate) struct FixtureBook {
    pub(crate) title: &'static str,
    pub(crate) year: i64,
    pub(crate) genre: &'static str,
    pub(crate) stats: Option<(f64, i64, f64)>,
}

impl FixtureBook {
    pub(crate) fn rated(
        title: &'static str,
        year: i64,
        genre: &'static str,
        rating: f64,
        votes: i64,
        revenue_millions: f64,
    ) -> Self {
        Self {
            title,
            year,
            genre,
            stats: Some((rating, votes, revenue_millions)),
        }
    }
}

/// Write a database holding `books` into a fresh temp dir. Keep the `TempDir`
/// alive for as long as the path is used.
pub(crate) fn fixture_db(books: &[FixtureBook]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("books.db");
    let conn = Connection::open(&path).expect("create fixture db");
    conn.execute_batch(SCHEMA).expect("create schema");

    for book in books {
        conn.execute(
            "INSERT OR IGNORE INTO genres (name) VALUES (?1)",
            params![book.genre],
        )
        .expect("insert genre");
        conn.execute(
            "INSERT INTO books (title, publication_year, genre_id)
             SELECT ?1, ?2, id FROM genres WHERE name = ?3",
            params![book.title, book.year, book.genre],
        )
        .expect("insert book");
        if let Some((rating, votes, revenue)) = book.stats {
            let book_id = conn.last_insert_rowid();
            conn.execute(
                "INSERT INTO book_stats (book_id, rating, votes, revenue_millions)
                 VALUES (?1, ?2, ?3, ?4)",
                params![book_id, rating, votes, revenue],
            )
            .expect("insert stats");
        }
    }

    (dir, path)
}
