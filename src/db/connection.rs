use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use tracing::{debug, warn};

use crate::error::{DashboardError, DashboardResult};

/// Tables and columns the query catalog reads. Anything else in the file is
/// ignored.
pub const EXPECTED_SCHEMA: &[(&str, &[&str])] = &[
    ("genres", &["id", "name"]),
    ("books", &["id", "title", "publication_year", "genre_id"]),
    (
        "book_stats",
        &["book_id", "rating", "votes", "revenue_millions"],
    ),
];

/// A read-only connection to the book database, scoped to one render cycle.
///
/// There is deliberately no way to clone or stash a `Store`: callers obtain one
/// through [`with_store`], which closes it again before returning.
pub struct Store {
    conn: Connection,
    path: PathBuf,
}

impl Store {
    /// Open the SQLite file read-only and check it against [`EXPECTED_SCHEMA`].
    /// A missing file is a connection failure, never an empty new database.
    pub fn open(path: &Path) -> DashboardResult<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn =
            Connection::open_with_flags(path, flags).map_err(|source| {
                DashboardError::Connection {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        Self::from_connection(conn, path)
    }

    /// Wrap an already-open connection. The connection is switched to
    /// `query_only` so nothing issued through the store can write.
    pub(crate) fn from_connection(conn: Connection, path: &Path) -> DashboardResult<Self> {
        let connection_error = |source| DashboardError::Connection {
            path: path.to_path_buf(),
            source,
        };
        conn.execute_batch("PRAGMA query_only = ON")
            .map_err(connection_error)?;

        let store = Self {
            conn,
            path: path.to_path_buf(),
        };
        store.verify_schema()?;
        debug!(path = %store.path.display(), "opened book database");
        Ok(store)
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Confirm every expected table exists and carries the expected columns.
    fn verify_schema(&self) -> DashboardResult<()> {
        for (table, columns) in EXPECTED_SCHEMA {
            let present = self.table_columns(table)?;
            if present.is_empty() {
                return Err(DashboardError::Schema(format!("missing table `{table}`")));
            }
            if let Some(column) = columns.iter().find(|col| !present.iter().any(|p| p == *col)) {
                return Err(DashboardError::Schema(format!(
                    "table `{table}` has no column `{column}`"
                )));
            }
        }
        Ok(())
    }

    /// Column names of `table`; empty when the table does not exist. This is
    /// also the first statement to touch the file, so a corrupt or non-SQLite
    /// file surfaces here as a connection failure.
    fn table_columns(&self, table: &str) -> DashboardResult<Vec<String>> {
        let connection_error = |source| DashboardError::Connection {
            path: self.path.clone(),
            source,
        };
        let mut stmt = self
            .conn
            .prepare_cached("SELECT name FROM pragma_table_info(?1)")
            .map_err(connection_error)?;

        let columns = stmt
            .query_map([table], |row| row.get::<_, String>(0))
            .map_err(connection_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(connection_error)?;

        Ok(columns)
    }

    /// Release the connection. Failures are logged rather than returned: by the
    /// time we close, the cycle has either produced its result or its error and
    /// neither should be replaced by a close failure.
    pub fn close(self) {
        let path = self.path;
        match self.conn.close() {
            Ok(()) => debug!(path = %path.display(), "closed book database"),
            Err((_conn, err)) => {
                warn!(path = %path.display(), error = %err, "failed to close book database")
            }
        }
    }
}

/// Run `work` against a freshly opened store and close it afterwards, on the
/// success path and the failure path alike.
pub fn with_store<T, F>(path: &Path, work: F) -> DashboardResult<T>
where
    F: FnOnce(&Store) -> DashboardResult<T>,
{
    let store = Store::open(path)?;
    let outcome = work(&store);
    store.close();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::SCHEMA;

    fn seeded(path: &Path, ddl: &str) {
        let conn = Connection::open(path).expect("create fixture db");
        conn.execute_batch(ddl).expect("apply fixture ddl");
    }

    #[test]
    fn missing_file_is_a_connection_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.db");

        let err = Store::open(&path).err().expect("open must fail");
        assert!(matches!(err, DashboardError::Connection { .. }));
        assert!(!path.exists(), "read-only open must not create the file");
    }

    #[test]
    fn garbage_file_is_a_connection_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.db");
        std::fs::write(&path, "this is not sqlite, just some text padding it out a bit")
            .expect("write garbage");

        let err = Store::open(&path).err().expect("open must fail");
        assert!(matches!(err, DashboardError::Connection { .. }));
    }

    #[test]
    fn missing_table_is_a_schema_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("partial.db");
        seeded(
            &path,
            "CREATE TABLE genres (id INTEGER PRIMARY KEY, name TEXT);
             CREATE TABLE books (id INTEGER PRIMARY KEY, title TEXT, publication_year INTEGER, genre_id INTEGER);",
        );

        let err = Store::open(&path).err().expect("open must fail");
        assert!(
            matches!(err, DashboardError::Schema(ref msg) if msg.contains("book_stats")),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("old.db");
        seeded(
            &path,
            "CREATE TABLE genres (id INTEGER PRIMARY KEY, name TEXT);
             CREATE TABLE books (id INTEGER PRIMARY KEY, title TEXT, genre_id INTEGER);
             CREATE TABLE book_stats (book_id INTEGER, rating REAL, votes INTEGER, revenue_millions REAL);",
        );

        let err = Store::open(&path).err().expect("open must fail");
        assert!(
            matches!(err, DashboardError::Schema(ref msg) if msg.contains("publication_year")),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn store_rejects_writes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("books.db");
        seeded(&path, SCHEMA);

        let store = Store::open(&path).expect("open store");
        let result = store
            .connection()
            .execute("INSERT INTO genres (name) VALUES ('Poetry')", []);
        assert!(result.is_err());
        store.close();
    }

    #[test]
    fn with_store_propagates_work_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("books.db");
        seeded(&path, SCHEMA);

        let outcome: DashboardResult<()> = with_store(&path, |_store| {
            Err(DashboardError::Schema("boom".to_string()))
        });
        assert!(matches!(outcome, Err(DashboardError::Schema(_))));

        // The file is still usable afterwards: nothing kept a handle open.
        let reopened = with_store(&path, |store| Ok(store.path().to_path_buf()))
            .expect("reopen store");
        assert_eq!(reopened, path);
    }
}
