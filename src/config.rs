use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::BaseDirs;

use crate::dashboard::Filters;
use crate::filters::{GenreSelection, YearRange, MAX_YEAR, MIN_YEAR};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".book-analytics";
/// Log folder inside the application data directory.
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Parser)]
#[command(name = "book-analytics")]
#[command(about = "Terminal dashboard over a SQLite database of books.")]
pub struct CommandLine {
    /// SQLite file holding the books, genres and book_stats tables
    #[arg(long, value_name = "PATH", default_value = "database.db")]
    pub db: PathBuf,

    /// First publication year included in the year-filtered charts
    #[arg(long, value_name = "YEAR", default_value_t = MIN_YEAR)]
    pub from_year: i64,

    /// Last publication year included in the year-filtered charts
    #[arg(long, value_name = "YEAR", default_value_t = MAX_YEAR)]
    pub to_year: i64,

    /// Restrict the rating chart to a genre (repeatable)
    #[arg(long = "genre", value_name = "NAME")]
    pub genres: Vec<String>,

    /// Print a plain-text report instead of starting the dashboard
    #[arg(long)]
    pub print: bool,

    /// Where log files are written
    #[arg(long, value_name = "PATH")]
    pub log_dir: Option<PathBuf>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Initial sidebar state.
    pub fn filters(&self) -> Filters {
        Filters {
            genres: GenreSelection::new(self.genres.iter().cloned()),
            years: YearRange::new(self.from_year, self.to_year),
        }
    }

    /// The explicit `--log-dir`, or `~/.book-analytics/logs`.
    pub fn log_dir(&self) -> Result<PathBuf> {
        match &self.log_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_log_dir(),
        }
    }
}

fn default_log_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs
        .home_dir()
        .join(DATA_DIR_NAME)
        .join(LOG_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_whole_slider() {
        let cli = CommandLine::try_parse_from(["book-analytics"]).expect("parse defaults");
        assert_eq!(cli.db, PathBuf::from("database.db"));
        assert!(!cli.print);
        assert_eq!(cli.filters(), Filters::default());
    }

    #[test]
    fn flags_map_onto_filters() {
        let cli = CommandLine::try_parse_from([
            "book-analytics",
            "--db",
            "books.sqlite",
            "--from-year",
            "2000",
            "--to-year",
            "2010",
            "--genre",
            "Sci-Fi",
            "--genre",
            "Fantasy",
            "--print",
        ])
        .expect("parse flags");

        let filters = cli.filters();
        assert_eq!(filters.years, YearRange::new(2000, 2010));
        assert!(filters.genres.contains("Sci-Fi"));
        assert!(filters.genres.contains("Fantasy"));
        assert!(cli.print);
        assert_eq!(cli.db, PathBuf::from("books.sqlite"));
    }

    #[test]
    fn explicit_log_dir_wins() {
        let cli = CommandLine::try_parse_from(["book-analytics", "--log-dir", "/tmp/dash-logs"])
            .expect("parse log dir");
        assert_eq!(cli.log_dir().expect("log dir"), PathBuf::from("/tmp/dash-logs"));
    }
}
