//! Plain-text rendition of one render cycle, for `--print` and for piping the
//! dashboard into other tools.

use std::io::{self, Write};

use crate::dashboard::{ChartKind, DashboardView, Filters};
use crate::ui::{format_count, format_rating, format_revenue};

/// Write the summary tiles followed by every chart's table.
pub fn write_report<W: Write>(out: &mut W, view: &DashboardView, filters: &Filters) -> io::Result<()> {
    writeln!(out, "Book Analytics Dashboard")?;
    writeln!(out)?;

    let summary = &view.summary;
    writeln!(out, "{:<20}{}", "Total Books", format_count(summary.total_books))?;
    writeln!(
        out,
        "{:<20}{}",
        "Average Rating",
        format_rating(summary.average_rating_or_zero())
    )?;
    writeln!(
        out,
        "{:<20}{}",
        "Total Votes",
        format_count(summary.total_votes_or_zero())
    )?;
    writeln!(
        out,
        "{:<20}{}",
        "Total Revenue (M)",
        format_revenue(summary.total_revenue_or_zero())
    )?;

    let genres = if filters.genres.is_empty() {
        "all".to_string()
    } else {
        filters.genres.iter().collect::<Vec<_>>().join(", ")
    };
    writeln!(out)?;
    writeln!(
        out,
        "Filters: genre {genres}; years {}-{}",
        filters.years.lo, filters.years.hi
    )?;

    for kind in ChartKind::ALL {
        writeln!(out)?;
        writeln!(out, "== {} ==", kind.title())?;
        if !has_rows(view, kind) {
            writeln!(out, "(no data)")?;
            continue;
        }
        match kind {
            ChartKind::AverageRatingByGenre => {
                writeln!(out, "{:<24}{:>10}", "genre", "avg_rating")?;
                for row in &view.genre_ratings {
                    writeln!(out, "{:<24}{:>10}", row.genre, format_rating(row.avg_rating))?;
                }
            }
            ChartKind::TopRatedBooksByYear => {
                writeln!(out, "{:<6}{:<40}{:>10}", "year", "title", "top_rating")?;
                for row in &view.top_rated {
                    writeln!(
                        out,
                        "{:<6}{:<40}{:>10}",
                        row.publication_year,
                        row.title,
                        format_rating(row.top_rating)
                    )?;
                }
            }
            ChartKind::RevenueVsVotes => {
                writeln!(out, "{:<40}{:>12}{:>18}", "title", "votes", "revenue_millions")?;
                for row in &view.revenue_votes {
                    let votes = row.votes.map(format_count).unwrap_or_else(|| "-".into());
                    let revenue = row
                        .revenue_millions
                        .map(format_revenue)
                        .unwrap_or_else(|| "-".into());
                    writeln!(out, "{:<40}{:>12}{:>18}", row.title, votes, revenue)?;
                }
            }
            ChartKind::BookCountByGenreYear => {
                writeln!(out, "{:<6}{:<24}{:>10}", "year", "genre", "book_count")?;
                for row in &view.genre_year_counts {
                    writeln!(
                        out,
                        "{:<6}{:<24}{:>10}",
                        row.publication_year, row.genre, row.book_count
                    )?;
                }
            }
        }
    }
    Ok(())
}

/// Whether a table has anything to print. Unlike the chart, the revenue table
/// lists rows that miss one of the two stats.
fn has_rows(view: &DashboardView, kind: ChartKind) -> bool {
    match kind {
        ChartKind::RevenueVsVotes => !view.revenue_votes.is_empty(),
        _ => !view.is_empty(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{GenreSelection, YearRange};
    use crate::models::{GenreRating, RevenueVotes, SummaryMetrics};

    fn render(view: &DashboardView, filters: &Filters) -> String {
        let mut out = Vec::new();
        write_report(&mut out, view, filters).expect("write report");
        String::from_utf8(out).expect("utf8 report")
    }

    #[test]
    fn empty_view_reports_zero_fallbacks_and_no_data() {
        let view = DashboardView {
            summary: SummaryMetrics {
                total_books: 12,
                ..SummaryMetrics::default()
            },
            ..DashboardView::default()
        };
        let text = render(&view, &Filters::default());

        assert!(text.contains("Total Books         12"));
        assert!(text.contains("Average Rating      0.00"));
        assert!(text.contains("Total Votes         0"));
        assert!(text.contains("Total Revenue (M)   $0.00"));
        assert_eq!(text.matches("(no data)").count(), 4);
        assert!(text.contains("Filters: genre all; years 1950-2023"));
    }

    #[test]
    fn tables_list_filtered_rows() {
        let view = DashboardView {
            genre_ratings: vec![GenreRating {
                genre: "Sci-Fi".into(),
                avg_rating: 8.5,
            }],
            ..DashboardView::default()
        };
        let filters = Filters {
            genres: GenreSelection::new(["Sci-Fi"]),
            years: YearRange::new(2000, 2023),
        };
        let text = render(&view, &filters);

        assert!(text.contains("Sci-Fi                        8.50"));
        assert!(text.contains("Filters: genre Sci-Fi; years 2000-2023"));
    }

    #[test]
    fn revenue_rows_missing_a_stat_are_still_listed() {
        let view = DashboardView {
            revenue_votes: vec![
                RevenueVotes {
                    title: "Dune".into(),
                    votes: None,
                    revenue_millions: Some(10.0),
                },
                RevenueVotes {
                    title: "Foundation".into(),
                    votes: Some(500),
                    revenue_millions: None,
                },
            ],
            ..DashboardView::default()
        };
        assert!(view.is_empty(ChartKind::RevenueVsVotes));

        let text = render(&view, &Filters::default());
        assert!(text.contains("Dune"));
        assert!(text.contains("Foundation"));
        assert!(text.lines().any(|line| line.starts_with("Dune") && line.contains(" -")));
        assert_eq!(text.matches("(no data)").count(), 3);
    }
}
