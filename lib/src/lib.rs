use parse_display::Display;
use polars::prelude::*;
use std::path::Path;

pub mod chart;
pub mod dashboard;
pub mod dataset;
mod error;
pub mod filter;
pub mod games;
pub mod metrics;
pub mod players;
pub mod selection;
pub mod teams;

pub use dashboard::Dashboard;
pub use dataset::Dataset;
pub use error::Error;
pub use selection::{FilterOptions, Selection};

type Result<T> = std::result::Result<T, error::Error>;

/// Dropdown entry that turns the team or player filter off.
pub const ALL: &str = "All";

/// The five tables the dashboard reads, named after their CSV files.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
#[display(style = "snake_case")]
pub enum Table {
    Games,
    #[display("games_details")]
    GameDetails,
    Players,
    Teams,
    Ranking,
}

impl Table {
    pub fn file_name(self) -> String {
        format!("{}.csv", self)
    }
}

pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::MissingTable(path.to_path_buf()));
    }

    // Scan every row for types; game details mixes blanks into numeric columns
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Rounds to one decimal place, the precision of the metric cards.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_file_names() {
        assert_eq!(Table::Games.file_name(), "games.csv");
        assert_eq!(Table::GameDetails.file_name(), "games_details.csv");
        assert_eq!(Table::Ranking.file_name(), "ranking.csv");
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = load_csv("/definitely/not/here/games.csv").unwrap_err();
        assert!(matches!(err, Error::MissingTable(ref p) if p.ends_with("games.csv")));
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round1(92.5), 92.5);
        assert_eq!(round1(104.96), 105.0);
        assert_eq!(round1(101.04), 101.0);
    }
}
