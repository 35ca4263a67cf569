use crate::{
    games::GamesDf,
    load_csv,
    players::{GameDetailsDf, PlayersDf},
    teams::{RankingDf, TeamsDf},
    Result, Table,
};
use polars::prelude::DataFrame;
use std::path::Path;

/// The five tables, loaded once and shared read-only by every computation.
#[derive(Clone)]
pub struct Dataset {
    pub games: GamesDf,
    pub details: GameDetailsDf,
    pub players: PlayersDf,
    pub teams: TeamsDf,
    pub ranking: RankingDf,
}

impl Dataset {
    pub fn new(
        games: DataFrame,
        details: DataFrame,
        players: DataFrame,
        teams: DataFrame,
        ranking: DataFrame,
    ) -> Result<Self> {
        Ok(Dataset {
            games: GamesDf::new(games)?,
            details: GameDetailsDf::new(details)?,
            players: PlayersDf::new(players)?,
            teams: TeamsDf::new(teams)?,
            ranking: RankingDf::new(ranking)?,
        })
    }

    /// Reads every table from `dir`. Any missing or malformed file fails the whole load.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let read = |table: Table| -> Result<DataFrame> {
            let df = load_csv(dir.join(table.file_name()))?;
            log::info!("Loaded {} rows from {}", df.height(), table.file_name());
            Ok(df)
        };

        Dataset::new(
            read(Table::Games)?,
            read(Table::GameDetails)?,
            read(Table::Players)?,
            read(Table::Teams)?,
            read(Table::Ranking)?,
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{Error, Selection};
    use polars::prelude::*;
    use std::fs;
    use std::path::PathBuf;

    pub(crate) fn dataset() -> Dataset {
        Dataset::new(
            df!(
                "GAME_DATE_EST" => ["2020-12-23", "2020-12-25", "2019-12-25", "2020-12-27"],
                "SEASON" => [2020i64, 2020, 2019, 2020],
                "HOME_TEAM_ID" => [1i64, 2, 1, 3],
                "VISITOR_TEAM_ID" => [2i64, 1, 2, 2],
                "PTS_home" => [100i64, 110, 80, 99],
                "PTS_away" => [90i64, 95, 70, 101],
            )
            .unwrap(),
            df!(
                "PLAYER_ID" => [10i64, 10, 20],
                "PTS" => [20i64, 30, 12],
                "REB" => [5i64, 7, 10],
                "AST" => [3i64, 1, 4],
            )
            .unwrap(),
            df!(
                "PLAYER_ID" => [10i64, 20, 10],
                "PLAYER_NAME" => ["Ann", "Bo", "Ann"],
            )
            .unwrap(),
            df!(
                "TEAM_ID" => [1i64, 2, 3],
                "NICKNAME" => ["Hawks", "Celtics", "Nets"],
            )
            .unwrap(),
            df!(
                "TEAM_ID" => [1i64, 2, 3, 1],
                "W" => [5i64, 2, 0, 5],
                "L" => [5i64, 6, 0, 0],
            )
            .unwrap(),
        )
        .unwrap()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hoops-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_tables(dir: &Path) {
        let tables = [
            (
                Table::Games,
                "GAME_DATE_EST,GAME_ID,SEASON,HOME_TEAM_ID,VISITOR_TEAM_ID,PTS_home,PTS_away\n\
                 2020-12-23,1,2020,1,2,100,90\n\
                 2020-12-25,2,2020,2,1,110,95\n",
            ),
            (
                Table::GameDetails,
                "GAME_ID,PLAYER_ID,PLAYER_NAME,PTS,REB,AST\n\
                 1,10,Ann,20,5,3\n\
                 1,20,Bo,,,\n",
            ),
            (Table::Players, "PLAYER_NAME,TEAM_ID,PLAYER_ID,SEASON\nAnn,1,10,2020\nBo,2,20,2020\n"),
            (Table::Teams, "TEAM_ID,ABBREVIATION,NICKNAME\n1,ATL,Hawks\n2,BOS,Celtics\n"),
            (Table::Ranking, "TEAM_ID,STANDINGSDATE,G,W,L\n1,2020-12-25,2,1,1\n2,2020-12-25,2,1,1\n"),
        ];
        for (table, contents) in tables {
            fs::write(dir.join(table.file_name()), contents).unwrap();
        }
    }

    #[test]
    fn loads_tables_from_directory() {
        let dir = scratch_dir("load");
        write_tables(&dir);

        let dataset = Dataset::load(&dir).unwrap();
        assert_eq!(dataset.games.height(), 2);
        assert_eq!(dataset.details.height(), 2);
        assert_eq!(dataset.players.width(), 2);

        let games = dataset
            .games
            .for_selection(&dataset.teams, &Selection::new(2020))
            .unwrap();
        assert_eq!(games.height(), 2);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_table_fails_the_load() {
        let dir = scratch_dir("missing");
        write_tables(&dir);
        fs::remove_file(dir.join("ranking.csv")).unwrap();

        let err = Dataset::load(&dir).err().unwrap();
        assert!(matches!(err, Error::MissingTable(p) if p.ends_with("ranking.csv")));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_column_fails_the_load() {
        let dir = scratch_dir("column");
        write_tables(&dir);
        fs::write(dir.join("teams.csv"), "TEAM_ID,ABBREVIATION\n1,ATL\n").unwrap();

        let err = Dataset::load(&dir).err().unwrap();
        assert!(matches!(err, Error::Polars(_)));

        fs::remove_dir_all(dir).unwrap();
    }
}
