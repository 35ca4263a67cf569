use crate::{Error, Result};
use derive_deref::Deref;
use itertools::izip;
use polars::prelude::*;
use serde::Serialize;

pub const TEAM_ID: &str = "TEAM_ID";
pub const NICKNAME: &str = "NICKNAME";
pub const WINS: &str = "W";
pub const LOSSES: &str = "L";
pub const WIN_PCT: &str = "WIN_PCT";

#[derive(Clone, Deref)]
pub struct TeamsDf(DataFrame);

impl TeamsDf {
    pub fn new(df: DataFrame) -> Result<Self> {
        let df = df
            .lazy()
            .select([
                col(TEAM_ID).cast(DataType::Int64),
                col(NICKNAME).cast(DataType::String),
            ])
            .filter(col(TEAM_ID).is_first_distinct())
            .collect()?;
        Ok(TeamsDf(df))
    }

    pub fn lazy(&self) -> LazyFrame {
        self.0.clone().lazy()
    }

    /// Resolves a nickname to its team id; the first row wins when several match.
    pub fn team_id(&self, nickname: &str) -> Result<i64> {
        let df = self
            .lazy()
            .filter(col(NICKNAME).eq(lit(nickname)))
            .select([col(TEAM_ID)])
            .limit(1)
            .collect()?;

        let id = df
            .column(TEAM_ID)?
            .i64()?
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| Error::UnknownTeam(nickname.to_string()));
        id
    }

    /// Distinct nicknames, ascending.
    pub fn nicknames(&self) -> Result<Vec<String>> {
        let df = self
            .lazy()
            .select([col(NICKNAME).drop_nulls().unique().sort(SortOptions::default())])
            .collect()?;
        let names = df
            .column(NICKNAME)?
            .str()?
            .into_iter()
            .flatten()
            .map(String::from)
            .collect();
        Ok(names)
    }
}

#[derive(Clone, Deref)]
pub struct RankingDf(DataFrame);

impl RankingDf {
    pub fn new(df: DataFrame) -> Result<Self> {
        let df = df
            .lazy()
            .select([
                col(TEAM_ID).cast(DataType::Int64),
                col(WINS).cast(DataType::Int64),
                col(LOSSES).cast(DataType::Int64),
            ])
            .collect()?;
        Ok(RankingDf(df))
    }

    pub fn lazy(&self) -> LazyFrame {
        self.0.clone().lazy()
    }

    /// Summed wins and losses per team with win percentage, best `n` teams first.
    ///
    /// Teams without a decided game have a null win percentage and sort last.
    /// Ties keep ascending team id order.
    pub fn team_standings(&self, teams: &TeamsDf, n: usize) -> Result<DataFrame> {
        let decided = col(WINS) + col(LOSSES);
        let win_pct = when(decided.clone().eq(lit(0i64)))
            .then(lit(NULL).cast(DataType::Float64))
            .otherwise(col(WINS).cast(DataType::Float64) / decided.cast(DataType::Float64))
            .alias(WIN_PCT);

        let join_args = JoinArgs::new(JoinType::Inner);
        let df = self
            .lazy()
            .group_by([col(TEAM_ID)])
            .agg([col(WINS).sum(), col(LOSSES).sum()])
            .with_column(win_pct)
            .join(teams.lazy(), [col(TEAM_ID)], [col(TEAM_ID)], join_args)
            .sort(
                [WIN_PCT, TEAM_ID],
                SortMultipleOptions::default()
                    .with_order_descending_multi([true, false])
                    .with_nulls_last(true)
                    .with_maintain_order(true),
            )
            .limit(n as IdxSize)
            .select([col(TEAM_ID), col(NICKNAME), col(WINS), col(LOSSES), col(WIN_PCT)])
            .collect()?;

        log::debug!("{} teams in standings", df.height());
        Ok(df)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStanding {
    pub team_id: i64,
    pub nickname: String,
    pub wins: i64,
    pub losses: i64,
    pub win_pct: Option<f64>,
}

impl TeamStanding {
    pub fn from_frame(df: &DataFrame) -> Result<Vec<Self>> {
        let rows = izip!(
            df.column(TEAM_ID)?.i64()?,
            df.column(NICKNAME)?.str()?,
            df.column(WINS)?.i64()?,
            df.column(LOSSES)?.i64()?,
            df.column(WIN_PCT)?.f64()?,
        )
        .filter_map(|(team_id, nickname, wins, losses, win_pct)| {
            Some(TeamStanding {
                team_id: team_id?,
                nickname: nickname.unwrap_or_default().to_string(),
                wins: wins.unwrap_or(0),
                losses: losses.unwrap_or(0),
                win_pct,
            })
        })
        .collect();
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams() -> TeamsDf {
        let df = df!(
            TEAM_ID => [1i64, 2, 3, 4, 5, 2],
            NICKNAME => ["Hawks", "Celtics", "Nets", "Bulls", "Jazz", "Celtics"],
        )
        .unwrap();
        TeamsDf::new(df).unwrap()
    }

    fn ranking() -> RankingDf {
        // Two standings snapshots per team, plus a ranking row with no team
        let df = df!(
            TEAM_ID => [1i64, 1, 2, 2, 3, 3, 4, 5, 5, 99],
            WINS => [1i64, 2, 3, 3, 2, 4, 0, 0, 0, 50],
            LOSSES => [1i64, 2, 1, 1, 2, 2, 0, 3, 1, 0],
        )
        .unwrap();
        RankingDf::new(df).unwrap()
    }

    #[test]
    fn duplicate_team_ids_are_dropped() {
        assert_eq!(teams().height(), 5);
        assert_eq!(teams().team_id("Celtics").unwrap(), 2);
    }

    #[test]
    fn unknown_nickname() {
        assert!(matches!(teams().team_id("Sonics"), Err(Error::UnknownTeam(_))));
    }

    #[test]
    fn shared_nickname_resolves_to_first_row() {
        let df = df!(
            TEAM_ID => [7i64, 3],
            NICKNAME => ["Kings", "Kings"],
        )
        .unwrap();
        let teams = TeamsDf::new(df).unwrap();
        assert_eq!(teams.team_id("Kings").unwrap(), 7);
        assert_eq!(teams.nicknames().unwrap(), vec!["Kings"]);
    }

    #[test]
    fn nicknames_sorted() {
        assert_eq!(
            teams().nicknames().unwrap(),
            vec!["Bulls", "Celtics", "Hawks", "Jazz", "Nets"]
        );
    }

    #[test]
    fn win_percentage_is_wins_over_decided_games() {
        let standings =
            TeamStanding::from_frame(&ranking().team_standings(&teams(), 10).unwrap()).unwrap();

        let celtics = standings.iter().find(|t| t.team_id == 2).unwrap();
        assert_eq!((celtics.wins, celtics.losses), (6, 2));
        assert_eq!(celtics.win_pct, Some(0.75));

        for team in &standings {
            if let Some(pct) = team.win_pct {
                assert!((0.0..=1.0).contains(&pct));
                assert_eq!(pct, team.wins as f64 / (team.wins + team.losses) as f64);
            }
        }
    }

    #[test]
    fn undecided_team_has_no_win_percentage_and_ranks_last() {
        let standings =
            TeamStanding::from_frame(&ranking().team_standings(&teams(), 10).unwrap()).unwrap();
        let last = standings.last().unwrap();
        assert_eq!(last.nickname, "Bulls");
        assert_eq!(last.win_pct, None);
    }

    #[test]
    fn standings_sorted_descending_with_ties_by_team_id() {
        let standings =
            TeamStanding::from_frame(&ranking().team_standings(&teams(), 10).unwrap()).unwrap();

        // Unmatched team 99 is dropped by the join
        let ids: Vec<_> = standings.iter().map(|t| t.team_id).collect();
        assert_eq!(ids, vec![2, 3, 1, 5, 4]);

        let pcts: Vec<_> = standings.iter().filter_map(|t| t.win_pct).collect();
        assert!(pcts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn ties_keep_team_id_order() {
        let df = df!(
            TEAM_ID => [3i64, 1, 2],
            WINS => [1i64, 1, 3],
            LOSSES => [1i64, 1, 0],
        )
        .unwrap();
        let standings = RankingDf::new(df).unwrap().team_standings(&teams(), 10).unwrap();
        let ids: Vec<_> = standings
            .column(TEAM_ID)
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn standings_keep_top_n() {
        let standings = ranking().team_standings(&teams(), 2).unwrap();
        assert_eq!(standings.height(), 2);
    }
}
