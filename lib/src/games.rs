use crate::{
    filter::GameFilter, round1, selection::Selection, teams::TeamsDf, Error, Result,
};
use derive_deref::Deref;
use itertools::izip;
use polars::{prelude::*, sql::SQLContext};
use serde::Serialize;

pub const GAME_DATE: &str = "GAME_DATE_EST";
pub const SEASON: &str = "SEASON";
pub const HOME_TEAM_ID: &str = "HOME_TEAM_ID";
pub const VISITOR_TEAM_ID: &str = "VISITOR_TEAM_ID";
pub const PTS_HOME: &str = "PTS_home";
pub const PTS_AWAY: &str = "PTS_away";

static SEASON_TREND_QUERY: &str = r#"
    SELECT
        "SEASON",
        AVG("PTS_home") as "PTS_home",
        AVG("PTS_away") as "PTS_away"
    FROM games
    WHERE "SEASON" IS NOT NULL
    GROUP BY "SEASON"
    ORDER BY "SEASON"
"#;

#[derive(Clone, Deref)]
pub struct GamesDf(DataFrame);

impl GamesDf {
    /// Keeps the game columns the dashboard reads, with fixed types.
    pub fn new(df: DataFrame) -> Result<Self> {
        let df = df
            .lazy()
            .select([
                col(GAME_DATE).cast(DataType::String),
                col(SEASON).cast(DataType::Int64),
                col(HOME_TEAM_ID).cast(DataType::Int64),
                col(VISITOR_TEAM_ID).cast(DataType::Int64),
                col(PTS_HOME).cast(DataType::Float64),
                col(PTS_AWAY).cast(DataType::Float64),
            ])
            .collect()?;
        Ok(GamesDf(df))
    }

    pub fn lazy(&self) -> LazyFrame {
        self.0.clone().lazy()
    }

    pub fn filter(&self, filter: Expr) -> Result<Self> {
        let df = self.lazy().filter(filter).collect()?;
        Ok(GamesDf(df))
    }

    /// Games of the selected season, narrowed to one team when a team is selected.
    pub fn for_selection(&self, teams: &TeamsDf, selection: &Selection) -> Result<Self> {
        log::trace!("games::for_selection {:?}", selection);
        let mut filter = GameFilter::new().season(selection.season);
        if let Some(team) = &selection.team {
            filter = filter.team(teams.team_id(team)?);
        }

        let games = self.filter(filter.build())?;
        log::debug!("{} games for {:?}", games.height(), selection);
        Ok(games)
    }

    /// Distinct seasons, ascending.
    pub fn seasons(&self) -> Result<Vec<i64>> {
        let df = self
            .lazy()
            .select([col(SEASON).drop_nulls().unique().sort(SortOptions::default())])
            .collect()?;
        let seasons = df.column(SEASON)?.i64()?.into_iter().flatten().collect();
        Ok(seasons)
    }

    pub fn has_season(&self, season: i64) -> Result<bool> {
        let df = self.lazy().filter(col(SEASON).eq(lit(season))).limit(1).collect()?;
        Ok(df.height() > 0)
    }

    pub fn validate_season(&self, season: i64) -> Result<()> {
        if self.has_season(season)? {
            Ok(())
        } else {
            Err(Error::UnknownSeason(season))
        }
    }

    /// Average home and away points per season over every game.
    pub fn season_trend(&self) -> Result<DataFrame> {
        let mut ctx = SQLContext::new();
        ctx.register("games", self.lazy());

        let df = ctx.execute(SEASON_TREND_QUERY)?.collect()?;
        log::debug!("{} seasons in scoring trend", df.height());
        Ok(df)
    }

    /// Points of each game in date order.
    pub fn game_trend(&self) -> Result<DataFrame> {
        let df = self
            .lazy()
            .select([
                col(GAME_DATE),
                col(HOME_TEAM_ID),
                col(VISITOR_TEAM_ID),
                col(PTS_HOME),
                col(PTS_AWAY),
            ])
            .sort(
                [GAME_DATE],
                SortMultipleOptions::default().with_maintain_order(true),
            )
            .collect()?;
        Ok(df)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonAverages {
    pub season: i64,
    pub home_points: Option<f64>,
    pub away_points: Option<f64>,
}

impl SeasonAverages {
    pub fn from_frame(df: &DataFrame) -> Result<Vec<Self>> {
        let rows = izip!(
            df.column(SEASON)?.i64()?,
            df.column(PTS_HOME)?.f64()?,
            df.column(PTS_AWAY)?.f64()?,
        )
        .filter_map(|(season, home, away)| {
            Some(SeasonAverages {
                season: season?,
                home_points: home.map(round1),
                away_points: away.map(round1),
            })
        })
        .collect();
        Ok(rows)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GamePoints {
    pub game_date: String,
    pub home_team_id: Option<i64>,
    pub visitor_team_id: Option<i64>,
    pub home_points: Option<f64>,
    pub away_points: Option<f64>,
}

impl GamePoints {
    pub fn from_frame(df: &DataFrame) -> Result<Vec<Self>> {
        let rows = izip!(
            df.column(GAME_DATE)?.str()?,
            df.column(HOME_TEAM_ID)?.i64()?,
            df.column(VISITOR_TEAM_ID)?.i64()?,
            df.column(PTS_HOME)?.f64()?,
            df.column(PTS_AWAY)?.f64()?,
        )
        .map(|(date, home_team_id, visitor_team_id, home_points, away_points)| GamePoints {
            game_date: date.unwrap_or_default().to_string(),
            home_team_id,
            visitor_team_id,
            home_points,
            away_points,
        })
        .collect();
        Ok(rows)
    }
}
