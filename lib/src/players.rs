use crate::{round1, Result};
use derive_deref::Deref;
use itertools::izip;
use polars::prelude::*;
use serde::Serialize;

pub const PLAYER_ID: &str = "PLAYER_ID";
pub const PLAYER_NAME: &str = "PLAYER_NAME";
pub const POINTS: &str = "PTS";
pub const REBOUNDS: &str = "REB";
pub const ASSISTS: &str = "AST";

/// One row per player; the source table repeats players for every season they played.
#[derive(Clone, Deref)]
pub struct PlayersDf(DataFrame);

impl PlayersDf {
    pub fn new(df: DataFrame) -> Result<Self> {
        let df = df
            .lazy()
            .select([
                col(PLAYER_ID).cast(DataType::Int64),
                col(PLAYER_NAME).cast(DataType::String),
            ])
            .filter(col(PLAYER_ID).is_first_distinct())
            .collect()?;
        Ok(PlayersDf(df))
    }

    pub fn lazy(&self) -> LazyFrame {
        self.0.clone().lazy()
    }

    /// Distinct player names, ascending.
    pub fn names(&self) -> Result<Vec<String>> {
        let df = self
            .lazy()
            .select([col(PLAYER_NAME).drop_nulls().unique().sort(SortOptions::default())])
            .collect()?;
        let names = df
            .column(PLAYER_NAME)?
            .str()?
            .into_iter()
            .flatten()
            .map(String::from)
            .collect();
        Ok(names)
    }
}

/// Box score lines, one per player appearance in a game.
#[derive(Clone, Deref)]
pub struct GameDetailsDf(DataFrame);

impl GameDetailsDf {
    pub fn new(df: DataFrame) -> Result<Self> {
        let df = df
            .lazy()
            .select([
                col(PLAYER_ID).cast(DataType::Int64),
                col(POINTS).cast(DataType::Float64),
                col(REBOUNDS).cast(DataType::Float64),
                col(ASSISTS).cast(DataType::Float64),
            ])
            .collect()?;
        Ok(GameDetailsDf(df))
    }

    pub fn lazy(&self) -> LazyFrame {
        self.0.clone().lazy()
    }

    /// Per-player mean points, rebounds and assists, top `n` scorers first.
    ///
    /// Missing box score values are skipped by the means. With `player` set only
    /// that player's row is kept.
    pub fn player_averages(
        &self,
        players: &PlayersDf,
        player: Option<&str>,
        n: usize,
    ) -> Result<DataFrame> {
        let join_args = JoinArgs::new(JoinType::Inner);
        let mut lf = self
            .lazy()
            .group_by([col(PLAYER_ID)])
            .agg([col(POINTS).mean(), col(REBOUNDS).mean(), col(ASSISTS).mean()])
            .join(players.lazy(), [col(PLAYER_ID)], [col(PLAYER_ID)], join_args);

        if let Some(name) = player {
            lf = lf.filter(col(PLAYER_NAME).eq(lit(name)));
        }

        let df = lf
            .sort(
                [POINTS, PLAYER_ID],
                SortMultipleOptions::default()
                    .with_order_descending_multi([true, false])
                    .with_nulls_last(true)
                    .with_maintain_order(true),
            )
            .limit(n as IdxSize)
            .select([
                col(PLAYER_ID),
                col(PLAYER_NAME),
                col(POINTS),
                col(REBOUNDS),
                col(ASSISTS),
            ])
            .collect()?;

        log::debug!("{} players in averages", df.height());
        Ok(df)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerAverages {
    pub player_id: i64,
    pub player_name: String,
    pub points: Option<f64>,
    pub rebounds: Option<f64>,
    pub assists: Option<f64>,
}

impl PlayerAverages {
    pub fn from_frame(df: &DataFrame) -> Result<Vec<Self>> {
        let rows = izip!(
            df.column(PLAYER_ID)?.i64()?,
            df.column(PLAYER_NAME)?.str()?,
            df.column(POINTS)?.f64()?,
            df.column(REBOUNDS)?.f64()?,
            df.column(ASSISTS)?.f64()?,
        )
        .filter_map(|(player_id, name, points, rebounds, assists)| {
            Some(PlayerAverages {
                player_id: player_id?,
                player_name: name.unwrap_or_default().to_string(),
                points: points.map(round1),
                rebounds: rebounds.map(round1),
                assists: assists.map(round1),
            })
        })
        .collect();
        Ok(rows)
    }
}
