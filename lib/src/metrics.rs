use crate::{
    games::{GamesDf, PTS_AWAY, PTS_HOME},
    round1, Result,
};
use polars::prelude::*;
use serde::Serialize;

/// The numbers on the metric cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub total_games: usize,
    pub avg_home_points: Option<f64>,
    pub avg_away_points: Option<f64>,
}

impl KeyMetrics {
    /// An empty selection has no averages rather than NaN ones.
    pub fn from_games(games: &GamesDf) -> Result<Self> {
        let avg_home_points = games.column(PTS_HOME)?.f64()?.mean().map(round1);
        let avg_away_points = games.column(PTS_AWAY)?.f64()?.mean().map(round1);
        Ok(KeyMetrics {
            total_games: games.height(),
            avg_home_points,
            avg_away_points,
        })
    }

    pub fn to_frame(&self) -> Result<DataFrame> {
        let df = df!(
            "Total Games" => [self.total_games as u64],
            "Avg Home Points" => [self.avg_home_points],
            "Avg Away Points" => [self.avg_away_points],
        )?;
        Ok(df)
    }
}
