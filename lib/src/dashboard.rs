use crate::{
    chart::{self, ChartSpec},
    games::{GamePoints, SeasonAverages},
    metrics::KeyMetrics,
    players::PlayerAverages,
    teams::TeamStanding,
    Dataset, Result, Selection,
};
use polars::prelude::DataFrame;
use serde::Serialize;

pub const TITLE: &str = "NBA Analytics Dashboard";
pub const CAPTION: &str = "Interactive NBA Analytics";
pub const TOP_TEAMS: usize = 10;
pub const TOP_PLAYERS: usize = 20;

/// Result frames, kept for terminal output.
#[derive(Clone)]
pub struct Frames {
    pub season_trend: DataFrame,
    pub team_standings: DataFrame,
    pub player_averages: DataFrame,
    pub game_trend: DataFrame,
}

/// Everything shown for one selection.
#[derive(Clone, Serialize)]
pub struct Dashboard {
    pub title: &'static str,
    pub caption: &'static str,
    pub selection: Selection,
    pub metrics: KeyMetrics,
    pub season_trend: Vec<SeasonAverages>,
    pub team_standings: Vec<TeamStanding>,
    pub player_averages: Vec<PlayerAverages>,
    pub game_trend: Vec<GamePoints>,
    pub charts: Vec<ChartSpec>,
    pub insights: Vec<String>,
    #[serde(skip)]
    pub frames: Frames,
}

impl Dashboard {
    pub fn build(dataset: &Dataset, selection: &Selection) -> Result<Self> {
        log::trace!("dashboard::build {:?}", selection);

        // Only the metrics and the game trend follow the selection
        let games = dataset.games.for_selection(&dataset.teams, selection)?;
        let metrics = KeyMetrics::from_games(&games)?;

        let frames = Frames {
            season_trend: dataset.games.season_trend()?,
            team_standings: dataset.ranking.team_standings(&dataset.teams, TOP_TEAMS)?,
            player_averages: dataset.details.player_averages(
                &dataset.players,
                selection.player.as_deref(),
                TOP_PLAYERS,
            )?,
            game_trend: games.game_trend()?,
        };

        let season_trend = SeasonAverages::from_frame(&frames.season_trend)?;
        let team_standings = TeamStanding::from_frame(&frames.team_standings)?;
        let player_averages = PlayerAverages::from_frame(&frames.player_averages)?;
        let game_trend = GamePoints::from_frame(&frames.game_trend)?;

        let charts = vec![
            chart::season_trend(&season_trend),
            chart::top_teams(&team_standings),
            chart::top_players(&player_averages),
            chart::game_trend(&game_trend),
        ];

        Ok(Dashboard {
            title: TITLE,
            caption: CAPTION,
            selection: selection.clone(),
            metrics,
            season_trend,
            team_standings,
            player_averages,
            game_trend,
            charts,
            insights: insights(selection.season),
            frames,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn insights(season: i64) -> Vec<String> {
    vec![
        format!("Season {} shows a strong home-court advantage", season),
        "Team rankings reveal long-term performance dominance".to_string(),
        "Player insights highlight consistent top performers".to_string(),
        "Game-wise trends reflect evolving offensive strategies".to_string(),
    ]
}
