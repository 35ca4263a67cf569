use crate::{Dataset, Result, ALL};
use serde::Serialize;

/// Choices offered by the season, team and player dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub seasons: Vec<i64>,
    pub teams: Vec<String>,
    pub players: Vec<String>,
}

impl FilterOptions {
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        let seasons = dataset.games.seasons()?;
        let teams = with_all(dataset.teams.nicknames()?);
        let players = with_all(dataset.players.names()?);
        log::debug!(
            "{} seasons, {} teams, {} players to choose from",
            seasons.len(),
            teams.len() - 1,
            players.len() - 1
        );
        Ok(FilterOptions {
            seasons,
            teams,
            players,
        })
    }

    /// First season with every team and every player.
    pub fn default_selection(&self) -> Option<Selection> {
        self.seasons.first().map(|season| Selection::new(*season))
    }
}

fn with_all(names: Vec<String>) -> Vec<String> {
    std::iter::once(ALL.to_string()).chain(names).collect()
}

/// One value per dropdown. `None` for team or player means "All".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub season: i64,
    pub team: Option<String>,
    pub player: Option<String>,
}

impl Selection {
    pub fn new(season: i64) -> Self {
        Selection {
            season,
            team: None,
            player: None,
        }
    }

    pub fn team(mut self, nickname: &str) -> Self {
        self.team = choice(nickname);
        self
    }

    pub fn player(mut self, name: &str) -> Self {
        self.player = choice(name);
        self
    }
}

fn choice(name: &str) -> Option<String> {
    (name != ALL).then(|| name.to_string())
}
