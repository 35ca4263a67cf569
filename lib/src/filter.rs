use crate::games::{HOME_TEAM_ID, SEASON, VISITOR_TEAM_ID};
use polars::prelude::*;

#[derive(Clone, Default)]
pub struct GameFilter {
    filter_expr: Option<Expr>,
}

impl GameFilter {
    pub fn new() -> Self {
        Self { filter_expr: None }
    }

    // Adds a filter for the season
    pub fn season(mut self, season: i64) -> Self {
        let expr = col(SEASON).eq(lit(season));
        self.extend_filter(expr)
    }

    // Adds a filter for the team, which may be on either side of the game
    pub fn team(mut self, team_id: i64) -> Self {
        let expr = [HOME_TEAM_ID, VISITOR_TEAM_ID]
            .into_iter()
            .map(|col_name| col(col_name).eq(lit(team_id)))
            .reduce(|acc, expr| acc.or(expr))
            .unwrap_or_else(|| lit(false));

        self.extend_filter(expr)
    }

    // Combines the current filter with a new one using AND logic
    fn extend_filter(&mut self, new_expr: Expr) -> Self {
        self.filter_expr = match self.filter_expr.take() {
            Some(existing_expr) => Some(existing_expr.and(new_expr)),
            None => Some(new_expr),
        };
        self.clone()
    }

    // Builds the final filter expression
    pub fn build(self) -> Expr {
        self.filter_expr.unwrap_or_else(|| lit(true))
    }
}
