//! Vega-Lite specifications for the four dashboard charts.
//!
//! The specs embed their data, so a page only has to hand each one to a
//! Vega-Lite renderer.

use crate::{
    games::{GamePoints, SeasonAverages},
    players::PlayerAverages,
    teams::TeamStanding,
};
use parse_display::{Display, FromStr};
use serde::Serialize;
use serde_json::{json, Value};

static VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, FromStr, Serialize)]
#[display(style = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
}

impl ChartKind {
    fn mark(self) -> Value {
        match self {
            ChartKind::Line => json!({ "type": "line", "point": true }),
            ChartKind::Bar => json!({ "type": "bar" }),
            ChartKind::Scatter => json!({ "type": "circle", "opacity": 0.8 }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub spec: Value,
}

impl ChartSpec {
    fn new(kind: ChartKind, title: &str, values: Value, mut body: Value) -> Self {
        body["$schema"] = json!(VEGA_LITE_SCHEMA);
        body["title"] = json!(title);
        body["width"] = json!("container");
        body["data"] = json!({ "values": values });
        body["mark"] = kind.mark();
        ChartSpec {
            kind,
            title: title.to_string(),
            spec: body,
        }
    }
}

pub fn season_trend(rows: &[SeasonAverages]) -> ChartSpec {
    ChartSpec::new(
        ChartKind::Line,
        "Season-wise Scoring Trends",
        json!(rows),
        json!({
            "transform": [
                { "fold": ["home_points", "away_points"], "as": ["Game Type", "Average Points"] }
            ],
            "encoding": {
                "x": { "field": "season", "type": "ordinal", "title": "Season" },
                "y": { "field": "Average Points", "type": "quantitative" },
                "color": { "field": "Game Type", "type": "nominal" }
            }
        }),
    )
}

pub fn top_teams(rows: &[TeamStanding]) -> ChartSpec {
    ChartSpec::new(
        ChartKind::Bar,
        "Top 10 Teams by Win Percentage",
        json!(rows),
        json!({
            "encoding": {
                "x": { "field": "nickname", "type": "nominal", "sort": null, "title": "Team" },
                "y": { "field": "win_pct", "type": "quantitative", "title": "Win %", "axis": { "format": ".0%" } }
            }
        }),
    )
}

pub fn top_players(rows: &[PlayerAverages]) -> ChartSpec {
    ChartSpec::new(
        ChartKind::Scatter,
        "Top Players: Points vs Rebounds (Bubble = Assists)",
        json!(rows),
        json!({
            "encoding": {
                "x": { "field": "points", "type": "quantitative", "title": "Points" },
                "y": { "field": "rebounds", "type": "quantitative", "title": "Rebounds" },
                "size": { "field": "assists", "type": "quantitative", "title": "Assists" },
                "color": { "field": "player_name", "type": "nominal", "title": "Player" },
                "tooltip": [
                    { "field": "player_name" },
                    { "field": "points" },
                    { "field": "rebounds" },
                    { "field": "assists" }
                ]
            }
        }),
    )
}

pub fn game_trend(rows: &[GamePoints]) -> ChartSpec {
    ChartSpec::new(
        ChartKind::Line,
        "Game-wise Scoring Trend",
        json!(rows),
        json!({
            "transform": [
                { "fold": ["home_points", "away_points"], "as": ["Game Type", "Points"] }
            ],
            "encoding": {
                "x": { "field": "game_date", "type": "temporal", "title": "Game Date" },
                "y": { "field": "Points", "type": "quantitative" },
                "color": { "field": "Game Type", "type": "nominal" }
            }
        }),
    )
}
