use anyhow::Result;
use hoops::{Dashboard, FilterOptions};
use itertools::Itertools;

pub fn print_filters(options: &FilterOptions) {
    println!("Seasons: {}", options.seasons.iter().join(", "));
    println!("Teams: {}", options.teams.iter().join(", "));
    println!("Players: {}", options.players.len() - 1);
    for name in options.players.iter().skip(1) {
        println!("  {}", name);
    }
}

pub fn print_dashboard(dashboard: &Dashboard) -> Result<()> {
    let selection = &dashboard.selection;
    println!("{}", dashboard.title);
    println!("{}", dashboard.caption);
    println!(
        "Season {} | Team {} | Player {}",
        selection.season,
        selection.team.as_deref().unwrap_or(hoops::ALL),
        selection.player.as_deref().unwrap_or(hoops::ALL),
    );

    println!("\nKey Metrics\n{}", dashboard.metrics.to_frame()?);

    let frames = &dashboard.frames;
    println!("\nSeason-wise Scoring Trends\n{}", frames.season_trend);
    println!(
        "\nTop {} Teams by Win Percentage\n{}",
        hoops::dashboard::TOP_TEAMS,
        frames.team_standings
    );
    println!("\nTop Players\n{}", frames.player_averages);
    println!("\nGame-wise Scoring Trend\n{}", frames.game_trend);

    println!("\nKey Insights");
    for line in &dashboard.insights {
        println!("  - {}", line);
    }
    Ok(())
}
