use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hoops::{Dashboard, Dataset, FilterOptions, Selection, ALL};
use log::LevelFilter;
use parse_display::{Display, FromStr};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::path::PathBuf;

mod render;
mod server;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, FromStr)]
#[display(style = "lowercase")]
enum Format {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "NBA analytics dashboard")]
struct Args {
    /// Directory holding games.csv, games_details.csv, players.csv, teams.csv and ranking.csv
    #[arg(short = 'd', long = "data-dir", value_name = "DIR", default_value = ".")]
    data_dir: PathBuf,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the seasons, teams and players that can be selected
    Filters,
    /// Print the dashboard for one selection
    Dashboard {
        /// Defaults to the earliest season
        #[arg(short = 's', long = "season")]
        season: Option<i64>,

        #[arg(short = 't', long = "team", default_value = ALL)]
        team: String,

        #[arg(short = 'p', long = "player", default_value = ALL)]
        player: String,

        #[arg(long, default_value = "table")]
        format: Format,
    },
    /// Serve the dashboard page
    Serve {
        #[arg(short, long, default_value_t = 8501)]
        port: u16,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set the default level based on verbosity
    let default_level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let config = ConfigBuilder::new().add_filter_allow_str("hoops").build();
    TermLogger::init(
        default_level,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")?;

    log::trace!("Args {:#?}", args);

    let dataset = Dataset::load(&args.data_dir)
        .with_context(|| format!("Failed to load tables from {}", args.data_dir.display()))?;

    match args.command {
        Command::Filters => {
            let options = FilterOptions::from_dataset(&dataset)?;
            render::print_filters(&options);
        }
        Command::Dashboard {
            season,
            team,
            player,
            format,
        } => {
            let season = match season {
                Some(season) => {
                    dataset.games.validate_season(season)?;
                    season
                }
                None => FilterOptions::from_dataset(&dataset)?
                    .default_selection()
                    .context("No seasons in games table")?
                    .season,
            };
            let selection = Selection::new(season).team(&team).player(&player);
            let dashboard = Dashboard::build(&dataset, &selection)?;
            match format {
                Format::Table => render::print_dashboard(&dashboard)?,
                Format::Json => println!("{}", dashboard.to_json()?),
            }
        }
        Command::Serve { port } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(dataset, port))?;
        }
    }

    Ok(())
}
