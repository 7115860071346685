//! Command handlers behind the `cricket-fantasy` binary.

pub mod betting;
pub mod common;
pub mod fixtures;
pub mod roster;


use crate::cli::{Commands, CricketCli};
use crate::config::Settings;
use crate::storage::SeedData;
use crate::Result;
use common::CommandContext;

/// Resolve settings, open the database and run one command.
pub fn run(cli: CricketCli) -> Result<()> {
    let settings = Settings::resolve(cli.db, cli.scoring.as_deref())?;
    let mut ctx = CommandContext::new(&settings, cli.json)?;

    match cli.command {
        Commands::Team { cmd } => roster::handle_team(&mut ctx, cmd),
        Commands::Player { cmd } => roster::handle_player(&mut ctx, cmd),
        Commands::Match { cmd } => fixtures::handle_match(&mut ctx, cmd),
        Commands::Pool { cmd } => fixtures::handle_pool(&mut ctx, cmd),
        Commands::Perf { cmd } => fixtures::handle_perf(&mut ctx, cmd),
        Commands::History { cmd } => fixtures::handle_history(&mut ctx, cmd),
        Commands::Bet { cmd } => betting::handle_bet(&mut ctx, cmd),
        Commands::Seed { file } => {
            let seed = SeedData::from_json_file(&file)?;
            let summary = ctx.db.import_seed(seed)?;
            ctx.emit(&summary, |s| {
                format!(
                    "Imported {} teams, {} players, {} matches, {} bet options, {} pools, {} performances",
                    s.teams, s.players, s.matches, s.bet_options, s.pools, s.performances
                )
            })
        }
    }
}
