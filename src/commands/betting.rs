//! Bet option and special bet commands.

use super::common::{lines, CommandContext};
use crate::cli::BetCmd;
use crate::storage::{BetOption, NewBetOption, NewSpecialBet, SpecialBet};
use crate::Result;

fn option_line(option: &BetOption) -> String {
    format!("{}  {}", option.id, option.bet_name)
}

fn bet_line(bet: &SpecialBet) -> String {
    format!("{}  option {}  player {}", bet.id, bet.special_bet_id, bet.player_id)
}

pub fn handle_bet(ctx: &mut CommandContext, cmd: BetCmd) -> Result<()> {
    match cmd {
        BetCmd::AddOption { name } => {
            let option = ctx.db.create_bet_option(NewBetOption { bet_name: name })?;
            ctx.emit(&option, option_line)
        }
        BetCmd::Options => {
            let options = ctx.db.list_bet_options()?;
            ctx.emit(&options, |options| lines(options, option_line))
        }
        BetCmd::Place { option, player_id } => {
            let bet = ctx.db.create_special_bet(NewSpecialBet {
                special_bet_id: option,
                player_id,
            })?;
            ctx.emit(&bet, bet_line)
        }
        BetCmd::List { player_id } => {
            let bets = ctx.db.special_bets_for_player(&player_id)?;
            ctx.emit(&bets, |bets| lines(bets, bet_line))
        }
    }
}
