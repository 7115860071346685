//! Team and player commands.

use super::common::{lines, CommandContext};
use crate::cli::{PlayerCmd, TeamCmd};
use crate::storage::{Player, PlayerPatch, Team};
use crate::Result;

fn team_line(team: &Team) -> String {
    format!("{:<12} {}", team.id, team.name)
}

fn player_line(player: &Player) -> String {
    format!(
        "{:<12} {:<24} {:<14} {}",
        player.id,
        player.full_name(),
        player.position,
        player.team_id
    )
}

pub fn handle_team(ctx: &mut CommandContext, cmd: TeamCmd) -> Result<()> {
    match cmd {
        TeamCmd::Add { id, name, image } => {
            let team = ctx.db.create_team(Team {
                id,
                name,
                image_path: image,
            })?;
            ctx.emit(&team, team_line)
        }
        TeamCmd::Show { id } => {
            let team = ctx.db.get_team(&id)?;
            let players = ctx.db.list_players_by_team(&id)?;
            ctx.emit(&(team, players), |(team, players)| {
                format!("{}\n{}", team_line(team), lines(players, player_line))
            })
        }
        TeamCmd::List => {
            let teams = ctx.db.list_teams()?;
            ctx.emit(&teams, |teams| lines(teams, team_line))
        }
        TeamCmd::Rm { id } => {
            ctx.db.delete_team(&id)?;
            ctx.emit(&id, |id| format!("Deleted team {}", id))
        }
    }
}

pub fn handle_player(ctx: &mut CommandContext, cmd: PlayerCmd) -> Result<()> {
    match cmd {
        PlayerCmd::Add {
            id,
            team,
            first,
            last,
            position,
            image,
        } => {
            let player = ctx.db.create_player(Player {
                id,
                team_id: team,
                first_name: first,
                last_name: last,
                position,
                image_path: image,
            })?;
            ctx.emit(&player, player_line)
        }
        PlayerCmd::Show { id } => {
            let player = ctx.db.get_player(&id)?;
            ctx.emit(&player, player_line)
        }
        PlayerCmd::List { team } => {
            let players = match team {
                Some(team_id) => ctx.db.team_roster(&team_id)?,
                None => ctx.db.list_players()?,
            };
            ctx.emit(&players, |players| lines(players, player_line))
        }
        PlayerCmd::Move { id, team } => {
            let player = ctx.db.update_player(
                &id,
                PlayerPatch {
                    team_id: Some(team),
                    ..PlayerPatch::default()
                },
            )?;
            ctx.emit(&player, player_line)
        }
    }
}
