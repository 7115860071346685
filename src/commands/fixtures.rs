//! Match, pool, performance and history commands.

use super::common::{lines, CommandContext};
use crate::cli::{HistoryCmd, MatchCmd, PerfCmd, PoolCmd};
use crate::storage::{
    CricketMatch, MatchOverview, NewPerformance, NewPool, Performance, PerformancePatch,
    PlayerHistory,
};
use crate::Result;

fn match_line(m: &CricketMatch) -> String {
    format!(
        "{:<12} {} v {}  {}",
        m.id,
        m.home_team_id,
        m.away_team_id,
        m.match_date.format("%Y-%m-%d %H:%M UTC")
    )
}

fn performance_line(p: &Performance) -> String {
    format!(
        "{}  {:<12} {:<12} R {:>4}  W {:>2}  C {:>2}  = {:>5} pts",
        p.id, p.cricket_match_id, p.cricket_player_id, p.runs, p.wickets, p.catches, p.points
    )
}

fn history_line(h: &PlayerHistory) -> String {
    format!(
        "{:<12} runs {}  wickets {}  catches {}  points {}",
        h.player_id, h.runs, h.wickets, h.catches, h.points
    )
}

fn overview_text(o: &MatchOverview) -> String {
    let pool = match &o.pool {
        Some(pool) => format!("pool {}", pool.id),
        None => "no pool".to_string(),
    };
    format!(
        "{} ({} v {}), {}\n{}",
        match_line(&o.cricket_match),
        o.home_team.name,
        o.away_team.name,
        pool,
        lines(&o.performances, performance_line)
    )
}

pub fn handle_match(ctx: &mut CommandContext, cmd: MatchCmd) -> Result<()> {
    match cmd {
        MatchCmd::Add {
            id,
            home,
            away,
            date,
        } => {
            let m = ctx.db.create_match(CricketMatch {
                id,
                home_team_id: home,
                away_team_id: away,
                match_date: date,
            })?;
            ctx.emit(&m, match_line)
        }
        MatchCmd::Show { id } => {
            let overview = ctx.db.match_overview(&id)?;
            ctx.emit(&overview, overview_text)
        }
        MatchCmd::List { team } => {
            let matches = match team {
                Some(team_id) => ctx.db.list_matches_for_team(&team_id)?,
                None => ctx.db.list_matches()?,
            };
            ctx.emit(&matches, |matches| lines(matches, match_line))
        }
    }
}

pub fn handle_pool(ctx: &mut CommandContext, cmd: PoolCmd) -> Result<()> {
    match cmd {
        PoolCmd::Open { match_id } => {
            let pool = ctx.db.create_pool(NewPool {
                cricket_match_id: match_id,
            })?;
            ctx.emit(&pool, |pool| {
                format!("Opened pool {} for match {}", pool.id, pool.cricket_match_id)
            })
        }
    }
}

pub fn handle_perf(ctx: &mut CommandContext, cmd: PerfCmd) -> Result<()> {
    match cmd {
        PerfCmd::Record {
            match_id,
            player_id,
            runs,
            wickets,
            catches,
            points,
        } => {
            let performance = ctx.db.create_performance(NewPerformance {
                cricket_match_id: match_id,
                cricket_player_id: player_id,
                runs,
                wickets,
                catches,
                points,
            })?;
            ctx.emit(&performance, performance_line)
        }
        PerfCmd::Correct {
            id,
            runs,
            wickets,
            catches,
            points,
        } => {
            let performance = ctx.db.update_performance(
                &id,
                PerformancePatch {
                    runs,
                    wickets,
                    catches,
                    points,
                },
            )?;
            ctx.emit(&performance, performance_line)
        }
        PerfCmd::List { match_id, player } => {
            let performances = match (match_id, player) {
                (_, Some(player_id)) => ctx.db.performances_for_player(&player_id)?,
                (Some(match_id), None) => ctx.db.performances_for_match(&match_id)?,
                (None, None) => Vec::new(),
            };
            ctx.emit(&performances, |performances| {
                lines(performances, performance_line)
            })
        }
    }
}

pub fn handle_history(ctx: &mut CommandContext, cmd: HistoryCmd) -> Result<()> {
    match cmd {
        HistoryCmd::Show { player_id } => {
            ctx.db.get_player(&player_id)?;
            let history = ctx.db.history_for_player(&player_id)?;
            ctx.emit(&history, |history| match history {
                Some(h) => history_line(h),
                None => format!("{:<12} no recorded performances", player_id),
            })
        }
        HistoryCmd::Recompute {
            player_id: Some(player_id),
        } => {
            let history = ctx.db.recompute_player_history(&player_id)?;
            ctx.emit(&history, history_line)
        }
        HistoryCmd::Recompute { player_id: None } => {
            let count = ctx.db.recompute_all_histories()?;
            ctx.emit(&count, |count| format!("Recomputed {} player histories", count))
        }
    }
}
