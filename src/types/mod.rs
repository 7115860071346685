//! Identifier types and the id generators behind them.

pub mod idgen;
pub mod ids;

pub use idgen::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use ids::{
    BetOptionId, MatchId, PerformanceId, PlayerHistoryId, PlayerId, PoolId, SpecialBetId, TeamId,
};
