//! Generic repository contract over the eight record types.
//!
//! Each record type names its key, creation input, patch and parent key via
//! [`Entity`]. [`CricketDatabase`](super::CricketDatabase) implements
//! [`Repository`] for every one of them, delegating to the inherent methods
//! in the per-entity modules.

use super::models::*;
use crate::error::Result;
use crate::types::{
    BetOptionId, MatchId, PerformanceId, PlayerHistoryId, PlayerId, PoolId, SpecialBetId, TeamId,
};

pub trait Entity: Sized {
    type Id;
    type New;
    type Patch;
    /// Key used by `list_by_parent`; `()` lists every row.
    type Parent;

    const NAME: &'static str;

    fn id(&self) -> &Self::Id;
}

pub trait Repository<E: Entity> {
    fn get(&self, id: &E::Id) -> Result<E>;
    fn create(&mut self, new: E::New) -> Result<E>;
    fn update(&mut self, id: &E::Id, patch: E::Patch) -> Result<E>;
    fn delete(&mut self, id: &E::Id) -> Result<()>;
    fn list_by_parent(&self, parent: &E::Parent) -> Result<Vec<E>>;
}

macro_rules! entity {
    ($ty:ty, $name:literal, id: $id:ty, new: $new:ty, patch: $patch:ty, parent: $parent:ty) => {
        impl Entity for $ty {
            type Id = $id;
            type New = $new;
            type Patch = $patch;
            type Parent = $parent;

            const NAME: &'static str = $name;

            fn id(&self) -> &Self::Id {
                &self.id
            }
        }
    };
}

entity!(Team, "Team", id: TeamId, new: Team, patch: TeamPatch, parent: ());
entity!(Player, "Player", id: PlayerId, new: Player, patch: PlayerPatch, parent: TeamId);
entity!(CricketMatch, "Match", id: MatchId, new: CricketMatch, patch: MatchPatch, parent: TeamId);
entity!(Pool, "Pool", id: PoolId, new: NewPool, patch: PoolPatch, parent: MatchId);
entity!(
    Performance, "Performance",
    id: PerformanceId, new: NewPerformance, patch: PerformancePatch, parent: MatchId
);
entity!(
    PlayerHistory, "PlayerHistory",
    id: PlayerHistoryId, new: NewPlayerHistory, patch: PlayerHistoryPatch, parent: PlayerId
);
entity!(BetOption, "BetOption", id: BetOptionId, new: NewBetOption, patch: BetOptionPatch, parent: ());
entity!(
    SpecialBet, "SpecialBet",
    id: SpecialBetId, new: NewSpecialBet, patch: SpecialBetPatch, parent: PlayerId
);
