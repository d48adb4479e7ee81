mod live_lookup;
mod player;
mod roster;
mod statistics;
mod stats_snapshot;

pub use live_lookup::{LiveFaceitRank, LiveLookupResult, NO_GAME_DATA};
pub use player::PlayerId;
pub use roster::{
    generate_member_id, MemberContact, MemberStats, OpenPosition, TeamMember, TeamRoster,
    TeamSettings,
};
pub use statistics::{
    is_present, render_timestamp, FaceitStats, GcStats, PlayerStatsRecord, RawFaceitStats,
    RawGcStats, RawPlayerStats, RawSteamStats, SteamStats, UpdateType, PLACEHOLDER,
};
pub use stats_snapshot::{
    ManualRankUpdate, MultiPlayerStatsFile, RawStatsFile, SinglePlayerStatsFile,
    DEFAULT_PLAYER_KEY,
};
