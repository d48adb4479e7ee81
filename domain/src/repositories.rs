mod live_rank_repository;
mod player_stats_repository;
mod team_roster_repository;

pub use live_rank_repository::LiveRankRepository;
pub use player_stats_repository::PlayerStatsFileRepository;
pub use team_roster_repository::TeamRosterRepository;
