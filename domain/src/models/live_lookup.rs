/// Text written into the FACEIT fields when the identity has no CS2 or CS:GO record.
pub const NO_GAME_DATA: &str = "Sem dados CS2";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveFaceitRank {
    pub level: Option<String>,
    pub elo: Option<String>,
    pub region: Option<String>,
}

/// Outcome of one successful live rank lookup. Never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveLookupResult {
    Ranked(LiveFaceitRank),
    /// The identity exists but has played neither the current game nor its predecessor.
    NoGameData,
}
