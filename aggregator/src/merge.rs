use chrono::{DateTime, Utc};
use domain::models::{
    is_present, render_timestamp, LiveLookupResult, RawPlayerStats, UpdateType, NO_GAME_DATA,
};

/// Lays a live lookup result over the stats read from the stats file.
///
/// Only the `faceit` group is touched, and only with the fields the live result
/// actually carries. The group is then stamped as an automatic update at `now`.
pub fn merge_live_result(base: &mut RawPlayerStats, live: LiveLookupResult, now: DateTime<Utc>) {
    let faceit = &mut base.faceit;

    match live {
        LiveLookupResult::Ranked(rank) => {
            for (slot, value) in [
                (&mut faceit.level, rank.level),
                (&mut faceit.elo, rank.elo),
                (&mut faceit.region, rank.region),
            ] {
                if is_present(&value) {
                    *slot = value;
                }
            }
        }
        LiveLookupResult::NoGameData => {
            faceit.level = Some(NO_GAME_DATA.to_owned());
            faceit.elo = Some(NO_GAME_DATA.to_owned());
        }
    }

    faceit.update_type = Some(UpdateType::Automatic);
    faceit.last_update = Some(render_timestamp(now));
}
