mod clock;
mod timestamped;

pub use clock::{Clock, SystemClock};
pub use timestamped::TimeStamped;
