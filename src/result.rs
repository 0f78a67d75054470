//! Completed game results.

use alloc::format;
use alloc::string::String;
use core::time::Duration;

use crate::options::Difficulty;

/// Summary of a won game, as reported to the score store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    /// Time on the clock when the last card reached a foundation.
    pub time: Duration,
    /// `time` formatted with [`format_time`].
    pub time_text: String,
    /// Number of moves made.
    pub moves: u32,
    /// Final score.
    pub score: i32,
    /// Difficulty the game was played at.
    pub difficulty: Difficulty,
}

/// Formats play time as `m:ss`, or `h:mm:ss` from one hour on.
///
/// ```
/// use core::time::Duration;
/// use klrs::result::format_time;
///
/// assert_eq!(format_time(Duration::from_secs(7)), "0:07");
/// assert_eq!(format_time(Duration::from_secs(754)), "12:34");
/// assert_eq!(format_time(Duration::from_secs(3723)), "1:02:03");
/// ```
#[must_use]
pub fn format_time(time: Duration) -> String {
    let total = time.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
