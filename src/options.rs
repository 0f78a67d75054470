//! Game configuration.

use core::time::Duration;

/// Difficulty label recorded with each high score.
///
/// The rules do not change with difficulty; the value is carried through to
/// the score store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    /// Easy.
    Easy,
    /// Normal.
    #[default]
    Normal,
}

/// Default number of cards turned per draw.
pub const DEFAULT_DRAW_AMOUNT: u8 = 3;

/// Default number of high scores kept.
pub const DEFAULT_HIGH_SCORE_LIMIT: usize = 15;

/// Configuration options for a solitaire game.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use klrs::{Difficulty, Settings};
///
/// let settings = Settings::default()
///     .with_draw_amount(1)
///     .with_difficulty(Difficulty::Easy);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    /// Cards turned from the deck per draw.
    pub draw_amount: u8,
    /// Difficulty label.
    pub difficulty: Difficulty,
    /// How often the game clock publishes its value.
    pub tick_interval: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            draw_amount: DEFAULT_DRAW_AMOUNT,
            difficulty: Difficulty::Normal,
            tick_interval: Duration::from_secs(1),
        }
    }
}

impl Settings {
    /// Sets the number of cards turned per draw. Zero is raised to one.
    ///
    /// # Example
    ///
    /// ```
    /// use klrs::Settings;
    ///
    /// let settings = Settings::default().with_draw_amount(1);
    /// assert_eq!(settings.draw_amount, 1);
    /// assert_eq!(Settings::default().with_draw_amount(0).draw_amount, 1);
    /// ```
    #[must_use]
    pub const fn with_draw_amount(mut self, amount: u8) -> Self {
        self.draw_amount = if amount == 0 { 1 } else { amount };
        self
    }

    /// Sets the difficulty label.
    ///
    /// # Example
    ///
    /// ```
    /// use klrs::{Difficulty, Settings};
    ///
    /// let settings = Settings::default().with_difficulty(Difficulty::Easy);
    /// assert_eq!(settings.difficulty, Difficulty::Easy);
    /// ```
    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Sets the clock tick interval.
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use klrs::Settings;
    ///
    /// let settings = Settings::default().with_tick_interval(Duration::from_millis(100));
    /// assert_eq!(settings.tick_interval, Duration::from_millis(100));
    /// ```
    #[must_use]
    pub const fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }
}
