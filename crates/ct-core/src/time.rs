//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter, one tick per simulated
//! second.  A day is [`TICKS_PER_DAY`] ticks and is split into six 4-hour
//! [`TimeBlock`]s, which key the per-courier demand tables:
//!
//!   time_of_day = tick % 86_400
//!   block       = time_of_day / 14_400
//!
//! Using an integer tick as the canonical time unit keeps all periodic
//! maintenance arithmetic exact (`tick % 60 == 0` for fades, etc.).

use std::fmt;

/// Ticks in one simulated day.
pub const TICKS_PER_DAY: u64 = 86_400;

/// Ticks in one 4-hour time block.
pub const TICKS_PER_BLOCK: u64 = TICKS_PER_DAY / TimeBlock::COUNT as u64;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// `true` on every `period`-th tick (including tick 0).  A zero period
    /// never fires.
    #[inline]
    pub fn every(self, period: u64) -> bool {
        period > 0 && self.0 % period == 0
    }

    /// The 4-hour block this tick falls into.
    #[inline]
    pub fn time_block(self) -> TimeBlock {
        TimeBlock::from_time_of_day(self.0 % TICKS_PER_DAY)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TimeBlock ─────────────────────────────────────────────────────────────────

/// One of the six fixed 4-hour windows of a simulated day.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeBlock {
    /// 00:00–04:00
    #[default]
    Night,
    /// 04:00–08:00
    EarlyMorning,
    /// 08:00–12:00
    Morning,
    /// 12:00–16:00
    Afternoon,
    /// 16:00–20:00
    Evening,
    /// 20:00–24:00
    LateEvening,
}

impl TimeBlock {
    pub const COUNT: usize = 6;

    pub const ALL: [TimeBlock; Self::COUNT] = [
        TimeBlock::Night,
        TimeBlock::EarlyMorning,
        TimeBlock::Morning,
        TimeBlock::Afternoon,
        TimeBlock::Evening,
        TimeBlock::LateEvening,
    ];

    /// Block for a time of day in ticks (`0..TICKS_PER_DAY`).  Values past
    /// the end of the day wrap.
    #[inline]
    pub fn from_time_of_day(ticks: u64) -> TimeBlock {
        let idx = ((ticks % TICKS_PER_DAY) / TICKS_PER_BLOCK) as usize;
        Self::ALL[idx.min(Self::COUNT - 1)]
    }

    /// Position in [`TimeBlock::ALL`]; used to index fixed-size arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label, e.g. `"08-12"`.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeBlock::Night        => "00-04",
            TimeBlock::EarlyMorning => "04-08",
            TimeBlock::Morning      => "08-12",
            TimeBlock::Afternoon    => "12-16",
            TimeBlock::Evening      => "16-20",
            TimeBlock::LateEvening  => "20-24",
        }
    }
}

impl fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and derives the time-of-day view from it.
///
/// `SimClock` is cheap to copy and holds no heap data.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current tick, advanced by `SimClock::advance()` as the last step
    /// of every tick.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Ticks since midnight of the current simulated day.
    #[inline]
    pub fn time_of_day(&self) -> u64 {
        self.current_tick.0 % TICKS_PER_DAY
    }

    /// Zero-based simulated day.
    #[inline]
    pub fn day(&self) -> u64 {
        self.current_tick.0 / TICKS_PER_DAY
    }

    /// Current 4-hour block.
    #[inline]
    pub fn time_block(&self) -> TimeBlock {
        self.current_tick.time_block()
    }

    /// Break time of day into (hour, minute) for human-readable logging.
    pub fn hm(&self) -> (u32, u32) {
        let tod = self.time_of_day();
        ((tod / 3_600) as u32, ((tod % 3_600) / 60) as u32)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m) = self.hm();
        write!(f, "{} (day {} {:02}:{:02})", self.current_tick, self.day(), h, m)
    }
}
