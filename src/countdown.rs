use std::time::{Duration, Instant};

use chrono::{Days, NaiveDateTime, NaiveTime};

/// Pause between hitting zero and loading the next day's round.
pub const COUNTDOWN_RELOAD_DELAY: Duration = Duration::from_secs(1);

const FULL_DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Time left until the next local midnight. A non-positive gap reads as a full day.
pub fn time_until_midnight(now: NaiveDateTime) -> Duration {
    let next = now
        .date()
        .checked_add_days(Days::new(1))
        .map(|d| d.and_time(NaiveTime::MIN));
    let Some(next) = next else {
        return FULL_DAY;
    };
    match (next - now).to_std() {
        Ok(left) if !left.is_zero() => left,
        _ => FULL_DAY,
    }
}

pub fn format_hms(left: Duration) -> String {
    let secs = left.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownTick {
    Running(String),
    /// Midnight passed; the display is frozen at zero until the reload fires.
    Expired,
    Reload,
}

/// Tracks the daily rollover. The caller feeds the local clock once per tick.
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    day: Option<chrono::NaiveDate>,
    reload_at: Option<Instant>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, local_now: NaiveDateTime, now: Instant) -> CountdownTick {
        if let Some(at) = self.reload_at {
            if now >= at {
                self.reload_at = None;
                self.day = Some(local_now.date());
                return CountdownTick::Reload;
            }
            return CountdownTick::Expired;
        }
        let today = local_now.date();
        match self.day {
            Some(day) if day != today => {
                self.reload_at = Some(now + COUNTDOWN_RELOAD_DELAY);
                CountdownTick::Expired
            }
            _ => {
                self.day = Some(today);
                CountdownTick::Running(format_hms(time_until_midnight(local_now)))
            }
        }
    }

    pub fn display(tick: &CountdownTick) -> &str {
        match tick {
            CountdownTick::Running(text) => text,
            CountdownTick::Expired | CountdownTick::Reload => "00:00:00",
        }
    }
}
