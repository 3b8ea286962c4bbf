// Time left until a launch instant, split into display units.

use chrono::Duration;
use std::convert::TryFrom;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Countdown {
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Countdown {
    /// Both instants are epoch milliseconds. `None` once the launch is no
    /// longer in the future; callers keep showing whatever they showed last.
    pub fn until(launch_ms: f64, now_ms: f64) -> Option<Countdown> {
        Countdown::from_remaining_ms(launch_ms - now_ms)
    }

    pub fn from_remaining_ms(remaining: f64) -> Option<Countdown> {
        if remaining.is_nan() || remaining <= 0.0 {
            return None;
        }
        // Saturating cast; sub-millisecond remainders never show up anyway.
        Some(Countdown::from_duration(Duration::milliseconds(remaining as i64)))
    }

    /// Negative durations count as zero.
    pub fn from_duration(remaining: Duration) -> Countdown {
        let remaining = remaining.max(Duration::zero());
        Countdown {
            days: u32::try_from(remaining.num_days()).unwrap_or(u32::MAX),
            hours: (remaining.num_hours() % 24) as u32,
            minutes: (remaining.num_minutes() % 60) as u32,
            seconds: (remaining.num_seconds() % 60) as u32,
        }
    }

    /// Days, hours, minutes and seconds, each padded to at least two digits.
    pub fn format_units(&self) -> [String; 4] {
        [
            format!("{:02}", self.days),
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        ]
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [days, hours, minutes, seconds] = self.format_units();
        write!(f, "{}d {}h {}m {}s", days, hours, minutes, seconds)
    }
}
