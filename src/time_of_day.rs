use serde::{Deserialize, Serialize};
use std::fmt;

pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// A point in the 24-hour cycle, stored as whole seconds since midnight.
///
/// Always in `[0, 86400)`. Serialized as the raw second count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Wraps any second count into the day, so 86400 is midnight again.
    pub fn from_seconds(seconds: u32) -> Self {
        Self(seconds % SECONDS_PER_DAY)
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour >= 24 || minute >= 60 {
            return None;
        }
        Some(Self(hour * 3600 + minute * 60))
    }

    pub fn seconds(self) -> u32 {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / 3600
    }

    pub fn minute(self) -> u32 {
        (self.0 % 3600) / 60
    }

    pub fn second(self) -> u32 {
        self.0 % 60
    }

    /// Goes back `seconds` from this time, wrapping past midnight into the
    /// previous day. Fractional seconds are dropped, so the result never
    /// lands in a later minute than the exact bedtime.
    ///
    /// Returns `None` when `seconds` is NaN or infinite.
    pub fn wrapping_sub_seconds(self, seconds: f64) -> Option<Self> {
        if !seconds.is_finite() {
            return None;
        }
        let day = f64::from(SECONDS_PER_DAY);
        let wrapped = (f64::from(self.0) - seconds).rem_euclid(day);
        // rem_euclid of a tiny negative rounds up to exactly one full day
        let whole = (wrapped.floor() as u32).min(SECONDS_PER_DAY - 1);
        Some(Self(whole))
    }

    /// Short en-US rendering, e.g. `10:48 PM`.
    pub fn twelve_hour(self) -> String {
        let (h, suffix) = match self.hour() {
            0 => (12, "AM"),
            h @ 1..=11 => (h, "AM"),
            12 => (12, "PM"),
            h => (h - 12, "PM"),
        };
        format!("{}:{:02} {}", h, self.minute(), suffix)
    }
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self::MIDNIGHT
    }
}

/// `HH:MM`, seconds omitted.
impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{0} seconds is outside a single day")]
pub struct OutOfDay(pub u32);

impl TryFrom<u32> for TimeOfDay {
    type Error = OutOfDay;

    fn try_from(seconds: u32) -> Result<Self, Self::Error> {
        if seconds >= SECONDS_PER_DAY {
            return Err(OutOfDay(seconds));
        }
        Ok(Self(seconds))
    }
}

impl From<TimeOfDay> for u32 {
    fn from(t: TimeOfDay) -> u32 {
        t.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components() {
        let t = TimeOfDay::from_seconds(22 * 3600 + 48 * 60 + 5);
        assert_eq!((t.hour(), t.minute(), t.second()), (22, 48, 5));
        assert_eq!(t.to_string(), "22:48");
    }

    #[test]
    fn from_hm_rejects_out_of_range() {
        assert!(TimeOfDay::from_hm(24, 0).is_none());
        assert!(TimeOfDay::from_hm(7, 60).is_none());
        assert_eq!(TimeOfDay::from_hm(7, 0).unwrap().seconds(), 25200);
    }

    #[test]
    fn from_seconds_wraps() {
        assert_eq!(TimeOfDay::from_seconds(SECONDS_PER_DAY), TimeOfDay::MIDNIGHT);
        assert_eq!(TimeOfDay::from_seconds(SECONDS_PER_DAY + 60).minute(), 1);
    }

    #[test]
    fn subtraction_wraps_to_previous_day() {
        let wake = TimeOfDay::from_hm(7, 0).unwrap();
        let bed = wake.wrapping_sub_seconds(30600.0).unwrap();
        assert_eq!(bed, TimeOfDay::from_hm(22, 30).unwrap());
    }

    #[test]
    fn subtraction_within_same_day() {
        let wake = TimeOfDay::from_hm(12, 0).unwrap();
        let t = wake.wrapping_sub_seconds(3600.0).unwrap();
        assert_eq!(t.to_string(), "11:00");
    }

    #[test]
    fn subtraction_drops_fractional_seconds() {
        let t = TimeOfDay::MIDNIGHT.wrapping_sub_seconds(0.4).unwrap();
        assert_eq!(t.seconds(), SECONDS_PER_DAY - 1);
        let t = TimeOfDay::MIDNIGHT.wrapping_sub_seconds(0.6).unwrap();
        assert_eq!(t.seconds(), SECONDS_PER_DAY - 1);
        // 22:47:59.7 stays in 22:47
        let t = TimeOfDay::from_hm(7, 0).unwrap().wrapping_sub_seconds(29520.3).unwrap();
        assert_eq!(t.to_string(), "22:47");
        assert_eq!(t.second(), 59);
        let t = TimeOfDay::MIDNIGHT.wrapping_sub_seconds(1e-12).unwrap();
        assert_eq!(t.seconds(), SECONDS_PER_DAY - 1);
        let t = TimeOfDay::MIDNIGHT.wrapping_sub_seconds(-1e-12).unwrap();
        assert_eq!(t, TimeOfDay::MIDNIGHT);
        // more than a full day back
        let t = TimeOfDay::from_hm(7, 0).unwrap().wrapping_sub_seconds(86400.0 + 3600.0).unwrap();
        assert_eq!(t.to_string(), "06:00");
    }

    #[test]
    fn subtraction_rejects_non_finite() {
        assert!(TimeOfDay::MIDNIGHT.wrapping_sub_seconds(f64::NAN).is_none());
        assert!(TimeOfDay::MIDNIGHT.wrapping_sub_seconds(f64::INFINITY).is_none());
    }

    #[test]
    fn twelve_hour_format() {
        assert_eq!(TimeOfDay::from_hm(22, 48).unwrap().twelve_hour(), "10:48 PM");
        assert_eq!(TimeOfDay::MIDNIGHT.twelve_hour(), "12:00 AM");
        assert_eq!(TimeOfDay::from_hm(12, 5).unwrap().twelve_hour(), "12:05 PM");
        assert_eq!(TimeOfDay::from_hm(7, 0).unwrap().twelve_hour(), "7:00 AM");
    }

    #[test]
    fn serde_as_seconds() {
        let t = TimeOfDay::from_hm(7, 0).unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "25200");
        let back: TimeOfDay = serde_json::from_str("25200").unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<TimeOfDay>("86400").is_err());
    }
}
