//! Presentation-independent state behind the bedtime form.
//!
//! A UI binds its wake time picker, sleep stepper and coffee picker to a
//! [`BedtimeForm`] and renders [`BedtimeForm::bedtime_message`] or the
//! [`Alert`] returned by [`BedtimeForm::calculate`].

use std::ops::RangeInclusive;

use crate::estimator::{BedtimeResult, Estimator};
use crate::time_of_day::TimeOfDay;

pub const SLEEP_HOURS_RANGE: RangeInclusive<f64> = 4.0..=12.0;
pub const SLEEP_HOURS_STEP: f64 = 0.25;
pub const COFFEE_RANGE: RangeInclusive<u32> = 1..=20;

pub const DEFAULT_WAKE_HOUR: u32 = 7;
pub const DEFAULT_SLEEP_HOURS: f64 = 8.0;
pub const DEFAULT_COFFEE: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BedtimeForm {
    wake_up: TimeOfDay,
    sleep_amount: f64,
    coffee_amount: u32,
}

impl Default for BedtimeForm {
    fn default() -> Self {
        Self {
            wake_up: TimeOfDay::from_seconds(DEFAULT_WAKE_HOUR * 3600),
            sleep_amount: DEFAULT_SLEEP_HOURS,
            coffee_amount: DEFAULT_COFFEE,
        }
    }
}

impl BedtimeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wake_up(&self) -> TimeOfDay {
        self.wake_up
    }

    pub fn sleep_amount(&self) -> f64 {
        self.sleep_amount
    }

    pub fn coffee_amount(&self) -> u32 {
        self.coffee_amount
    }

    pub fn set_wake_up(&mut self, wake_up: TimeOfDay) {
        self.wake_up = wake_up;
    }

    /// Clamps into 4–12 hours and snaps to the nearest quarter hour.
    /// NaN is ignored.
    pub fn set_sleep_amount(&mut self, hours: f64) {
        if hours.is_nan() {
            return;
        }
        let (lo, hi) = (*SLEEP_HOURS_RANGE.start(), *SLEEP_HOURS_RANGE.end());
        let clamped = hours.clamp(lo, hi);
        let steps = ((clamped - lo) / SLEEP_HOURS_STEP).round();
        self.sleep_amount = (lo + steps * SLEEP_HOURS_STEP).min(hi);
    }

    pub fn increment_sleep(&mut self) {
        self.set_sleep_amount(self.sleep_amount + SLEEP_HOURS_STEP);
    }

    pub fn decrement_sleep(&mut self) {
        self.set_sleep_amount(self.sleep_amount - SLEEP_HOURS_STEP);
    }

    pub fn set_coffee_amount(&mut self, cups: u32) {
        self.coffee_amount = cups.clamp(*COFFEE_RANGE.start(), *COFFEE_RANGE.end());
    }

    pub fn increment_coffee(&mut self) {
        self.set_coffee_amount(self.coffee_amount.saturating_add(1));
    }

    pub fn decrement_coffee(&mut self) {
        self.set_coffee_amount(self.coffee_amount.saturating_sub(1));
    }

    pub fn bedtime<E: Estimator + ?Sized>(&self, estimator: &E) -> BedtimeResult {
        estimator.estimate(self.wake_up.seconds(), self.sleep_amount, self.coffee_amount)
    }

    /// The always-visible summary line.
    pub fn bedtime_message<E: Estimator + ?Sized>(&self, estimator: &E) -> String {
        match self.bedtime(estimator) {
            Ok(t) => format!("Your ideal bedtime: {}", t),
            Err(e) => e.to_string(),
        }
    }

    /// Result of the explicit "Calculate" action.
    pub fn calculate<E: Estimator + ?Sized>(&self, estimator: &E) -> Alert {
        match self.bedtime(estimator) {
            Ok(t) => Alert {
                title: "Your ideal bedtime is...".to_string(),
                message: t.to_string(),
            },
            Err(e) => Alert {
                title: "Error".to_string(),
                message: e.to_string(),
            },
        }
    }
}
