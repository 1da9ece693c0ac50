//! Countdown decomposition into day/hour/minute/second fields

use serde::{Deserialize, Serialize};

const MILLIS_PER_SECOND: u64 = 1000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: u64 = 24 * MILLIS_PER_HOUR;

/// One clock field, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Days, Field::Hours, Field::Minutes, Field::Seconds];

    /// Position in `Field::ALL`
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Remaining time split into clock fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Snapshot {
    /// Time left until `deadline_millis`; zero once it has passed
    pub fn between(now_millis: u64, deadline_millis: u64) -> Self {
        Self::from_millis(deadline_millis.saturating_sub(now_millis))
    }

    pub fn from_millis(ms: u64) -> Self {
        Self {
            days: ms / MILLIS_PER_DAY,
            hours: ((ms / MILLIS_PER_HOUR) % 24) as u32,
            minutes: ((ms / MILLIS_PER_MINUTE) % 60) as u32,
            seconds: ((ms / MILLIS_PER_SECOND) % 60) as u32,
        }
    }

    pub fn get(&self, field: Field) -> u64 {
        match field {
            Field::Days => self.days,
            Field::Hours => self.hours as u64,
            Field::Minutes => self.minutes as u64,
            Field::Seconds => self.seconds as u64,
        }
    }

    /// Whole seconds represented by this snapshot
    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400 + self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Fields whose value differs from `previous`
    pub fn changed_fields(&self, previous: &Snapshot) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|&f| self.get(f) != previous.get(f))
            .collect()
    }
}
