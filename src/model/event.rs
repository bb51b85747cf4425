// File: src/model/event.rs
// Domain model for parsed timetable events.
use chrono::{DateTime, Duration, FixedOffset, NaiveTime};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Class type, a closed enumeration of the labels printed on the page.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
pub enum EventType {
    #[strum(serialize = "Лекция")]
    Lecture,
    #[strum(serialize = "Семинар")]
    Seminar,
    #[strum(serialize = "Лабораторная")]
    Lab,
}

/// Split-group code qualifying which half of a group attends.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
pub enum Subgroup {
    #[strum(serialize = "А")]
    A,
    #[strum(serialize = "Б")]
    B,
}

/// Start and end of the class slot within its day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTime {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Recurrence of one date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Recurrence {
    #[default]
    Once,
    Weekly,
    Biweekly,
}

impl Recurrence {
    /// Week multiplier as printed in serialized schedules: 0 for a
    /// single date, 1 for every week, 2 for every other week.
    pub fn interval(self) -> u32 {
        match self {
            Recurrence::Once => 0,
            Recurrence::Weekly => 1,
            Recurrence::Biweekly => 2,
        }
    }
}

/// One date range of an event.
///
/// `start` and `end` carry the class start time as their time-of-day
/// component, in the page's civil zone. For `Once`, `end == start`;
/// otherwise `end` is the last occurrence's own date, an inclusive
/// bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDate {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub recurrence: Recurrence,
}

impl EventDate {
    /// Enumerates the start datetime of every individual occurrence
    /// covered by this range, in chronological order.
    pub fn occurrences(&self) -> Vec<DateTime<FixedOffset>> {
        match self.recurrence {
            Recurrence::Once => vec![self.start],
            rec => {
                let step = Duration::days(7 * i64::from(rec.interval()));
                let mut dates = Vec::new();
                let mut date = self.start;
                while date <= self.end {
                    dates.push(date);
                    date = date + step;
                }
                dates
            }
        }
    }
}

/// One parsed timetable event. Produced once by the parser; downstream
/// encoders only read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub teacher: String,
    pub kind: EventType,
    pub subgroup: Option<Subgroup>,
    pub location: String,
    pub time: EventTime,
    pub dates: Vec<EventDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn zone() -> FixedOffset {
        FixedOffset::east_opt(3 * 3600).unwrap()
    }

    fn at(y: i32, mo: u32, d: u32) -> DateTime<FixedOffset> {
        zone().with_ymd_and_hms(y, mo, d, 8, 30, 0).unwrap()
    }

    #[test]
    fn once_has_single_occurrence() {
        let date = EventDate {
            start: at(2025, 9, 1),
            end: at(2025, 9, 1),
            recurrence: Recurrence::Once,
        };
        assert_eq!(date.occurrences(), vec![at(2025, 9, 1)]);
    }

    #[test]
    fn weekly_occurrences_step_seven_days() {
        let date = EventDate {
            start: at(2025, 9, 1),
            end: at(2025, 9, 29),
            recurrence: Recurrence::Weekly,
        };
        let dates = date.occurrences();
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[1], at(2025, 9, 8));
        assert_eq!(dates[4], at(2025, 9, 29));
    }

    #[test]
    fn biweekly_skips_every_other_week() {
        let date = EventDate {
            start: at(2025, 9, 1),
            end: at(2025, 9, 29),
            recurrence: Recurrence::Biweekly,
        };
        assert_eq!(
            date.occurrences(),
            vec![at(2025, 9, 1), at(2025, 9, 15), at(2025, 9, 29)]
        );
    }

    #[test]
    fn inverted_range_yields_no_occurrences() {
        let date = EventDate {
            start: at(2025, 9, 29),
            end: at(2025, 9, 1),
            recurrence: Recurrence::Weekly,
        };
        assert!(date.occurrences().is_empty());
    }
}
