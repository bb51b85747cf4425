// File: src/export/ical.rs
// iCalendar rendition of a parsed timetable. Components are built with
// the icalendar crate; the VTIMEZONE block and the calendar envelope
// are assembled as raw text since the crate does not model them.
use anyhow::Result;
use chrono::{Datelike, Duration, Utc, Weekday};
use icalendar::{Calendar, Component, Event as IcsEvent, Property};
use std::io::Write;
use uuid::Uuid;

use crate::export::keeps;
use crate::model::{Event, EventDate, Recurrence, Subgroup};

const VERSION: &str = "2.0";
const METHOD: &str = "PUBLISH";
const PRODUCT_ID: &str = "-//gridcal//Timetable export//RU";
const TIMEZONE_ID: &str = "Europe/Moscow";
const TIMEZONE_OFFSET: &str = "+0300";
const SCALE: &str = "GREGORIAN";
const TRANSPARENT: &str = "OPAQUE";
const LAYOUT_DATETIME: &str = "%Y%m%dT%H%M%S";
const LAYOUT_DATETIME_UTC: &str = "%Y%m%dT%H%M%SZ";

fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

pub struct IcalEncoder<W: Write> {
    w: W,
}

impl<W: Write> IcalEncoder<W> {
    pub fn new(w: W) -> Self {
        Self { w }
    }

    /// Writes the whole schedule as one VCALENDAR, one VEVENT per date
    /// range of each event that passes the subgroup filter.
    pub fn encode(
        &mut self,
        events: &[Event],
        group: &str,
        subgroup: Option<Subgroup>,
    ) -> Result<()> {
        let mut calendar = Calendar::new();
        for event in events.iter().filter(|e| keeps(subgroup, e)) {
            for date in &event.dates {
                calendar.push(build_vevent(event, date));
            }
        }

        // VCALENDAR envelope
        write!(self.w, "BEGIN:VCALENDAR\r\n")?;
        write!(self.w, "VERSION:{}\r\n", VERSION)?;
        write!(self.w, "PRODID:{}\r\n", PRODUCT_ID)?;
        write!(self.w, "METHOD:{}\r\n", METHOD)?;
        write!(self.w, "CALSCALE:{}\r\n", SCALE)?;
        write!(self.w, "X-WR-CALNAME:{}\r\n", group)?;

        // VTIMEZONE
        write!(self.w, "BEGIN:VTIMEZONE\r\n")?;
        write!(self.w, "TZID:{}\r\n", TIMEZONE_ID)?;
        write!(self.w, "BEGIN:STANDARD\r\n")?;
        write!(self.w, "DTSTART:19700101T000000\r\n")?;
        write!(self.w, "TZOFFSETFROM:{}\r\n", TIMEZONE_OFFSET)?;
        write!(self.w, "TZOFFSETTO:{}\r\n", TIMEZONE_OFFSET)?;
        write!(self.w, "END:STANDARD\r\n")?;
        write!(self.w, "END:VTIMEZONE\r\n")?;

        // VEVENT components, extracted from the crate's own envelope
        let rendered = calendar.to_string();
        if let Some(start) = rendered.find("BEGIN:VEVENT")
            && let Some(end) = rendered.rfind("END:VEVENT")
        {
            let block = &rendered[start..end + "END:VEVENT".len()];
            write!(self.w, "{}\r\n", block.trim_end())?;
        }

        write!(self.w, "END:VCALENDAR\r\n")?;
        Ok(())
    }
}

fn build_vevent(event: &Event, date: &EventDate) -> IcsEvent {
    let mut vevent = IcsEvent::new();
    vevent.uid(&Uuid::new_v4().to_string());
    vevent.timestamp(Utc::now());
    vevent.add_property("LOCATION", event.location.as_str());
    vevent.add_property("TRANSP", TRANSPARENT);

    let summary = match event.subgroup {
        Some(subgroup) => format!("[{}] {}", subgroup, event.title),
        None => event.title.clone(),
    };
    vevent.summary(&summary);

    let description = match event.subgroup {
        Some(subgroup) => format!("{} [{} - {}]", event.teacher, event.kind, subgroup),
        None => format!("{} [{}]", event.teacher, event.kind),
    };
    vevent.description(&description);

    // DTSTART carries the class start on the range's first day; DTEND
    // the class end on the same day. The date range itself becomes an
    // RRULE when it recurs.
    let starts = date.start.format(LAYOUT_DATETIME).to_string();
    let mut prop = Property::new("DTSTART", starts.as_str());
    prop.add_parameter("TZID", TIMEZONE_ID);
    vevent.append_multi_property(prop);

    let ends = date
        .start
        .date_naive()
        .and_time(event.time.end)
        .format(LAYOUT_DATETIME)
        .to_string();
    let mut prop = Property::new("DTEND", ends.as_str());
    prop.add_parameter("TZID", TIMEZONE_ID);
    vevent.append_multi_property(prop);

    if date.recurrence != Recurrence::Once {
        // UNTIL must cover the last occurrence, which starts on the
        // inclusive end date itself.
        let until = (date.end + Duration::days(1))
            .with_timezone(&Utc)
            .format(LAYOUT_DATETIME_UTC);
        let rrule = format!(
            "FREQ=WEEKLY;INTERVAL={};BYDAY={};UNTIL={}",
            date.recurrence.interval(),
            weekday_code(date.start.weekday()),
            until
        );
        vevent.add_property("RRULE", rrule.as_str());
    }

    vevent
}
