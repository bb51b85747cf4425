// File: src/export/json.rs
// JSON rendition of a parsed timetable. The wire shape is decoupled
// from the domain model through DTO structs so the output stays stable
// when the model grows fields.
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::export::keeps;
use crate::model::{Event, EventDate, EventTime, Subgroup};

const LAYOUT_TIME: &str = "%H:%M";
const LAYOUT_DATE: &str = "%Y-%m-%d";

#[derive(Serialize)]
struct TimeDto {
    start: String,
    end: String,
}

#[derive(Serialize)]
struct DateDto {
    start: String,
    end: String,
    interval: u32,
}

#[derive(Serialize)]
struct EventDto {
    title: String,
    teacher: String,
    #[serde(rename = "type")]
    kind: String,
    subgroup: String,
    location: String,
    time: TimeDto,
    dates: Vec<DateDto>,
}

#[derive(Serialize)]
struct ScheduleDto {
    group: String,
    subgroup: String,
    events: Vec<EventDto>,
}

fn encode_time(time: &EventTime) -> TimeDto {
    TimeDto {
        start: time.start.format(LAYOUT_TIME).to_string(),
        end: time.end.format(LAYOUT_TIME).to_string(),
    }
}

fn encode_date(date: &EventDate) -> DateDto {
    DateDto {
        start: date.start.format(LAYOUT_DATE).to_string(),
        end: date.end.format(LAYOUT_DATE).to_string(),
        interval: date.recurrence.interval(),
    }
}

fn encode_event(event: &Event) -> EventDto {
    EventDto {
        title: event.title.clone(),
        teacher: event.teacher.clone(),
        kind: event.kind.to_string(),
        subgroup: event
            .subgroup
            .map(|s| s.to_string())
            .unwrap_or_default(),
        location: event.location.clone(),
        time: encode_time(&event.time),
        dates: event.dates.iter().map(encode_date).collect(),
    }
}

pub struct JsonEncoder<W: Write> {
    w: W,
}

impl<W: Write> JsonEncoder<W> {
    pub fn new(w: W) -> Self {
        Self { w }
    }

    /// Writes the whole schedule as a single JSON document.
    pub fn encode(
        &mut self,
        events: &[Event],
        group: &str,
        subgroup: Option<Subgroup>,
    ) -> Result<()> {
        let schedule = ScheduleDto {
            group: group.to_string(),
            subgroup: subgroup.map(|s| s.to_string()).unwrap_or_default(),
            events: events
                .iter()
                .filter(|e| keeps(subgroup, e))
                .map(encode_event)
                .collect(),
        };

        serde_json::to_writer(&mut self.w, &schedule).context("Failed to encode schedule JSON")?;
        self.w.write_all(b"\n")?;
        Ok(())
    }
}
