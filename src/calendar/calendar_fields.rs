//! Field classification for lines inside a `VEVENT` block.
//
// Each line either writes one of the known fields or is appended to the
// field written most recently. Dispatch order: timestamps, categories,
// fixed scalars, continuation.

use crate::calendar::calendar_time::parse_timestamp;
use crate::calendar::calendar_types::{EventRecord, FieldName, PropertyValue};
use crate::calendar::content_line::ContentLine;
use crate::config::CategorySeparator;
use log::debug;

/// Name of the field the next continuation line appends to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldCursor(Option<String>);

impl FieldCursor {
    pub fn current(&self) -> Option<&str> {
        self.0.as_deref()
    }

    fn point_at(&mut self, key: &str) {
        self.0 = Some(key.to_string());
    }
}

/// Which branch a line was dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Timestamp,
    Categories,
    Scalar(FieldName),
    Continuation,
}

pub fn classify(line: &ContentLine<'_>) -> LineKind {
    let name = line.name;
    if name.contains(FieldName::DtStart.as_str()) || name.contains(FieldName::DtEnd.as_str()) {
        LineKind::Timestamp
    } else if name == FieldName::Categories.as_str() {
        LineKind::Categories
    } else if let Some(field) = FieldName::scalar(name) {
        LineKind::Scalar(field)
    } else {
        LineKind::Continuation
    }
}

/// Apply one raw line to `event`, moving `cursor` when a field is written.
pub fn apply_line(
    raw: &str,
    event: &mut EventRecord,
    cursor: &mut FieldCursor,
    separator: CategorySeparator,
) {
    let line = ContentLine::parse(raw);
    match classify(&line) {
        LineKind::Timestamp => {
            let value = parse_timestamp(line.value, line.param("TZID"));
            event.set(line.name, PropertyValue::DateTime(value));
            cursor.point_at(line.name);
        }
        LineKind::Categories => {
            event.set(line.name, PropertyValue::Categories(separator.split(line.value)));
            cursor.point_at(line.name);
        }
        LineKind::Scalar(field) => {
            event.set(field.as_str(), PropertyValue::Text(line.value.to_string()));
            cursor.point_at(field.as_str());
        }
        LineKind::Continuation => append_continuation(raw, event, cursor),
    }
}

fn append_continuation(raw: &str, event: &mut EventRecord, cursor: &FieldCursor) {
    let Some(key) = cursor.current() else {
        debug!("Continuation line before any field, ignoring: '{}'", raw);
        return;
    };

    let updated = match event.get_ignore_case(key) {
        None => PropertyValue::Text(raw.to_string()),
        Some(PropertyValue::Text(text)) => PropertyValue::Text(format!("{}{}", text, raw)),
        Some(PropertyValue::Categories(list)) => {
            let mut list = list.clone();
            match list.last_mut() {
                Some(last) => last.push_str(raw),
                None => list.push(raw.to_string()),
            }
            PropertyValue::Categories(list)
        }
        Some(PropertyValue::DateTime(_)) => {
            debug!("Ignoring continuation of timestamp field {}: '{}'", key, raw);
            return;
        }
    };
    event.set(key, updated);
}
