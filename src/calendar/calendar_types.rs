//! Value model for parsed calendar events.
//
// An event is a string-keyed map of typed property values. Only the names in
// `FieldName` are ever created by classification; everything else reaches a
// record through the continuation cursor.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Properties that a recognized content line may create on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    DtStart,
    DtEnd,
    Categories,
    Summary,
    Uid,
    Description,
    Location,
    Url,
    DtStamp,
}

impl FieldName {
    /// Scalar fields stored verbatim as text.
    pub const SCALARS: [FieldName; 6] = [
        FieldName::Summary,
        FieldName::Uid,
        FieldName::Description,
        FieldName::Location,
        FieldName::Url,
        FieldName::DtStamp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::DtStart => "DTSTART",
            FieldName::DtEnd => "DTEND",
            FieldName::Categories => "CATEGORIES",
            FieldName::Summary => "SUMMARY",
            FieldName::Uid => "UID",
            FieldName::Description => "DESCRIPTION",
            FieldName::Location => "LOCATION",
            FieldName::Url => "URL",
            FieldName::DtStamp => "DTSTAMP",
        }
    }

    /// Exact lookup of a scalar field name.
    pub fn scalar(name: &str) -> Option<FieldName> {
        FieldName::SCALARS.iter().copied().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single property value held by an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    /// Always in the local system zone. `None` marks a value that could not be parsed.
    DateTime(Option<DateTime<Local>>),
    Categories(Vec<String>),
}

impl PropertyValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Local>> {
        match self {
            PropertyValue::DateTime(dt) => *dt,
            _ => None,
        }
    }

    pub fn as_categories(&self) -> Option<&[String]> {
        match self {
            PropertyValue::Categories(list) => Some(list.as_slice()),
            _ => None,
        }
    }
}

/// One parsed `VEVENT` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventRecord {
    properties: BTreeMap<String, PropertyValue>,
}

impl EventRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn get_ignore_case(&self, key: &str) -> Option<&PropertyValue> {
        self.properties
            .get(key)
            .or_else(|| {
                self.properties
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(key))
                    .map(|(_, value)| value)
            })
    }

    /// Stores `value` under `key`, replacing any existing value whose name
    /// differs from `key` only by case.
    pub fn set(&mut self, key: &str, value: PropertyValue) {
        let stale: Vec<String> = self
            .properties
            .keys()
            .filter(|name| name.as_str() != key && name.eq_ignore_ascii_case(key))
            .cloned()
            .collect();
        for name in stale {
            self.properties.remove(&name);
        }
        self.properties.insert(key.to_string(), value);
    }

    pub fn field(&self, field: FieldName) -> Option<&PropertyValue> {
        self.get(field.as_str())
    }

    pub fn summary(&self) -> Option<&str> {
        self.field(FieldName::Summary).and_then(PropertyValue::as_text)
    }

    pub fn uid(&self) -> Option<&str> {
        self.field(FieldName::Uid).and_then(PropertyValue::as_text)
    }

    pub fn description(&self) -> Option<&str> {
        self.field(FieldName::Description).and_then(PropertyValue::as_text)
    }

    pub fn location(&self) -> Option<&str> {
        self.field(FieldName::Location).and_then(PropertyValue::as_text)
    }

    pub fn url(&self) -> Option<&str> {
        self.field(FieldName::Url).and_then(PropertyValue::as_text)
    }

    pub fn dtstamp(&self) -> Option<&str> {
        self.field(FieldName::DtStamp).and_then(PropertyValue::as_text)
    }

    pub fn start(&self) -> Option<DateTime<Local>> {
        self.field(FieldName::DtStart).and_then(PropertyValue::as_datetime)
    }

    pub fn end(&self) -> Option<DateTime<Local>> {
        self.field(FieldName::DtEnd).and_then(PropertyValue::as_datetime)
    }

    pub fn categories(&self) -> Option<&[String]> {
        self.field(FieldName::Categories).and_then(PropertyValue::as_categories)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Completed events in the order their blocks appeared in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventList {
    events: Vec<EventRecord>,
}

impl EventList {
    pub(crate) fn push(&mut self, event: EventRecord) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&EventRecord> {
        self.events.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EventRecord> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[EventRecord] {
        &self.events
    }
}

impl<'a> IntoIterator for &'a EventList {
    type Item = &'a EventRecord;
    type IntoIter = std::slice::Iter<'a, EventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_replaces_case_variant() {
        let mut event = EventRecord::new();
        event.set("summary", PropertyValue::Text("old".to_string()));
        event.set("SUMMARY", PropertyValue::Text("new".to_string()));

        assert_eq!(event.len(), 1);
        assert_eq!(event.summary(), Some("new"));
        assert_eq!(event.get("summary"), None);
    }

    #[test]
    fn test_get_ignore_case() {
        let mut event = EventRecord::new();
        event.set("X-Note", PropertyValue::Text("hi".to_string()));

        assert_eq!(event.get_ignore_case("x-note").and_then(PropertyValue::as_text), Some("hi"));
        assert_eq!(event.get("x-note"), None);
    }

    #[test]
    fn test_typed_accessors_reject_other_variants() {
        let mut event = EventRecord::new();
        event.set("SUMMARY", PropertyValue::Categories(vec!["a".to_string()]));
        event.set("DTSTART", PropertyValue::DateTime(None));

        assert_eq!(event.summary(), None);
        assert_eq!(event.start(), None);
        assert!(event.field(FieldName::DtStart).is_some());
    }

    #[test]
    fn test_scalar_lookup_is_exact() {
        assert_eq!(FieldName::scalar("URL"), Some(FieldName::Url));
        assert_eq!(FieldName::scalar("url"), None);
        assert_eq!(FieldName::scalar("DTSTART"), None);
    }
}
