use crate::calendar::calendar_fields::{apply_line, FieldCursor};
use crate::calendar::calendar_types::EventRecord;
use crate::config::CategorySeparator;

/// Builds one event from the lines between its begin and end markers.
#[derive(Debug)]
pub struct BlockParser {
    event: EventRecord,
    cursor: FieldCursor,
    separator: CategorySeparator,
}

impl BlockParser {
    pub fn new(separator: CategorySeparator) -> Self {
        Self { event: EventRecord::new(), cursor: FieldCursor::default(), separator }
    }

    pub fn feed(&mut self, line: &str) {
        apply_line(line, &mut self.event, &mut self.cursor, self.separator);
    }

    pub fn cursor(&self) -> &FieldCursor {
        &self.cursor
    }

    /// Hand over the completed record. The cursor goes with `self`.
    pub fn finish(self) -> EventRecord {
        self.event
    }
}
