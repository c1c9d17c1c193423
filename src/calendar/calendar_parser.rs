//! Entry point for reading events out of calendar text.

use crate::calendar::calendar_scanner::scan;
use crate::calendar::calendar_types::EventList;
use crate::calendar::CalendarError;
use crate::config::ParserConfig;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Accumulates events across any number of parse calls.
///
/// Each call owns its input for the duration of the call only; the reader or
/// file is dropped before the call returns. Parsing takes `&mut self`, so a
/// single instance can never run two parses at once.
#[derive(Debug, Default)]
pub struct CalParser {
    config: ParserConfig,
    events: EventList,
}

impl CalParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config, events: EventList::default() }
    }

    pub fn config(&self) -> ParserConfig {
        self.config
    }

    /// Parse an in-memory buffer. Content problems never fail the call.
    pub fn parse_bytes(&mut self, data: &[u8]) -> usize {
        self.parse_reader(data)
    }

    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> usize {
        let added = scan(reader, self.config, &mut self.events);
        debug!("Parsed {} event(s), {} total", added, self.events.len());
        added
    }

    /// Parse an already open file. The handle is closed when this returns.
    pub fn parse_file(&mut self, file: File) -> usize {
        self.parse_reader(BufReader::new(file))
    }

    /// Open `path` read-only and parse it. Failing to open is the only error.
    pub fn parse_path(&mut self, path: &Path) -> Result<usize, CalendarError> {
        let file = File::open(path)
            .map_err(|source| CalendarError::Open { path: path.to_path_buf(), source })?;
        info!("Reading calendar file {}", path.display());
        Ok(self.parse_file(file))
    }

    pub fn event_list(&self) -> &EventList {
        &self.events
    }
}
