//! Block boundary detection over a line stream.

use crate::calendar::calendar_block::BlockParser;
use crate::calendar::calendar_types::EventList;
use crate::config::{ParserConfig, UnterminatedBlock};
use log::{debug, warn};
use std::io::BufRead;

pub const BEGIN_MARKER: &str = "BEGIN:VEVENT";
pub const END_MARKER: &str = "END:VEVENT";

#[derive(Debug)]
enum ScanState {
    Outside,
    Inside(BlockParser),
}

/// Walks `reader` once and appends every completed event to `events`.
/// Returns the number of events appended.
pub fn scan<R: BufRead>(mut reader: R, config: ParserConfig, events: &mut EventList) -> usize {
    let start_len = events.len();
    let mut state = ScanState::Outside;
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("Read error after line {}, stopping: {}", line_no, e);
                break;
            }
        }
        line_no += 1;
        let line = String::from_utf8_lossy(trim_line_ending(&buf));

        state = match state {
            ScanState::Outside if line.contains(BEGIN_MARKER) => {
                debug!("Event block opened at line {}", line_no);
                ScanState::Inside(BlockParser::new(config.categories))
            }
            ScanState::Outside => ScanState::Outside,
            ScanState::Inside(block) if line.contains(END_MARKER) => {
                events.push(block.finish());
                ScanState::Outside
            }
            ScanState::Inside(mut block) => {
                block.feed(&line);
                ScanState::Inside(block)
            }
        };
    }

    if let ScanState::Inside(block) = state {
        match config.unterminated {
            UnterminatedBlock::Drop => {
                warn!("Input ended inside an event block, dropping incomplete event");
            }
            UnterminatedBlock::Flush => {
                warn!("Input ended inside an event block, keeping partial event");
                events.push(block.finish());
            }
        }
    }

    events.len() - start_len
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CategorySeparator;
    use pretty_assertions::assert_eq;
    use std::io::{self, Cursor, Read};

    fn scan_str(input: &str, config: ParserConfig) -> EventList {
        let mut events = EventList::default();
        scan(Cursor::new(input.as_bytes()), config, &mut events);
        events
    }

    #[test]
    fn test_lines_outside_blocks_are_ignored() {
        let input = "BEGIN:VCALENDAR\nSUMMARY:Not an event\nBEGIN:VEVENT\nSUMMARY:Event\nEND:VEVENT\nSUMMARY:After\n";
        let events = scan_str(input, ParserConfig::default());
        assert_eq!(events.len(), 1);
        assert_eq!(events.get(0).and_then(|e| e.summary()), Some("Event"));
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let input = "BEGIN:VEVENT\r\nSUMMARY:Windows\r\nEND:VEVENT";
        let events = scan_str(input, ParserConfig::default());
        assert_eq!(events.get(0).and_then(|e| e.summary()), Some("Windows"));
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let mut events = EventList::default();
        let input: &[u8] = b"BEGIN:VEVENT\nSUMMARY:caf\xe9\nEND:VEVENT\n";
        assert_eq!(scan(input, ParserConfig::default(), &mut events), 1);
        assert_eq!(events.get(0).and_then(|e| e.summary()), Some("caf\u{FFFD}"));
    }

    #[test]
    fn test_unterminated_block_policies() {
        let input = "BEGIN:VEVENT\nSUMMARY:Done\nEND:VEVENT\nBEGIN:VEVENT\nSUMMARY:Partial\n";

        let dropped = scan_str(input, ParserConfig::default());
        assert_eq!(dropped.len(), 1);

        let flushed = scan_str(
            input,
            ParserConfig { categories: CategorySeparator::Space, unterminated: UnterminatedBlock::Flush },
        );
        assert_eq!(flushed.len(), 2);
        assert_eq!(flushed.get(1).and_then(|e| e.summary()), Some("Partial"));
    }

    struct FailingReader {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::Other, "device unplugged")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_read_error_ends_input() {
        let reader = io::BufReader::new(FailingReader {
            data: Cursor::new(b"BEGIN:VEVENT\nSUMMARY:One\nEND:VEVENT\nBEGIN:VEVENT\n".to_vec()),
        });
        let mut events = EventList::default();
        assert_eq!(scan(reader, ParserConfig::default(), &mut events), 1);
    }
}
