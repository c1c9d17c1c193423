use std::path::PathBuf;

mod calendar_block;
mod calendar_fields;
mod calendar_parser;
mod calendar_scanner;
mod calendar_time;
mod calendar_types;
mod content_line;

pub use calendar_block::*;
pub use calendar_fields::*;
pub use calendar_parser::*;
pub use calendar_scanner::*;
pub use calendar_time::*;
pub use calendar_types::*;
pub use content_line::*;

/// Custom error type for calendar operations
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("Could not open calendar file '{}' for reading: {}", path.display(), source)]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
