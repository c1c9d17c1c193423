pub mod calendar;
pub mod config;

pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

// Re-export commonly used types
pub use calendar::{CalParser, CalendarError, EventList, EventRecord, PropertyValue};
pub use config::{CategorySeparator, Config, ParserConfig, UnterminatedBlock};
