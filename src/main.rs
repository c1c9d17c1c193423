use anyhow::{Context, Result};
use calparse::{CalParser, CategorySeparator, Config, EventRecord, UnterminatedBlock};
use log::{debug, error};
use std::path::PathBuf;

const USAGE: &str = "Usage: calparse [--json] [--comma-categories] [--flush-partial] <file.ics>...";

/// Command line arguments structure
#[derive(Debug, Default)]
struct CommandArgs {
    json: bool,
    comma_categories: bool,
    flush_partial: bool,
    files: Vec<PathBuf>,
}

impl CommandArgs {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = CommandArgs::default();
        for arg in args {
            match arg.as_str() {
                "--json" => parsed.json = true,
                "--comma-categories" => parsed.comma_categories = true,
                "--flush-partial" => parsed.flush_partial = true,
                flag if flag.starts_with("--") => {
                    return Err(anyhow::anyhow!("Unknown flag '{}'\n{}", flag, USAGE));
                }
                file => parsed.files.push(PathBuf::from(file)),
            }
        }
        if parsed.files.is_empty() {
            return Err(anyhow::anyhow!("No input files\n{}", USAGE));
        }
        Ok(parsed)
    }
}

fn describe(event: &EventRecord) -> String {
    let mut output = event.summary().unwrap_or("(untitled)").to_string();

    if let Some(start) = event.start() {
        output.push_str(&format!(" - {}", start.format("%Y-%m-%d %H:%M")));
    }
    if let Some(end) = event.end() {
        output.push_str(&format!(" to {}", end.format("%Y-%m-%d %H:%M")));
    }
    if let Some(location) = event.location() {
        output.push_str(&format!("\n   Location: {}", location));
    }
    if let Some(categories) = event.categories() {
        output.push_str(&format!("\n   Categories: {}", categories.join(", ")));
    }

    output
}

fn main() -> Result<()> {
    calparse::init_logger();

    let args = CommandArgs::parse(std::env::args().skip(1))?;
    debug!("Arguments: {:?}", args);

    let mut config = Config::load()?.parser;
    if args.comma_categories {
        config.categories = CategorySeparator::SpaceOrComma;
    }
    if args.flush_partial {
        config.unterminated = UnterminatedBlock::Flush;
    }

    let mut parser = CalParser::with_config(config);
    let mut failed = false;
    for path in &args.files {
        if let Err(e) = parser.parse_path(path) {
            error!("{}", e);
            failed = true;
        }
    }

    if args.json {
        let json = serde_json::to_string_pretty(parser.event_list())
            .context("Failed to serialize events")?;
        println!("{}", json);
    } else {
        for (i, event) in parser.event_list().iter().enumerate() {
            println!("{}. {}", i + 1, describe(event));
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<CommandArgs> {
        CommandArgs::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_flags_and_files() -> Result<()> {
        let parsed = args(&["--json", "a.ics", "--flush-partial", "b.ics"])?;
        assert!(parsed.json);
        assert!(parsed.flush_partial);
        assert!(!parsed.comma_categories);
        assert_eq!(parsed.files, vec![PathBuf::from("a.ics"), PathBuf::from("b.ics")]);
        Ok(())
    }

    #[test]
    fn test_rejects_unknown_flag_and_no_files() {
        assert!(args(&["--verbose", "a.ics"]).is_err());
        assert!(args(&["--json"]).is_err());
    }
}
