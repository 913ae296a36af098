use clap::Parser;

use crate::config::CONFIG_PATH;

#[derive(Parser, Debug)]
#[command(name = "company-enricher")]
#[command(about = "Fills in company phone numbers from a tax-lookup site")]
#[command(version)]
pub struct Cli {
    /// Input CSV with one company per row
    #[arg(long, default_value = "resource/data.csv")]
    pub data: String,

    /// Field delimiter of the input file (single character, `\t` for tab)
    #[arg(long, default_value = ",")]
    pub delimiter: String,

    /// Configuration file (built-in defaults are used if it does not exist)
    #[arg(long, default_value = CONFIG_PATH)]
    pub config: String,

    /// Write the default configuration file to --config and exit
    #[arg(long)]
    pub init: bool,

    /// Output CSV path (overrides output.path from config)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Tax-lookup site base URL (overrides lookup.base_url from config)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Write a JSON run summary to this path
    #[arg(long, value_name = "FILE")]
    pub summary_file: Option<String>,

    /// Verbose logging (use -v for library diagnostics, -vv for debug output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Export console log lines to a file
    #[arg(long)]
    pub log_file: Option<String>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    /// Input delimiter as a single byte
    pub fn delimiter_byte(&self) -> Result<u8, String> {
        parse_delimiter(&self.delimiter)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.init && self.data.trim().is_empty() {
            return Err("Input path cannot be empty".to_string());
        }
        self.delimiter_byte()?;
        Ok(())
    }
}

/// Accepts exactly one ASCII character, or the escape `\t`
pub fn parse_delimiter(raw: &str) -> Result<u8, String> {
    if raw == "\\t" {
        return Ok(b'\t');
    }

    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        (None, _) => Err("Delimiter cannot be empty".to_string()),
        _ => Err(format!("Delimiter must be a single ASCII character, got '{}'", raw)),
    }
}
