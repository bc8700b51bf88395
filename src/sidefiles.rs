//! Small whole-file writers for the price constants and the update date.
//!
//! Both files are overwritten wholesale; nothing is merged.

use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{EditError, EditResult};

/// Date format written into the date stamp file.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Prize pool settings shown next to the leaderboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceConfig {
    pub pool_price: u64,
    pub price_per_hour: u64,
    pub total_hours: u64,
}

impl PriceConfig {
    pub fn render(&self) -> String {
        format!(
            "export const PRICE_CONFIG = {{\n  POOL_PRICE: {},\n  PRICE_PER_HOUR: {},\n  TOTAL_HOURS: {},\n}} as const;\n",
            self.pool_price, self.price_per_hour, self.total_hours
        )
    }

    /// Best-effort read of a constants file. Missing fields are zero.
    pub fn parse(text: &str) -> Self {
        static POOL: LazyLock<Regex> = LazyLock::new(|| number_field("POOL_PRICE"));
        static PER_HOUR: LazyLock<Regex> = LazyLock::new(|| number_field("PRICE_PER_HOUR"));
        static TOTAL: LazyLock<Regex> = LazyLock::new(|| number_field("TOTAL_HOURS"));

        let read = |re: &Regex| {
            re.captures(text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or_default()
        };
        Self {
            pool_price: read(&POOL),
            price_per_hour: read(&PER_HOUR),
            total_hours: read(&TOTAL),
        }
    }
}

fn number_field(key: &str) -> Regex {
    Regex::new(&format!(r"\b{key}\s*:\s*(\d+)")).expect("constant pattern is valid")
}

/// Overwrite the constants file.
///
/// # Errors
///
/// Returns [`EditError::Io`] if the file cannot be written.
pub fn write_constants(path: &Path, config: &PriceConfig) -> EditResult<()> {
    std::fs::write(path, config.render()).map_err(|e| EditError::io("write", path, e))?;
    tracing::info!(path = %path.display(), ?config, "wrote price constants");
    Ok(())
}

/// Read the constants file if it exists.
///
/// # Errors
///
/// Returns [`EditError::Io`] for read failures other than a missing file.
pub fn read_constants(path: &Path) -> EditResult<Option<PriceConfig>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(PriceConfig::parse(&text))),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(EditError::io("read", path, err)),
    }
}

pub fn render_date_stamp(date: NaiveDate) -> String {
    format!(
        "export const DATE_CONFIG = {{\n  LATEST_UPDATE: '{}',\n}} as const;\n",
        date.format(DATE_FORMAT)
    )
}

/// Overwrite the date stamp file with `date`.
///
/// # Errors
///
/// Returns [`EditError::Io`] if the file cannot be written.
pub fn write_date_stamp(path: &Path, date: NaiveDate) -> EditResult<()> {
    std::fs::write(path, render_date_stamp(date)).map_err(|e| EditError::io("write", path, e))?;
    tracing::info!(path = %path.display(), %date, "wrote date stamp");
    Ok(())
}

/// Today's local date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
