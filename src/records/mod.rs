//! Record types stored in the two data files.
//!
//! - [`Contestant`]: leaderboard rows, ranked by hours (highest first)
//! - [`Slide`]: slideshow entries, ordered by their editable index

mod contestant;
mod slide;

pub use contestant::{Contestant, PicType};
pub use slide::Slide;

use regex::Regex;

fn field_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("field pattern is valid")
}

/// The first capture group that took part in the match.
fn capture<'a>(re: &Regex, chunk: &'a str) -> Option<&'a str> {
    re.captures(chunk)
        .and_then(|caps| caps.iter().skip(1).flatten().next())
        .map(|m| m.as_str())
}

fn capture_number<T: std::str::FromStr + Default>(re: &Regex, chunk: &str) -> T {
    capture(re, chunk)
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}
