use std::cmp::Ordering;
use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

use super::{capture, capture_number, field_regex};
use crate::block::BlockRecord;

static RANK: LazyLock<Regex> = LazyLock::new(|| field_regex(r"\brank\s*:\s*(\d+)"));
static NAME: LazyLock<Regex> = LazyLock::new(|| field_regex(r#"\bname\s*:\s*"([^"]*)""#));
static HOURS: LazyLock<Regex> = LazyLock::new(|| field_regex(r"\bhours\s*:\s*(\d+)"));
static MONEY: LazyLock<Regex> = LazyLock::new(|| field_regex(r"\bmoney\s*:\s*(\d+)"));
static PIC_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| field_regex(r#"\bprofilePic\s*:\s*(?:"([^"]*)"|'([^']*)')"#));
static PIC_BARE: LazyLock<Regex> =
    LazyLock::new(|| field_regex(r"\bprofilePic\s*:\s*([^,}\s]+)"));
static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| field_regex(r"^[A-Za-z_$][A-Za-z0-9_$]*$"));

/// How a profile picture is referenced in the data file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PicType {
    /// A quoted string literal, e.g. `"https://…/me.png"`.
    #[default]
    Url,
    /// A bare identifier naming an imported asset, e.g. `logoImg`.
    Import,
}

impl PicType {
    /// Classify a picture reference typed into the form.
    ///
    /// `http(s)://` values and empty input are URLs. A valid identifier is an
    /// import. Anything else (a relative path, say) is written as a URL so
    /// the output stays syntactically valid.
    pub fn infer(input: &str) -> Self {
        let input = input.trim();
        if input.starts_with("http://") || input.starts_with("https://") || input.is_empty() {
            Self::Url
        } else if IDENTIFIER.is_match(input) {
            Self::Import
        } else {
            Self::Url
        }
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contestant {
    /// 1-based position by hours, recomputed on every change.
    pub rank: u32,
    pub name: String,
    pub hours: u64,
    pub money: u64,
    pub profile_pic: String,
    pub pic_type: PicType,
}

impl Contestant {
    /// Build a contestant from form values, inferring the picture type.
    pub fn new(name: impl Into<String>, hours: u64, money: u64, profile_pic: &str) -> Self {
        let profile_pic = profile_pic.trim();
        Self {
            rank: 0,
            name: name.into(),
            hours,
            money,
            profile_pic: profile_pic.to_string(),
            pic_type: PicType::infer(profile_pic),
        }
    }

    fn pic_literal(&self) -> String {
        match self.pic_type {
            PicType::Import if !self.profile_pic.is_empty() => self.profile_pic.clone(),
            _ => format!("\"{}\"", self.profile_pic),
        }
    }
}

impl BlockRecord for Contestant {
    const MARKER: &'static str = "const leaderboardData";

    fn from_chunk(chunk: &str) -> Self {
        let (profile_pic, pic_type) = if let Some(pic) = capture(&PIC_QUOTED, chunk) {
            (pic.to_string(), PicType::Url)
        } else if let Some(pic) = capture(&PIC_BARE, chunk) {
            (pic.to_string(), PicType::Import)
        } else {
            (String::new(), PicType::Url)
        };
        Self {
            rank: capture_number(&RANK, chunk),
            name: capture(&NAME, chunk).unwrap_or_default().to_string(),
            hours: capture_number(&HOURS, chunk),
            money: capture_number(&MONEY, chunk),
            profile_pic,
            pic_type,
        }
    }

    fn write_to(&self, out: &mut String) {
        let _ = writeln!(
            out,
            "  {{ rank: {}, name: \"{}\", hours: {}, money: {}, profilePic: {} }},",
            self.rank,
            self.name,
            self.hours,
            self.money,
            self.pic_literal()
        );
    }

    fn order(a: &Self, b: &Self) -> Ordering {
        b.hours.cmp(&a.hours)
    }

    fn reposition(records: &mut [Self]) {
        for (rank, record) in (1u32..).zip(records.iter_mut()) {
            record.rank = rank;
        }
    }

    fn label(&self) -> String {
        format!("{} - {}", self.rank, self.name)
    }
}
