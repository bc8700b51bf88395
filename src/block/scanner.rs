use super::BlockError;

/// Raw pieces of a data file split around its array block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedBlock {
    /// Lines before the marker line, verbatim.
    pub prologue: Vec<String>,
    /// The marker line up to and including its opening `[`.
    pub open_line: String,
    /// One `{ ... }` chunk per record, braces included.
    pub chunks: Vec<String>,
    /// Lines after the line holding the closing `]`.
    pub epilogue: Vec<String>,
}

/// Returns true if `line` declares `marker` (optionally exported).
pub fn is_marker_line(line: &str, marker: &str) -> bool {
    let trimmed = line.trim_start();
    let trimmed = trimmed
        .strip_prefix("export ")
        .map_or(trimmed, str::trim_start);
    trimmed.starts_with(marker)
}

/// Split `text` into prologue, record chunks and epilogue.
///
/// Record chunks are found by brace counting: everything between a `{` at
/// depth 0 and its matching `}` is one chunk. The block ends at the first
/// `]` seen outside any record. Scanning of the marker line starts after
/// its `=`, so a type annotation like `Foo[]` does not close the block.
///
/// Braces and brackets inside quoted string values are ignored.
///
/// # Errors
///
/// Returns [`BlockError`] when the marker is missing, a `}` appears outside
/// a record, or the input ends before the block is closed.
pub fn scan(text: &str, marker: &'static str) -> Result<ScannedBlock, BlockError> {
    let mut lines = text.lines().enumerate();
    let mut prologue = Vec::new();

    let (open_idx, marker_line) = loop {
        let Some((idx, line)) = lines.next() else {
            return Err(BlockError::MissingMarker { marker });
        };
        if is_marker_line(line, marker) {
            break (idx, line);
        }
        prologue.push(line.to_string());
    };

    let scan_from = marker_line.find('=').map_or(0, |eq| eq + 1);
    let (open_line, first_rest) = match marker_line[scan_from..].find('[') {
        Some(rel) => {
            let bracket = scan_from + rel;
            (
                marker_line[..=bracket].to_string(),
                &marker_line[bracket + 1..],
            )
        }
        None => (format!("{} [", marker_line.trim_end()), ""),
    };

    let mut chunks = Vec::new();
    let mut buffer = String::new();
    let mut depth = 0usize;

    let mut current = Some((open_idx, first_rest));
    while let Some((idx, line)) = current {
        // String literals never span lines in these files.
        // Values are written without escapes, so a backslash is literal.
        let mut quote: Option<char> = None;
        for ch in line.chars() {
            if let Some(open) = quote {
                if depth > 0 {
                    buffer.push(ch);
                }
                if ch == open {
                    quote = None;
                }
                continue;
            }
            match ch {
                '"' | '\'' | '`' => {
                    quote = Some(ch);
                    if depth > 0 {
                        buffer.push(ch);
                    }
                }
                '{' => {
                    depth += 1;
                    buffer.push(ch);
                }
                '}' => {
                    if depth == 0 {
                        return Err(BlockError::StrayClosingBrace { line: idx + 1 });
                    }
                    depth -= 1;
                    buffer.push(ch);
                    if depth == 0 {
                        chunks.push(std::mem::take(&mut buffer));
                    }
                }
                ']' if depth == 0 => {
                    let epilogue = lines.by_ref().map(|(_, l)| l.to_string()).collect();
                    return Ok(ScannedBlock {
                        prologue,
                        open_line,
                        chunks,
                        epilogue,
                    });
                }
                _ if depth > 0 => buffer.push(ch),
                _ => {}
            }
        }
        if depth > 0 {
            buffer.push('\n');
        }
        current = lines.next();
    }

    Err(BlockError::Unterminated {
        line: open_idx + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "const leaderboardData";

    #[test]
    fn test_scan_splits_prologue_chunks_and_epilogue() {
        let text = "import a from './a.png';\n\nexport const leaderboardData = [\n  { rank: 1, name: \"A\" },\n  { rank: 2, name: \"B\" },\n];\nexport default leaderboardData;\n";
        let scanned = scan(text, MARKER).unwrap();
        assert_eq!(scanned.prologue, vec!["import a from './a.png';", ""]);
        assert_eq!(scanned.open_line, "export const leaderboardData = [");
        assert_eq!(
            scanned.chunks,
            vec!["{ rank: 1, name: \"A\" }", "{ rank: 2, name: \"B\" }"]
        );
        assert_eq!(scanned.epilogue, vec!["export default leaderboardData;"]);
    }

    #[test]
    fn test_scan_collects_multiline_records() {
        let text = "const slideshowImages: SlideshowImage[] = [\n  {\n    id: 1,\n    url: \"a\"\n  },\n];\n";
        let scanned = scan(text, "const slideshowImages").unwrap();
        assert_eq!(scanned.open_line, "const slideshowImages: SlideshowImage[] = [");
        assert_eq!(scanned.chunks.len(), 1);
        assert!(scanned.chunks[0].starts_with("{\n"));
        assert!(scanned.chunks[0].contains("url: \"a\""));
        assert!(scanned.chunks[0].ends_with('}'));
    }

    #[test]
    fn test_scan_handles_block_on_a_single_line() {
        let text = "export const leaderboardData = [{ rank: 1 }, { rank: 2 }];";
        let scanned = scan(text, MARKER).unwrap();
        assert_eq!(scanned.chunks, vec!["{ rank: 1 }", "{ rank: 2 }"]);
        assert!(scanned.epilogue.is_empty());
    }

    #[test]
    fn test_scan_keeps_nested_braces_inside_one_chunk() {
        let text = "export const leaderboardData = [\n  { name: \"A\", meta: { x: 1 } },\n];\n";
        let scanned = scan(text, MARKER).unwrap();
        assert_eq!(scanned.chunks, vec!["{ name: \"A\", meta: { x: 1 } }"]);
    }

    #[test]
    fn test_scan_empty_block() {
        let scanned = scan("export const leaderboardData = [\n];\n", MARKER).unwrap();
        assert!(scanned.chunks.is_empty());
    }

    #[test]
    fn test_scan_adds_bracket_when_marker_line_has_none() {
        let text = "export const leaderboardData =\n[\n  { rank: 1 },\n];\n";
        let scanned = scan(text, MARKER).unwrap();
        assert_eq!(scanned.open_line, "export const leaderboardData = [");
        assert_eq!(scanned.chunks, vec!["{ rank: 1 }"]);
    }

    #[test]
    fn test_scan_ignores_braces_inside_strings() {
        let text = "export const leaderboardData = [\n  { name: \"Team {A\", hours: 1 },\n  { name: 'close } ]', hours: 2 },\n];\nexport default x;\n";
        let scanned = scan(text, MARKER).unwrap();
        assert_eq!(
            scanned.chunks,
            vec![
                "{ name: \"Team {A\", hours: 1 }",
                "{ name: 'close } ]', hours: 2 }"
            ]
        );
        assert_eq!(scanned.epilogue, vec!["export default x;"]);
    }

    #[test]
    fn test_scan_string_quotes_do_not_nest() {
        let text = "const slideshowImages = [\n  {\n    title: \"it's {here}\",\n    description: 'say \"}\"'\n  },\n];\n";
        let scanned = scan(text, "const slideshowImages").unwrap();
        assert_eq!(scanned.chunks.len(), 1);
        assert!(scanned.chunks[0].contains("it's {here}"));
        assert!(scanned.chunks[0].ends_with("\n  }"));
    }

    #[test]
    fn test_scan_missing_marker_is_an_error() {
        let err = scan("import x from 'y';\n", MARKER).unwrap_err();
        assert_eq!(err, BlockError::MissingMarker { marker: MARKER });
    }

    #[test]
    fn test_scan_unterminated_block_is_an_error() {
        let err = scan("\nexport const leaderboardData = [\n  { rank: 1 },\n", MARKER).unwrap_err();
        assert_eq!(err, BlockError::Unterminated { line: 2 });
    }

    #[test]
    fn test_scan_stray_closing_brace_is_an_error() {
        let text = "export const leaderboardData = [\n  { rank: 1 }},\n];\n";
        let err = scan(text, MARKER).unwrap_err();
        assert_eq!(err, BlockError::StrayClosingBrace { line: 2 });
    }

    #[test]
    fn test_is_marker_line_accepts_export_prefix() {
        assert!(is_marker_line("export const slideshowImages = [", "const slideshowImages"));
        assert!(is_marker_line("  const slideshowImages = [", "const slideshowImages"));
        assert!(!is_marker_line("// const slideshowImages", "const slideshowImages"));
    }
}
