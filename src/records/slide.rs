use std::cmp::Ordering;
use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

use super::{capture, capture_number, field_regex};
use crate::block::BlockRecord;

static ID: LazyLock<Regex> = LazyLock::new(|| field_regex(r"\bid\s*:\s*(\d+)"));
static URL: LazyLock<Regex> = LazyLock::new(|| field_regex(r#"\burl\s*:\s*"([^"]*)""#));
static TITLE: LazyLock<Regex> = LazyLock::new(|| field_regex(r#"\btitle\s*:\s*"([^"]*)""#));
static DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| field_regex(r#"\bdescription\s*:\s*"([^"]*)""#));

/// One slideshow entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slide {
    /// 0-based position; the operator edits this to choose where a slide goes.
    pub index: usize,
    /// Always `index + 1` once normalized.
    pub id: usize,
    pub url: String,
    pub title: String,
    pub description: String,
}

impl Slide {
    pub fn new(
        index: usize,
        url: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            index,
            id: index.saturating_add(1),
            url: url.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

fn capture_text(re: &Regex, chunk: &str) -> String {
    capture(re, chunk).unwrap_or_default().to_string()
}

impl BlockRecord for Slide {
    const MARKER: &'static str = "const slideshowImages";

    fn from_chunk(chunk: &str) -> Self {
        Self {
            index: 0,
            id: capture_number(&ID, chunk),
            url: capture_text(&URL, chunk),
            title: capture_text(&TITLE, chunk),
            description: capture_text(&DESCRIPTION, chunk),
        }
    }

    fn write_to(&self, out: &mut String) {
        let _ = write!(
            out,
            "  {{\n    id: {},\n    url: \"{}\",\n    title: \"{}\",\n    description: \"{}\"\n  }},\n",
            self.id, self.url, self.title, self.description
        );
    }

    fn order(a: &Self, b: &Self) -> Ordering {
        a.index.cmp(&b.index)
    }

    fn reposition(records: &mut [Self]) {
        for (index, slide) in records.iter_mut().enumerate() {
            slide.index = index;
            slide.id = index + 1;
        }
    }

    fn label(&self) -> String {
        format!("{}: {}", self.index, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, RecordStore};

    #[test]
    fn test_from_chunk_reads_fields() {
        let slide = Slide::from_chunk(
            "{\n    id: 4,\n    url: \"/img/a.jpg\",\n    title: \"Finals\",\n    description: \"Round two\"\n  }",
        );
        assert_eq!(slide.id, 4);
        assert_eq!(slide.url, "/img/a.jpg");
        assert_eq!(slide.title, "Finals");
        assert_eq!(slide.description, "Round two");
    }

    #[test]
    fn test_from_chunk_fields_are_independent() {
        let slide = Slide::from_chunk("{ title: \"Only title\" }");
        assert_eq!(slide.title, "Only title");
        assert_eq!(slide.url, "");
        assert_eq!(slide.id, 0);
    }

    #[test]
    fn test_parse_assigns_index_from_file_order() {
        let text = "const slideshowImages: SlideshowImage[] = [\n  { id: 9, url: \"a\", title: \"A\", description: \"\" },\n  { id: 3, url: \"b\", title: \"B\", description: \"\" },\n];\n";
        let block = Block::<Slide>::parse(text).unwrap();
        let slides = block.records().as_slice();
        assert_eq!((slides[0].index, slides[0].id, slides[0].title.as_str()), (0, 1, "A"));
        assert_eq!((slides[1].index, slides[1].id, slides[1].title.as_str()), (1, 2, "B"));
    }

    #[test]
    fn test_indexing_stays_dense_after_changes() {
        let mut store = RecordStore::from_parsed(vec![
            Slide::new(0, "a", "A", ""),
            Slide::new(1, "b", "B", ""),
            Slide::new(2, "c", "C", ""),
        ]);
        store.remove(1).unwrap();
        store.append(Slide::new(10, "d", "D", ""));
        for (i, slide) in store.iter().enumerate() {
            assert_eq!(slide.index, i);
            assert_eq!(slide.id, i + 1);
        }
        let titles: Vec<_> = store.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["A", "C", "D"]);
    }

    #[test]
    fn test_editing_index_moves_slide() {
        let mut store = RecordStore::from_parsed(vec![
            Slide::new(0, "a", "A", ""),
            Slide::new(1, "b", "B", ""),
            Slide::new(2, "c", "C", ""),
        ]);
        store.replace(2, Slide::new(0, "c", "C", "")).unwrap();
        let titles: Vec<_> = store.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["A", "C", "B"], "ties keep list order");
    }

    #[test]
    fn test_move_up_and_down() {
        let mut store = RecordStore::from_parsed(vec![
            Slide::new(0, "a", "A", ""),
            Slide::new(1, "b", "B", ""),
        ]);
        assert_eq!(store.move_up(1).unwrap(), 0);
        let titles: Vec<_> = store.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["B", "A"]);
        assert_eq!(store.get(0).unwrap().id, 1);

        assert_eq!(store.move_down(0).unwrap(), 1);
        assert_eq!(store.get(1).unwrap().title, "B");
        assert_eq!(store.move_down(1).unwrap(), 1, "last slide stays put");
        assert!(store.move_up(7).is_err());
    }

    #[test]
    fn test_new_with_largest_index_does_not_overflow() {
        let slide = Slide::new(usize::MAX, "/a.jpg", "T", "D");
        assert_eq!(slide.id, usize::MAX);
    }

    #[test]
    fn test_braces_in_text_survive_reparse() {
        let block = Block::from_records(
            "const slideshowImages: SlideshowImage[] = [",
            vec![
                Slide::new(0, "/a.jpg", "Team {A}", "see you soon :}"),
                Slide::new(1, "/b.jpg", "[draft]", "{ not an object"),
            ],
        );
        let reparsed = Block::<Slide>::parse(&block.render()).unwrap();
        assert_eq!(reparsed.records(), block.records());
    }

    #[test]
    fn test_embedded_quote_in_url_truncates_on_reparse() {
        let block = Block::from_records(
            "const slideshowImages: SlideshowImage[] = [",
            vec![Slide::new(0, "https://x/a\"b.png", "T", "D")],
        );
        let reparsed = Block::<Slide>::parse(&block.render()).unwrap();
        let url = &reparsed.records().get(0).unwrap().url;
        assert_eq!(url, "https://x/a");
        assert_ne!(url, "https://x/a\"b.png");
    }
}
