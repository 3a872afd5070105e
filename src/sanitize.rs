//! Plain-text cleanup for legacy hymn content. Imported hymnals carry
//! HTML-ish markup (`<br>`, paragraph tags, entities) from their web origins;
//! the database stores only clean text, so everything funnels through
//! [`html_to_text`] before insertion.

use once_cell::sync::Lazy;
use regex::Regex;

/// Tags that imply a line break. Replaced before generic tag stripping so the
/// break survives.
static LINE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>|</p>|</div>").expect("hard-coded regex"));

/// Any remaining markup tag.
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("hard-coded regex"));

/// Decimal character references like `&#233;`.
static NUMERIC_ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(\d+);").expect("hard-coded regex"));

/// Strip markup from legacy content: break tags become newlines, remaining
/// tags are dropped, entities are decoded, and each line is trimmed with
/// empty lines removed (the same line cleanup the importer has always done).
pub fn html_to_text(input: &str) -> String {
    let with_breaks = LINE_BREAK_RE.replace_all(input, "\n");
    let stripped = TAG_RE.replace_all(&with_breaks, "");
    let decoded = decode_entities(&stripped);
    tidy_lines(&decoded)
}

fn decode_entities(text: &str) -> String {
    let text = NUMERIC_ENTITY_RE.replace_all(text, |caps: &regex::Captures<'_>| {
        caps[1]
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });

    // &amp; goes last so it cannot re-introduce half-decoded entities.
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn tidy_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::html_to_text;

    #[test]
    fn break_tags_become_newlines() {
        assert_eq!(
            html_to_text("Amazing grace!<br>How sweet the sound<BR/>That saved"),
            "Amazing grace!\nHow sweet the sound\nThat saved"
        );
    }

    #[test]
    fn tags_are_stripped() {
        assert_eq!(
            html_to_text("<p>Holy, <b>holy</b>, holy!</p><p>Lord God Almighty!</p>"),
            "Holy, holy, holy!\nLord God Almighty!"
        );
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(html_to_text("grace &amp; mercy"), "grace & mercy");
        assert_eq!(html_to_text("bless&#232;d Trinity"), "blessèd Trinity");
        assert_eq!(html_to_text("&quot;Tis so sweet&quot;"), "\"Tis so sweet\"");
    }

    #[test]
    fn blank_lines_and_padding_are_removed() {
        assert_eq!(
            html_to_text("  first line  \n\n\n   second line\n"),
            "first line\nsecond line"
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(html_to_text("1. Amazing grace!"), "1. Amazing grace!");
    }
}
