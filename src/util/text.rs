//! Plain-text helpers for reusing rich-text fields in metadata.

const ELLIPSIS: &str = "...";

/// Remove every `<...>` construct from `html`.
///
/// Entities are left untouched. A `<` with no closing `>` after it is kept
/// as literal text, which makes the operation idempotent.
pub fn strip_html(html: &str) -> String {
    let mut output = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        output.push_str(&rest[..open]);
        rest = &rest[open + close + 1..];
    }

    output.push_str(rest);
    output
}

/// Bound `text` to `max_len` characters, ending in `...` when shortened.
///
/// Lengths count Unicode scalar values, so the cut never lands inside a
/// multi-byte sequence.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    if max_len <= ELLIPSIS.len() {
        return ELLIPSIS[..max_len].to_string();
    }

    let keep = max_len - ELLIPSIS.len();
    let cut = text
        .char_indices()
        .nth(keep)
        .map(|(index, _)| index)
        .unwrap_or(text.len());

    let mut output = String::with_capacity(cut + ELLIPSIS.len());
    output.push_str(&text[..cut]);
    output.push_str(ELLIPSIS);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_html_removes_tags_but_not_entities() {
        let html = "<p>Peel &amp; <strong>glow</strong></p>";
        assert_eq!(strip_html(html), "Peel &amp; glow");
    }

    #[test]
    fn strip_html_keeps_unterminated_angle_bracket() {
        assert_eq!(strip_html("3 < 5 and <b>bold"), "3 < 5 and bold");
        assert_eq!(strip_html("a < b"), "a < b");
        assert_eq!(strip_html(""), "");
    }

    #[test]
    fn strip_html_is_idempotent() {
        let samples = [
            "<<a>b>",
            "<p>one</p><p>two",
            "x <y <z> w",
            "no tags at all",
            "<img src=\"a.jpg\" alt=\"<b>\">",
            "trailing <",
        ];
        for sample in samples {
            let once = strip_html(sample);
            assert_eq!(strip_html(&once), once, "sample: {sample}");
        }
    }

    #[test]
    fn truncate_text_returns_short_input_unchanged() {
        assert_eq!(truncate_text("Facial", 160), "Facial");
        assert_eq!(truncate_text("exactly", 7), "exactly");
    }

    #[test]
    fn truncate_text_appends_ellipsis_at_exact_length() {
        let text = "Relaxing hot stone massage for the whole body";
        let truncated = truncate_text(text, 20);
        assert_eq!(truncated, "Relaxing hot ston...");
        assert_eq!(truncated.chars().count(), 20);
    }

    #[test]
    fn truncate_text_respects_multibyte_boundaries() {
        let text = "Soin éclat visage à l'acide hyaluronique";
        let truncated = truncate_text(text, 10);
        assert_eq!(truncated, "Soin éc...");
        assert_eq!(truncated.chars().count(), 10);

        let emoji = "💆💆💆💆💆💆";
        assert_eq!(truncate_text(emoji, 5), "💆💆...");
    }

    #[test]
    fn truncate_text_handles_tiny_limits() {
        assert_eq!(truncate_text("abcdef", 2), "..");
        assert_eq!(truncate_text("abcdef", 3), "...");
        assert_eq!(truncate_text("abcdef", 0), "");
    }
}
