//! Markdown code fence handling for model replies.
//!
//! Models wrap JSON in ```` ```json ```` fences inconsistently, so replies are
//! unwrapped before parsing.

const FENCE: &str = "```";

/// Strip a leading fence (with optional language tag) and a trailing fence,
/// plus surrounding whitespace. Text without fences is returned trimmed.
pub fn strip_code_fences(raw: &str) -> &str {
    let text = raw.trim();
    let body = match text.strip_prefix(FENCE) {
        Some(rest) => skip_language_tag(rest),
        None => text,
    };
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

/// Content of the first complete fenced block anywhere in `raw`.
pub fn extract_fenced_block(raw: &str) -> Option<&str> {
    let start = raw.find(FENCE)?;
    let after_open = skip_language_tag(&raw[start + FENCE.len()..]);
    let end = after_open.find(FENCE)?;
    Some(after_open[..end].trim())
}

fn skip_language_tag(s: &str) -> &str {
    s.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_tagged_fence() {
        let raw = "```json\n{\"topic\":\"X\"}\n```";
        assert_eq!(strip_code_fences(raw), "{\"topic\":\"X\"}");
    }

    #[test]
    fn strips_untagged_fence_with_padding() {
        let raw = "  \n```\n{\"a\": 1}\n```\n\n";
        assert_eq!(strip_code_fences(raw), "{\"a\": 1}");
    }

    #[test]
    fn strips_single_line_fence() {
        assert_eq!(strip_code_fences("```json{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn leaves_unfenced_text() {
        assert_eq!(strip_code_fences(" {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn keeps_inner_backticks() {
        let raw = "```json\n{\"code\":\"use `x`\"}\n```";
        assert_eq!(strip_code_fences(raw), "{\"code\":\"use `x`\"}");
    }

    #[test]
    fn extracts_block_after_prose() {
        let raw = "Here are the notes:\n```json\n{\"a\":1}\n```\nHope this helps.";
        assert_eq!(extract_fenced_block(raw), Some("{\"a\":1}"));
        assert_eq!(extract_fenced_block("no fences here"), None);
        assert_eq!(extract_fenced_block("```json\n{\"open\":true}"), None);
    }
}
