//! Markdown code-fence cleanup for model replies.

/// Opening fences tried in order; the first match wins.
const OPENING_FENCES: [&str; 3] = ["```postgresql", "```sql", "```"];
const CLOSING_FENCE: &str = "```";

/// Removes one leading opening fence and one trailing closing fence, then
/// trims surrounding whitespace.
///
/// An opening fence only counts when followed by a line break, and its
/// language tag is matched case-insensitively. Everything between the fences
/// is returned untouched.
pub fn strip_code_fences(text: &str) -> String {
    let body = strip_opening_fence(text);
    let body = body.trim_end();
    let body = body.strip_suffix(CLOSING_FENCE).unwrap_or(body);
    body.trim().to_string()
}

fn strip_opening_fence(text: &str) -> &str {
    for fence in OPENING_FENCES {
        let Some(head) = text.get(..fence.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(fence) {
            continue;
        }
        let rest = &text[fence.len()..];
        if let Some(body) = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) {
            return body;
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_fence_is_removed() {
        let reply = "```sql\nCREATE TABLE t (id INTEGER);\n```";
        assert_eq!(strip_code_fences(reply), "CREATE TABLE t (id INTEGER);");
    }

    #[test]
    fn test_postgresql_fence_is_case_insensitive() {
        let reply = "```PostgreSQL\r\nSELECT 1;\r\n```\n";
        assert_eq!(strip_code_fences(reply), "SELECT 1;");
    }

    #[test]
    fn test_bare_fence_is_removed() {
        assert_eq!(strip_code_fences("```\nSELECT now();\n```"), "SELECT now();");
    }

    #[test]
    fn test_unfenced_text_is_only_trimmed() {
        assert_eq!(strip_code_fences("\n  SELECT 1;  \n"), "SELECT 1;");
    }

    #[test]
    fn test_fence_without_line_break_is_kept() {
        assert_eq!(strip_code_fences("```sql SELECT 1;"), "```sql SELECT 1;");
    }

    #[test]
    fn test_unknown_tag_is_not_stripped() {
        // "```" matches but is followed by "plsql", not a line break
        assert_eq!(strip_code_fences("```plsql\nBEGIN NULL; END;"), "```plsql\nBEGIN NULL; END;");
    }

    #[test]
    fn test_inner_content_is_untouched() {
        let inner = "CREATE FUNCTION f() RETURNS void AS $$\nBEGIN\n  -- ```nested```\nEND;\n$$ LANGUAGE plpgsql;";
        let reply = format!("```sql\n{inner}\n```");
        assert_eq!(strip_code_fences(&reply), inner);
    }

    #[test]
    fn test_only_one_fence_pair_is_removed() {
        assert_eq!(strip_code_fences("```sql\n```sql\nSELECT 1;\n```\n```"), "```sql\nSELECT 1;\n```");
    }

    #[test]
    fn test_non_ascii_prefix_does_not_panic() {
        assert_eq!(strip_code_fences("é```"), "é");
    }
}
