//! Prompt templates for the two model calls.
//!
//! Requests are typed structs rendered through minijinja, so the template and
//! the data it needs stay next to each other.

use minijinja::Environment;
use ora2pg_core::error::{MigrationError, Result};
use ora2pg_core::migration_kind::MigrationKind;
use serde::Serialize;

/// Snippets embedded in the comparison prompt are cut to this many chars.
pub const EXPLANATION_SNIPPET_CHARS: usize = 1000;

/// Fixed system instruction sent with every translation request.
pub const SYSTEM_INSTRUCTION: &str = r#"You are an expert Senior Database Reliability Engineer and Migration Architect specializing in Oracle to PostgreSQL migrations (similar to the ora2pg tool).

Your goal is to strictly translate Oracle SQL, PL/SQL, DDL, and DML into valid, optimized PostgreSQL code.

Follow these rules:
1. DATA TYPES: Map Oracle types to Postgres types (e.g., VARCHAR2 -> VARCHAR, NUMBER -> NUMERIC/INTEGER, DATE -> TIMESTAMP, BLOB -> BYTEA).
2. FUNCTIONS: Convert NVL -> COALESCE, SYSDATE -> CURRENT_TIMESTAMP, DECODE -> CASE WHEN.
3. PL/SQL: Convert PL/SQL blocks to PL/pgSQL. Handle variable declarations, cursors, and loops appropriately.
4. SEQUENCES: Convert Oracle sequence syntax (NEXTVAL) to Postgres syntax (nextval()).
5. TRIGGERS: Adjust trigger syntax. Note that Postgres triggers execute a function.
6. IDENTIFIERS: Keep identifiers case-insensitive (lowercase) unless quoted.
7. COMPATIBILITY: If a direct equivalent doesn't exist, provide a workaround or a comment explaining the limitation.
8. OUTPUT: Return ONLY the SQL code. Do not include markdown backticks like ```sql.
"#;

const TRANSLATION_TEMPLATE: &str = r#"MIGRATION TYPE: {{ migration_type }}

SOURCE ORACLE CODE:
{{ source }}

-- END SOURCE CODE --

Please convert the above code to PostgreSQL.
Ensure high fidelity and best practices for Postgres 15+.
Return only the raw code without markdown formatting."#;

const EXPLANATION_TEMPLATE: &str = r#"Compare the following Oracle code and the converted PostgreSQL code.
Explain the key changes made, specifically highlighting data type changes, function mappings, and any potential performance implications.
Keep it concise (bullet points).

ORACLE:
{{ oracle }}...

POSTGRES:
{{ postgres }}..."#;

/// Typed request for the translation prompt.
#[derive(Debug, Serialize)]
struct TranslationPrompt<'a> {
    /// Wire identifier such as `FULL_PACKAGE`
    migration_type: &'a str,
    /// Verbatim source text
    source: &'a str,
}

/// Typed request for the comparison prompt.
#[derive(Debug, Serialize)]
struct ExplanationPrompt<'a> {
    oracle: &'a str,
    postgres: &'a str,
}

/// Renders the translation prompt for `source` under `kind`.
pub fn render_translation_prompt(kind: MigrationKind, source: &str) -> Result<String> {
    let request = TranslationPrompt {
        migration_type: kind.identifier(),
        source,
    };
    render(TRANSLATION_TEMPLATE, &request)
}

/// Renders the comparison prompt, truncating both snippets.
pub fn render_explanation_prompt(oracle: &str, postgres: &str) -> Result<String> {
    let request = ExplanationPrompt {
        oracle: truncate_chars(oracle, EXPLANATION_SNIPPET_CHARS),
        postgres: truncate_chars(postgres, EXPLANATION_SNIPPET_CHARS),
    };
    render(EXPLANATION_TEMPLATE, &request)
}

/// Returns the first `max_chars` chars of `text`, never splitting a char.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

fn render<S: Serialize>(template: &str, request: &S) -> Result<String> {
    let env = Environment::new();
    env.render_str(template, request)
        .map_err(|e| MigrationError::prompt(format!("Failed to render prompt: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_prompt_embeds_kind_and_source() {
        let source = "SELECT NVL(a, 0) FROM dual;\n  -- keep {{ braces }}";
        let prompt = render_translation_prompt(MigrationKind::FullPackage, source).unwrap();

        assert!(prompt.starts_with("MIGRATION TYPE: FULL_PACKAGE\n"));
        assert!(prompt.contains(&format!("SOURCE ORACLE CODE:\n{source}\n\n-- END SOURCE CODE --")));
        assert!(prompt.contains("Postgres 15+"));
    }

    #[test]
    fn test_explanation_prompt_truncates_each_side() {
        let oracle = "o".repeat(1500);
        let postgres = "p".repeat(20);
        let prompt = render_explanation_prompt(&oracle, &postgres).unwrap();

        assert!(prompt.contains(&format!("ORACLE:\n{}...\n", "o".repeat(1000))));
        assert!(!prompt.contains(&"o".repeat(1001)));
        assert!(prompt.ends_with(&format!("POSTGRES:\n{}...", postgres)));
    }

    #[test]
    fn test_truncate_chars_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_system_instruction_carries_output_directive() {
        assert!(SYSTEM_INSTRUCTION.contains("8. OUTPUT: Return ONLY the SQL code."));
        assert!(SYSTEM_INSTRUCTION.contains("NVL -> COALESCE"));
    }
}
