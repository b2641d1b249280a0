//! Clipboard access through the OSC 52 terminal escape.
//!
//! The terminal emulator owns the system clipboard, so this works over SSH
//! as long as the terminal honors OSC 52.

use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ora2pg_core::MigrationError;

/// Escape sequence asking the terminal to put `text` on the clipboard.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

pub fn copy_to_clipboard(text: &str) -> Result<(), MigrationError> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(osc52_sequence(text).as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| MigrationError::Clipboard(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_wraps_base64_payload() {
        assert_eq!(osc52_sequence("SELECT 1;"), "\x1b]52;c;U0VMRUNUIDE7\x07");
    }

    #[test]
    fn test_multiline_payload_has_no_raw_newlines() {
        let sequence = osc52_sequence("CREATE TABLE t (\n  id INTEGER\n);");
        assert!(!sequence.contains('\n'));
    }
}
