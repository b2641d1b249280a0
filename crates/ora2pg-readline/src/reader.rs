//! Line input on a dedicated thread.
//!
//! rustyline blocks, so the editor lives on its own OS thread. The main loop
//! sends the next prompt when it is ready for input and receives the line
//! back as an [`InputEvent`].

use std::sync::mpsc as std_mpsc;
use std::thread;

use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tokio::sync::mpsc;

use crate::helper::CliHelper;

#[derive(Debug)]
pub enum InputEvent {
    Line(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D
    Eof,
    Failed(String),
}

/// Starts the reader thread. It exits when the prompt sender is dropped.
pub fn spawn(helper: CliHelper) -> (mpsc::UnboundedReceiver<InputEvent>, std_mpsc::Sender<String>) {
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (prompt_tx, prompt_rx) = std_mpsc::channel::<String>();

    thread::spawn(move || {
        let mut editor: Editor<CliHelper, DefaultHistory> = match Editor::new() {
            Ok(editor) => editor,
            Err(err) => {
                let _ = input_tx.send(InputEvent::Failed(err.to_string()));
                return;
            }
        };
        editor.set_helper(Some(helper));

        while let Ok(prompt) = prompt_rx.recv() {
            let event = match editor.readline(&prompt) {
                Ok(line) => {
                    // Pasted source lines stay out of the history
                    if line.trim_start().starts_with('/') {
                        let _ = editor.add_history_entry(line.as_str());
                    }
                    InputEvent::Line(line)
                }
                Err(ReadlineError::Interrupted) => InputEvent::Interrupted,
                Err(ReadlineError::Eof) => InputEvent::Eof,
                Err(err) => InputEvent::Failed(err.to_string()),
            };
            if input_tx.send(event).is_err() {
                break;
            }
        }
    });

    (input_rx, prompt_tx)
}
