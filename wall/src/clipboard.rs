use std::io::{self, Write};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use crossterm::{execute, style::Print};

use crate::state_store::CopyRequest;

/// Asks the terminal to put the text on the system clipboard (OSC 52).
///
/// Terminals without OSC 52 support silently ignore the sequence.
pub fn copy<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    execute!(out, Print(osc52_sequence(text)))
}

fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Writes the copy requests of the published states, each one once.
///
/// Lives with the terminal so the sequence never lands in the middle of a frame.
#[derive(Debug, Default)]
pub struct Clipboard {
    last_written: Option<u64>,
}

impl Clipboard {
    /// Returns the id of the request written, if there was a new one
    pub fn write_pending<W: Write>(
        &mut self,
        out: &mut W,
        request: Option<&CopyRequest>,
    ) -> io::Result<Option<u64>> {
        let Some(request) = request.filter(|request| self.last_written != Some(request.id)) else {
            return Ok(None);
        };

        // a failed write is not retried, the user can copy again
        self.last_written = Some(request.id);
        copy(out, &request.text)?;

        Ok(Some(request.id))
    }
}
