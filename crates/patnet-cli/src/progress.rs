//! Console display of harvest progress

use crate::output::Formatter;
use patnet_domain::{ProgressEvent, ProgressObserver};
use std::io::Write;

/// Prints one line per progress event
///
/// On a terminal the per-publication counter is redrawn in place; elsewhere
/// only the final count of each window is printed. Write failures are
/// ignored.
pub struct ConsoleProgress<W> {
    formatter: Formatter,
    writer: W,
    interactive: bool,
}

impl<W: Write> ConsoleProgress<W> {
    /// Create a display writing to `writer`
    pub fn new(formatter: Formatter, writer: W, interactive: bool) -> Self {
        Self {
            formatter,
            writer,
            interactive,
        }
    }

    /// Give back the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ProgressObserver for ConsoleProgress<W> {
    fn on_event(&mut self, event: &ProgressEvent) {
        let Some(line) = self.formatter.progress_line(event) else {
            return;
        };

        let _ = match event {
            ProgressEvent::PublicationParsed { parsed, total } => {
                let last = parsed == total;
                if self.interactive {
                    write!(self.writer, "\r{}", line)
                        .and_then(|_| if last { writeln!(self.writer) } else { Ok(()) })
                        .and_then(|_| self.writer.flush())
                } else if last {
                    writeln!(self.writer, "{}", line)
                } else {
                    Ok(())
                }
            }
            _ => writeln!(self.writer, "{}", line),
        };
    }
}
