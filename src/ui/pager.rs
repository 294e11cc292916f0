// Showing long text through an external pager.

use crate::error::{HelperError, Result};
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

/// Pipe `text` into `pager` (program followed by its arguments) and wait for
/// the user to quit it.
pub fn page(pager: &[String], text: &str) -> Result<()> {
    let (program, args) = pager.split_first().ok_or(HelperError::EmptyCommand { what: "pager" })?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()?;
    let mut stdin = child.stdin.take().ok_or_else(|| io::Error::other("pager stdin not captured"))?;

    thread::scope(|scope| -> Result<()> {
        // the pager only reads what fits on screen, so large texts block
        // until the user scrolls or quits
        let writer = scope.spawn(move || -> io::Result<()> {
            match stdin.write_all(text.as_bytes()) {
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }
            // stdin is dropped here, closing the pipe
        });

        let status = child.wait()?;
        match writer.join() {
            Ok(written) => written?,
            Err(payload) => std::panic::resume_unwind(payload),
        }
        if !status.success() {
            return Err(HelperError::CommandFailed { program: program.clone(), status });
        }
        Ok(())
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn command(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pages_through_reading_command() {
        assert!(page(&command(&["sh", "-c", "cat > /dev/null"]), "Dune\nHyperion\n").is_ok());
    }

    #[test]
    fn pager_quitting_early_is_not_an_error() {
        let huge = "a line of text\n".repeat(200_000);
        assert!(page(&command(&["true"]), &huge).is_ok());
    }

    #[test]
    fn failing_pager_is_reported() {
        let result = page(&command(&["sh", "-c", "cat > /dev/null; exit 3"]), "Dune");
        assert!(matches!(result, Err(HelperError::CommandFailed { .. })));
    }

    #[test]
    fn missing_pager_is_an_io_error() {
        let result = page(&command(&["definitely-not-a-pager-binary"]), "Dune");
        assert!(matches!(result, Err(HelperError::Io(_))));
    }
}
