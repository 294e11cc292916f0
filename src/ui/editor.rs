// Editing long values in the user's external editor.

use crate::error::{HelperError, Result};
use std::fs;
use std::io::Write;
use std::process::Command;

/// Open `old_value` in `editor` (program followed by its arguments) and
/// return the trimmed text saved by the user.
pub fn edit(editor: &[String], old_value: &str) -> Result<String> {
    let (program, args) = editor.split_first().ok_or(HelperError::EmptyCommand { what: "editor" })?;

    // removed when dropped, whatever happens to the editor
    let mut file = tempfile::Builder::new().prefix("edit").tempfile()?;
    file.write_all(old_value.as_bytes())?;
    file.flush()?;

    tracing::debug!("Editing {} with {}", file.path().display(), program);
    let status = Command::new(program).args(args).arg(file.path()).status()?;
    if !status.success() {
        return Err(HelperError::CommandFailed { program: program.clone(), status });
    }

    let edited = fs::read_to_string(file.path())?;
    Ok(edited.trim().to_string())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // run through `sh` rather than exec'd, so the script is never busy
    fn script(dir: &TempDir, body: &str) -> Vec<String> {
        let path = dir.path().join("fake-editor.sh");
        fs::write(&path, format!("{body}\n")).unwrap();
        vec!["sh".to_string(), path.to_string_lossy().into_owned()]
    }

    #[test]
    fn untouched_file_returns_trimmed_value() {
        let value = edit(&["true".to_string()], "  Dune\n\n").unwrap();
        assert_eq!(value, "Dune");
    }

    #[test]
    fn returns_what_the_editor_saved() {
        let dir = TempDir::new().unwrap();
        let editor = script(&dir, r#"printf 'Children of Dune\n' > "$1""#);
        assert_eq!(edit(&editor, "Dune").unwrap(), "Children of Dune");
    }

    #[test]
    fn passes_extra_arguments_before_the_file() {
        let dir = TempDir::new().unwrap();
        let mut editor = script(&dir, r#"[ "$1" = "--wait" ] && printf 'ok' > "$2""#);
        editor.push("--wait".to_string());
        assert_eq!(edit(&editor, "").unwrap(), "ok");
    }

    #[test]
    fn failing_editor_is_an_error() {
        let result = edit(&["false".to_string()], "Dune");
        assert!(matches!(result, Err(HelperError::CommandFailed { .. })));
    }

    #[test]
    fn empty_editor_command_is_an_error() {
        assert!(matches!(edit(&[], "Dune"), Err(HelperError::EmptyCommand { what: "editor" })));
    }
}
