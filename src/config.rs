// Runtime configuration for the terminal UI, read from the environment.

use std::path::PathBuf;

const DEFAULT_EDITOR: &str = "nano";
const DEFAULT_PAGER: &[&str] = &["less", "-e", "-F", "-Q", "-X", "--buffers=-1"];
const LOG_DIR_VAR: &str = "SHELF_HELPERS_LOG_DIR";
const APP_DIR: &str = "shelf-helpers";

/// External commands and paths used by [`crate::ui::TerminalUi`].
/// Commands are stored as program followed by its arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiConfig {
    pub editor: Vec<String>,
    pub pager: Vec<String>,
    pub log_dir: PathBuf,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            editor: vec![DEFAULT_EDITOR.to_string()],
            pager: DEFAULT_PAGER.iter().map(|s| s.to_string()).collect(),
            log_dir: default_log_dir(),
        }
    }
}

impl UiConfig {
    /// Build the configuration from `EDITOR`, `PAGER` and
    /// `SHELF_HELPERS_LOG_DIR`, falling back to `nano`, `less` and the user
    /// cache directory.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        match lookup("EDITOR").map(|e| split_command(&e)).filter(|c| !c.is_empty()) {
            Some(editor) => config.editor = editor,
            None => tracing::warn!("$EDITOR not set, falling back to {}", DEFAULT_EDITOR),
        }
        if let Some(pager) = lookup("PAGER").map(|p| split_command(&p)).filter(|c| !c.is_empty()) {
            config.pager = pager;
        }
        config.log_dir = log_dir_from(&lookup);
        config
    }
}

/// `SHELF_HELPERS_LOG_DIR`, or `shelf-helpers` in the user cache directory.
/// Read on its own so logging can start before the rest of the config.
pub fn log_dir_from_env() -> PathBuf {
    log_dir_from(&|key: &str| std::env::var(key).ok())
}

fn log_dir_from(lookup: &dyn Fn(&str) -> Option<String>) -> PathBuf {
    lookup(LOG_DIR_VAR).filter(|d| !d.trim().is_empty()).map(PathBuf::from).unwrap_or_else(default_log_dir)
}

/// Split a command line such as `code --wait` into program and arguments.
pub fn split_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_string).collect()
}

fn default_log_dir() -> PathBuf {
    dirs::cache_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_nano_and_less() {
        let config = UiConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.editor, vec!["nano"]);
        assert_eq!(config.pager, vec!["less", "-e", "-F", "-Q", "-X", "--buffers=-1"]);
        assert!(config.log_dir.ends_with(APP_DIR));
    }

    #[test]
    fn reads_commands_with_arguments() {
        let config = UiConfig::from_lookup(lookup_from(&[
            ("EDITOR", "code --wait"),
            ("PAGER", "most"),
            (LOG_DIR_VAR, "/var/log/shelf"),
        ]));
        assert_eq!(config.editor, vec!["code", "--wait"]);
        assert_eq!(config.pager, vec!["most"]);
        assert_eq!(config.log_dir, PathBuf::from("/var/log/shelf"));
    }

    #[test]
    fn blank_editor_falls_back() {
        let config = UiConfig::from_lookup(lookup_from(&[("EDITOR", "   ")]));
        assert_eq!(config.editor, vec!["nano"]);
    }
}
