// Library root
// -----------
// Small command-line helpers shared by the e-book library tools. The
// binary (`main.rs`) only wires them into an interactive menu.
//
// Module responsibilities:
// - `ui`: user interaction (prompts, option selection, `$EDITOR` editing,
//   paging) behind the `UserInterface` trait.
// - `progress`: spinner around a worker thread, scope timing.
// - `fs`: recursive copy, empty folder cleanup, hashing, unique names.
// - `slices`: lookups and dedup on string lists.
// - `config` / `logger`: environment configuration and tracing setup.
// - `menu`: the interactive menu used by the binary.
pub mod config;
pub mod error;
pub mod fs;
pub mod logger;
pub mod menu;
pub mod progress;
pub mod slices;
pub mod ui;

pub use error::{check_errors, HelperError, Result};
pub use ui::{TerminalUi, UserInterface};
