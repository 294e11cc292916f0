// UI layer: asks the user for input and presents data on the terminal.
// Long values are edited in `$EDITOR` (falling back to `nano`) and long
// output is shown through a pager (`less` unless `$PAGER` says otherwise).
//
// `UserInterface` only asks implementors for the primitives (read a line,
// confirm, edit, print); the selection and update flows are provided on top
// of them so every implementation shares the same retry rules.

pub mod editor;
pub mod pager;
pub mod prompt;
pub mod tag;

pub use tag::{tag, untag, LOCAL_TAG, ONLINE_TAG};

use crate::config::UiConfig;
use crate::error::{HelperError, Result};
use crossterm::style::Stylize;
use dialoguer::Confirm;
use std::io::{self, BufRead, IsTerminal, Write};

/// Deals with user input and output.
pub trait UserInterface {
    /// Read one line from the user, trimmed.
    fn get_input(&self) -> Result<String>;
    /// Ask a yes/no question. Anything but a yes is a no.
    fn accept(&self, question: &str) -> bool;
    /// Let the user edit a long value, returning the trimmed result.
    fn edit(&self, old_value: &str) -> Result<String>;

    fn title(&self, text: &str);
    fn sub_title(&self, text: &str);
    fn sub_part(&self, text: &str);
    /// Show a prompt, without a line break.
    fn choice(&self, text: &str);
    fn usage(&self, text: &str);
    fn message(&self, text: &str);
    /// Show long text, paging it if needed.
    fn display(&self, text: &str);

    fn tag(&self, entry: &str, is_local: bool) -> String {
        tag(entry, is_local)
    }

    fn warning(&self, text: &str) {
        tracing::warn!("{}", text);
    }

    fn error(&self, text: &str) {
        tracing::error!("{}", text);
    }

    /// Pick one of `options`, leave blank, enter a value manually or abort.
    fn select_option(&self, title: &str, usage: &str, options: &[String], long_field: bool) -> Result<String> {
        prompt::select_option(self, title, usage, options, long_field)
    }

    /// Keep or replace the current value of `field`.
    fn update_value(&self, field: &str, usage: &str, old_value: &str, long_field: bool) -> Result<String> {
        prompt::update_value(self, field, usage, old_value, long_field)
    }
}

/// [`UserInterface`] on stdin/stdout.
#[derive(Clone, Debug)]
pub struct TerminalUi {
    config: UiConfig,
}

impl TerminalUi {
    pub fn new(config: UiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    fn print_inline(&self, text: impl std::fmt::Display) {
        print!("{text}");
        let _ = io::stdout().flush();
    }
}

impl UserInterface for TerminalUi {
    fn get_input(&self) -> Result<String> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(HelperError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn accept(&self, question: &str) -> bool {
        if io::stdin().is_terminal() {
            return Confirm::new()
                .with_prompt(question)
                .default(false)
                .wait_for_newline(true)
                .interact()
                .unwrap_or(false);
        }
        self.print_inline(format!("{question} Y/N : ").blue().bold());
        matches!(self.get_input().as_deref(), Ok("y" | "Y" | "yes"))
    }

    fn edit(&self, old_value: &str) -> Result<String> {
        editor::edit(&self.config.editor, old_value)
    }

    fn title(&self, text: &str) {
        println!("\n{}\n", format!("# {text}").bold().underlined());
    }

    fn sub_title(&self, text: &str) {
        println!("\n{}", format!("## {text}").bold());
    }

    fn sub_part(&self, text: &str) {
        println!("{}", format!("### {text}").blue().bold());
    }

    fn choice(&self, text: &str) {
        self.print_inline(text.blue().bold());
    }

    fn usage(&self, text: &str) {
        println!("{}", text.green());
    }

    fn message(&self, text: &str) {
        println!("{text}");
    }

    fn display(&self, text: &str) {
        if let Err(e) = pager::page(&self.config.pager, text) {
            self.error(&e.to_string());
            println!("{text}");
        }
    }
}
