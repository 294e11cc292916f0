// Interactive flows built on top of the `UserInterface` primitives: picking
// one of several candidate values, or editing a single value.

use super::tag::untag;
use super::UserInterface;
use crate::error::{HelperError, Result};
use crate::slices::remove_duplicates;

pub const EDIT_OR_KEEP: &str = "[E]dit or [K]eep current value: ";
pub const ENTER_NEW_VALUE: &str = "Enter new value: ";
pub const INVALID_CHOICE: &str = "Invalid choice.";
pub const EMPTY_VALUE: &str = "Empty value detected.";
pub const NOT_CONFIRMED: &str = "Manual entry not confirmed, trying again.";
pub const TOO_MANY_ERRORS: &str = "Too many errors, giving up.";

/// Invalid answers tolerated before giving up.
pub const MAX_INVALID_CHOICES: usize = 10;

fn selection_prompt(count: usize) -> String {
    match count {
        0 => "Leave [B]lank, [E]dit manually, or [A]bort: ".to_string(),
        1 => "Choose [1], leave [B]lank, [E]dit manually, or [A]bort: ".to_string(),
        n => format!("Choose option [1-{n}], leave [B]lank, [E]dit manually, or [A]bort: "),
    }
}

/// Counts invalid answers and fails once there are too many.
struct Attempts {
    errors: usize,
}

impl Attempts {
    fn new() -> Self {
        Self { errors: 0 }
    }

    fn invalid<U: UserInterface + ?Sized>(&mut self, ui: &U) -> Result<()> {
        ui.warning(INVALID_CHOICE);
        self.errors += 1;
        if self.errors > MAX_INVALID_CHOICES {
            return Err(HelperError::InvalidChoice);
        }
        Ok(())
    }
}

/// Ask for a value on one line, or in the editor for long fields.
fn manual_entry<U: UserInterface + ?Sized>(ui: &U, long_field: bool, preset: &str) -> Result<String> {
    let value = if long_field {
        ui.edit(preset)?
    } else {
        ui.choice(ENTER_NEW_VALUE);
        ui.get_input()?
    };
    if value.is_empty() {
        ui.warning(EMPTY_VALUE);
    }
    Ok(value)
}

/// Let the user pick one of `options`, leave the value blank, type a new
/// one, or abort. Returns the chosen value without its tag.
pub fn select_option<U: UserInterface + ?Sized>(
    ui: &U,
    title: &str,
    usage: &str,
    options: &[String],
    long_field: bool,
) -> Result<String> {
    ui.sub_part(title);
    if !usage.is_empty() {
        ui.usage(usage);
    }

    let mut options = options.to_vec();
    remove_duplicates(&mut options, &[]);
    for (i, option) in options.iter().enumerate() {
        ui.message(&format!("{}. {}", i + 1, option));
    }

    let prompt = selection_prompt(options.len());
    let mut attempts = Attempts::new();
    let mut invalid = |ui: &U| {
        attempts.invalid(ui).map_err(|e| {
            ui.warning(TOO_MANY_ERRORS);
            e
        })
    };
    loop {
        ui.choice(&prompt);
        let choice = ui.get_input()?;

        match choice.to_uppercase().as_str() {
            "E" => {
                let all_versions: String = if long_field {
                    options
                        .iter()
                        .enumerate()
                        .map(|(i, o)| format!("--- {} ---\n{}\n", i + 1, untag(o)))
                        .collect()
                } else {
                    String::new()
                };
                let edited = manual_entry(ui, long_field, &all_versions)?;
                if ui.accept(&format!("Confirm: {edited}")) {
                    return Ok(edited);
                }
                ui.warning(NOT_CONFIRMED);
                // a rejected entry counts as a wasted attempt
                invalid(ui)?;
            }
            "A" => return Err(HelperError::UserAborted),
            "B" => return Ok(String::new()),
            _ => match choice.parse::<usize>() {
                Ok(index) if (1..=options.len()).contains(&index) => return Ok(untag(&options[index - 1])),
                _ => invalid(ui)?,
            },
        }
    }
}

/// Show the current value of `field` and let the user keep it or replace
/// it. Returns the resulting value, trimmed.
pub fn update_value<U: UserInterface + ?Sized>(
    ui: &U,
    field: &str,
    usage: &str,
    old_value: &str,
    long_field: bool,
) -> Result<String> {
    ui.sub_part(&format!("Modifying {field}"));
    if !usage.is_empty() {
        ui.usage(usage);
    }
    ui.message(&format!("Current value: {old_value}"));

    let mut attempts = Attempts::new();
    loop {
        ui.choice(EDIT_OR_KEEP);
        let choice = ui.get_input()?;

        match choice.to_lowercase().as_str() {
            "e" => {
                let edited = manual_entry(ui, long_field, old_value)?;
                if ui.accept("Confirm") {
                    return Ok(edited.trim().to_string());
                }
                ui.warning(NOT_CONFIRMED);
            }
            "k" => return Ok(old_value.trim().to_string()),
            _ => attempts.invalid(ui)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_depends_on_option_count() {
        assert_eq!(selection_prompt(0), "Leave [B]lank, [E]dit manually, or [A]bort: ");
        assert_eq!(selection_prompt(1), "Choose [1], leave [B]lank, [E]dit manually, or [A]bort: ");
        assert_eq!(selection_prompt(3), "Choose option [1-3], leave [B]lank, [E]dit manually, or [A]bort: ");
    }
}
