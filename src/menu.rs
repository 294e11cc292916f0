// Interactive menu used by the binary. Each entry runs one helper so they
// can be tried by hand; long-running ones show a spinner.

use crate::fs;
use crate::progress::spin_while_things_happen;
use crate::ui::UserInterface;
use anyhow::{Context, Result};
use dialoguer::{Input, Select};
use std::path::PathBuf;

const ITEMS: &[&str] = &[
    "Hash a file",
    "Copy a directory",
    "Remove empty folders",
    "Pick a unique archive name",
    "Edit a value",
    "Show a file",
    "Exit",
];

/// Main interactive menu: loops until the user picks "Exit".
pub fn main_menu<U: UserInterface>(ui: &U) -> Result<()> {
    ui.title("Shelf helpers");
    loop {
        let selection = Select::new().items(ITEMS).default(0).interact()?;
        let outcome = match selection {
            0 => handle_hash(ui),
            1 => handle_copy(ui),
            2 => handle_cleanup(ui),
            3 => handle_unique_name(ui),
            4 => handle_edit(ui),
            5 => handle_show(ui),
            _ => break,
        };
        // a failed action is reported and the menu keeps going
        if let Err(e) = outcome {
            ui.error(&format!("{e:#}"));
        }
    }
    Ok(())
}

fn ask_path(prompt: &str) -> Result<PathBuf> {
    let path: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(PathBuf::from(path))
}

fn handle_hash<U: UserInterface>(ui: &U) -> Result<()> {
    ui.sub_title("SHA256");
    let path = fs::file_exists(ask_path("File path")?)?;
    let hash = spin_while_things_happen("Hashing", || fs::calculate_sha256(&path))?;
    ui.message(&format!("{}  {}", hash, path.display()));
    Ok(())
}

fn handle_copy<U: UserInterface>(ui: &U) -> Result<()> {
    ui.sub_title("Copy a directory");
    let src = ask_path("Source directory")?;
    let dst = ask_path("Destination (must not exist)")?;
    spin_while_things_happen("Copying", || fs::copy_dir(&src, &dst))
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(())
}

fn handle_cleanup<U: UserInterface>(ui: &U) -> Result<()> {
    ui.sub_title("Remove empty folders");
    let root = ask_path("Root directory")?;
    if !ui.accept(&format!("Remove every empty folder below {}?", root.display())) {
        return Ok(());
    }
    let removed = spin_while_things_happen("Cleaning", || fs::delete_empty_folders(&root))?;
    ui.message(&format!("Removed {removed} directories."));
    Ok(())
}

fn handle_unique_name<U: UserInterface>(ui: &U) -> Result<()> {
    ui.sub_title("Unique archive name");
    let dir = ask_path("Backup directory")?;
    let name: String = Input::new().with_prompt("Base filename").interact_text()?;
    let unique = fs::unique_timestamped_filename(&dir, &name)?;
    ui.message(&unique.display().to_string());
    Ok(())
}

fn handle_edit<U: UserInterface>(ui: &U) -> Result<()> {
    let current: String = Input::new().with_prompt("Current value").allow_empty(true).interact_text()?;
    let candidate: String = Input::new().with_prompt("Online value").allow_empty(true).interact_text()?;
    let long_field = ui.accept("Edit in your editor?");

    let options = tagged_options(ui, &[(current.as_str(), true), (candidate.as_str(), false)]);
    let chosen = ui.select_option("Value", "Pick the value to keep.", &options, long_field)?;
    let updated = ui.update_value("value", "", &chosen, long_field)?;
    ui.message(&format!("Final value: {updated}"));
    Ok(())
}

/// Tag each non-blank value as local or online; blank ones are not offered.
fn tagged_options<U: UserInterface>(ui: &U, values: &[(&str, bool)]) -> Vec<String> {
    values
        .iter()
        .filter(|(value, _)| !value.trim().is_empty())
        .map(|(value, is_local)| ui.tag(value, *is_local))
        .collect()
}

fn handle_show<U: UserInterface>(ui: &U) -> Result<()> {
    let path = fs::file_exists(ask_path("File path")?)?;
    let text = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    ui.display(&text);
    Ok(())
}
