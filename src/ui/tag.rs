use crossterm::style::Stylize;

/// Marks an option holding the value currently in the library.
pub const LOCAL_TAG: &str = "[current] ";
/// Marks an option coming from an online source.
pub const ONLINE_TAG: &str = "[online/new] ";

fn local_tag() -> String {
    LOCAL_TAG.cyan().bold().to_string()
}

fn online_tag() -> String {
    ONLINE_TAG.yellow().bold().to_string()
}

/// Prefix `entry` with a coloured local or online tag.
pub fn tag(entry: &str, is_local: bool) -> String {
    let prefix = if is_local { local_tag() } else { online_tag() };
    format!("{prefix}{entry}")
}

/// Strip tags added by [`tag`], coloured or not.
pub fn untag(option: &str) -> String {
    let mut out = option.replace(&local_tag(), "").replace(&online_tag(), "");
    for plain in [LOCAL_TAG, ONLINE_TAG] {
        if let Some(rest) = out.strip_prefix(plain) {
            out = rest.to_string();
        }
    }
    out.trim().to_string()
}
