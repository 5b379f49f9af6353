/// Brand prefix shown in front of every target name.
pub const TITLE_PREFIX: &str = "TSSH";
/// Subtitle used when no build identifier is available.
pub const UNKNOWN_BUILD: &str = "build unknown";

/// Title line for `target_name`: `"TSSH <name>"`, or just `"TSSH"` when the name is blank.
pub fn title_label(target_name: &str) -> String {
    match target_name.trim() {
        "" => TITLE_PREFIX.to_string(),
        name => format!("{TITLE_PREFIX} {name}"),
    }
}

/// Subtitle line for `build_id`, falling back to a placeholder when blank.
pub fn subtitle_label(build_id: &str) -> String {
    match build_id.trim() {
        "" => UNKNOWN_BUILD.to_string(),
        id => id.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/labels.rs"]
mod tests;
