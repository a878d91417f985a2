//! Filename rules shared by the batch loop and the `check` command.
//!
//! A file qualifies when its name ends with the source suffix, compared
//! case-insensitively (`photo.PNG` qualifies for `.png`). Its output name is
//! the name with that suffix removed and the target suffix appended.

/// Whether `file_name` ends with `suffix`, ignoring ASCII case.
///
/// A name that is nothing but the suffix (e.g. `.png`) has no stem and does
/// not match.
pub fn matches_suffix(file_name: &str, suffix: &str) -> bool {
    stem_len(file_name, suffix).is_some_and(|len| len > 0)
}

/// Derive the output file name for a qualifying input.
///
/// Returns `None` when `file_name` does not match `source_suffix`.
///
/// - `"photo.PNG"` → `"photo.jpg"`
/// - `"a.b.png"` → `"a.b.jpg"`
pub fn output_file_name(file_name: &str, source_suffix: &str, target_suffix: &str) -> Option<String> {
    match stem_len(file_name, source_suffix) {
        Some(len) if len > 0 => Some(format!("{}{}", &file_name[..len], target_suffix)),
        _ => None,
    }
}

/// Byte length of the stem if `file_name` ends with `suffix` (ASCII case-insensitive).
fn stem_len(file_name: &str, suffix: &str) -> Option<usize> {
    let split = file_name.len().checked_sub(suffix.len())?;
    let tail = file_name.get(split..)?;
    tail.eq_ignore_ascii_case(suffix).then_some(split)
}
