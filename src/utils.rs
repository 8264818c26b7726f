use std::path::{Component, Path};

lazy_static::lazy_static! {
    // NUL and either separator, regardless of host platform
    static ref FORBIDDEN_CHARACTERS: regex::Regex =
        regex::Regex::new(r"[\x00/\\]").expect("a valid regex pattern");
}

/// Returns `true` when `name` can be joined onto a directory as exactly one new entry.
///
/// Rejects empty or blank names, names containing a path separator or NUL, and the
/// special `.`/`..` components, so a configured name can never point outside of the
/// directory it is created in.
pub fn is_single_segment(name: &str) -> bool {
    if name.trim().is_empty() || FORBIDDEN_CHARACTERS.is_match(name) {
        return false;
    }

    let mut components = Path::new(name).components();

    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
