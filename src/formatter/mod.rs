use crate::instruments::Instrument;

mod sanitized_formatter;

pub use sanitized_formatter::SanitizedFormatter;

pub trait FileNameFormatter {
    fn file_name(&self, display_name: &str, instrument: &Instrument) -> String;
}

/// Keep ASCII letters, digits, space, `-`, `_`, `.`, `(` and `)`; drop the
/// rest.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.' | '(' | ')'))
        .collect()
}

/// Split `name` into stem and extension (with its dot). Leading dots belong
/// to the stem, so `.mid` has no extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(dot) => name.split_at(leading + dot),
        None => (name, ""),
    }
}

pub fn resolve_collision<F>(name: &str, mut is_taken: F) -> String
where
    F: FnMut(&str) -> bool,
{
    if !is_taken(name) {
        return name.to_string();
    }
    let (stem, extension) = split_extension(name);
    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{stem}_{counter}{extension}");
        if !is_taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
