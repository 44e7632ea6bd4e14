use super::{sanitize, FileNameFormatter};
use crate::instruments::Instrument;

#[derive(Debug, Default, Clone, Copy)]
pub struct SanitizedFormatter {}

impl SanitizedFormatter {
    pub fn new() -> Self {
        Self {}
    }
}

impl FileNameFormatter for SanitizedFormatter {
    fn file_name(&self, display_name: &str, instrument: &Instrument) -> String {
        if instrument.is_resolved() {
            format!(
                "{name}_{instrument}.mid",
                name = sanitize(display_name),
                instrument = sanitize(instrument.label())
            )
        } else {
            format!("{}.mid", sanitize(display_name))
        }
    }
}
