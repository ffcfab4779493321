pub mod sanitize;
pub mod types;

pub use sanitize::{sanitize_patient_input, MAX_SYMPTOM_LENGTH};
pub use types::{InputModification, InputModificationKind, SanitizedInput};
