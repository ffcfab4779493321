/// Sanitized patient text, ready for prompt construction.
#[derive(Debug, Clone)]
pub struct SanitizedInput {
    /// The cleaned, safe text.
    pub text: String,
    /// Whether any modifications were made.
    pub was_modified: bool,
    /// What was stripped (for audit, no patient data).
    pub modifications: Vec<InputModification>,
}

/// A modification made during input sanitization.
#[derive(Debug, Clone)]
pub struct InputModification {
    pub kind: InputModificationKind,
    pub description: String,
}

/// Types of input sanitization applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputModificationKind {
    InvisibleUnicodeRemoved,
    InjectionPatternRemoved,
    ExcessiveLengthTruncated,
    ControlCharacterRemoved,
}

impl InputModificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvisibleUnicodeRemoved => "invisible_unicode_removed",
            Self::InjectionPatternRemoved => "injection_pattern_removed",
            Self::ExcessiveLengthTruncated => "excessive_length_truncated",
            Self::ControlCharacterRemoved => "control_character_removed",
        }
    }
}
