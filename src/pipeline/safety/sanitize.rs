use std::sync::LazyLock;

use regex::Regex;

use super::types::{InputModification, InputModificationKind, SanitizedInput};

/// Maximum symptom description length in characters.
pub const MAX_SYMPTOM_LENGTH: usize = 4_000;

static INJECTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Role override attempts
        r"(?i)ignore\s+(?:previous|above|all\s+prior|the\s+above)\s+(?:instructions?|rules?|prompts?)",
        r"(?i)forget\s+(?:everything|all)\s+(?:previous|prior|above)",
        r"(?i)forget\s+your\s+(?:instructions?|rules?|prompts?)",
        r"(?im)^\s*new\s+instructions?\s*:",
        r"(?i)you\s+are\s+now\s+(?:a|an)\s+",
        // Role tags only count at the start of a line: "nervous system:" is symptom text
        r"(?im)^\s*system\s*:",
        r"(?im)^\s*assistant\s*:",
        r"<<SYS>>",
        r"\[INST\]",
        r"<\|im_start\|>",
        r"<\|im_end\|>",
        // Attempts to break out of the patient information block
        r"(?i)</?PATIENT_INFORMATION>",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid injection pattern"))
    .collect()
});

/// Sanitize patient-supplied text before it reaches the model.
pub fn sanitize_patient_input(raw: &str, max_length: usize) -> SanitizedInput {
    let mut text = raw.to_string();
    let mut modifications = Vec::new();

    // Step 1: Remove non-visible Unicode characters
    let before = text.clone();
    text = remove_invisible_unicode(&text);
    if text != before {
        modifications.push(InputModification {
            kind: InputModificationKind::InvisibleUnicodeRemoved,
            description: "Stripped non-visible Unicode characters".to_string(),
        });
    }

    // Step 2: Remove control characters (except newline, tab)
    let before = text.clone();
    text = remove_control_characters(&text);
    if text != before {
        modifications.push(InputModification {
            kind: InputModificationKind::ControlCharacterRemoved,
            description: "Stripped control characters".to_string(),
        });
    }

    // Step 3: Filter prompt injection patterns
    let before = text.clone();
    text = remove_injection_patterns(&text);
    if text != before {
        modifications.push(InputModification {
            kind: InputModificationKind::InjectionPatternRemoved,
            description: "Removed potential prompt injection patterns".to_string(),
        });
    }

    // Step 4: Truncate to maximum length
    let char_count = text.chars().count();
    if char_count > max_length {
        text = truncate_at_word_boundary(&text, max_length);
        modifications.push(InputModification {
            kind: InputModificationKind::ExcessiveLengthTruncated,
            description: format!(
                "Truncated from {} to {} characters",
                char_count,
                text.chars().count()
            ),
        });
    }

    SanitizedInput {
        text,
        was_modified: !modifications.is_empty(),
        modifications,
    }
}

/// Remove zero-width and invisible Unicode characters.
fn remove_invisible_unicode(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(
                *c,
                '\u{200B}'..='\u{200F}'  // Zero-width chars
                | '\u{202A}'..='\u{202E}' // Directional formatting
                | '\u{2060}'..='\u{2064}' // Invisible operators
                | '\u{2066}'..='\u{2069}' // Directional isolates
                | '\u{FEFF}'              // BOM
                | '\u{00AD}'              // Soft hyphen
            )
        })
        .collect()
}

/// Remove control characters except newline and tab.
fn remove_control_characters(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Replace known prompt injection patterns with [FILTERED].
fn remove_injection_patterns(text: &str) -> String {
    let mut result = text.to_string();
    for pattern in INJECTION_PATTERNS.iter() {
        result = pattern.replace_all(&result, "[FILTERED]").into_owned();
    }
    result
}

/// Truncate to at most `max` characters, preferring a word boundary.
fn truncate_at_word_boundary(text: &str, max: usize) -> String {
    let byte_end = text
        .char_indices()
        .nth(max)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let truncated = &text[..byte_end];
    match truncated.rfind(char::is_whitespace) {
        Some(pos) => truncated[..pos].to_string(),
        None => truncated.to_string(),
    }
}
