//! Resolves raw classifier output into a label.

use std::sync::LazyLock;

use lawbot_core::ClassificationLabel;
use regex::Regex;
use tracing::{info, warn};

static LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(GREETING|CONSTITUTION|CRIMINAL|CIVIL|TRAFFIC)\b")
        .expect("Failed to compile label regex pattern")
});

/// Matches the five category tokens as whole words, ignoring case.
///
/// No token, or two or more distinct tokens, yields `Unknown`. A single
/// token repeated any number of times resolves to that label.
pub fn resolve_label(raw: &str) -> ClassificationLabel {
    let mut found: Option<ClassificationLabel> = None;

    for m in LABEL_PATTERN.find_iter(raw) {
        let Ok(label) = m.as_str().parse::<ClassificationLabel>() else {
            continue;
        };
        match found {
            None => found = Some(label),
            Some(prev) if prev == label => {}
            Some(prev) => {
                warn!("CLASSIFIER: Ambiguous output, saw both {} and {}", prev, label);
                return ClassificationLabel::Unknown;
            }
        }
    }

    let label = found.unwrap_or(ClassificationLabel::Unknown);
    info!("CLASSIFIER: Resolved label {}", label);
    label
}
