#![forbid(unsafe_code)]

//! Keyword categorization of free-text recurring-mistake strings.

/// Categories in declaration order; the first category with a matching
/// keyword wins.
pub const MISTAKE_CATEGORIES: &[(&str, &[&str])] = &[
    ("Testing", &["test", "unit", "integration", "coverage", "mock"]),
    ("Naming", &["name", "clarity", "variable", "function", "readable"]),
    (
        "Documentation",
        &["comment", "doc", "readme", "explanation", "describe"],
    ),
    (
        "Architecture",
        &["design", "pattern", "structure", "responsibility", "separation", "solid"],
    ),
    (
        "Performance",
        &["slow", "optimize", "efficiency", "memory", "query", "performance"],
    ),
    (
        "Security",
        &["vulnerability", "injection", "auth", "validation", "encrypt", "security"],
    ),
];

pub const OTHER_CATEGORY: &str = "Other";

pub fn categorize_mistake(text: &str) -> &'static str {
    let lowered = text.to_lowercase();

    for (category, keywords) in MISTAKE_CATEGORIES {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return category;
        }
    }

    OTHER_CATEGORY
}
