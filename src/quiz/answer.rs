/// Lowercased and trimmed, the only leniency a submission gets.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

pub fn validate(submitted: &str, expected: &str) -> bool {
    normalize(submitted) == normalize(expected)
}
