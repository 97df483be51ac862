//! Submit gate

/// Decide whether a submission starts a request cycle.
///
/// Returns the trimmed text to record as the user turn, or `None` when the
/// input is empty after trimming. Nothing else is checked: repeated or rapid
/// submissions all pass.
pub fn admit(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
