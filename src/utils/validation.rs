//! Required-field validation for user-supplied settings

/// Checks that every required field has a non-blank value.
///
/// Returns the names of the blank fields, in input order, on failure.
pub fn validate_required(fields: &[(&str, &str)]) -> Result<(), Vec<String>> {
    let invalid: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name.to_string())
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(invalid)
    }
}
