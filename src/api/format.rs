use std::collections::HashMap;
use validator::ValidationErrors;

/// Flatten validator output into the `{field: message}` map used by
/// validation error responses.
///
/// Each field keeps its first error message so clients get one actionable
/// message per field rather than the full rule listing.
pub fn format_validation_errors(errors: &ValidationErrors) -> HashMap<String, String> {
    let mut details = HashMap::new();

    for (field, field_errors) in errors.field_errors() {
        let message = field_errors
            .iter()
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid value".to_string());

        details.insert(field.to_string(), message);
    }

    details
}
