// Validation utilities module
// Turns validator's field errors into one client-facing message

use validator::ValidationErrors;

/// Formats field errors as `field (reason); field (reason)`
///
/// Fields are sorted so the same input always yields the same message.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter()
                .map(move |err| format!("{} ({})", field, err.code))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
