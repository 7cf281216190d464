//! Dotted property path composition.

/// Append `name` to an optional path prefix.
///
/// ```
/// use typequery::path;
///
/// assert_eq!(path::add(None, "contacts"), "contacts");
/// assert_eq!(path::add(Some("customer"), "billingAddress"), "customer.billingAddress");
/// ```
pub fn add(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}.{name}"),
        _ => name.to_string(),
    }
}
