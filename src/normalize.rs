use crate::{FieldDescriptor, HeaderPrefix, Style};

/// Marker appended to the docs of required fields in the extended style
pub const REQUIRED_MARKER: &str = "<b>[required]</b>";
/// Marker appended to the docs of optional fields in the extended style
pub const OPTIONAL_MARKER: &str = "[optional]";
/// Prefix of the docs of required fields in the basic style
pub const BASIC_REQUIRED_PREFIX: &str = "[required]";

/// Returns the trimmed label between the brackets of `header`, eg.
/// `Investigation Title` for `Comment[Investigation Title]`.
///
/// The label starts right after the prefix, and the last character, normally
/// the closing bracket, is dropped.
pub fn inner_label(header: &str, prefix: HeaderPrefix) -> &str {
    let rest = header.get(prefix.offset()..).unwrap_or_default().trim_end();
    rest.strip_suffix(']').unwrap_or(rest).trim()
}

/// Derives the enum constant name for a label
///
/// ```
/// assert_eq!(
///     isa_config_gen::normalize::identifier("Investigation Title"),
///     "INVESTIGATION_TITLE"
/// );
/// ```
pub fn identifier(label: &str) -> String {
    label.to_uppercase().replace(' ', "_")
}

/// Turns the free text section of an investigation field into the name of
/// the matching `InvestigationAttribute` constant
pub fn section_identifier(section: &str) -> String {
    section.replace(' ', "_")
}

/// Replaces newlines with spaces so the text fits on a single doc line
pub fn flatten(text: &str) -> String {
    text.replace('\n', " ")
}

/// The documentation lines for a field's enum constant, in the given style
pub fn doc_lines(field: &FieldDescriptor, style: Style) -> Vec<String> {
    match style {
        Style::Basic => vec![basic_doc(field)],
        Style::Extended => extended_doc(field),
    }
}

/// The whole text content of the field on one line, prefixed with
/// [`BASIC_REQUIRED_PREFIX`] for required fields
fn basic_doc(field: &FieldDescriptor) -> String {
    let flat = flatten(&field.content);
    let doc = flat.trim();

    if field.required {
        format!("{BASIC_REQUIRED_PREFIX}{doc}")
    } else {
        doc.to_owned()
    }
}

/// The description, the default value, then the required/optional marker
fn extended_doc(field: &FieldDescriptor) -> Vec<String> {
    let description = field.description.as_deref().unwrap_or(&field.content);
    let marker = if field.required {
        REQUIRED_MARKER
    } else {
        OPTIONAL_MARKER
    };

    [Some(description), field.default_value.as_deref()]
        .into_iter()
        .flatten()
        .map(|text| flatten(text).trim().to_owned())
        .filter(|line| !line.is_empty())
        .chain(std::iter::once(marker.to_owned()))
        .collect()
}
