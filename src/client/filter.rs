use crate::models::{Property, PropertyType};

/// True when `property` matches the search text and the type filter.
///
/// Search is a case-insensitive substring of name or location; an empty
/// search matches everything, as does a missing type filter.
pub fn matches(property: &Property, search: &str, filter_type: Option<PropertyType>) -> bool {
    let search = search.to_lowercase();
    let matches_search = property.name.to_lowercase().contains(&search)
        || property.location.to_lowercase().contains(&search);
    let matches_type = filter_type.map_or(true, |kind| property.kind == kind);
    matches_search && matches_type
}

/// The subset of `properties` visible under the current filters, order kept
pub fn filter_properties<'a>(
    properties: &'a [Property],
    search: &str,
    filter_type: Option<PropertyType>,
) -> Vec<&'a Property> {
    properties
        .iter()
        .filter(|p| matches(p, search, filter_type))
        .collect()
}
