//! Stable record identity.

use crate::normalize::slugify;

/// Generate a stable record ID from brand, model and optional year.
///
/// `slug(brand) + "-" + slug(model) + ("-" + year)`. A component whose slug is
/// empty (e.g. a label with no Latin characters) is left out rather than
/// producing a doubled dash.
///
/// ```
/// use moto_catalog::identity::make_id;
///
/// assert_eq!(make_id("Yamaha", "MT-07", Some(2024)), "yamaha-mt-07-2024");
/// assert_eq!(make_id("Honda", "CB 500 F", None), "honda-cb-500-f");
/// ```
pub fn make_id(brand: &str, model: &str, year: Option<i32>) -> String {
    let mut parts = vec![slugify(brand), slugify(model)];
    if let Some(year) = year {
        parts.push(year.to_string());
    }
    parts.retain(|p| !p.is_empty());
    parts.join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_accents_share_id() {
        assert_eq!(
            make_id("YAMAHA", "mt-07", Some(2024)),
            make_id("  Yamaha ", "MT 07", Some(2024))
        );
        assert_eq!(make_id("Peugeot", "Django Évasion", None), "peugeot-django-evasion");
    }

    #[test]
    fn test_empty_slug_component_dropped() {
        assert_eq!(make_id("Zontes", "日本", Some(2023)), "zontes-2023");
    }
}
