pub use rust_i18n::t;

/// Picks the catalog locale for UI labels from the page's `lang` attribute.
/// Unknown languages fall back to English.
pub fn page_locale(preferred: Option<&str>) -> String {
    preferred
        .and_then(normalize_locale)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_locale(locale: &str) -> Option<String> {
    let lower = locale.to_lowercase();

    if lower.starts_with("zh") {
        Some("zh".to_string())
    } else if lower.starts_with("en") {
        Some("en".to_string())
    } else {
        None
    }
}
