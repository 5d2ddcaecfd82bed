use std::str::FromStr;

pub const LANG_KEY: &str = "bm_lang";

/// Locale prefixes that appear as the first path segment. The default locale
/// (English) is served unprefixed.
const NON_DEFAULT_LOCALES: &[&str] = &["zh"];

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    fn prefix(self) -> Option<&'static str> {
        match self {
            Locale::En => None,
            Locale::Zh => Some("zh"),
        }
    }

    /// Derives the locale from the URL path's leading segment.
    pub fn from_path(path: &str) -> Self {
        let first = path.trim_matches('/').split('/').next().unwrap_or("");
        if first == "zh" { Locale::Zh } else { Locale::En }
    }

    /// Maps a browser language tag ("zh-CN", "en-US", ...) onto a site
    /// locale; anything outside the zh family reads as English.
    pub fn from_browser_tag(tag: &str) -> Self {
        if tag.to_lowercase().starts_with("zh") {
            Locale::Zh
        } else {
            Locale::En
        }
    }
}

impl FromStr for Locale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Locale::En),
            "zh" => Ok(Locale::Zh),
            _ => Err(()),
        }
    }
}

/// Rebuilds the current path for a different locale: the existing locale
/// prefix is stripped, directory-like paths keep their trailing slash, and
/// non-default targets get their prefix prepended.
pub fn build_path_for_lang(path: &str, target: Locale) -> String {
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if segments
        .first()
        .is_some_and(|s| NON_DEFAULT_LOCALES.contains(s))
    {
        segments.remove(0);
    }

    let is_file = segments.last().is_some_and(|s| is_file_segment(s));
    let rel = segments.join("/");

    let mut out = String::from("/");
    if let Some(prefix) = target.prefix() {
        out.push_str(prefix);
        out.push('/');
    }
    if !rel.is_empty() {
        out.push_str(&rel);
        if !is_file {
            out.push('/');
        }
    }
    out
}

/// A segment names a file when it contains a dot that is not at either edge,
/// so "search.html" is a file while ".hidden", ".." and "v2." are not.
fn is_file_segment(segment: &str) -> bool {
    segment
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < segment.len())
}
