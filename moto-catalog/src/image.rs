//! Image reference heuristics.

/// Default application-rooted directory for bare image filenames.
pub const DEFAULT_IMAGE_BASE: &str = "/images/motos";

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg", "avif", "bmp"];

/// Whether a value looks like an image reference, judged by file extension.
///
/// This is a best-effort signal: any short text ending in `.png` matches.
pub fn looks_like_image(s: &str) -> bool {
    let s = s.trim();
    let path = s.split(['?', '#']).next().unwrap_or(s);
    match path.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => IMAGE_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext)),
        _ => false,
    }
}

/// Normalize an image reference to an absolute URL or an application-rooted
/// path; never a bare filename.
///
/// ```
/// use moto_catalog::image::normalize_image_url;
///
/// let base = "/images/motos";
/// assert_eq!(normalize_image_url("mt07.png", base).as_deref(), Some("/images/motos/mt07.png"));
/// assert_eq!(normalize_image_url("img/mt07.png", base).as_deref(), Some("/img/mt07.png"));
/// assert_eq!(normalize_image_url("https://cdn.example.com/a.jpg", base).as_deref(),
///            Some("https://cdn.example.com/a.jpg"));
/// ```
pub fn normalize_image_url(raw: &str, base: &str) -> Option<String> {
    let value = raw.trim().replace('\\', "/");
    if value.is_empty() {
        return None;
    }

    let lower = value.to_ascii_lowercase();
    if lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("//")
        || lower.starts_with("data:")
        || value.starts_with('/')
    {
        return Some(value);
    }

    let relative = value.trim_start_matches("./");
    if relative.is_empty() {
        return None;
    }
    if relative.contains('/') {
        Some(format!("/{relative}"))
    } else {
        Some(format!("{}/{}", base.trim_end_matches('/'), relative))
    }
}
