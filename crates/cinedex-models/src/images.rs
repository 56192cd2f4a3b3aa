/// Base address of the upstream image CDN
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Poster,
    Backdrop,
    Profile,
    Still,
}

impl ImageKind {
    pub fn default_size(&self) -> &'static str {
        match self {
            ImageKind::Poster => "w500",
            ImageKind::Backdrop => "w1280",
            ImageKind::Profile => "w185",
            ImageKind::Still => "w300",
        }
    }
}

/// Absolute image URL for a relative upstream path.
///
/// Returns `None` when the movie has no image of that kind.
pub fn image_url(path: Option<&str>, kind: ImageKind, size: Option<&str>) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    let size = size.unwrap_or_else(|| kind.default_size());
    Some(format!("{}/{}{}", IMAGE_BASE_URL, size, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url() {
        assert_eq!(
            image_url(Some("/abc.jpg"), ImageKind::Poster, None).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert_eq!(
            image_url(Some("/abc.jpg"), ImageKind::Backdrop, Some("original")).as_deref(),
            Some("https://image.tmdb.org/t/p/original/abc.jpg")
        );
        assert_eq!(image_url(None, ImageKind::Profile, None), None);
    }
}
