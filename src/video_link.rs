use once_cell::sync::Lazy;
use regex::Regex;

const THUMBNAIL_URL_TEMPLATE: &str = "https://img.youtube.com/vi/{id}/hqdefault.jpg";

// Tried in order. The first covers `watch?v=<id>`, `/embed/<id>`,
// `/shorts/<id>` and friends, the second the youtu.be short link host.
static VIDEO_ID_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})(?:\?|&|/|$)").expect("valid video id pattern"),
        Regex::new(r"youtu\.be/([0-9A-Za-z_-]{11})").expect("valid short link pattern"),
    ]
});

/// How a configured video should be presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoLink {
    /// A video id was found, a preview image is available.
    Thumbnail {
        url: String,
        video_id: String,
        thumbnail_url: String,
    },
    /// Unrecognized link, shown as a plain link without preview.
    RawLink { url: String },
}

impl VideoLink {
    pub fn url(&self) -> &str {
        match self {
            VideoLink::Thumbnail { url, .. } | VideoLink::RawLink { url } => url,
        }
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        match self {
            VideoLink::Thumbnail { thumbnail_url, .. } => Some(thumbnail_url),
            VideoLink::RawLink { .. } => None,
        }
    }
}

/// Extracts the 11 character video id from a video URL.
pub fn video_id(url: &str) -> Option<&str> {
    if url.is_empty() {
        return None;
    }

    VIDEO_ID_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(url)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
    })
}

pub fn thumbnail_url(video_id: &str) -> String {
    THUMBNAIL_URL_TEMPLATE.replace("{id}", video_id)
}

/// Builds the preview for a video URL. Performs no network access.
pub fn thumbnail_for(url: &str) -> VideoLink {
    match video_id(url) {
        Some(id) => VideoLink::Thumbnail {
            url: url.to_string(),
            video_id: id.to_string(),
            thumbnail_url: thumbnail_url(id),
        },
        None => VideoLink::RawLink {
            url: url.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THUMBNAIL: &str = "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg";

    #[test]
    fn test_watch_url() {
        let link = thumbnail_for("https://www.youtube.com/watch?v=dQw4w9WgXcQ");

        assert_eq!(
            link,
            VideoLink::Thumbnail {
                url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
                video_id: "dQw4w9WgXcQ".to_string(),
                thumbnail_url: THUMBNAIL.to_string(),
            }
        );
    }

    #[test]
    fn test_short_link() {
        assert_eq!(video_id("https://youtu.be/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
        assert_eq!(
            thumbnail_for("https://youtu.be/dQw4w9WgXcQ").thumbnail_url(),
            Some(THUMBNAIL)
        );
    }

    #[test]
    fn test_short_link_with_query() {
        assert_eq!(video_id("https://youtu.be/dQw4w9WgXcQ?t=42"), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn test_id_followed_by_other_parameters() {
        assert_eq!(
            video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10s"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            video_id("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            video_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_unrecognized_links_have_no_thumbnail() {
        assert_eq!(video_id(""), None);
        assert_eq!(video_id("not a url"), None);
        assert_eq!(video_id("https://www.youtube.com/watch?v=short"), None);
        assert_eq!(video_id("https://example.com/abcdefghijkl"), None);

        let link = thumbnail_for("not a url");
        assert_eq!(
            link,
            VideoLink::RawLink {
                url: "not a url".to_string()
            }
        );
        assert_eq!(link.url(), "not a url");
        assert_eq!(link.thumbnail_url(), None);
    }
}
