//! Outbound link helpers: video embeds, map deep links and social icons.

use pamphlet_schema::SocialPlatform;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::sync::OnceLock;

/// Characters `encodeURIComponent` leaves untouched
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const VIDEO_ID_LEN: usize = 11;

fn video_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^.*(youtu.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
            .expect("video id pattern is valid")
    })
}

/// Extract the 11-character video id from a share, watch or embed URL.
///
/// Handles short links, `/v/`, `/u/<user>/`, `/embed/`, `watch?v=` and a
/// trailing `&v=` parameter. Anything else yields `None`.
pub fn extract_video_id(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    let captures = video_pattern().captures(url)?;
    let id = captures.get(2)?.as_str();

    (id.chars().count() == VIDEO_ID_LEN).then(|| id.to_string())
}

/// Embed URL for a video id
pub fn video_embed_url(video_id: &str, origin: &str) -> String {
    format!(
        "https://www.youtube.com/embed/{}?origin={}&rel=0&playsinline=1",
        video_id, origin
    )
}

/// `encodeURIComponent`-compatible percent encoding
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// External map provider with an address search deep link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapProvider {
    Naver,
    Kakao,
}

impl MapProvider {
    pub const ALL: [MapProvider; 2] = [MapProvider::Naver, MapProvider::Kakao];

    pub fn label(&self) -> &'static str {
        match self {
            MapProvider::Naver => "네이버지도",
            MapProvider::Kakao => "카카오맵",
        }
    }

    pub fn search_url(&self, address: &str) -> String {
        let encoded = encode_uri_component(address);
        match self {
            MapProvider::Naver => format!("https://map.naver.com/v5/search/{}", encoded),
            MapProvider::Kakao => format!("https://map.kakao.com/link/search/{}", encoded),
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            MapProvider::Naver => "map-link map-link-naver",
            MapProvider::Kakao => "map-link map-link-kakao",
        }
    }
}

/// Icon, label and colour class of a social link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialBadge {
    pub icon: &'static str,
    pub label: &'static str,
    pub color_class: &'static str,
}

const GENERIC_BADGE: SocialBadge = SocialBadge {
    icon: "globe",
    label: "Link",
    color_class: "bg-gray-100 text-gray-600",
};

/// Static lookup; unrecognised platforms get the generic link badge
pub fn social_badge(platform: &SocialPlatform) -> SocialBadge {
    match platform {
        SocialPlatform::Youtube => SocialBadge {
            icon: "youtube",
            label: "Youtube",
            color_class: "bg-red-50 text-red-600",
        },
        SocialPlatform::Instagram => SocialBadge {
            icon: "instagram",
            label: "Instagram",
            color_class: "bg-pink-50 text-pink-600",
        },
        SocialPlatform::Kakao => SocialBadge {
            icon: "message-circle",
            label: "Kakao",
            color_class: "bg-yellow-50 text-yellow-700",
        },
        SocialPlatform::Blog => SocialBadge {
            icon: "book-open",
            label: "Blog",
            color_class: "bg-green-50 text-green-600",
        },
        SocialPlatform::Website | SocialPlatform::Other(_) => GENERIC_BADGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_and_short_links() {
        let expected = Some("dQw4w9WgXcQ".to_string());
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), expected);
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ"), expected);
    }

    #[test]
    fn test_other_url_shapes() {
        let expected = Some("dQw4w9WgXcQ".to_string());
        assert_eq!(extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"), expected);
        assert_eq!(extract_video_id("https://www.youtube.com/v/dQw4w9WgXcQ?fs=1"), expected);
        assert_eq!(extract_video_id("https://www.youtube.com/u/w/dQw4w9WgXcQ"), expected);
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ"),
            expected
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"),
            expected
        );
    }

    #[test]
    fn test_non_matching_urls() {
        assert_eq!(extract_video_id("https://example.com/video"), None);
        assert_eq!(extract_video_id(""), None);
        assert_eq!(extract_video_id("https://youtu.be/short"), None);
        assert_eq!(extract_video_id("not a url at all"), None);
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("a b&c"), "a%20b%26c");
        assert_eq!(encode_uri_component("it's (ok)!"), "it's%20(ok)!");
        assert_eq!(encode_uri_component("강남"), "%EA%B0%95%EB%82%A8");
    }

    #[test]
    fn test_map_urls() {
        assert_eq!(
            MapProvider::Naver.search_url("1 Main St"),
            "https://map.naver.com/v5/search/1%20Main%20St"
        );
        assert_eq!(
            MapProvider::Kakao.search_url("1 Main St"),
            "https://map.kakao.com/link/search/1%20Main%20St"
        );
    }

    #[test]
    fn test_social_fallback() {
        assert_eq!(social_badge(&SocialPlatform::Youtube).label, "Youtube");
        assert_eq!(social_badge(&SocialPlatform::Other("tiktok".into())).label, "Link");
        assert_eq!(social_badge(&SocialPlatform::Website), GENERIC_BADGE);
    }
}
