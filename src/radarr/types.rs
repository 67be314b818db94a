use serde::Deserialize;

/// A movie record as returned by Radarr's `/api/v3/movie` endpoint.
///
/// Only the fields marquee consumes are modelled; Radarr returns far more.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarrMovie {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub tmdb_id: Option<i64>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    /// Whether Radarr has a downloaded file for this movie.
    #[serde(default)]
    pub has_file: bool,
    #[serde(default)]
    pub images: Vec<RadarrImage>,
}

/// One artwork reference attached to a Radarr movie.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarrImage {
    #[serde(default)]
    pub cover_type: String,
    /// Path relative to the Radarr instance.
    #[serde(default)]
    pub url: Option<String>,
    /// Fully-qualified upstream URL.
    #[serde(default)]
    pub remote_url: Option<String>,
}

impl RadarrMovie {
    /// URL of the first poster-tagged image, preferring the remote URL over
    /// the instance-local path when both are present.
    pub fn poster_url(&self) -> Option<&str> {
        self.images
            .iter()
            .find(|img| img.cover_type.eq_ignore_ascii_case("poster"))
            .and_then(|img| {
                img.remote_url
                    .as_deref()
                    .filter(|u| !u.is_empty())
                    .or(img.url.as_deref().filter(|u| !u.is_empty()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(cover_type: &str, url: Option<&str>, remote_url: Option<&str>) -> RadarrImage {
        RadarrImage {
            cover_type: cover_type.to_string(),
            url: url.map(String::from),
            remote_url: remote_url.map(String::from),
        }
    }

    fn movie(images: Vec<RadarrImage>) -> RadarrMovie {
        RadarrMovie {
            id: 1,
            title: "Test".into(),
            year: None,
            tmdb_id: None,
            imdb_id: None,
            has_file: true,
            images,
        }
    }

    #[test]
    fn poster_prefers_remote_url() {
        let m = movie(vec![image(
            "poster",
            Some("/local/poster.jpg"),
            Some("http://remote/poster.jpg"),
        )]);
        assert_eq!(m.poster_url(), Some("http://remote/poster.jpg"));
    }

    #[test]
    fn poster_falls_back_to_local_url() {
        let m = movie(vec![image("poster", Some("/local/poster.jpg"), None)]);
        assert_eq!(m.poster_url(), Some("/local/poster.jpg"));
    }

    #[test]
    fn cover_type_match_is_case_insensitive() {
        let m = movie(vec![image("Poster", None, Some("http://remote/p.jpg"))]);
        assert_eq!(m.poster_url(), Some("http://remote/p.jpg"));
    }

    #[test]
    fn non_poster_images_are_ignored() {
        let m = movie(vec![
            image("fanart", None, Some("http://remote/fanart.jpg")),
            image("poster", None, Some("http://remote/poster.jpg")),
        ]);
        assert_eq!(m.poster_url(), Some("http://remote/poster.jpg"));
    }

    #[test]
    fn no_poster_image_yields_none() {
        let m = movie(vec![image("banner", None, Some("http://remote/b.jpg"))]);
        assert_eq!(m.poster_url(), None);
    }

    #[test]
    fn empty_urls_are_treated_as_absent() {
        let m = movie(vec![image("poster", Some(""), Some(""))]);
        assert_eq!(m.poster_url(), None);
    }
}
