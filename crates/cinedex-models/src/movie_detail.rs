use serde::{Deserialize, Serialize};
use std::ops::Deref;

use crate::movie::MovieSummary;
use crate::page::ResultPage;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
}

impl Video {
    pub fn is_youtube_trailer(&self) -> bool {
        self.video_type == "Trailer" && self.site == "YouTube"
    }

    /// Watch URL for YouTube-hosted videos
    pub fn youtube_url(&self) -> Option<String> {
        (self.site == "YouTube").then(|| format!("https://www.youtube.com/watch?v={}", self.key))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

/// Full movie record from `/movie/{id}` with credits, videos and similar
/// titles appended.
///
/// The summary fields are flattened so the JSON shape matches the upstream
/// payload. Every detail-only field defaults, which lets a plain summary be
/// stored wherever a detail is expected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub credits: Credits,
    #[serde(default)]
    pub videos: VideoList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar: Option<ResultPage<MovieSummary>>,
}

impl MovieDetail {
    /// First YouTube trailer, if any
    pub fn trailer(&self) -> Option<&Video> {
        self.videos.results.iter().find(|v| v.is_youtube_trailer())
    }

    pub fn top_cast(&self, n: usize) -> &[CastMember] {
        let cast = &self.credits.cast;
        &cast[..n.min(cast.len())]
    }

    pub fn similar_movies(&self) -> &[MovieSummary] {
        self.similar.as_ref().map(|p| p.results.as_slice()).unwrap_or(&[])
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }
}

impl From<MovieSummary> for MovieDetail {
    fn from(summary: MovieSummary) -> Self {
        Self {
            summary,
            genres: Vec::new(),
            runtime: None,
            budget: 0,
            revenue: 0,
            status: None,
            tagline: None,
            homepage: None,
            imdb_id: None,
            production_companies: Vec::new(),
            credits: Credits::default(),
            videos: VideoList::default(),
            similar: None,
        }
    }
}

impl Deref for MovieDetail {
    type Target = MovieSummary;

    fn deref(&self) -> &Self::Target {
        &self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL_JSON: &str = r#"{
        "id": 603,
        "title": "The Matrix",
        "original_title": "The Matrix",
        "overview": "Set in the 22nd century...",
        "poster_path": "/matrix.jpg",
        "backdrop_path": null,
        "release_date": "1999-03-30",
        "vote_average": 8.2,
        "vote_count": 25000,
        "runtime": 136,
        "budget": 63000000,
        "revenue": 463517383,
        "status": "Released",
        "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
        "production_companies": [{"id": 79, "name": "Village Roadshow Pictures", "logo_path": null, "origin_country": "US"}],
        "credits": {"cast": [
            {"id": 6384, "name": "Keanu Reeves", "character": "Neo", "profile_path": "/keanu.jpg", "order": 0},
            {"id": 2975, "name": "Laurence Fishburne", "character": "Morpheus", "profile_path": null, "order": 1}
        ]},
        "videos": {"results": [
            {"key": "abc", "name": "Featurette", "site": "YouTube", "type": "Featurette"},
            {"key": "vimeo1", "name": "Trailer", "site": "Vimeo", "type": "Trailer"},
            {"key": "m8e-FF8MsqU", "name": "Official Trailer", "site": "YouTube", "type": "Trailer"}
        ]},
        "similar": {"page": 1, "results": [{"id": 604, "title": "The Matrix Reloaded"}], "total_pages": 1, "total_results": 1}
    }"#;

    #[test]
    fn test_decode_appended_detail() {
        let detail: MovieDetail = serde_json::from_str(DETAIL_JSON).unwrap();
        assert_eq!(detail.id, 603);
        assert_eq!(detail.runtime, Some(136));
        assert_eq!(detail.genre_names(), vec!["Action", "Science Fiction"]);
        assert_eq!(detail.top_cast(1)[0].character, "Neo");
        assert_eq!(detail.top_cast(10).len(), 2);
        assert_eq!(detail.similar_movies()[0].id, 604);
    }

    #[test]
    fn test_similar_page_without_results() {
        let json = r#"{"id": 603, "title": "The Matrix", "similar": {"page": 1, "total_pages": 0}}"#;
        let detail: MovieDetail = serde_json::from_str(json).unwrap();
        let similar = detail.similar.as_ref().unwrap();
        assert!(similar.is_empty());
        assert!(detail.similar_movies().is_empty());
    }

    #[test]
    fn test_trailer_requires_youtube_trailer() {
        let detail: MovieDetail = serde_json::from_str(DETAIL_JSON).unwrap();
        let trailer = detail.trailer().unwrap();
        assert_eq!(trailer.key, "m8e-FF8MsqU");
        assert_eq!(
            trailer.youtube_url().as_deref(),
            Some("https://www.youtube.com/watch?v=m8e-FF8MsqU")
        );
    }

    #[test]
    fn test_summary_converts_to_detail() {
        let detail = MovieDetail::from(MovieSummary::new(7, "Se7en"));
        assert_eq!(detail.id, 7);
        assert!(detail.trailer().is_none());
        assert!(detail.similar_movies().is_empty());

        // a summary-shaped JSON value reads back as a detail
        let json = serde_json::to_string(&detail).unwrap();
        let back: MovieDetail = serde_json::from_str(&json).unwrap();
        assert_eq!(back, detail);
    }
}
