use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A movie as returned by the list, search and discover endpoints.
///
/// Field names follow the upstream JSON so a stored value can be read back
/// with the same shape the API produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub release_date: Option<String>, // upstream sends "" when unknown
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
    #[serde(default)]
    pub popularity: f64,
}

impl MovieSummary {
    /// Minimal summary with only an id and a title
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            original_title: None,
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            vote_average: 0.0,
            vote_count: 0,
            release_date: None,
            genre_ids: Vec::new(),
            original_language: None,
            popularity: 0.0,
        }
    }

    /// Parsed release date, `None` for missing or malformed dates
    pub fn release(&self) -> Option<NaiveDate> {
        self.release_date
            .as_deref()
            .filter(|s| !s.is_empty())
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }

    pub fn release_year(&self) -> Option<i32> {
        self.release().map(|d| d.year())
    }

    /// Title with the release year appended when known, e.g. "Alien (1979)"
    pub fn display_title(&self) -> String {
        match self.release_year() {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_list_item() {
        let json = r#"{
            "adult": false,
            "backdrop_path": "/back.jpg",
            "genre_ids": [28, 12],
            "id": 550,
            "original_language": "en",
            "original_title": "Fight Club",
            "overview": "A ticking-time-bomb insomniac...",
            "popularity": 61.4,
            "poster_path": "/poster.jpg",
            "release_date": "1999-10-15",
            "title": "Fight Club",
            "video": false,
            "vote_average": 8.4,
            "vote_count": 26280
        }"#;

        let movie: MovieSummary = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 550);
        assert_eq!(movie.genre_ids, vec![28, 12]);
        assert_eq!(movie.release_year(), Some(1999));
        assert_eq!(movie.display_title(), "Fight Club (1999)");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let movie: MovieSummary = serde_json::from_str(r#"{"id": 1, "title": "Untitled"}"#).unwrap();
        assert_eq!(movie.vote_average, 0.0);
        assert!(movie.poster_path.is_none());
        assert!(movie.genre_ids.is_empty());
    }

    #[test]
    fn test_empty_or_malformed_release_date() {
        let mut movie = MovieSummary::new(1, "Soon");
        movie.release_date = Some(String::new());
        assert_eq!(movie.release_year(), None);
        assert_eq!(movie.display_title(), "Soon");

        movie.release_date = Some("2025-13-40".to_string());
        assert_eq!(movie.release_year(), None);
    }
}
