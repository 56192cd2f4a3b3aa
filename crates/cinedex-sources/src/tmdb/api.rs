use cinedex_models::Category;

/// Path and query parameters of one upstream call, without credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl Endpoint {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.params.push((name.to_string(), value.to_string()));
        self
    }

    fn page(self, page: u32) -> Self {
        self.param("page", page.max(1))
    }
}

pub fn category(category: Category, page: u32) -> Endpoint {
    Endpoint::new(category.endpoint()).page(page)
}

pub fn search_movies(query: &str, page: u32, include_adult: bool) -> Endpoint {
    Endpoint::new("/search/movie")
        .param("query", query)
        .page(page)
        .param("include_adult", include_adult)
}

pub fn movie_details(movie_id: u64) -> Endpoint {
    Endpoint::new(format!("/movie/{}", movie_id)).param("append_to_response", "credits,videos,similar")
}

pub fn discover_by_genre(genre_id: u64, page: u32) -> Endpoint {
    Endpoint::new("/discover/movie")
        .param("with_genres", genre_id)
        .page(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_endpoint() {
        let endpoint = category(Category::TopRated, 3);
        assert_eq!(endpoint.path, "/movie/top_rated");
        assert_eq!(endpoint.params, vec![("page".to_string(), "3".to_string())]);
    }

    #[test]
    fn test_page_zero_is_first_page() {
        assert_eq!(category(Category::Popular, 0).params[0].1, "1");
    }

    #[test]
    fn test_search_endpoint() {
        let endpoint = search_movies("blade runner", 1, false);
        assert_eq!(endpoint.path, "/search/movie");
        assert!(endpoint.params.contains(&("query".to_string(), "blade runner".to_string())));
        assert!(endpoint.params.contains(&("include_adult".to_string(), "false".to_string())));
    }

    #[test]
    fn test_details_append_related_data() {
        let endpoint = movie_details(550);
        assert_eq!(endpoint.path, "/movie/550");
        assert_eq!(
            endpoint.params,
            vec![("append_to_response".to_string(), "credits,videos,similar".to_string())]
        );
    }

    #[test]
    fn test_discover_by_genre() {
        let endpoint = discover_by_genre(878, 2);
        assert_eq!(endpoint.path, "/discover/movie");
        assert!(endpoint.params.contains(&("with_genres".to_string(), "878".to_string())));
    }
}
