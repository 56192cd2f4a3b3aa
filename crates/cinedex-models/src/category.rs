use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Curated movie lists offered on the home screen
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Trending,
    #[default]
    Popular,
    TopRated,
    Upcoming,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Popular,
        Category::Trending,
        Category::TopRated,
        Category::Upcoming,
    ];

    /// Upstream endpoint path for this list
    pub fn endpoint(&self) -> &'static str {
        match self {
            Category::Trending => "/trending/movie/week",
            Category::Popular => "/movie/popular",
            Category::TopRated => "/movie/top_rated",
            Category::Upcoming => "/movie/upcoming",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Category::Trending => "trending",
            Category::Popular => "popular",
            Category::TopRated => "top_rated",
            Category::Upcoming => "upcoming",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Trending => "Trending",
            Category::Popular => "Popular",
            Category::TopRated => "Top Rated",
            Category::Upcoming => "Upcoming",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "trending" => Ok(Category::Trending),
            "popular" => Ok(Category::Popular),
            "top_rated" | "toprated" => Ok(Category::TopRated),
            "upcoming" => Ok(Category::Upcoming),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}
