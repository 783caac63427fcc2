//! Catalog browsing state
//!
//! [`MovieQuery`] is the filter bar of the movie list: page, free-text
//! search, genre, year, sort order and movie type. It knows how to encode
//! itself for the backend (`to_request_params`) and for a shareable link
//! (`to_url_params`), which leaves out every value still at its default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Genres offered by the filter bar and the admin form
pub const GENRES: [&str; 19] = [
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "History",
    "Horror",
    "Music",
    "Mystery",
    "Romance",
    "Science Fiction",
    "TV Movie",
    "Thriller",
    "War",
    "Western",
];

/// How many years back the year filter reaches
pub const YEAR_SPAN: i32 = 50;

/// Most page buttons shown at once
pub const MAX_VISIBLE_PAGES: u32 = 5;

// ============================================================================
// Sort / type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Latest,
    Oldest,
    Rating,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [SortOrder::Latest, SortOrder::Oldest, SortOrder::Rating];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Latest => "latest",
            SortOrder::Oldest => "oldest",
            SortOrder::Rating => "rating",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Latest => "Latest",
            SortOrder::Oldest => "Oldest",
            SortOrder::Rating => "Highest Rated",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "latest" => Ok(SortOrder::Latest),
            "oldest" => Ok(SortOrder::Oldest),
            "rating" => Ok(SortOrder::Rating),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

/// Curated subsets of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovieType {
    #[default]
    All,
    /// Rated 4 stars and up
    Featured,
    /// Rated 3 stars and up
    Best,
}

impl MovieType {
    pub const ALL: [MovieType; 3] = [MovieType::All, MovieType::Featured, MovieType::Best];

    /// Wire value; `All` is the empty string and is never sent
    pub fn as_str(&self) -> &'static str {
        match self {
            MovieType::All => "",
            MovieType::Featured => "featured",
            MovieType::Best => "best",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MovieType::All => "All Movies",
            MovieType::Featured => "Featured (4+ stars)",
            MovieType::Best => "Best Movies (3+ stars)",
        }
    }
}

impl fmt::Display for MovieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovieType::All => f.write_str("all"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl FromStr for MovieType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(MovieType::All),
            "featured" => Ok(MovieType::Featured),
            "best" => Ok(MovieType::Best),
            _ => Err(format!("Unknown movie type: {}", s)),
        }
    }
}

// ============================================================================
// Query
// ============================================================================

/// Filter state of the movie list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieQuery {
    pub page: u32,
    pub search: String,
    pub genre: String,
    pub year: String,
    pub sort: SortOrder,
    pub kind: MovieType,
}

impl Default for MovieQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            genre: String::new(),
            year: String::new(),
            sort: SortOrder::Latest,
            kind: MovieType::All,
        }
    }
}

/// One non-default filter, as shown in the "active filters" strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveFilter {
    Search(String),
    Genre(String),
    Year(String),
    Sort(SortOrder),
    Type(MovieType),
}

impl fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveFilter::Search(s) => write!(f, "Search: \"{}\"", s),
            ActiveFilter::Genre(g) => write!(f, "Genre: {}", g),
            ActiveFilter::Year(y) => write!(f, "Year: {}", y),
            ActiveFilter::Sort(s) => write!(f, "Sort: {}", s.label()),
            ActiveFilter::Type(t) => write!(f, "Type: {}", t.label()),
        }
    }
}

impl MovieQuery {
    pub fn new() -> Self {
        Self::default()
    }

    // Every filter setter sends the list back to page 1.

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into().trim().to_string();
        self.page = 1;
    }

    pub fn set_genre(&mut self, genre: impl Into<String>) {
        self.genre = genre.into();
        self.page = 1;
    }

    pub fn set_year(&mut self, year: impl Into<String>) {
        self.year = year.into();
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
        self.page = 1;
    }

    pub fn set_kind(&mut self, kind: MovieType) {
        self.kind = kind;
        self.page = 1;
    }

    /// Jump to `page`, clamped to at least 1
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Reset every filter and the page
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Drop one active filter back to its default
    pub fn remove(&mut self, filter: &ActiveFilter) {
        match filter {
            ActiveFilter::Search(_) => self.set_search(""),
            ActiveFilter::Genre(_) => self.set_genre(""),
            ActiveFilter::Year(_) => self.set_year(""),
            ActiveFilter::Sort(_) => self.set_sort(SortOrder::Latest),
            ActiveFilter::Type(_) => self.set_kind(MovieType::All),
        }
    }

    /// Filters that differ from their defaults, in display order
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut filters = Vec::new();
        if !self.search.is_empty() {
            filters.push(ActiveFilter::Search(self.search.clone()));
        }
        if !self.genre.is_empty() {
            filters.push(ActiveFilter::Genre(self.genre.clone()));
        }
        if !self.year.is_empty() {
            filters.push(ActiveFilter::Year(self.year.clone()));
        }
        if self.sort != SortOrder::Latest {
            filters.push(ActiveFilter::Sort(self.sort));
        }
        if self.kind != MovieType::All {
            filters.push(ActiveFilter::Type(self.kind));
        }
        filters
    }

    pub fn has_active_filters(&self) -> bool {
        !self.active_filters().is_empty()
    }

    /// Query string for `GET /api/movies`
    ///
    /// `page` and `sort` are always present; the rest only when set.
    pub fn to_request_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.max(1).to_string())];
        self.push_filters(&mut params);
        params.push(("sort", self.sort.as_str().to_string()));
        if self.kind != MovieType::All {
            params.push(("type", self.kind.as_str().to_string()));
        }
        params
    }

    /// Parameters for a shareable link; defaults are left out
    pub fn to_url_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if self.page > 1 {
            params.push(("page", self.page.to_string()));
        }
        self.push_filters(&mut params);
        if self.sort != SortOrder::Latest {
            params.push(("sort", self.sort.as_str().to_string()));
        }
        if self.kind != MovieType::All {
            params.push(("type", self.kind.as_str().to_string()));
        }
        params
    }

    /// Rebuild a query from link parameters.
    ///
    /// Unknown keys are ignored. A page that is not a positive integer
    /// becomes 1, an unknown sort becomes `Latest` and an unknown type `All`.
    pub fn from_url_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut query = Self::default();
        for (key, value) in params {
            match key {
                "page" => {
                    query.page = value.trim().parse::<u32>().ok().filter(|p| *p >= 1).unwrap_or(1)
                }
                "search" => query.search = value.to_string(),
                "genre" => query.genre = value.to_string(),
                "year" => query.year = value.to_string(),
                "sort" => query.sort = value.parse().unwrap_or_default(),
                "type" => query.kind = value.parse().unwrap_or_default(),
                _ => {}
            }
        }
        query
    }

    /// `to_url_params` joined as `key=value&...`
    pub fn to_query_string(&self) -> String {
        self.to_url_params()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, encode_component(&v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn push_filters(&self, params: &mut Vec<(&'static str, String)>) {
        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        if !self.genre.is_empty() {
            params.push(("genre", self.genre.clone()));
        }
        if !self.year.is_empty() {
            params.push(("year", self.year.clone()));
        }
    }
}

fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

// ============================================================================
// Pagination / options
// ============================================================================

/// Page numbers to show as buttons.
///
/// Starts two pages before `current` (never below 1) and shows up to
/// [`MAX_VISIBLE_PAGES`] pages, stopping at `total`. Empty when there is
/// nothing to page through.
pub fn page_window(current: u32, total: u32) -> Vec<u32> {
    if total == 0 {
        return Vec::new();
    }
    let start = current.saturating_sub(MAX_VISIBLE_PAGES / 2).max(1);
    let end = total.min(start.saturating_add(MAX_VISIBLE_PAGES - 1));
    (start..=end).collect()
}

/// Years offered by the year filter, newest first
pub fn year_options(current_year: i32) -> Vec<i32> {
    (0..YEAR_SPAN).map(|offset| current_year - offset).collect()
}

/// Year options relative to the local clock
pub fn recent_years() -> Vec<i32> {
    use chrono::Datelike;
    year_options(chrono::Local::now().year())
}

/// Canonical spelling of a genre from [`GENRES`], matched case-insensitively
pub fn find_genre(name: &str) -> Option<&'static str> {
    let needle = name.trim();
    GENRES
        .iter()
        .copied()
        .find(|g| g.eq_ignore_ascii_case(needle))
}
