//! Role-based route tables
//!
//! Each role gets its own fixed table of reachable pages. The table is
//! picked by an exhaustive match on [`Role`], so adding a role without a
//! table does not compile.

use serde::Serialize;

use crate::models::Role;

/// Screens of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    SignUp,
    SignIn,
    Movies,
    MovieDetails,
    Profile,
    Watchlist,
    Reviews,
    AdminMovies,
    NotFound,
}

impl Page {
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::SignUp => "sign-up",
            Page::SignIn => "sign-in",
            Page::Movies => "movies",
            Page::MovieDetails => "movie-details",
            Page::Profile => "profile",
            Page::Watchlist => "watchlist",
            Page::Reviews => "reviews",
            Page::AdminMovies => "admin-movies",
            Page::NotFound => "not-found",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a route leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Target {
    Page(Page),
    /// Replace the location with another path of the same table
    Redirect(&'static str),
}

/// One `(pattern, target)` entry. A `:name` segment matches any single
/// non-empty path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: &'static str,
    pub target: Target,
}

const fn page(path: &'static str, page: Page) -> Route {
    Route {
        path,
        target: Target::Page(page),
    }
}

const GUEST_ROUTES: &[Route] = &[
    page("/signup", Page::SignUp),
    page("/signin", Page::SignIn),
    page("/movies", Page::Movies),
];

const USER_ROUTES: &[Route] = &[
    page("/movies", Page::Movies),
    page("/movies/:id", Page::MovieDetails),
    page("/account", Page::Profile),
    page("/account/profile", Page::Profile),
    page("/account/watchlist", Page::Watchlist),
    page("/account/reviews", Page::Reviews),
    Route {
        path: "/signin",
        target: Target::Redirect("/account/profile"),
    },
];

const ADMIN_ROUTES: &[Route] = &[page("/movies", Page::AdminMovies)];

/// Result of resolving a location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub page: Page,
    /// Value bound to a `:id` segment
    pub id: Option<String>,
    /// Set when the location was redirected before matching
    pub redirected_to: Option<&'static str>,
}

/// Route table variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteTable {
    Guest,
    User,
    Admin,
}

impl RouteTable {
    /// Table for a role; a missing identity is a guest
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => RouteTable::Admin,
            Role::User => RouteTable::User,
            Role::Guest => RouteTable::Guest,
        }
    }

    pub fn routes(&self) -> &'static [Route] {
        match self {
            RouteTable::Guest => GUEST_ROUTES,
            RouteTable::User => USER_ROUTES,
            RouteTable::Admin => ADMIN_ROUTES,
        }
    }

    /// Match `path` against this table.
    ///
    /// Query strings and trailing slashes are ignored. Redirects are
    /// followed once. Anything unmatched resolves to [`Page::NotFound`].
    pub fn resolve(&self, path: &str) -> RouteMatch {
        let segments = split_path(path);

        for route in self.routes() {
            let Some(id) = match_pattern(route.path, &segments) else {
                continue;
            };
            match route.target {
                Target::Page(page) => {
                    return RouteMatch {
                        page,
                        id,
                        redirected_to: None,
                    }
                }
                Target::Redirect(to) => {
                    let mut next = self.resolve_direct(to);
                    next.redirected_to = Some(to);
                    return next;
                }
            }
        }

        RouteMatch {
            page: Page::NotFound,
            id: None,
            redirected_to: None,
        }
    }

    /// Match without following redirects
    fn resolve_direct(&self, path: &str) -> RouteMatch {
        let segments = split_path(path);
        for route in self.routes() {
            if let (Some(id), Target::Page(page)) =
                (match_pattern(route.path, &segments), route.target)
            {
                return RouteMatch {
                    page,
                    id,
                    redirected_to: None,
                };
            }
        }
        RouteMatch {
            page: Page::NotFound,
            id: None,
            redirected_to: None,
        }
    }

    /// Whether any route in this table renders `page`
    pub fn allows(&self, page: Page) -> bool {
        self.routes()
            .iter()
            .any(|r| r.target == Target::Page(page))
    }

    /// Landing page path for the table
    pub fn home(&self) -> &'static str {
        match self {
            RouteTable::Guest => "/signin",
            RouteTable::User | RouteTable::Admin => "/movies",
        }
    }
}

impl std::fmt::Display for RouteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteTable::Guest => write!(f, "guest"),
            RouteTable::User => write!(f, "user"),
            RouteTable::Admin => write!(f, "admin"),
        }
    }
}

fn split_path(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or("");
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// `Some(binding)` when `pattern` matches; the binding is the `:param`
/// value if the pattern has one
fn match_pattern(pattern: &str, segments: &[&str]) -> Option<Option<String>> {
    let parts = split_path(pattern);
    if parts.len() != segments.len() {
        return None;
    }

    let mut binding = None;
    for (part, segment) in parts.iter().zip(segments) {
        if part.starts_with(':') {
            binding = Some((*segment).to_string());
        } else if part != segment {
            return None;
        }
    }
    Some(binding)
}
