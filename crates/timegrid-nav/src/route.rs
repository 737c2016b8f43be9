//! Static route declarations.

use serde::{Deserialize, Serialize};

use timegrid_entity::UserRole;

/// Well-known route paths.
pub mod paths {
    /// The login page.
    pub const LOGIN: &str = "/login";
    /// The default landing page.
    pub const DASHBOARD: &str = "/dashboard";
}

/// Per-route authorization and display metadata. Declared once per route,
/// never mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteMeta {
    /// Whether the route requires an authenticated session.
    #[serde(default)]
    pub requires_auth: bool,
    /// Role allow-list; `None` means any authenticated role.
    #[serde(default)]
    pub roles: Option<Vec<UserRole>>,
    /// Display title applied by the shell.
    #[serde(default)]
    pub title: Option<String>,
}

/// One entry of the route table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// Exact path of this route.
    pub path: String,
    /// Stable route name.
    pub name: String,
    /// Authorization and display metadata.
    #[serde(default)]
    pub meta: RouteMeta,
    /// Unconditional redirect target; set only for alias routes.
    #[serde(default)]
    pub redirect: Option<String>,
}

impl Route {
    /// A page route with metadata.
    fn page(path: &str, name: &str, meta: RouteMeta) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            meta,
            redirect: None,
        }
    }

    /// An alias route that only redirects.
    fn alias(path: &str, target: &str) -> Self {
        Self {
            path: path.to_string(),
            name: String::new(),
            meta: RouteMeta::default(),
            redirect: Some(target.to_string()),
        }
    }
}

/// The application's static route table.
///
/// Lookup is by exact path; unmatched paths resolve to the fallback
/// redirect.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    /// Redirect target for unmatched paths.
    fallback: String,
}

impl RouteTable {
    /// Build a table from explicit routes.
    pub fn new(routes: Vec<Route>, fallback: impl Into<String>) -> Self {
        Self {
            routes,
            fallback: fallback.into(),
        }
    }

    /// Find a route by exact path.
    pub fn find(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == path)
    }

    /// Redirect target for paths not in the table.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// All declared routes, in declaration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

impl Default for RouteTable {
    /// The scheduling application's route table.
    fn default() -> Self {
        let auth = |title: &str| RouteMeta {
            requires_auth: true,
            roles: None,
            title: Some(title.to_string()),
        };
        let curated = |title: &str| RouteMeta {
            requires_auth: true,
            roles: Some(vec![UserRole::Admin, UserRole::Methodist]),
            title: Some(title.to_string()),
        };

        let routes = vec![
            Route::alias("/", paths::DASHBOARD),
            Route::page(
                paths::LOGIN,
                "login",
                RouteMeta {
                    requires_auth: false,
                    roles: None,
                    title: Some("Sign in".to_string()),
                },
            ),
            Route::page(paths::DASHBOARD, "dashboard", auth("Dashboard")),
            Route::page("/schedule", "schedule", auth("Schedule")),
            Route::page("/generation", "generation", curated("Schedule generation")),
            Route::page("/reports", "reports", auth("Reports")),
            Route::alias("/catalog", "/catalog/groups"),
            Route::page("/catalog/groups", "groups", curated("Groups")),
            Route::page("/catalog/teachers", "teachers", curated("Teachers")),
            Route::page("/catalog/courses", "courses", curated("Courses")),
            Route::page("/catalog/rooms", "rooms", curated("Rooms")),
            Route::page("/catalog/slots", "time-slots", curated("Time slots")),
            Route::page("/catalog/enrollments", "enrollments", curated("Enrollments")),
            Route::page(
                "/catalog/teacher-availability",
                "teacher-availability",
                curated("Teacher availability"),
            ),
        ];

        Self::new(routes, paths::DASHBOARD)
    }
}
