/// Pages reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Dashboard,
    AskAi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationRoute {
    pub route: Route,
    pub title: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
}

pub static ROUTES: [NavigationRoute; 2] = [
    NavigationRoute {
        route: Route::Dashboard,
        title: "Dashboard",
        path: "/dashboard",
        icon: "📊",
    },
    NavigationRoute {
        route: Route::AskAi,
        title: "Ask AI",
        path: "/ask-ai",
        icon: "💬",
    },
];

impl Route {
    pub fn entry(self) -> &'static NavigationRoute {
        match self {
            Route::Dashboard => &ROUTES[0],
            Route::AskAi => &ROUTES[1],
        }
    }

    pub fn path(self) -> &'static str {
        self.entry().path
    }

    /// Resolves a location, falling back to the dashboard for unknown paths.
    pub fn resolve(path: &str) -> Route {
        ROUTES
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.route)
            .unwrap_or_else(|| {
                log::warn!("Unknown route `{path}`; opening the dashboard");
                Route::default()
            })
    }
}

pub fn is_active(entry: &NavigationRoute, current_path: &str) -> bool {
    entry.path == current_path
}
