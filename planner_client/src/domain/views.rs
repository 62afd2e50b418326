// Pages the client can show, keyed by their route path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Login,
    Signup,
    Planner,
    Hotels,
    Dashboard,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Home,
        View::Login,
        View::Signup,
        View::Planner,
        View::Hotels,
        View::Dashboard,
    ];

    pub fn path(self) -> &'static str {
        match self {
            View::Home => "/",
            View::Login => "/login",
            View::Signup => "/signup",
            View::Planner => "/planner",
            View::Hotels => "/hotels",
            View::Dashboard => "/dashboard",
        }
    }

    // Views that render only for a signed-in user.
    pub fn is_protected(self) -> bool {
        matches!(self, View::Planner | View::Hotels | View::Dashboard)
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Login => "Login",
            View::Signup => "Signup",
            View::Planner => "Plan a Trip",
            View::Hotels => "Hotels",
            View::Dashboard => "Dashboard",
        }
    }

    // Matches a location against the route table.
    // Query strings, fragments and a trailing slash are ignored.
    pub fn from_path(path: &str) -> Option<View> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        View::ALL.into_iter().find(|view| view.path() == path)
    }
}
