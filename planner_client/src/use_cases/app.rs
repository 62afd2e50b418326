use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::{Session, View};
use crate::use_cases::api::ApiClient;
use crate::use_cases::auth_forms::{LoginView, SignupView};
use crate::use_cases::dashboard::DashboardView;
use crate::use_cases::guard::{self, Resolution};
use crate::use_cases::hotels::HotelsView;
use crate::use_cases::planner::PlannerView;
use crate::use_cases::session::SessionStore;

/// A navigation request, optionally carrying a city for the hotels page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub path: String,
    pub city: Option<String>,
}

impl Navigation {
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            city: None,
        }
    }

    pub fn to(view: View) -> Self {
        Self::path(view.path())
    }

    pub fn with_city(view: View, city: &str) -> Self {
        Self {
            path: view.path().to_string(),
            city: Some(city.to_string()),
        }
    }
}

/// Shared collaborators handed to every view. Created once at start-up.
#[derive(Clone)]
pub struct AppContext {
    pub session: Arc<SessionStore>,
    pub api: ApiClient,
}

/// Current page plus the state of every view controller.
///
/// A view's state is rebuilt each time it is navigated to, which also drops
/// results of requests issued by the previous instance.
pub struct App {
    pub ctx: AppContext,
    pub planner: PlannerView,
    pub hotels: HotelsView,
    pub dashboard: DashboardView,
    pub login: LoginView,
    pub signup: SignupView,
    current: View,
    session_rx: watch::Receiver<Option<Session>>,
}

impl App {
    pub fn new(ctx: AppContext) -> Self {
        let session_rx = ctx.session.subscribe();
        Self {
            ctx,
            planner: PlannerView::default(),
            hotels: HotelsView::default(),
            dashboard: DashboardView::default(),
            login: LoginView::default(),
            signup: SignupView::default(),
            current: View::Home,
            session_rx,
        }
    }

    pub fn current(&self) -> View {
        self.current
    }

    #[tracing::instrument(name = "navigate", skip_all, fields(path = %navigation.path))]
    pub async fn navigate(&mut self, navigation: Navigation) -> Resolution {
        let session = self.ctx.session.current_session();
        let resolution = guard::resolve(&navigation.path, session.as_ref());

        let city = match resolution {
            Resolution::Render(_) => navigation.city,
            Resolution::Redirect(target) => {
                tracing::info!(to = target.path(), "navigation redirected.");
                None
            }
        };
        let view = resolution.view();
        self.current = view;
        self.mount(view, city).await;
        resolution
    }

    // Follows a navigation produced by a view action, if any.
    pub async fn follow(&mut self, navigation: Option<Navigation>) -> Option<Resolution> {
        match navigation {
            Some(navigation) => Some(self.navigate(navigation).await),
            None => None,
        }
    }

    /// Re-runs the guard for the page on screen when the session changed
    /// since the last call. Returns the redirect, if one happened.
    pub async fn sync_session(&mut self) -> Option<Resolution> {
        if !self.session_rx.has_changed().unwrap_or(false) {
            return None;
        }
        let session = self.session_rx.borrow_and_update().clone();

        match guard::resolve(self.current.path(), session.as_ref()) {
            Resolution::Render(_) => None,
            Resolution::Redirect(_) => Some(self.navigate(Navigation::to(self.current)).await),
        }
    }

    async fn mount(&mut self, view: View, city: Option<String>) {
        match view {
            View::Home => {}
            View::Login => self.login = LoginView::default(),
            View::Signup => self.signup = SignupView::default(),
            View::Planner => self.planner = PlannerView::default(),
            View::Hotels => {
                self.hotels = HotelsView::default();
                self.hotels.mount(city, &self.ctx.api).await;
            }
            View::Dashboard => {
                self.dashboard = DashboardView::default();
                self.dashboard.load(&self.ctx.api, &self.ctx.session).await;
            }
        }
    }
}
