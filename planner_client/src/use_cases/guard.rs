use crate::domain::{Session, View};

// Decision for one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(View),
    Redirect(View),
}

impl Resolution {
    // The view that ends up on screen either way.
    pub fn view(self) -> View {
        match self {
            Resolution::Render(view) | Resolution::Redirect(view) => view,
        }
    }
}

// Decides what a navigation to `path` shows for the given session.
// Pure and synchronous; callers re-run it on every navigation and on
// every session change instead of caching the answer.
pub fn resolve(path: &str, session: Option<&Session>) -> Resolution {
    match View::from_path(path) {
        None => Resolution::Redirect(View::Home),
        Some(view) if view.is_protected() && session.is_none() => {
            Resolution::Redirect(View::Login)
        }
        Some(view) => Resolution::Render(view),
    }
}
