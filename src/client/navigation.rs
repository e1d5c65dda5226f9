//! Client-side location and the login redirect rule.

use std::sync::Mutex;

use crate::config::RoutesConfig;

/// Current location plus forced navigation, as seen by the HTTP client.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn redirect(&self, path: &str);
}

/// Navigator that tracks the location in memory and records redirects.
///
/// Used by the CLI (which has no browser location) and by tests.
#[derive(Debug, Default)]
pub struct MemoryNavigator {
    path: Mutex<String>,
    redirects: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Mutex::new(path.into()),
            redirects: Mutex::new(Vec::new()),
        }
    }

    pub fn set_path(&self, path: impl Into<String>) {
        if let Ok(mut current) = self.path.lock() {
            *current = path.into();
        }
    }

    /// Every redirect issued so far, oldest first.
    pub fn redirects(&self) -> Vec<String> {
        self.redirects
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.path.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn redirect(&self, path: &str) {
        if let Ok(mut redirects) = self.redirects.lock() {
            redirects.push(path.to_string());
        }
        self.set_path(path);
    }
}

/// Which locations are login-gated, and where the login page lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePolicy {
    pub gated_prefix: String,
    pub login_path: String,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        RoutesConfig::default().into()
    }
}

impl From<RoutesConfig> for RoutePolicy {
    fn from(routes: RoutesConfig) -> Self {
        Self {
            gated_prefix: routes.gated_prefix,
            login_path: routes.login_path,
        }
    }
}

impl RoutePolicy {
    /// Redirect to login only from gated locations, and never from the login
    /// page itself (that would loop).
    pub fn should_redirect(&self, current_path: &str) -> bool {
        current_path.starts_with(&self.gated_prefix) && current_path != self.login_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_rule() {
        let policy = RoutePolicy::default();
        assert!(policy.should_redirect("/admin"));
        assert!(policy.should_redirect("/admin/agenda"));
        assert!(!policy.should_redirect("/admin/login"));
        assert!(!policy.should_redirect("/"));
        assert!(!policy.should_redirect("/display"));
    }

    #[test]
    fn test_memory_navigator_records_redirects() {
        let nav = MemoryNavigator::new("/admin/zis");
        nav.redirect("/admin/login");
        assert_eq!(nav.current_path(), "/admin/login");
        assert_eq!(nav.redirects(), vec!["/admin/login".to_string()]);
    }
}
