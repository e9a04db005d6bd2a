use std::sync::Mutex;

use tracing::debug;

pub const HOME_ROUTE: &str = "/";
pub const ADMIN_PREFIX: &str = "/admin";

/// Where the kiosk UI currently is, and how to move it.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn push(&self, path: &str);
    fn replace(&self, path: &str);
    fn back(&self);
    /// Pops back to the root route and closes every open overlay.
    fn dismiss_all(&self);
}

/// Routes on which the idle timer never runs.
pub fn is_suspended_route(path: &str) -> bool {
    path == HOME_ROUTE || path.starts_with(ADMIN_PREFIX)
}

#[derive(Debug, Default)]
struct Stack {
    routes: Vec<String>,
    overlays: usize,
}

/// In-memory route stack mirroring the frontend's history.
#[derive(Debug, Default)]
pub struct KioskNavigator {
    stack: Mutex<Stack>,
}

impl KioskNavigator {
    pub fn new() -> Self {
        KioskNavigator::default()
    }

    fn with_stack<R>(&self, f: impl FnOnce(&mut Stack) -> R) -> R {
        let mut stack = self.stack.lock().unwrap_or_else(|p| p.into_inner());
        f(&mut stack)
    }

    pub fn depth(&self) -> usize {
        self.with_stack(|s| s.routes.len().max(1))
    }

    pub fn open_overlay(&self) {
        self.with_stack(|s| s.overlays += 1);
    }

    pub fn overlay_count(&self) -> usize {
        self.with_stack(|s| s.overlays)
    }
}

impl Navigator for KioskNavigator {
    fn current_path(&self) -> String {
        self.with_stack(|s| s.routes.last().cloned().unwrap_or_else(|| HOME_ROUTE.to_string()))
    }

    fn push(&self, path: &str) {
        debug!(path, "push");
        self.with_stack(|s| s.routes.push(path.to_string()));
    }

    fn replace(&self, path: &str) {
        debug!(path, "replace");
        self.with_stack(|s| {
            s.routes.pop();
            s.routes.push(path.to_string());
        });
    }

    fn back(&self) {
        self.with_stack(|s| {
            s.routes.pop();
        });
    }

    fn dismiss_all(&self) {
        self.with_stack(|s| {
            s.routes.truncate(1);
            s.overlays = 0;
        });
    }
}
