//! Page navigation

/// Moves the browser to another page
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigates by assigning `window.location.href`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

#[cfg(target_arch = "wasm32")]
impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            tracing::error!("No window available, cannot navigate to {path}");
            return;
        };

        if let Err(e) = window.location().set_href(path) {
            tracing::error!("Failed to navigate to {path}: {e:?}");
        }
    }
}
