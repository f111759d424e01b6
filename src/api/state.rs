//! Application state for the income eligibility API.

use std::sync::Arc;

use crate::config::{ConfigLoader, EngineConfig};

/// Shared application state.
///
/// Holds the read-only calculation registry shared by every request.
#[derive(Clone)]
pub struct AppState {
    config: Arc<EngineConfig>,
}

impl AppState {
    /// Creates application state from a loaded configuration.
    pub fn new(loader: ConfigLoader) -> Self {
        Self {
            config: Arc::new(loader.into_config()),
        }
    }

    /// Creates application state backed by the built-in registry.
    pub fn builtin() -> Self {
        Self {
            config: Arc::new(EngineConfig::builtin().clone()),
        }
    }

    /// Returns the calculation registry.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_registry() {
        let state = AppState::new(ConfigLoader::builtin());
        let clone = state.clone();
        assert!(std::ptr::eq(state.config(), clone.config()));
    }
}
