//! Shared application state injected into handlers.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::application::services::WeatherFacade;
use crate::infrastructure::cache::ObservableCache;

#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<WeatherFacade>,
    /// The same store the facade writes through; kept here for health reporting.
    pub cache: Arc<ObservableCache>,
    /// Cancelled on shutdown. Handlers hand child tokens to the facade so pending
    /// retries stop waiting once the server is draining.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(weather: Arc<WeatherFacade>, cache: Arc<ObservableCache>) -> Self {
        Self {
            weather,
            cache,
            shutdown: CancellationToken::new(),
        }
    }
}
