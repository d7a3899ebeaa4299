//! Shared application state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::api::fields::FieldRecord;
use crate::clients::meteostat::MeteostatClient;
use crate::clients::open_meteo::OpenMeteoClient;
use crate::clients::{ForecastPrecipProvider, HistoricalPrecipProvider, ProviderError};
use crate::config::Settings;

/// Keyed in-memory store for field records, injected into the handlers
/// that need it, not held in a process-wide singleton.
pub type FieldStore = Arc<RwLock<HashMap<Uuid, FieldRecord>>>;

/// State shared across request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Observed-precipitation provider.
    pub historical: Arc<dyn HistoricalPrecipProvider>,
    /// Forecast-precipitation provider.
    pub forecast: Arc<dyn ForecastPrecipProvider>,
    /// Field registry. Lives and dies with the process.
    pub fields: FieldStore,
}

impl AppState {
    /// Wires the real provider clients from the runtime settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, ProviderError> {
        Ok(Self {
            historical: Arc::new(MeteostatClient::from_settings(settings)?),
            forecast: Arc::new(OpenMeteoClient::from_settings(settings)?),
            fields: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Builds a state around arbitrary providers, for tests.
    #[cfg(test)]
    pub fn with_providers(
        historical: Arc<dyn HistoricalPrecipProvider>,
        forecast: Arc<dyn ForecastPrecipProvider>,
    ) -> Self {
        Self {
            historical,
            forecast,
            fields: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}
