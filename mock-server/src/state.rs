use std::sync::Arc;

use records_core::{RecordStore, WeatherClient, WeatherError};
use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::fetcher::{ReqwestFetcher, WeatherFetcher};
use crate::weather_service::WeatherService;

/// Shared handle to the record store. Reads share the lock; each mutation
/// holds the write lock for its whole duration.
pub type Db = Arc<RwLock<RecordStore>>;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub weather: Arc<WeatherService>,
}

impl AppState {
    pub fn new(store: RecordStore, weather: WeatherService) -> Self {
        Self {
            db: Arc::new(RwLock::new(store)),
            weather: Arc::new(weather),
        }
    }

    /// Seeded store plus a reqwest-backed weather service.
    pub fn from_config(config: &ServerConfig) -> Result<Self, WeatherError> {
        let client = WeatherClient::new(&config.weather_base_url, &config.weather_api_key);
        let fetcher = ReqwestFetcher::new(config.weather_timeout())?;
        Ok(Self::with_fetcher(client, Arc::new(fetcher)))
    }

    /// Seeded store with a caller-supplied fetcher.
    pub fn with_fetcher(client: WeatherClient, fetcher: Arc<dyn WeatherFetcher>) -> Self {
        Self::new(RecordStore::seeded(), WeatherService::new(client, fetcher))
    }
}
