use std::sync::Arc;

use futures::future::join_all;
use records_core::{
    settle, BatchEntry, CitySummary, CurrentWeather, Units, WeatherClient, WeatherError,
};

use crate::fetcher::WeatherFetcher;

/// Joins the request builder with a fetcher.
pub struct WeatherService {
    client: WeatherClient,
    fetcher: Arc<dyn WeatherFetcher>,
}

impl WeatherService {
    pub fn new(client: WeatherClient, fetcher: Arc<dyn WeatherFetcher>) -> Self {
        Self { client, fetcher }
    }

    pub async fn current(&self, city: &str, units: Units) -> Result<CurrentWeather, WeatherError> {
        let request = self.client.build_current(city, units)?;
        let response = self.fetcher.execute(request).await?;
        self.client.parse_current(response)
    }

    /// Batch lookups always use metric units.
    pub async fn summary(&self, city: &str) -> Result<CitySummary, WeatherError> {
        let request = self.client.build_current(city, Units::Metric)?;
        let response = self.fetcher.execute(request).await?;
        self.client.parse_summary(response)
    }

    /// One lookup per city, all run to completion. Entries follow the order
    /// of `cities` no matter which lookup finishes first.
    pub async fn batch(&self, cities: &[String]) -> Vec<BatchEntry> {
        let results = join_all(cities.iter().map(|city| async move {
            let result = self.summary(city).await;
            if let Err(err) = &result {
                tracing::warn!(city = %city, error = %err, "batch weather lookup failed");
            }
            result
        }))
        .await;
        settle(cities, results)
    }
}
