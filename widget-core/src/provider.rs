use crate::error::LookupError;
use crate::model::{CitySuggestion, WeatherReport};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Abstraction over the geocoding + weather HTTP endpoints.
///
/// Both calls are async and non-blocking. Failures surface as
/// [`LookupError`] values classified at the HTTP boundary, so the
/// controller never sees transport types.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Partial-name city lookup. Result ordering is preserved exactly as
    /// returned by the upstream endpoint; no client-side re-sorting.
    async fn fetch_suggestions(&self, query: &str) -> Result<Vec<CitySuggestion>, LookupError>;

    /// Current weather for an exact city name, metric units.
    async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, LookupError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use std::sync::Arc;

    #[derive(Debug)]
    struct CannedProvider;

    #[async_trait]
    impl WeatherProvider for CannedProvider {
        async fn fetch_suggestions(
            &self,
            query: &str,
        ) -> Result<Vec<CitySuggestion>, LookupError> {
            if query == "boom" {
                return Err(LookupError::suggestions("status 500"));
            }
            Ok(vec![CitySuggestion {
                name: query.to_string(),
                state: None,
                country: "GB".to_string(),
            }])
        }

        async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, LookupError> {
            Ok(WeatherReport {
                city: city.to_string(),
                country: "GB".to_string(),
                temperature_c: 10.0,
                feels_like_c: 8.0,
                humidity_pct: 80,
                pressure_hpa: 1000,
                wind_speed_mps: 5.0,
                visibility_m: None,
                description: "overcast".to_string(),
                observation_time: DateTime::from_timestamp(0, 0).expect("epoch"),
            })
        }
    }

    #[tokio::test]
    async fn calls_dispatch_through_a_shared_trait_object() {
        let provider: Arc<dyn WeatherProvider> = Arc::new(CannedProvider);

        let suggestions = provider.fetch_suggestions("lon").await.expect("suggestions");
        assert_eq!(suggestions[0].display_label(), "lon, GB");

        let report = provider.fetch_weather("London").await.expect("weather");
        assert_eq!(report.city, "London");

        let err = provider.fetch_suggestions("boom").await.unwrap_err();
        assert!(matches!(err, LookupError::Suggestions { .. }));
    }
}
