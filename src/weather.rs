use crate::config::Config;
use crate::error::FetchError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// OpenWeatherMap current-weather response, only the fields we use
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiWeatherResponse {
    #[serde(default)]
    pub weather: Vec<ApiCondition>,
    pub main: ApiMain,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCondition {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMain {
    pub temp: ApiNumber,
    pub humidity: u32,
}

/// A JSON number that remembers whether it was written without a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiNumber {
    Integer(i64),
    Float(f64),
}

impl ApiNumber {
    pub fn value(self) -> f64 {
        match self {
            ApiNumber::Integer(value) => value as f64,
            ApiNumber::Float(value) => value,
        }
    }
}

/// Normalized weather for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct CityWeather {
    pub name: String,
    /// Lower-cased primary category, e.g. "rain".
    pub condition: String,
    /// Degrees Celsius.
    pub temperature: f64,
    /// The API sent the temperature as a JSON integer.
    pub temperature_is_integer: bool,
    pub humidity: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherResult {
    Found(CityWeather),
    NotFound { name: String },
}

impl WeatherResult {
    pub fn name(&self) -> &str {
        match self {
            WeatherResult::Found(weather) => &weather.name,
            WeatherResult::NotFound { name } => name,
        }
    }
}

impl CityWeather {
    fn from_response(requested: &str, response: ApiWeatherResponse) -> Result<Self, FetchError> {
        let condition = response
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Parse("response has no weather entries".to_string()))?;

        let name = response
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| requested.to_string());

        Ok(Self {
            name,
            condition: condition.main.to_lowercase(),
            temperature: response.main.temp.value(),
            temperature_is_integer: matches!(response.main.temp, ApiNumber::Integer(_)),
            humidity: response.main.humidity,
            description: condition.description,
        })
    }
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Looks up one city. Every failure is reported as `NotFound` carrying the
    /// requested name; the underlying cause only goes to the log.
    pub async fn fetch(&self, city: &str) -> WeatherResult {
        match self.try_fetch(city).await {
            Ok(weather) => {
                tracing::info!(
                    city,
                    resolved = %weather.name,
                    condition = %weather.condition,
                    "Fetched weather"
                );
                WeatherResult::Found(weather)
            }
            Err(FetchError::Status(status)) => {
                tracing::warn!(city, %status, "Weather API rejected lookup");
                WeatherResult::NotFound {
                    name: city.to_string(),
                }
            }
            Err(err) => {
                tracing::warn!(city, error = %err, "Weather lookup failed");
                WeatherResult::NotFound {
                    name: city.to_string(),
                }
            }
        }
    }

    /// Fetches each city in turn, preserving input order.
    pub async fn fetch_all(&self, cities: &[String]) -> Vec<WeatherResult> {
        let mut results = Vec::with_capacity(cities.len());
        for city in cities {
            results.push(self.fetch(city).await);
        }
        results
    }

    async fn try_fetch(&self, city: &str) -> Result<CityWeather, FetchError> {
        tracing::debug!(city, url = %self.api_url, "Fetching weather");
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response
            .json::<ApiWeatherResponse>()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;
        CityWeather::from_response(city, body)
    }
}

/// Splits a comma-separated search into trimmed, non-empty city names.
pub fn parse_cities(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|city| !city.is_empty())
        .map(str::to_string)
        .collect()
}
