use thiserror::Error;

/// Failure taxonomy for the lookup flows.
///
/// Every variant is caught at the flow boundary and converted into a
/// sanitized user-facing message plus an assistive announcement; nothing
/// propagates past the controller. A failed request requires a new
/// user-initiated action (no retries).
#[derive(Debug, Error)]
pub enum LookupError {
    /// The submitted input had no city name before the first comma.
    #[error("no city name in input")]
    EmptyCity,

    /// HTTP 404 from the weather endpoint.
    #[error("city not found")]
    CityNotFound,

    /// HTTP 401: the API key was rejected.
    #[error("authentication rejected by provider")]
    Auth,

    /// Any other non-2xx status, or a transport-level failure. `detail`
    /// carries a truncated response body for logs only, never the user.
    #[error("weather request failed: {detail}")]
    Transport { status: Option<u16>, detail: String },

    /// Any failure while fetching suggestions. Never blocks retry.
    #[error("suggestion request failed: {detail}")]
    Suggestions { detail: String },
}

impl LookupError {
    /// Classify a non-success status from the weather endpoint.
    pub fn from_weather_status(status: u16, detail: String) -> Self {
        match status {
            404 => Self::CityNotFound,
            401 => Self::Auth,
            _ => Self::Transport {
                status: Some(status),
                detail,
            },
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            detail: detail.into(),
        }
    }

    pub fn suggestions(detail: impl Into<String>) -> Self {
        Self::Suggestions {
            detail: detail.into(),
        }
    }

    /// User-visible message for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyCity => "Please enter a city name.".to_string(),
            Self::CityNotFound => {
                "City not found. Please check the spelling and try again.".to_string()
            }
            Self::Auth => "API authentication failed. Please check your API key.".to_string(),
            Self::Transport {
                status: Some(status),
                ..
            } => format!("Failed to fetch weather data ({status})"),
            Self::Transport { status: None, .. } => {
                "Unable to fetch weather data. Please try again.".to_string()
            }
            Self::Suggestions { .. } => {
                "Unable to fetch city suggestions. Please try again.".to_string()
            }
        }
    }
}
