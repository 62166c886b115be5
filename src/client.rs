//! Thin synchronous wrappers around the backend HTTP API
//!
//! The backend owns the dataset and the trained models; this module only
//! shapes requests and decodes responses. Endpoints are treated as opaque
//! request/response pairs with no retry logic.

use crate::compound::BioactivityRow;
use crate::config::ApiSettings;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors from backend requests
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to '{endpoint}' failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Backend returned {status} for '{endpoint}'")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode response from '{endpoint}': {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Payload for `POST /search`
///
/// Flat optional bounds; `None` means no constraint. The backend applies
/// these server-side and caps the result set, so the client only narrows by
/// the predicted-activity flag afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchQuery {
    pub molwt_min: Option<f64>,
    pub molwt_max: Option<f64>,
    pub logp_min: Option<f64>,
    pub logp_max: Option<f64>,
    pub psa_max: Option<f64>,
    pub is_active: Option<u8>,
    /// Raw query text for the backend's own keyword extraction; applied
    /// server-side on top of the explicit bounds
    pub nlq: Option<String>,
}

/// Molecular descriptors the prediction endpoints take as input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptorSet {
    pub mw_freebase: f64,
    pub alogp: f64,
    pub psa: f64,
    pub hbd: u32,
    pub hba: u32,
    pub rtb: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    pub model: String,
    /// "Active" or "Inactive"
    pub prediction: String,
    pub probability: f64,
}

impl PredictionResponse {
    pub fn is_active(&self) -> bool {
        self.prediction.eq_ignore_ascii_case("active")
    }
}

/// Per-feature contribution to a prediction, consumed verbatim for display
#[derive(Debug, Clone, Deserialize)]
pub struct ShapImpact {
    pub feature: String,
    pub impact: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExplainResponse {
    pub explanation: Vec<ShapImpact>,
}

/// Synchronous backend client
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self, ApiError> {
        Self::new(
            settings.base_url.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    /// `GET /data/bioactivity` - the full dataset, used by the summary view
    pub fn bioactivity(&self) -> Result<Vec<BioactivityRow>, ApiError> {
        self.get_json("/data/bioactivity")
    }

    /// `POST /search` - server-side filtered rows
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<BioactivityRow>, ApiError> {
        self.post_json("/search", query)
    }

    /// `POST /predict/{model}` - activity prediction for one descriptor set
    pub fn predict(
        &self,
        model_path: &str,
        descriptors: &DescriptorSet,
    ) -> Result<PredictionResponse, ApiError> {
        self.post_json(&format!("/predict/{model_path}"), descriptors)
    }

    /// `POST /predict/explain` - SHAP contributions for one descriptor set
    pub fn explain(&self, descriptors: &DescriptorSet) -> Result<ExplainResponse, ApiError> {
        self.post_json("/predict/explain", descriptors)
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.url(endpoint))
            .send()
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;
        decode(endpoint, response)
    }

    fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .post(self.url(endpoint))
            .json(body)
            .send()
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;
        decode(endpoint, response)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

fn decode<T: DeserializeOwned>(
    endpoint: &str,
    response: reqwest::blocking::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status,
        });
    }
    response.json().map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_serializes_nulls_for_unset_fields() {
        let query = SearchQuery {
            molwt_min: Some(100.0),
            molwt_max: Some(600.0),
            is_active: Some(1),
            ..SearchQuery::default()
        };
        let json: serde_json::Value = serde_json::to_value(&query).unwrap();
        assert_eq!(json["molwt_min"], 100.0);
        assert_eq!(json["is_active"], 1);
        assert!(json["logp_min"].is_null());
        assert!(json["nlq"].is_null());
    }

    #[test]
    fn test_prediction_label_parsing_is_case_insensitive() {
        let response = PredictionResponse {
            model: "logistic".to_string(),
            prediction: "ACTIVE".to_string(),
            probability: 0.8,
        };
        assert!(response.is_active());
    }
}
