use std::fmt;

use tempomap_shared::models::SegmentCollection;

/// Build the URL of the per-date data file.
pub fn data_url(origin: &str, key: &str) -> String {
    format!("{}/data/{}.geojson", origin, key)
}

fn origin() -> String {
    // In production, same origin. In dev, might be different.
    let window = web_sys::window().unwrap();
    window.location().origin().unwrap()
}

/// Why a per-date file could not be loaded.
///
/// The UI folds every variant into the same warning banner; the variants
/// exist so tests and logs can tell the cases apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// HTTP 404: no data was published for this date.
    NotFound,
    /// Any other non-200 status.
    Status(u16),
    /// The request never produced a response.
    Network(String),
    /// The body was not a usable FeatureCollection.
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotFound => write!(f, "no data for this date"),
            FetchError::Status(code) => write!(f, "unexpected status {}", code),
            FetchError::Network(msg) => write!(f, "request failed: {}", msg),
            FetchError::Decode(msg) => write!(f, "undecodable payload: {}", msg),
        }
    }
}

/// Fetch and decode the GeoJSON file for one resource key (`YYYY-MM-DD`).
pub async fn fetch_segments(key: &str) -> Result<SegmentCollection, FetchError> {
    let url = data_url(&origin(), key);

    let resp = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    match resp.status().as_u16() {
        200 => {
            let body = resp
                .text()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;
            SegmentCollection::from_geojson(&body).map_err(FetchError::Decode)
        }
        404 => Err(FetchError::NotFound),
        code => Err(FetchError::Status(code)),
    }
}
