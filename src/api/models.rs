use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct MgrsRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub precision: Option<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MgrsResponse {
    pub mgrs: String,
    pub latitude: f64,
    pub longitude: f64,
    pub precision: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CoordinateRequest {
    pub mgrs: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CoordinateResponse {
    /// Canonical spaced form of the parsed reference
    pub mgrs: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FormatRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub format: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FormatResponse {
    pub format: String,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
