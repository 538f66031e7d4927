use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Multipart, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};

use super::models::*;
use crate::batch;
use crate::config::ServerConfig;
use crate::projection::{self, GeographicCoordinate, Mgrs, UtmCoordinate, MAX_PRECISION};
use crate::types::CoordinateFormat;
use crate::Error;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, error: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let status = if error.is_input_error() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!("{}", error);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        error_response(status, error)
    }
}

pub async fn get_mgrs(
    State(config): State<Arc<ServerConfig>>,
    Query(req): Query<MgrsRequest>,
) -> Result<Json<MgrsResponse>, ApiError> {
    let precision = req.precision.unwrap_or(config.default_precision);
    let coord = GeographicCoordinate::new(req.latitude, req.longitude);
    let mgrs = projection::to_mgrs(coord, precision)?;

    Ok(Json(MgrsResponse {
        mgrs,
        latitude: req.latitude,
        longitude: req.longitude,
        precision,
    }))
}

pub async fn get_coordinate(
    Query(req): Query<CoordinateRequest>,
) -> Result<Json<CoordinateResponse>, ApiError> {
    let mgrs: Mgrs = req.mgrs.parse()?;
    let coord = mgrs.to_coordinate()?;

    Ok(Json(CoordinateResponse {
        mgrs: mgrs.to_string(),
        latitude: coord.latitude,
        longitude: coord.longitude,
    }))
}

pub async fn get_utm(Query(req): Query<PointRequest>) -> Result<Json<UtmCoordinate>, ApiError> {
    let utm = projection::to_utm(GeographicCoordinate::new(req.latitude, req.longitude))?;
    Ok(Json(utm))
}

pub async fn get_format(
    Query(req): Query<FormatRequest>,
) -> Result<Json<FormatResponse>, ApiError> {
    let format: CoordinateFormat = req.format.parse()?;
    let value = projection::format(GeographicCoordinate::new(req.latitude, req.longitude), format)?;

    Ok(Json(FormatResponse {
        format: format.display_name().to_string(),
        value,
    }))
}

pub async fn upload_csv(
    State(config): State<Arc<ServerConfig>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut csv_data: Option<Vec<u8>> = None;
    let mut precision = config.default_precision;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "csv" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| error_response(StatusCode::BAD_REQUEST, e))?;
                csv_data = Some(bytes.to_vec());
            }
            "precision" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| error_response(StatusCode::BAD_REQUEST, e))?;
                precision = text.trim().parse().map_err(|_| {
                    error_response(StatusCode::BAD_REQUEST, format!("Invalid precision: {}", text))
                })?;
            }
            _ => {}
        }
    }

    let csv_data = csv_data
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "Missing CSV file"))?;
    if precision == 0 || precision > MAX_PRECISION {
        return Err(Error::InvalidPrecision(precision).into());
    }

    let report =
        tokio::task::spawn_blocking(move || batch::convert_csv(csv_data.as_slice(), precision))
            .await
            .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, e))??;

    tracing::info!(
        total = report.total(),
        failed = report.failed(),
        "processed CSV upload in {:.2} ms",
        report.execution_time_ms
    );

    let body = report.to_csv()?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv")
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"gridref_results.csv\"",
        )
        .body(Body::from(body))
        .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, e))
}
