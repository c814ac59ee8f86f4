use axum::{
	Json, Router,
	extract::{
		Path, Query, State,
		rejection::{JsonRejection, QueryRejection},
	},
	http::{
		HeaderMap, HeaderName, HeaderValue, StatusCode,
		header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE, RETRY_AFTER},
	},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use pastpaper_domain::StructuredQuery;
use pastpaper_service::{AvailableOptions, Error, OptionsRequest, SearchResponse};

use crate::{
	rate_limit::{self, Decision},
	state::AppState,
};

const RATE_LIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
const CONTENT_CACHE_CONTROL: &str = "public, max-age=3600";

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/papers/search", post(search))
		.route("/v1/available-options", get(available_options))
		.route("/v1/files/{file_id}", get(file_metadata))
		.route("/v1/files/{file_id}/content", get(file_content))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	payload: Result<Json<StructuredQuery>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
	let Json(query) = payload.map_err(|err| {
		json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", err.body_text(), None)
	})?;
	let response = state.service.search(query).await?;

	Ok(Json(response))
}

async fn available_options(
	State(state): State<AppState>,
	params: Result<Query<OptionsRequest>, QueryRejection>,
) -> Result<Json<AvailableOptions>, ApiError> {
	let Query(request) = params.map_err(|err| {
		json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", err.body_text(), None)
	})?;
	let response = state.service.available_options(request).await?;

	Ok(Json(response))
}

async fn file_metadata(
	State(state): State<AppState>,
	Path(file_id): Path<String>,
	headers: HeaderMap,
) -> Result<Response, ApiError> {
	let remaining = enforce_rate_limit(&state, &headers)?;
	let file = state.service.file_metadata(&file_id).await?;
	let mut response_headers = HeaderMap::new();

	insert_rate_headers(&mut response_headers, state.limiter.max_requests(), remaining);

	Ok((response_headers, Json(file)).into_response())
}

async fn file_content(
	State(state): State<AppState>,
	Path(file_id): Path<String>,
	headers: HeaderMap,
) -> Result<Response, ApiError> {
	let remaining = enforce_rate_limit(&state, &headers)?;
	let (file, content) = state.service.file_content(&file_id).await?;
	let mut response_headers = HeaderMap::new();
	let content_type = HeaderValue::from_str(&content.content_type)
		.unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

	response_headers.insert(CONTENT_TYPE, content_type);
	response_headers.insert(CONTENT_DISPOSITION, inline_disposition(&file.name));
	response_headers.insert(CACHE_CONTROL, HeaderValue::from_static(CONTENT_CACHE_CONTROL));
	insert_rate_headers(&mut response_headers, state.limiter.max_requests(), remaining);

	Ok((StatusCode::OK, response_headers, content.bytes).into_response())
}

fn enforce_rate_limit(state: &AppState, headers: &HeaderMap) -> Result<u32, ApiError> {
	let client = rate_limit::client_identifier(headers);
	let limit = state.limiter.max_requests();

	match state.limiter.check(&client) {
		Decision::Allowed { remaining } => Ok(remaining),
		Decision::Limited { retry_after } => {
			let retry_secs = retry_after.as_secs_f64().ceil().max(1.0) as u64;
			let mut error = json_error(
				StatusCode::TOO_MANY_REQUESTS,
				"RATE_LIMITED",
				format!("Too many requests. Retry in {retry_secs} seconds."),
				None,
			);

			tracing::info!(client = client.as_str(), retry_secs, "Request rate limited.");
			error.headers.insert(RETRY_AFTER, HeaderValue::from(retry_secs));
			insert_rate_headers(&mut error.headers, limit, 0);

			Err(error)
		},
	}
}

fn insert_rate_headers(headers: &mut HeaderMap, limit: u32, remaining: u32) {
	headers.insert(RATE_LIMIT_LIMIT, HeaderValue::from(limit));
	headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from(remaining));
}

// Quotes and control characters would break the header; anything else non-ASCII is replaced.
fn inline_disposition(file_name: &str) -> HeaderValue {
	let safe: String = file_name
		.chars()
		.map(|c| if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' { c } else { '_' })
		.collect();

	HeaderValue::from_str(&format!("inline; filename=\"{safe}\""))
		.unwrap_or_else(|_| HeaderValue::from_static("inline"))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
	headers: HeaderMap,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self {
			status,
			error_code: error_code.into(),
			message: message.into(),
			fields,
			headers: HeaderMap::new(),
		}
	}
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message, None),
			Error::NotFound { message } =>
				json_error(StatusCode::NOT_FOUND, "NOT_FOUND", message, None),
			Error::MissingCredential => json_error(
				StatusCode::SERVICE_UNAVAILABLE,
				"MISSING_CREDENTIAL",
				"The remote store credential is missing or expired.",
				None,
			),
			Error::Remote { message } => {
				tracing::warn!(error = message.as_str(), "Remote store request failed.");

				json_error(StatusCode::BAD_GATEWAY, "REMOTE_ERROR", message, None)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, self.headers, Json(body)).into_response()
	}
}
