use std::borrow::Cow;

use axum::{
	body::Body,
	extract::rejection,
	http::{Response, StatusCode},
	response::IntoResponse,
	Json,
};
use schemars::JsonSchema;
use serde::Serialize;
use tower_governor::GovernorError;

use crate::store;

pub type Map = serde_json::Map<String, serde_json::Value>;

/// A single client-facing error message, optionally attached to an input
/// field and carrying structured details.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct Message<'e> {
	pub content: Cow<'e, str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field: Option<Cow<'e, str>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Cow<'e, Map>>,
}

impl<'e> Message<'e> {
	pub fn new(content: impl Into<Cow<'e, str>>) -> Self {
		Self {
			content: content.into(),
			field: None,
			details: None,
		}
	}

	pub fn field(mut self, field: impl Into<Cow<'e, str>>) -> Self {
		self.field = Some(field.into());
		self
	}

	pub fn detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		self.details
			.get_or_insert_with(|| Cow::Owned(Map::new()))
			.to_mut()
			.insert(key.into(), value.into());
		self
	}

	pub fn into_vec(self) -> Vec<Self> {
		vec![self]
	}
}

/// The shape every module error exposes to the client: a status code and a
/// list of messages. The `Display` impl is never sent to the client, so it
/// may carry internal detail.
pub trait ErrorShape {
	fn status(&self) -> StatusCode;
	fn errors(&self) -> Vec<Message<'_>>;

	fn response(&self) -> Response<Body> {
		let status = self.status();

		if status.is_server_error() {
			// The client only sees the status; keep the specifics here.
			(status, Json(Vec::<Message>::new())).into_response()
		} else {
			(status, Json(self.errors())).into_response()
		}
	}
}

/// Cross-cutting failures every handler can produce: rejected input,
/// validation errors, storage failures and rate limits.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("json body rejected")]
	Json(axum_jsonschema::JsonSchemaRejection),
	#[error("query string rejected: {0}")]
	Query(#[from] rejection::QueryRejection),
	#[error("path rejected: {0}")]
	Path(#[from] rejection::PathRejection),
	#[error("store error: {0}")]
	Store(#[from] store::Error),
	#[error("rate limited")]
	RateLimit(#[from] GovernorError),
}

// `JsonSchemaRejection` does not implement `std::error::Error`, so it cannot
// use thiserror's `#[from]` (which would make it the error source).
impl From<axum_jsonschema::JsonSchemaRejection> for AppError {
	fn from(rejection: axum_jsonschema::JsonSchemaRejection) -> Self {
		Self::Json(rejection)
	}
}

impl ErrorShape for AppError {
	fn status(&self) -> StatusCode {
		match self {
			Self::Validation(..) | Self::Json(..) | Self::Query(..) | Self::Path(..) => {
				StatusCode::BAD_REQUEST
			}
			Self::Store(store::Error::Conflict) => StatusCode::CONFLICT,
			Self::Store(store::Error::NotFound) => StatusCode::NOT_FOUND,
			Self::Store(store::Error::Database(..)) => StatusCode::INTERNAL_SERVER_ERROR,
			Self::RateLimit(GovernorError::TooManyRequests { .. }) => StatusCode::TOO_MANY_REQUESTS,
			Self::RateLimit(..) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn errors(&self) -> Vec<Message<'_>> {
		match self {
			Self::Validation(errors) => errors
				.field_errors()
				.into_iter()
				.flat_map(|(field, errors)| {
					errors
						.iter()
						.map(move |error| Message::new(error.to_string()).field(field))
				})
				.collect(),
			Self::Json(axum_jsonschema::JsonSchemaRejection::Json(rejection)) => {
				Message::new(rejection.to_string()).into_vec()
			}
			Self::Json(axum_jsonschema::JsonSchemaRejection::Serde(..)) => {
				Message::new("invalid json body").into_vec()
			}
			Self::Json(axum_jsonschema::JsonSchemaRejection::Schema(..)) => {
				Message::new("body does not match the expected schema").into_vec()
			}
			Self::Query(rejection) => Message::new(rejection.to_string()).into_vec(),
			Self::Path(rejection) => Message::new(rejection.to_string()).into_vec(),
			Self::Store(store::Error::Conflict) => Message::new("resource already exists").into_vec(),
			Self::Store(store::Error::NotFound) => Message::new("resource not found").into_vec(),
			// Transient storage failures surface as a generic retry prompt.
			Self::Store(store::Error::Database(..)) => Vec::new(),
			Self::RateLimit(..) => Message::new("too many requests").into_vec(),
		}
	}
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response<Body> {
		if self.status().is_server_error() {
			tracing::error!(error = %self, "request failed");
		}

		self.response()
	}
}

/// Error type for route handlers: either a module-specific error or a
/// cross-cutting [`AppError`].
///
/// Module errors convert with a one-line `From` impl next to their
/// definition; store and validation errors convert through `?` directly.
#[derive(Debug, thiserror::Error)]
pub enum RouteError<T> {
	#[error(transparent)]
	App(AppError),
	#[error(transparent)]
	Route(T),
}

impl<T> From<AppError> for RouteError<T> {
	fn from(error: AppError) -> Self {
		Self::App(error)
	}
}

impl<T> From<store::Error> for RouteError<T> {
	fn from(error: store::Error) -> Self {
		Self::App(AppError::Store(error))
	}
}

impl<T> From<validator::ValidationErrors> for RouteError<T> {
	fn from(errors: validator::ValidationErrors) -> Self {
		Self::App(AppError::Validation(errors))
	}
}

impl<T> aide::OperationOutput for RouteError<T> {
	type Inner = Self;
}

impl<T> IntoResponse for RouteError<T>
where
	T: ErrorShape + std::fmt::Display + std::fmt::Debug,
{
	fn into_response(self) -> Response<Body> {
		match self {
			Self::App(error) => error.into_response(),
			Self::Route(error) => {
				if error.status().is_server_error() {
					tracing::error!(error = %error, "request failed");
				}

				error.response()
			}
		}
	}
}
