use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::model::Role;

/// A single account.
///
/// The `email` is the identifier used throughout the domain (ownership,
/// applications, saved jobs); the uuid only salts the password hash and
/// anchors sessions. Neither the password nor the uuid is serialized to
/// the client.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct User {
	#[serde(skip_serializing)]
	pub id: Uuid,
	pub email: String,
	/// argon2, salted with `id`.
	#[serde(skip_serializing)]
	pub password: Vec<u8>,
	pub first_name: String,
	pub last_name: String,
	pub role: Role,
	pub phone_number: Option<String>,
	/// Meaningful for STUDENT accounts only.
	pub graduation_year: Option<i32>,
	/// Company rep and faculty fields.
	pub company_name: Option<String>,
	pub job_title: Option<String>,
	pub industry: Option<String>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct Session {
	/// The session id.
	#[serde(rename = "session_id")]
	pub id: Uuid,
	/// The user that owns the session.
	#[serde(skip_serializing)]
	pub user_id: Uuid,
	/// The creation time of the session.
	pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct LoginInput {
	#[validate(email)]
	pub email: String,
	#[validate(length(min = 8, max = 128))]
	pub password: String,
}

/// Role-aware sign-up. Role-conditional fields are checked as a whole:
/// company reps and faculty must name their organization, and ADMIN
/// accounts cannot be self-registered.
#[derive(Deserialize, Validate, JsonSchema)]
#[validate(schema(function = "validate_register"))]
pub struct RegisterInput {
	#[validate(email)]
	pub email: String,
	#[validate(length(min = 8, max = 128))]
	pub password: String,
	#[validate(length(min = 1, max = 64))]
	pub first_name: String,
	#[validate(length(min = 1, max = 64))]
	pub last_name: String,
	pub role: Role,
	#[validate(length(min = 7, max = 32))]
	pub phone_number: Option<String>,
	#[validate(range(min = 2000, max = 2100))]
	pub graduation_year: Option<i32>,
	#[validate(length(min = 1, max = 128))]
	pub company_name: Option<String>,
	#[validate(length(min = 1, max = 128))]
	pub job_title: Option<String>,
	#[validate(length(min = 1, max = 64))]
	pub industry: Option<String>,
}

fn validate_register(input: &RegisterInput) -> Result<(), ValidationError> {
	match input.role {
		Role::Admin => Err(ValidationError::new(
			"admin accounts cannot be self-registered",
		)),
		Role::CompanyRep | Role::UgaFaculty if input.company_name.is_none() => Err(
			ValidationError::new("a company name is required for this role"),
		),
		_ => Ok(()),
	}
}

/// Profile edits. The email identifies the account and cannot change;
/// roles change only through the admin back office.
#[derive(Deserialize, Validate, JsonSchema)]
pub struct UpdateProfileInput {
	#[validate(length(min = 1, max = 64))]
	pub first_name: Option<String>,
	#[validate(length(min = 1, max = 64))]
	pub last_name: Option<String>,
	#[validate(length(min = 7, max = 32))]
	pub phone_number: Option<String>,
	#[validate(range(min = 2000, max = 2100))]
	pub graduation_year: Option<i32>,
	#[validate(length(min = 1, max = 128))]
	pub company_name: Option<String>,
	#[validate(length(min = 1, max = 128))]
	pub job_title: Option<String>,
	#[validate(length(min = 1, max = 64))]
	pub industry: Option<String>,
}
