use aide::axum::IntoApiResponse;
use argon2::Argon2;
use axum::{
	extract::State,
	http::{header, StatusCode},
	response::IntoResponse,
};
use chrono::Utc;
use macros::route;
use uuid::Uuid;

use crate::{
	extract::{Json, Session},
	openapi::tag,
	session,
	store::{self, Store},
	AppState,
};

use super::{model, Error, RouteError};

pub const KEY_LENGTH: usize = 32;

/// Hashes a password with Argon2, using the user's id as a salt.
/// Since this is only used for logging in and creating a new password,
/// the scope of this function can remain in here with no issues.
pub(crate) fn hash_password(
	hasher: &Argon2,
	password: &str,
	id: &Uuid,
) -> Result<[u8; KEY_LENGTH], argon2::Error> {
	let mut hash = [0; KEY_LENGTH];

	hasher.hash_password_into(password.as_bytes(), id.as_bytes(), &mut hash)?;
	Ok(hash)
}

/// Log in
/// Logs in to an account, returning an associated session cookie.
#[route(tag = tag::AUTH, response(status = 200, description = "Logged in successfully.", shape = "Json<model::Session>"))]
pub async fn login(
	State(state): State<AppState>,
	Json(auth): Json<model::LoginInput>,
) -> Result<impl IntoApiResponse, RouteError> {
	let Some(user) = state.store.user_by_email(&auth.email).await? else {
		return Err(Error::InvalidEmailOrPassword.into());
	};

	let hashed = hash_password(&state.hasher, &auth.password, &user.id).map_err(Error::Argon)?;

	if user.password != hashed {
		return Err(Error::InvalidEmailOrPassword.into());
	}

	let session = state.store.create_session(user.id).await?;
	let cookie = session::create_cookie(session.id);

	Ok(([(header::SET_COOKIE, cookie.to_string())], Json(session)))
}

/// Log out
/// Logs out of the authenticated account, invalidating the session.
#[route(tag = tag::AUTH, response(status = 204, description = "Logged out successfully."))]
pub async fn logout(
	State(store): State<Store>,
	session: Session,
) -> Result<impl IntoApiResponse, RouteError> {
	store.delete_session(session.id).await?;

	// Clear the session cookie
	Ok((
		[(header::SET_COOKIE, session::clear_cookie().to_string())],
		StatusCode::NO_CONTENT,
	)
		.into_response())
}

/// Register account
/// Registers a new account, returning an associated session cookie.
#[route(tag = tag::AUTH, response(status = 200, description = "Registered successfully.", shape = "Json<model::Session>"))]
pub async fn register(
	State(state): State<AppState>,
	Json(input): Json<model::RegisterInput>,
) -> Result<impl IntoApiResponse, RouteError> {
	let id = Uuid::new_v4();
	let hashed = hash_password(&state.hasher, &input.password, &id).map_err(Error::Argon)?;
	let now = Utc::now();

	let user = model::User {
		id,
		email: input.email,
		password: hashed.to_vec(),
		first_name: input.first_name,
		last_name: input.last_name,
		role: input.role,
		phone_number: input.phone_number,
		graduation_year: input.graduation_year,
		company_name: input.company_name,
		job_title: input.job_title,
		industry: input.industry,
		created_at: now,
		updated_at: now,
	};

	state.store.create_user(&user).await.map_err(|e| match e {
		store::Error::Conflict => Error::EmailTaken.into(),
		e => RouteError::from(e),
	})?;

	let session = state.store.create_session(user.id).await?;
	let cookie = session::create_cookie(session.id);

	Ok(([(header::SET_COOKIE, cookie.to_string())], Json(session)))
}

/// Get profile
/// Returns the authenticated account's profile.
#[route(tag = tag::AUTH)]
pub async fn get_me(session: Session) -> Json<model::User> {
	Json(session.user)
}

/// Update profile
/// Updates the authenticated account's profile fields.
#[route(tag = tag::AUTH)]
pub async fn update_me(
	State(store): State<Store>,
	session: Session,
	Json(input): Json<model::UpdateProfileInput>,
) -> Result<Json<model::User>, RouteError> {
	let mut user = session.user;

	if let Some(first_name) = input.first_name {
		user.first_name = first_name;
	}

	if let Some(last_name) = input.last_name {
		user.last_name = last_name;
	}

	if let Some(phone_number) = input.phone_number {
		user.phone_number = Some(phone_number);
	}

	if let Some(graduation_year) = input.graduation_year {
		user.graduation_year = Some(graduation_year);
	}

	if let Some(company_name) = input.company_name {
		user.company_name = Some(company_name);
	}

	if let Some(job_title) = input.job_title {
		user.job_title = Some(job_title);
	}

	if let Some(industry) = input.industry {
		user.industry = Some(industry);
	}

	user.updated_at = Utc::now();

	store.update_user(&user).await?;

	Ok(Json(user))
}
