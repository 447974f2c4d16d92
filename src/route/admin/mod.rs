use std::borrow::Cow;

use aide::axum::{
	routing::{get_with, post_with, put_with},
	ApiRouter,
};
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::{error, lifecycle, AppState};

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown job {0}")]
	UnknownJob(Uuid),
	#[error("unknown user {0}")]
	UnknownUser(String),
	#[error(transparent)]
	Lifecycle(#[from] lifecycle::Error),
}

pub type RouteError = error::RouteError<Error>;

impl From<Error> for RouteError {
	fn from(error: Error) -> Self {
		Self::Route(error)
	}
}

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route("/jobs/:id/approve", post_with(approve_job, approve_job_docs))
		.api_route("/jobs/:id/archive", post_with(archive_job, archive_job_docs))
		.api_route("/users", get_with(get_users, get_users_docs))
		.api_route(
			"/users/:email/role",
			put_with(set_user_role, set_user_role_docs),
		)
		.api_route("/metrics", get_with(get_metrics, get_metrics_docs))
		.api_route(
			"/settings",
			get_with(get_settings, get_settings_docs).put_with(put_settings, put_settings_docs),
		)
		.api_route("/seed", post_with(seed_fixtures, seed_fixtures_docs))
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownJob(..) | Self::UnknownUser(..) => StatusCode::NOT_FOUND,
			Self::Lifecycle(lifecycle::Error::Forbidden) => StatusCode::FORBIDDEN,
			Self::Lifecycle(lifecycle::Error::InvalidTransition { .. }) => StatusCode::CONFLICT,
		}
	}

	fn errors(&self) -> Vec<error::Message<'_>> {
		match self {
			Self::UnknownJob(job) => vec![error::Message {
				content: "unknown_job".into(),
				field: None,
				details: Some(Cow::Owned({
					let mut map = error::Map::new();
					map.insert("job".into(), json!(job));
					map
				})),
			}],
			Self::UnknownUser(email) => vec![error::Message {
				content: "unknown_user".into(),
				field: None,
				details: Some(Cow::Owned({
					let mut map = error::Map::new();
					map.insert("user".into(), json!(email));
					map
				})),
			}],
			Self::Lifecycle(lifecycle::Error::InvalidTransition { from, to }) => {
				error::Message::new("invalid_transition")
					.detail("from", json!(from))
					.detail("to", json!(to))
					.into_vec()
			}
			Self::Lifecycle(error) => error::Message::new(error.to_string()).into_vec(),
		}
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_approval_flow() {
		let store = seeded();
		let admin = app(store.clone());
		let rep = app(store.clone());
		let student = app(store);

		login_admin(&admin).await;
		register(&rep, "rep@technova.com", "COMPANY_REP").await;
		register(&student, "jane@student.edu", "STUDENT").await;

		let response = admin
			.put("/admin/settings")
			.json(&json!({
				"approval_required": true,
				"posting_expiration_days": 60,
			}))
			.await;

		assert_eq!(response.status_code(), 200);

		let job = rep
			.post("/jobs")
			.json(&job_input("Backend Intern"))
			.await
			.json::<serde_json::Value>();

		// With review required, the posting waits for an admin.
		assert_eq!(job["status"], "PENDING");

		let listing = student.get("/jobs").await.json::<serde_json::Value>();

		assert_eq!(listing.as_array().unwrap().len(), 0);

		let id = job["id"].as_str().unwrap();
		let response = admin
			.post(&format!("/admin/jobs/{id}/approve"))
			.json(&json!({ "admin_comments": "Looks good." }))
			.await;

		assert_eq!(response.status_code(), 200);

		let body = response.json::<serde_json::Value>();

		assert_eq!(body["status"], "APPROVED");
		assert_eq!(body["approved_by"], ADMIN_EMAIL);
		assert_eq!(body["admin_comments"], "Looks good.");

		let listing = student.get("/jobs").await.json::<serde_json::Value>();

		assert_eq!(listing.as_array().unwrap().len(), 1);
	}

	#[tokio::test]
	async fn test_archive_is_terminal() {
		let store = seeded();
		let admin = app(store.clone());
		let rep = app(store);

		login_admin(&admin).await;
		register(&rep, "rep@technova.com", "COMPANY_REP").await;

		let job = rep
			.post("/jobs")
			.json(&job_input("Backend Intern"))
			.await
			.json::<serde_json::Value>();
		let id = job["id"].as_str().unwrap();

		let response = admin.post(&format!("/admin/jobs/{id}/archive")).await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<serde_json::Value>()["status"], "ARCHIVED");

		// No transition leaves ARCHIVED.
		let response = admin
			.post(&format!("/admin/jobs/{id}/approve"))
			.json(&json!({}))
			.await;

		assert_eq!(response.status_code(), 409);
	}

	#[tokio::test]
	async fn test_role_change() {
		let store = seeded();
		let admin = app(store.clone());
		let user = app(store);

		login_admin(&admin).await;
		register(&user, "jane@student.edu", "STUDENT").await;

		let response = admin
			.put("/admin/users/jane@student.edu/role")
			.json(&json!({ "role": "UGA_FACULTY" }))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<serde_json::Value>()["role"], "UGA_FACULTY");

		let response = admin
			.put("/admin/users/nobody@nowhere.com/role")
			.json(&json!({ "role": "STUDENT" }))
			.await;

		assert_eq!(response.status_code(), 404);
	}

	#[tokio::test]
	async fn test_metrics_after_seeding() {
		let admin = app(seeded());

		login_admin(&admin).await;

		let report = admin
			.post("/admin/seed")
			.json(&json!({}))
			.await
			.json::<serde_json::Value>();

		assert!(report["inserted"].as_u64().unwrap() > 0);

		// Seeding again inserts nothing new.
		let report = admin
			.post("/admin/seed")
			.json(&json!({}))
			.await
			.json::<serde_json::Value>();

		assert_eq!(report["inserted"], 0);

		let metrics = admin.get("/admin/metrics").await.json::<serde_json::Value>();

		assert!(metrics["total_jobs"].as_u64().unwrap() > 0);
		assert_eq!(metrics["total_users"], 1);
	}

	#[tokio::test]
	async fn test_back_office_is_admin_only() {
		let app = app(Store::memory());

		let response = app.get("/admin/metrics").await;

		assert_eq!(response.status_code(), 401);

		register(&app, "jane@student.edu", "STUDENT").await;

		let response = app.get("/admin/metrics").await;

		assert_eq!(response.status_code(), 403);
	}
}
