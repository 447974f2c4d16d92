use std::borrow::Cow;

use aide::axum::{
	routing::{get_with, post_with},
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
	#[error("not your posting")]
	NotYourPosting,
	#[error("your role cannot create postings")]
	PostingForbidden,
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
		.api_route(
			"/",
			get_with(get_jobs, get_jobs_docs).post_with(create_job, create_job_docs),
		)
		.api_route("/mine", get_with(get_user_jobs, get_user_jobs_docs))
		.api_route(
			"/:id",
			get_with(get_job, get_job_docs)
				.put_with(update_job, update_job_docs)
				.delete_with(delete_job, delete_job_docs),
		)
		.api_route("/:id/submit", post_with(submit_job, submit_job_docs))
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownJob(..) => StatusCode::NOT_FOUND,
			Self::NotYourPosting | Self::PostingForbidden => StatusCode::FORBIDDEN,
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
			Self::Lifecycle(lifecycle::Error::InvalidTransition { from, to }) => {
				error::Message::new("invalid_transition")
					.detail("from", json!(from))
					.detail("to", json!(to))
					.into_vec()
			}
			_ => error::Message::new(self.to_string()).into_vec(),
		}
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_rep_creates_posting() {
		let app = app(Store::memory());

		register(&app, "rep@technova.com", "COMPANY_REP").await;

		let response = app.post("/jobs").json(&job_input("Backend Intern")).await;

		assert_eq!(response.status_code(), 200);

		let body = response.json::<serde_json::Value>();

		// Approval is not required by default, so the posting goes live.
		assert_eq!(body["status"], "APPROVED");
		assert_eq!(body["posted_by"], "rep@technova.com");
		assert_eq!(body["view_count"], 0);
	}

	#[tokio::test]
	async fn test_student_cannot_create_posting() {
		let app = app(Store::memory());

		register(&app, "jane@student.edu", "STUDENT").await;

		let response = app.post("/jobs").json(&job_input("Backend Intern")).await;

		assert_eq!(response.status_code(), 403);
	}

	#[tokio::test]
	async fn test_draft_is_hidden_from_students() {
		let store = Store::memory();
		let rep = app(store.clone());
		let student = app(store);

		register(&rep, "rep@technova.com", "COMPANY_REP").await;
		register(&student, "jane@student.edu", "STUDENT").await;

		let response = rep
			.post("/jobs")
			.add_query_param("draft", true)
			.json(&job_input("Quiet Draft"))
			.await;

		assert_eq!(response.json::<serde_json::Value>()["status"], "DRAFT");

		let listing = student.get("/jobs").await.json::<serde_json::Value>();

		assert_eq!(listing.as_array().unwrap().len(), 0);

		// The owner still sees it among their own postings.
		let mine = rep.get("/jobs/mine").await.json::<serde_json::Value>();

		assert_eq!(mine.as_array().unwrap().len(), 1);
	}

	#[tokio::test]
	async fn test_owner_edit_reenters_review() {
		let app = app(Store::memory());

		register(&app, "rep@technova.com", "COMPANY_REP").await;

		let job = app
			.post("/jobs")
			.json(&job_input("Backend Intern"))
			.await
			.json::<serde_json::Value>();

		assert_eq!(job["status"], "APPROVED");

		let response = app
			.put(&format!("/jobs/{}", job["id"].as_str().unwrap()))
			.json(&json!({ "title": "Backend Intern (Remote)" }))
			.await;

		assert_eq!(response.status_code(), 200);

		let body = response.json::<serde_json::Value>();

		assert_eq!(body["status"], "PENDING");
		assert_eq!(body["title"], "Backend Intern (Remote)");
		assert_eq!(body["approved_by"], serde_json::Value::Null);
	}

	#[tokio::test]
	async fn test_submit_draft() {
		let app = app(Store::memory());

		register(&app, "rep@technova.com", "COMPANY_REP").await;

		let job = app
			.post("/jobs")
			.add_query_param("draft", true)
			.json(&job_input("Quiet Draft"))
			.await
			.json::<serde_json::Value>();

		let id = job["id"].as_str().unwrap();
		let response = app.post(&format!("/jobs/{id}/submit")).await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<serde_json::Value>()["status"], "APPROVED");

		// A second submission is an invalid transition.
		let response = app.post(&format!("/jobs/{id}/submit")).await;

		assert_eq!(response.status_code(), 409);
	}

	#[tokio::test]
	async fn test_detail_counts_views() {
		let app = app(Store::memory());

		register(&app, "rep@technova.com", "COMPANY_REP").await;

		let job = app
			.post("/jobs")
			.json(&job_input("Backend Intern"))
			.await
			.json::<serde_json::Value>();

		let path = format!("/jobs/{}", job["id"].as_str().unwrap());

		let first = app.get(&path).await.json::<serde_json::Value>();
		let second = app.get(&path).await.json::<serde_json::Value>();

		assert_eq!(first["view_count"], 0);
		assert_eq!(second["view_count"], 1);
		assert_eq!(first["has_applied"], false);
	}

	#[tokio::test]
	async fn test_delete_is_owner_only() {
		let store = Store::memory();
		let owner = app(store.clone());
		let other = app(store);

		register(&owner, "rep@technova.com", "COMPANY_REP").await;
		register(&other, "rival@bigcorp.com", "COMPANY_REP").await;

		let job = owner
			.post("/jobs")
			.json(&job_input("Backend Intern"))
			.await
			.json::<serde_json::Value>();

		let path = format!("/jobs/{}", job["id"].as_str().unwrap());

		assert_eq!(other.delete(&path).await.status_code(), 403);
		assert_eq!(owner.delete(&path).await.status_code(), 200);
		assert_eq!(owner.get(&path).await.status_code(), 404);
	}
}
