use std::borrow::Cow;

use aide::axum::{routing::get_with, ApiRouter};
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::{error, AppState};

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown job {0}")]
	UnknownJob(Uuid),
	#[error("you already applied to this posting")]
	AlreadyApplied,
	#[error("this posting is not accepting applications")]
	NotAcceptingApplications,
	#[error("only students can apply to postings")]
	StudentsOnly,
}

pub type RouteError = error::RouteError<Error>;

impl From<Error> for RouteError {
	fn from(error: Error) -> Self {
		Self::Route(error)
	}
}

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new().api_route(
		"/",
		get_with(get_applications, get_applications_docs)
			.post_with(create_application, create_application_docs),
	)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownJob(..) => StatusCode::NOT_FOUND,
			Self::AlreadyApplied | Self::NotAcceptingApplications => StatusCode::CONFLICT,
			Self::StudentsOnly => StatusCode::FORBIDDEN,
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
			_ => error::Message::new(self.to_string()).into_vec(),
		}
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_apply_flow() {
		let store = Store::memory();
		let rep = app(store.clone());
		let student = app(store);

		register(&rep, "rep@technova.com", "COMPANY_REP").await;
		register(&student, "jane@student.edu", "STUDENT").await;

		let job = rep
			.post("/jobs")
			.json(&job_input("Backend Intern"))
			.await
			.json::<serde_json::Value>();
		let id = job["id"].as_str().unwrap();

		let response = student
			.post("/applications")
			.json(&json!({ "job_id": id }))
			.await;

		assert_eq!(response.status_code(), 200);

		// Applying twice is a conflict.
		let response = student
			.post("/applications")
			.json(&json!({ "job_id": id }))
			.await;

		assert_eq!(response.status_code(), 409);

		let mine = student
			.get("/applications")
			.await
			.json::<serde_json::Value>();
		let mine = mine.as_array().unwrap();

		assert_eq!(mine.len(), 1);
		assert_eq!(mine[0]["job"]["title"], "Backend Intern");

		// The detail page now reflects the application.
		let detail = student
			.get(&format!("/jobs/{id}"))
			.await
			.json::<serde_json::Value>();

		assert_eq!(detail["has_applied"], true);
		assert_eq!(detail["application_count"], 1);
	}

	#[tokio::test]
	async fn test_only_students_apply() {
		let app = app(Store::memory());

		register(&app, "rep@technova.com", "COMPANY_REP").await;

		let job = app
			.post("/jobs")
			.json(&job_input("Backend Intern"))
			.await
			.json::<serde_json::Value>();

		let response = app
			.post("/applications")
			.json(&json!({ "job_id": job["id"] }))
			.await;

		assert_eq!(response.status_code(), 403);
	}

	#[tokio::test]
	async fn test_apply_to_unknown_job() {
		let app = app(Store::memory());

		register(&app, "jane@student.edu", "STUDENT").await;

		let response = app
			.post("/applications")
			.json(&json!({ "job_id": uuid::Uuid::new_v4() }))
			.await;

		assert_eq!(response.status_code(), 404);
	}

	#[tokio::test]
	async fn test_drafts_reject_applications() {
		let store = Store::memory();
		let rep = app(store.clone());
		let student = app(store);

		register(&rep, "rep@technova.com", "COMPANY_REP").await;
		register(&student, "jane@student.edu", "STUDENT").await;

		let job = rep
			.post("/jobs")
			.add_query_param("draft", true)
			.json(&job_input("Quiet Draft"))
			.await
			.json::<serde_json::Value>();

		let response = student
			.post("/applications")
			.json(&json!({ "job_id": job["id"] }))
			.await;

		assert_eq!(response.status_code(), 409);
	}
}
