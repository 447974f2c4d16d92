use std::borrow::Cow;

use aide::axum::{
	routing::{delete_with, get_with},
	ApiRouter,
};
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
	#[error("you already saved this posting")]
	AlreadySaved,
	#[error("you have not saved this posting")]
	NotSaved,
	#[error("only students can save postings")]
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

	ApiRouter::new()
		.api_route(
			"/",
			get_with(get_saved_jobs, get_saved_jobs_docs).post_with(save_job, save_job_docs),
		)
		.api_route("/:job_id", delete_with(unsave_job, unsave_job_docs))
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownJob(..) | Self::NotSaved => StatusCode::NOT_FOUND,
			Self::AlreadySaved => StatusCode::CONFLICT,
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
	async fn test_save_and_unsave() {
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

		let response = student.post("/saved").json(&json!({ "job_id": id })).await;

		assert_eq!(response.status_code(), 200);

		// Saving twice is a conflict.
		let response = student.post("/saved").json(&json!({ "job_id": id })).await;

		assert_eq!(response.status_code(), 409);

		let saved = student.get("/saved").await.json::<serde_json::Value>();
		let saved = saved.as_array().unwrap();

		assert_eq!(saved.len(), 1);
		assert_eq!(saved[0]["job"]["title"], "Backend Intern");

		let response = student.delete(&format!("/saved/{id}")).await;

		assert_eq!(response.status_code(), 200);

		// Removing a bookmark that no longer exists is a 404.
		let response = student.delete(&format!("/saved/{id}")).await;

		assert_eq!(response.status_code(), 404);
	}

	#[tokio::test]
	async fn test_only_students_save() {
		let app = app(Store::memory());

		register(&app, "rep@technova.com", "COMPANY_REP").await;

		let job = app
			.post("/jobs")
			.json(&job_input("Backend Intern"))
			.await
			.json::<serde_json::Value>();

		let response = app
			.post("/saved")
			.json(&json!({ "job_id": job["id"] }))
			.await;

		assert_eq!(response.status_code(), 403);
	}
}
