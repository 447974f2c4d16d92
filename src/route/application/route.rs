use axum::extract::State;
use chrono::Utc;
use macros::route;

use crate::{
	extract::{Json, Query, Session},
	model::{JobStatus, Role},
	openapi::tag,
	route::model::{JobIdInput, Paginate},
	store::{self, Store},
};

use super::{model, Error, RouteError};

/// Apply to posting
/// Applies to an approved posting. One application per posting.
#[route(tag = tag::APPLICATION)]
pub async fn create_application(
	State(store): State<Store>,
	session: Session,
	Json(input): Json<JobIdInput>,
) -> Result<Json<model::Application>, RouteError> {
	if session.user.role != Role::Student {
		return Err(Error::StudentsOnly.into());
	}

	let job = store
		.job(input.job_id)
		.await?
		.ok_or(Error::UnknownJob(input.job_id))?;

	if job.status != JobStatus::Approved || job.deadline < Utc::now() {
		return Err(Error::NotAcceptingApplications.into());
	}

	let application = model::Application {
		student_email: session.user.email,
		job_id: job.id,
		applied_at: Utc::now(),
	};

	store
		.create_application(&application)
		.await
		.map_err(|e| match e {
			store::Error::Conflict => Error::AlreadyApplied.into(),
			e => RouteError::from(e),
		})?;

	// The counter is denormalized display data, so a failed bump is not
	// worth failing the application over.
	if let Err(error) = store.increment_application_count(job.id).await {
		tracing::warn!(job = %job.id, %error, "failed to increment application count");
	}

	Ok(Json(application))
}

/// Get own applications
/// Returns a paginated response of your applications with their postings.
#[route(tag = tag::APPLICATION)]
pub async fn get_applications(
	State(store): State<Store>,
	session: Session,
	Query(paginate): Query<Paginate>,
) -> Result<Json<Vec<model::ApplicationDetail>>, RouteError> {
	if session.user.role != Role::Student {
		return Err(Error::StudentsOnly.into());
	}

	let applications = store.applications_for(&session.user.email).await?;
	let mut details = Vec::with_capacity(applications.len());

	for application in paginate.slice(applications) {
		// Postings can be deleted out from under an application.
		let Some(job) = store.job(application.job_id).await? else {
			continue;
		};

		details.push(model::ApplicationDetail { application, job });
	}

	Ok(Json(details))
}
