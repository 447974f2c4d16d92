use axum::extract::State;
use chrono::Utc;
use macros::route;

use crate::{
	extract::{Json, Path, Query, Session},
	model::Role,
	openapi::tag,
	route::model::{JobIdInput, Paginate},
	store::{self, Store},
};

use super::{model, Error, RouteError};

/// Save posting
/// Bookmarks a posting for later.
#[route(tag = tag::SAVED)]
pub async fn save_job(
	State(store): State<Store>,
	session: Session,
	Json(input): Json<JobIdInput>,
) -> Result<Json<model::SavedJob>, RouteError> {
	if session.user.role != Role::Student {
		return Err(Error::StudentsOnly.into());
	}

	if store.job(input.job_id).await?.is_none() {
		return Err(Error::UnknownJob(input.job_id).into());
	}

	let saved = model::SavedJob {
		student_email: session.user.email,
		job_id: input.job_id,
		saved_at: Utc::now(),
	};

	store.save_job(&saved).await.map_err(|e| match e {
		store::Error::Conflict => Error::AlreadySaved.into(),
		e => RouteError::from(e),
	})?;

	Ok(Json(saved))
}

/// Unsave posting
/// Removes a bookmark by the posting's unique id.
#[route(tag = tag::SAVED)]
pub async fn unsave_job(
	State(store): State<Store>,
	session: Session,
	Path(JobIdInput { job_id }): Path<JobIdInput>,
) -> Result<(), RouteError> {
	if session.user.role != Role::Student {
		return Err(Error::StudentsOnly.into());
	}

	if !store.unsave_job(&session.user.email, job_id).await? {
		return Err(Error::NotSaved.into());
	}

	Ok(())
}

/// Get saved postings
/// Returns a paginated response of your bookmarked postings.
#[route(tag = tag::SAVED)]
pub async fn get_saved_jobs(
	State(store): State<Store>,
	session: Session,
	Query(paginate): Query<Paginate>,
) -> Result<Json<Vec<model::SavedJobDetail>>, RouteError> {
	if session.user.role != Role::Student {
		return Err(Error::StudentsOnly.into());
	}

	let saved = store.saved_jobs(&session.user.email).await?;
	let mut details = Vec::with_capacity(saved.len());

	for saved in paginate.slice(saved) {
		let Some(job) = store.job(saved.job_id).await? else {
			continue;
		};

		details.push(model::SavedJobDetail { saved, job });
	}

	Ok(Json(details))
}
