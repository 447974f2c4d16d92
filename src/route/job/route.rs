use axum::extract::State;
use chrono::{DateTime, Utc};
use macros::route;
use uuid::Uuid;

use crate::{
	extract::{Json, Path, Query, Session},
	filter, lifecycle,
	model::{JobStatus, Role},
	openapi::tag,
	route::model::{IdInput, Paginate},
	store::{JobQuery, Store},
};

use super::{model, Error, RouteError};

/// Persists the postings archived by the lazy expiry pass. A failed write
/// only delays the archive until the next listing, so it is logged and
/// skipped.
async fn archive_expired(store: &Store, jobs: &mut [model::JobPosting], now: DateTime<Utc>) {
	for id in lifecycle::auto_archive_expired(jobs, now) {
		let Some(job) = jobs.iter().find(|job| job.id == id) else {
			continue;
		};

		if let Err(error) = store.update_job(job).await {
			tracing::warn!(%id, %error, "failed to persist auto-archive");
		}
	}
}

/// List postings
/// Returns the postings visible to you, filtered and sorted by the query.
#[route(tag = tag::JOB)]
pub async fn get_jobs(
	State(store): State<Store>,
	session: Session,
	Query(query): Query<model::ListJobsQuery>,
) -> Result<Json<Vec<model::JobPosting>>, RouteError> {
	let mut jobs = store.list_jobs(&JobQuery::default()).await?;
	let now = Utc::now();

	archive_expired(&store, &mut jobs, now).await;

	let jobs = filter::visible(jobs, session.user.role, &session.user.email, now);
	let mut jobs = filter::apply(jobs, &query.criteria());

	if let Some(sort) = query.sort {
		filter::sort(&mut jobs, sort, query.direction);
	}

	Ok(Json(query.paginate().slice(jobs)))
}

/// Create posting
/// Creates a new posting, optionally as a draft.
#[route(tag = tag::JOB)]
pub async fn create_job(
	State(store): State<Store>,
	session: Session,
	Query(query): Query<model::CreateJobQuery>,
	Json(input): Json<model::CreateJobPosting>,
) -> Result<Json<model::JobPosting>, RouteError> {
	if !session.user.role.can_post() {
		return Err(Error::PostingForbidden.into());
	}

	let settings = store.settings().await?;
	let now = Utc::now();

	let job = model::JobPosting {
		id: Uuid::new_v4(),
		title: input.title,
		company: input.company,
		industry: input.industry,
		job_type: input.job_type,
		description: input.description,
		skills: input.skills,
		deadline: input.deadline,
		contact: input.contact,
		posted_by: session.user.email,
		status: lifecycle::initial_status(query.draft, &settings),
		view_count: 0,
		application_count: 0,
		admin_comments: None,
		approved_by: None,
		reviewed_at: None,
		created_at: now,
		updated_at: now,
	};

	store.create_job(&job).await?;

	Ok(Json(job))
}

/// Get own postings
/// Returns a paginated response of your postings, in any status.
#[route(tag = tag::JOB)]
pub async fn get_user_jobs(
	State(store): State<Store>,
	session: Session,
	Query(paginate): Query<Paginate>,
) -> Result<Json<Vec<model::JobPosting>>, RouteError> {
	let mut jobs = store
		.list_jobs(&JobQuery {
			posted_by: Some(session.user.email.clone()),
			..JobQuery::default()
		})
		.await?;

	archive_expired(&store, &mut jobs, Utc::now()).await;

	Ok(Json(paginate.slice(jobs)))
}

/// Get single posting
/// Returns a single posting by its unique id, with your application state.
#[route(tag = tag::JOB)]
pub async fn get_job(
	State(store): State<Store>,
	session: Option<Session>,
	Path(IdInput { id }): Path<IdInput>,
) -> Result<Json<model::JobDetail>, RouteError> {
	let job = store.job(id).await?.ok_or(Error::UnknownJob(id))?;
	let viewer = session.as_ref().map(|session| &session.user);

	// Only approved postings are public; the rest are owner and admin only.
	let entitled = job.status == JobStatus::Approved
		|| viewer.is_some_and(|user| user.role == Role::Admin || user.email == job.posted_by);

	if !entitled {
		return Err(Error::UnknownJob(id).into());
	}

	if let Err(error) = store.increment_view_count(id).await {
		tracing::warn!(%id, %error, "failed to increment view count");
	}

	let (has_applied, applied_at) = match viewer {
		Some(user) if user.role == Role::Student => {
			match store.application(&user.email, id).await {
				Ok(application) => (
					application.is_some(),
					application.map(|application| application.applied_at),
				),
				// The posting is still worth showing without this flag.
				Err(error) => {
					tracing::warn!(%id, %error, "failed to look up application state");
					(false, None)
				}
			}
		}
		_ => (false, None),
	};

	Ok(Json(model::JobDetail {
		job,
		has_applied,
		applied_at,
	}))
}

/// Update posting
/// Updates an existing posting. Owner edits send it back through review.
#[route(tag = tag::JOB)]
pub async fn update_job(
	State(store): State<Store>,
	session: Session,
	Path(IdInput { id }): Path<IdInput>,
	Json(input): Json<model::UpdateJobPosting>,
) -> Result<Json<model::JobPosting>, RouteError> {
	let mut job = store.job(id).await?.ok_or(Error::UnknownJob(id))?;

	let owner = session.user.email == job.posted_by;

	if !owner && session.user.role != Role::Admin {
		return Err(Error::NotYourPosting.into());
	}

	if let Some(title) = input.title {
		job.title = title;
	}

	if let Some(company) = input.company {
		job.company = company;
	}

	if let Some(industry) = input.industry {
		job.industry = industry;
	}

	if let Some(job_type) = input.job_type {
		job.job_type = job_type;
	}

	if let Some(description) = input.description {
		job.description = description;
	}

	if let Some(skills) = input.skills {
		job.skills = skills;
	}

	if let Some(deadline) = input.deadline {
		job.deadline = deadline;
	}

	if let Some(contact) = input.contact {
		job.contact = contact;
	}

	// Owner edits re-enter the review flow; admin edits keep the status.
	if owner {
		let status = lifecycle::status_after_edit(job.status).map_err(Error::Lifecycle)?;

		if job.status == JobStatus::Approved && status == JobStatus::Pending {
			job.approved_by = None;
			job.reviewed_at = None;
		}

		job.status = status;
	}

	job.updated_at = Utc::now();

	store.update_job(&job).await?;

	Ok(Json(job))
}

/// Submit draft
/// Submits a draft posting into the review flow.
#[route(tag = tag::JOB)]
pub async fn submit_job(
	State(store): State<Store>,
	session: Session,
	Path(IdInput { id }): Path<IdInput>,
) -> Result<Json<model::JobPosting>, RouteError> {
	let mut job = store.job(id).await?.ok_or(Error::UnknownJob(id))?;

	if session.user.email != job.posted_by {
		return Err(Error::NotYourPosting.into());
	}

	let settings = store.settings().await?;

	lifecycle::submit(&mut job, &settings, Utc::now()).map_err(Error::Lifecycle)?;

	store.update_job(&job).await?;

	Ok(Json(job))
}

/// Delete posting
/// Deletes an existing posting by its unique id.
#[route(tag = tag::JOB)]
pub async fn delete_job(
	State(store): State<Store>,
	session: Session,
	Path(IdInput { id }): Path<IdInput>,
) -> Result<(), RouteError> {
	let job = store.job(id).await?.ok_or(Error::UnknownJob(id))?;

	if session.user.email != job.posted_by && session.user.role != Role::Admin {
		return Err(Error::NotYourPosting.into());
	}

	if !store.delete_job(id).await? {
		return Err(Error::UnknownJob(id).into());
	}

	Ok(())
}
