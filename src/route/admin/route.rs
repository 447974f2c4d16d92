use axum::extract::State;
use chrono::Utc;
use macros::route;

use crate::{
	extract::{Admin, Json, Path, Query},
	lifecycle,
	model::{JobStatus, PlatformSettings},
	openapi::tag,
	route::{
		auth,
		model::{EmailInput, IdInput, Paginate},
	},
	seed,
	store::{self, JobQuery, Store},
};

use super::{model, Error, RouteError};

/// Approve posting
/// Approves a pending posting, stamping the reviewing admin.
#[route(tag = tag::ADMIN)]
pub async fn approve_job(
	State(store): State<Store>,
	Admin(admin): Admin,
	Path(IdInput { id }): Path<IdInput>,
	Json(input): Json<model::ApproveInput>,
) -> Result<Json<crate::route::job::model::JobPosting>, RouteError> {
	let mut job = store.job(id).await?.ok_or(Error::UnknownJob(id))?;

	lifecycle::transition(&mut job, JobStatus::Approved, admin.role, &admin.email, Utc::now())
		.map_err(Error::Lifecycle)?;

	if input.admin_comments.is_some() {
		job.admin_comments = input.admin_comments;
	}

	store.update_job(&job).await?;

	Ok(Json(job))
}

/// Archive posting
/// Archives a posting in any state. Archival is terminal.
#[route(tag = tag::ADMIN)]
pub async fn archive_job(
	State(store): State<Store>,
	Admin(admin): Admin,
	Path(IdInput { id }): Path<IdInput>,
) -> Result<Json<crate::route::job::model::JobPosting>, RouteError> {
	let mut job = store.job(id).await?.ok_or(Error::UnknownJob(id))?;

	lifecycle::transition(&mut job, JobStatus::Archived, admin.role, &admin.email, Utc::now())
		.map_err(Error::Lifecycle)?;

	store.update_job(&job).await?;

	Ok(Json(job))
}

/// List accounts
/// Returns a paginated response of every account.
#[route(tag = tag::ADMIN)]
pub async fn get_users(
	State(store): State<Store>,
	Admin(_): Admin,
	Query(paginate): Query<Paginate>,
) -> Result<Json<Vec<auth::model::User>>, RouteError> {
	let users = store.list_users().await?;

	Ok(Json(paginate.slice(users)))
}

/// Change account role
/// Assigns a new role to the account with the given email.
#[route(tag = tag::ADMIN)]
pub async fn set_user_role(
	State(store): State<Store>,
	Admin(_): Admin,
	Path(EmailInput { email }): Path<EmailInput>,
	Json(input): Json<model::RoleInput>,
) -> Result<Json<auth::model::User>, RouteError> {
	let user = store
		.set_user_role(&email, input.role)
		.await?
		.ok_or(Error::UnknownUser(email))?;

	Ok(Json(user))
}

/// Get dashboard metrics
/// Returns aggregate counters and the ten most viewed postings.
#[route(tag = tag::ADMIN)]
pub async fn get_metrics(
	State(store): State<Store>,
	Admin(_): Admin,
) -> Result<Json<model::Metrics>, RouteError> {
	let users = store.list_users().await?;
	let jobs = store.list_jobs(&JobQuery::default()).await?;

	let mut status_counts = model::StatusCounts::default();

	for job in &jobs {
		match job.status {
			JobStatus::Draft => status_counts.draft += 1,
			JobStatus::Pending => status_counts.pending += 1,
			JobStatus::Approved => status_counts.approved += 1,
			JobStatus::Archived => status_counts.archived += 1,
		}
	}

	let total_views = jobs.iter().map(|job| i64::from(job.view_count)).sum();
	let total_applications = jobs
		.iter()
		.map(|job| i64::from(job.application_count))
		.sum();

	let mut top_viewed = jobs.clone();
	top_viewed.sort_by(|a, b| b.view_count.cmp(&a.view_count));
	top_viewed.truncate(10);

	Ok(Json(model::Metrics {
		total_users: users.len(),
		total_jobs: jobs.len(),
		status_counts,
		total_views,
		total_applications,
		top_viewed,
	}))
}

/// Get platform settings
#[route(tag = tag::ADMIN)]
pub async fn get_settings(
	State(store): State<Store>,
	Admin(_): Admin,
) -> Result<Json<PlatformSettings>, RouteError> {
	Ok(Json(store.settings().await?))
}

/// Update platform settings
/// Replaces the platform settings. Takes effect for new postings only.
#[route(tag = tag::ADMIN)]
pub async fn put_settings(
	State(store): State<Store>,
	Admin(_): Admin,
	Json(settings): Json<PlatformSettings>,
) -> Result<Json<PlatformSettings>, RouteError> {
	store.put_settings(&settings).await?;

	Ok(Json(settings))
}

/// Seed fixtures
/// Inserts the demo postings, skipping any that are already present.
#[route(tag = tag::ADMIN)]
pub async fn seed_fixtures(
	State(store): State<Store>,
	Admin(_): Admin,
	Json(input): Json<model::SeedInput>,
) -> Result<Json<model::SeedReport>, RouteError> {
	let mut inserted = 0;

	for job in seed::postings()
		.into_iter()
		.take(input.limit.unwrap_or(usize::MAX))
	{
		match store.create_job(&job).await {
			Ok(()) => inserted += 1,
			Err(store::Error::Conflict) => {}
			Err(error) => return Err(error.into()),
		}
	}

	Ok(Json(model::SeedReport { inserted }))
}
