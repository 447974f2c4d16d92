//! Postgres queries. Runtime-checked so builds do not need a live
//! database; the row mappings live here next to the queries that use
//! them.

use sqlx::{postgres::PgRow, FromRow, Row};
use uuid::Uuid;

use crate::{
	model::{ContactMethod, PlatformSettings, Role},
	route::{
		application::model::Application,
		auth::model::{Session, User},
		job::model::JobPosting,
		saved::model::SavedJob,
	},
	Database,
};

use super::{Error, JobQuery};

fn conflict(error: sqlx::Error) -> Error {
	match &error {
		sqlx::Error::Database(db) if db.is_unique_violation() => Error::Conflict,
		_ => Error::Database(error),
	}
}

impl FromRow<'_, PgRow> for User {
	fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
		Ok(Self {
			id: row.try_get("id")?,
			email: row.try_get("email")?,
			password: row.try_get("password")?,
			first_name: row.try_get("first_name")?,
			last_name: row.try_get("last_name")?,
			role: row.try_get("role")?,
			phone_number: row.try_get("phone_number")?,
			graduation_year: row.try_get("graduation_year")?,
			company_name: row.try_get("company_name")?,
			job_title: row.try_get("job_title")?,
			industry: row.try_get("industry")?,
			created_at: row.try_get("created_at")?,
			updated_at: row.try_get("updated_at")?,
		})
	}
}

impl FromRow<'_, PgRow> for Session {
	fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
		Ok(Self {
			id: row.try_get("id")?,
			user_id: row.try_get("user_id")?,
			created_at: row.try_get("created_at")?,
		})
	}
}

impl FromRow<'_, PgRow> for JobPosting {
	fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
		Ok(Self {
			id: row.try_get("id")?,
			title: row.try_get("title")?,
			company: row.try_get("company")?,
			industry: row.try_get("industry")?,
			job_type: row.try_get("job_type")?,
			description: row.try_get("description")?,
			skills: row.try_get("skills")?,
			deadline: row.try_get("deadline")?,
			contact: ContactMethod {
				kind: row.try_get("contact_kind")?,
				value: row.try_get("contact_value")?,
			},
			posted_by: row.try_get("posted_by")?,
			status: row.try_get("status")?,
			view_count: row.try_get("view_count")?,
			application_count: row.try_get("application_count")?,
			admin_comments: row.try_get("admin_comments")?,
			approved_by: row.try_get("approved_by")?,
			reviewed_at: row.try_get("reviewed_at")?,
			created_at: row.try_get("created_at")?,
			updated_at: row.try_get("updated_at")?,
		})
	}
}

impl FromRow<'_, PgRow> for Application {
	fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
		Ok(Self {
			student_email: row.try_get("student_email")?,
			job_id: row.try_get("job_id")?,
			applied_at: row.try_get("applied_at")?,
		})
	}
}

impl FromRow<'_, PgRow> for SavedJob {
	fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
		Ok(Self {
			student_email: row.try_get("student_email")?,
			job_id: row.try_get("job_id")?,
			saved_at: row.try_get("saved_at")?,
		})
	}
}

impl FromRow<'_, PgRow> for PlatformSettings {
	fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
		Ok(Self {
			approval_required: row.try_get("approval_required")?,
			posting_expiration_days: row.try_get("posting_expiration_days")?,
		})
	}
}

pub(super) async fn create_user(pool: &Database, user: &User) -> Result<(), Error> {
	sqlx::query(
		r#"
			INSERT INTO "user" (
				id, email, password, first_name, last_name, role, phone_number,
				graduation_year, company_name, job_title, industry, created_at, updated_at
			)
			VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
		"#,
	)
	.bind(user.id)
	.bind(&user.email)
	.bind(&user.password)
	.bind(&user.first_name)
	.bind(&user.last_name)
	.bind(user.role)
	.bind(&user.phone_number)
	.bind(user.graduation_year)
	.bind(&user.company_name)
	.bind(&user.job_title)
	.bind(&user.industry)
	.bind(user.created_at)
	.bind(user.updated_at)
	.execute(pool)
	.await
	.map_err(conflict)?;

	Ok(())
}

pub(super) async fn user_by_email(pool: &Database, email: &str) -> Result<Option<User>, Error> {
	Ok(
		sqlx::query_as(r#"SELECT * FROM "user" WHERE email = $1"#)
			.bind(email)
			.fetch_optional(pool)
			.await?,
	)
}

pub(super) async fn user_by_id(pool: &Database, id: Uuid) -> Result<Option<User>, Error> {
	Ok(sqlx::query_as(r#"SELECT * FROM "user" WHERE id = $1"#)
		.bind(id)
		.fetch_optional(pool)
		.await?)
}

pub(super) async fn update_user(pool: &Database, user: &User) -> Result<(), Error> {
	let result = sqlx::query(
		r#"
			UPDATE "user"
			SET first_name = $2, last_name = $3, phone_number = $4, graduation_year = $5,
				company_name = $6, job_title = $7, industry = $8, updated_at = $9
			WHERE id = $1
		"#,
	)
	.bind(user.id)
	.bind(&user.first_name)
	.bind(&user.last_name)
	.bind(&user.phone_number)
	.bind(user.graduation_year)
	.bind(&user.company_name)
	.bind(&user.job_title)
	.bind(&user.industry)
	.bind(user.updated_at)
	.execute(pool)
	.await?;

	if result.rows_affected() == 0 {
		return Err(Error::NotFound);
	}

	Ok(())
}

pub(super) async fn set_user_role(
	pool: &Database,
	email: &str,
	role: Role,
) -> Result<Option<User>, Error> {
	Ok(sqlx::query_as(
		r#"
			UPDATE "user"
			SET role = $2, updated_at = now()
			WHERE email = $1
			RETURNING *
		"#,
	)
	.bind(email)
	.bind(role)
	.fetch_optional(pool)
	.await?)
}

pub(super) async fn list_users(pool: &Database) -> Result<Vec<User>, Error> {
	Ok(sqlx::query_as(r#"SELECT * FROM "user" ORDER BY created_at"#)
		.fetch_all(pool)
		.await?)
}

pub(super) async fn create_session(pool: &Database, user_id: Uuid) -> Result<Session, Error> {
	Ok(sqlx::query_as(
		r#"
			INSERT INTO session (user_id)
			VALUES ($1)
			RETURNING *
		"#,
	)
	.bind(user_id)
	.fetch_one(pool)
	.await?)
}

pub(super) async fn session(pool: &Database, id: Uuid) -> Result<Option<Session>, Error> {
	Ok(sqlx::query_as("SELECT * FROM session WHERE id = $1")
		.bind(id)
		.fetch_optional(pool)
		.await?)
}

pub(super) async fn delete_session(pool: &Database, id: Uuid) -> Result<(), Error> {
	sqlx::query("DELETE FROM session WHERE id = $1")
		.bind(id)
		.execute(pool)
		.await?;

	Ok(())
}

pub(super) async fn list_jobs(pool: &Database, query: &JobQuery) -> Result<Vec<JobPosting>, Error> {
	Ok(sqlx::query_as(
		r#"
			SELECT * FROM job_posting
			WHERE ($1::job_status IS NULL OR status = $1)
				AND ($2::text IS NULL OR posted_by = $2)
			ORDER BY created_at
		"#,
	)
	.bind(query.status)
	.bind(&query.posted_by)
	.fetch_all(pool)
	.await?)
}

pub(super) async fn job(pool: &Database, id: Uuid) -> Result<Option<JobPosting>, Error> {
	Ok(sqlx::query_as("SELECT * FROM job_posting WHERE id = $1")
		.bind(id)
		.fetch_optional(pool)
		.await?)
}

pub(super) async fn create_job(pool: &Database, job: &JobPosting) -> Result<(), Error> {
	sqlx::query(
		r#"
			INSERT INTO job_posting (
				id, title, company, industry, job_type, description, skills, deadline,
				contact_kind, contact_value, posted_by, status, view_count,
				application_count, admin_comments, approved_by, reviewed_at,
				created_at, updated_at
			)
			VALUES (
				$1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
				$11, $12, $13, $14, $15, $16, $17, $18, $19
			)
		"#,
	)
	.bind(job.id)
	.bind(&job.title)
	.bind(&job.company)
	.bind(&job.industry)
	.bind(job.job_type)
	.bind(&job.description)
	.bind(&job.skills)
	.bind(job.deadline)
	.bind(job.contact.kind)
	.bind(&job.contact.value)
	.bind(&job.posted_by)
	.bind(job.status)
	.bind(job.view_count)
	.bind(job.application_count)
	.bind(&job.admin_comments)
	.bind(&job.approved_by)
	.bind(job.reviewed_at)
	.bind(job.created_at)
	.bind(job.updated_at)
	.execute(pool)
	.await
	.map_err(conflict)?;

	Ok(())
}

pub(super) async fn update_job(pool: &Database, job: &JobPosting) -> Result<(), Error> {
	let result = sqlx::query(
		r#"
			UPDATE job_posting
			SET title = $2, company = $3, industry = $4, job_type = $5, description = $6,
				skills = $7, deadline = $8, contact_kind = $9, contact_value = $10,
				status = $11, admin_comments = $12, approved_by = $13, reviewed_at = $14,
				updated_at = $15
			WHERE id = $1
		"#,
	)
	.bind(job.id)
	.bind(&job.title)
	.bind(&job.company)
	.bind(&job.industry)
	.bind(job.job_type)
	.bind(&job.description)
	.bind(&job.skills)
	.bind(job.deadline)
	.bind(job.contact.kind)
	.bind(&job.contact.value)
	.bind(job.status)
	.bind(&job.admin_comments)
	.bind(&job.approved_by)
	.bind(job.reviewed_at)
	.bind(job.updated_at)
	.execute(pool)
	.await?;

	if result.rows_affected() == 0 {
		return Err(Error::NotFound);
	}

	Ok(())
}

pub(super) async fn delete_job(pool: &Database, id: Uuid) -> Result<bool, Error> {
	let result = sqlx::query("DELETE FROM job_posting WHERE id = $1")
		.bind(id)
		.execute(pool)
		.await?;

	Ok(result.rows_affected() > 0)
}

pub(super) async fn increment_view_count(pool: &Database, id: Uuid) -> Result<(), Error> {
	sqlx::query("UPDATE job_posting SET view_count = view_count + 1 WHERE id = $1")
		.bind(id)
		.execute(pool)
		.await?;

	Ok(())
}

pub(super) async fn increment_application_count(pool: &Database, id: Uuid) -> Result<(), Error> {
	sqlx::query("UPDATE job_posting SET application_count = application_count + 1 WHERE id = $1")
		.bind(id)
		.execute(pool)
		.await?;

	Ok(())
}

pub(super) async fn create_application(
	pool: &Database,
	application: &Application,
) -> Result<(), Error> {
	sqlx::query(
		r#"
			INSERT INTO application (student_email, job_id, applied_at)
			VALUES ($1, $2, $3)
		"#,
	)
	.bind(&application.student_email)
	.bind(application.job_id)
	.bind(application.applied_at)
	.execute(pool)
	.await
	.map_err(conflict)?;

	Ok(())
}

pub(super) async fn applications_for(
	pool: &Database,
	email: &str,
) -> Result<Vec<Application>, Error> {
	Ok(sqlx::query_as(
		r#"
			SELECT * FROM application
			WHERE student_email = $1
			ORDER BY applied_at
		"#,
	)
	.bind(email)
	.fetch_all(pool)
	.await?)
}

pub(super) async fn application(
	pool: &Database,
	email: &str,
	job_id: Uuid,
) -> Result<Option<Application>, Error> {
	Ok(
		sqlx::query_as("SELECT * FROM application WHERE student_email = $1 AND job_id = $2")
			.bind(email)
			.bind(job_id)
			.fetch_optional(pool)
			.await?,
	)
}

pub(super) async fn save_job(pool: &Database, saved: &SavedJob) -> Result<(), Error> {
	sqlx::query(
		r#"
			INSERT INTO saved_job (student_email, job_id, saved_at)
			VALUES ($1, $2, $3)
		"#,
	)
	.bind(&saved.student_email)
	.bind(saved.job_id)
	.bind(saved.saved_at)
	.execute(pool)
	.await
	.map_err(conflict)?;

	Ok(())
}

pub(super) async fn unsave_job(pool: &Database, email: &str, job_id: Uuid) -> Result<bool, Error> {
	let result = sqlx::query("DELETE FROM saved_job WHERE student_email = $1 AND job_id = $2")
		.bind(email)
		.bind(job_id)
		.execute(pool)
		.await?;

	Ok(result.rows_affected() > 0)
}

pub(super) async fn saved_jobs(pool: &Database, email: &str) -> Result<Vec<SavedJob>, Error> {
	Ok(sqlx::query_as(
		r#"
			SELECT * FROM saved_job
			WHERE student_email = $1
			ORDER BY saved_at
		"#,
	)
	.bind(email)
	.fetch_all(pool)
	.await?)
}

pub(super) async fn settings(pool: &Database) -> Result<PlatformSettings, Error> {
	let settings: Option<PlatformSettings> =
		sqlx::query_as("SELECT * FROM platform_settings WHERE singleton")
			.fetch_optional(pool)
			.await?;

	Ok(settings.unwrap_or_default())
}

pub(super) async fn put_settings(pool: &Database, settings: &PlatformSettings) -> Result<(), Error> {
	sqlx::query(
		r#"
			INSERT INTO platform_settings (singleton, approval_required, posting_expiration_days)
			VALUES (true, $1, $2)
			ON CONFLICT (singleton) DO UPDATE
			SET approval_required = $1, posting_expiration_days = $2
		"#,
	)
	.bind(settings.approval_required)
	.bind(settings.posting_expiration_days)
	.execute(pool)
	.await?;

	Ok(())
}
