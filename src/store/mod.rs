//! The storage facade.
//!
//! Every handler talks to [`Store`], which dispatches to Postgres or to
//! the in-memory backend picked at startup. Both backends share the
//! same semantics, so the rest of the crate never cares which one is
//! behind a request.

mod memory;
mod pg;

pub use memory::MemoryStore;

use std::sync::Arc;

use uuid::Uuid;

use crate::{
	model::{JobStatus, PlatformSettings, Role},
	route::{
		application::model::Application,
		auth::model::{Session, User},
		job::model::JobPosting,
		saved::model::SavedJob,
	},
	seed, Database,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("resource already exists")]
	Conflict,
	#[error("resource not found")]
	NotFound,
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
}

/// Server-side constraints for job listings. Everything finer-grained
/// (search, sorting, visibility) happens in [`crate::filter`].
#[derive(Debug, Default, Clone)]
pub struct JobQuery {
	pub status: Option<JobStatus>,
	pub posted_by: Option<String>,
}

#[derive(Clone)]
pub enum Store {
	Postgres(Database),
	Memory(Arc<MemoryStore>),
}

impl Store {
	pub fn postgres(pool: Database) -> Self {
		Self::Postgres(pool)
	}

	pub fn memory() -> Self {
		Self::Memory(Arc::new(MemoryStore::default()))
	}

	/// An in-memory store with the fixture admin account, for demo
	/// deployments and tests that need the back office.
	pub fn memory_seeded(hasher: &argon2::Argon2<'_>) -> Self {
		let store = MemoryStore::default();

		// A fresh store cannot conflict with the fixture admin.
		store
			.create_user(&seed::admin(hasher))
			.expect("seeding an empty store");

		Self::Memory(Arc::new(store))
	}

	pub async fn create_user(&self, user: &User) -> Result<(), Error> {
		match self {
			Self::Postgres(pool) => pg::create_user(pool, user).await,
			Self::Memory(store) => store.create_user(user),
		}
	}

	pub async fn user_by_email(&self, email: &str) -> Result<Option<User>, Error> {
		match self {
			Self::Postgres(pool) => pg::user_by_email(pool, email).await,
			Self::Memory(store) => Ok(store.user_by_email(email)),
		}
	}

	pub async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, Error> {
		match self {
			Self::Postgres(pool) => pg::user_by_id(pool, id).await,
			Self::Memory(store) => Ok(store.user_by_id(id)),
		}
	}

	pub async fn update_user(&self, user: &User) -> Result<(), Error> {
		match self {
			Self::Postgres(pool) => pg::update_user(pool, user).await,
			Self::Memory(store) => store.update_user(user),
		}
	}

	pub async fn set_user_role(&self, email: &str, role: Role) -> Result<Option<User>, Error> {
		match self {
			Self::Postgres(pool) => pg::set_user_role(pool, email, role).await,
			Self::Memory(store) => Ok(store.set_user_role(email, role)),
		}
	}

	pub async fn list_users(&self) -> Result<Vec<User>, Error> {
		match self {
			Self::Postgres(pool) => pg::list_users(pool).await,
			Self::Memory(store) => Ok(store.list_users()),
		}
	}

	pub async fn create_session(&self, user_id: Uuid) -> Result<Session, Error> {
		match self {
			Self::Postgres(pool) => pg::create_session(pool, user_id).await,
			Self::Memory(store) => Ok(store.create_session(user_id)),
		}
	}

	pub async fn session(&self, id: Uuid) -> Result<Option<Session>, Error> {
		match self {
			Self::Postgres(pool) => pg::session(pool, id).await,
			Self::Memory(store) => Ok(store.session(id)),
		}
	}

	pub async fn delete_session(&self, id: Uuid) -> Result<(), Error> {
		match self {
			Self::Postgres(pool) => pg::delete_session(pool, id).await,
			Self::Memory(store) => {
				store.delete_session(id);
				Ok(())
			}
		}
	}

	pub async fn list_jobs(&self, query: &JobQuery) -> Result<Vec<JobPosting>, Error> {
		match self {
			Self::Postgres(pool) => pg::list_jobs(pool, query).await,
			Self::Memory(store) => Ok(store.list_jobs(query)),
		}
	}

	pub async fn job(&self, id: Uuid) -> Result<Option<JobPosting>, Error> {
		match self {
			Self::Postgres(pool) => pg::job(pool, id).await,
			Self::Memory(store) => Ok(store.job(id)),
		}
	}

	pub async fn create_job(&self, job: &JobPosting) -> Result<(), Error> {
		match self {
			Self::Postgres(pool) => pg::create_job(pool, job).await,
			Self::Memory(store) => store.create_job(job),
		}
	}

	pub async fn update_job(&self, job: &JobPosting) -> Result<(), Error> {
		match self {
			Self::Postgres(pool) => pg::update_job(pool, job).await,
			Self::Memory(store) => store.update_job(job),
		}
	}

	pub async fn delete_job(&self, id: Uuid) -> Result<bool, Error> {
		match self {
			Self::Postgres(pool) => pg::delete_job(pool, id).await,
			Self::Memory(store) => Ok(store.delete_job(id)),
		}
	}

	pub async fn increment_view_count(&self, id: Uuid) -> Result<(), Error> {
		match self {
			Self::Postgres(pool) => pg::increment_view_count(pool, id).await,
			Self::Memory(store) => {
				store.increment_view_count(id);
				Ok(())
			}
		}
	}

	pub async fn increment_application_count(&self, id: Uuid) -> Result<(), Error> {
		match self {
			Self::Postgres(pool) => pg::increment_application_count(pool, id).await,
			Self::Memory(store) => {
				store.increment_application_count(id);
				Ok(())
			}
		}
	}

	pub async fn create_application(&self, application: &Application) -> Result<(), Error> {
		match self {
			Self::Postgres(pool) => pg::create_application(pool, application).await,
			Self::Memory(store) => store.create_application(application),
		}
	}

	pub async fn applications_for(&self, email: &str) -> Result<Vec<Application>, Error> {
		match self {
			Self::Postgres(pool) => pg::applications_for(pool, email).await,
			Self::Memory(store) => Ok(store.applications_for(email)),
		}
	}

	pub async fn application(&self, email: &str, job_id: Uuid) -> Result<Option<Application>, Error> {
		match self {
			Self::Postgres(pool) => pg::application(pool, email, job_id).await,
			Self::Memory(store) => Ok(store.application(email, job_id)),
		}
	}

	pub async fn save_job(&self, saved: &SavedJob) -> Result<(), Error> {
		match self {
			Self::Postgres(pool) => pg::save_job(pool, saved).await,
			Self::Memory(store) => store.save_job(saved),
		}
	}

	pub async fn unsave_job(&self, email: &str, job_id: Uuid) -> Result<bool, Error> {
		match self {
			Self::Postgres(pool) => pg::unsave_job(pool, email, job_id).await,
			Self::Memory(store) => Ok(store.unsave_job(email, job_id)),
		}
	}

	pub async fn saved_jobs(&self, email: &str) -> Result<Vec<SavedJob>, Error> {
		match self {
			Self::Postgres(pool) => pg::saved_jobs(pool, email).await,
			Self::Memory(store) => Ok(store.saved_jobs(email)),
		}
	}

	pub async fn settings(&self) -> Result<PlatformSettings, Error> {
		match self {
			Self::Postgres(pool) => pg::settings(pool).await,
			Self::Memory(store) => Ok(store.settings()),
		}
	}

	pub async fn put_settings(&self, settings: &PlatformSettings) -> Result<(), Error> {
		match self {
			Self::Postgres(pool) => pg::put_settings(pool, settings).await,
			Self::Memory(store) => {
				store.put_settings(settings);
				Ok(())
			}
		}
	}
}
