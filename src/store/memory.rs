//! An in-memory store with the same semantics as the Postgres queries.
//!
//! Collections keep insertion order, matching the `ORDER BY created_at`
//! of the database listings. Used for demo deployments (`STORE=memory`)
//! and as the test substrate.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::{
	model::{PlatformSettings, Role},
	route::{
		application::model::Application,
		auth::model::{Session, User},
		job::model::JobPosting,
		saved::model::SavedJob,
	},
};

use super::Error;

#[derive(Debug, Default)]
struct Inner {
	users: Vec<User>,
	sessions: Vec<Session>,
	jobs: Vec<JobPosting>,
	applications: Vec<Application>,
	saved: Vec<SavedJob>,
	settings: Option<PlatformSettings>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
	inner: Mutex<Inner>,
}

impl MemoryStore {
	fn lock(&self) -> MutexGuard<'_, Inner> {
		self.inner.lock().expect("store mutex poisoned")
	}

	pub fn create_user(&self, user: &User) -> Result<(), Error> {
		let mut inner = self.lock();

		if inner.users.iter().any(|u| u.email == user.email) {
			return Err(Error::Conflict);
		}

		inner.users.push(user.clone());

		Ok(())
	}

	pub fn user_by_email(&self, email: &str) -> Option<User> {
		self.lock().users.iter().find(|u| u.email == email).cloned()
	}

	pub fn user_by_id(&self, id: Uuid) -> Option<User> {
		self.lock().users.iter().find(|u| u.id == id).cloned()
	}

	pub fn update_user(&self, user: &User) -> Result<(), Error> {
		let mut inner = self.lock();

		let Some(existing) = inner.users.iter_mut().find(|u| u.id == user.id) else {
			return Err(Error::NotFound);
		};

		*existing = user.clone();

		Ok(())
	}

	pub fn set_user_role(&self, email: &str, role: Role) -> Option<User> {
		let mut inner = self.lock();
		let user = inner.users.iter_mut().find(|u| u.email == email)?;

		user.role = role;
		user.updated_at = Utc::now();

		Some(user.clone())
	}

	pub fn list_users(&self) -> Vec<User> {
		self.lock().users.clone()
	}

	pub fn create_session(&self, user_id: Uuid) -> Session {
		let session = Session {
			id: Uuid::new_v4(),
			user_id,
			created_at: Utc::now(),
		};

		self.lock().sessions.push(session.clone());

		session
	}

	pub fn session(&self, id: Uuid) -> Option<Session> {
		self.lock().sessions.iter().find(|s| s.id == id).cloned()
	}

	pub fn delete_session(&self, id: Uuid) {
		self.lock().sessions.retain(|s| s.id != id);
	}

	pub fn list_jobs(&self, query: &super::JobQuery) -> Vec<JobPosting> {
		self.lock()
			.jobs
			.iter()
			.filter(|job| query.status.is_none_or(|status| job.status == status))
			.filter(|job| {
				query
					.posted_by
					.as_ref()
					.is_none_or(|email| &job.posted_by == email)
			})
			.cloned()
			.collect()
	}

	pub fn job(&self, id: Uuid) -> Option<JobPosting> {
		self.lock().jobs.iter().find(|j| j.id == id).cloned()
	}

	pub fn create_job(&self, job: &JobPosting) -> Result<(), Error> {
		let mut inner = self.lock();

		if inner.jobs.iter().any(|j| j.id == job.id) {
			return Err(Error::Conflict);
		}

		inner.jobs.push(job.clone());

		Ok(())
	}

	pub fn update_job(&self, job: &JobPosting) -> Result<(), Error> {
		let mut inner = self.lock();

		let Some(existing) = inner.jobs.iter_mut().find(|j| j.id == job.id) else {
			return Err(Error::NotFound);
		};

		*existing = job.clone();

		Ok(())
	}

	pub fn delete_job(&self, id: Uuid) -> bool {
		let mut inner = self.lock();
		let before = inner.jobs.len();

		inner.jobs.retain(|j| j.id != id);
		inner.applications.retain(|a| a.job_id != id);
		inner.saved.retain(|s| s.job_id != id);

		inner.jobs.len() < before
	}

	pub fn increment_view_count(&self, id: Uuid) {
		if let Some(job) = self.lock().jobs.iter_mut().find(|j| j.id == id) {
			job.view_count += 1;
		}
	}

	pub fn increment_application_count(&self, id: Uuid) {
		if let Some(job) = self.lock().jobs.iter_mut().find(|j| j.id == id) {
			job.application_count += 1;
		}
	}

	pub fn create_application(&self, application: &Application) -> Result<(), Error> {
		let mut inner = self.lock();

		if inner
			.applications
			.iter()
			.any(|a| a.student_email == application.student_email && a.job_id == application.job_id)
		{
			return Err(Error::Conflict);
		}

		inner.applications.push(application.clone());

		Ok(())
	}

	pub fn applications_for(&self, email: &str) -> Vec<Application> {
		self.lock()
			.applications
			.iter()
			.filter(|a| a.student_email == email)
			.cloned()
			.collect()
	}

	pub fn application(&self, email: &str, job_id: Uuid) -> Option<Application> {
		self.lock()
			.applications
			.iter()
			.find(|a| a.student_email == email && a.job_id == job_id)
			.cloned()
	}

	pub fn save_job(&self, saved: &SavedJob) -> Result<(), Error> {
		let mut inner = self.lock();

		if inner
			.saved
			.iter()
			.any(|s| s.student_email == saved.student_email && s.job_id == saved.job_id)
		{
			return Err(Error::Conflict);
		}

		inner.saved.push(saved.clone());

		Ok(())
	}

	pub fn unsave_job(&self, email: &str, job_id: Uuid) -> bool {
		let mut inner = self.lock();
		let before = inner.saved.len();

		inner
			.saved
			.retain(|s| !(s.student_email == email && s.job_id == job_id));

		inner.saved.len() < before
	}

	pub fn saved_jobs(&self, email: &str) -> Vec<SavedJob> {
		self.lock()
			.saved
			.iter()
			.filter(|s| s.student_email == email)
			.cloned()
			.collect()
	}

	pub fn settings(&self) -> PlatformSettings {
		self.lock().settings.unwrap_or_default()
	}

	pub fn put_settings(&self, settings: &PlatformSettings) {
		self.lock().settings = Some(*settings);
	}
}

#[cfg(test)]
mod test {
	use chrono::Duration;

	use super::*;
	use crate::model::{ContactKind, ContactMethod, JobStatus, JobType};

	fn user(email: &str) -> User {
		let now = Utc::now();

		User {
			id: Uuid::new_v4(),
			email: email.into(),
			password: vec![0; 32],
			first_name: "Test".into(),
			last_name: "User".into(),
			role: Role::Student,
			phone_number: None,
			graduation_year: None,
			company_name: None,
			job_title: None,
			industry: None,
			created_at: now,
			updated_at: now,
		}
	}

	fn posting() -> JobPosting {
		let now = Utc::now();

		JobPosting {
			id: Uuid::new_v4(),
			title: "Backend Intern".into(),
			company: "TechNova".into(),
			industry: "Software".into(),
			job_type: JobType::Internship,
			description: "Build things.".into(),
			skills: vec!["Rust".into()],
			deadline: now + Duration::days(30),
			contact: ContactMethod {
				kind: ContactKind::Email,
				value: "careers@technova.com".into(),
			},
			posted_by: "rep@technova.com".into(),
			status: JobStatus::Approved,
			view_count: 0,
			application_count: 0,
			admin_comments: None,
			approved_by: None,
			reviewed_at: None,
			created_at: now,
			updated_at: now,
		}
	}

	#[test]
	fn test_duplicate_email_conflicts() {
		let store = MemoryStore::default();

		store.create_user(&user("a@b.com")).unwrap();

		assert!(matches!(
			store.create_user(&user("a@b.com")),
			Err(Error::Conflict)
		));
	}

	#[test]
	fn test_job_counters() {
		let store = MemoryStore::default();
		let job = posting();

		store.create_job(&job).unwrap();
		store.increment_view_count(job.id);
		store.increment_view_count(job.id);
		store.increment_application_count(job.id);

		let job = store.job(job.id).unwrap();

		assert_eq!(job.view_count, 2);
		assert_eq!(job.application_count, 1);
	}

	#[test]
	fn test_delete_job_cascades() {
		let store = MemoryStore::default();
		let job = posting();

		store.create_job(&job).unwrap();
		store
			.create_application(&Application {
				student_email: "jane@student.edu".into(),
				job_id: job.id,
				applied_at: Utc::now(),
			})
			.unwrap();

		assert!(store.delete_job(job.id));
		assert!(store.applications_for("jane@student.edu").is_empty());
		assert!(!store.delete_job(job.id));
	}

	#[test]
	fn test_settings_default_until_set() {
		let store = MemoryStore::default();

		assert!(!store.settings().approval_required);

		store.put_settings(&PlatformSettings {
			approval_required: true,
			..PlatformSettings::default()
		});

		assert!(store.settings().approval_required);
	}
}
