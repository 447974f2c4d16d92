//! The moderation state machine for job postings.
//!
//! A posting is born in DRAFT (saved without submission) or directly in
//! PENDING/APPROVED depending on [`PlatformSettings::approval_required`].
//! Admins move postings between states explicitly; owner edits and passing
//! deadlines move them implicitly. ARCHIVED is terminal.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
	model::{JobStatus, PlatformSettings, Role},
	route::job::model::JobPosting,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("only admins may change a posting's moderation state")]
	Forbidden,
	#[error("cannot move a posting from {from:?} to {to:?}")]
	InvalidTransition { from: JobStatus, to: JobStatus },
}

/// The state a freshly created posting lands in.
pub fn initial_status(draft: bool, settings: &PlatformSettings) -> JobStatus {
	if draft {
		JobStatus::Draft
	} else if settings.approval_required {
		JobStatus::Pending
	} else {
		JobStatus::Approved
	}
}

/// Applies an explicit status transition on behalf of `actor`.
///
/// Returns `Ok(true)` if the posting changed, `Ok(false)` for the idempotent
/// no-op case (`target` equals the current status; nothing is stamped).
/// Explicit transitions into APPROVED and ARCHIVED require the ADMIN role;
/// APPROVED is only reachable from PENDING and additionally stamps
/// `approved_by` and `reviewed_at`. No transition leaves ARCHIVED.
pub fn transition(
	job: &mut JobPosting,
	target: JobStatus,
	actor_role: Role,
	actor_email: &str,
	now: DateTime<Utc>,
) -> Result<bool, Error> {
	if job.status == target {
		return Ok(false);
	}

	let invalid = Error::InvalidTransition {
		from: job.status,
		to: target,
	};

	if job.status == JobStatus::Archived {
		return Err(invalid);
	}

	match target {
		JobStatus::Approved => {
			if actor_role != Role::Admin {
				return Err(Error::Forbidden);
			}

			if job.status != JobStatus::Pending {
				return Err(invalid);
			}

			job.approved_by = Some(actor_email.to_owned());
			job.reviewed_at = Some(now);
		}
		JobStatus::Archived => {
			if actor_role != Role::Admin {
				return Err(Error::Forbidden);
			}
		}
		// PENDING is only reachable implicitly through an owner edit,
		// DRAFT only at creation.
		JobStatus::Pending | JobStatus::Draft => return Err(invalid),
	}

	job.status = target;
	job.updated_at = now;

	Ok(true)
}

/// The status a posting holds after its owner edits its content.
///
/// Edits to APPROVED or PENDING postings land back in PENDING so an admin
/// can re-vet them; drafts stay drafts; archived postings cannot be edited.
pub fn status_after_edit(current: JobStatus) -> Result<JobStatus, Error> {
	match current {
		JobStatus::Approved | JobStatus::Pending => Ok(JobStatus::Pending),
		JobStatus::Draft => Ok(JobStatus::Draft),
		JobStatus::Archived => Err(Error::InvalidTransition {
			from: JobStatus::Archived,
			to: JobStatus::Pending,
		}),
	}
}

/// Submits a DRAFT into the review flow, landing in PENDING or APPROVED
/// per the platform settings.
pub fn submit(
	job: &mut JobPosting,
	settings: &PlatformSettings,
	now: DateTime<Utc>,
) -> Result<(), Error> {
	let target = initial_status(false, settings);

	if job.status != JobStatus::Draft {
		return Err(Error::InvalidTransition {
			from: job.status,
			to: target,
		});
	}

	job.status = target;
	job.updated_at = now;

	Ok(())
}

/// Lazily archives every posting whose deadline has passed, returning the
/// ids that changed so the caller can persist them. Runs before any
/// "my postings" or admin listing is presented, so expired postings never
/// show up as active.
pub fn auto_archive_expired(jobs: &mut [JobPosting], now: DateTime<Utc>) -> Vec<Uuid> {
	let mut archived = Vec::new();

	for job in jobs {
		if job.status != JobStatus::Archived && job.deadline < now {
			job.status = JobStatus::Archived;
			job.updated_at = now;
			archived.push(job.id);
		}
	}

	archived
}

#[cfg(test)]
mod test {
	use chrono::Duration;

	use super::*;
	use crate::model::{ContactKind, ContactMethod, JobType};

	fn posting(status: JobStatus, deadline: DateTime<Utc>) -> JobPosting {
		JobPosting {
			id: Uuid::new_v4(),
			title: "Software Engineer Intern".into(),
			company: "TechNova".into(),
			industry: "Software".into(),
			job_type: JobType::Internship,
			description: "Build things.".into(),
			skills: vec!["Rust".into()],
			deadline,
			contact: ContactMethod {
				kind: ContactKind::Email,
				value: "careers@technova.com".into(),
			},
			posted_by: "rep@technova.com".into(),
			status,
			view_count: 0,
			application_count: 0,
			admin_comments: None,
			approved_by: None,
			reviewed_at: None,
			created_at: Utc::now() - Duration::days(5),
			updated_at: Utc::now() - Duration::days(5),
		}
	}

	fn future() -> DateTime<Utc> {
		Utc::now() + Duration::days(30)
	}

	#[test]
	fn test_admin_approves_pending() {
		let now = Utc::now();
		let mut job = posting(JobStatus::Pending, future());

		let changed = transition(
			&mut job,
			JobStatus::Approved,
			Role::Admin,
			"admin@university.edu",
			now,
		)
		.unwrap();

		assert!(changed);
		assert_eq!(job.status, JobStatus::Approved);
		assert_eq!(job.approved_by.as_deref(), Some("admin@university.edu"));
		assert_eq!(job.reviewed_at, Some(now));
		assert_eq!(job.updated_at, now);
	}

	#[test]
	fn test_non_admin_cannot_approve() {
		let mut job = posting(JobStatus::Pending, future());

		let error = transition(
			&mut job,
			JobStatus::Approved,
			Role::CompanyRep,
			"rep@technova.com",
			Utc::now(),
		)
		.unwrap_err();

		assert_eq!(error, Error::Forbidden);
		assert_eq!(job.status, JobStatus::Pending);
	}

	#[test]
	fn test_transition_is_idempotent() {
		let now = Utc::now();
		let mut job = posting(JobStatus::Approved, future());
		let updated_at = job.updated_at;

		let changed = transition(
			&mut job,
			JobStatus::Approved,
			Role::Admin,
			"admin@university.edu",
			now,
		)
		.unwrap();

		assert!(!changed);
		assert_eq!(job.updated_at, updated_at);
		assert_eq!(job.approved_by, None);
	}

	#[test]
	fn test_archived_is_terminal() {
		let mut job = posting(JobStatus::Archived, future());

		let error = transition(
			&mut job,
			JobStatus::Approved,
			Role::Admin,
			"admin@university.edu",
			Utc::now(),
		)
		.unwrap_err();

		assert!(matches!(error, Error::InvalidTransition { .. }));
	}

	#[test]
	fn test_draft_cannot_be_approved_directly() {
		let mut job = posting(JobStatus::Draft, future());

		let error = transition(
			&mut job,
			JobStatus::Approved,
			Role::Admin,
			"admin@university.edu",
			Utc::now(),
		)
		.unwrap_err();

		assert!(matches!(error, Error::InvalidTransition { .. }));
	}

	#[test]
	fn test_admin_archives_any_active_state() {
		for status in [JobStatus::Draft, JobStatus::Pending, JobStatus::Approved] {
			let now = Utc::now();
			let mut job = posting(status, future());

			let changed = transition(
				&mut job,
				JobStatus::Archived,
				Role::Admin,
				"admin@university.edu",
				now,
			)
			.unwrap();

			assert!(changed);
			assert_eq!(job.status, JobStatus::Archived);
			assert_eq!(job.updated_at, now);
		}
	}

	#[test]
	fn test_edit_forces_re_review() {
		assert_eq!(
			status_after_edit(JobStatus::Approved).unwrap(),
			JobStatus::Pending
		);
		assert_eq!(
			status_after_edit(JobStatus::Pending).unwrap(),
			JobStatus::Pending
		);
		assert_eq!(
			status_after_edit(JobStatus::Draft).unwrap(),
			JobStatus::Draft
		);
		assert!(status_after_edit(JobStatus::Archived).is_err());
	}

	#[test]
	fn test_initial_status_follows_settings() {
		let auto = PlatformSettings {
			approval_required: false,
			..PlatformSettings::default()
		};
		let reviewed = PlatformSettings {
			approval_required: true,
			..PlatformSettings::default()
		};

		assert_eq!(initial_status(false, &auto), JobStatus::Approved);
		assert_eq!(initial_status(false, &reviewed), JobStatus::Pending);
		assert_eq!(initial_status(true, &auto), JobStatus::Draft);
	}

	#[test]
	fn test_submit_leaves_draft() {
		let now = Utc::now();
		let mut job = posting(JobStatus::Draft, future());

		submit(&mut job, &PlatformSettings::default(), now).unwrap();

		assert_eq!(job.status, JobStatus::Approved);
		assert_eq!(job.updated_at, now);

		// Submitting twice is an invalid transition.
		assert!(submit(&mut job, &PlatformSettings::default(), now).is_err());
	}

	#[test]
	fn test_auto_archive_expired() {
		let now = Utc::now();
		let expired = posting(JobStatus::Approved, now - Duration::days(1));
		let open = posting(JobStatus::Approved, now + Duration::days(1));
		let already = posting(JobStatus::Archived, now - Duration::days(10));

		let expired_id = expired.id;
		let mut jobs = vec![expired, open, already];

		let archived = auto_archive_expired(&mut jobs, now);

		assert_eq!(archived, vec![expired_id]);
		assert_eq!(jobs[0].status, JobStatus::Archived);
		assert_eq!(jobs[0].updated_at, now);
		assert_eq!(jobs[0].view_count, 0);
		assert_eq!(jobs[1].status, JobStatus::Approved);
		// Already-archived postings are left untouched.
		assert_ne!(jobs[2].updated_at, now);
	}
}
