//! Demo fixtures: the bootstrap admin account and a set of sample
//! postings. Fixture ids are fixed so re-seeding is idempotent.

use argon2::Argon2;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
	model::{ContactKind, ContactMethod, JobStatus, JobType, Role},
	route::{auth, job::model::JobPosting},
};

pub const ADMIN_EMAIL: &str = "admin@university.edu";
pub const ADMIN_PASSWORD: &str = "changeme-admin";

/// The bootstrap admin. Admins cannot self-register, so demo deployments
/// start from this account and change its password.
pub fn admin(hasher: &Argon2<'_>) -> auth::model::User {
	let id = Uuid::from_u128(1);
	let now = Utc::now();

	auth::model::User {
		id,
		email: ADMIN_EMAIL.into(),
		password: auth::route::hash_password(hasher, ADMIN_PASSWORD, &id)
			.expect("hashing fixture credentials")
			.to_vec(),
		first_name: "Avery".into(),
		last_name: "Admin".into(),
		role: Role::Admin,
		phone_number: None,
		graduation_year: None,
		company_name: None,
		job_title: Some("Career Services Coordinator".into()),
		industry: None,
		created_at: now,
		updated_at: now,
	}
}

#[allow(clippy::too_many_arguments)]
fn posting(
	n: u128,
	title: &str,
	company: &str,
	industry: &str,
	job_type: JobType,
	description: &str,
	skills: &[&str],
	days_left: i64,
	status: JobStatus,
) -> JobPosting {
	let now = Utc::now();
	let reviewed = status == JobStatus::Approved;

	JobPosting {
		// Offset past the bootstrap admin's fixture id.
		id: Uuid::from_u128(0x1000 + n),
		title: title.into(),
		company: company.into(),
		industry: industry.into(),
		job_type,
		description: description.into(),
		skills: skills.iter().map(ToString::to_string).collect(),
		deadline: now + Duration::days(days_left),
		contact: ContactMethod {
			kind: ContactKind::Email,
			value: format!(
				"careers@{}.example.com",
				company.to_lowercase().replace(' ', "-")
			),
		},
		posted_by: ADMIN_EMAIL.into(),
		status,
		view_count: 0,
		application_count: 0,
		admin_comments: None,
		approved_by: reviewed.then(|| ADMIN_EMAIL.into()),
		reviewed_at: reviewed.then(|| now - Duration::days(1)),
		created_at: now - Duration::days(7),
		updated_at: now - Duration::days(1),
	}
}

pub fn postings() -> Vec<JobPosting> {
	vec![
		posting(
			1,
			"Software Engineer Intern",
			"TechNova",
			"Software",
			JobType::Internship,
			"Join the platform team for a summer building internal tooling in Rust and TypeScript.",
			&["Rust", "TypeScript", "Git"],
			45,
			JobStatus::Approved,
		),
		posting(
			2,
			"Data Analyst",
			"Peach State Analytics",
			"Data",
			JobType::FullTime,
			"Analyze student outcome data and build dashboards for university partners.",
			&["SQL", "Python", "Tableau"],
			30,
			JobStatus::Approved,
		),
		posting(
			3,
			"Marketing Assistant",
			"Bulldog Media",
			"Marketing",
			JobType::Contract,
			"Support campaign planning and social media for local clients, 15 hours a week.",
			&["Copywriting", "Social Media"],
			21,
			JobStatus::Approved,
		),
		posting(
			4,
			"Research Assistant, Plant Biology",
			"University Research Labs",
			"Research",
			JobType::Internship,
			"Assist with greenhouse experiments and data collection. Work-study eligible.",
			&["Lab Technique", "Data Entry"],
			60,
			JobStatus::Approved,
		),
		posting(
			5,
			"Junior Accountant",
			"Classic City Accounting",
			"Finance",
			JobType::FullTime,
			"Entry-level accounting position supporting quarterly closes for small businesses.",
			&["Excel", "QuickBooks"],
			14,
			JobStatus::Pending,
		),
		posting(
			6,
			"Mobile Developer Co-op",
			"TechNova",
			"Software",
			JobType::Internship,
			"Two-semester co-op on the mobile team. Swift or Kotlin experience preferred.",
			&["Swift", "Kotlin"],
			90,
			JobStatus::Pending,
		),
		posting(
			7,
			"Event Staff (Draft)",
			"Athens Events Co",
			"Hospitality",
			JobType::Contract,
			"Weekend event staffing for football season. Draft pending final dates.",
			&["Customer Service"],
			10,
			JobStatus::Draft,
		),
		posting(
			8,
			"Summer Camp Counselor",
			"Camp Oconee",
			"Education",
			JobType::Contract,
			"Seasonal position, now closed. Kept for reference.",
			&["Childcare", "First Aid"],
			-5,
			JobStatus::Archived,
		),
	]
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_fixture_ids_are_stable() {
		let first = postings();
		let second = postings();

		assert_eq!(
			first.iter().map(|job| job.id).collect::<Vec<_>>(),
			second.iter().map(|job| job.id).collect::<Vec<_>>(),
		);
	}

	#[test]
	fn test_fixtures_cover_every_status() {
		let postings = postings();

		for status in [
			JobStatus::Draft,
			JobStatus::Pending,
			JobStatus::Approved,
			JobStatus::Archived,
		] {
			assert!(postings.iter().any(|job| job.status == status));
		}
	}

	#[test]
	fn test_approved_fixtures_are_stamped() {
		for job in postings() {
			if job.status == JobStatus::Approved {
				assert_eq!(job.approved_by.as_deref(), Some(ADMIN_EMAIL));
				assert!(job.reviewed_at.is_some());
			}
		}
	}
}
