//! Role-gated visibility and caller-supplied filtering for job postings.
//!
//! Every listing view goes through [`visible`] first and then [`apply`];
//! both are total functions over their input and never fabricate, duplicate
//! or reorder postings. Sorting is stable so equal keys keep input order.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
	model::{JobStatus, JobType, Role},
	route::job::model::JobPosting,
};

/// A status constraint as supplied by callers.
///
/// This is the single place the loose spellings of the legacy views are
/// normalized: `ALL` lifts the constraint and the admin dashboard's
/// `ACTIVE` is an alias for APPROVED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusFilter {
	All,
	Draft,
	Pending,
	#[serde(alias = "ACTIVE")]
	Approved,
	Archived,
}

impl StatusFilter {
	pub fn into_status(self) -> Option<JobStatus> {
		match self {
			Self::All => None,
			Self::Draft => Some(JobStatus::Draft),
			Self::Pending => Some(JobStatus::Pending),
			Self::Approved => Some(JobStatus::Approved),
			Self::Archived => Some(JobStatus::Archived),
		}
	}
}

/// Filter criteria, combined with logical AND. Absent criteria match
/// everything, so the empty criteria set is the identity.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
	/// Case-insensitive substring match over title, company, description
	/// and each skill.
	pub search: Option<String>,
	pub job_type: Option<JobType>,
	/// Exact match, as in the original board's industry dropdown.
	pub industry: Option<String>,
	pub status: Option<JobStatus>,
	/// Case-insensitive substring match.
	pub company: Option<String>,
	/// Case-insensitive substring match against the posting owner.
	pub creator: Option<String>,
	/// Inclusive bounds on the posting's creation date.
	pub from: Option<DateTime<Utc>>,
	pub to: Option<DateTime<Utc>>,
}

impl Criteria {
	pub fn matches(&self, job: &JobPosting) -> bool {
		if let Some(search) = &self.search {
			let term = search.to_lowercase();
			let hit = job.title.to_lowercase().contains(&term)
				|| job.company.to_lowercase().contains(&term)
				|| job.description.to_lowercase().contains(&term)
				|| job
					.skills
					.iter()
					.any(|skill| skill.to_lowercase().contains(&term));

			if !term.is_empty() && !hit {
				return false;
			}
		}

		if self.job_type.is_some_and(|job_type| job.job_type != job_type) {
			return false;
		}

		if self
			.industry
			.as_ref()
			.is_some_and(|industry| &job.industry != industry)
		{
			return false;
		}

		if self.status.is_some_and(|status| job.status != status) {
			return false;
		}

		if self.company.as_ref().is_some_and(|company| {
			!job.company
				.to_lowercase()
				.contains(&company.to_lowercase())
		}) {
			return false;
		}

		if self.creator.as_ref().is_some_and(|creator| {
			!job.posted_by
				.to_lowercase()
				.contains(&creator.to_lowercase())
		}) {
			return false;
		}

		if self.from.is_some_and(|from| job.created_at < from) {
			return false;
		}

		if self.to.is_some_and(|to| job.created_at > to) {
			return false;
		}

		true
	}
}

/// Retains the postings matching `criteria`, preserving input order.
pub fn apply(jobs: Vec<JobPosting>, criteria: &Criteria) -> Vec<JobPosting> {
	jobs.into_iter()
		.filter(|job| criteria.matches(job))
		.collect()
}

/// The subset of `jobs` the viewer is entitled to see.
///
/// Students see only approved, unexpired postings (an expired posting is
/// treated as archived for display even before the lazy archive pass runs);
/// company reps and faculty see their own postings in any status; admins
/// see everything.
pub fn visible(
	jobs: Vec<JobPosting>,
	role: Role,
	viewer_email: &str,
	now: DateTime<Utc>,
) -> Vec<JobPosting> {
	jobs.into_iter()
		.filter(|job| match role {
			Role::Student => job.status == JobStatus::Approved && job.deadline >= now,
			Role::CompanyRep | Role::UgaFaculty => job.posted_by == viewer_email,
			Role::Admin => true,
		})
		.collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
	Title,
	Company,
	PostedDate,
	ReviewedDate,
	ExpirationDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
	#[default]
	Asc,
	Desc,
}

/// Stable sort by `key`. Missing values compare as the earliest instant,
/// so they stay consistently low in either direction and ties keep their
/// input order.
pub fn sort(jobs: &mut [JobPosting], key: SortKey, direction: Direction) {
	jobs.sort_by(|a, b| {
		let ordering = match key {
			SortKey::Title => a.title.cmp(&b.title),
			SortKey::Company => a.company.cmp(&b.company),
			SortKey::PostedDate => a.created_at.cmp(&b.created_at),
			SortKey::ReviewedDate => a.reviewed_at.cmp(&b.reviewed_at),
			SortKey::ExpirationDate => a.deadline.cmp(&b.deadline),
		};

		match direction {
			Direction::Asc => ordering,
			Direction::Desc => ordering.reverse(),
		}
	});
}

#[cfg(test)]
mod test {
	use chrono::Duration;
	use uuid::Uuid;

	use super::*;
	use crate::model::{ContactKind, ContactMethod};

	fn posting(title: &str, industry: &str, status: JobStatus) -> JobPosting {
		let now = Utc::now();

		JobPosting {
			id: Uuid::new_v4(),
			title: title.into(),
			company: "TechNova".into(),
			industry: industry.into(),
			job_type: JobType::Internship,
			description: "Work with the development team.".into(),
			skills: vec!["React".into(), "Git".into()],
			deadline: now + Duration::days(30),
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
			created_at: now - Duration::days(5),
			updated_at: now - Duration::days(5),
		}
	}

	#[test]
	fn test_empty_criteria_is_identity() {
		let jobs = vec![
			posting("Intern A", "Tech", JobStatus::Approved),
			posting("Intern B", "Finance", JobStatus::Pending),
		];
		let titles = |jobs: &[JobPosting]| {
			jobs.iter().map(|job| job.title.clone()).collect::<Vec<_>>()
		};

		let before = titles(&jobs);
		let filtered = apply(jobs, &Criteria::default());

		assert_eq!(titles(&filtered), before);
	}

	#[test]
	fn test_filter_is_idempotent() {
		let jobs = vec![
			posting("Intern A", "Tech", JobStatus::Approved),
			posting("Intern B", "Finance", JobStatus::Approved),
		];
		let criteria = Criteria {
			industry: Some("Tech".into()),
			..Criteria::default()
		};

		let once = apply(jobs, &criteria);
		let twice = apply(once.clone(), &criteria);

		assert_eq!(
			once.iter().map(|job| job.id).collect::<Vec<_>>(),
			twice.iter().map(|job| job.id).collect::<Vec<_>>(),
		);
	}

	#[test]
	fn test_industry_is_exact() {
		let jobs = vec![
			posting("Intern A", "Tech", JobStatus::Approved),
			posting("Intern B", "Finance", JobStatus::Approved),
		];

		let filtered = apply(
			jobs,
			&Criteria {
				industry: Some("Tech".into()),
				..Criteria::default()
			},
		);

		assert_eq!(filtered.len(), 1);
		assert_eq!(filtered[0].title, "Intern A");
	}

	#[test]
	fn test_search_matches_skills_case_insensitively() {
		let jobs = vec![posting("Intern A", "Tech", JobStatus::Approved)];

		let filtered = apply(
			jobs,
			&Criteria {
				search: Some("react".into()),
				..Criteria::default()
			},
		);

		assert_eq!(filtered.len(), 1);
	}

	#[test]
	fn test_unknown_values_match_nothing() {
		let jobs = vec![posting("Intern A", "Tech", JobStatus::Approved)];

		let filtered = apply(
			jobs,
			&Criteria {
				industry: Some("Basket Weaving".into()),
				..Criteria::default()
			},
		);

		assert!(filtered.is_empty());
	}

	#[test]
	fn test_criteria_combine_with_and() {
		let jobs = vec![
			posting("Intern A", "Tech", JobStatus::Approved),
			posting("Intern B", "Tech", JobStatus::Approved),
		];

		let filtered = apply(
			jobs,
			&Criteria {
				industry: Some("Tech".into()),
				search: Some("Intern B".into()),
				..Criteria::default()
			},
		);

		assert_eq!(filtered.len(), 1);
		assert_eq!(filtered[0].title, "Intern B");
	}

	#[test]
	fn test_students_see_only_live_approved_postings() {
		let now = Utc::now();
		let mut expired = posting("Expired", "Tech", JobStatus::Approved);
		expired.deadline = now - Duration::days(1);

		let jobs = vec![
			posting("Open", "Tech", JobStatus::Approved),
			posting("Waiting", "Tech", JobStatus::Pending),
			posting("Gone", "Tech", JobStatus::Archived),
			expired,
		];

		let visible = visible(jobs, Role::Student, "student@university.edu", now);

		assert_eq!(visible.len(), 1);
		assert_eq!(visible[0].title, "Open");
	}

	#[test]
	fn test_owners_see_their_own_postings_in_any_status() {
		let now = Utc::now();
		let mut other = posting("Other", "Tech", JobStatus::Approved);
		other.posted_by = "someone@else.com".into();

		let jobs = vec![
			posting("Mine Approved", "Tech", JobStatus::Approved),
			posting("Mine Pending", "Tech", JobStatus::Pending),
			other,
		];

		let visible = visible(jobs, Role::CompanyRep, "rep@technova.com", now);

		assert_eq!(visible.len(), 2);
	}

	#[test]
	fn test_admins_see_everything() {
		let now = Utc::now();
		let jobs = vec![
			posting("A", "Tech", JobStatus::Draft),
			posting("B", "Tech", JobStatus::Archived),
		];

		assert_eq!(visible(jobs, Role::Admin, "admin@university.edu", now).len(), 2);
	}

	#[test]
	fn test_sort_is_stable_for_equal_keys() {
		let first = posting("Zed", "Tech", JobStatus::Approved);
		let second = posting("Zed", "Tech", JobStatus::Approved);
		let (first_id, second_id) = (first.id, second.id);

		let mut jobs = vec![first, second];
		sort(&mut jobs, SortKey::Title, Direction::Asc);

		assert_eq!(jobs[0].id, first_id);
		assert_eq!(jobs[1].id, second_id);
	}

	#[test]
	fn test_sort_missing_reviewed_date_stays_low() {
		let mut reviewed = posting("A", "Tech", JobStatus::Approved);
		reviewed.reviewed_at = Some(Utc::now());
		let unreviewed = posting("B", "Tech", JobStatus::Pending);

		let mut jobs = vec![reviewed.clone(), unreviewed.clone()];
		sort(&mut jobs, SortKey::ReviewedDate, Direction::Asc);
		assert_eq!(jobs[0].id, unreviewed.id);

		let mut jobs = vec![reviewed.clone(), unreviewed.clone()];
		sort(&mut jobs, SortKey::ReviewedDate, Direction::Desc);
		assert_eq!(jobs[0].id, reviewed.id);
	}

	#[test]
	fn test_sort_by_expiration_descending() {
		let mut soon = posting("Soon", "Tech", JobStatus::Approved);
		soon.deadline = Utc::now() + Duration::days(1);
		let mut late = posting("Late", "Tech", JobStatus::Approved);
		late.deadline = Utc::now() + Duration::days(90);

		let mut jobs = vec![soon, late];
		sort(&mut jobs, SortKey::ExpirationDate, Direction::Desc);

		assert_eq!(jobs[0].title, "Late");
	}

	#[test]
	fn test_status_filter_normalizes_legacy_spellings() {
		assert_eq!(StatusFilter::All.into_status(), None);
		assert_eq!(
			StatusFilter::Approved.into_status(),
			Some(JobStatus::Approved)
		);

		// The admin dashboard's "ACTIVE" deserializes to APPROVED.
		let active: StatusFilter = serde_json::from_str("\"ACTIVE\"").unwrap();
		assert_eq!(active, StatusFilter::Approved);
	}
}
