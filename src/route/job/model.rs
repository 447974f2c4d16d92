pub use crate::route::model::Paginate;

use chrono::{DateTime, Utc};
use macros::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
	filter::{Criteria, Direction, SortKey, StatusFilter},
	model::{ContactMethod, JobStatus, JobType},
};

/// A single job posting.
///
/// Server-managed fields (moderation state, counters, audit stamps) are
/// `skip_deserializing` so they never appear in the create and update
/// inputs derived from this struct.
#[model]
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate)]
pub struct JobPosting {
	/// The unique identifier of the posting.
	#[serde(skip_deserializing)]
	pub id: Uuid,
	/// The title of the position.
	#[validate(length(min = 3, max = 128))]
	pub title: String,
	/// The company offering the position.
	#[validate(length(min = 1, max = 128))]
	pub company: String,
	/// The industry of the position, matched exactly when filtering.
	#[validate(length(min = 1, max = 64))]
	pub industry: String,
	pub job_type: JobType,
	/// The description of the position in plain text.
	#[validate(length(min = 10, max = 5000))]
	pub description: String,
	/// The skills the position asks for.
	#[validate(custom(function = "validate_skills"))]
	pub skills: Vec<String>,
	/// The application deadline. Postings past it are lazily archived.
	#[validate(custom(function = "validate_deadline"))]
	pub deadline: DateTime<Utc>,
	/// How applicants get in touch.
	#[validate(nested)]
	pub contact: ContactMethod,
	/// The email of the account that created the posting.
	#[serde(skip_deserializing)]
	pub posted_by: String,
	/// The moderation state of the posting.
	#[serde(skip_deserializing)]
	pub status: JobStatus,
	#[serde(skip_deserializing)]
	pub view_count: i32,
	#[serde(skip_deserializing)]
	pub application_count: i32,
	/// Moderation notes, set when an admin reviews the posting.
	#[serde(skip_deserializing)]
	pub admin_comments: Option<String>,
	/// The email of the admin that approved the posting.
	#[serde(skip_deserializing)]
	pub approved_by: Option<String>,
	#[serde(skip_deserializing)]
	pub reviewed_at: Option<DateTime<Utc>>,
	#[serde(skip_deserializing)]
	pub created_at: DateTime<Utc>,
	#[serde(skip_deserializing)]
	pub updated_at: DateTime<Utc>,
}

fn validate_deadline(deadline: &DateTime<Utc>) -> Result<(), ValidationError> {
	if *deadline <= Utc::now() {
		return Err(ValidationError::new("deadline_in_past"));
	}

	Ok(())
}

fn validate_skills(skills: &[String]) -> Result<(), ValidationError> {
	if skills.iter().any(|skill| skill.trim().is_empty()) {
		return Err(ValidationError::new("blank_skill"));
	}

	Ok(())
}

/// A posting as presented on the detail page, annotated with the viewing
/// student's application state.
#[derive(Debug, Serialize, JsonSchema)]
pub struct JobDetail {
	#[serde(flatten)]
	pub job: JobPosting,
	/// Whether the viewer has applied. Always `false` for non-students.
	pub has_applied: bool,
	pub applied_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct CreateJobQuery {
	/// Save the posting as a draft instead of submitting it for review.
	#[serde(default)]
	pub draft: bool,
}

/// The listing query: filter criteria, an optional sort and pagination.
///
/// Pagination is inlined rather than flattened because the query-string
/// deserializer cannot flatten non-string fields.
#[derive(Deserialize, Validate, JsonSchema)]
pub struct ListJobsQuery {
	#[validate(length(min = 1, max = 128))]
	pub search: Option<String>,
	pub job_type: Option<JobType>,
	#[validate(length(min = 1, max = 64))]
	pub industry: Option<String>,
	pub status: Option<StatusFilter>,
	#[validate(length(min = 1, max = 128))]
	pub company: Option<String>,
	#[validate(length(min = 1, max = 128))]
	pub creator: Option<String>,
	pub from: Option<DateTime<Utc>>,
	pub to: Option<DateTime<Utc>>,
	pub sort: Option<SortKey>,
	#[serde(default)]
	pub direction: Direction,
	#[validate(range(min = 1, max = 100))]
	#[serde(default = "crate::route::model::one")]
	pub page: i64,
	#[validate(range(min = 1, max = 100))]
	#[serde(default = "crate::route::model::twenty")]
	pub size: i64,
}

impl ListJobsQuery {
	pub fn criteria(&self) -> Criteria {
		Criteria {
			search: self.search.clone(),
			job_type: self.job_type,
			industry: self.industry.clone(),
			status: self.status.and_then(StatusFilter::into_status),
			company: self.company.clone(),
			creator: self.creator.clone(),
			from: self.from,
			to: self.to,
		}
	}

	pub fn paginate(&self) -> Paginate {
		Paginate {
			page: self.page,
			size: self.size,
		}
	}
}
