pub use crate::route::model::Paginate;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

use crate::route::job::model::JobPosting;

/// A posting bookmarked by a student.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SavedJob {
	pub student_email: String,
	pub job_id: Uuid,
	pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct SavedJobDetail {
	#[serde(flatten)]
	pub saved: SavedJob,
	pub job: JobPosting,
}
