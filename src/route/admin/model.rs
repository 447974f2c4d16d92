pub use crate::route::model::Paginate;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{model::Role, route::job::model::JobPosting};

#[derive(Deserialize, Validate, JsonSchema)]
pub struct ApproveInput {
	/// Notes from the reviewing admin, shown to the posting's owner.
	#[validate(length(max = 2000))]
	pub admin_comments: Option<String>,
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct RoleInput {
	pub role: Role,
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct SeedInput {
	/// Caps the number of postings inserted.
	#[validate(range(min = 1, max = 100))]
	pub limit: Option<usize>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct SeedReport {
	/// How many fixture postings were inserted. Already-present fixtures
	/// are skipped.
	pub inserted: usize,
}

#[derive(Debug, Default, Serialize, JsonSchema)]
pub struct StatusCounts {
	pub draft: usize,
	pub pending: usize,
	pub approved: usize,
	pub archived: usize,
}

/// The dashboard snapshot: aggregate counters and the most viewed postings.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Metrics {
	pub total_users: usize,
	pub total_jobs: usize,
	pub status_counts: StatusCounts,
	pub total_views: i64,
	pub total_applications: i64,
	pub top_viewed: Vec<JobPosting>,
}
