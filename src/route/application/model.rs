pub use crate::route::model::Paginate;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

use crate::route::job::model::JobPosting;

/// A student's application to a posting. One per student and posting.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct Application {
	pub student_email: String,
	pub job_id: Uuid,
	pub applied_at: DateTime<Utc>,
}

/// An application joined with the posting it targets, as presented on the
/// "my applications" page.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ApplicationDetail {
	#[serde(flatten)]
	pub application: Application,
	pub job: JobPosting,
}
