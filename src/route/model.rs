use schemars::JsonSchema;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// These can be removed when [`serde`] supports
/// literal defaults: <https://github.com/serde-rs/serde/issues/368>
#[inline]
pub(crate) fn one() -> i64 {
	1
}

#[inline]
pub(crate) fn twenty() -> i64 {
	20
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct Paginate {
	/// The page number to return (1-indexed).
	#[validate(range(min = 1, max = 100))]
	#[serde(default = "one")]
	pub page: i64,
	/// The number of items to return per page.
	#[validate(range(min = 1, max = 100))]
	#[serde(default = "twenty")]
	pub size: i64,
}

impl Paginate {
	pub fn offset(&self) -> i64 {
		(self.page - 1) * self.size
	}

	pub fn limit(&self) -> i64 {
		self.size
	}

	/// Pages an already-filtered, already-sorted collection.
	///
	/// Listings filter and sort in memory, so pagination happens after the
	/// fact rather than in the store query.
	pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
		items
			.into_iter()
			.skip(usize::try_from(self.offset()).unwrap_or_default())
			.take(usize::try_from(self.limit()).unwrap_or_default())
			.collect()
	}
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct IdInput {
	pub id: Uuid,
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct JobIdInput {
	pub job_id: Uuid,
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct EmailInput {
	#[validate(email)]
	pub email: String,
}
