use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// The role attached to an account at sign-up.
///
/// Roles are a closed set; the legacy data used loose strings in a few
/// places, which all normalize to one of these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "user_role")]
pub enum Role {
	#[sqlx(rename = "STUDENT")]
	Student,
	#[sqlx(rename = "COMPANY_REP")]
	CompanyRep,
	#[sqlx(rename = "UGA_FACULTY")]
	UgaFaculty,
	#[sqlx(rename = "ADMIN")]
	Admin,
}

impl Role {
	/// Whether the role is allowed to create and own job postings.
	pub fn can_post(self) -> bool {
		matches!(self, Self::CompanyRep | Self::UgaFaculty | Self::Admin)
	}
}

/// The moderation state of a job posting. See [`crate::lifecycle`] for the
/// transitions between states.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, sqlx::Type,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "job_status")]
pub enum JobStatus {
	#[default]
	#[sqlx(rename = "DRAFT")]
	Draft,
	#[sqlx(rename = "PENDING")]
	Pending,
	#[sqlx(rename = "APPROVED")]
	Approved,
	#[sqlx(rename = "ARCHIVED")]
	Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "job_type")]
pub enum JobType {
	#[sqlx(rename = "INTERNSHIP")]
	Internship,
	#[sqlx(rename = "FULL_TIME")]
	FullTime,
	#[sqlx(rename = "CONTRACT")]
	Contract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "contact_kind")]
pub enum ContactKind {
	#[sqlx(rename = "EMAIL")]
	Email,
	#[sqlx(rename = "CAREERS_PAGE")]
	CareersPage,
}

/// How applicants reach the poster: an email address or a careers page URL.
/// The value must be consistent with its declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[validate(schema(function = "validate_contact"))]
pub struct ContactMethod {
	#[serde(rename = "type")]
	pub kind: ContactKind,
	#[validate(length(min = 3, max = 256))]
	pub value: String,
}

fn validate_contact(contact: &ContactMethod) -> Result<(), ValidationError> {
	match contact.kind {
		ContactKind::Email if !contact.value.contains('@') => {
			Err(ValidationError::new("contact value must be an email address"))
		}
		ContactKind::CareersPage
			if !contact.value.starts_with("http://") && !contact.value.starts_with("https://") =>
		{
			Err(ValidationError::new("contact value must be an http(s) url"))
		}
		_ => Ok(()),
	}
}

/// Platform-wide moderation settings, editable from the admin back office.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, Validate)]
pub struct PlatformSettings {
	/// When set, new postings enter PENDING and wait for admin review.
	/// Otherwise they are approved on creation.
	pub approval_required: bool,
	/// Default lifetime offered to new postings, in days.
	#[validate(range(min = 1, max = 365))]
	pub posting_expiration_days: i32,
}

impl Default for PlatformSettings {
	fn default() -> Self {
		Self {
			approval_required: false,
			posting_expiration_days: 60,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_contact_consistency() {
		let contact = ContactMethod {
			kind: ContactKind::Email,
			value: "careers@technova.com".into(),
		};

		assert!(contact.validate().is_ok());

		let contact = ContactMethod {
			kind: ContactKind::CareersPage,
			value: "careers@technova.com".into(),
		};

		assert!(contact.validate().is_err());

		let contact = ContactMethod {
			kind: ContactKind::CareersPage,
			value: "https://technova.com/careers".into(),
		};

		assert!(contact.validate().is_ok());
	}
}
