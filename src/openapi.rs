use std::borrow::Cow;

use aide::{
	openapi::{ApiKeyLocation, SecurityScheme, Tag},
	transform::TransformOpenApi,
};

use crate::{error, extract::Json, session};

pub const SECURITY_SCHEME_SESSION: &str = "Session";

pub mod tag {
	pub const AUTH: &str = "Auth";
	pub const JOB: &str = "Job";
	pub const APPLICATION: &str = "Application";
	pub const SAVED: &str = "Saved";
	pub const ADMIN: &str = "Admin";
}

pub fn docs(api: TransformOpenApi) -> TransformOpenApi {
	api.title("Campus Job Board API")
		.summary("A moderated job board for students, companies and faculty")
		.description(include_str!("../README.md"))
		.tag(Tag {
			name: tag::AUTH.into(),
			description: Some("Account registration and sessions".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::JOB.into(),
			description: Some("Job posting management".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::APPLICATION.into(),
			description: Some("Student applications".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::SAVED.into(),
			description: Some("Bookmarked postings".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::ADMIN.into(),
			description: Some("Moderation and platform administration".into()),
			..Default::default()
		})
		.security_scheme(
			SECURITY_SCHEME_SESSION,
			SecurityScheme::ApiKey {
				location: ApiKeyLocation::Cookie,
				name: session::COOKIE_NAME.into(),
				description: Some("A user session cookie".into()),
				extensions: Default::default(),
			},
		)
		.default_response_with::<Json<error::Message>, _>(|res| {
			res.example(error::Message {
				content: "error message".into(),
				field: Some("optional field".into()),
				details: Some(Cow::Owned({
					let mut map = error::Map::new();
					map.insert("key".into(), serde_json::json!("value"));
					map
				})),
			})
		})
}
