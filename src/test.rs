//! Shared helpers for the route tests. Every test runs against the
//! in-memory store, so there is no database to stand up or tear down.

pub use serde_json::json;

pub use crate::{seed::ADMIN_EMAIL, store::Store};

use axum_test::{TestServer, TestServerConfig};

use crate::{api, seed, State};

/// A store pre-seeded with the fixture admin account.
pub fn seeded() -> Store {
	Store::memory_seeded(&argon2::Argon2::default())
}

/// Starts a test server over `store`. Servers sharing a store act as
/// different clients of the same deployment, each with its own cookies.
pub fn app(store: Store) -> TestServer {
	let state = State {
		store,
		hasher: argon2::Argon2::default(),
	};

	TestServer::new_with_config(
		api(state, false),
		TestServerConfig {
			save_cookies: true,
			..TestServerConfig::default()
		},
	)
	.expect("failed to start test server")
}

/// Registers an account and leaves its session cookie on the server.
pub async fn register(app: &TestServer, email: &str, role: &str) {
	let mut body = json!({
		"email": email,
		"password": "hunter2hunter",
		"first_name": "Test",
		"last_name": "User",
		"role": role,
	});

	if role == "COMPANY_REP" || role == "UGA_FACULTY" {
		body["company_name"] = json!("TechNova");
	}

	let response = app.post("/auth/register").json(&body).await;

	assert_eq!(response.status_code(), 200);
}

/// Logs in as the fixture admin. Requires a [`seeded`] store.
pub async fn login_admin(app: &TestServer) {
	let response = app
		.post("/auth/login")
		.json(&json!({
			"email": ADMIN_EMAIL,
			"password": seed::ADMIN_PASSWORD,
		}))
		.await;

	assert_eq!(response.status_code(), 200);
}

/// A valid posting body with a deadline a month out.
pub fn job_input(title: &str) -> serde_json::Value {
	json!({
		"title": title,
		"company": "TechNova",
		"industry": "Software",
		"job_type": "INTERNSHIP",
		"description": "Work with the development team on internal tooling.",
		"skills": ["Rust", "Git"],
		"deadline": chrono::Utc::now() + chrono::Duration::days(30),
		"contact": { "type": "EMAIL", "value": "careers@technova.com" },
	})
}
