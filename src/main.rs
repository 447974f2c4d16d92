#![warn(clippy::pedantic)]

mod error;
mod extract;
mod filter;
mod lifecycle;
mod model;
mod openapi;
mod ratelimit;
mod route;
mod seed;
mod session;
mod store;
mod trace;

#[cfg(test)]
mod test;

use std::{net::SocketAddr, sync::Arc};

use aide::{axum::ApiRouter, openapi::OpenApi};
use argon2::Argon2;
use axum::{Extension, Router};
use tower_governor::GovernorLayer;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

pub use error::AppError;

use store::Store;

pub type Database = sqlx::Pool<sqlx::Postgres>;
pub type AppState = State;

/// The shared application state.
///
/// This should contain all shared dependencies that handlers need to access,
/// such as the storage backend or a hash configuration (if it's expensive to
/// create).
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub store: Store,
	pub hasher: Argon2<'static>,
}

/// Builds the full application router and its OpenAPI document.
///
/// Rate limiting is optional so tests can hammer the API without tripping
/// the per-ip limits.
pub fn api(state: AppState, ratelimit: bool) -> Router {
	aide::gen::on_error(|error| tracing::error!(%error, "openapi generation error"));
	aide::gen::extract_schemas(true);

	let mut docs = OpenApi::default();

	let mut auth = route::auth::routes();
	let limit = if ratelimit {
		let default = ratelimit::default();
		let secure = ratelimit::secure();

		ratelimit::cleanup_old_limits(&[&default, &secure]);

		// Credentials take a stricter limit than the rest of the API.
		auth = auth.layer(GovernorLayer { config: secure });

		Some(default)
	} else {
		None
	};

	let router = ApiRouter::new()
		.nest("/auth", auth)
		.nest("/jobs", route::job::routes())
		.nest("/applications", route::application::routes())
		.nest("/saved", route::saved::routes())
		.nest("/admin", route::admin::routes())
		.nest("/docs", route::docs::routes())
		.finish_api_with(&mut docs, openapi::docs);

	let router = match limit {
		Some(config) => router.layer(GovernorLayer { config }),
		None => router,
	};

	router
		.layer(Extension(Arc::new(docs)))
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
		.layer(CompressionLayer::new())
		.with_state(state)
}

#[tokio::main]
async fn main() {
	let _guard = trace::init_tracing_subscriber();

	dotenvy::dotenv().ok();

	let hasher = Argon2::default();
	let store = if std::env::var("STORE").is_ok_and(|store| store == "memory") {
		tracing::warn!("using the in-memory store; data will not survive a restart");

		Store::memory_seeded(&hasher)
	} else {
		let database = Database::connect(
			&std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
		)
		.await
		.expect("failed to connect to database");

		sqlx::migrate!()
			.run(&database)
			.await
			.expect("failed to run migrations");

		Store::postgres(database)
	};

	let app = api(State { store, hasher }, true);

	let port = std::env::var("PORT").map_or_else(
		|_| 3000,
		|port| port.parse().expect("PORT must be a number"),
	);

	let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
		.await
		.expect("failed to bind to port");

	tracing::info!("listening on port {}", port);

	axum::serve(
		listener,
		app.into_make_service_with_connect_info::<SocketAddr>(),
	)
	.await
	.unwrap();
}
