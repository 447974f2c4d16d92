pub mod admin;
pub mod application;
pub mod auth;
pub mod docs;
pub mod job;
pub mod model;
pub mod saved;
