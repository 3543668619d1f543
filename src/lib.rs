#[macro_use]
extern crate rocket;

#[macro_use]
extern crate log;

use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod cors;
pub mod error;
pub mod logging;
pub mod mail;
pub mod model;

pub use config::Config;

/// Assemble the server: every route plus the fairings that load the config
/// and connect the external services.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .attach(config::ConfigFairing)
        .attach(config::DatabaseFairing)
        .attach(config::AwsFairing)
        .attach(logging::LoggerFairing)
        .attach(cors::CorsFairing)
}
