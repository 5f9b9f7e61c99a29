pub mod configuration;
pub mod domain;
pub mod mail;
pub mod routes;
pub mod startup;
pub mod telemetry;
