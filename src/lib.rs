pub mod configuration;
pub mod domain;
pub mod guard;
pub mod mountain_project;
pub mod page;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod ticks;
pub mod toggle;
