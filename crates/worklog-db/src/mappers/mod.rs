//! Entity <-> model mappers

mod delivery;
mod event_log;
mod project;
mod task;
mod user;
mod work_log;
