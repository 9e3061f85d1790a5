//! Domain schema: one struct per entity, string-backed enums for
//! closed vocabularies.

pub mod appointment;
pub mod enums;
pub mod hospital;
pub mod patient;
pub mod prescription;
pub mod reminder;
pub mod schedule;
pub mod user;

pub use appointment::*;
pub use hospital::*;
pub use patient::*;
pub use prescription::*;
pub use reminder::*;
pub use schedule::*;
pub use user::*;
