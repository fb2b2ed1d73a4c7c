//! Core of the slotbook demo-booking flow.
//!
//! - `wizard`: the four-step flow and its guards, the only entry point a
//!   front end needs
//! - `validate`, `contact`: contact form validation
//! - `slot`, `time_zone`, `questionnaire`: the fixed catalogs and their
//!   selection state
//! - `booking`: the request sent to the booking service and its HTTP client
//! - `config`: where the booking service lives

pub mod booking;
pub mod config;
pub mod contact;
pub mod error;
pub mod questionnaire;
pub mod slot;
pub mod time_zone;
pub mod validate;
pub mod wizard;

pub use error::{SlotbookError, SlotbookResult};
