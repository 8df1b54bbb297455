//! # API Module
//!
//! Business logic of the enrollment flow: full-form validation, the
//! card/OTP submit orchestration, and the keystroke-time field checks.

pub mod enrollment;
