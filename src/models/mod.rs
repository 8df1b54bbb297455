pub mod card;
pub mod enrollment;
pub mod otp;
