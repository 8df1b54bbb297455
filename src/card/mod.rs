//! Card input core: pure validation and input-mask helpers shared by the
//! enrollment controller and the keystroke endpoints.

pub mod format;
pub mod validate;
