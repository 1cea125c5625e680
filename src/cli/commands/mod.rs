//! CLI command implementations
//!
//! Commands that need configuration receive it already loaded and
//! validated from `main`.

pub mod check_status;
pub mod init;
pub mod status;
pub mod trigger;
pub mod validate;
