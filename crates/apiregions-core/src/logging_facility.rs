//! Structured logging for region resolution and overlap checks
//!
//! `init` installs the process-wide subscriber once; the `log_op_*` macros
//! mark operation boundaries with the field names from
//! `apiregions_core_types::schema`; `test_capture` records events in memory
//! for assertions.
//!
//! ```rust
//! use apiregions_core::logging_facility::{init, Profile};
//!
//! init(Profile::Production);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
