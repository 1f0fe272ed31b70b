//! Operation boundary macros
//!
//! Every public operation logs one `start` event and then exactly one of
//! `end` or `end_error`, all carrying `component`, `op` and `event`.
//! Extra `key = value` fields are passed through to `tracing`.

/// Log the start of an operation
///
/// ```
/// # use apiregions_core::log_op_start;
/// log_op_start!("resolve_regions");
/// log_op_start!("resolve_regions", feature_id = "g:f:1");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::apiregions_core_types::schema::EVENT_START,
            $($($field)*)?
        )
    };
}

/// Log the successful end of an operation with its duration
///
/// ```
/// # use apiregions_core::log_op_end;
/// log_op_end!("check_overlaps", duration_ms = 42, overlap_count = 0);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::apiregions_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        )
    };
}

/// Log the failed end of an operation
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError);
/// its kind, stable code and category are recorded as `err.*` fields.
///
/// ```
/// # use apiregions_core::{log_op_error, errors::ApiRegionsError};
/// log_op_error!("check_overlaps", ApiRegionsError::NoRegionsSpecified, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::apiregions_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.category = ?ex_err.category(),
            $($($field)*)?
        );
    }};
}
