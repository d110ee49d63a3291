//! Process exit codes. Scripts depend on these values.

use rps_judge_core::errors::ConfigError;

pub const SUCCESS: i32 = 0;
pub const RUNTIME_ERROR: i32 = 1; // I/O failure or no verdict for a one-shot round
pub const CONFIG_ERROR: i32 = 2; // Bad config file, flags, or missing credentials

pub fn for_error(err: &anyhow::Error) -> i32 {
    if err.chain().any(|cause| cause.is::<ConfigError>()) {
        CONFIG_ERROR
    } else {
        RUNTIME_ERROR
    }
}
