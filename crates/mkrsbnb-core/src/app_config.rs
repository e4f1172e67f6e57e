/// Destination name that routes tabular output to stdout instead of a file.
pub const STDOUT_DESTINATION: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Drop listings whose review count is zero.
    pub reject_no_review: bool,
    /// Output destination; [`STDOUT_DESTINATION`] means stdout.
    pub output: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            reject_no_review: true,
            output: STDOUT_DESTINATION.to_string(),
        }
    }
}
