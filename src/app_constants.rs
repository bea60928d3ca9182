pub(crate) const DEFAULT_CONFIG_FILE: &str = "config.xml";
pub(crate) const CONFIG_PATH_ENV: &str = "STARTNODE_CONFIG";
pub(crate) const LOG_FILE_ENV: &str = "STARTNODE_LOG_FILE";
pub(crate) const DEFAULT_MODE_ENV_VAR: &str = "NODE_ENV";
pub(crate) const DEFAULT_LOG_FILTER: &str = "info";
pub(crate) const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Exit status after a failure was reported; nothing was run.
pub(crate) const EXIT_ABORTED: i32 = 0;
/// Exit status once the child has finished and the user acknowledged it.
pub(crate) const EXIT_CHILD_FINISHED: i32 = 1;
