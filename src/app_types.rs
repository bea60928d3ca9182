use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LauncherConfig {
    pub(crate) mode: String,
    pub(crate) mode_env_var: String,
    pub(crate) interpreter_path: PathBuf,
    pub(crate) app_dir: PathBuf,
    pub(crate) app_entry_file: String,
    pub(crate) minimize_window: bool,
    pub(crate) allow_overrides: bool,
    pub(crate) candidate_entry_files: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WindowPresentation {
    Normal,
    Hidden,
}

impl WindowPresentation {
    pub(crate) fn from_minimize(minimize: bool) -> Self {
        if minimize {
            Self::Hidden
        } else {
            Self::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LaunchPlan {
    pub(crate) interpreter: PathBuf,
    pub(crate) app_path: PathBuf,
    pub(crate) mode_env: Option<(String, String)>,
    pub(crate) window: WindowPresentation,
}

impl LaunchPlan {
    /// Short display name of the runtime, e.g. `node.exe`.
    pub(crate) fn runtime_name(&self) -> String {
        self.interpreter
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.interpreter.display().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LaunchOutcome {
    pub(crate) exit_code: Option<i32>,
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn window_presentation_follows_minimize_flag() {
        assert_eq!(
            WindowPresentation::from_minimize(true),
            WindowPresentation::Hidden
        );
        assert_eq!(
            WindowPresentation::from_minimize(false),
            WindowPresentation::Normal
        );
    }

    #[test]
    fn runtime_name_uses_interpreter_file_name() {
        let plan = LaunchPlan {
            interpreter: PathBuf::from("/opt/node/bin/node"),
            app_path: PathBuf::from("/srv/app/server.js"),
            mode_env: None,
            window: WindowPresentation::Normal,
        };
        assert_eq!(plan.runtime_name(), "node");
    }
}
