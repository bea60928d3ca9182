use std::process::Command;

#[cfg(target_os = "windows")]
use std::os::windows::process::CommandExt;

use crate::{LaunchError, LaunchOutcome, LaunchPlan, WindowPresentation};

#[cfg(target_os = "windows")]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LaunchPhase {
    Idle,
    Starting,
    Running,
    Exited,
}

#[derive(Debug)]
pub(crate) struct ProcessLauncher {
    phase: LaunchPhase,
}

impl Default for ProcessLauncher {
    fn default() -> Self {
        Self {
            phase: LaunchPhase::Idle,
        }
    }
}

impl ProcessLauncher {
    pub(crate) fn phase(&self) -> LaunchPhase {
        self.phase
    }

    fn transition(&mut self, next: LaunchPhase) {
        tracing::debug!("launcher phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    /// Spawns the runtime and blocks until it exits.
    pub(crate) fn launch(&mut self, plan: &LaunchPlan) -> Result<LaunchOutcome, LaunchError> {
        self.transition(LaunchPhase::Starting);
        let command_line = describe_command(plan);
        tracing::info!("launching {command_line}");

        let mut command = build_command(plan);
        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(error) => {
                self.transition(LaunchPhase::Idle);
                return Err(LaunchError::ProcessStart {
                    command: command_line,
                    source: error,
                });
            }
        };
        self.transition(LaunchPhase::Running);
        tracing::info!("child process started with pid {}", child.id());

        let exit_code = match child.wait() {
            Ok(status) => {
                tracing::info!("child process finished: {status}");
                status.code()
            }
            Err(error) => {
                tracing::error!("failed to wait for child process: {error}");
                None
            }
        };
        self.transition(LaunchPhase::Exited);
        Ok(LaunchOutcome { exit_code })
    }
}

pub(crate) fn build_command(plan: &LaunchPlan) -> Command {
    let mut command = Command::new(&plan.interpreter);
    command.arg(&plan.app_path);

    if let Some((name, value)) = &plan.mode_env {
        command.env(name, value);
    }

    apply_window_presentation(&mut command, plan.window);
    command
}

#[cfg(target_os = "windows")]
fn apply_window_presentation(command: &mut Command, window: WindowPresentation) {
    if window == WindowPresentation::Hidden {
        command.creation_flags(CREATE_NO_WINDOW);
    }
}

#[cfg(not(target_os = "windows"))]
fn apply_window_presentation(_command: &mut Command, window: WindowPresentation) {
    if window == WindowPresentation::Hidden {
        tracing::debug!("hidden window requested; no console window to hide on this platform");
    }
}

pub(crate) fn describe_command(plan: &LaunchPlan) -> String {
    let parts = [
        plan.interpreter.to_string_lossy().to_string(),
        plan.app_path.to_string_lossy().to_string(),
    ];
    shlex::try_join(parts.iter().map(String::as_str)).unwrap_or_else(|_| format!("{parts:?}"))
}

#[cfg(test)]
mod tests {
    use std::{ffi::OsStr, path::PathBuf};

    use super::*;

    fn plan(interpreter: PathBuf, app_path: PathBuf, mode: Option<&str>) -> LaunchPlan {
        LaunchPlan {
            interpreter,
            app_path,
            mode_env: mode.map(|value| ("NODE_ENV".to_string(), value.to_string())),
            window: WindowPresentation::Hidden,
        }
    }

    #[test]
    fn build_command_passes_app_path_and_mode_variable() {
        let plan = plan(
            PathBuf::from("/opt/node/bin/node"),
            PathBuf::from("/srv/app/server.js"),
            Some("production"),
        );
        let command = build_command(&plan);

        assert_eq!(command.get_program(), OsStr::new("/opt/node/bin/node"));
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, [OsStr::new("/srv/app/server.js")]);
        let envs: Vec<_> = command.get_envs().collect();
        assert_eq!(
            envs,
            [(OsStr::new("NODE_ENV"), Some(OsStr::new("production")))]
        );
    }

    #[test]
    fn build_command_leaves_environment_untouched_without_mode() {
        let plan = plan(PathBuf::from("node"), PathBuf::from("server.js"), None);
        let command = build_command(&plan);

        assert_eq!(command.get_envs().count(), 0);
    }

    #[test]
    fn describe_command_quotes_paths_with_spaces() {
        let plan = plan(
            PathBuf::from("/opt/node/bin/node"),
            PathBuf::from("/srv/my app/server.js"),
            None,
        );
        let described = describe_command(&plan);
        assert!(described.starts_with("/opt/node/bin/node "));
        assert_eq!(
            shlex::split(&described),
            Some(vec![
                "/opt/node/bin/node".to_string(),
                "/srv/my app/server.js".to_string()
            ])
        );
    }

    #[test]
    fn launch_reports_start_failure_and_returns_to_idle() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let plan = plan(
            dir.path().join("missing-node"),
            dir.path().join("server.js"),
            None,
        );
        let mut launcher = ProcessLauncher::default();

        let error = launcher.launch(&plan).expect_err("spawn must fail");
        assert!(matches!(error, LaunchError::ProcessStart { .. }));
        assert_eq!(error.title(), "Error - Process Start Failure");
        assert_eq!(launcher.phase(), LaunchPhase::Idle);
    }

    #[cfg(unix)]
    #[test]
    fn launch_waits_for_child_and_returns_exit_code() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let script = dir.path().join("app.sh");
        std::fs::write(
            &script,
            "[ \"$NODE_ENV\" = \"production\" ] || exit 9\nexit 3\n",
        )
        .expect("write script");
        let plan = plan(PathBuf::from("/bin/sh"), script, Some("production"));
        let mut launcher = ProcessLauncher::default();
        assert_eq!(launcher.phase(), LaunchPhase::Idle);

        let outcome = launcher.launch(&plan).expect("child should run");
        assert_eq!(outcome.exit_code, Some(3));
        assert_eq!(launcher.phase(), LaunchPhase::Exited);
    }

    #[cfg(unix)]
    #[test]
    fn launch_reports_missing_exit_code_for_signalled_child() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let script = dir.path().join("app.sh");
        std::fs::write(&script, "kill -9 $$\n").expect("write script");
        let plan = plan(PathBuf::from("/bin/sh"), script, None);

        let outcome = ProcessLauncher::default()
            .launch(&plan)
            .expect("child should run");
        assert_eq!(outcome.exit_code, None);
    }
}
