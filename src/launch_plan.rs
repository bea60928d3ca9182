use std::path::{Path, PathBuf};

use crate::{runtime_paths, LaunchError, LaunchPlan, LauncherConfig, WindowPresentation};

/// Resolves the application entry point, applying the directory and
/// entry-file fallbacks when overrides are allowed.
pub(crate) fn resolve_app_path(
    config: &LauncherConfig,
    cwd: &Path,
) -> Result<PathBuf, LaunchError> {
    let mut app_dir = config.app_dir.clone();
    if config.allow_overrides && !app_dir.is_dir() {
        tracing::warn!(
            "application directory {} not found, overriding to current directory {}",
            app_dir.display(),
            cwd.display()
        );
        app_dir = cwd.to_path_buf();
    }

    let primary = runtime_paths::app_entry_path(&app_dir, &config.app_entry_file);
    if primary.is_file() {
        return Ok(primary);
    }

    if !config.allow_overrides {
        return Err(LaunchError::AppNotFound { path: primary });
    }

    tracing::warn!(
        "application {} not found, checking {} override candidate(s)",
        primary.display(),
        config.candidate_entry_files.len()
    );
    let found = config
        .candidate_entry_files
        .iter()
        .map(|candidate| runtime_paths::app_entry_path(&app_dir, candidate))
        .find(|candidate| candidate.is_file());

    match found {
        Some(path) => {
            tracing::info!("application found at {}", path.display());
            Ok(path)
        }
        None => Err(LaunchError::AppNotFound { path: primary }),
    }
}

pub(crate) fn build_launch_plan(
    config: &LauncherConfig,
    cwd: &Path,
) -> Result<LaunchPlan, LaunchError> {
    let app_path = resolve_app_path(config, cwd)?;
    if !app_path.is_file() {
        return Err(LaunchError::AppNotFound { path: app_path });
    }
    if !config.interpreter_path.is_file() {
        return Err(LaunchError::InterpreterNotFound {
            path: config.interpreter_path.clone(),
        });
    }

    let mode_env = if config.mode.is_empty() {
        None
    } else {
        Some((config.mode_env_var.clone(), config.mode.clone()))
    };

    Ok(LaunchPlan {
        interpreter: config.interpreter_path.clone(),
        app_path,
        mode_env,
        window: WindowPresentation::from_minimize(config.minimize_window),
    })
}
