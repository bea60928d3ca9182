mod app_constants;
mod app_runtime;
mod app_types;
mod fatal_report;
mod launch_plan;
mod launcher_config;
mod launcher_error;
mod logging;
mod process_control;
mod runtime_paths;

pub(crate) use app_constants::*;
pub(crate) use app_types::{LaunchOutcome, LaunchPlan, LauncherConfig, WindowPresentation};
pub(crate) use fatal_report::FatalReporter;
pub(crate) use launcher_error::LaunchError;

fn main() {
    logging::init_logging();

    let reporter = fatal_report::default_reporter();
    let config_path = launcher_config::config_path();
    let cwd = runtime_paths::current_dir_or_dot();

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    let code = app_runtime::run(
        &config_path,
        &cwd,
        reporter.as_ref(),
        &mut input,
        &mut output,
    );
    std::process::exit(code);
}
