use std::{
    io::{BufRead, Write},
    path::Path,
};

use crate::{
    launch_plan, launcher_config, process_control::ProcessLauncher, FatalReporter, LaunchError,
    LaunchOutcome, LaunchPlan, EXIT_ABORTED, EXIT_CHILD_FINISHED,
};

/// Runs the whole launch sequence and returns the launcher's exit status.
pub(crate) fn run<R, W>(
    config_path: &Path,
    cwd: &Path,
    reporter: &dyn FatalReporter,
    input: &mut R,
    output: &mut W,
) -> i32
where
    R: BufRead,
    W: Write,
{
    tracing::info!("startnode starting, config {}", config_path.display());

    let (plan, outcome) = match prepare_and_launch(config_path, cwd, output) {
        Ok(result) => result,
        Err(error) => {
            reporter.report_fatal(error.title(), &error.to_string());
            return EXIT_ABORTED;
        }
    };

    if let Err(error) = acknowledge_exit(&plan, outcome, input, output) {
        tracing::warn!("failed to complete exit acknowledgement: {error}");
    }
    EXIT_CHILD_FINISHED
}

fn prepare_and_launch<W: Write>(
    config_path: &Path,
    cwd: &Path,
    output: &mut W,
) -> Result<(LaunchPlan, LaunchOutcome), LaunchError> {
    let config = launcher_config::load_config(config_path)?;
    let plan = launch_plan::build_launch_plan(&config, cwd)?;

    // Console output is best effort; a closed stdout must not block the launch.
    let _ = writeln!(output, "Starting {}...", plan.runtime_name());
    let _ = writeln!(output);
    let _ = output.flush();

    let mut launcher = ProcessLauncher::default();
    let outcome = launcher.launch(&plan)?;
    tracing::debug!("launcher finished in phase {:?}", launcher.phase());
    Ok((plan, outcome))
}

fn acknowledge_exit<R, W>(
    plan: &LaunchPlan,
    outcome: LaunchOutcome,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let runtime = plan.runtime_name();
    match outcome.exit_code {
        Some(code) => writeln!(output, "{runtime} exited with code: {code}")?,
        None => writeln!(output, "{runtime} has exited.")?,
    }
    writeln!(output, "Press Enter to exit...")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}
