/// Shows a fatal launcher failure to the user.
pub(crate) trait FatalReporter {
    fn report_fatal(&self, title: &str, message: &str);
}

#[derive(Debug, Default)]
pub(crate) struct ConsoleReporter;

impl FatalReporter for ConsoleReporter {
    fn report_fatal(&self, title: &str, message: &str) {
        tracing::error!("{title}: {message}");
        eprintln!("{title}: {message}");
    }
}

#[cfg(feature = "dialog")]
#[derive(Debug, Default)]
pub(crate) struct DialogReporter;

#[cfg(feature = "dialog")]
impl FatalReporter for DialogReporter {
    fn report_fatal(&self, title: &str, message: &str) {
        ConsoleReporter.report_fatal(title, message);
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

#[cfg(feature = "dialog")]
pub(crate) fn default_reporter() -> Box<dyn FatalReporter> {
    Box::new(DialogReporter)
}

#[cfg(not(feature = "dialog"))]
pub(crate) fn default_reporter() -> Box<dyn FatalReporter> {
    Box::new(ConsoleReporter)
}
