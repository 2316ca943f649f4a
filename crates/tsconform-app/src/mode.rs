/// Which orchestration path an invocation takes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// `-b`, `--build`, or `build` led the arguments; the rest are project paths.
    Build { projects: Vec<String> },
    /// Anything else: a standard compiler command line.
    Direct { args: Vec<String> },
}

/// Choose the mode from the leading argument (program name already stripped).
pub fn select_mode<I>(args: I) -> Mode
where
    I: IntoIterator<Item = String>,
{
    let mut args: Vec<String> = args.into_iter().collect();
    match args.first().map(String::as_str) {
        Some("-b" | "--build" | "build") => {
            args.remove(0);
            tracing::info!(projects = args.len(), "selected build mode");
            Mode::Build { projects: args }
        }
        _ => {
            tracing::info!("selected direct mode");
            Mode::Direct { args }
        }
    }
}
