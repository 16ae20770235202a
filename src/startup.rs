//! Process-level conveniences layered on top of [`Registry`]
//!
//! The registry never touches process arguments or exits on its own. These
//! helpers fold the conventional `--help` switch and the print-and-exit
//! failure handling into a single call for binaries that want it.

use crate::{error::format_parse_errors, registry::Registry};

const HELP_INTRO: &str =
    "Configuration values are set using environment variables, for info please see the following list.";

/// Whether `args` contain a help switch (`--help`, `-help` or `-h`)
pub fn help_requested<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .any(|arg| matches!(arg.as_ref(), "--help" | "-help" | "-h"))
}

impl Registry {
    /// Introductory text followed by [`help`](Registry::help)
    pub fn help_page(&self) -> String {
        format!("{}\n\n{}", HELP_INTRO, self.help())
    }

    /// Print [`help_page`](Registry::help_page) to stdout
    pub fn print_help(&self) {
        println!("{}", self.help_page());
    }

    /// Parse the process environment, exiting the process when that cannot
    /// produce a usable configuration
    ///
    /// If the process arguments request help, the help page is printed and
    /// the process exits with status 0 without parsing. If parsing fails, a
    /// summary of every failure is printed to stderr and the process exits
    /// with status 1.
    pub fn load_or_exit(&mut self) {
        if help_requested(std::env::args().skip(1)) {
            self.print_help();
            std::process::exit(0);
        }

        if let Err(e) = self.parse() {
            tracing::error!(failed = e.len(), "invalid configuration");
            eprintln!("{}", format_parse_errors(&e));
            std::process::exit(1);
        }
    }
}
