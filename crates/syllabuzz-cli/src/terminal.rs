//! Terminal implementations of the navigation and notification seams.

use colored::Colorize;
use syllabuzz_core::{Navigator, Notice, NoticeLevel, Notifier, Route};

/// There are no views to switch to in a terminal; a navigation request is
/// turned into a hint about which command to run next.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(route = %route, "Navigation requested");
        match route {
            Route::Login {
                registered: true, ..
            } => {
                eprintln!(
                    "{} Account created. Log in with {}",
                    "→".dimmed(),
                    "syllabuzz login".bold()
                );
            }
            Route::Login { .. } => {
                eprintln!(
                    "{} You are logged out. Log in with {}",
                    "→".dimmed(),
                    "syllabuzz login".bold()
                );
            }
            Route::Home => {}
        }
    }
}

/// Prints notices to stderr so JSON output on stdout stays clean.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        tracing::debug!(title = %notice.title, "Notice");
        let title = match notice.level {
            NoticeLevel::Success => notice.title.green().bold(),
            NoticeLevel::Error => notice.title.red().bold(),
            NoticeLevel::Info => notice.title.yellow().bold(),
        };
        eprintln!("{title} {}", notice.message.dimmed());
    }
}
