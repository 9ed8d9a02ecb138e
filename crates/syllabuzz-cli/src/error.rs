use colored::Colorize;
use syllabuzz_core::ClientError;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), err);

    match err.downcast_ref::<ClientError>() {
        Some(ClientError::AuthRequired) | Some(ClientError::Unauthorized { .. }) => {
            eprintln!("\n{}", "Suggestion:".yellow().bold());
            eprintln!("  Log in with:");
            eprintln!("  {} syllabuzz login", "$".dimmed());
        }
        Some(ClientError::Transient { .. }) => {
            eprintln!("\n{}", "Suggestion:".yellow().bold());
            eprintln!("  Check that the Syllabuzz server is reachable, or point the client at it:");
            eprintln!("  {} syllabuzz --api-url http://host:5000/api <command>", "$".dimmed());
        }
        Some(ClientError::Config(_)) => {
            eprintln!("\n{}", "Suggestion:".yellow().bold());
            eprintln!("  Check SYLLABUZZ_CONFIG, ./syllabuzz.toml or ~/.syllabuzz/config.toml");
        }
        _ => {}
    }

    std::process::exit(1);
}
