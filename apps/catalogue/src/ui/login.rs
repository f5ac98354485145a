//! The screen shown whenever there is no valid session.

use colored::Colorize;

/// Sign-in prompt
pub fn render() -> String {
    format!(
        "{}\n\n{}\n{}\n\n  {}\n\n{}",
        "Tool Catalogue".bold(),
        "You are not signed in, or your session has expired.",
        "Sign in with your Google account to continue:",
        "catalogue login".cyan(),
        "Already have a token? Use `catalogue login --token <TOKEN>`.".dimmed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_at_login_command() {
        colored::control::set_override(false);
        let screen = render();
        assert!(screen.starts_with("Tool Catalogue"));
        assert!(screen.contains("  catalogue login\n"));
    }
}
