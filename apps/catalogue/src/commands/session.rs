//! Login, logout and whoami.

use super::print_json;
use crate::context::{AppContext, LoginRequired};
use anyhow::{Context, Result};
use catalogue_auth::BrowserLogin;
use catalogue_core::{SessionState, session};
use clap::Args;
use colored::Colorize;
use secrecy::SecretString;

#[derive(Args)]
pub struct LoginArgs {
    /// Store this token instead of opening a browser
    #[arg(long)]
    token: Option<String>,

    /// Print the login URL without launching a browser
    #[arg(long)]
    no_browser: bool,
}

pub async fn login(ctx: &AppContext, args: LoginArgs) -> Result<()> {
    if let Some(token) = args.token {
        ctx.tokens
            .save(&SecretString::from(token))
            .context("Failed to store token")?;
    } else {
        let login_url = ctx
            .settings
            .auth
            .resolved_login_url(&ctx.settings.api.base_url);
        let pending = BrowserLogin::new(login_url, ctx.settings.auth.callback_port)
            .start()
            .await?;

        eprintln!("Sign in at:\n\n  {}\n", pending.url().as_str().cyan());
        if !args.no_browser
            && let Err(e) = pending.open_browser()
        {
            eprintln!("{} {e}", "WARN".yellow());
        }
        eprintln!("Waiting for the sign-in to finish...");
        pending.complete(&ctx.tokens).await?;
    }

    match ctx.session().await? {
        SessionState::Authenticated(session) => {
            println!(
                "{} Signed in as {}",
                "OK".green(),
                session.user.email.cyan()
            );
            Ok(())
        }
        SessionState::Checking | SessionState::Unauthenticated => Err(LoginRequired.into()),
    }
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    session::logout(&ctx.tokens)?;
    println!("{} Signed out", "OK".green());
    Ok(())
}

pub async fn whoami(ctx: &AppContext) -> Result<()> {
    let session = ctx.require_session().await?;
    let user = &session.user;

    if ctx.json {
        return print_json(&serde_json::json!({
            "user": user,
            "is_admin": session.is_admin,
            "bypassed": session.bypassed,
        }));
    }

    println!("{}", user.display_name().bold());
    println!("  email: {}", user.email);
    println!("  team:  {}", user.team_name);
    println!("  role:  {}", user.role_name);
    println!(
        "  admin: {}",
        if session.is_admin { "yes".green() } else { "no".normal() }
    );
    if session.bypassed {
        println!("{}", "Authentication is bypassed (development mode)".yellow());
    }
    Ok(())
}
