//! Auth subcommands: login, signup, logout, whoami.
//!
//! User-facing output uses writeln! to stdout (this is a CLI binary, not
//! debug output).

use std::io::{self, Write};

use komp_api::ApiClient;

/// Auth subcommand actions.
#[derive(clap::Subcommand, Debug)]
pub enum AuthAction {
    /// Log in and store the session.
    Login {
        /// Username.
        username: String,
        /// Password (or set KOMP_PASSWORD).
        #[arg(short, long, env = "KOMP_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account, then log in.
    Signup {
        /// Username.
        username: String,
        /// Email address.
        email: String,
        /// Password (or set KOMP_PASSWORD).
        #[arg(short, long, env = "KOMP_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Drop the stored session.
    Logout,
    /// Show the logged-in identity.
    Whoami,
}

/// Execute an auth subcommand.
pub async fn run(client: &ApiClient, action: AuthAction) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match action {
        AuthAction::Login { username, password } => {
            let resp = client.login(&username, &password).await?;
            writeln!(out, "Logged in as {} (id {})", resp.username, resp.id)?;
        }
        AuthAction::Signup {
            username,
            email,
            password,
        } => {
            client.signup(&username, &password, &email).await?;
            let resp = client.login(&username, &password).await?;
            writeln!(out, "Account created. Logged in as {}", resp.username)?;
        }
        AuthAction::Logout => {
            client.logout()?;
            writeln!(out, "Logged out.")?;
        }
        AuthAction::Whoami => match client.session().user() {
            Some(user) => {
                writeln!(out, "  User:     {}", user.username)?;
                writeln!(out, "  ID:       {}", user.id)?;
                if let Some(email) = &user.email {
                    writeln!(out, "  Email:    {email}")?;
                }
                writeln!(out, "  Role:     {}", user.role)?;
            }
            None => writeln!(out, "Not logged in.")?,
        },
    }
    Ok(())
}
