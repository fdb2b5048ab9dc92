//! Account commands: sign up, log in, log out and status.

use chrono::DateTime;
use clap::{Args, Subcommand};
use dialoguer::Password;
use pawsome_core::{Backend, Session, SignUpOutcome};
use std::io::{self, Write};

use super::Workspace;
use crate::config::Config;
use crate::session::SessionStore;

const CONFIRMATION_SENT: &str = "確認メールを送信しました。メールフォルダを確認してください。";

/// Authentication commands
#[derive(Args)]
pub struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Subcommand)]
enum AuthSubcommand {
    /// Create an account (a confirmation e-mail is sent)
    Signup {
        /// E-mail address (prompted when omitted)
        #[arg(long, short)]
        email: Option<String>,
    },
    /// Log in with e-mail and password
    Login {
        /// E-mail address (prompted when omitted)
        #[arg(long, short)]
        email: Option<String>,
    },
    /// Log out and forget the saved session
    Logout,
    /// Show authentication status
    Status,
}

impl AuthCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            AuthSubcommand::Signup { email } => signup(config, email.as_deref()).await,
            AuthSubcommand::Login { email } => login(config, email.as_deref()).await,
            AuthSubcommand::Logout => logout(config).await,
            AuthSubcommand::Status => status(config),
        }
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn require(label: &str, value: String) -> Result<String, String> {
    if value.is_empty() {
        Err(format!("{} cannot be empty", label))
    } else {
        Ok(value)
    }
}

fn credentials(email: Option<&str>) -> Result<(String, String), Box<dyn std::error::Error>> {
    let email = match email {
        Some(e) => e.trim().to_string(),
        None => prompt("Email")?,
    };
    let email = require("Email", email)?;

    // Typed input is not echoed.
    let password = Password::new().with_prompt("Password").interact()?;
    let password = require("Password", password)?;
    Ok((email, password))
}

fn save_session(config: &Config, session: Session) -> Result<(), Box<dyn std::error::Error>> {
    let sessions = SessionStore::new(config.data_dir.value.clone());
    let mut state = sessions.load().unwrap_or_default();
    state.session = Some(session);
    sessions.save(&state)?;
    Ok(())
}

async fn signup(config: &Config, email: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let backend = Backend::new(config.backend()?);
    let (email, password) = credentials(email)?;

    match backend.sign_up(&email, &password).await? {
        SignUpOutcome::ConfirmationSent => println!("{}", CONFIRMATION_SENT),
        SignUpOutcome::SignedIn(session) => {
            save_session(config, session)?;
            println!("Signed up and logged in as {}", email);
        }
    }
    Ok(())
}

async fn login(config: &Config, email: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let backend = Backend::new(config.backend()?);
    let (email, password) = credentials(email)?;

    let session = backend.sign_in_with_password(&email, &password).await?;
    tracing::info!(user = %session.user.id, "signed in");
    save_session(config, session)?;

    println!("Logged in as {}", email);
    Ok(())
}

async fn logout(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match Workspace::restore(config).await? {
        Some(mut workspace) => {
            workspace.store.sign_out().await;
            workspace.forget()?;
            println!("Logged out.");
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

fn status(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let sessions = SessionStore::new(config.data_dir.value.clone());
    let state = sessions.load()?;

    match state.session {
        Some(session) => {
            let who = session.user.email.as_deref().unwrap_or(&session.user.id);
            println!("Logged in as {}", who);
            let expires = DateTime::from_timestamp(session.expires_at, 0)
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| session.expires_at.to_string());
            if session.is_expired() {
                println!("Session expired at {} (refreshed on next use)", expires);
            } else {
                println!("Session expires at {}", expires);
            }
        }
        None => println!("Not logged in. Run 'paw auth login' to authenticate."),
    }
    Ok(())
}
