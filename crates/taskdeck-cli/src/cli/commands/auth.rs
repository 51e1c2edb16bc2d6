//! Auth command handlers.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use taskdeck_core::api::{ApiClient, Credentials, Registration};
use taskdeck_core::config::paths;
use taskdeck_core::session::{Session, mask_token};

pub async fn login(api: &ApiClient, email: &str, password: Option<String>) -> Result<()> {
    let email = required("Email", email)?;
    let password = resolve_password(password)?;

    let credentials = Credentials {
        email: email.clone(),
        password,
    };
    let token = api.login(&credentials).await.context("Login failed")?;

    api.session()
        .set_token(&token.access_token)
        .context("save session")?;
    tracing::info!(%email, "logged in");

    println!(
        "✓ Logged in as {email} (token: {})",
        mask_token(&token.access_token)
    );
    println!("  Session saved to: {}", paths::session_path().display());
    Ok(())
}

pub async fn register(
    api: &ApiClient,
    email: &str,
    full_name: &str,
    password: Option<String>,
) -> Result<()> {
    let full_name = required("Full name", full_name)?;
    let email = required("Email", email)?;
    let password = resolve_password(password)?;

    let registration = Registration {
        email: email.clone(),
        password,
        full_name,
    };
    api.register(&registration)
        .await
        .context("Registration failed")?;
    tracing::info!(%email, "account created");

    println!("✓ Account created! Please login.");
    println!("  Run: taskdeck login --email {email}");
    Ok(())
}

pub fn logout(session: &Session) -> Result<()> {
    let had_token = session.clear_token().context("clear session")?;

    if had_token {
        println!("✓ Logged out");
        println!("  Session removed from: {}", paths::session_path().display());
    } else {
        println!("Not logged in (no session found).");
    }

    Ok(())
}

fn required(label: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        anyhow::bail!("{label} is required");
    }
    Ok(value.to_string())
}

/// Uses the flag/env value, else reads one line from stdin.
fn resolve_password(password: Option<String>) -> Result<String> {
    if let Some(password) = password.filter(|p| !p.is_empty()) {
        return Ok(password);
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        io::stderr().flush()?;
    }
    read_password(stdin.lock())
}

fn read_password(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line).context("read password")?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        anyhow::bail!("Password is required (use --password, TASKDECK_PASSWORD or stdin)");
    }
    Ok(password.to_string())
}
