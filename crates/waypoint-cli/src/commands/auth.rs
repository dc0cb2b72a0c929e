//! Login, logout, and identity commands.

use anyhow::Result;
use colored::Colorize;

use waypoint_core::credentials::CredentialStore;

use super::App;

pub async fn login(app: &App, email: &str, password: &str) -> Result<()> {
    let credentials = app.client.auth().login(email, password).await?;
    println!(
        "Logged in as {} <{}>",
        credentials.user.name.bold(),
        credentials.user.email
    );
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    app.client.auth().logout().await?;
    println!("Logged out");
    Ok(())
}

pub async fn whoami(app: &App) -> Result<()> {
    match app.store.get().await {
        Some(credentials) => {
            // Verify the stored token is still accepted.
            match app.client.auth().me().await {
                Ok(user) => {
                    println!("{} <{}>", user.name.bold(), user.email);
                    if let Some(role) = &user.role {
                        println!("role: {role}");
                    }
                }
                Err(e) => {
                    println!(
                        "Stored session for {} is no longer valid: {e}",
                        credentials.user.email
                    );
                }
            }
        }
        None => println!("Not logged in"),
    }
    Ok(())
}
