//! Auth command handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use memberdesk_infra::{ApiClient, AuthCommands, ProfileCommands};
use serde_json::json;

use super::print_json;

pub async fn login(client: Arc<ApiClient>, email: &str, password: &str) -> Result<()> {
    let login = AuthCommands::new(client).login(email, password).await.context("login")?;
    print_json(&json!({ "loggedIn": true, "user": login.user }))
}

pub async fn logout(client: Arc<ApiClient>) -> Result<()> {
    AuthCommands::new(client).logout().await.context("logout")?;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(client: Arc<ApiClient>) -> Result<()> {
    let profile = ProfileCommands::new(client).me().await?;
    print_json(&profile)
}

pub async fn status(client: Arc<ApiClient>) -> Result<()> {
    let authenticated = AuthCommands::new(client).is_authenticated().await?;
    print_json(&json!({ "authenticated": authenticated }))
}

pub async fn change_password(client: Arc<ApiClient>, current: &str, new: &str) -> Result<()> {
    AuthCommands::new(client).change_password(current, new).await?;
    Ok(())
}
