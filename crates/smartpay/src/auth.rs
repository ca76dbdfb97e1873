// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `smartpay login` / `logout` / `whoami` command implementations.

use clap::Args;
use colored::Colorize;
use smartpay_core::SmartPayError;

use crate::app::App;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Backend username.
    #[arg(long)]
    pub username: String,

    /// Password; prompted interactively when omitted.
    #[arg(long)]
    pub password: Option<String>,
}

pub async fn login(args: LoginArgs, app: &App) -> Result<(), SmartPayError> {
    let password = match args.password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")
            .map_err(|e| SmartPayError::Session(format!("failed to read password: {e}")))?,
    };

    let session =
        smartpay_session::login(&app.sessions, &app.client, &args.username, &password).await?;
    println!(
        "{} logged in as {} ({})",
        "ok:".green().bold(),
        session.claims().username.bold(),
        session.claims().role
    );
    Ok(())
}

pub fn logout(app: &App) -> Result<(), SmartPayError> {
    smartpay_session::logout(&app.sessions)?;
    println!("{} session cleared", "ok:".green().bold());
    Ok(())
}

pub fn whoami(app: &App) -> Result<(), SmartPayError> {
    let (session, _) = app.require_session()?;
    let profile = session.profile();
    println!("user id:  {}", profile.user_id);
    println!("username: {}", profile.username);
    println!("role:     {}", profile.role);
    if let Some(store) = &profile.store_id {
        println!("store:    {store}");
    }
    Ok(())
}
