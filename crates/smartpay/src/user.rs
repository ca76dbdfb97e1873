// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `smartpay user ...` command implementations.

use clap::Subcommand;
use colored::Colorize;
use smartpay_api::NewUser;
use smartpay_core::SmartPayError;

use crate::app::App;

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// List all users visible to the session.
    List,
    /// Create a user.
    Create {
        #[arg(long)]
        username: String,
        /// Password; prompted interactively when omitted.
        #[arg(long)]
        password: Option<String>,
        /// Role granted to the user (admin, vendor, ...).
        #[arg(long)]
        role: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Store the user operates from.
        #[arg(long)]
        store: Option<String>,
    },
}

pub async fn run(command: UserCommand, app: &App) -> Result<(), SmartPayError> {
    let (_, client) = app.require_session()?;

    match command {
        UserCommand::List => {
            let users = client.list_users().await?;
            println!("{} users", users.len());
            for user in users {
                println!(
                    "{}  {}  {}  {}",
                    user.user_id,
                    user.username,
                    user.role,
                    user.store_id.as_deref().unwrap_or("-")
                );
            }
            Ok(())
        }
        UserCommand::Create {
            username,
            password,
            role,
            name,
            email,
            store,
        } => {
            let password = match password {
                Some(password) => password,
                None => rpassword::prompt_password("Password for new user: ").map_err(|e| {
                    SmartPayError::Session(format!("failed to read password: {e}"))
                })?,
            };
            let user = client
                .create_user(&NewUser {
                    username,
                    password,
                    role,
                    name,
                    email,
                    store_id: store,
                })
                .await?;
            println!(
                "{} user {} ({}) created",
                "ok:".green().bold(),
                user.username,
                user.user_id
            );
            Ok(())
        }
    }
}
