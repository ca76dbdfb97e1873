// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `smartpay store ...` command implementations.

use clap::Subcommand;
use colored::Colorize;
use smartpay_api::{NewStore, NewStoreContact};
use smartpay_core::SmartPayError;

use crate::app::App;

#[derive(Subcommand, Debug)]
pub enum StoreCommand {
    /// List all stores.
    List,
    /// Show one store with its contacts.
    Show { id: String },
    /// Create a store.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Add a contact person to a store.
    AddContact {
        /// Store the contact belongs to.
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: Option<String>,
    },
}

pub async fn run(command: StoreCommand, app: &App) -> Result<(), SmartPayError> {
    let (_, client) = app.require_session()?;

    match command {
        StoreCommand::List => {
            let stores = client.list_stores().await?;
            println!("{} stores", stores.len());
            for store in stores {
                println!(
                    "{}  {}  {}",
                    store.store_id,
                    store.name,
                    store.address.as_deref().unwrap_or("-")
                );
            }
            Ok(())
        }
        StoreCommand::Show { id } => {
            let store = client.get_store(&id).await?;
            let contacts = client.list_store_contacts(&id).await?;
            println!("store:   {}", store.store_id);
            println!("name:    {}", store.name);
            if let Some(address) = &store.address {
                println!("address: {address}");
            }
            if let Some(phone) = &store.phone {
                println!("phone:   {phone}");
            }
            println!("{} contacts", contacts.len());
            for contact in contacts {
                println!(
                    "  {}  {}  {}",
                    contact.name,
                    contact.phone,
                    contact.email.as_deref().unwrap_or("-")
                );
            }
            Ok(())
        }
        StoreCommand::Create {
            name,
            address,
            phone,
        } => {
            let store = client
                .create_store(&NewStore {
                    name,
                    address,
                    phone,
                })
                .await?;
            println!("{} store {} created", "ok:".green().bold(), store.store_id);
            Ok(())
        }
        StoreCommand::AddContact {
            id,
            name,
            phone,
            email,
        } => {
            let contact = client
                .create_store_contact(&NewStoreContact {
                    store_id: id,
                    name,
                    phone,
                    email,
                })
                .await?;
            println!(
                "{} contact {} added to store {}",
                "ok:".green().bold(),
                contact.contact_id,
                contact.store_id
            );
            Ok(())
        }
    }
}
