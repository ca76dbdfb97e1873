// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `smartpay device ...` command implementations.
//!
//! Every verb is fire-and-forget: the backend call either succeeds and
//! the detail view is re-fetched, or the backend's error is surfaced and
//! nothing changes locally.

use clap::{Args, Subcommand};
use colored::Colorize;
use smartpay_api::{ActionRequest, SmartPayClient};
use smartpay_core::{
    reconcile, ActionKind, BlockState, Hardware, HardwareKind, SmartPayError,
};
use smartpay_session::Session;

use crate::app::App;

/// Selects a hardware unit on the command line.
#[derive(Args, Debug)]
pub struct HardwareRef {
    /// Device or television id.
    pub id: String,

    /// The id refers to a television.
    #[arg(long)]
    pub television: bool,
}

impl HardwareRef {
    fn kind(&self) -> HardwareKind {
        if self.television {
            HardwareKind::Television
        } else {
            HardwareKind::Device
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum DeviceCommand {
    /// List managed hardware, optionally filtered by enrolment.
    List {
        #[arg(long)]
        enrolment: Option<String>,
        #[arg(long)]
        television: bool,
    },
    /// Show one unit with its derived block state and action history.
    Show(HardwareRef),
    /// Block the unit (payment overdue).
    Block(HardwareRef),
    /// Unblock the unit.
    Unblock(HardwareRef),
    /// Request the unit's last known location.
    Locate(HardwareRef),
    /// Push a notification to the unit.
    Notify {
        #[command(flatten)]
        hardware: HardwareRef,
        /// Message shown on the unit.
        #[arg(long)]
        message: String,
    },
    /// Release the unit from management (unenroll).
    Release(HardwareRef),
    /// Block the SIM in the unit.
    SimBlock(HardwareRef),
    /// Unblock the SIM in the unit.
    SimUnblock(HardwareRef),
    /// Approve the SIM a device currently reports.
    SimApprove { id: String },
    /// Remove an approved SIM from a device.
    SimRemove { id: String },
}

pub async fn run(command: DeviceCommand, app: &App) -> Result<(), SmartPayError> {
    let (session, client) = app.require_session()?;

    match command {
        DeviceCommand::List {
            enrolment,
            television,
        } => list(&client, enrolment.as_deref(), television).await,
        DeviceCommand::Show(hw) => show(&client, &hw).await,
        DeviceCommand::Block(hw) => {
            dispatch(&client, &session, &hw, ActionKind::Block, None).await
        }
        DeviceCommand::Unblock(hw) => {
            dispatch(&client, &session, &hw, ActionKind::Unblock, None).await
        }
        DeviceCommand::Locate(hw) => {
            dispatch(&client, &session, &hw, ActionKind::Locate, None).await
        }
        DeviceCommand::Notify { hardware, message } => {
            let payload = serde_json::json!({ "message": message });
            dispatch(&client, &session, &hardware, ActionKind::Notify, Some(payload)).await
        }
        DeviceCommand::Release(hw) => {
            dispatch(&client, &session, &hw, ActionKind::Unenroll, None).await
        }
        DeviceCommand::SimBlock(hw) => {
            dispatch(&client, &session, &hw, ActionKind::BlockSim, None).await
        }
        DeviceCommand::SimUnblock(hw) => {
            dispatch(&client, &session, &hw, ActionKind::UnblockSim, None).await
        }
        DeviceCommand::SimApprove { id } => {
            client.approve_sim(&id, session.user_id()).await?;
            println!("{} SIM approved for device {id}", "ok:".green().bold());
            Ok(())
        }
        DeviceCommand::SimRemove { id } => {
            client.remove_sim(&id, session.user_id()).await?;
            println!("{} SIM removed from device {id}", "ok:".green().bold());
            Ok(())
        }
    }
}

async fn list(
    client: &SmartPayClient,
    enrolment: Option<&str>,
    television: bool,
) -> Result<(), SmartPayError> {
    if television {
        let televisions = client.list_televisions(enrolment).await?;
        println!("{} televisions", televisions.len());
        for tv in televisions {
            println!(
                "{}  {}  {} {}  {}",
                tv.television_id, tv.serial_number, tv.brand, tv.model, tv.state
            );
        }
    } else {
        let devices = client.list_devices(enrolment).await?;
        println!("{} devices", devices.len());
        for device in devices {
            println!(
                "{}  {}  {} {}  {}",
                device.device_id, device.serial_number, device.brand, device.model, device.state
            );
        }
    }
    Ok(())
}

async fn fetch(client: &SmartPayClient, hw: &HardwareRef) -> Result<Hardware, SmartPayError> {
    match hw.kind() {
        HardwareKind::Device => client.get_device(&hw.id).await.map(Hardware::Device),
        HardwareKind::Television => client.get_television(&hw.id).await.map(Hardware::Television),
    }
}

async fn show(client: &SmartPayClient, hw: &HardwareRef) -> Result<(), SmartPayError> {
    let hardware = fetch(client, hw).await?;
    let actions = client.list_actions(hw.id.as_str(), hw.television).await?;
    let block_state = reconcile::latest_block_state(&actions);

    println!("{}:      {}", hardware.kind(), hardware.id());
    println!("serial:      {}", hardware.serial_number());
    println!("model:       {}", hardware.model());
    match block_state {
        BlockState::Blocked => println!("block state: {}", "blocked".red()),
        BlockState::Unblocked => println!("block state: {}", "unblocked".green()),
    }
    println!("{} actions on record", actions.len());
    for action in actions {
        println!(
            "  {}  {}  {}  by {}",
            action.created_at.format("%Y-%m-%d %H:%M"),
            action.action,
            action.state,
            action.applied_by.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

/// Sends one action and re-fetches the detail on success.
async fn dispatch(
    client: &SmartPayClient,
    session: &Session,
    hw: &HardwareRef,
    action: ActionKind,
    payload: Option<serde_json::Value>,
) -> Result<(), SmartPayError> {
    client
        .dispatch_action(
            &hw.id,
            &ActionRequest {
                action,
                applied_by_id: session.user_id().to_string(),
                is_television: hw.television,
                payload,
            },
        )
        .await?;
    println!("{} {action} dispatched to {}", "ok:".green().bold(), hw.id);
    show(client, hw).await
}
