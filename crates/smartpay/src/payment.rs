// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `smartpay payment ...` command implementations.

use clap::Subcommand;
use colored::Colorize;
use smartpay_api::NewPayment;
use smartpay_core::{reconcile, SmartPayError};

use crate::app::App;

#[derive(Subcommand, Debug)]
pub enum PaymentCommand {
    /// Register a payment against a plan.
    Register {
        /// Plan the payment belongs to.
        #[arg(long)]
        plan: String,
        /// Amount paid.
        #[arg(long)]
        amount: f64,
        /// Payment method (cash, transfer, card, ...).
        #[arg(long)]
        method: String,
        /// External transaction reference.
        #[arg(long)]
        reference: Option<String>,
        /// Tag this payment as the down payment.
        #[arg(long)]
        initial: bool,
    },
    /// List the payments registered against a plan.
    List {
        #[arg(long)]
        plan: String,
    },
}

pub async fn run(command: PaymentCommand, app: &App) -> Result<(), SmartPayError> {
    let (_, client) = app.require_session()?;

    match command {
        PaymentCommand::Register {
            plan,
            amount,
            method,
            reference,
            initial,
        } => {
            // The hardware reference travels with the payment so the
            // backend can tie it to a block decision.
            let plan_detail = client.get_plan(&plan).await?;
            let payment = client
                .register_payment(&NewPayment {
                    plan_id: plan.clone(),
                    device_id: plan_detail.device_id.clone(),
                    television_id: plan_detail.television_id.clone(),
                    value: amount,
                    method,
                    reference,
                    is_initial: initial,
                })
                .await?;
            println!(
                "{} payment {} registered ({})",
                "ok:".green().bold(),
                payment.payment_id,
                payment.state
            );

            let payments = client.list_payments(&plan).await?;
            let pending = reconcile::pending_value(&plan_detail, &payments);
            if reconcile::is_paid(&plan_detail, &payments) {
                println!("plan {plan} is now {}", "paid in full".green().bold());
            } else {
                println!("pending on plan {plan}: {}", app.money(pending));
            }
            Ok(())
        }
        PaymentCommand::List { plan } => {
            let payments = client.list_payments(&plan).await?;
            println!("{} payments", payments.len());
            for payment in payments {
                println!(
                    "{}  {}  {}  {}  {}{}",
                    payment.payment_id,
                    payment.date.format("%Y-%m-%d"),
                    app.money(payment.value),
                    payment.method,
                    payment.state,
                    if payment.is_initial { "  (down payment)" } else { "" }
                );
            }
            Ok(())
        }
    }
}
