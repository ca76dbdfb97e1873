// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `smartpay plan ...` command implementations.
//!
//! The show view is where reconciliation surfaces: pending balance, the
//! per-quota amount, and the next due date are all derived from the plan
//! plus its payment history at display time, never stored.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;
use colored::Colorize;
use smartpay_api::NewPlan;
use smartpay_core::{reconcile, Plan, SmartPayError};

use crate::app::App;

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    /// List plans, optionally filtered by customer.
    List {
        #[arg(long)]
        customer: Option<String>,
    },
    /// Show one plan with its reconciled payment status.
    Show { id: String },
    /// Create an installment plan for a device or television.
    Create {
        /// Device the plan finances.
        #[arg(long, conflicts_with = "television")]
        device: Option<String>,
        /// Television the plan finances.
        #[arg(long)]
        television: Option<String>,
        /// Customer paying the plan.
        #[arg(long)]
        customer: String,
        /// Total financed value.
        #[arg(long)]
        value: f64,
        /// Date the first quota falls due (YYYY-MM-DD).
        #[arg(long)]
        initial_date: NaiveDate,
        /// Days between quotas.
        #[arg(long, default_value_t = 30)]
        period: u32,
        /// Number of quotas.
        #[arg(long)]
        quotas: u32,
    },
    /// Attach the signed contract PDF to a plan.
    UploadContract {
        id: String,
        /// Path to the PDF file.
        #[arg(long)]
        file: PathBuf,
    },
}

pub async fn run(command: PlanCommand, app: &App) -> Result<(), SmartPayError> {
    let (session, client) = app.require_session()?;

    match command {
        PlanCommand::List { customer } => {
            let plans = client.list_plans(customer.as_deref()).await?;
            println!("{} plans", plans.len());
            for plan in plans {
                println!(
                    "{}  {}  {} x{} every {}d  from {}",
                    plan.plan_id,
                    app.money(plan.value),
                    hardware_label(&plan),
                    plan.quotas,
                    plan.period,
                    plan.initial_date
                );
            }
            Ok(())
        }
        PlanCommand::Show { id } => show(&client, app, &id).await,
        PlanCommand::Create {
            device,
            television,
            customer,
            value,
            initial_date,
            period,
            quotas,
        } => {
            let plan = client
                .create_plan(&NewPlan {
                    device_id: device,
                    television_id: television,
                    user_id: customer,
                    vendor_id: session.user_id().to_string(),
                    value,
                    initial_date,
                    period,
                    quotas,
                })
                .await?;
            println!("{} plan {} created", "ok:".green().bold(), plan.plan_id);
            show(&client, app, &plan.plan_id).await
        }
        PlanCommand::UploadContract { id, file } => {
            let bytes = std::fs::read(&file).map_err(|e| {
                SmartPayError::Validation(format!("cannot read {}: {e}", file.display()))
            })?;
            let file_name = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("contract.pdf");
            client.upload_contract(&id, file_name, bytes).await?;
            println!("{} contract attached to plan {id}", "ok:".green().bold());
            Ok(())
        }
    }
}

async fn show(
    client: &smartpay_api::SmartPayClient,
    app: &App,
    plan_id: &str,
) -> Result<(), SmartPayError> {
    let plan = client.get_plan(plan_id).await?;
    let payments = client.list_payments(plan_id).await?;

    let pending = reconcile::pending_value(&plan, &payments);
    let quota = reconcile::quota_value(&plan, &payments);
    let today = chrono::Local::now().date_naive();
    let next_due = reconcile::compute_next_due_date(&plan, &payments, today)?;

    println!("plan:       {}", plan.plan_id);
    println!("hardware:   {}", hardware_label(&plan));
    println!("customer:   {}", plan.user_id);
    println!("value:      {}", app.money(plan.value));
    println!("schedule:   {} quotas every {} days", plan.quotas, plan.period);
    println!("quota:      {}", app.money(quota));
    println!("first due:  {}", plan.initial_date);
    if reconcile::is_paid(&plan, &payments) {
        println!("status:     {}", "paid in full".green().bold());
    } else {
        println!("pending:    {}", app.money(pending).yellow());
        match next_due {
            Some(date) if date < today => {
                println!("next due:   {} ({})", date, "overdue".red().bold());
            }
            Some(date) => println!("next due:   {date}"),
            None => {}
        }
    }
    if let Some(contract) = &plan.contract {
        println!("contract:   {contract}");
    }
    println!("{} payments on record", payments.len());
    for payment in &payments {
        println!(
            "  {}  {}  {}  {}{}",
            payment.date.format("%Y-%m-%d"),
            app.money(payment.value),
            payment.method,
            payment.state,
            if payment.is_initial { "  (down payment)" } else { "" }
        );
    }
    Ok(())
}

fn hardware_label(plan: &Plan) -> String {
    match (&plan.device_id, &plan.television_id) {
        (Some(id), _) => format!("device {id}"),
        (None, Some(id)) => format!("television {id}"),
        (None, None) => "unattached".to_string(),
    }
}
