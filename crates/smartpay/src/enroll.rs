// SPDX-FileCopyrightText: 2026 SmartPay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `smartpay enroll` command implementation.
//!
//! Generates an enrolment, renders the provisioning payload as a
//! terminal QR code, and polls until the hardware connects, times out,
//! or Ctrl+C cancels the wait. A timeout offers a manual retry, which
//! abandons the old enrolment and generates a fresh one.

use std::io::Write;
use std::time::Duration;

use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use qrcode::render::unicode;
use qrcode::QrCode;
use smartpay_core::{Hardware, HardwareKind, SmartPayError};
use smartpay_enroll::{EnrollmentFlow, PollConfig};
use tracing::debug;

use crate::app::App;

#[derive(Args, Debug)]
pub struct EnrollArgs {
    /// Customer the hardware is being sold to.
    #[arg(long)]
    pub customer: String,

    /// Enroll a television instead of an Android device.
    #[arg(long)]
    pub television: bool,

    /// Store id embedded in the provisioning payload; falls back to
    /// `enrollment.default_store_id` from the config.
    #[arg(long)]
    pub store: Option<String>,

    /// Mark the payload as a re-enrollment of previously managed hardware.
    #[arg(long)]
    pub re_enroll: bool,
}

pub async fn run(args: EnrollArgs, app: &App) -> Result<(), SmartPayError> {
    let (session, client) = app.require_session()?;

    let kind = if args.television {
        HardwareKind::Television
    } else {
        HardwareKind::Device
    };
    let poll_config = poll_config_for(kind, app);
    let store_id = args
        .store
        .clone()
        .or_else(|| app.config.enrollment.default_store_id.clone());

    let mut flow = EnrollmentFlow::new(client, kind);

    loop {
        let start = flow
            .generate(
                &args.customer,
                session.user_id(),
                store_id.as_deref(),
                args.re_enroll,
            )
            .await?;

        println!(
            "enrolment {} created for customer {}",
            start.enrolment.enrolment_id.bold(),
            args.customer
        );
        print_qr(&start.payload)?;
        println!("scan the QR with the {kind} to provision it\n");

        // Ctrl+C cancels the wait instead of killing the process mid-poll.
        let cancel = flow.cancellation_token();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });

        let bar = ProgressBar::new(u64::from(poll_config.max_attempts));
        bar.set_style(
            ProgressStyle::with_template("{spinner} waiting for {msg} [{pos}/{len} attempts]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(kind.to_string());

        match flow.poll(poll_config, |attempt| bar.set_position(u64::from(attempt))).await {
            Ok(hardware) => {
                bar.finish_and_clear();
                print_connected(&hardware);
                return Ok(());
            }
            Err(SmartPayError::EnrollmentTimeout { attempts }) => {
                bar.abandon();
                eprintln!(
                    "{} no {kind} appeared after {attempts} attempts",
                    "timeout:".yellow().bold()
                );
                if !prompt_retry()? {
                    return Err(SmartPayError::EnrollmentTimeout { attempts });
                }
                debug!("retrying with a fresh enrolment");
            }
            Err(err) => {
                bar.abandon();
                return Err(err);
            }
        }
    }
}

fn poll_config_for(kind: HardwareKind, app: &App) -> PollConfig {
    let enrollment = &app.config.enrollment;
    match kind {
        HardwareKind::Device => PollConfig::new(
            Duration::from_secs(enrollment.device_poll_interval_secs),
            enrollment.device_poll_max_attempts,
        ),
        HardwareKind::Television => PollConfig::new(
            Duration::from_secs(enrollment.television_poll_interval_secs),
            enrollment.television_poll_max_attempts,
        ),
    }
}

fn print_qr(payload: &serde_json::Value) -> Result<(), SmartPayError> {
    let encoded = payload.to_string();
    let code = QrCode::new(encoded.as_bytes())
        .map_err(|e| SmartPayError::Internal(format!("provisioning payload too large for QR: {e}")))?;
    let rendered = code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .build();
    println!("{rendered}");
    Ok(())
}

fn print_connected(hardware: &Hardware) {
    println!("{} {} connected", "ok:".green().bold(), hardware.kind());
    println!("id:     {}", hardware.id());
    println!("serial: {}", hardware.serial_number());
    println!("model:  {}", hardware.model());
}

fn prompt_retry() -> Result<bool, SmartPayError> {
    print!("generate a new enrolment and retry? [y/N] ");
    std::io::stdout()
        .flush()
        .map_err(|e| SmartPayError::Internal(format!("stdout unavailable: {e}")))?;
    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .map_err(|e| SmartPayError::Internal(format!("stdin unavailable: {e}")))?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
