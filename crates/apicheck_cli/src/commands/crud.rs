//! Authenticated CRUD suite command.

use super::{load_config, report, Overrides};
use anyhow::{Context, Result};
use apicheck_core::{run_crud_suite, system_now, ApiClient};
use std::process::ExitCode;

/// Log in and run the CRUD cases.
pub fn run(
    overrides: &Overrides,
    threshold: Option<f64>,
    no_verify_soft_delete: bool,
) -> Result<ExitCode> {
    let mut config = load_config(overrides)?;
    if let Some(threshold) = threshold {
        config.suite.pass_threshold = threshold;
    }
    if no_verify_soft_delete {
        config.suite.verify_soft_delete = false;
    }
    config.validate().context("Invalid configuration")?;

    report::banner("인증된 CRUD API 테스트", &config.server.base_url);

    let client = ApiClient::new(&config.server)?;
    match run_crud_suite(&client, &config, &system_now) {
        Ok(suite_report) => Ok(report::print(&suite_report)),
        Err(err) => Ok(report::aborted(&err)),
    }
}
