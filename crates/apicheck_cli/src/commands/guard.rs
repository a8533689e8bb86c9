//! Unauthenticated access suite command.

use super::{load_config, report, Overrides};
use anyhow::{Context, Result};
use apicheck_core::{run_guard_suite, ApiClient};
use std::process::ExitCode;

/// Run the guard cases; every endpoint must refuse anonymous callers.
pub fn run(overrides: &Overrides) -> Result<ExitCode> {
    let config = load_config(overrides)?;
    config.validate().context("Invalid configuration")?;

    report::banner("인증 필요 API 테스트", &config.server.base_url);

    let client = ApiClient::new(&config.server)?;
    match run_guard_suite(&client, config.suite.list_limit) {
        Ok(suite_report) => Ok(report::print(&suite_report)),
        Err(err) => Ok(report::aborted(&err)),
    }
}
