//! ACL Manager entry point

use anyhow::Context;
use clap::Parser;
use sonic_aclmgrd::{AclError, AclMgrConfig, AclReconciler, Args, AsaRenderer};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn run(config: &AclMgrConfig, reconciler: &mut AclReconciler) -> anyhow::Result<()> {
    let want = config.load_want().context("loading desired ACLs")?;
    let facts = config.facts();

    let result = reconciler
        .reconcile_with_facts(config.mode, want, &*facts)
        .with_context(|| format!("reconciling ACLs in {} state", config.mode))?;

    let output = config.output.format(&result)?;
    if !output.is_empty() {
        println!("{output}");
    }

    info!(
        "aclmgrd finished: changed={}, {} commands",
        result.changed,
        result.commands.len()
    );
    Ok(())
}

/// Returns true if the failure came from a facts source that may recover.
fn is_retryable(err: &anyhow::Error) -> bool {
    err.downcast_ref::<AclError>()
        .is_some_and(AclError::is_retryable)
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the command plan
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match AclMgrConfig::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid arguments: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Starting aclmgrd in {} state", config.mode);

    let mut reconciler = AclReconciler::new(AsaRenderer);
    let outcome = run(&config, &mut reconciler);

    let stats = reconciler.stats();
    info!(
        "Reconciler stats: runs={}, commands={}, failures={}",
        stats.runs, stats.commands_generated, stats.failures
    );

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let retryable = is_retryable(&e);
            error!(retryable, "aclmgrd failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
