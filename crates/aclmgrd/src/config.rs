//! Command-line configuration for aclmgrd.

use clap::{Parser, ValueEnum};
use sonic_acl_types::{AclEntity, ReconcileMode};
use std::path::PathBuf;

use crate::error::{AclError, AclResult};
use crate::facts::{read_acl_file, FactsProvider, FileFacts, StaticFacts};
use crate::reconciler::ReconcileResult;

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Output format of the command plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One command per line.
    #[default]
    Text,
    /// The full result as JSON.
    Json,
}

impl OutputFormat {
    /// Formats a reconciliation result for stdout.
    pub fn format(&self, result: &ReconcileResult) -> AclResult<String> {
        match self {
            Self::Text => Ok(result.commands.join("\n")),
            Self::Json => serde_json::to_string_pretty(result)
                .map_err(|e| AclError::invalid_config("output", e.to_string())),
        }
    }
}

/// SONiC ACL configuration reconciler
#[derive(Parser, Debug)]
#[command(name = "aclmgrd")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Desired ACL configuration (JSON or YAML)
    #[arg(short = 'w', long)]
    pub want: Option<PathBuf>,

    /// Current ACL configuration gathered from the device (JSON or YAML)
    #[arg(long)]
    pub have: Option<PathBuf>,

    /// Reconciliation state (merged, replaced, overridden, deleted, rendered)
    #[arg(short = 's', long, default_value = "merged")]
    pub state: String,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

/// Validated configuration for one aclmgrd run.
#[derive(Debug, Clone)]
pub struct AclMgrConfig {
    pub want: Option<PathBuf>,
    pub have: Option<PathBuf>,
    pub mode: ReconcileMode,
    pub output: OutputFormat,
    pub log_level: String,
}

impl TryFrom<Args> for AclMgrConfig {
    type Error = AclError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let mode = args
            .state
            .parse::<ReconcileMode>()
            .map_err(|e| AclError::invalid_config("state", e.to_string()))?;

        if mode == ReconcileMode::Rendered && args.have.is_some() {
            return Err(AclError::invalid_config(
                "have",
                "current configuration is not used in rendered state",
            ));
        }

        Ok(Self {
            want: args.want,
            have: args.have,
            mode,
            output: args.output,
            log_level: args.log_level,
        })
    }
}

impl AclMgrConfig {
    /// Loads the desired ACLs; no file means an empty desired state.
    pub fn load_want(&self) -> AclResult<Vec<AclEntity>> {
        match &self.want {
            Some(path) => read_acl_file(path),
            None => Ok(Vec::new()),
        }
    }

    /// Returns the facts provider for current state.
    pub fn facts(&self) -> Box<dyn FactsProvider> {
        match &self.have {
            Some(path) => Box::new(FileFacts::new(path.clone())),
            None => Box::new(StaticFacts::default()),
        }
    }
}
