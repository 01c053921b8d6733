//! ACL entity types for device ACL reconciliation.
//!
//! This crate provides the structured representation of access control
//! lists as they are declared by the user ("want") and as they are observed
//! on the device ("have"):
//!
//! - [`AclEntity`]: A named, ordered list of entries
//! - [`AceEntity`]: A single access control entry with an optional line
//! - [`Endpoint`]: Source or destination match of an entry
//! - [`ProtocolOptions`]: Per-protocol option flags (e.g. `icmp: {echo: true}`)
//! - [`ReconcileMode`]: How desired state is applied on top of current state
//!
//! All types are plain data with serde support so they can be loaded from
//! JSON or YAML documents of the form `{acls: [...]}`.

mod ace;
mod acl;
mod endpoint;
mod mode;

pub use ace::{AceEntity, Grant, ProtocolOption, ProtocolOptions};
pub use acl::{AclEntity, AclType, AclsConfig};
pub use endpoint::{Endpoint, PortProtocol, PortRange};
pub use mode::ReconcileMode;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid ACL type: {0}")]
    InvalidAclType(String),

    #[error("invalid grant: {0} (must be permit or deny)")]
    InvalidGrant(String),

    #[error("invalid reconcile mode: {0}")]
    InvalidMode(String),
}
