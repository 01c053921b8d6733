//! ACL Manager - access control list configuration reconciler
//!
//! aclmgrd computes the ordered device commands that turn the ACLs observed
//! on a device ("have") into a declared configuration ("want").
//!
//! Entries are ordered, line-numbered rules, so a change to an early line
//! shifts the position of every later one. The reconciler:
//! - Indexes both states by ACL name
//! - Drops redundant protocol discriminators from current entries
//! - Applies the mode transform (merged, replaced, overridden, deleted, rendered)
//! - Diffs rendered entries per ACL and numbers removals and additions
//! - Orders removals (reversed) ahead of additions where lines are recomputed
//!
//! # Example
//!
//! ```
//! use sonic_aclmgrd::{AclReconciler, AsaRenderer};
//! use sonic_acl_types::{AceEntity, AclEntity, AclType, Endpoint, Grant, ReconcileMode};
//!
//! let want = vec![AclEntity::new("test_acl", AclType::Extended).with_ace(AceEntity::new(
//!     Grant::Permit,
//!     "tcp",
//!     Endpoint::any(),
//!     Endpoint::host("192.0.2.1"),
//! ))];
//!
//! let result = AclReconciler::new(AsaRenderer)
//!     .reconcile(ReconcileMode::Merged, want, Vec::new())
//!     .unwrap();
//! assert_eq!(
//!     result.commands,
//!     vec!["access-list test_acl line 1 extended permit tcp any host 192.0.2.1"]
//! );
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod facts;
pub mod index;
pub mod merge;
pub mod normalize;
pub mod reconciler;
pub mod render;
pub mod resolve;
pub mod sequence;

pub use config::{AclMgrConfig, Args, OutputFormat};
pub use error::{AclError, AclResult};
pub use facts::{FactsProvider, FileFacts, StaticFacts};
pub use reconciler::{AclReconciler, ReconcileResult};
pub use render::{AsaRenderer, CommandRenderer};
