//! End-to-end reconciliation scenarios
//!
//! These tests drive the full pipeline (index, normalize, resolve, compare,
//! sequence) through the public reconciler API for every state.

use pretty_assertions::assert_eq;
use sonic_acl_types::{
    AceEntity, AclEntity, AclType, Endpoint, Grant, PortProtocol, ProtocolOptions, ReconcileMode,
};
use sonic_aclmgrd::{AclMgrConfig, AclReconciler, Args, AsaRenderer, FactsProvider, StaticFacts};
use std::io::Write;

use clap::Parser;

fn permit(host: &str) -> AceEntity {
    AceEntity::new(Grant::Permit, "ip", Endpoint::host(host), Endpoint::any())
}

fn acl(name: &str, aces: Vec<AceEntity>) -> AclEntity {
    aces.into_iter()
        .fold(AclEntity::new(name, AclType::Extended), AclEntity::with_ace)
}

fn numbered(name: &str, hosts: &[&str]) -> AclEntity {
    let aces = hosts
        .iter()
        .zip(1u32..)
        .map(|(h, line)| permit(h).at_line(line))
        .collect();
    acl(name, aces)
}

fn reconcile(mode: ReconcileMode, want: Vec<AclEntity>, have: Vec<AclEntity>) -> Vec<String> {
    AclReconciler::new(AsaRenderer)
        .reconcile(mode, want, have)
        .unwrap()
        .commands
}

#[test]
fn test_identical_state_is_a_no_op() {
    let state = vec![
        numbered("ACL1", &["192.0.2.1", "192.0.2.2"]),
        numbered("ACL2", &["198.51.100.1"]),
    ];
    assert!(reconcile(ReconcileMode::Merged, state.clone(), state.clone()).is_empty());
    assert!(reconcile(ReconcileMode::Replaced, state.clone(), state.clone()).is_empty());
    assert!(reconcile(ReconcileMode::Overridden, state.clone(), state).is_empty());
}

#[test]
fn test_additions_numbered_by_position() {
    let want = vec![acl("ACL1", vec![permit("192.0.2.1"), permit("192.0.2.2"), permit("192.0.2.3")])];
    assert_eq!(
        reconcile(ReconcileMode::Replaced, want, Vec::new()),
        vec![
            "access-list ACL1 line 1 extended permit ip host 192.0.2.1 any",
            "access-list ACL1 line 2 extended permit ip host 192.0.2.2 any",
            "access-list ACL1 line 3 extended permit ip host 192.0.2.3 any",
        ]
    );
}

#[test]
fn test_removals_precede_additions() {
    let have = vec![numbered("ACL1", &["192.0.2.1", "192.0.2.2"])];
    let want = vec![acl("ACL1", vec![permit("192.0.2.9")])];
    assert_eq!(
        reconcile(ReconcileMode::Replaced, want, have),
        vec![
            "no access-list ACL1 line 2 extended permit ip host 192.0.2.2 any",
            "no access-list ACL1 line 1 extended permit ip host 192.0.2.1 any",
            "access-list ACL1 line 1 extended permit ip host 192.0.2.9 any",
        ]
    );
}

#[test]
fn test_idempotent_after_apply() {
    let want = vec![acl("ACL1", vec![permit("192.0.2.1"), permit("192.0.2.2")])];

    for mode in [ReconcileMode::Merged, ReconcileMode::Replaced] {
        let first = reconcile(mode, want.clone(), Vec::new());
        assert_eq!(first.len(), 2);
        assert!(reconcile(mode, want.clone(), want.clone()).is_empty());
    }
}

#[test]
fn test_deleted_only_touches_named_acls() {
    let have = vec![
        numbered("ACL1", &["192.0.2.1"]),
        numbered("ACL2", &["198.51.100.1"]),
    ];
    let want = vec![AclEntity::new("ACL1", AclType::Extended)];
    assert_eq!(
        reconcile(ReconcileMode::Deleted, want, have),
        vec!["no access-list ACL1 line 1 extended permit ip host 192.0.2.1 any"]
    );
}

#[test]
fn test_deleted_without_names_removes_everything() {
    let have = vec![
        numbered("ACL1", &["192.0.2.1", "192.0.2.2"]),
        numbered("ACL2", &["198.51.100.1"]),
    ];
    assert_eq!(
        reconcile(ReconcileMode::Deleted, Vec::new(), have),
        vec![
            "no access-list ACL2 line 1 extended permit ip host 198.51.100.1 any",
            "no access-list ACL1 line 2 extended permit ip host 192.0.2.2 any",
            "no access-list ACL1 line 1 extended permit ip host 192.0.2.1 any",
        ]
    );
}

#[test]
fn test_overridden_removes_unlisted_acls() {
    let have = vec![
        numbered("ACL1", &["192.0.2.1", "192.0.2.2"]),
        numbered("ACL2", &["198.51.100.1"]),
    ];
    let want = vec![acl("ACL1", vec![permit("192.0.2.1"), permit("192.0.2.4")])];
    assert_eq!(
        reconcile(ReconcileMode::Overridden, want, have),
        vec![
            "no access-list ACL1 line 2 extended permit ip host 192.0.2.2 any",
            "no access-list ACL2 line 1 extended permit ip host 198.51.100.1 any",
            "access-list ACL1 line 2 extended permit ip host 192.0.2.4 any",
        ]
    );
}

#[test]
fn test_replaced_leaves_unlisted_acls() {
    let have = vec![
        numbered("ACL1", &["192.0.2.1"]),
        numbered("ACL2", &["198.51.100.1"]),
    ];
    let want = vec![acl("ACL1", vec![permit("192.0.2.1")])];
    assert!(reconcile(ReconcileMode::Replaced, want, have).is_empty());
}

#[test]
fn test_merged_carries_current_line() {
    let have = vec![acl(
        "ACL1",
        vec![AceEntity::new(Grant::Permit, "tcp", Endpoint::host("192.0.2.1"), Endpoint::host("192.0.2.2")).at_line(1)],
    )];
    let want = vec![acl(
        "ACL1",
        vec![AceEntity::new(Grant::Permit, "tcp", Endpoint::host("192.0.2.1"), Endpoint::host("192.0.2.2"))],
    )];
    assert!(reconcile(ReconcileMode::Merged, want, have).is_empty());
}

#[test]
fn test_merged_appends_new_entry() {
    let have = vec![numbered("ACL1", &["192.0.2.1", "192.0.2.2"])];
    let want = vec![acl("ACL1", vec![permit("192.0.2.2"), permit("192.0.2.3")])];
    assert_eq!(
        reconcile(ReconcileMode::Merged, want, have),
        vec!["access-list ACL1 line 3 extended permit ip host 192.0.2.3 any"]
    );
}

#[test]
fn test_merged_explicit_line_inserts_at_position() {
    let have = vec![numbered("ACL1", &["192.0.2.1", "192.0.2.2"])];
    let want = vec![acl("ACL1", vec![permit("192.0.2.7").at_line(1)])];
    assert_eq!(
        reconcile(ReconcileMode::Merged, want, have),
        vec!["access-list ACL1 line 1 extended permit ip host 192.0.2.7 any"]
    );
}

#[test]
fn test_protocol_options_normalized_away() {
    let web = || Endpoint::host("192.0.2.80").with_port(PortProtocol::port_eq("www"));
    let mut have_ace = AceEntity::new(Grant::Permit, "tcp", Endpoint::any(), web());
    have_ace.protocol_options = Some(ProtocolOptions::new().with_protocol("tcp"));
    let want_ace = AceEntity::new(Grant::Permit, "tcp", Endpoint::any(), web());

    let have = vec![acl("ACL1", vec![have_ace])];
    let want = vec![acl("ACL1", vec![want_ace])];

    assert!(reconcile(ReconcileMode::Replaced, want.clone(), have.clone()).is_empty());
    assert!(reconcile(ReconcileMode::Merged, want, have).is_empty());
}

#[test]
fn test_icmp_options_normalized_away() {
    let mut have_ace = AceEntity::new(Grant::Permit, "icmp", Endpoint::any(), Endpoint::any()).at_line(1);
    have_ace.protocol_options = Some(ProtocolOptions::new().with_flag("icmp", "echo"));
    let want_ace = AceEntity::new(Grant::Permit, "icmp", Endpoint::any(), Endpoint::any());

    let have = vec![acl("ACL1", vec![have_ace])];
    let want = vec![acl("ACL1", vec![want_ace])];

    assert!(reconcile(ReconcileMode::Overridden, want, have).is_empty());
}

#[test]
fn test_rename_deduplicated() {
    let mut a = numbered("ACL1", &["192.0.2.1"]);
    a.rename = Some("X".to_string());
    let mut b = numbered("ACL2", &["192.0.2.2"]);
    b.rename = Some("X".to_string());
    let have = vec![numbered("ACL1", &["192.0.2.1"]), numbered("ACL2", &["192.0.2.2"])];

    let commands = reconcile(ReconcileMode::Merged, vec![a, b], have);

    assert_eq!(commands, vec!["access-list ACL1 rename X"]);
}

#[test]
fn test_ethertype_acl_replaced() {
    let ethertype = |value: &str| AceEntity {
        grant: Some(Grant::Deny),
        protocol: Some(value.to_string()),
        ..AceEntity::default()
    };
    let have = vec![AclEntity::new("L2", AclType::Ethertype).with_ace(ethertype("bpdu").at_line(1))];
    let want = vec![AclEntity::new("L2", AclType::Ethertype)
        .with_ace(ethertype("bpdu"))
        .with_ace(ethertype("mpls-unicast"))];
    assert_eq!(
        reconcile(ReconcileMode::Replaced, want, have),
        vec!["access-list L2 line 2 ethertype deny mpls-unicast"]
    );
}

#[test]
fn test_rendered_ignores_current_state() {
    let have = vec![numbered("ACL1", &["192.0.2.1"])];
    let want = vec![numbered("ACL1", &["192.0.2.1"])];
    assert_eq!(
        reconcile(ReconcileMode::Rendered, want, have),
        vec!["access-list ACL1 line 1 extended permit ip host 192.0.2.1 any"]
    );
}

#[test]
fn test_facts_provider_state_is_not_mutated() {
    let mut have_ace = AceEntity::new(Grant::Permit, "tcp", Endpoint::any(), Endpoint::any()).at_line(1);
    have_ace.protocol_options = Some(ProtocolOptions::new().with_protocol("tcp"));
    let facts = StaticFacts::new(vec![acl("ACL1", vec![have_ace.clone()])]);
    let want = vec![acl("ACL1", vec![AceEntity::new(Grant::Permit, "tcp", Endpoint::any(), Endpoint::any())])];

    let mut reconciler = AclReconciler::new(AsaRenderer);
    for _ in 0..2 {
        let result = reconciler
            .reconcile_with_facts(ReconcileMode::Merged, want.clone(), &facts)
            .unwrap();
        assert!(!result.changed);
    }

    assert_eq!(facts.acls().unwrap()[0].aces[0], have_ace);
    assert_eq!(reconciler.stats().runs, 2);
}

#[test]
fn test_file_inputs_through_config() {
    let mut want_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
        want_file,
        r#"
acls:
  - name: test_access
    acl_type: extended
    aces:
      - grant: deny
        protocol: tcp
        source:
          address: 192.0.2.0
          netmask: 255.255.255.0
        destination:
          address: 192.0.3.0
          netmask: 255.255.255.0
          port_protocol:
            eq: www
        log: default
"#
    )
    .unwrap();

    let mut have_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        have_file,
        r#"{{"acls": [{{"name": "test_access", "acl_type": "extended", "aces": [
            {{"line": 1, "grant": "permit", "protocol": "ip", "source": {{"any": true}}, "destination": {{"any": true}}}}
        ]}}]}}"#
    )
    .unwrap();

    let args = Args::try_parse_from([
        "aclmgrd",
        "--want",
        want_file.path().to_str().unwrap(),
        "--have",
        have_file.path().to_str().unwrap(),
        "--state",
        "replaced",
    ])
    .unwrap();
    let config = AclMgrConfig::try_from(args).unwrap();

    let want = config.load_want().unwrap();
    let facts = config.facts();
    let result = AclReconciler::new(AsaRenderer)
        .reconcile_with_facts(config.mode, want, &*facts)
        .unwrap();

    assert_eq!(
        result.commands,
        vec![
            "no access-list test_access line 1 extended permit ip any any",
            "access-list test_access line 1 extended deny tcp 192.0.2.0 255.255.255.0 192.0.3.0 255.255.255.0 eq www log default",
        ]
    );
    assert!(result.changed);
}
