//! Name-indexed ACL state.

use indexmap::IndexMap;
use sonic_acl_types::AclEntity;
use tracing::warn;

/// ACLs keyed by name, in first-seen order.
pub type AclMap = IndexMap<String, AclEntity>;

/// Indexes a list of ACLs by name.
///
/// A later ACL with an already seen name overwrites the earlier one but
/// keeps the earlier position, so iteration order stays stable.
pub fn index_by_name(acls: Vec<AclEntity>) -> AclMap {
    let mut map = AclMap::with_capacity(acls.len());
    for acl in acls {
        if let Some(prev) = map.insert(acl.name.clone(), acl) {
            warn!("Duplicate ACL {} in input, last definition wins", prev.name);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sonic_acl_types::AclType;

    #[test]
    fn test_index_empty() {
        assert!(index_by_name(Vec::new()).is_empty());
    }

    #[test]
    fn test_index_last_wins() {
        let first = AclEntity::new("test_acl", AclType::Standard);
        let other = AclEntity::new("other_acl", AclType::Extended);
        let second = AclEntity::new("test_acl", AclType::Extended);

        let map = index_by_name(vec![first, other, second]);

        assert_eq!(map.len(), 2);
        assert_eq!(map["test_acl"].acl_type, Some(AclType::Extended));
        assert_eq!(
            map.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["test_acl", "other_acl"]
        );
    }
}
