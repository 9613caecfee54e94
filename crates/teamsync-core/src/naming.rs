//! Terraform resource identifiers derived from group display names.

use crate::directory::Group;
use crate::error::{SyncError, SyncResult};
use std::collections::HashMap;

/// Derive a resource identifier from a display name.
///
/// Lower-cases the name and replaces every space with an underscore.
/// No other characters are touched.
pub fn normalize(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Fail if two groups normalize to the same identifier.
///
/// Such groups would otherwise produce duplicate resource blocks or silently
/// overwrite each other's map entry.
pub fn check_collisions(groups: &[Group]) -> SyncResult<()> {
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(groups.len());

    for group in groups {
        let identifier = normalize(&group.name);
        if let Some(first) = seen.get(identifier.as_str()) {
            return Err(SyncError::DuplicateIdentifier {
                identifier,
                first: first.to_string(),
                second: group.name.clone(),
            });
        }
        seen.insert(identifier, &group.name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Platform Engineering"), "platform_engineering");
        assert_eq!(normalize("ops"), "ops");
        assert_eq!(normalize("A  B"), "a__b");
    }

    #[test]
    fn test_normalize_leaves_other_characters() {
        assert_eq!(normalize("SRE-Team (EU)"), "sre-team_(eu)");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_collisions_detected() {
        let groups = vec![
            Group::new("Platform Engineering", "g1"),
            Group::new("Ops", "g2"),
            Group::new("platform engineering", "g3"),
        ];

        match check_collisions(&groups) {
            Err(SyncError::DuplicateIdentifier {
                identifier,
                first,
                second,
            }) => {
                assert_eq!(identifier, "platform_engineering");
                assert_eq!(first, "Platform Engineering");
                assert_eq!(second, "platform engineering");
            }
            other => panic!("expected collision, got {:?}", other),
        }
    }

    #[test]
    fn test_no_collisions() {
        let groups = vec![Group::new("Ops", "g1"), Group::new("Dev Ops", "g2")];
        assert!(check_collisions(&groups).is_ok());
        assert!(check_collisions(&[]).is_ok());
    }
}
