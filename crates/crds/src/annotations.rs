//! Annotation keys and values used by the hardware profile migration
//!
//! The legacy profile gets `migrated-to` once its replacement is
//! persisted; the replacement carries `migrated-from` plus the display
//! fields that have no place in its spec.

/// Domain used when none is configured
pub const DEFAULT_DOMAIN: &str = "opendatahub.io";

/// Provenance marker on the infrastructure profile
pub const MIGRATED_FROM: &str = "migrated-from";

/// Migration marker on the dashboard profile
pub const MIGRATED_TO: &str = "migrated-to";

pub const DISPLAY_NAME: &str = "display-name";
pub const DESCRIPTION: &str = "description";
pub const DISABLED: &str = "disabled";

/// `hardwareprofiles.dashboard.<domain>/<name>`
pub fn migrated_from_value(domain: &str, name: &str) -> String {
    format!("hardwareprofiles.dashboard.{domain}/{name}")
}

/// `hardwareprofiles.infrastructure.<domain>/<name>`
pub fn migrated_to_value(domain: &str, name: &str) -> String {
    format!("hardwareprofiles.infrastructure.{domain}/{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_values() {
        assert_eq!(
            migrated_from_value(DEFAULT_DOMAIN, "test name"),
            "hardwareprofiles.dashboard.opendatahub.io/test name"
        );
        assert_eq!(
            migrated_to_value("example.com", "gpu"),
            "hardwareprofiles.infrastructure.example.com/gpu"
        );
    }
}
