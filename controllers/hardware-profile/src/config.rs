//! Controller configuration, read once from the environment at startup.

use crate::error::ControllerError;
use crds::annotations::DEFAULT_DOMAIN;
use profile_client::ListSelector;
use std::env;

/// Runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Domain embedded in `migrated-from` / `migrated-to` values
    pub domain: String,
    /// Namespace to migrate and watch; `None` means all namespaces
    pub namespace: Option<String>,
    /// Label selector narrowing which legacy profiles are migrated
    pub label_selector: Option<String>,
    /// Run a single migration pass and exit instead of watching
    pub run_once: bool,
}

impl Config {
    /// Reads `MIGRATION_DOMAIN`, `WATCH_NAMESPACE`, `PROFILE_LABEL_SELECTOR`
    /// and `RUN_ONCE`.
    pub fn from_env() -> Result<Self, ControllerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ControllerError> {
        let domain = match lookup("MIGRATION_DOMAIN") {
            Some(d) if d.trim().is_empty() => {
                return Err(ControllerError::InvalidConfig(
                    "MIGRATION_DOMAIN must not be empty".to_string(),
                ));
            }
            Some(d) => d.trim().to_string(),
            None => DEFAULT_DOMAIN.to_string(),
        };

        let namespace = lookup("WATCH_NAMESPACE")
            .map(|ns| ns.trim().to_string())
            .filter(|ns| !ns.is_empty());

        let label_selector = lookup("PROFILE_LABEL_SELECTOR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if let Some(selector) = &label_selector {
            ListSelector::all()
                .with_labels(selector.as_str())
                .requirements()
                .map_err(|e| {
                    ControllerError::InvalidConfig(format!("PROFILE_LABEL_SELECTOR: {}", e))
                })?;
        }

        let run_once = match lookup("RUN_ONCE").as_deref().map(str::trim) {
            None | Some("") => false,
            Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => true,
            Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => false,
            Some(other) => {
                return Err(ControllerError::InvalidConfig(format!(
                    "RUN_ONCE must be true or false, got '{}'",
                    other
                )));
            }
        };

        Ok(Self {
            domain,
            namespace,
            label_selector,
            run_once,
        })
    }
}
