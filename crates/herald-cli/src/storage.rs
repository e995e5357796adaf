use herald_core::store::SecretStore;
use herald_storage::{keyring_store::KeyringStore, secret_tool::SecretToolStore};
use tracing::debug;

use crate::config::{Backend, Config};

/// Default value of the secret-service `service` attribute. Shared with the
/// Herald applet, which looks credentials up under the same pair.
pub const DEFAULT_SERVICE: &str = "herald";
/// The `username` attribute; there is exactly one blob per service.
pub const ACCOUNT: &str = "credentials";
const LABEL: &str = "Herald Credentials";

/// Build the secret store selected by config. The secret-tool helper is the
/// default; the keyring backend covers hosts without libsecret-tools.
pub fn store_from_config(config: &Config) -> Box<dyn SecretStore> {
    let service = config
        .service
        .clone()
        .unwrap_or_else(|| DEFAULT_SERVICE.to_string());

    match config.backend.unwrap_or(Backend::SecretTool) {
        Backend::SecretTool => {
            let mut store = SecretToolStore::new(service, ACCOUNT).with_label(LABEL);
            if let Some(path) = &config.secret_tool_path {
                debug!(?path, "using secret-tool helper override");
                store = store.with_helper(path.clone());
            }
            Box::new(store)
        }
        Backend::Keyring => {
            debug!("using keyring backend");
            Box::new(KeyringStore::new(service, ACCOUNT))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_secret_tool() {
        let store = store_from_config(&Config::default());
        assert_eq!(store.name(), "secret-tool");
    }

    #[test]
    fn selects_keyring_when_configured() {
        let cfg = Config {
            backend: Some(Backend::Keyring),
            secret_tool_path: None,
            service: None,
        };
        let store = store_from_config(&cfg);
        assert_eq!(store.name(), "keyring");
    }

    #[test]
    fn helper_override_keeps_secret_tool_backend() {
        let cfg = Config {
            backend: None,
            secret_tool_path: Some("/opt/bin/secret-tool".into()),
            service: Some("com.example.herald".into()),
        };
        let store = store_from_config(&cfg);
        assert_eq!(store.name(), "secret-tool");
    }
}
