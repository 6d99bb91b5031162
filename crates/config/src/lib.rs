//! # multichain-config
//!
//! Configuration of the multichain wallet.
//!
//! Values are layered, later sources overriding earlier ones:
//!   1. the defaults of [`MultichainConfig`]
//!   2. `multichain.toml`, or the file named by the `MULTICHAIN_CONFIG` environment variable
//!   3. `MULTICHAIN_` prefixed environment variables, e.g. `MULTICHAIN_SUPPORTED_CHAIN_IDS=[1,10]`

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Serialized},
    value::{Dict, Map},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use alloy_chains::{Chain, NamedChain};

mod chains;
pub use chains::{ChainSelection, ConfiguredChainSupport};

mod error;
pub use error::ExtractConfigError;

mod providers;
use providers::TomlFileProvider;

/// Multichain wallet configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultichainConfig {
    /// Chains the wallet has a live network client for.
    pub supported_chain_ids: ChainSelection,
    /// Chains the wallet knows how to add a network client for.
    pub supportable_chain_ids: ChainSelection,
    /// Whether repeated subscriptions of an origin to the same scope collapse into one.
    pub dedupe_subscriptions: bool,
}

impl MultichainConfig {
    /// The default config file name.
    pub const FILE_NAME: &'static str = "multichain.toml";

    /// The environment variable naming a config file to use instead of [`Self::FILE_NAME`].
    pub const CONFIG_ENV: &'static str = "MULTICHAIN_CONFIG";

    /// The prefix of environment variables overriding config values.
    pub const ENV_PREFIX: &'static str = "MULTICHAIN_";

    /// Loads the config from the current directory.
    ///
    /// See [`figment`](Self::figment) for the sources.
    pub fn load() -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment())
    }

    /// Loads the config, reading `multichain.toml` from `root`.
    pub fn load_with_root(root: impl AsRef<Path>) -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment_with_root(root))
    }

    /// Attempts to extract a `MultichainConfig` from `provider`.
    pub fn try_from<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        trace!(target: "multichain::config", metadata = ?provider.metadata(), "loading config");
        Figment::from(provider).extract().map_err(ExtractConfigError::new)
    }

    /// Returns the default figment, reading `multichain.toml` from the current directory.
    pub fn figment() -> Figment {
        Self::figment_with_root(".")
    }

    /// Returns the figment merging, in order: the defaults, the config file in `root` (or the
    /// file named by `MULTICHAIN_CONFIG`), and `MULTICHAIN_` environment variables.
    pub fn figment_with_root(root: impl AsRef<Path>) -> Figment {
        Figment::from(Self::default())
            .merge(TomlFileProvider::new(
                Some(Self::CONFIG_ENV),
                root.as_ref().join(Self::FILE_NAME),
            ))
            .merge(Env::prefixed(Self::ENV_PREFIX).ignore(&["CONFIG"]))
    }

    /// Returns the chain support described by this config.
    pub fn chain_support(&self) -> ConfiguredChainSupport {
        ConfiguredChainSupport {
            supported: self.supported_chain_ids.clone(),
            supportable: self.supportable_chain_ids.clone(),
        }
    }
}

impl Default for MultichainConfig {
    fn default() -> Self {
        Self {
            supported_chain_ids: ChainSelection::from([
                NamedChain::Mainnet,
                NamedChain::Sepolia,
                NamedChain::Linea,
            ]),
            supportable_chain_ids: ChainSelection::from([
                NamedChain::Optimism,
                NamedChain::BinanceSmartChain,
                NamedChain::Gnosis,
                NamedChain::Polygon,
                NamedChain::ZkSync,
                NamedChain::Base,
                NamedChain::Arbitrum,
                NamedChain::Avalanche,
                NamedChain::Scroll,
            ]),
            dedupe_subscriptions: true,
        }
    }
}

impl Provider for MultichainConfig {
    fn metadata(&self) -> Metadata {
        Metadata::named("Multichain Config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use multichain_core::scope::ChainSupport;

    #[test]
    fn figment_is_default() {
        Jail::expect_with(|_| {
            let config = MultichainConfig::load().unwrap();
            similar_asserts::assert_eq!(config, MultichainConfig::default());
            Ok(())
        });
    }

    #[test]
    fn default_chain_support() {
        let support = MultichainConfig::default().chain_support();
        assert!(support.is_chain_id_supported(1));
        assert!(support.is_chain_id_supported(59144));
        assert!(!support.is_chain_id_supported(10));
        assert!(support.is_chain_id_supportable(10));
        assert!(!support.is_chain_id_supportable(999_999));
    }

    #[test]
    fn reads_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "multichain.toml",
                r#"
                supported_chain_ids = [1, "optimism"]
                supportable_chain_ids = "all"
                dedupe_subscriptions = false
            "#,
            )?;
            let config = MultichainConfig::load().unwrap();
            assert_eq!(
                config.supported_chain_ids,
                ChainSelection::Chains(vec![Chain::mainnet(), Chain::optimism_mainnet()])
            );
            assert_eq!(config.supportable_chain_ids, ChainSelection::All);
            assert!(!config.dedupe_subscriptions);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_toml() {
        Jail::expect_with(|jail| {
            jail.create_file("multichain.toml", "supported_chain_ids = [1]")?;
            jail.set_env("MULTICHAIN_SUPPORTED_CHAIN_IDS", "[10, 137]");
            jail.set_env("MULTICHAIN_SUPPORTABLE_CHAIN_IDS", "none");
            jail.set_env("MULTICHAIN_DEDUPE_SUBSCRIPTIONS", "false");

            let config = MultichainConfig::load().unwrap();
            assert_eq!(
                config.supported_chain_ids,
                ChainSelection::Chains(vec![Chain::from_id(10), Chain::from_id(137)])
            );
            assert_eq!(config.supportable_chain_ids, ChainSelection::None);
            assert!(!config.dedupe_subscriptions);
            Ok(())
        });
    }

    #[test]
    fn config_file_from_env() {
        Jail::expect_with(|jail| {
            jail.create_file("multichain.toml", "dedupe_subscriptions = false")?;
            jail.create_file("custom.toml", "supported_chain_ids = [59144]")?;
            jail.set_env("MULTICHAIN_CONFIG", "custom.toml");

            let config = MultichainConfig::load().unwrap();
            assert_eq!(
                config.supported_chain_ids,
                ChainSelection::Chains(vec![Chain::from_id(59144)])
            );
            assert!(config.dedupe_subscriptions);
            Ok(())
        });
    }

    #[test]
    fn missing_config_file_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env("MULTICHAIN_CONFIG", "missing.toml");
            let err = MultichainConfig::load().unwrap_err();
            assert!(err.to_string().contains("set in env var `MULTICHAIN_CONFIG` does not exist"));
            Ok(())
        });
    }

    #[test]
    fn reports_invalid_settings() {
        Jail::expect_with(|jail| {
            jail.create_file("multichain.toml", r#"supported_chain_ids = "some""#)?;
            let err = MultichainConfig::load().unwrap_err();
            assert_eq!(err.settings(), ["supported_chain_ids"]);

            let message = err.to_string();
            assert!(message.starts_with("failed to extract multichain config:"), "{message}");
            assert!(message.contains("TOML file"), "{message}");
            assert!(message.contains("multichain.toml"), "{message}");
            assert!(message.contains("setting `supported_chain_ids`"), "{message}");
            assert!(message.contains("`some`"), "{message}");
            assert!(message.contains("expected \"all\", \"none\""), "{message}");
            Ok(())
        });
    }

    #[test]
    fn reports_env_source() {
        Jail::expect_with(|jail| {
            jail.set_env("MULTICHAIN_DEDUPE_SUBSCRIPTIONS", "[1]");
            let err = MultichainConfig::load().unwrap_err();
            assert_eq!(err.settings(), ["dedupe_subscriptions"]);
            let message = err.to_string();
            assert!(message.contains("MULTICHAIN_"), "{message}");
            assert!(!message.contains("expected \"all\""), "{message}");
            Ok(())
        });
    }

    #[test]
    fn round_trips_through_provider() {
        let config = MultichainConfig {
            supported_chain_ids: ChainSelection::All,
            supportable_chain_ids: ChainSelection::None,
            dedupe_subscriptions: false,
        };
        assert_eq!(MultichainConfig::try_from(&config).unwrap(), config);
    }
}
