use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use multichain_permission::CaveatMutatorKind;
use std::path::PathBuf;

/// Inspect and normalize CAIP-25 authorizations.
#[derive(Debug, Parser)]
#[command(name = "caip25", version, next_display_order = None)]
pub struct Caip25 {
    #[command(subcommand)]
    pub cmd: Caip25Subcommand,
}

#[derive(Debug, Subcommand)]
pub enum Caip25Subcommand {
    /// Classify a scope string as a namespace, a chain id, or neither.
    #[command(visible_alias = "p")]
    Parse {
        /// The scope string, e.g. `eip155:1` or `wallet`.
        scope: String,
    },

    /// Validate, flatten and bucket the scopes of an authorization request.
    ///
    /// Scopes are bucketed by the chains configured in `multichain.toml`.
    Process {
        /// Path to the request JSON, or `-` for stdin.
        #[arg(value_hint = ValueHint::FilePath, default_value = "-")]
        request: PathBuf,

        /// Fail if any required scope is not supported.
        #[arg(long)]
        assert_supported: bool,

        /// The directory containing `multichain.toml`.
        #[arg(long, value_hint = ValueHint::DirPath, value_name = "PATH")]
        root: Option<PathBuf>,
    },

    /// Sanitize the scoped properties of an authorization request.
    #[command(visible_alias = "sp")]
    ScopedProperties {
        /// Path to the request JSON, or `-` for stdin.
        #[arg(value_hint = ValueHint::FilePath, default_value = "-")]
        request: PathBuf,
    },

    /// Check that an `endowment:caip25` permission holds a normalized caveat.
    ValidatePermission {
        /// Path to the permission JSON, or `-` for stdin.
        #[arg(value_hint = ValueHint::FilePath, default_value = "-")]
        permission: PathBuf,
    },

    /// Apply a caveat mutator to an `authorizedScopes` caveat value.
    MutateCaveat {
        /// What was removed from the wallet.
        #[arg(value_enum)]
        kind: MutatorKind,

        /// The removed scope string or account address.
        target: String,

        /// Path to the caveat value JSON, or `-` for stdin.
        #[arg(value_hint = ValueHint::FilePath, default_value = "-")]
        caveat: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MutatorKind {
    Scope,
    Account,
}

impl From<MutatorKind> for CaveatMutatorKind {
    fn from(kind: MutatorKind) -> Self {
        match kind {
            MutatorKind::Scope => Self::Scope,
            MutatorKind::Account => Self::Account,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Caip25::command().debug_assert();
    }

    #[test]
    fn parses_process_args() {
        let args =
            Caip25::parse_from(["caip25", "process", "req.json", "--assert-supported"]);
        match args.cmd {
            Caip25Subcommand::Process { request, assert_supported, root } => {
                assert_eq!(request, PathBuf::from("req.json"));
                assert!(assert_supported);
                assert!(root.is_none());
            }
            cmd => panic!("unexpected subcommand {cmd:?}"),
        }
    }

    #[test]
    fn parses_mutate_caveat_args() {
        let args = Caip25::parse_from(["caip25", "mutate-caveat", "account", "0xabc"]);
        match args.cmd {
            Caip25Subcommand::MutateCaveat { kind, target, caveat } => {
                assert_eq!(kind, MutatorKind::Account);
                assert_eq!(target, "0xabc");
                assert_eq!(caveat, PathBuf::from("-"));
            }
            cmd => panic!("unexpected subcommand {cmd:?}"),
        }
    }
}
