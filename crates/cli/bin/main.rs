use clap::Parser;
use eyre::Result;
use multichain_cli::{
    cmd::{parse, permission, process},
    handler,
    opts::{Caip25, Caip25Subcommand},
    utils,
};

fn main() -> Result<()> {
    handler::install();
    utils::subscriber();

    let args = Caip25::parse();
    run(args)
}

fn run(args: Caip25) -> Result<()> {
    match args.cmd {
        Caip25Subcommand::Parse { scope } => utils::print_json(&parse::parse_scope(&scope)),
        Caip25Subcommand::Process { request, assert_supported, root } => {
            let config = utils::load_config(root.as_deref())?;
            let request = utils::read_json(&request)?;
            let processed =
                process::process_request(request, &config.chain_support(), assert_supported)?;
            utils::print_json(&processed)
        }
        Caip25Subcommand::ScopedProperties { request } => {
            let request = utils::read_json(&request)?;
            utils::print_json(&process::process_scoped_properties(request)?)
        }
        Caip25Subcommand::ValidatePermission { permission: path } => {
            permission::validate_permission(utils::read_json(&path)?)?;
            println!("permission is valid");
            Ok(())
        }
        Caip25Subcommand::MutateCaveat { kind, target, caveat } => {
            let result =
                permission::mutate_caveat(kind.into(), &target, utils::read_json(&caveat)?)?;
            utils::print_json(&result)
        }
    }
}
