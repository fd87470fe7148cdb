// Copyright (C) 2023 gigablaster

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

mod commands;
mod config;

use std::{io, path::PathBuf, process::ExitCode, sync::Arc};

use clap::{value_parser, Arg, ArgAction, ArgMatches};
use config::ProbeConfig;
use dess_bsa::{MappedStore, BSA_ARCHIVE_TYPE};
use dess_vfs::{ArchiveRegistry, ResourceGroup};
use log::{info, warn};

fn command() -> clap::Command {
    let name = || {
        Arg::new("name")
            .help("Resource name inside the archives")
            .required(true)
    };
    clap::Command::new("probe")
        .version("0.1.0")
        .author("gigablaster")
        .about("Query resources from BSA archives")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Config file")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .short('r')
                .help("Additional data directory")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Append),
        )
        .subcommand_required(true)
        .subcommand(
            clap::Command::new("exists")
                .about("Check if resource exists")
                .arg(name()),
        )
        .subcommand(
            clap::Command::new("cat")
                .about("Write resource to stdout")
                .arg(name()),
        )
        .subcommand(
            clap::Command::new("find")
                .about("Find resource info by name")
                .arg(name()),
        )
        .subcommand(
            clap::Command::new("info")
                .about("Show resource details")
                .arg(name()),
        )
}

fn mount(config: &ProbeConfig) -> anyhow::Result<(ArchiveRegistry, ResourceGroup)> {
    let mut store = MappedStore::default();
    for root in &config.data_roots {
        if root.is_dir() {
            store.mount(root)?;
        } else {
            warn!("Data directory {:?} doesn't exist", root);
        }
    }
    info!("{} resources available", store.len());

    let mut registry = ArchiveRegistry::default();
    dess_bsa::register(&mut registry, Arc::new(store))?;
    let group = ResourceGroup::default();
    group.add_location(registry.load(&config.archive_name, BSA_ARCHIVE_TYPE)?);

    Ok((registry, group))
}

fn run(args: &ArgMatches) -> anyhow::Result<bool> {
    let mut config = ProbeConfig::load(args.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    if let Some(roots) = args.get_many::<PathBuf>("root") {
        config.data_roots.extend(roots.cloned());
    }
    simple_logger::init_with_level(config.level()?)?;

    let (_registry, group) = mount(&config)?;
    let mut out = io::stdout().lock();
    match args.subcommand() {
        Some(("exists", sub)) => commands::exists(&group, name_arg(sub), &mut out),
        Some(("cat", sub)) => commands::cat(&group, name_arg(sub), &mut out).map(|_| true),
        Some(("find", sub)) => commands::find(&group, name_arg(sub), &mut out).map(|n| n > 0),
        Some(("info", sub)) => commands::info(&group, name_arg(sub), &mut out).map(|_| true),
        _ => unreachable!("subcommand is required"),
    }
}

fn name_arg(args: &ArgMatches) -> &str {
    args.get_one::<String>("name")
        .map(String::as_str)
        .unwrap_or_default()
}

fn main() -> ExitCode {
    let args = command().get_matches();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{:?}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod test {
    use std::{fs, path::PathBuf};

    use crate::config::ProbeConfig;

    use super::{command, mount, name_arg};

    #[test]
    fn verify_command() {
        command().debug_assert();
    }

    #[test]
    fn parse_args() {
        let args = command()
            .try_get_matches_from(["probe", "-r", "a", "--root", "b", "cat", "meshes\\x.nif"])
            .unwrap();
        let roots = args
            .get_many::<PathBuf>("root")
            .unwrap()
            .cloned()
            .collect::<Vec<_>>();
        assert_eq!(vec![PathBuf::from("a"), PathBuf::from("b")], roots);
        let (name, sub) = args.subcommand().unwrap();
        assert_eq!("cat", name);
        assert_eq!("meshes\\x.nif", name_arg(sub));

        assert!(command().try_get_matches_from(["probe"]).is_err());
        assert!(command().try_get_matches_from(["probe", "exists"]).is_err());
    }

    #[test]
    fn mount_roots() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("textures")).unwrap();
        fs::write(root.path().join("textures").join("tx_sky.dds"), b"DDS |").unwrap();
        let config = ProbeConfig {
            data_roots: vec![root.path().to_path_buf(), root.path().join("missing")],
            archive_name: "Morrowind.bsa".into(),
            ..Default::default()
        };

        let (registry, group) = mount(&config).unwrap();
        assert!(registry.get("Morrowind.bsa").is_some());
        assert!(group.exists("Textures\\TX_Sky.dds"));
        assert_eq!(5, group.open("textures/tx_sky.dds").unwrap().size());
    }
}
