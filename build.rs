// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn registry_arg() -> Arg {
    Arg::new("registry")
        .short('r')
        .long("registry")
        .value_name("DIR")
        .env("REGVER_REGISTRY")
        .default_value("/var/lib/regver/registry")
        .help("Registry root directory")
}

fn build_cli() -> Command {
    Command::new("regver")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Regver Contributors")
        .about("Resolve installed package versions from a registry")
        .subcommand_required(false)
        .subcommand(
            Command::new("resolve")
                .about("Print the highest installed version matching a specifier")
                .arg(Arg::new("name").required(true).help("Package name"))
                .arg(Arg::new("arch").required(true).help("Package architecture"))
                .arg(
                    Arg::new("spec")
                        .default_value("*")
                        .help("Version specifier, e.g. \">=2.0.0,!=4.0.0\""),
                )
                .arg(registry_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print a JSON report including every matching version"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List installed versions matching a specifier, lowest first")
                .arg(Arg::new("name").required(true).help("Package name"))
                .arg(Arg::new("arch").required(true).help("Package architecture"))
                .arg(Arg::new("spec").default_value("*").help("Version specifier"))
                .arg(registry_arg()),
        )
        .subcommand(
            Command::new("attribute")
                .about("Extract the highest value of a `Label: value` attribute from a file")
                .arg(Arg::new("file").required(true).help("File containing `Label: value` lines"))
                .arg(Arg::new("label").required(true).help("Attribute label, e.g. Version"))
                .arg(
                    Arg::new("optional")
                        .long("optional")
                        .action(ArgAction::SetTrue)
                        .help("Print an empty line instead of failing when the attribute is missing"),
                ),
        )
        .subcommand(
            Command::new("compare")
                .about("Compare two versions and print <, = or >")
                .arg(Arg::new("left").required(true))
                .arg(Arg::new("right").required(true)),
        )
        .subcommand(
            Command::new("satisfies")
                .about("Exit successfully if a version satisfies a specifier")
                .arg(Arg::new("version").required(true))
                .arg(Arg::new("spec").required(true)),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory
    let out_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("Failed to create man directory");

    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();
    man.render(&mut buffer).expect("Failed to render man page");

    let man_path = man_dir.join("regver.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");
}
