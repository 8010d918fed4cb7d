/**
 * Angular Compiler CLI - ngtcb
 *
 * Generates type-check shim files for component templates
 */
use angular_compiler_cli::ngtsc::logging::{ConsoleLogger, LogLevel, Logger};
use angular_compiler_cli::ngtsc::typecheck::{
    TypeCheckInput, TypeCheckingConfig, TypeCheckingContext,
};
use anyhow::Context;
use clap::{Arg, ArgAction, Command};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let matches = Command::new("ngtcb")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Angular template type-check block generator (Rust implementation)")
        .arg(
            Arg::new("input")
                .value_name("FILE")
                .required(true)
                .num_args(1..)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Component description JSON files"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Type-checking configuration JSON"),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Write shim files here instead of printing them"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log generation details"),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };
    let logger = ConsoleLogger::new(level).with_prefix("ngtcb");

    let inputs: Vec<&PathBuf> = matches
        .get_many::<PathBuf>("input")
        .map(|values| values.collect())
        .unwrap_or_default();
    let config = matches.get_one::<PathBuf>("config").map(PathBuf::as_path);
    let out_dir = matches.get_one::<PathBuf>("out-dir").map(PathBuf::as_path);

    if let Err(err) = run(&inputs, config, out_dir, &logger) {
        logger.error(&format!("{:#}", err));
        process::exit(1);
    }
}

fn run(
    inputs: &[&PathBuf],
    config: Option<&Path>,
    out_dir: Option<&Path>,
    logger: &dyn Logger,
) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => TypeCheckingConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TypeCheckingConfig::default(),
    };

    let mut ctx = TypeCheckingContext::new(config);
    for path in inputs {
        let input = TypeCheckInput::load(path)?;
        let shim = input.shim.clone().unwrap_or_default();
        let (component, bound) = input.bind();
        let name = ctx.add_template(shim.clone(), component, bound);
        logger.info(&format!("{} -> {} in {}", path.display(), name, shim));
    }

    let files = ctx.finalize(logger)?;
    match out_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            for (shim, source) in &files {
                let target = dir.join(shim);
                fs::write(&target, source)
                    .with_context(|| format!("failed to write {}", target.display()))?;
            }
        }
        None => {
            for (i, (shim, source)) in files.iter().enumerate() {
                if files.len() > 1 {
                    if i > 0 {
                        println!();
                    }
                    println!("// {}", shim);
                }
                print!("{}", source);
            }
        }
    }
    Ok(())
}
