use clap::{
    crate_description, crate_name, crate_version, value_parser, Arg, ArgAction, ArgMatches,
    Command,
};
use colored::Colorize;
use miette::IntoDiagnostic;
use projgen::{GenerationOutcome, ProjectGeneratorError, Settings, TemplateError};
use std::{io::Write, path::PathBuf};

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .help("TOML file with tool settings (max-depth, template-file-name)")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(
            Command::new("template")
                .about("Generates the base template for a generic project")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Path of the generated template (a directory or a .yml/.yaml file)")
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Generates project structure based on given configuration file")
                .arg(
                    Arg::new("configuration")
                        .help("YAML configuration describing the project structure")
                        .value_parser(value_parser!(PathBuf))
                        .required(true),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Destination to generate project structure")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("max-depth")
                        .long("max-depth")
                        .help("Deepest structure level to create; deeper entries are ignored")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Overwrite an existing project root without asking")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    let is_verbose = matches.get_flag("verbose");

    env_logger::Builder::new()
        .filter_level(if is_verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let settings = match matches.get_one::<PathBuf>("settings") {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    match matches.subcommand() {
        Some(("template", args)) => handle_template(args, &settings),
        Some(("generate", args)) => handle_generate(args, settings),
        _ => unreachable!(),
    }
}

fn handle_template(args: &ArgMatches, settings: &Settings) -> miette::Result<()> {
    let output = args.get_one::<PathBuf>("output");

    print!("Generating template...");
    std::io::stdout().flush().into_diagnostic()?;

    match projgen::write_template(output.map(PathBuf::as_path), settings) {
        Ok(path) => {
            println!(" {}", "Done".green());
            log::debug!("template written to {}", path.display());
            Ok(())
        }
        Err(error) => {
            let reason = if matches!(
                error,
                ProjectGeneratorError::Template(TemplateError::UnsupportedFileType { .. })
            ) {
                "Failed! (YAML format is only supported)"
            } else {
                "Failed!"
            };
            println!(" {}", reason.red());
            Err(error.into())
        }
    }
}

fn handle_generate(args: &ArgMatches, settings: Settings) -> miette::Result<()> {
    let configuration = args
        .get_one::<PathBuf>("configuration")
        .expect("configuration required");
    let output = args.get_one::<PathBuf>("output");
    let assume_yes = args.get_flag("yes");

    let settings = settings.with_max_depth(args.get_one::<usize>("max-depth").copied())?;

    match projgen::generate_project(
        configuration,
        output.map(PathBuf::as_path),
        assume_yes,
        &settings,
    )? {
        GenerationOutcome::Generated(root) => {
            println!(
                "{} {}",
                "Project structure generated successfully!".green(),
                root.display()
            );
        }
        GenerationOutcome::Declined(_) => {
            println!("Can't complete project structure generation. Exiting program...");
        }
    }

    Ok(())
}
