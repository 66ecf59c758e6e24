use clap::{Arg, ArgAction, ArgMatches, Command, builder::ValueParser};
use std::{ffi::OsString, path::PathBuf, time::Instant};

mod catalog;
mod coerce;
mod error;
mod flatten;
mod lexer;
mod reader;
mod reassembler;
mod schema;
mod store;

use error::NamelistError;
use schema::Registry;

fn main() {
    if let Err(err) = core(get_args()) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}

// Read a namelist file and report what it contains:
//  1) load the parameter registry
//  2) read the input file
//  3) report warnings and a summary of the assigned parameters
fn core(arg_matches: ArgMatches) -> Result<(), NamelistError> {
    let verbose = arg_matches.get_count("VERBOSE");
    let debugprint = arg_matches.get_flag("DEBUGPRINT");

    cond_print(
        verbose > 0,
        &format!("\nginnl {}\n", env!("CARGO_PKG_VERSION")),
    );

    // 1) load the registry
    let now = Instant::now();
    let registry = Registry::builtin()?;
    cond_print(
        verbose > 1,
        &format!(
            "Registry loaded ({:?}): {} parameters in {} groups",
            now.elapsed(),
            registry.parameter_count(),
            registry.group_count()
        ),
    );

    // 2) read the input
    let input_filename = arg_matches
        .get_one::<PathBuf>("INPUT")
        .expect("INPUT is required");
    let now = Instant::now();
    let mut diagnostics = Vec::new();
    let result = if input_filename.as_os_str() == "-" {
        read_stdin().and_then(|text| reader::parse_str(&text, &registry, &mut diagnostics))
    } else {
        reader::read_namelist(input_filename, &registry, &mut diagnostics)
    };
    let elapsed = now.elapsed();
    // warnings are reported even if reading failed later on
    for diagnostic in &diagnostics {
        eprintln!("WARNING: {diagnostic}");
    }
    let document = result?;
    cond_print(
        verbose > 0,
        &format!(
            "Input \"{}\" loaded ({elapsed:?})",
            input_filename.to_string_lossy()
        ),
    );
    if debugprint {
        // not cond_print: the output string would always be formatted, which can take longer than parsing
        println!("================\n{document:#?}\n================\n");
    }

    // 3) summary
    if document.is_empty() {
        cond_print(verbose > 0, "The input contains no parameter assignments");
    }
    for line in document.summary() {
        println!("{line}");
    }
    if verbose > 1 {
        println!();
        for line in document.listing(&registry) {
            println!("{line}");
        }
    }

    cond_print(verbose > 0, "\nRun complete.\n");

    Ok(())
}

fn read_stdin() -> Result<String, NamelistError> {
    std::io::read_to_string(std::io::stdin()).map_err(|source| NamelistError::Io {
        path: PathBuf::from("<stdin>"),
        source,
    })
}

// set up the command line handling
fn get_args() -> ArgMatches {
    // argfile provides the ability to load command line arguments from a file
    // it expands every @<filename> into the content of the file
    let args = argfile::expand_args_from(
        std::env::args_os(),
        argfile::parse_response,
        argfile::PREFIX,
    )
    .unwrap_or_else(|err| {
        eprintln!("ERROR: could not expand the command line arguments: {err}");
        std::process::exit(1);
    });

    get_command().get_matches_from(args)
}

fn get_command() -> Command {
    Command::new("ginnl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reads the parameter namelist of an orbit propagation run and reports the assigned parameters.\n\
        The input file can contain any parameter of the groups FINITE-BURNS, INST-BURNS, INTEG-CONTRL, \
        SMALL-FORCES, SPACECRAFT, ATT-CONTROL, ASTRO-CONS, SOL-PRESSURE and ATMOSPHERE.")
        .arg(
            Arg::new("INPUT")
                .help("Input namelist file, or - to read the namelist from standard input")
                .required(true)
                .value_parser(ValueParser::path_buf())
                .index(1),
        )
        .arg(
            Arg::new("VERBOSE")
                .help("Display additional information. Repeat to list every assigned value")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("DEBUGPRINT")
                .help("Display internal data for debugging")
                .long("debug-print")
                .action(ArgAction::SetTrue),
        )
}

fn cond_print(cond: bool, text: &str) {
    if cond {
        println!("{text}");
    }
}

#[test]
fn verify_command() {
    get_command().debug_assert();
}

#[test]
fn command_line_options() {
    let matches = get_command()
        .try_get_matches_from(["ginnl", "-vv", "--debug-print", "input.nl"])
        .unwrap();
    assert_eq!(matches.get_count("VERBOSE"), 2);
    assert!(matches.get_flag("DEBUGPRINT"));
    assert_eq!(
        matches.get_one::<PathBuf>("INPUT"),
        Some(&PathBuf::from("input.nl"))
    );

    assert!(get_command().try_get_matches_from(["ginnl"]).is_err());
}

#[test]
fn core_reads_fixture() {
    let matches = get_command().get_matches_from(["ginnl", "tests/data/finite_burns.nl"]);
    assert!(core(matches).is_ok());

    let matches = get_command().get_matches_from(["ginnl", "tests/data/does_not_exist.nl"]);
    let err = core(matches).unwrap_err();
    assert_eq!(err.kind(), error::ErrorKind::MissingFile);
}

#[test]
fn argfile_expansion() {
    let dir = tempfile::tempdir().unwrap();
    let argfile_path = dir.path().join("args.txt");
    std::fs::write(&argfile_path, "--verbose\ntests/data/overflow.nl\n").unwrap();
    let args = argfile::expand_args_from(
        [
            OsString::from("ginnl"),
            OsString::from(format!("@{}", argfile_path.to_string_lossy())),
        ]
        .into_iter(),
        argfile::parse_response,
        argfile::PREFIX,
    )
    .unwrap();
    let matches = get_command().get_matches_from(args);
    assert_eq!(matches.get_count("VERBOSE"), 1);
    assert_eq!(
        matches.get_one::<PathBuf>("INPUT"),
        Some(&PathBuf::from("tests/data/overflow.nl"))
    );
}
