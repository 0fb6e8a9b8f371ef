use clap::{arg, command, ArgAction, ArgMatches, Command};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{expand_sources, BuildConfig, DEFAULT_COMPILER_JAR, DEFAULT_JAVA, PACKAGE_FILE};
use crate::error::{Error, Result};
use crate::pipeline;

const ERR: &str = "\u{1b}[31m";
const CLR: &str = "\u{1b}[0m";

pub fn command() -> Command {
    command!()
        .about("Concatenate JavaScript sources, strip labelled blocks and minify with Closure Compiler")
        .arg(arg!([LABELS] ... "Labels to strip, written as @label"))
        .arg(arg!(--label <LABEL> ... "Label to strip, with or without a leading @"))
        .arg(arg!(--source <FILE> ... "Source file or glob pattern, concatenated in order"))
        .arg(arg!(--output <FILE> "Output file"))
        .arg(arg!(--header <FILE> "Prepend the contents of FILE"))
        .arg(arg!(--footer <FILE> "Append the contents of FILE"))
        .arg(arg!(--nowrap "Do not wrap the output in the WebModule idiom").action(ArgAction::SetTrue))
        .arg(arg!(--nocompile "Only concatenate and strip, skip Closure Compiler").action(ArgAction::SetTrue))
        .arg(arg!(--es5in "Input is ES5 code").action(ArgAction::SetTrue))
        .arg(arg!(--es6in "Input is ES6 code").action(ArgAction::SetTrue))
        .arg(arg!(--es5out "Output ES5 code").action(ArgAction::SetTrue))
        .arg(arg!(--es6out "Output ES6 code").action(ArgAction::SetTrue))
        .arg(arg!(--strict "Use the strict language modes").action(ArgAction::SetTrue))
        .arg(arg!(--pretty "Pretty print the compiled output").action(ArgAction::SetTrue))
        .arg(arg!(--simple "SIMPLE_OPTIMIZATIONS instead of ADVANCED_OPTIMIZATIONS").action(ArgAction::SetTrue))
        .arg(arg!(--keep "Keep the temporary stripped file").action(ArgAction::SetTrue))
        .arg(
            arg!(--option <OPTION> ... "Extra compiler option, e.g. \"jscomp_off checkVars\"")
                .allow_hyphen_values(true),
        )
        .arg(arg!(--package "Read webmodule.source and webmodule.output from package.json").action(ArgAction::SetTrue))
        .arg(arg!(-v --verbose "Log progress and the compile options").action(ArgAction::SetTrue))
        .arg(
            arg!(--java <BIN> "Java launcher used to run the compiler")
                .env("CLOSURE_MINIFY_JAVA")
                .default_value(DEFAULT_JAVA),
        )
        .arg(
            arg!(--"compiler-jar" <JAR> "Closure Compiler jar")
                .env("CLOSURE_COMPILER_JAR")
                .default_value(DEFAULT_COMPILER_JAR),
        )
}

pub fn run() -> Result<()> {
    let matches = command().get_matches();
    init_logging(matches.get_flag("verbose"));

    let config = config_from_matches(&matches)?;
    config.validate()?;

    let js = pipeline::build(&config)?;
    let output = config.output.as_deref().ok_or(Error::NoOutput)?;
    fs::write(output, js).map_err(|source| Error::Write {
        path: output.to_path_buf(),
        source,
    })?;
    info!("Wrote {}", output.display());

    Ok(())
}

/// Builds the configuration for one run. `--package` is applied last, so the
/// manifest wins over `--source` and `--output`.
pub fn config_from_matches(matches: &ArgMatches) -> Result<BuildConfig> {
    let mut config = BuildConfig::default();

    // @label arguments and --label options, in command line order
    let mut labels: Vec<(usize, &String)> = Vec::new();
    for id in ["LABELS", "label"] {
        if let (Some(indices), Some(values)) = (matches.indices_of(id), matches.get_many::<String>(id)) {
            labels.extend(indices.zip(values));
        }
    }
    labels.sort_by_key(|(index, _)| *index);
    for (_, label) in &labels {
        config.labels.insert(label);
    }
    if let Some(bare) = matches
        .get_many::<String>("LABELS")
        .unwrap_or_default()
        .find(|arg| !arg.starts_with('@'))
    {
        return Err(Error::UnknownArgument(bare.clone()));
    }

    let sources: Vec<&String> = matches.get_many::<String>("source").unwrap_or_default().collect();
    config.sources = expand_sources(&sources)?;
    config.output = matches.get_one::<String>("output").map(PathBuf::from);

    if let Some(path) = matches.get_one::<String>("header") {
        config.header = read_text(Path::new(path))?;
    }
    if let Some(path) = matches.get_one::<String>("footer") {
        config.footer = read_text(Path::new(path))?;
    }

    config.wrap = !matches.get_flag("nowrap");
    config.compile = !matches.get_flag("nocompile");
    config.es5in = matches.get_flag("es5in");
    config.es6in = matches.get_flag("es6in");
    config.es5out = matches.get_flag("es5out");
    config.es6out = matches.get_flag("es6out");
    config.strict = matches.get_flag("strict");
    config.pretty = matches.get_flag("pretty");
    config.advanced = !matches.get_flag("simple");
    config.keep = matches.get_flag("keep");
    config.verbose = matches.get_flag("verbose");
    config.options = matches
        .get_many::<String>("option")
        .unwrap_or_default()
        .cloned()
        .collect();

    if let Some(java) = matches.get_one::<String>("java") {
        config.java = java.clone();
    }
    if let Some(jar) = matches.get_one::<String>("compiler-jar") {
        config.compiler_jar = PathBuf::from(jar);
    }

    if matches.get_flag("package") {
        config.apply_package(Path::new(PACKAGE_FILE))?;
    }

    Ok(config)
}

/// Prints `err` to stderr, in red when stderr is a terminal.
pub fn report_error(err: &Error) {
    if atty::is(atty::Stream::Stderr) {
        eprintln!("{}Error: {}{}", ERR, err, CLR);
    } else {
        eprintln!("Error: {}", err);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}
