use clap::{Arg, ArgAction, Command, value_parser};
use mem_translate::mt::{GoogleTranslateProvider, MachineTranslator, MockMode, MockTranslator, Throttle};
use mem_translate::{Config, Rewriter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("mem-translate")
        .version("0.1.0")
        .about("Fill in TRANSLATE fields of dictionary entry files with machine translations")
        .arg(
            Arg::new("files")
                .help("Entry files to rewrite in place (default: the configured file list)")
                .value_parser(value_parser!(PathBuf))
                .num_args(0..),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file (default: ./mem-translate.toml if present)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("source-locale")
                .long("source")
                .short('s')
                .help("Source language code (default: en)"),
        )
        .arg(
            Arg::new("delay-ms")
                .long("delay-ms")
                .help("Pause after every provider call, in milliseconds")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use mock translator instead of Google Translate")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .short('n')
                .help("Process files without writing them back")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every translation")
                .action(ArgAction::SetTrue),
        )
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match run(&matches).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(matches: &clap::ArgMatches) -> mem_translate::Result<ExitCode> {
    let mut config = Config::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    if let Some(source) = matches.get_one::<String>("source-locale") {
        config.source_language = source.clone();
    }
    if let Some(delay) = matches.get_one::<u64>("delay-ms") {
        config.request_delay_ms = *delay;
    }
    config.validate()?;

    let files: Vec<PathBuf> = match matches.get_many::<PathBuf>("files") {
        Some(files) => files.cloned().collect(),
        None => config.files.clone(),
    };

    let translator: Box<dyn MachineTranslator> = if matches.get_flag("mock") {
        Box::new(MockTranslator::new(MockMode::Suffix))
    } else {
        Box::new(GoogleTranslateProvider::from_env()?)
    };
    info!(
        "Translating {} file(s) from '{}' with {}",
        files.len(),
        config.source_language,
        translator.provider_name()
    );

    let mut rewriter = Rewriter::new(translator, config.language_map())
        .with_throttle(Throttle::from_millis(config.request_delay_ms))
        .with_source_language(&config.source_language)
        .with_dry_run(matches.get_flag("dry-run"));
    let summary = rewriter.rewrite_files(&files).await;

    info!(
        "{} file(s) rewritten: {} translated, {} verbatim, {} left for a later run",
        summary.files, summary.translated, summary.verbatim, summary.retried
    );
    if let Some(e) = &summary.provider_failure {
        error!("Provider failed, remaining directives were left in place: {}", e);
    }
    for path in &summary.failed_files {
        error!("Not processed: {}", path.display());
    }

    if summary.errors > 0 {
        println!("*** Number of errors: {} ***", summary.errors);
    }
    println!("Don't forget to do any postprocessing.");

    Ok(if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
    }

    #[test]
    fn test_cli_parses_files_and_flags() {
        let matches = cli()
            .try_get_matches_from(["mem-translate", "--mock", "-n", "--delay-ms", "0", "a.xml", "b.xml"])
            .unwrap();
        assert!(matches.get_flag("mock"));
        assert!(matches.get_flag("dry-run"));
        assert_eq!(matches.get_one::<u64>("delay-ms"), Some(&0));
        let files: Vec<&PathBuf> = matches.get_many::<PathBuf>("files").unwrap().collect();
        assert_eq!(files, vec![&PathBuf::from("a.xml"), &PathBuf::from("b.xml")]);
    }
}
