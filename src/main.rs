use clap::{Arg, ArgAction, ArgMatches, Command};
use leaflet::{
    import_recipe, render_recipe, LeafletConfig, LeafletError, LeafletResult, ListWalker,
    OutputTarget, ScrapedRecipe, WebScraper,
};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

fn file_args() -> [Arg; 2] {
    [
        Arg::new("file")
            .long("file")
            .action(ArgAction::SetTrue)
            .help("Write <title>.cook files instead of printing to stdout."),
        Arg::new("output-dir")
            .long("output-dir")
            .value_name("DIR")
            .help("Directory that .cook files are written to. Implies --file."),
    ]
}

fn cli() -> Command {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    Command::new("leaflet")
        .version(VERSION)
        .propagate_version(true)
        .about("Annotate recipe instructions with Cooklang ingredients and timers.")
        .disable_help_subcommand(true)
        .args_conflicts_with_subcommands(true)
        .arg(Arg::new("url").help("The recipe page to import."))
        .args(file_args())
        .subcommand(
            Command::new("list")
                .about("Import every recipe from a paginated list API")
                .arg(
                    Arg::new("list-url")
                        .required(true)
                        .help("The first page of the list."),
                )
                .args(file_args()),
        )
        .subcommand(
            Command::new("annotate")
                .about("Annotate a recipe already saved as JSON, without network access")
                .arg(
                    Arg::new("json")
                        .required(true)
                        .help("A JSON file holding title, link, total_time, image, instructions and ingredients."),
                )
                .args(file_args()),
        )
}

/// Where documents go for this invocation
fn output_target(matches: &ArgMatches, config: &LeafletConfig) -> OutputTarget {
    match matches.get_one::<String>("output-dir") {
        Some(dir) => OutputTarget::Directory(PathBuf::from(dir)),
        None if matches.get_flag("file") => OutputTarget::Directory(config.output_dir.clone()),
        None => OutputTarget::Stdout,
    }
}

async fn emit(result: &LeafletResult, output: &OutputTarget) -> Result<(), LeafletError> {
    result.report(&mut std::io::stderr())?;
    output.write(&result.document).await?;
    Ok(())
}

async fn run(matches: ArgMatches) -> Result<(), LeafletError> {
    let config = LeafletConfig::load()?;

    match matches.subcommand() {
        Some(("list", submatches)) => {
            let list_url = submatches
                .get_one::<String>("list-url")
                .ok_or(LeafletError::MissingField("list-url"))?;
            let scraper = WebScraper::from_config(&config)?;
            let mut stderr = std::io::stderr();
            let summary = ListWalker::new(
                scraper.fetcher(),
                &scraper,
                output_target(submatches, &config),
            )
            .with_listing(&config.listing)
            .with_diagnostics(&mut stderr)
            .walk(list_url)
            .await?;
            eprintln!(
                "{} pages, {} recipes written, {} skipped",
                summary.pages, summary.written, summary.skipped
            );
        }
        Some(("annotate", submatches)) => {
            let path = submatches
                .get_one::<String>("json")
                .ok_or(LeafletError::MissingField("json"))?;
            let contents = tokio::fs::read_to_string(path).await?;
            let recipe: ScrapedRecipe = serde_json::from_str(&contents)?;
            let result = render_recipe(&recipe)?;
            emit(&result, &output_target(submatches, &config)).await?;
        }
        Some((name, _)) => {
            return Err(LeafletError::BuilderError(format!("Unknown command {name}")));
        }
        None => {
            let Some(url) = matches.get_one::<String>("url") else {
                println!("usage: leaflet <URL> | leaflet [COMMAND] ...");
                println!("Try '--help' for more information.");
                return Ok(());
            };
            let scraper = WebScraper::from_config(&config)?;
            let result = import_recipe(&scraper, url).await?;
            emit(&result, &output_target(&matches, &config)).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run(cli().get_matches()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ LeafletError::UnsupportedSource { .. }) => {
            println!("{e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn test_output_target() {
        let config = LeafletConfig::default();

        let matches = cli().get_matches_from(["leaflet", "https://example.com/r"]);
        assert_eq!(output_target(&matches, &config), OutputTarget::Stdout);

        let matches = cli().get_matches_from(["leaflet", "https://example.com/r", "--file"]);
        assert_eq!(
            output_target(&matches, &config),
            OutputTarget::Directory(PathBuf::from("."))
        );

        let matches = cli().get_matches_from([
            "leaflet",
            "list",
            "https://example.com/l",
            "--output-dir",
            "out",
        ]);
        let (_, submatches) = matches.subcommand().unwrap();
        assert_eq!(
            output_target(submatches, &config),
            OutputTarget::Directory(PathBuf::from("out"))
        );
    }
}
