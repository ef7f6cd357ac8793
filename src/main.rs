use std::path::Path;

use anyhow::{anyhow, Context};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use scansion::poet::server::{self, ServerState};
use scansion::poet::snippet::{normalize_token, read_and_trim_whitespace};
use scansion::{analyze, Error, PoetryFormCatalogue, PronouncingDictionary};

const DEFAULT_DICTIONARY: &str = "dictionary.txt";
const DEFAULT_FORMS: &str = "poetry_forms.txt";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn app() -> App<'static, 'static> {
    App::new("scansion")
        .about("Counts syllables and finds rhyme schemes in poems.")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("dictionary")
                .long("dictionary")
                .value_name("FILE")
                .env("SCANSION_DICTIONARY")
                .default_value(DEFAULT_DICTIONARY)
                .help("Pronouncing dictionary, in CMU dictionary format"),
        )
        .arg(
            Arg::with_name("forms")
                .long("forms")
                .value_name("FILE")
                .env("SCANSION_FORMS")
                .default_value(DEFAULT_FORMS)
                .help("Poetry forms file"),
        )
        .subcommand(
            SubCommand::with_name("analyze")
                .about("Analyzes a poem file and prints the results")
                .arg(Arg::with_name("POEM").required(true).help("The poem to analyze"))
                .arg(
                    Arg::with_name("form")
                        .long("form")
                        .value_name("NAME")
                        .help("Shows this poetry form's pattern next to the poem"),
                ),
        )
        .subcommand(
            SubCommand::with_name("lookup")
                .about("Prints the pronunciation of a word")
                .arg(Arg::with_name("WORD").required(true)),
        )
        .subcommand(SubCommand::with_name("forms").about("Lists the known poetry forms"))
        .subcommand(SubCommand::with_name("serve").about("Runs the web server"))
}

fn load_dictionary(matches: &ArgMatches) -> anyhow::Result<PronouncingDictionary> {
    // The default value guarantees presence.
    let path = matches.value_of("dictionary").unwrap_or(DEFAULT_DICTIONARY);
    let dict = PronouncingDictionary::from_file(path)
        .with_context(|| format!("loading pronouncing dictionary {}", path))?;
    info!("read {} words from {}", dict.len(), path);
    Ok(dict)
}

fn load_forms(matches: &ArgMatches) -> anyhow::Result<PoetryFormCatalogue> {
    let path = matches.value_of("forms").unwrap_or(DEFAULT_FORMS);
    let forms = PoetryFormCatalogue::from_file(path)
        .with_context(|| format!("loading poetry forms {}", path))?;
    info!("read {} poetry forms from {}", forms.len(), path);
    Ok(forms)
}

/// Analyzes the poem file at `path`, printing the results to the terminal.
fn analyze_one_file_to_terminal(
    path: &Path,
    form_name: Option<&str>,
    dict: &PronouncingDictionary,
    forms: &PoetryFormCatalogue,
) -> anyhow::Result<()> {
    let form = match form_name {
        Some(name) => Some(
            forms
                .get(name)
                .ok_or_else(|| anyhow!("unknown poetry form: {}", name))?,
        ),
        None => None,
    };

    let raw_input = std::fs::read_to_string(path)
        .with_context(|| format!("reading poem {}", path.display()))?;
    let poem = read_and_trim_whitespace(&raw_input);
    if poem.is_empty() {
        println!("Read {} bytes from {}, but didn't find a poem.", raw_input.len(), path.display());
        return Ok(());
    }

    match analyze(&poem, dict) {
        Ok(analysis) => {
            println!("{}", poem);
            println!();
            print!("{}", analysis.summarize_to_text(form));
            Ok(())
        }
        Err(Error::UnknownWord(word)) => Err(anyhow!(
            "{} is not in the pronouncing dictionary; fix its spelling or add it to the dictionary",
            word
        )),
        Err(e) => Err(e.into()),
    }
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let matches = app().get_matches();

    match matches.subcommand() {
        ("analyze", Some(sub)) => {
            let dict = load_dictionary(&matches)?;
            let forms = load_forms(&matches)?;
            // POEM is required, so clap has already rejected its absence.
            let poem = sub.value_of("POEM").unwrap_or_default();
            analyze_one_file_to_terminal(Path::new(poem), sub.value_of("form"), &dict, &forms)?;
        }
        ("lookup", Some(sub)) => {
            let dict = load_dictionary(&matches)?;
            let word = normalize_token(sub.value_of("WORD").unwrap_or_default());
            match dict.lookup(&word) {
                Some(entry) => println!("{} ({} syllables)", entry, entry.syllables()),
                None => println!("{}: not in the dictionary.", word),
            }
        }
        ("forms", Some(_)) => {
            let forms = load_forms(&matches)?;
            for (name, form) in forms.iter() {
                let pattern: Vec<String> = form
                    .syllables()
                    .iter()
                    .zip(form.rhyme_tags())
                    .map(|(syllables, tag)| format!("{}{}", syllables, tag))
                    .collect();
                println!("{}: {}", name, pattern.join(" "));
            }
        }
        ("serve", Some(_)) => {
            let state = ServerState {
                dict: load_dictionary(&matches)?,
                forms: load_forms(&matches)?,
            };
            server::run(state)
                .await
                .map_err(|e| anyhow!("failed to launch web server: {}", e))?;
        }
        _ => unreachable!("clap requires a subcommand"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_analyze() {
        let matches = app()
            .get_matches_from_safe(vec![
                "scansion",
                "--dictionary",
                "cmudict.txt",
                "analyze",
                "poem.txt",
                "--form",
                "Haiku",
            ])
            .unwrap();
        assert_eq!(matches.value_of("dictionary"), Some("cmudict.txt"));
        assert_eq!(matches.value_of("forms"), Some(DEFAULT_FORMS));
        let (name, sub) = matches.subcommand();
        assert_eq!(name, "analyze");
        let sub = sub.unwrap();
        assert_eq!(sub.value_of("POEM"), Some("poem.txt"));
        assert_eq!(sub.value_of("form"), Some("Haiku"));
    }

    #[test]
    fn test_cli_requires_a_subcommand() {
        assert!(app().get_matches_from_safe(vec!["scansion"]).is_err());
    }

    #[test]
    fn test_cli_requires_a_word_to_look_up() {
        assert!(app().get_matches_from_safe(vec!["scansion", "lookup"]).is_err());
    }
} // mod tests
