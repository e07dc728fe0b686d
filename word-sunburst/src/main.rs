use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use dictionary::{
    frequencies, Dictionary, DictionaryError, Relation, ResultOptions, WordCache, WordData,
};
use sunburst::{to_datum, ChartError, ClickOutcome, SvgRenderer, WordChart};
use tracing_subscriber::EnvFilter;

use config::Config;
use utilities::{closest_command, input, str_to_bool};

mod config;
mod utilities;

const COMMANDS: &[&str] = &[
    "show", "define", "click", "focus", "back", "rotate", "wheel", "relations", "save", "words",
    "help", "exit", "quit",
];

struct Session {
    cache: WordCache<Dictionary>,
    chart: WordChart,
    renderer: SvgRenderer,
    options: ResultOptions,
    output: PathBuf,
    word: Option<Arc<WordData>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("word_sunburst=info".parse()?))
        .init();

    let config = Config::parse();
    let dictionary = Dictionary::new(&config.server)?;
    tracing::info!(server = %dictionary.base_url(), relations = %config.relations, "starting");
    let mut session = Session {
        cache: WordCache::new(dictionary),
        chart: WordChart::new(config.chart_config()),
        renderer: SvgRenderer::default(),
        options: config.relations,
        output: config.output.clone(),
        word: None,
    };
    if let Some(word) = &config.word {
        show_word(&mut session, word).await?;
    }

    loop {
        let Some(line) = input(">> ")? else {
            println!();
            break;
        };
        let line = line.trim();
        let mut command_parts = line.split_ascii_whitespace();
        let Some(command) = command_parts.next() else {
            continue;
        };
        let rest = command_parts.collect::<Vec<&str>>();
        match command {
            "exit" | "leave" | "quit" | "e" | "q" | "l" => {
                break;
            }
            "show" | "define" | "find" => {
                show_word(&mut session, &rest.join(" ")).await?;
            }
            "click" => match parse_numbers::<2>(&rest) {
                Some([x, y]) => {
                    let outcome = session.chart.click(x, y);
                    report_click(&session, outcome);
                }
                _ => println!("Usage: click <x> <y>"),
            },
            "focus" => match session.chart.focus_on_label(&rest.join(" ")) {
                Some(name) => {
                    println!("Centred on {name:?}.");
                    redraw(&session);
                }
                None => println!("No visible label matches that."),
            },
            "back" => {
                if session.chart.zoom_out() {
                    redraw(&session);
                } else {
                    println!("Already showing the whole word.");
                }
            }
            "rotate" => match parse_numbers::<1>(&rest) {
                Some([degrees]) => {
                    session.chart.rotate_degrees(degrees);
                    println!("Rotation is now {:.1}°.", session.chart.rotation_degrees());
                    redraw(&session);
                }
                _ => println!("Usage: rotate <degrees>"),
            },
            "wheel" => match parse_numbers::<1>(&rest) {
                Some([delta]) => {
                    session.chart.wheel(delta);
                    redraw(&session);
                }
                _ => println!("Usage: wheel <delta>"),
            },
            "relations" => {
                set_relations(&mut session, &rest).await?;
            }
            "save" => save_chart(&mut session, rest.first().copied()),
            "words" => print_related_words(&session),
            "help" | "h" | "?" => print_help(),
            _ => match closest_command(command, COMMANDS) {
                Some(suggestion) => {
                    println!("Unknown command {command}. Did you mean {suggestion}?")
                }
                None => println!("Unknown command {command}."),
            },
        }
    }
    Ok(())
}

fn parse_numbers<const N: usize>(parts: &[&str]) -> Option<[f64; N]> {
    if parts.len() != N {
        return None;
    }
    let mut numbers = [0.0; N];
    for (number, part) in numbers.iter_mut().zip(parts) {
        *number = part.parse().ok()?;
    }
    Some(numbers)
}

async fn show_word(session: &mut Session, word: &str) -> anyhow::Result<()> {
    if word.is_empty() {
        println!("Usage: show <word>");
        return Ok(());
    }
    match session.cache.get_words(word, &session.options).await {
        Ok((data, related)) => {
            let frequencies = frequencies(related).await;
            let datum = to_datum(&data, &frequencies, &session.options);
            if datum.is_leaf() {
                println!(
                    "'{}' has no {} to draw, try `relations all`.",
                    data.word, session.options
                );
            }
            print_definition(&data);
            session.chart.set_datum(datum);
            session.word = Some(data);
            redraw(session);
        }
        Err(error) => match &*error {
            DictionaryError::NotFound(_) => {
                println!("Couldn't find the word you were looking for.")
            }
            other => {
                println!("Encountered an error while looking up the word: {other}");
            }
        },
    }
    Ok(())
}

async fn set_relations(session: &mut Session, rest: &[&str]) -> anyhow::Result<()> {
    let options = match rest {
        [] => {
            println!("Relations: {}", session.options);
            return Ok(());
        }
        [relation, toggle] if str_to_bool(toggle.to_string()).is_some() => {
            let Ok(relation) = relation.parse::<Relation>() else {
                println!("Usage: relations <relation> on|off");
                return Ok(());
            };
            if str_to_bool(toggle.to_string()) == Some(true) {
                session.options.with(relation)
            } else {
                session.options.without(relation)
            }
        }
        list => match list.join(",").parse::<ResultOptions>() {
            Ok(options) => options,
            Err(error) => {
                println!("{error}");
                return Ok(());
            }
        },
    };
    session.options = options;
    println!("Relations: {}", session.options);
    if let Some(word) = session.word.as_ref().map(|data| data.word.clone()) {
        show_word(session, &word).await?;
    }
    Ok(())
}

fn report_click(session: &Session, outcome: ClickOutcome) {
    match outcome {
        ClickOutcome::Focused(name) => {
            println!("Centred on {name:?}.");
            redraw(session);
        }
        ClickOutcome::ZoomedOut => {
            redraw(session);
        }
        ClickOutcome::Leaf(name) => {
            println!("{name:?} is a related word, `show` it to draw its own chart.");
        }
        ClickOutcome::Missed => println!("Nothing there."),
    }
}

fn write_chart(session: &Session, path: &Path) -> Result<(), ChartError> {
    let layout = session.chart.layout()?;
    session.renderer.save(&layout, path)
}

/// Writes the chart to the current output path and reports how it went.
fn redraw(session: &Session) -> bool {
    if session.chart.datum().is_none() {
        println!("Nothing to draw yet, `show` a word first.");
        return false;
    }
    match write_chart(session, &session.output) {
        Ok(()) => {
            println!("Saved the chart to {}.", session.output.display());
            true
        }
        Err(error) => {
            tracing::warn!(path = %session.output.display(), %error, "could not save the chart");
            println!("Couldn't save the chart to {}: {error}", session.output.display());
            false
        }
    }
}

/// `save [path]`. The new path only becomes the output once the chart was written there.
fn save_chart(session: &mut Session, path: Option<&str>) {
    let Some(path) = path.map(PathBuf::from) else {
        redraw(session);
        return;
    };
    let previous = std::mem::replace(&mut session.output, path);
    if !redraw(session) {
        session.output = previous;
    }
}

fn print_related_words(session: &Session) {
    match &session.word {
        Some(data) => {
            let words = data.related_words(&session.options);
            if words.is_empty() {
                println!("No related words for '{}'.", data.word);
            } else {
                println!("{}", words.join(", "));
            }
        }
        None => println!("Nothing to list yet, `show` a word first."),
    }
}

fn print_definition(word: &WordData) {
    println!("Showing definition for '{}':", word.word);
    for result in &word.results {
        match &result.part_of_speech {
            Some(part_of_speech) => println!("    {part_of_speech}: {}", result.definition),
            None => println!("    {}", result.definition),
        }
        for relation in Relation::ALL {
            if let Some(words) = result.relation(relation).filter(|words| !words.is_empty()) {
                println!("          {relation}: {}", words.join(", "));
            }
        }
    }
}

fn print_help() {
    println!("show <word>            look a word up and draw it");
    println!("click <x> <y>          click the chart at a pixel position");
    println!("focus <label>          centre on the visible slice with that label");
    println!("back                   move the centre one level up");
    println!("rotate <degrees>       turn the chart");
    println!("wheel <delta>          turn the chart like a mouse wheel would");
    println!("relations [list]       show or choose the relations feeding the chart");
    println!("relations <name> on|off");
    println!("save [path]            write the chart, optionally somewhere else");
    println!("words                  list every related word of the current word");
    println!("exit                   leave");
}
