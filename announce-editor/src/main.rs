#[macro_use]
extern crate tracing as log;

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use announce_editor::{config::Config, EditorState, Error};
use sdk::{Attachment, Body};

#[derive(Debug, Parser)]
#[command(version, about = "Compose, check and render scheduled announcement messages")]
struct Cli {
    /// Path to the TOML configuration
    #[arg(long, env = "ANNOUNCE_CONFIG_PATH", default_value = "./config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the JSON of a fresh message
    New,

    /// Validate message JSON files, listing every problem found
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Render message JSON files into the request bodies that would be sent
    Render {
        /// Pretty-print JSON bodies instead of the compact wire form
        #[arg(long)]
        pretty: bool,

        /// Attach a file to the last message
        #[arg(long = "attach", short = 'a')]
        attachments: Vec<PathBuf>,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = dotenv::dotenv() {
        debug!(?error, "Couldn't read .env file. Continuing execution anyway");
    }

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Unable to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut state = EditorState::new(config);

    let res = match cli.command {
        Command::New => state.export(0).map(|json| println!("{json}")),
        Command::Check { files } => check(&mut state, &files),
        Command::Render {
            pretty,
            attachments,
            files,
        } => render(&mut state, &files, &attachments, pretty),
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            for detail in e.details() {
                error!("{detail}");
            }

            ExitCode::FAILURE
        }
    }
}

/// Imports each file as its own message, the first replacing the initial empty one
fn load(state: &mut EditorState, files: &[PathBuf]) -> Result<(), Error> {
    for (idx, path) in files.iter().enumerate() {
        let text = std::fs::read_to_string(path)?;
        let index = if idx == 0 { 0 } else { state.push_message() };

        if let Err(e) = state.import(index, &text) {
            error!(path = %path.display(), "Invalid message file");
            return Err(e);
        }
    }

    Ok(())
}

fn check(state: &mut EditorState, files: &[PathBuf]) -> Result<(), Error> {
    load(state, files)?;

    let errors = state.validate();
    if !errors.is_empty() {
        return Err(Error::Invalid(errors));
    }

    info!(messages = state.document().len(), "All messages are valid");

    Ok(())
}

fn render(state: &mut EditorState, files: &[PathBuf], attachments: &[PathBuf], pretty: bool) -> Result<(), Error> {
    load(state, files)?;

    let last = state.document().len() - 1;

    for path in attachments {
        let data = std::fs::read(path)?;
        let filename = path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
        let mime = mime_guess::from_path(path).first_or_octet_stream();

        let file = Attachment::new(&*filename, data).with_content_type(mime.essence_str());
        state.mutate(last, |message| message.files.push(file))?;
    }

    for index in 0..state.document().len() {
        match state.save(index)? {
            Body::Json(json) => match pretty {
                true => println!("{}", state.message(index)?.to_json(true)),
                false => println!("{json}"),
            },
            Body::Multipart(form) => {
                for part in form.parts {
                    match part.filename {
                        None => println!("--- {}\n{}", part.name, String::from_utf8_lossy(&part.data)),
                        Some(filename) => println!(
                            "--- {} ({filename}, {}, {} bytes)",
                            part.name,
                            part.content_type.as_deref().unwrap_or("application/octet-stream"),
                            part.data.len()
                        ),
                    }
                }
            }
        }
    }

    Ok(())
}
