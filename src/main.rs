use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;

use tagbuf::catalog::TagCatalog;
use tagbuf::codec::{list, SerialForm, Serialized};
use tagbuf::config::TagEditorConfig;
use tagbuf::editable::TagEditorState;

mod cli;

use cli::CliArgs;

/// Parse raw input text in the given form
fn parse_input(input: &str, form: SerialForm) -> Result<Serialized> {
    match form {
        SerialForm::Bracketed => Ok(Serialized::Bracketed(input.to_string())),
        SerialForm::List => {
            let entries = list::from_json(input)
                .context("Input is not a valid list-form JSON array")?;
            Ok(Serialized::List(entries))
        }
    }
}

/// Render a serialized value for stdout
fn render_output(value: &Serialized) -> Result<String> {
    match value {
        Serialized::Bracketed(s) => Ok(s.clone()),
        Serialized::List(entries) => {
            serde_json::to_string_pretty(entries).context("Failed to serialize list form")
        }
    }
}

fn main() -> Result<()> {
    tagbuf::tracing::init();

    let args = CliArgs::parse();

    let editor_config = match &args.config {
        Some(path) => TagEditorConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TagEditorConfig::load(),
    };

    let catalog_path = args
        .catalog
        .clone()
        .or_else(|| tagbuf::config_paths::catalog_file().filter(|p| p.exists()));
    let catalog = match catalog_path {
        Some(path) => TagCatalog::load(&path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => TagCatalog::new(),
    };

    let raw_input = match args.input.clone() {
        Some(input) => input,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf.trim_end_matches('\n').to_string()
        }
    };

    let config = args.into_config(editor_config);
    let value = parse_input(&raw_input, config.from)?;
    let state = TagEditorState::from_serialized(&value, config.editor, catalog);
    tracing::debug!(
        from = ?config.from,
        to = ?config.to,
        tokens = state.buffer().token_count(),
        "converted"
    );

    println!("{}", render_output(&state.output())?);
    Ok(())
}
