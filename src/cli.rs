//! Command-line argument parsing for the converter
//!
//! Reads a buffer in one external form and writes it in the other:
//! - `tagbuf --from bracketed --to list "hello {gift}"`
//! - `echo '[{"type":"tag","value":"gift"}]' | tagbuf --from list`

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use tagbuf::catalog::TagValidation;
use tagbuf::codec::SerialForm;
use tagbuf::config::TagEditorConfig;

/// Convert between the list and bracketed forms of a tag buffer
#[derive(Parser, Debug)]
#[command(name = "tagbuf", version, about = "Convert tag buffers between forms")]
pub struct CliArgs {
    /// Input value (read from stdin when omitted)
    #[arg(value_name = "INPUT")]
    pub input: Option<String>,

    /// Form of the input (defaults to the configured form)
    #[arg(long, value_enum)]
    pub from: Option<FormArg>,

    /// Form of the output (defaults to the other form)
    #[arg(long, value_enum)]
    pub to: Option<FormArg>,

    /// YAML catalog of known token identifiers
    #[arg(short, long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Accept any well-formed identifier as a token
    #[arg(long)]
    pub any: bool,

    /// Trim whitespace around text entries
    #[arg(long)]
    pub trim: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormArg {
    List,
    Bracketed,
}

impl From<FormArg> for SerialForm {
    fn from(arg: FormArg) -> Self {
        match arg {
            FormArg::List => SerialForm::List,
            FormArg::Bracketed => SerialForm::Bracketed,
        }
    }
}

/// Conversion settings derived from CLI arguments and config
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub from: SerialForm,
    pub to: SerialForm,
    pub editor: TagEditorConfig,
}

impl CliArgs {
    /// Merge CLI flags over a loaded config
    pub fn into_config(self, mut editor: TagEditorConfig) -> ConvertConfig {
        if self.any {
            editor.validation = TagValidation::Any;
        }
        if self.trim {
            editor.trim_text = true;
        }
        let from = self.from.map(SerialForm::from).unwrap_or(editor.form);
        let to = self.to.map(SerialForm::from).unwrap_or(match from {
            SerialForm::List => SerialForm::Bracketed,
            SerialForm::Bracketed => SerialForm::List,
        });
        editor.form = to;
        ConvertConfig { from, to, editor }
    }
}
