//! Command-line argument surface.

use clap::Parser;
use std::path::PathBuf;

/// `docx-review`: reads, edits, compares, and emits Word documents with
/// tracked-change and comment fidelity.
#[derive(Parser, Debug)]
#[command(name = "docx-review", version, about)]
pub struct Cli {
    /// Read a document into the JSON read model instead of editing it.
    #[arg(long, conflicts_with_all = ["diff", "textconv", "create", "git_setup"])]
    pub read: bool,

    /// Diff two documents.
    #[arg(long, conflicts_with_all = ["read", "textconv", "create", "git_setup"])]
    pub diff: bool,

    /// Convert a document to deterministic line-oriented text.
    #[arg(long, conflicts_with_all = ["read", "diff", "create", "git_setup"])]
    pub textconv: bool,

    /// Create a minimal blank .docx at the output path.
    #[arg(long, conflicts_with_all = ["read", "diff", "textconv", "git_setup"])]
    pub create: bool,

    /// Print the `.gitattributes`/`git config` snippets that wire `--textconv`
    /// in as a `git diff` driver for `.docx` files.
    #[arg(long = "git-setup", conflicts_with_all = ["read", "diff", "textconv", "create"])]
    pub git_setup: bool,

    /// Output path: the rewritten document in edit mode, the new document in
    /// create mode.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Author attributed to emitted tracked changes and comments. Overrides
    /// the manifest's `author` field, which in turn overrides the default
    /// "Reviewer".
    #[arg(long)]
    pub author: Option<String>,

    /// Emit machine-readable JSON instead of a human-readable summary.
    #[arg(long)]
    pub json: bool,

    /// Resolve matches and report outcomes without writing output.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Increase log verbosity; stacks (`-v`, `-vv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Positional arguments, mode-dependent: edit takes `input.docx` and
    /// `manifest.json` (manifest may be omitted if stdin is redirected);
    /// diff takes `old.docx` and `new.docx`; read/textconv take one
    /// `file.docx`; create takes no positional arguments.
    pub args: Vec<PathBuf>,
}

/// The selected mode, resolved from `Cli`'s mutually exclusive flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Edit,
    Read,
    Diff,
    TextConv,
    Create,
    GitSetup,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.read {
            Mode::Read
        } else if self.diff {
            Mode::Diff
        } else if self.textconv {
            Mode::TextConv
        } else if self.create {
            Mode::Create
        } else if self.git_setup {
            Mode::GitSetup
        } else {
            Mode::Edit
        }
    }
}
