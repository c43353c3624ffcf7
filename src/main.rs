// SPDX-License-Identifier: MIT
//
// rainbow — color every bracket in a file by its nesting depth.
//
// This is the binary that wires the crates together:
//
//   rainbow-editor → which tokens are brackets, and how deep they sit
//   rainbow-theme  → which color a depth gets on a light or dark background
//   rainbow-term   → how that color reaches the terminal
//
// Each document flows through:
//
//   file/stdin → annotator (tree-sitter for .rs, scanner otherwise)
//             → BracketSpan { range, depth }
//             → DepthColorMap → CellColor → write_painted → stdout
//
// `--list` skips painting and prints one `line:col depth token` line per
// bracket instead.

mod config;
mod error;

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use rainbow_editor::{Annotator, BracketSpan, Language, PlainAnnotator, ScanOptions, SyntaxAnnotator};
use rainbow_term::{CellColor, Painted, write_painted};
use rainbow_theme::{DepthColorMap, Variant};

use crate::config::{ColorMode, Config};
use crate::error::Error;

const STDIN: &str = "<stdin>";
const STDOUT: &str = "<stdout>";

// ─── Command line ───────────────────────────────────────────────────────────

/// Rainbow brackets for the terminal
#[derive(Parser, Debug)]
#[command(name = "rainbow", version, about)]
struct Args {
    /// Files to color (reads from stdin if none provided)
    files: Vec<PathBuf>,

    /// Background the colors have to read on
    #[arg(long, value_name = "light|dark")]
    theme: Option<Variant>,

    /// Emit xterm-256 colors instead of 24-bit truecolor
    #[arg(long)]
    ansi256: bool,

    /// Don't treat `<` and `>` as brackets
    #[arg(long)]
    no_angle: bool,

    /// Use the heuristic scanner even for languages with a grammar
    #[arg(long)]
    plain: bool,

    /// Print `line:col depth token` for every bracket instead of painting
    #[arg(long)]
    list: bool,

    /// TOML config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ─── Settings ───────────────────────────────────────────────────────────────

/// Config file values with command-line overrides applied.
#[derive(Debug)]
struct Settings {
    variant: Variant,
    color_mode: ColorMode,
    options: ScanOptions,
    colors: DepthColorMap,
    plain: bool,
}

impl Settings {
    fn resolve(args: &Args, config: &Config) -> Result<Self, Error> {
        let mut options = config.scan_options();
        if args.no_angle {
            options.angle_brackets = false;
        }

        Ok(Self {
            variant: args.theme.unwrap_or(config.theme),
            color_mode: if args.ansi256 {
                ColorMode::Ansi256
            } else {
                config.color_mode
            },
            options,
            colors: config.depth_colors()?,
            plain: args.plain,
        })
    }

    /// Bracket spans for one document. `path` only picks the annotator.
    fn annotate(&self, text: &str, path: Option<&Path>) -> Vec<BracketSpan> {
        match path.and_then(Language::detect).filter(|_| !self.plain) {
            Some(language) => {
                log::debug!("annotating with the {} grammar", language.name());
                SyntaxAnnotator::new(language).annotate(text, &self.options)
            }
            None => PlainAnnotator.annotate(text, &self.options),
        }
    }

    fn cell_color(&self, depth: usize) -> CellColor {
        let color = self.colors.color_at(depth).resolve(self.variant).to_cell_color();
        match self.color_mode {
            ColorMode::Truecolor => color,
            ColorMode::Ansi256 => color.to_ansi256(),
        }
    }

    fn paint(&self, w: &mut impl Write, text: &str, spans: Vec<BracketSpan>) -> io::Result<()> {
        let painted: Vec<Painted> = spans
            .into_iter()
            .map(|span| Painted::new(span.range, self.cell_color(span.depth)))
            .collect();
        write_painted(w, text, &painted)
    }
}

// ─── Listing ────────────────────────────────────────────────────────────────

/// One line per span: `line:col depth token`, 1-based, columns in chars.
/// With `prefix`, every line starts with `path:`.
fn list(
    w: &mut impl Write,
    text: &str,
    spans: &[BracketSpan],
    prefix: Option<&Path>,
) -> io::Result<()> {
    let mut line = 1;
    let mut line_start = 0;
    let mut cursor = 0;

    for span in spans {
        let start = span.range.start;
        let Some(skipped) = text.get(cursor..start) else {
            continue;
        };
        for (i, c) in skipped.char_indices() {
            if c == '\n' {
                line += 1;
                line_start = cursor + i + 1;
            }
        }
        cursor = start;

        let col = text.get(line_start..start).map_or(0, |s| s.chars().count()) + 1;
        let token = text.get(span.range.clone()).unwrap_or_default();
        if let Some(path) = prefix {
            write!(w, "{}:", path.display())?;
        }
        writeln!(w, "{line}:{col} {} {token}", span.depth)?;
    }
    Ok(())
}

// ─── Driver ─────────────────────────────────────────────────────────────────

fn render(
    w: &mut impl Write,
    settings: &Settings,
    text: &str,
    path: Option<&Path>,
    args: &Args,
) -> io::Result<()> {
    let spans = settings.annotate(text, path);
    if args.list {
        let prefix = path.filter(|_| args.files.len() > 1);
        list(w, text, &spans, prefix)
    } else {
        settings.paint(w, text, spans)
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let settings = Settings::resolve(args, &config)?;
    log::debug!("settings: {settings:?}");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if args.files.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| Error::io(STDIN, e))?;
        render(&mut out, &settings, &text, None, args).map_err(|e| Error::io(STDOUT, e))?;
    } else {
        for path in &args.files {
            let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
            render(&mut out, &settings, &text, Some(path), args)
                .map_err(|e| Error::io(STDOUT, e))?;
        }
    }

    out.flush().map_err(|e| Error::io(STDOUT, e))
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rainbow: {e}");
            ExitCode::from(2)
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
