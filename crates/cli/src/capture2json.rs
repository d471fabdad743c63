//! capture2json - Project captured PDF zones to JSON
//!
//! Reads one or more capture record files produced by a page scanner and
//! writes the flattened projection of every capture, a single capture view,
//! or the list of capture names.

mod common;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use pdfcapture_core::capture::{CaptureView, Captures, LineEntity};
use pdfcapture_core::record::CaptureDocument;
use serde_json::{Map, Value};

use common::{init_logging, open_output, write_json};

/// Project captured PDF zones to JSON.
#[derive(Parser, Debug)]
#[command(name = "capture2json")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more capture record files; records for the same page are appended in file order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Pretty-print JSON output
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,

    /// Print the page-indexed view of a single capture instead of the projection
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Restrict --name output to one page (1-indexed)
    #[arg(short = 'p', long, requires = "name")]
    page: Option<u32>,

    /// List capture names with their kind and page count
    #[arg(short = 'l', long, action = ArgAction::SetTrue, conflicts_with = "name")]
    list: bool,
}

fn load_captures(files: &[PathBuf]) -> Result<Captures> {
    let mut document = CaptureDocument::default();
    for path in files {
        let part = CaptureDocument::from_path(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        tracing::debug!(path = %path.display(), records = part.record_count(), "loaded capture records");
        document.merge(part);
    }
    Ok(document.into_captures()?)
}

fn rows_json<'a>(lines: impl IntoIterator<Item = &'a Arc<LineEntity>>) -> Value {
    let rows = lines
        .into_iter()
        .map(|line| {
            let row: Map<String, Value> = line
                .iter()
                .map(|col| (col.name().to_string(), Value::from(col.text())))
                .collect();
            Value::Object(row)
        })
        .collect();
    Value::Array(rows)
}

/// Renders one view as `{ page: text }` or `{ page: [rows] }`.
fn view_json(view: &CaptureView, page: Option<u32>) -> Result<Value> {
    let mut pages = Map::new();
    match view {
        CaptureView::Rectangle(rect) => match page {
            Some(page) => {
                pages.insert(page.to_string(), Value::from(rect.text(page)?));
            }
            None => {
                for (page, entity) in rect {
                    pages.insert(page.to_string(), Value::from(entity.text()));
                }
            }
        },
        CaptureView::Lines(lines) => match page {
            Some(page) => {
                pages.insert(page.to_string(), rows_json(lines.get(page)?));
            }
            None => {
                for (page, rows) in lines {
                    pages.insert(page.to_string(), rows_json(rows));
                }
            }
        },
    }
    Ok(Value::Object(pages))
}

fn write_list<W: Write + ?Sized>(writer: &mut W, captures: &Captures) -> Result<()> {
    for name in captures.names() {
        let view = captures.get(name)?;
        writeln!(
            writer,
            "{}\t{}\t{}",
            name,
            view.shape_kind(),
            view.pages().len()
        )?;
    }
    Ok(())
}

fn run(args: &Args, output: &mut dyn Write) -> Result<()> {
    let captures = load_captures(&args.files)?;
    if captures.is_empty() {
        tracing::warn!("no captured entities found");
    }

    if args.list {
        return write_list(output, &captures);
    }

    let value = match args.name.as_deref() {
        Some(name) => {
            let view = captures.get(name)?;
            let mut wrapped = Map::new();
            wrapped.insert(name.to_string(), view_json(view, args.page)?);
            Value::Object(wrapped)
        }
        None => captures.project()?.to_json()?,
    };
    write_json(output, &value, args.pretty)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    for path in &args.files {
        if !path.exists() {
            bail!("file not found: {}", path.display());
        }
    }

    let mut output = open_output(&args.outfile)?;
    run(&args, output.as_mut())?;
    output.flush()?;
    Ok(())
}
