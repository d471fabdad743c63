//! dumptemplate - Validate a capture template and print its resolved shapes
//!
//! Every shape is printed with its kind and fully resolved geometry, so
//! default and column fallbacks can be checked before running a scan.

mod common;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use pdfcapture_core::area::Area;
use pdfcapture_core::template::Template;

use common::{init_logging, open_output, write_json};

/// Validate a capture template and print its resolved shapes.
#[derive(Parser, Debug)]
#[command(name = "dumptemplate")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON template
    template: PathBuf,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Emit the resolved shapes as JSON
    #[arg(short = 'j', long, action = ArgAction::SetTrue)]
    json: bool,
}

fn format_area(area: &Area) -> String {
    format!(
        "left={} top={} right={} bottom={} width={} height={}",
        area.left(),
        area.top(),
        area.right(),
        area.bottom(),
        area.width(),
        area.height()
    )
}

fn dump_text<W: Write + ?Sized>(writer: &mut W, template: &Template) -> Result<()> {
    for shape in template.shapes() {
        writeln!(writer, "{} ({})", shape.name, shape.kind)?;
        writeln!(writer, "  area: {}", format_area(&shape.area))?;
        if !shape.columns.is_empty() {
            writeln!(writer, "  separator: {:?}", shape.separator)?;
        }
        for column in &shape.columns {
            writeln!(writer, "  column {}: {}", column.name, format_area(&column.area))?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let template = Template::from_path(&args.template)
        .with_context(|| format!("invalid template {}", args.template.display()))?;

    let mut output = open_output(&args.outfile)?;
    if args.json {
        let shapes: Vec<_> = template.shapes().collect();
        write_json(output.as_mut(), &serde_json::to_value(shapes)?, true)?;
    } else {
        dump_text(output.as_mut(), &template)?;
    }
    output.flush()?;
    Ok(())
}
