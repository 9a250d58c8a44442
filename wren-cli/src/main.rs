//! wren CLI
//!
//! A headless front end for testing and debugging: loads a document from
//! a file, an inline string, or a URL, lays it out at a fixed width, and
//! prints the document tree, the computed size, and the display list.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;

use wren_dom::dump_tree;
use wren_layout::{BoxChild, LayoutBox, Rect};
use wren_view::HtmlView;

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "wren", about = "Headless HTML layout debugger")]
struct Args {
    /// HTML file to load.
    input: Option<PathBuf>,

    /// Parse an HTML string directly.
    #[arg(long)]
    html: Option<String>,

    /// Fetch a URL over HTTP.
    #[arg(long)]
    url: Option<String>,

    /// Layout width in pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Print the parsed document tree.
    #[arg(long)]
    dom: bool,

    /// Print the box tree with computed rects.
    #[arg(long)]
    boxes: bool,

    /// Dump the display list as JSON instead of a summary.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut view = HtmlView::new(args.width);
    if let Some(url) = &args.url {
        view.set_url(url)
            .with_context(|| format!("failed to load '{url}'"))?;
    } else if let Some(html) = &args.html {
        view.set_text(html).context("failed to parse --html input")?;
    } else if let Some(path) = &args.input {
        let html = fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display()))?;
        view.set_text(&html)
            .with_context(|| format!("failed to parse '{}'", path.display()))?;
    } else {
        bail!("nothing to load: pass a file, --html, or --url");
    }

    let ideal = view.calc_ideal_size();
    view.set_rect(Rect::new(0.0, 0.0, args.width, ideal.height));

    if args.dom {
        if let Some(doc) = view.document() {
            println!("{}", "=== Document ===".bold());
            print!("{}", dump_tree(doc, doc.root(), 0));
        }
    }

    if args.boxes {
        if let Some(root) = view.root_box() {
            println!("{}", "=== Box tree ===".bold());
            print_box(root, 0);
        }
    }

    let list = view.draw();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        println!("{}", "=== Layout ===".bold());
        println!("ideal size: {:.1} x {:.1}", ideal.width, ideal.height);
        println!("display list: {} commands", list.len());
    }

    Ok(())
}

/// Print one box and its children, indented by depth.
fn print_box(layout_box: &LayoutBox, depth: usize) {
    let indent = "  ".repeat(depth);
    let rect = layout_box.ideal_rect();
    println!(
        "{indent}box {:?} ideal {:.1}x{:.1}{}",
        layout_box.kind,
        rect.width,
        rect.height,
        if layout_box.breaks_line() { " (breaks line)" } else { "" },
    );
    for child in layout_box.children() {
        match child {
            BoxChild::Box(nested) => print_box(nested, depth + 1),
            BoxChild::Item(item) => {
                println!("{indent}  item {:?} @ {:?}", item.kind, item.rect);
            }
        }
    }
}
