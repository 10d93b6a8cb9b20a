use anyhow::Result;
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{debug, info};

use fieldquill::config::Config;
use fieldquill::document::{Field, FieldPatch, FieldPath, FieldTree, FieldType, PlacedField};
use fieldquill::editor::{EditorSession, RandomIds};
use fieldquill::file::convert::export_tree;
use fieldquill::file::loader::{load_json_file, load_json_from_stdin};
use fieldquill::logging;

/// FieldQuill - Render a field tree as commented JSON5
#[derive(Parser)]
#[command(name = "fieldquill")]
#[command(version)]
#[command(about = "Builds a field tree from JSON and renders it as JSON5-style text", long_about = None)]
struct Cli {
    /// JSON (or .json.gz) file to seed the document from (omit to read piped stdin, or to render a sample)
    file: Option<PathBuf>,

    /// Spaces per indentation level (overrides the config file)
    #[arg(short, long)]
    indent: Option<usize>,

    /// Print plain JSON instead of the JSON5 rendering
    #[arg(long)]
    json: bool,

    /// Do not wrap the top-level fields in braces
    #[arg(long)]
    no_wrap: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load();
    logging::setup_logging(&config.log_level);

    if let Some(indent) = cli.indent {
        config.indent_size = indent;
    }
    if cli.no_wrap {
        config.wrap_document = false;
    }
    debug!(?config, "configuration loaded");

    let mut ids = RandomIds;
    let tree = if let Some(file_path) = &cli.file {
        info!(path = %file_path.display(), "loading document");
        load_json_file(file_path, &mut ids)?
    } else if !io::stdin().is_terminal() {
        load_json_from_stdin(&mut ids)?
    } else {
        FieldTree::new()
    };

    let mut session = EditorSession::from_config(tree, &config, Box::new(ids));
    if session.tree().is_empty() && cli.file.is_none() {
        build_sample(&mut session)?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&export_tree(session.tree()))?);
    } else {
        println!("{}", session.rendered());
    }

    Ok(())
}

/// Fills an empty session the way a user would through the form: add a
/// field, name it, pick a type, fill in values.
fn build_sample(session: &mut EditorSession) -> Result<()> {
    let user = session.add_child(&FieldPath::root())?;
    session.update(&user, &FieldPatch::new().key("user").comment("who owns this"))?;
    let name = session
        .change_type(&user, FieldType::Object)?
        .ok_or_else(|| anyhow::anyhow!("object field got no first child"))?;
    session.update(&name, &FieldPatch::new().key("name").value("Alice"))?;

    let email = session
        .add_sibling(&name)?
        .ok_or_else(|| anyhow::anyhow!("sibling was withheld"))?;
    session.update(&email, &FieldPatch::new().key("email").value("alice@example.com"))?;

    let count = session
        .add_sibling(&user)?
        .ok_or_else(|| anyhow::anyhow!("sibling was withheld"))?;
    session.update(&count, &FieldPatch::new().key("count").field_type(FieldType::Number))?;
    session.update(&count, &FieldPatch::new().value(42))?;

    let tags = session
        .add_sibling(&count)?
        .ok_or_else(|| anyhow::anyhow!("sibling was withheld"))?;
    session.update(&tags, &FieldPatch::new().key("tags"))?;
    let first_tag = session
        .change_type(&tags, FieldType::Array)?
        .ok_or_else(|| anyhow::anyhow!("array field got no first child"))?;
    session.update(&first_tag, &FieldPatch::new().value("admin"))?;
    session.create(PlacedField::new(
        tags,
        Field::boolean("active", None, true).with_comment("elements may mix types"),
    ))?;

    Ok(())
}
