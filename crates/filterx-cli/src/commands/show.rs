//! Show command
//!
//! Usage: filterx show <QUERY> [--add-to <ID>] [--json]

use clap::Args;
use filterx_core::addressing::{self, FilterId};
use filterx_core::{ExError, FilterCodec, FilterRenderer, OutlineRenderer, QueryStringCodec};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Filter in query-string form, e.g. 'host=web1&state!=0'
    pub query: String,

    /// Mark the insertion point below this node
    #[arg(long, conflicts_with = "json")]
    pub add_to: Option<String>,

    /// Print the tree as JSON instead of an outline
    #[arg(long)]
    pub json: bool,
}

/// Execute show command
pub fn execute(args: ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let query = super::strip_question_mark(&args.query);
    let root = QueryStringCodec
        .parse(query)
        .map_err(|e| ExError::from(e).with_op("show"))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&root)?);
        return Ok(());
    }

    let insertion_point = args
        .add_to
        .map(|raw| -> Result<FilterId, ExError> {
            let id: FilterId = raw.parse()?;
            addressing::resolve(&root, &id)?;
            Ok(id)
        })
        .transpose()
        .map_err(|e| e.with_op("show"))?;

    print!(
        "{}",
        OutlineRenderer::new().render(&root, insertion_point.as_ref())
    );
    Ok(())
}
