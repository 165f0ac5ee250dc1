//! Apply command
//!
//! Usage: filterx apply <QUERY> --field NAME=VALUE...

use clap::Args;
use filterx_core::{reconcile, ExError, FilterCodec, QueryStringCodec};

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Filter in query-string form
    pub query: String,

    /// Edit-form field, e.g. 'sign_1=!=' or 'column_new_0=host'
    #[arg(long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,
}

/// Execute apply command
pub fn execute(args: ApplyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let fields = super::parse_fields(&args.fields)?;
    let codec = QueryStringCodec;

    let root = codec
        .parse(super::strip_question_mark(&args.query))
        .and_then(|root| reconcile::apply(&root, fields))
        .map_err(|e| ExError::from(e).with_op("apply"))?;

    println!("{}", codec.serialize(&root));
    Ok(())
}
