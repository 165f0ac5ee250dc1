//! Handle command
//!
//! Usage: filterx handle <QUERY> [--field NAME=VALUE...] [--config <FILE>]
//!
//! A request with fields is treated as a form submission.

use clap::Args;
use filterx_core::render::summary;
use filterx_core::{
    EditSession, ExError, FilterRenderer, FilterRequest, OutlineRenderer, Outcome,
    SessionConfig, SessionState,
};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct HandleArgs {
    /// Request query string
    pub query: String,

    /// Submitted form field
    #[arg(long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,

    /// Session configuration (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Execute handle command
pub fn execute(args: HandleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            SessionConfig::from_toml_str(&text).map_err(ExError::from)?
        }
        None => SessionConfig::default(),
    };

    let query = super::strip_question_mark(&args.query);
    let request = if args.fields.is_empty() {
        FilterRequest::get(query)
    } else {
        FilterRequest::post(query, super::parse_fields(&args.fields)?)
    };

    let session = EditSession::new(config);
    match session.handle(&request)? {
        Outcome::Redirect(redirect) => println!("redirect: ?{}", redirect.query),
        Outcome::Render(view) => match view.state {
            SessionState::Editing => {
                print!(
                    "{}",
                    OutlineRenderer::new().render(&view.filter, view.insertion_point.as_ref())
                );
                println!("submit: ?{}", view.query);
            }
            SessionState::Idle => {
                println!(
                    "filter: {}",
                    summary(&view.filter, session.config().summary_length)
                );
                println!("edit: ?{}", view.query);
            }
        },
    }
    Ok(())
}
