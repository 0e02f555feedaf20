use clap::{Parser, Subcommand};
use serde_json::json;

use chain_router::catalog;
use chain_router::config::RoutingConfig;
use chain_router::dispatch::{RequestContext, StdoutSink};
use chain_router::routing::template::{match_template, select_candidates, tokenize};
use chain_router::routing::Method;

#[derive(Parser)]
#[command(name = "route-probe")]
#[command(about = "Inspect how paths tokenize and match route templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a path or template
    Tokenize { input: String },
    /// Match one path against one template
    Match {
        #[arg(short, long)]
        template: String,
        #[arg(short, long)]
        path: String,
    },
    /// List which of the given templates a path would dispatch to
    Candidates {
        #[arg(short, long)]
        path: String,
        templates: Vec<String>,
    },
    /// Dispatch one request through the demo item API, printing replies
    Dispatch {
        #[arg(short, long, default_value = "GET")]
        method: String,
        #[arg(short, long)]
        path: String,
        /// Request parameter as key=value; repeatable
        #[arg(short, long = "data", value_parser = parse_pair)]
        data: Vec<(String, String)>,
        #[arg(short, long)]
        body: Option<String>,
    },
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{s}`"))
}

fn dispatch(
    method: &str,
    path: String,
    data: Vec<(String, String)>,
    body: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let router = catalog::router(&RoutingConfig::default())?;
    let ctx = RequestContext::new(Method::from_request(method)?, path)
        .with_data(data)
        .with_body(body.unwrap_or_default());

    let outcome = router.listen(&ctx, &mut StdoutSink);
    println!();
    if !outcome.matched() {
        eprintln!("no route matched");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Tokenize { input } => json!({ "tokens": tokenize(&input) }),
        Commands::Match { template, path } => match match_template(&path, &template) {
            Some(params) => json!({ "matched": true, "params": params }),
            None => json!({ "matched": false }),
        },
        Commands::Candidates { path, templates } => {
            let candidates = select_candidates(templates.iter().map(String::as_str), &path);
            json!({ "path": path, "candidates": candidates })
        }
        Commands::Dispatch {
            method,
            path,
            data,
            body,
        } => return dispatch(&method, path, data, body),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
