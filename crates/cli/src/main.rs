// ABOUTME: CLI for unfurling links with unfurl-core.
// ABOUTME: Fetches URIs (or reads a local HTML file with a context URL) and prints the previews as JSON.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use unfurl_core::{Client, Unfurled};

/// Unfurl one or more links into title, description, image and canonical URL.
#[derive(Parser, Debug)]
#[command(name = "unfurl")]
#[command(about = "Build link previews and print them as JSON", long_about = None)]
struct Args {
    /// URIs to unfurl (fetch mode).
    #[arg()]
    uris: Vec<String>,

    /// HTML file to unfurl without fetching (requires --url)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// URL the HTML file was served from (required with --html)
    #[arg(long = "url")]
    url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// User-Agent header to send
    #[arg(long = "user-agent")]
    user_agent: Option<String>,

    /// Extra request header as NAME:VALUE (repeatable)
    #[arg(long = "header", value_name = "NAME:VALUE")]
    headers: Vec<String>,

    /// Output compact JSON instead of pretty.
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,unfurl=info,unfurl_core=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("header must look like NAME:VALUE, got {:?}", raw))?;
    let name = name.trim();
    if name.is_empty() {
        bail!("header name is empty in {:?}", raw);
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn build_client(args: &Args) -> Result<Client> {
    let mut builder = Client::builder().timeout(Duration::from_secs(args.timeout));
    if let Some(user_agent) = &args.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }
    for raw in &args.headers {
        let (name, value) = parse_header(raw)?;
        builder = builder.header(name, value);
    }
    builder.build().context("failed to build HTTP client")
}

/// Single result prints as one object; several print as an array.
fn render(results: &[Unfurled], compact: bool) -> Result<String> {
    let value = match results {
        [single] => serde_json::to_value(single)?,
        many => serde_json::to_value(many)?,
    };
    let rendered = if compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    Ok(rendered)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    match (&args.html, &args.url) {
        (Some(_), None) => bail!("--url is required when using --html"),
        (Some(_), Some(_)) if !args.uris.is_empty() => {
            bail!("cannot use both --html and positional URIs")
        }
        (None, Some(_)) => bail!("--url is only valid together with --html"),
        (None, None) if args.uris.is_empty() => {
            bail!("at least one URI is required, or use --html with --url")
        }
        _ => {}
    }

    let client = build_client(&args)?;

    let results: Vec<Unfurled> = match (&args.html, &args.url) {
        (Some(html_path), Some(url)) => {
            let html = fs::read_to_string(html_path)
                .with_context(|| format!("error reading file {}", html_path.display()))?;
            vec![client.unfurl_html(&html, url)]
        }
        _ => args.uris.iter().map(|uri| client.unfurl(uri)).collect(),
    };

    let output = render(&results, args.compact)?;
    match &args.output {
        Some(path) => {
            fs::write(path, format!("{}\n", output))
                .with_context(|| format!("error writing to {}", path.display()))?;
            tracing::info!(path = %path.display(), count = results.len(), "wrote previews");
        }
        None => println!("{}", output),
    }

    Ok(())
}
