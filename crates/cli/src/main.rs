// ABOUTME: CLI for ranking product images in a saved HTML snapshot.
// ABOUTME: Reads a file or stdin, decodes it, runs the engine and prints JSON for the selection step.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use gearpost_images::{scrape_product, HtmlDocument, Options};
use tracing_subscriber::EnvFilter;

/// Rank the product images found in an HTML snapshot and output JSON.
#[derive(Parser, Debug)]
#[command(name = "gearpost")]
#[command(about = "Find and rank product images in a saved retailer page", long_about = None)]
struct Args {
    /// HTML file to read. Use "-" to read from stdin.
    target: String,

    /// URL the page was saved from; relative image paths resolve against it.
    #[arg(long, default_value = "https://localhost/")]
    url: String,

    /// Print only the ranked image list instead of the full scrape payload.
    #[arg(long, default_value_t = false)]
    images_only: bool,

    /// Smallest acceptable width/height for images whose size is known.
    #[arg(long)]
    min_dimension: Option<u32>,

    /// Output compact JSON instead of pretty.
    #[arg(long, default_value_t = false)]
    compact: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let bytes = load_bytes(&args.target)?;
    let html = decode_html(&bytes);
    let doc = HtmlDocument::parse(&html, &args.url)
        .with_context(|| format!("cannot use {} as the page URL", args.url))?;

    let mut builder = Options::builder();
    if let Some(min) = args.min_dimension {
        builder = builder.min_dimension(min);
    }
    let opts = builder.build();

    let scrape = scrape_product(&doc, &opts);
    tracing::info!(images = scrape.images.len(), url = %scrape.url, "ranked page images");

    let output = if args.images_only {
        serde_json::to_value(&scrape.images)?
    } else {
        serde_json::to_value(&scrape)?
    };

    if args.compact {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}

fn load_bytes(target: &str) -> Result<Vec<u8>> {
    if target == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }

    let path = PathBuf::from(target);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", target));
    }
    fs::read(&path).with_context(|| format!("reading {}", target))
}

/// Decodes page bytes: a BOM or `<meta charset>` wins, otherwise chardetng guesses.
fn decode_html(bytes: &[u8]) -> String {
    if let Some((encoding, _)) = encoding_rs::Encoding::for_bom(bytes) {
        let (decoded, _, _) = encoding.decode(bytes);
        return decoded.into_owned();
    }

    let declared = meta_charset(bytes).and_then(|c| encoding_rs::Encoding::for_label(c.as_bytes()));
    if let Some(encoding) = declared {
        let (decoded, _, _) = encoding.decode(bytes);
        return decoded.into_owned();
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}

/// Finds `charset=...` in the first 1024 bytes, as browsers prescan for it.
fn meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(1024)];
    let head = String::from_utf8_lossy(head).to_lowercase();
    let start = head.find("charset=")? + "charset=".len();
    let value: String = head[start..]
        .trim_start_matches(|c: char| c == '"' || c == '\'')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
