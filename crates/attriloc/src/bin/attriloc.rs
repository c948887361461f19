// ABOUTME: CLI binary for the attriloc product attribute locator.
// ABOUTME: Runs the full pipeline against an HTML file, or resolves selectors for a saved record.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use attriloc::{merge, resolve_selectors, AttributeRecord, InferenceClient, Pipeline};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "attriloc")]
#[command(about = "Extract product attributes from HTML and locate them as selectors")]
struct Args {
    /// HTML file to process
    #[arg(long = "html")]
    html: PathBuf,

    /// JSON file with a pre-computed attribute record (offline mode, no inference)
    #[arg(long = "attributes")]
    attributes: Option<PathBuf>,

    /// Chat-completions endpoint URL
    #[arg(long = "endpoint")]
    endpoint: Option<String>,

    /// Model name sent with each inference request
    #[arg(long = "model")]
    model: Option<String>,

    /// Bearer token for the endpoint (falls back to ATTRILOC_TOKEN)
    #[arg(long = "token")]
    token: Option<String>,

    /// Inference request timeout in seconds
    #[arg(long = "timeout")]
    timeout: Option<u64>,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,
}

fn build_client(args: &Args) -> InferenceClient {
    let mut builder = InferenceClient::builder();
    if let Some(ref endpoint) = args.endpoint {
        builder = builder.endpoint(endpoint.clone());
    }
    if let Some(ref model) = args.model {
        builder = builder.model(model.clone());
    }
    let token = args
        .token
        .clone()
        .or_else(|| std::env::var("ATTRILOC_TOKEN").ok());
    if let Some(token) = token {
        builder = builder.token(token);
    }
    if let Some(secs) = args.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(ref endpoint) = args.endpoint {
        if url::Url::parse(endpoint).is_err() {
            eprintln!("error: invalid endpoint URL: {}", endpoint);
            return ExitCode::from(1);
        }
    }

    let html = match fs::read_to_string(&args.html) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("error reading file {:?}: {}", args.html, e);
            return ExitCode::from(1);
        }
    };

    let start = Instant::now();

    let merged = if let Some(attributes_path) = &args.attributes {
        // Offline mode: resolve selectors for a saved record, no inference.
        let record: AttributeRecord = match fs::read_to_string(attributes_path)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str(&text).map_err(|e| e.to_string()))
        {
            Ok(record) => record,
            Err(e) => {
                eprintln!("error reading attributes {:?}: {}", attributes_path, e);
                return ExitCode::from(1);
            }
        };
        match resolve_selectors(&html, &record) {
            Ok(locators) => merge(&record, &locators),
            Err(e) => {
                eprintln!("error resolving selectors: {}", e);
                return ExitCode::from(1);
            }
        }
    } else {
        let pipeline = Pipeline::new(build_client(&args));
        match pipeline.extract(&html).await {
            Ok(merged) => merged,
            Err(e) => {
                eprintln!("error extracting attributes: {}", e);
                return ExitCode::from(1);
            }
        }
    };

    let elapsed = start.elapsed();

    let output_str = match serde_json::to_string_pretty(&merged) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("error serializing output: {}", e);
            return ExitCode::from(1);
        }
    };

    if let Some(output_path) = &args.output {
        if let Err(e) = fs::write(output_path, &output_str) {
            eprintln!("error writing to {:?}: {}", output_path, e);
            return ExitCode::from(1);
        }
    } else {
        println!("{}", output_str);
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    ExitCode::SUCCESS
}
