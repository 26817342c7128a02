// ABOUTME: CLI binary for the digests HTML-to-prompt normalizer.
// ABOUTME: Reads HTML from a file, stdin or a JSON request and prints the compact rendering.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use digests_prompt::source::{read_html, read_html_file};
use digests_prompt::{FormatRequest, FormatResult, Formatter, Options};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "prompt-html")]
#[command(about = "Reduce HTML to a compact, indented rendering for prompts")]
struct Args {
    /// HTML file to format (default: stdin)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// JSON request file: {"html": ..., "keepStyles"?, "maxAttrLen"?, "maxContentLen"?}
    #[arg(long = "request")]
    request: Option<PathBuf>,

    /// Keep class and style attributes
    #[arg(long = "keep-styles")]
    keep_styles: bool,

    /// Characters of an attribute value shown before truncation
    #[arg(long = "max-attr-len")]
    max_attr_len: Option<usize>,

    /// Characters of text content shown before truncation
    #[arg(long = "max-content-len")]
    max_content_len: Option<usize>,

    /// Drop elements with this tag and everything inside them (repeatable)
    #[arg(long = "skip-tag")]
    skip_tags: Vec<String>,

    /// Charset of the input bytes (default: sniffed)
    #[arg(long = "charset")]
    charset: Option<String>,

    /// Output a JSON result with reduction statistics instead of raw text
    #[arg(long = "json")]
    json_output: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,

    /// Log debug details to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Apply command-line overrides on top of the base options.
fn apply_overrides(args: &Args, mut opts: Options) -> Options {
    if args.keep_styles {
        opts.keep_styles = true;
    }
    if let Some(len) = args.max_attr_len {
        opts.max_attr_len = len;
    }
    if let Some(len) = args.max_content_len {
        opts.max_content_len = len;
    }
    opts.skip_tags.extend(args.skip_tags.iter().cloned());
    opts
}

/// Load the HTML and base options from whichever input the user chose.
fn load_input(args: &Args) -> Result<(String, Options), String> {
    let charset = args.charset.as_deref();

    if let Some(request_path) = &args.request {
        let raw = fs::read_to_string(request_path)
            .map_err(|e| format!("error reading request {:?}: {}", request_path, e))?;
        let req: FormatRequest = serde_json::from_str(&raw)
            .map_err(|e| format!("error parsing request {:?}: {}", request_path, e))?;
        let opts = req.options();
        return Ok((req.html, opts));
    }

    let html = match &args.html {
        Some(path) => read_html_file(path, charset).map_err(|e| format!("error: {}", e))?,
        None => read_html(io::stdin().lock(), charset).map_err(|e| format!("error: {}", e))?,
    };
    Ok((html, Options::default()))
}

fn format_output(result: &FormatResult, json_output: bool) -> Result<String, String> {
    if json_output {
        let mut json = serde_json::to_string_pretty(result)
            .map_err(|e| format!("error encoding JSON: {}", e))?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(result.content.clone())
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.html.is_some() && args.request.is_some() {
        eprintln!("error: cannot use both --html and --request");
        return ExitCode::from(1);
    }

    let start = Instant::now();

    let (html, base) = match load_input(&args) {
        Ok(input) => input,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::from(1);
        }
    };

    let formatter = Formatter::new(apply_overrides(&args, base));
    let result = match formatter.format_with_stats(&html) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error formatting HTML: {}", e);
            return ExitCode::from(1);
        }
    };

    let elapsed = start.elapsed();

    let output_str = match format_output(&result, args.json_output) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::from(1);
        }
    };

    let mut had_error = false;
    if let Some(output_path) = &args.output {
        if let Err(e) = fs::write(output_path, &output_str) {
            eprintln!("error writing to {:?}: {}", output_path, e);
            had_error = true;
        }
    } else {
        let mut stdout = io::stdout().lock();
        if let Err(e) = stdout.write_all(output_str.as_bytes()) {
            eprintln!("error writing output: {}", e);
            had_error = true;
        }
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
