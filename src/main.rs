//! proof – command-line metadata proof renderer.
//!
//! Usage:
//!   proof <metadata.json> [output_dir] [--landscape] [--title "My App"]
//!         [--modified-color 0000AA]
//!
//! If `output_dir` is omitted the PDF is written to the system temp
//! directory. The path of the generated file is printed on stdout.

use std::{env, fs, path::PathBuf, process};

use metadata_proof::style::Color;
use metadata_proof::{MetadataBundle, PageOrientation, PipelineConfig, Renderer};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut output_dir: Option<PathBuf> = None;
    let mut landscape = false;
    let mut title: Option<String> = None;
    let mut modified_color: Option<Color> = None;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--landscape" | "-l" => landscape = true,
            "--title" | "-t" => match iter.next() {
                Some(v) => title = Some(v.clone()),
                None => {
                    eprintln!("--title needs a value");
                    process::exit(1);
                }
            },
            "--modified-color" | "-c" => {
                match iter.next().and_then(|v| Color::from_hex(v)) {
                    Some(c) => modified_color = Some(c),
                    None => {
                        eprintln!("--modified-color needs a hex colour such as 0000AA");
                        process::exit(1);
                    }
                }
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if positional == 0 {
                    input_path = Some(PathBuf::from(path));
                } else if positional == 1 {
                    output_dir = Some(PathBuf::from(path));
                } else {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                positional += 1;
            }
        }
    }

    let input = match input_path {
        Some(p) => p,
        None => {
            eprintln!("Error: no metadata file specified.");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let json = match fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {e}", input.display());
            process::exit(1);
        }
    };

    let bundle = match MetadataBundle::from_json(&json) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error parsing '{}': {e}", input.display());
            process::exit(1);
        }
    };

    let mut config = PipelineConfig {
        orientation: if landscape {
            PageOrientation::Landscape
        } else {
            PageOrientation::Portrait
        },
        ..PipelineConfig::default()
    };
    if let Some(t) = title {
        config.title = t;
    }
    if let Some(c) = modified_color {
        config.style.palette.modified = c;
    }

    match Renderer::new(config).render(&bundle, output_dir.as_deref()) {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            eprintln!("Error generating PDF: {e}");
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("proof – metadata proof renderer (metadata-proof)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <metadata.json> [output_dir] [--landscape] [--title \"My App\"]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <metadata.json>  Object keyed by locale code; screenshot paths must be readable");
    eprintln!("  [output_dir]     Directory for <unix_timestamp>.pdf (default: system temp dir)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --title, -t           Document title in PDF metadata (default: \"Metadata proof\")");
    eprintln!("  --landscape, -l       Use landscape page orientation (Letter 792×612 pt)");
    eprintln!("  --modified-color, -c  Hex colour for changed fields (default: 0000AA)");
    eprintln!("  --help, -h            Print this message");
}
