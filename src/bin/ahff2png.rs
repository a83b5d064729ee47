use std::path::PathBuf;
use std::process::ExitCode;

use ahff::{ConvertOptions, Converter, Limits, Orientation, PngSink, Unstoppable, output_path_for};
use clap::Parser;

#[derive(Parser)]
#[command(name = "ahff2png", version, about = "Convert AHFF texture containers to PNG")]
struct Cli {
    /// Input .ahff files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output PNG (only with a single input).
    /// If not set, `.ahff` is replaced by `.png`, or `.png` is appended
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Mirror each row left to right
    #[arg(long)]
    flip_horizontal: bool,

    /// Keep the stored bottom-up row order
    #[arg(long)]
    no_flip: bool,

    /// Reject images with more than N pixels
    #[arg(long, value_name = "N")]
    max_pixels: Option<u64>,

    /// Don't print a status line per file
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.output.is_some() && cli.inputs.len() > 1 {
        log::error!("--output can only be used with a single input");
        return ExitCode::from(2);
    }

    let options = ConvertOptions {
        limits: Limits {
            max_pixels: cli.max_pixels,
            ..Default::default()
        },
        orientation: Orientation {
            flip_vertical: !cli.no_flip,
            flip_horizontal: cli.flip_horizontal,
        },
    };
    let converter = Converter::new(PngSink).with_options(options);

    let mut failed = 0usize;
    for input in &cli.inputs {
        let output = cli.output.clone().unwrap_or_else(|| output_path_for(input));
        match converter.convert_file(input, &output, Unstoppable) {
            Ok(report) => {
                if !cli.quiet {
                    println!("[>] {} ({}): 0", report.output.display(), report.format.tag());
                }
            }
            Err(e) => {
                failed += 1;
                log::error!("{}: {e}", input.display());
            }
        }
    }

    if failed > 0 {
        log::error!("{failed} of {} conversions failed", cli.inputs.len());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
