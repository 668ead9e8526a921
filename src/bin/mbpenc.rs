//! mbpenc - convert an image to a mono bitmap (MBP) file.
//!
//! Usage: `mbpenc <INPUT> <OUTPUT>`
//!
//! The three encodings are sized, then the smallest is written to OUTPUT.

use clap::Parser;
use mbp_codec::utils::log::{init_subscriber, Level};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "mbpenc", about = "Convert an image to a mono bitmap (MBP) file")]
struct Args {
    /// Source image (any format the `image` crate reads)
    input: PathBuf,

    /// Destination MBP file
    output: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_subscriber(Level::INFO);

    match mbp_codec::convert_file(&args.input, &args.output) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}: {}", args.input.display(), err);
            ExitCode::FAILURE
        }
    }
}
