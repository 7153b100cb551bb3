use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "img-compressor",
    about = "Compress a single image to JPEG with an adjustable compression rate",
    long_about = "img-compressor takes one image, recompresses it as a JPEG whose quality is the inverse \
                  of the chosen compression rate, and saves the result next to a report of the size saved. \
                  Use `compress` for a one-shot run or `shell` to pick, tune, compress and reset interactively.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    img-compressor compress photo.png -r 70 -o ./compressed\n  \
    img-compressor compress scan.jpg -r 90 -t 30\n  \
    img-compressor shell -o ./compressed"
)]
pub struct Args {
    #[arg(short, long, global = true, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short, long, global = true, help = "Trace every session transition")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress a single image file",
        long_about = "Select an image, compress it once at the given rate and write \
                      <name>_Compressed.jpg into the output directory."
    )]
    Compress {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(
            short = 'o',
            long,
            default_value = ".",
            help = "Output directory (default: current directory)"
        )]
        output_dir: PathBuf,

        #[arg(
            short = 'r',
            long,
            help = "Compression rate (10-100, default: 70)",
            long_help = "Compression rate from 10 (largest, best quality) to 100 (smallest, worst quality). \
                         The JPEG quality used is 100 minus the rate. Rates above 85 print a quality warning."
        )]
        rate: Option<u8>,

        #[arg(
            short = 't',
            long,
            help = "Give up on the codec after this many seconds (default: wait)",
            long_help = "Codec timeout in seconds. When it elapses the compression fails and the \
                         image stays selected. 0 disables the timeout."
        )]
        timeout: Option<u64>,
    },

    #[command(
        about = "Drive a compression session interactively",
        long_about = "Read commands from stdin: select <path>, rate <n>, compress, status, \
                      save [dir], reset, help and quit."
    )]
    Shell {
        #[arg(
            short = 'o',
            long,
            default_value = ".",
            help = "Directory used by `save` without an argument"
        )]
        output_dir: PathBuf,

        #[arg(short = 'r', long, help = "Initial compression rate for each selected image (10-100)")]
        rate: Option<u8>,

        #[arg(short = 't', long, help = "Codec timeout in seconds (0 disables it)")]
        timeout: Option<u64>,
    },
}
