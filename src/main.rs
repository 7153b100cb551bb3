use anyhow::{Context, Result};
use clap::Parser;
use img_compressor::cli::{Args, Commands};
use img_compressor::constants::SUCCESS_PREFIX;
use img_compressor::logger::{set_quiet_mode, set_verbose_mode};
use img_compressor::progress::create_progress_spinner;
use img_compressor::shell::run_shell;
use img_compressor::{Controller, SessionOptions, SourceFile};
use std::io;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let args = Args::parse();
    set_quiet_mode(args.quiet);
    set_verbose_mode(args.verbose);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start the async runtime")?;

    match args.command {
        Commands::Compress {
            input,
            output_dir,
            rate,
            timeout,
        } => {
            let options = SessionOptions::new(rate, timeout)?;
            runtime.block_on(compress_file(&input, &output_dir, options))?;
        }
        Commands::Shell {
            output_dir,
            rate,
            timeout,
        } => {
            let options = SessionOptions::new(rate, timeout)?;
            runtime.block_on(interactive(output_dir, options))?;
        }
    }

    Ok(())
}

async fn compress_file(input: &Path, output_dir: &Path, options: SessionOptions) -> Result<()> {
    img_compressor::info!("🗜️  Compressing image: {:?}", input);
    img_compressor::info!("📁 Output directory: {:?}", output_dir);

    let mut controller = Controller::new(options);
    let file = SourceFile::from_path(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    controller.select_image(file)?;

    let pending = controller.start_compression()?;
    let pb = create_progress_spinner("Compressing...");
    let outcome = pending.wait().await;
    pb.finish_and_clear();
    controller
        .on_codec_result(outcome)
        .with_context(|| format!("Failed to compress {}", input.display()))?;

    img_compressor::info!("{}", controller.status());

    let download = controller.download()?;
    let path = download
        .save_to_dir(output_dir)
        .with_context(|| format!("Failed to save into {}", output_dir.display()))?;
    img_compressor::info!("{} Saved {}", SUCCESS_PREFIX, path.display());

    Ok(())
}

async fn interactive(output_dir: PathBuf, options: SessionOptions) -> Result<()> {
    let mut controller = Controller::new(options);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_shell(&mut controller, stdin.lock(), &mut stdout, &output_dir).await?;
    Ok(())
}
