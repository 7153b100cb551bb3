//! Line-oriented front-end that drives one session from text commands.
//!
//! Each command maps onto a single controller operation. A rejected command
//! is reported and the loop carries on with the session unchanged.

use crate::codec::Codec;
use crate::constants::SUCCESS_PREFIX;
use crate::controller::Controller;
use crate::error::{CompressionError, Result};
use crate::source::SourceFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

pub const PROMPT: &str = "img-compressor> ";

pub const HELP_TEXT: &str = "Commands:
  select <path>   Pick the image to compress
  rate <10-100>   Set the compression rate (higher means smaller and lossier)
  compress        Compress the selected image
  status          Show the current session
  save [dir]      Write the compressed image (default: the output directory)
  reset           Start over with a fresh session
  help            Show this message
  quit            Leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Select(PathBuf),
    Rate(i64),
    Compress,
    Status,
    Save(Option<PathBuf>),
    Reset,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Result<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match (word.to_lowercase().as_str(), rest) {
            ("select" | "open", path) if !path.is_empty() => Ok(ShellCommand::Select(PathBuf::from(path))),
            ("rate", value) => value
                .parse::<i64>()
                .map(ShellCommand::Rate)
                .map_err(|_| CompressionError::InvalidCommand(line.to_string())),
            ("compress", "") => Ok(ShellCommand::Compress),
            ("status", "") => Ok(ShellCommand::Status),
            ("save", "") => Ok(ShellCommand::Save(None)),
            ("save", dir) => Ok(ShellCommand::Save(Some(PathBuf::from(dir)))),
            ("reset", "") => Ok(ShellCommand::Reset),
            ("help" | "?", "") => Ok(ShellCommand::Help),
            ("quit" | "exit", "") => Ok(ShellCommand::Quit),
            _ => Err(CompressionError::InvalidCommand(line.to_string())),
        };
        Some(command)
    }
}

/// Runs commands from `input` until `quit` or end of input.
///
/// Command failures are written to `output` and do not stop the loop. Only
/// failures to read input or write output are returned.
pub async fn run_shell<C, R, W>(
    controller: &mut Controller<C>,
    input: R,
    output: &mut W,
    output_dir: &Path,
) -> Result<()>
where
    C: Codec + 'static,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", HELP_TEXT)?;
    write!(output, "{}", PROMPT)?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        match ShellCommand::parse(&line) {
            None => {}
            Some(Ok(ShellCommand::Quit)) => break,
            Some(Ok(command)) => {
                if let Err(e) = execute(controller, command, output, output_dir).await {
                    writeln!(output, "❌ {}", e)?;
                }
            }
            Some(Err(e)) => writeln!(output, "❌ {}", e)?,
        }
        write!(output, "{}", PROMPT)?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}

async fn execute<C, W>(
    controller: &mut Controller<C>,
    command: ShellCommand,
    output: &mut W,
    output_dir: &Path,
) -> Result<()>
where
    C: Codec + 'static,
    W: Write,
{
    match command {
        ShellCommand::Select(path) => {
            let file = SourceFile::from_path(&path)?;
            controller.select_image(file)?;
            writeln!(output, "{}", controller.status())?;
        }
        ShellCommand::Rate(value) => {
            let rate = controller.set_compression_rate(value)?;
            writeln!(output, "🎚️  Compression rate: {} (quality {})", rate, rate.quality())?;
        }
        ShellCommand::Compress => {
            writeln!(output, "🔄 Compressing...")?;
            controller.compress().await?;
            writeln!(output, "{} Compression complete", SUCCESS_PREFIX)?;
            writeln!(output, "{}", controller.status())?;
        }
        ShellCommand::Status => writeln!(output, "{}", controller.status())?,
        ShellCommand::Save(dir) => {
            let download = controller.download()?;
            let dir = dir.as_deref().unwrap_or(output_dir);
            let path = download.save_to_dir(dir)?;
            writeln!(output, "{} Saved {} ({} bytes)", SUCCESS_PREFIX, path.display(), download.len())?;
        }
        ShellCommand::Reset => {
            controller.reset();
            writeln!(output, "🔁 Session reset")?;
        }
        ShellCommand::Help => writeln!(output, "{}", HELP_TEXT)?,
        ShellCommand::Quit => {}
    }
    Ok(())
}
