use clap::{Parser, Subcommand};
use color_eyre::eyre::{WrapErr, eyre};
use qrdecode::config::DEFAULT_BIND;
use qrdecode::{Limits, decode_image_bytes, format, server};
use rayon::prelude::*;
use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrdecode", version, about = "Decode barcodes and QR codes from images")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve `POST /decode` over HTTP
    Serve {
        #[arg(long, default_value_t = DEFAULT_BIND)]
        bind: SocketAddr,
    },
    /// Decode local image files and print their contents
    Decode {
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let limits = Limits::default();

    match cli.command {
        Command::Serve { bind } => {
            let runtime = tokio::runtime::Runtime::new().wrap_err("failed to start runtime")?;
            runtime
                .block_on(server::serve(bind, limits))
                .wrap_err_with(|| format!("server on {bind} failed"))?;
            Ok(())
        }
        Command::Decode { images } => decode_cmd(&images, &limits),
    }
}

fn decode_cmd(images: &[PathBuf], limits: &Limits) -> color_eyre::Result<()> {
    // Each file is an independent pipeline run
    let outcomes: Vec<(&Path, Result<Vec<String>, String>)> = images
        .par_iter()
        .map(|path| (path.as_path(), decode_file(path, limits)))
        .collect();

    let mut stdout = std::io::stdout().lock();
    let mut failed = 0usize;
    for (path, outcome) in outcomes {
        match outcome {
            Ok(texts) => {
                if images.len() > 1 {
                    writeln!(stdout, "# {}", path.display())?;
                }
                stdout.write_all(&format::render(&texts))?;
            }
            Err(err) => {
                failed += 1;
                tracing::warn!(path = %path.display(), "{err}");
            }
        }
    }

    if failed > 0 {
        return Err(eyre!("{failed} of {} images could not be decoded", images.len()));
    }
    Ok(())
}

fn decode_file(path: &Path, limits: &Limits) -> Result<Vec<String>, String> {
    let bytes = std::fs::read(path).map_err(|err| format!("failed to read file: {err}"))?;
    decode_image_bytes(&bytes, limits).map_err(|err| err.to_string())
}
