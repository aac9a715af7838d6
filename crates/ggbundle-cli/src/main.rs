//! ggbundle command-line tool
//!
//! Packs a server executable and a model file into a single self-contained
//! executable. The result still runs as the original server binary (the OS
//! loader ignores the trailing bytes); a cooperating runtime locates the
//! embedded model through the 20-byte trailer at the end of the file.

use clap::Parser;
use ggbundle_core::bundle;
use std::path::PathBuf;

mod output;

use output::StyledOutput;

#[derive(Parser)]
#[command(name = "ggbundle")]
#[command(about = "Bundle a server executable and a model file into a single binary", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the server executable
    #[arg(long)]
    server: PathBuf,

    /// Path to the model file to embed
    #[arg(long)]
    model: PathBuf,

    /// Path for the output bundled executable
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut styled = StyledOutput::new();

    println!(
        "Bundling {} + {} -> {}",
        cli.server.display(),
        cli.model.display(),
        cli.out.display()
    );

    let report = bundle(&cli.server, &cli.model, &cli.out)?;

    println!("Server size: {} bytes", report.server_size);
    println!("Model size: {} bytes", report.payload_size);
    println!("Model offset: {}", report.payload_offset);
    styled.success(&format!(
        "Successfully created bundled executable: {} ({} bytes)",
        cli.out.display(),
        report.bundle_size()
    ));

    Ok(())
}
