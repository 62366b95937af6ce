use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use sculptor_io::{hex32, read_document, settle, shapes_hash, write_document};

#[derive(Parser, Debug)]
#[command(name = "sculpt_make", version, about = "Generate and settle a sculpture from a rules document")]
struct Opts {
    /// Sculpture document (.json) with rules and generation settings
    input: PathBuf,

    /// Upgrade generations to run after the base
    #[arg(long, default_value_t = 0)]
    upgrades: u32,

    /// Output path (default: <input_stem>.settled.json next to input)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pretty-print JSON
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,

    /// Step cap per simulation run
    #[arg(long, default_value_t = 20_000)]
    max_frames: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let mut doc = read_document(&opts.input)?;
    let reasons = settle(&mut doc, opts.upgrades, opts.max_frames)
        .with_context(|| format!("settle {}", opts.input.display()))?;

    let out = match &opts.out {
        Some(p) => p.clone(),
        None => {
            let stem = opts.input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_else(|| "sculpture".into());
            opts.input.with_file_name(format!("{stem}.settled.json"))
        }
    };
    write_document(&doc, &out, opts.pretty)?;

    println!("Sculpture: {}", out.display());
    println!("Shapes:    {}", doc.shapes.len());
    println!("Runs:      {reasons:?}");
    println!("Camera Y:  {:.4}", doc.camera_target.y);
    println!("Hash:      {}", hex32(shapes_hash(&doc)?));
    Ok(())
}
