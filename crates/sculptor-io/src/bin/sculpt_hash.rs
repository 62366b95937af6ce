use std::path::PathBuf;
use anyhow::Result;
use clap::{ArgAction, Parser};
use sculptor_io::{hex32, read_document, shapes_hash};

#[derive(Parser, Debug)]
#[command(name = "sculpt_hash", version, about = "Print a blake3 digest of a sculpture's stored shapes")]
struct Opts {
    /// Sculpture document (.json)
    input: PathBuf,

    /// Also write the digest next to the input as <input>.blake3
    #[arg(long, action = ArgAction::SetTrue)]
    write: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let opts = Opts::parse();
    let doc = read_document(&opts.input)?;
    let hex = hex32(shapes_hash(&doc)?);

    if opts.write {
        let mut hash_path = opts.input.clone();
        hash_path.set_extension("blake3");
        std::fs::write(&hash_path, format!("{hex}\n"))?;
    }
    println!("{hex}  {}", opts.input.display());
    Ok(())
}
