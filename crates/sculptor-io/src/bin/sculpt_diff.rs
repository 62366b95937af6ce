use std::{path::PathBuf, process::ExitCode};
use anyhow::Result;
use clap::Parser;
use sculptor_io::read_document;

#[derive(Parser, Debug)]
#[command(name = "sculpt_diff", version, about = "Diff the stored shapes of two sculpture documents")]
struct Opts {
    /// Left document
    left: PathBuf,
    /// Right document
    right: PathBuf,
    /// Epsilon for position and rotation differences (abs)
    #[arg(long, default_value_t = 1.0e-5)]
    eps: f32,
    /// Max differences to print before truncating
    #[arg(long, default_value_t = 50)]
    max: usize,
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(true) => ExitCode::from(0),
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<bool> {
    let opts = Opts::parse();
    let l = read_document(&opts.left)?;
    let r = read_document(&opts.right)?;
    log::debug!("comparing {} shapes against {}", l.shapes.len(), r.shapes.len());

    let mut diffs = Vec::<String>::new();
    if l.shapes.len() != r.shapes.len() {
        diffs.push(format!("shape count: {} vs {}", l.shapes.len(), r.shapes.len()));
    }
    if l.materials.len() != r.materials.len() {
        diffs.push(format!("material count: {} vs {}", l.materials.len(), r.materials.len()));
    }

    for (i, (ls, rs)) in l.shapes.iter().zip(&r.shapes).enumerate() {
        if ls.token != rs.token {
            diffs.push(format!("[{i}] token: {} vs {}", ls.token, rs.token));
        }
        if ls.dims != rs.dims {
            diffs.push(format!("[{i}] dims: {:?} vs {:?}", ls.dims, rs.dims));
        }
        let dp = (ls.position - rs.position).abs().max_element();
        if dp > opts.eps {
            diffs.push(format!("[{i}] position max|d| = {dp:.6} > eps {:.6}", opts.eps));
        }
        // q and -q are the same orientation.
        let dq = 1.0 - ls.rotation.dot(rs.rotation).abs();
        if dq > opts.eps {
            diffs.push(format!("[{i}] rotation 1-|dot| = {dq:.6} > eps {:.6}", opts.eps));
        }
        if ls.material != rs.material {
            diffs.push(format!("[{i}] material: {} vs {}", ls.material, rs.material));
        }
        if diffs.len() >= opts.max {
            break;
        }
    }

    if diffs.is_empty() {
        println!("OK: {} shapes equal within eps", l.shapes.len());
        return Ok(true);
    }
    println!("DIFF (showing up to {}):", opts.max);
    for d in diffs.iter().take(opts.max) {
        println!("  - {d}");
    }
    Ok(false)
}
