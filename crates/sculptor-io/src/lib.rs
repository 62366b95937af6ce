use anyhow::{bail, Context, Result};
use blake3::Hasher;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use sculptor_geom::ShapeInstance;
use sculptor_materials::{ColorPalette, Material, MaterialRule};
use sculptor_rules::ShapeRule;
use sculptor_world::{CompletionReason, GenerationSettings, RuleBook, SculptureSession, Tuning};

pub const DOCUMENT_VERSION: u32 = 1;

/// Everything needed to regenerate or continue a sculpture, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SculptureDocument {
    pub version: u32,
    pub generation: GenerationSettings,
    /// Overrides for the simulation scalars; defaults when absent.
    pub tuning: Option<Tuning>,
    pub shape_rules: Vec<ShapeRule>,
    pub material_rules: Vec<MaterialRule>,
    pub palettes: Vec<ColorPalette>,
    pub shapes: Vec<ShapeInstance>,
    pub materials: Vec<Material>,
    pub camera_target: Vec3,
}

impl Default for SculptureDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            generation: GenerationSettings::default(),
            tuning: None,
            shape_rules: Vec::new(),
            material_rules: Vec::new(),
            palettes: Vec::new(),
            shapes: Vec::new(),
            materials: vec![Material::default()],
            camera_target: Vec3::ZERO,
        }
    }
}

impl SculptureDocument {
    /// A session holding this document's rules and current shapes.
    pub fn session(&self) -> SculptureSession {
        let rules = RuleBook {
            shapes: self.shape_rules.clone(),
            materials: self.material_rules.clone(),
            palettes: self.palettes.clone(),
        };
        let mut session =
            SculptureSession::new(self.generation.clone(), self.tuning.clone().unwrap_or_default(), rules);
        session.restore(self.shapes.clone(), self.materials.clone(), self.camera_target);
        session
    }

    /// Copies the session's shapes, materials and camera target back.
    pub fn absorb(&mut self, session: &SculptureSession) {
        self.shapes = session.shapes.clone();
        self.materials = session.materials.clone();
        self.camera_target = session.camera_target;
    }
}

/// Stable blake3 digest of the stored shapes and materials.
pub fn shapes_hash(doc: &SculptureDocument) -> Result<[u8; 32]> {
    let mut h = Hasher::new();
    h.update(b"SCULPTv1\0");
    h.update(&(doc.shapes.len() as u64).to_le_bytes());
    for s in &doc.shapes {
        let token = s.token.0.as_bytes();
        h.update(&(token.len() as u64).to_le_bytes());
        h.update(token);
        h.update(&[s.kind().code()]);
        h.update(&serde_json::to_vec(&s.dims).context("encode shape dims")?);
        for f in [s.position.x, s.position.y, s.position.z] {
            h.update(&f.to_le_bytes());
        }
        for f in [s.rotation.x, s.rotation.y, s.rotation.z, s.rotation.w] {
            h.update(&f.to_le_bytes());
        }
        h.update(&s.material.to_le_bytes());
    }
    h.update(&serde_json::to_vec(&doc.materials).context("encode materials")?);
    Ok(*h.finalize().as_bytes())
}

pub fn read_document(path: &Path) -> Result<SculptureDocument> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let doc: SculptureDocument =
        serde_json::from_str(&text).with_context(|| format!("parse sculpture document {}", path.display()))?;
    if doc.version > DOCUMENT_VERSION {
        bail!("{}: document version {} is newer than {}", path.display(), doc.version, DOCUMENT_VERSION);
    }
    Ok(doc)
}

/// Write `doc` as JSON at `out_path`. If `pretty=true`, pretty-print JSON.
pub fn write_document(doc: &SculptureDocument, out_path: &Path, pretty: bool) -> Result<()> {
    let json = if pretty { serde_json::to_string_pretty(doc)? } else { serde_json::to_string(doc)? };
    std::fs::write(out_path, json).with_context(|| format!("write {}", out_path.display()))?;
    Ok(())
}

/// Runs a base generation followed by `upgrades` upgrade generations and
/// stores the settled result in `doc`. Each run is capped at `max_frames` steps.
pub fn settle(doc: &mut SculptureDocument, upgrades: u32, max_frames: usize) -> Result<Vec<CompletionReason>> {
    let mut session = doc.session();
    let mut reasons = Vec::with_capacity(upgrades as usize + 1);

    let token = session.begin_base().context("start base generation")?;
    reasons.push(finish(&mut session, token, max_frames)?);
    for i in 0..upgrades {
        let token = session.begin_upgrade().with_context(|| format!("start upgrade {}", i + 1))?;
        reasons.push(finish(&mut session, token, max_frames)?);
    }

    doc.absorb(&session);
    Ok(reasons)
}

fn finish(session: &mut SculptureSession, token: sculptor_core::RunToken, max_frames: usize) -> Result<CompletionReason> {
    let result = session
        .run_to_completion(token, max_frames)
        .with_context(|| format!("simulate {token}"))?;
    match result.and_then(|r| r.reason) {
        Some(reason) => {
            log::info!("{token}: {reason:?}, {} shapes", session.shapes.len());
            Ok(reason)
        }
        None => bail!("{token} ended without a result"),
    }
}

/// Utility: hex-encode a 32-byte hash.
pub fn hex32(x: [u8; 32]) -> String { sculptor_core::hex(&x) }
