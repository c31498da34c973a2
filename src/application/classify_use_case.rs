// ============================================================
// Layer 2 — Classify Use Case
// ============================================================
// Loads the best checkpoint of a previous `train` run and
// labels free text with it.

use anyhow::Result;

use crate::infra::checkpoint::CheckpointManager;
use crate::ml::inferencer::{Classification, Inferencer};

pub struct ClassifyUseCase {
    inferencer: Inferencer,
}

impl ClassifyUseCase {
    pub fn new(checkpoint_dir: &str) -> Result<Self> {
        let ckpt       = CheckpointManager::new(checkpoint_dir)?;
        let inferencer = Inferencer::from_checkpoint(&ckpt)?;
        Ok(Self { inferencer })
    }

    pub fn classify(&self, text: &str) -> Result<Classification> {
        let text = text.trim();
        if text.is_empty() {
            anyhow::bail!("Nothing to classify: the text is empty");
        }
        self.inferencer.classify(text)
    }
}
