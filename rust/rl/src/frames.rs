use anyhow::{anyhow, Context, Result};
use gridworld::RenderFrame;
use image::RgbImage;
use std::path::{Path, PathBuf};

/// Writes `rgb_array` frames as numbered PNG files.
pub struct FrameWriter {
    dir: PathBuf,
    written: usize,
}

impl FrameWriter {
    pub fn create(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create frame directory {}", dir.display()))?;

        Ok(Self {
            dir: dir.to_path_buf(),
            written: 0,
        })
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn write(&mut self, frame: &RenderFrame, episode: usize, step: usize) -> Result<PathBuf> {
        let image = to_image(frame)?;
        let path = self.dir.join(format!("ep{episode:03}_step{step:04}.png"));
        image
            .save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        self.written += 1;

        Ok(path)
    }
}

pub fn to_image(frame: &RenderFrame) -> Result<RgbImage> {
    let pixels = frame
        .as_rgb()
        .ok_or_else(|| anyhow!("frame is not an rgb array"))?;
    let (rows, cols) = (pixels.shape()[0], pixels.shape()[1]);
    let data = pixels.iter().copied().collect::<Vec<u8>>();

    RgbImage::from_raw(cols as u32, rows as u32, data)
        .ok_or_else(|| anyhow!("frame buffer does not match {cols}x{rows}"))
}
