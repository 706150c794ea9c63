//! Camera stand-ins.
//!
//! The game reads one frame per tick from a [`FrameSource`]. Frames come from
//! image files on disk, which lets an external capture tool (or a test) feed
//! the game by overwriting a file or filling a directory.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use anyhow::Context as _;
use image::{RgbImage, imageops};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

pub trait FrameSource: fmt::Debug {
    /// Returns the current frame.
    ///
    /// An error means no frame is available this tick; the caller may retry on
    /// the next one.
    fn next_frame(&mut self) -> anyhow::Result<RgbImage>;
}

fn load_image(path: &Path) -> anyhow::Result<RgbImage> {
    let image = image::open(path)
        .with_context(|| format!("Failed to decode frame: {}", path.display()))?;
    Ok(image.into_rgb8())
}

/// Reads frames from a single image file.
///
/// The file is decoded again only when its modification time changes.
#[derive(Debug)]
pub struct FileFrameSource {
    path: PathBuf,
    cached: Option<(SystemTime, RgbImage)>,
}

impl FileFrameSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: None,
        }
    }
}

impl FrameSource for FileFrameSource {
    fn next_frame(&mut self) -> anyhow::Result<RgbImage> {
        let modified = fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .with_context(|| format!("Failed to stat frame: {}", self.path.display()))?;
        if let Some((at, frame)) = &self.cached
            && *at == modified
        {
            return Ok(frame.clone());
        }
        let frame = load_image(&self.path)?;
        log::debug!("reloaded frame {}", self.path.display());
        self.cached = Some((modified, frame.clone()));
        Ok(frame)
    }
}

/// Cycles through the images of a directory in file name order.
#[derive(Debug)]
pub struct DirectoryFrameSource {
    paths: Vec<PathBuf>,
    ticks_per_image: u64,
    tick: u64,
    cached: Option<(usize, RgbImage)>,
}

impl DirectoryFrameSource {
    pub fn open(dir: &Path, ticks_per_image: u64) -> anyhow::Result<Self> {
        let mut paths = vec![];
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
            if is_image {
                paths.push(path);
            }
        }
        anyhow::ensure!(!paths.is_empty(), "no images in {}", dir.display());
        paths.sort();
        log::info!("cycling {} frames from {}", paths.len(), dir.display());
        Ok(Self {
            paths,
            ticks_per_image: ticks_per_image.max(1),
            tick: 0,
            cached: None,
        })
    }

    fn current_index(&self) -> usize {
        let step = self.tick / self.ticks_per_image;
        usize::try_from(step % self.paths.len() as u64).unwrap_or(0)
    }
}

impl FrameSource for DirectoryFrameSource {
    fn next_frame(&mut self) -> anyhow::Result<RgbImage> {
        let index = self.current_index();
        self.tick += 1;
        if let Some((cached, frame)) = &self.cached
            && *cached == index
        {
            return Ok(frame.clone());
        }
        let frame = load_image(&self.paths[index])?;
        self.cached = Some((index, frame.clone()));
        Ok(frame)
    }
}

/// Square region of interest where the player holds their hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roi {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

impl Roi {
    pub const DEFAULT: Self = Self {
        x: 50,
        y: 100,
        size: 250,
    };

    /// Returns `(x, y, width, height)` of the part of the region inside a
    /// `width` x `height` frame, or `None` if nothing of it is visible.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x = self.x.min(width);
        let y = self.y.min(height);
        let w = self.size.min(width - x);
        let h = self.size.min(height - y);
        (w > 0 && h > 0).then_some((x, y, w, h))
    }
}

/// Turns raw frames into what the game sees.
#[derive(Debug, Clone, Copy)]
pub struct RegionSampler {
    pub roi: Roi,
    pub mirror: bool,
}

impl RegionSampler {
    /// Applies mirroring to a raw frame.
    pub fn prepare(&self, mut frame: RgbImage) -> RgbImage {
        if self.mirror {
            imageops::flip_horizontal_in_place(&mut frame);
        }
        frame
    }

    /// Crops the region of interest out of a prepared frame.
    pub fn region(&self, frame: &RgbImage) -> Option<RgbImage> {
        let (x, y, w, h) = self.roi.clamp_to(frame.width(), frame.height())?;
        Some(imageops::crop_imm(frame, x, y, w, h).to_image())
    }
}
