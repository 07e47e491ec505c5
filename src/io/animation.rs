//! Looping GIF encoding with staged, all-or-nothing output files

use crate::io::configuration::{OUTPUT_EXTENSION, OUTPUT_PREFIX, QUANTIZATION_SPEED};
use crate::io::error::{AlgorithmError, Result, dimension_mismatch, invalid_parameter};
use image::RgbImage;
use log::{debug, info};
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Where a finished animation should end up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// A uniquely named file in the system temporary directory
    Temporary,
    /// A uniquely named file in the given directory
    TemporaryIn(PathBuf),
    /// An exact path, replaced if it already exists
    File(PathBuf),
}

impl OutputTarget {
    fn directory(&self) -> PathBuf {
        match self {
            Self::Temporary => std::env::temp_dir(),
            Self::TemporaryIn(dir) => dir.clone(),
            Self::File(path) => path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        }
    }

    // Staging names for exact paths stay hidden until persisted
    fn staging_affixes(&self) -> (String, String) {
        match self {
            Self::Temporary | Self::TemporaryIn(_) => {
                (OUTPUT_PREFIX.to_string(), format!(".{OUTPUT_EXTENSION}"))
            }
            Self::File(path) => {
                let stem = path.file_stem().unwrap_or_default().to_string_lossy();
                (format!(".{stem}."), ".partial".to_string())
            }
        }
    }
}

/// Display duration of one frame in whole milliseconds, `round(1000 / fps)`
///
/// GIF timing is coarser; see [`delay_centiseconds`].
///
/// # Errors
///
/// Returns an error if `frames_per_second` is zero
pub fn frame_duration_ms(frames_per_second: u32) -> Result<u32> {
    if frames_per_second == 0 {
        return Err(invalid_parameter(
            "frames_per_second",
            &frames_per_second,
            &"must be greater than zero",
        ));
    }
    Ok((1000 + frames_per_second / 2) / frames_per_second)
}

/// GIF delays are stored in hundredths of a second
///
/// Never returns 0: viewers replace a zero delay with their own default, so
/// rates above 200 fps play at the fastest storable rate of 100 fps instead.
pub fn delay_centiseconds(duration_ms: u32) -> u16 {
    u16::try_from(duration_ms.saturating_add(5) / 10)
        .unwrap_or(u16::MAX)
        .max(1)
}

/// Streams frames into a looping GIF and publishes it only when complete
///
/// Frames are written to a staging file next to the destination. Until
/// [`AnimationEncoder::finish`] succeeds nothing is visible under the final
/// name, and dropping the encoder removes the staging file.
pub struct AnimationEncoder {
    encoder: gif::Encoder<BufWriter<NamedTempFile>>,
    target: OutputTarget,
    staging_path: PathBuf,
    dimensions: (u32, u32),
    delay: u16,
    frames_written: usize,
}

impl AnimationEncoder {
    /// Open a staging file for a `width` x `height` animation
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero or exceeds the GIF limit of 65535
    /// - `frames_per_second` is zero
    /// - The destination directory cannot be created or written
    /// - The GIF header cannot be written
    pub fn create(
        target: OutputTarget,
        width: u32,
        height: u32,
        frames_per_second: u32,
    ) -> Result<Self> {
        let (gif_width, gif_height) = gif_dimensions(width, height)?;
        let delay = delay_centiseconds(frame_duration_ms(frames_per_second)?);

        let directory = target.directory();
        fs::create_dir_all(&directory).map_err(|e| AlgorithmError::FileSystem {
            path: directory.clone(),
            operation: "create directory",
            source: e,
        })?;

        let (prefix, suffix) = target.staging_affixes();
        let staging = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(&suffix)
            .tempfile_in(&directory)
            .map_err(|e| AlgorithmError::FileSystem {
                path: directory.clone(),
                operation: "create file",
                source: e,
            })?;
        let staging_path = staging.path().to_path_buf();

        let mut encoder = gif::Encoder::new(BufWriter::new(staging), gif_width, gif_height, &[])
            .map_err(|e| AlgorithmError::AnimationEncode {
                path: staging_path.clone(),
                source: e,
            })?;
        encoder
            .set_repeat(gif::Repeat::Infinite)
            .map_err(|e| AlgorithmError::AnimationEncode {
                path: staging_path.clone(),
                source: e,
            })?;

        debug!(
            "staging {width}x{height} animation at {} ({} cs per frame)",
            staging_path.display(),
            delay
        );

        Ok(Self {
            encoder,
            target,
            staging_path,
            dimensions: (width, height),
            delay,
            frames_written: 0,
        })
    }

    /// Append one opaque frame
    ///
    /// Each frame replaces the previous one entirely: it is shown for the
    /// shared duration and then restored to background.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame size differs from the animation size or
    /// the frame cannot be written
    pub fn push_frame(&mut self, frame: &RgbImage) -> Result<()> {
        if frame.dimensions() != self.dimensions {
            return Err(dimension_mismatch(
                "animation encoder",
                self.dimensions,
                frame.dimensions(),
            ));
        }

        let (width, height) = gif_dimensions(frame.width(), frame.height())?;
        let mut gif_frame =
            gif::Frame::from_rgb_speed(width, height, frame.as_raw(), QUANTIZATION_SPEED);
        gif_frame.delay = self.delay;
        gif_frame.dispose = gif::DisposalMethod::Background;

        self.encoder
            .write_frame(&gif_frame)
            .map_err(|e| AlgorithmError::AnimationEncode {
                path: self.staging_path.clone(),
                source: e,
            })?;
        self.frames_written += 1;
        Ok(())
    }

    /// Number of frames appended so far
    pub const fn frames_written(&self) -> usize {
        self.frames_written
    }

    /// Animation size as (width, height)
    pub const fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    /// Write the trailer and move the file to its final location
    ///
    /// # Errors
    ///
    /// Returns an error if no frames were appended, or if the file cannot be
    /// flushed or moved into place. The staging file is removed on failure.
    pub fn finish(self) -> Result<PathBuf> {
        if self.frames_written == 0 {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "No frames to encode".to_string(),
            });
        }

        let staging_path = self.staging_path;
        let writer = self
            .encoder
            .into_inner()
            .map_err(|e| AlgorithmError::FileSystem {
                path: staging_path.clone(),
                operation: "write trailer",
                source: e,
            })?;
        let staging = writer
            .into_inner()
            .map_err(|e| AlgorithmError::FileSystem {
                path: staging_path.clone(),
                operation: "flush",
                source: e.into_error(),
            })?;

        let output_path = match self.target {
            OutputTarget::Temporary | OutputTarget::TemporaryIn(_) => {
                let (_, path) = staging.keep().map_err(|e| AlgorithmError::FileSystem {
                    path: staging_path.clone(),
                    operation: "keep file",
                    source: e.error,
                })?;
                path
            }
            OutputTarget::File(path) => {
                staging
                    .persist(&path)
                    .map_err(|e| AlgorithmError::FileSystem {
                        path: path.clone(),
                        operation: "persist file",
                        source: e.error,
                    })?;
                path
            }
        };

        info!(
            "wrote {} frame animation to {}",
            self.frames_written,
            output_path.display()
        );
        Ok(output_path)
    }
}

/// Encode a complete frame sequence in one call
///
/// # Errors
///
/// Returns an error if the sequence is empty, the frames differ in size, or
/// the animation cannot be written
pub fn save_animation(
    frames: &[RgbImage],
    frames_per_second: u32,
    target: OutputTarget,
) -> Result<PathBuf> {
    let first = frames.first().ok_or_else(|| AlgorithmError::InvalidSourceData {
        reason: "No frames to encode".to_string(),
    })?;

    let mut encoder =
        AnimationEncoder::create(target, first.width(), first.height(), frames_per_second)?;
    for frame in frames {
        encoder.push_frame(frame)?;
    }
    encoder.finish()
}

fn gif_dimensions(width: u32, height: u32) -> Result<(u16, u16)> {
    let fits = |value: u32| u16::try_from(value).ok().filter(|&v| v > 0);
    match (fits(width), fits(height)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(invalid_parameter(
            "dimensions",
            &format!("{width}x{height}"),
            &"GIF frames must be between 1 and 65535 pixels on each side",
        )),
    }
}
