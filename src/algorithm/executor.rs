//! Frame-by-frame line boil pipeline and the one-call animation entry point

use crate::algorithm::composite::flatten_onto;
use crate::algorithm::displacement::DisplacementGenerator;
use crate::algorithm::random::NoiseSource;
use crate::algorithm::resample::warp;
use crate::io::animation::{AnimationEncoder, OutputTarget, frame_duration_ms};
use crate::io::configuration::{
    DEFAULT_AMPLITUDE_PERCENT, DEFAULT_FRAME_COUNT, DEFAULT_FRAMES_PER_SECOND, DEFAULT_SEED,
    DEFAULT_SIGMA, MIN_FRAME_COUNT,
};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::math::gaussian::check_sigma;
use crate::spatial::DisplacementField;
use image::{Rgb, RgbImage, RgbaImage};
use log::debug;
use std::path::PathBuf;

/// Effect parameters controlling the jitter and the output timing
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectParameters {
    /// Displacement scale as a percentage of image width
    pub amplitude_percent: f64,
    /// Standard deviation of the smoothing kernel in pixels
    pub sigma: f64,
    /// Number of frames in the loop
    pub frame_count: u32,
    /// Playback rate
    pub frames_per_second: u32,
    /// Noise seed, 0 for a different result on every run
    pub seed: u64,
    /// Opaque color shown wherever the warped image is transparent
    pub background: Rgb<u8>,
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self {
            amplitude_percent: DEFAULT_AMPLITUDE_PERCENT,
            sigma: DEFAULT_SIGMA,
            frame_count: DEFAULT_FRAME_COUNT,
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
            seed: DEFAULT_SEED,
            background: Rgb([255, 255, 255]),
        }
    }
}

impl EffectParameters {
    /// Check the preconditions every pipeline stage relies on
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amplitude_percent` is negative or not finite
    /// - `sigma` is not a finite positive number, or too large for a kernel
    /// - `frame_count` is below 2
    /// - `frames_per_second` is zero
    pub fn validate(&self) -> Result<()> {
        if !self.amplitude_percent.is_finite() || self.amplitude_percent < 0.0 {
            return Err(invalid_parameter(
                "amplitude_percent",
                &self.amplitude_percent,
                &"must be a finite non-negative percentage",
            ));
        }
        check_sigma(self.sigma)?;
        if self.frame_count < MIN_FRAME_COUNT {
            return Err(invalid_parameter(
                "frame_count",
                &self.frame_count,
                &format!("a loop needs at least {MIN_FRAME_COUNT} frames"),
            ));
        }
        frame_duration_ms(self.frames_per_second)?;
        Ok(())
    }

    /// Displacement amplitude in pixels for an image of the given width
    pub fn amplitude_pixels(&self, width: u32) -> f64 {
        f64::from(width) * self.amplitude_percent / 100.0
    }

    /// Per-frame display duration in milliseconds
    ///
    /// # Errors
    ///
    /// Returns an error if `frames_per_second` is zero
    pub fn frame_duration_ms(&self) -> Result<u32> {
        frame_duration_ms(self.frames_per_second)
    }
}

/// Line boil pipeline over a single source image
///
/// Owns the noise source for the whole animation, so frames must be rendered
/// in order for a fixed seed to reproduce the same output.
pub struct LineBoil {
    source: RgbaImage,
    parameters: EffectParameters,
    generator: DisplacementGenerator,
    noise: NoiseSource,
    frames_rendered: u32,
}

impl LineBoil {
    /// Prepare a pipeline whose noise is seeded from `parameters.seed`
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or the image is empty
    pub fn new(source: RgbaImage, parameters: EffectParameters) -> Result<Self> {
        let noise = NoiseSource::from_seed(parameters.seed);
        Self::with_noise_source(source, parameters, noise)
    }

    /// Prepare a pipeline drawing from an explicit noise source
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or the image is empty
    pub fn with_noise_source(
        source: RgbaImage,
        parameters: EffectParameters,
        noise: NoiseSource,
    ) -> Result<Self> {
        parameters.validate()?;
        let (width, height) = source.dimensions();
        if width == 0 || height == 0 {
            return Err(AlgorithmError::InvalidSourceData {
                reason: format!("source image is {width}x{height}"),
            });
        }

        let generator = DisplacementGenerator::new(
            width,
            height,
            parameters.sigma,
            parameters.amplitude_pixels(width),
        )?;

        Ok(Self {
            source,
            parameters,
            generator,
            noise,
            frames_rendered: 0,
        })
    }

    /// Parameters this pipeline was built with
    pub const fn parameters(&self) -> &EffectParameters {
        &self.parameters
    }

    /// Source image size as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.source.dimensions()
    }

    /// Frames produced so far
    pub const fn frames_rendered(&self) -> u32 {
        self.frames_rendered
    }

    /// Whether the configured number of frames has been produced
    pub const fn is_complete(&self) -> bool {
        self.frames_rendered >= self.parameters.frame_count
    }

    /// Draw the next displacement field without rendering
    ///
    /// # Errors
    ///
    /// Propagates field construction errors
    pub fn next_field(&mut self) -> Result<DisplacementField> {
        self.generator.generate(&mut self.noise)
    }

    /// Render the next frame up to the resampling stage, still transparent
    ///
    /// # Errors
    ///
    /// Propagates field generation and resampling errors
    pub fn render_warped_frame(&mut self) -> Result<RgbaImage> {
        let field = self.next_field()?;
        let warped = warp(&self.source, &field)?;
        self.frames_rendered += 1;
        debug!(
            "frame {}/{}: max displacement {:.3} px",
            self.frames_rendered,
            self.parameters.frame_count,
            field.max_magnitude()
        );
        Ok(warped)
    }

    /// Render the next frame flattened onto the background
    ///
    /// # Errors
    ///
    /// Propagates field generation and resampling errors
    pub fn render_frame(&mut self) -> Result<RgbImage> {
        let warped = self.render_warped_frame()?;
        Ok(flatten_onto(&warped, self.parameters.background))
    }

    /// Render every remaining frame into `target` and return the file path
    ///
    /// `on_frame` is called with the number of frames finished after each one.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the animation cannot be written.
    /// No file is left at the destination on failure.
    pub fn render_to(
        mut self,
        target: OutputTarget,
        mut on_frame: impl FnMut(u32),
    ) -> Result<PathBuf> {
        let (width, height) = self.dimensions();
        let mut encoder =
            AnimationEncoder::create(target, width, height, self.parameters.frames_per_second)?;

        while !self.is_complete() {
            let frame = self.render_frame()?;
            encoder.push_frame(&frame)?;
            on_frame(self.frames_rendered);
        }

        encoder.finish()
    }
}

/// Apply the line boil effect and write a looping GIF to the temporary directory
///
/// Each call gets a freshly named file, independent of the seed, so concurrent
/// or repeated calls never overwrite one another. Removing the file is left to
/// the caller.
///
/// # Errors
///
/// Returns an error if the parameters are invalid, the image is empty, or the
/// animation cannot be written
pub fn generate_ripple_animation(
    image: &RgbaImage,
    parameters: &EffectParameters,
) -> Result<PathBuf> {
    LineBoil::new(image.clone(), *parameters)?.render_to(OutputTarget::Temporary, |_| {})
}
