//! Command-line interface for applying the line boil effect to image files

use crate::algorithm::executor::{EffectParameters, LineBoil};
use crate::io::animation::OutputTarget;
use crate::io::color::parse_hex_color;
use crate::io::configuration::{
    DEFAULT_AMPLITUDE_PERCENT, DEFAULT_BACKGROUND, DEFAULT_FRAME_COUNT,
    DEFAULT_FRAMES_PER_SECOND, DEFAULT_SEED, DEFAULT_SIGMA, MAX_AMPLITUDE_PERCENT,
    MAX_FRAME_COUNT, MAX_FRAMES_PER_SECOND, MAX_SEED, MAX_SIGMA, MIN_AMPLITUDE_PERCENT,
    MIN_FRAME_COUNT, MIN_FRAMES_PER_SECOND, MIN_SIGMA, OUTPUT_EXTENSION, OUTPUT_SUFFIX,
    SUPPORTED_EXTENSIONS,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::load_source_image;
use crate::io::progress::ProgressManager;
use clap::Parser;
use image::Rgb;
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "lineboil")]
#[command(
    author,
    version,
    about = "Turn still line art into a looping line boil GIF"
)]
/// Command-line arguments for the line boil tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image file or directory of images to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed (0 = different wobble on every run)
    #[arg(short, long, default_value_t = DEFAULT_SEED,
          value_parser = clap::value_parser!(u64).range(0..=MAX_SEED))]
    pub seed: u64,

    /// Maximum displacement as a percentage of image width
    #[arg(short, long, default_value_t = DEFAULT_AMPLITUDE_PERCENT, value_parser = parse_amplitude)]
    pub amplitude: f64,

    /// Smoothness of the wobble (Gaussian sigma in pixels)
    #[arg(long, default_value_t = DEFAULT_SIGMA, value_parser = parse_sigma)]
    pub sigma: f64,

    /// Number of frames in the loop
    #[arg(short, long, default_value_t = DEFAULT_FRAME_COUNT,
          value_parser = clap::value_parser!(u32)
              .range(i64::from(MIN_FRAME_COUNT)..=i64::from(MAX_FRAME_COUNT)))]
    pub frames: u32,

    /// Playback rate in frames per second
    #[arg(short = 'r', long, default_value_t = DEFAULT_FRAMES_PER_SECOND,
          value_parser = clap::value_parser!(u32)
              .range(i64::from(MIN_FRAMES_PER_SECOND)..=i64::from(MAX_FRAMES_PER_SECOND)))]
    pub fps: u32,

    /// Background color for transparent areas, as hex RGB
    #[arg(short, long, default_value = DEFAULT_BACKGROUND, value_parser = parse_background)]
    pub background: Rgb<u8>,

    /// Output GIF path (single input only)
    #[arg(short, long, conflicts_with = "temp")]
    pub output: Option<PathBuf>,

    /// Write uniquely named GIFs to the system temp directory and print their paths
    #[arg(short, long)]
    pub temp: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Effect parameters described by the arguments
    pub const fn parameters(&self) -> EffectParameters {
        EffectParameters {
            amplitude_percent: self.amplitude,
            sigma: self.sigma,
            frame_count: self.frames,
            frames_per_second: self.fps,
            seed: self.seed,
            background: self.background,
        }
    }
}

fn parse_bounded_float(text: &str, min: f64, max: f64) -> std::result::Result<f64, String> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|e| format!("'{text}' is not a number: {e}"))?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in {min}..={max}"))
    }
}

fn parse_amplitude(text: &str) -> std::result::Result<f64, String> {
    parse_bounded_float(text, MIN_AMPLITUDE_PERCENT, MAX_AMPLITUDE_PERCENT)
}

fn parse_sigma(text: &str) -> std::result::Result<f64, String> {
    parse_bounded_float(text, MIN_SIGMA, MAX_SIGMA)
}

fn parse_background(text: &str) -> std::result::Result<Rgb<u8>, String> {
    parse_hex_color(text).map_err(|e| e.to_string())
}

/// Orchestrates batch processing of image files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// Returns the paths of the animations written.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<Vec<PathBuf>> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(Vec::new());
        }

        if self.cli.output.is_some() && files.len() > 1 {
            return Err(invalid_parameter(
                "output",
                &self.cli.target.display(),
                &"--output needs a single input file",
            ));
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut written = Vec::with_capacity(files.len());
        for file in &files {
            match self.process_file(file) {
                Ok(path) => written.push(path),
                Err(e) => {
                    if let Some(ref mut pm) = self.progress_manager {
                        pm.clear();
                    }
                    return Err(e);
                }
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(written)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if is_supported_image(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &self.cli.target.display(),
                    &format!("must be one of: {}", SUPPORTED_EXTENSIONS.join(", ")),
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if path.is_file() && is_supported_image(&path) && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"must be an image file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if self.cli.temp || !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path(input_path);
        if output_path.exists() {
            info!("skipping {} (output exists)", input_path.display());
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    // Allow print so the written path can be piped into other tools
    #[allow(clippy::print_stdout)]
    fn process_file(&mut self, input_path: &Path) -> Result<PathBuf> {
        let start_time = Instant::now();
        let parameters = self.cli.parameters();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(input_path, parameters.frame_count);
        }

        let source = load_source_image(input_path)?;
        let boil = LineBoil::new(source, parameters)?;

        let target = if self.cli.temp {
            OutputTarget::Temporary
        } else {
            OutputTarget::File(self.output_path(input_path))
        };

        let progress = self.progress_manager.as_ref();
        let output_path = boil.render_to(target, |frames_done| {
            if let Some(pm) = progress {
                pm.update_frame(frames_done);
            }
        })?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(start_time.elapsed());
        }

        if self.cli.temp {
            println!("{}", output_path.display());
        }

        Ok(output_path)
    }

    fn output_path(&self, input_path: &Path) -> PathBuf {
        self.cli
            .output
            .clone()
            .unwrap_or_else(|| Self::get_output_path(input_path))
    }

    /// Default output location: `<stem>_boil.gif` beside the input
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            OUTPUT_EXTENSION
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

/// Whether the file extension names a supported input format
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}
