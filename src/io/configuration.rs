//! Effect constants and runtime configuration defaults

// Default values for configurable parameters
/// Seed used when none is given (0 draws fresh entropy on every run)
pub const DEFAULT_SEED: u64 = 0;
/// Default displacement amplitude as a percentage of image width
pub const DEFAULT_AMPLITUDE_PERCENT: f64 = 3.0;
/// Default Gaussian smoothing sigma in pixels
pub const DEFAULT_SIGMA: f64 = 5.0;
/// Default number of frames in the loop
pub const DEFAULT_FRAME_COUNT: u32 = 8;
/// Default playback rate
pub const DEFAULT_FRAMES_PER_SECOND: u32 = 12;
/// Default compositing background
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";

// Ranges exposed by the interactive controls
/// Largest seed offered by the controls
pub const MAX_SEED: u64 = 9999;
/// Smallest amplitude percentage offered by the controls
pub const MIN_AMPLITUDE_PERCENT: f64 = 0.0;
/// Largest amplitude percentage offered by the controls
pub const MAX_AMPLITUDE_PERCENT: f64 = 10.0;
/// Smallest sigma offered by the controls
pub const MIN_SIGMA: f64 = 1.0;
/// Largest sigma offered by the controls
pub const MAX_SIGMA: f64 = 15.0;
/// Fewest frames a loop may have
pub const MIN_FRAME_COUNT: u32 = 2;
/// Most frames offered by the controls
pub const MAX_FRAME_COUNT: u32 = 24;
/// Slowest playback rate offered by the controls
pub const MIN_FRAMES_PER_SECOND: u32 = 6;
/// Fastest playback rate offered by the controls
pub const MAX_FRAMES_PER_SECOND: u32 = 30;

// Smoothing kernel sizing, float-image convention: ksize = round(2 * extent * sigma + 1) | 1
/// Kernel half-width measured in standard deviations
pub const KERNEL_SIGMA_EXTENT: f64 = 4.0;
/// Largest kernel radius accepted, reached at a sigma of about 1024
pub const MAX_KERNEL_RADIUS: usize = 4096;

// Output settings
/// Prefix for animations written to the temporary directory
pub const OUTPUT_PREFIX: &str = "line_boil_";
/// Suffix added to output filenames produced next to their source
pub const OUTPUT_SUFFIX: &str = "_boil";
/// Extension of every produced animation
pub const OUTPUT_EXTENSION: &str = "gif";
/// NeuQuant sampling speed for frames with more than 256 colors (1 = best, 30 = fastest)
pub const QUANTIZATION_SPEED: i32 = 10;
/// Image extensions accepted as effect input
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "webp"];

