/// Alpha-over flattening onto the background color
pub mod composite;
/// Smooth random displacement field generation
pub mod displacement;
/// Pipeline driver and animation entry point
pub mod executor;
/// Seeded noise shared across frames
pub mod random;
/// Bilinear warping through a displacement field
pub mod resample;
