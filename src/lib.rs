pub mod config;
pub mod generators;
pub mod logging;
pub mod noise;
pub mod output;
pub mod raster;
pub mod source;

// Curated re-exports
pub use config::{AdiskConfig, JdiskConfig, SaturnConfig, TexgenConfig};
pub use generators::TextureKind;
pub use raster::Raster;
pub use source::SourceImage;
