use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser, Debug)]
#[command(name = "orthocast")]
#[command(about = "Render a scene with a parallel-ray Blinn-Phong caster")]
pub struct Args {
    /// Scene and render configuration (TOML); built-in demo scene if omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels, overriding the configuration
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels, overriding the configuration
    #[arg(long)]
    pub height: Option<u32>,

    /// Output file path (.png for 8-bit clamped, .exr for HDR linear)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Spread pixels over all CPU cores
    #[arg(short, long)]
    pub parallel: bool,

    /// Keep shaded values above 1.0 instead of clamping (useful with .exr)
    #[arg(long)]
    pub hdr: bool,

    /// Show a progress bar while rendering
    #[arg(long)]
    pub progress: bool,
}
