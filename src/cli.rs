use clap::Parser;
use std::path::PathBuf;

// Build version with target info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "UI:     egui/eframe 0.33\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Animated memory timeline
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// JSON file with memories (array of records); built-in samples if omitted
    #[arg(value_name = "MEMORIES")]
    pub memories: Option<PathBuf>,

    /// Render one PNG per memory into DIR and exit (no window)
    #[arg(short = 's', long = "snapshot", value_name = "DIR")]
    pub snapshot: Option<PathBuf>,

    /// Wall-clock time in seconds for snapshots (default: now)
    #[arg(long = "time", value_name = "SECONDS")]
    pub time: Option<f64>,

    /// Snapshot size
    #[arg(long = "size", value_name = "WxH", default_value = "448x160", value_parser = parse_size)]
    pub size: (u32, u32),

    /// Start with this memory expanded
    #[arg(short = 'e', long = "expand", value_name = "ID")]
    pub expand: Option<u32>,

    /// Enable debug logging to file (default: memlane.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

/// Parse `WxH` (e.g. `448x160`) into a non-zero size.
pub fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{}'", s))?;
    let w: u32 = w.trim().parse().map_err(|_| format!("bad width '{}'", w))?;
    let h: u32 = h.trim().parse().map_err(|_| format!("bad height '{}'", h))?;
    if w == 0 || h == 0 {
        return Err(format!("size must be non-zero, got {}x{}", w, h));
    }
    Ok((w, h))
}
