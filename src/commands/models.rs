use std::path::PathBuf;

/// Arguments for the demo command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct DemoArgs {
    /// Number of ticks of the synthetic loop to run
    pub ticks: usize,

    /// Directory the profile is saved into
    pub output_dir: PathBuf,

    /// Fixed base name; the log file scheme is used when absent
    pub name: Option<String>,

    /// Match text appended to log-derived names
    pub match_text: Option<String>,

    /// Multiplier on the busy work done by each region
    pub work_scale: u32,

    /// Print text report to stdout
    pub print_summary: bool,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            ticks: 250,
            output_dir: PathBuf::from("profiles"),
            name: None,
            match_text: None,
            work_scale: 1,
            print_summary: false,
        }
    }
}
