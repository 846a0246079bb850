//! Run configuration. The APEX core has no persisted configuration file —
//! everything it needs to vary is expressed on the command line, so this
//! module is just the typed surface `main` builds from parsed arguments.

use clap::ValueEnum;

/// Execution mode, selected by the second CLI argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Run silently for the requested number of cycles (or until HALT).
    Simulate,
    /// Run with full per-stage tracing.
    Display,
    /// Run one cycle at a time, printing pipeline state and waiting for
    /// input between cycles.
    #[value(name = "single_step")]
    SingleStep,
    /// Run to completion and print a single data memory location.
    #[value(name = "show_mem")]
    ShowMem,
}

/// Configuration for a single simulation run.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub mode: Mode,
    /// Cycle bound for `Simulate`/`Display`/`SingleStep`; reused as the data
    /// memory index to print in `ShowMem`.
    pub cycles: i32,
    pub trace: bool,
}

impl RunConfig {
    pub fn new(mode: Mode, cycles: i32) -> Self {
        let trace = matches!(mode, Mode::Display | Mode::SingleStep);
        Self { mode, cycles, trace }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_single_step_enable_tracing() {
        assert!(RunConfig::new(Mode::Display, 10).trace);
        assert!(RunConfig::new(Mode::SingleStep, 10).trace);
    }

    #[test]
    fn simulate_and_show_mem_are_silent() {
        assert!(!RunConfig::new(Mode::Simulate, 10).trace);
        assert!(!RunConfig::new(Mode::ShowMem, 10).trace);
    }
}
