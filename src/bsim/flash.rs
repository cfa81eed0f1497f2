// src/bsim/flash.rs

use std::path::Path;

/// How a simulated board persists its flash contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlashLayout {
    /// One flash file for the whole chip.
    Single,
    /// Separate flash files for the application and network cores.
    AppNet,
}

impl FlashLayout {
    /// Command-line arguments pointing the simulated flash at files inside
    /// `results_dir`.
    pub fn args(self, results_dir: &Path) -> Vec<String> {
        let results = results_dir.display();
        match self {
            FlashLayout::Single => vec![format!("--flash_file={results}/flash.bin")],
            FlashLayout::AppNet => vec![
                format!("--flash_app_file={results}/flash_app.bin"),
                format!("--flash_net_file={results}/flash_net.bin"),
            ],
        }
    }
}
