// src/data/targets.rs

use std::fmt;

use clap::ValueEnum;

use super::projects::ProjectId;

/// A buildable and runnable application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum TargetId {
    #[value(name = "hmi_app")]
    HmiApp,
    #[value(name = "sensor_app")]
    SensorApp,
}

impl TargetId {
    pub fn name(self) -> &'static str {
        match self {
            TargetId::HmiApp => "hmi_app",
            TargetId::SensorApp => "sensor_app",
        }
    }

    /// The project (CMakeLists.txt) this target belongs to.
    pub fn project(self) -> ProjectId {
        match self {
            TargetId::HmiApp => ProjectId::HmiApp,
            TargetId::SensorApp => ProjectId::SensorApp,
        }
    }

    /// Name of the CMake target passed to `west build -t`.
    pub fn cmake_target(self) -> &'static str {
        match self {
            TargetId::HmiApp => "hmi_app",
            TargetId::SensorApp => "sensor_app",
        }
    }

    /// Sub-directory inside the build directory (sysbuild image name).
    pub fn build_subdir(self) -> Option<&'static str> {
        match self {
            TargetId::HmiApp => Some("hmi_app"),
            TargetId::SensorApp => Some("sensor_app"),
        }
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
