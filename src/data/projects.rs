// src/data/projects.rs

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::workspace::Workspace;

/// A CMake project / git repository inside the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ProjectId {
    #[value(name = "manifest")]
    Manifest,
    #[value(name = "sensor_app")]
    SensorApp,
    #[value(name = "hmi_app")]
    HmiApp,
    #[value(name = "shared")]
    Shared,
    #[value(name = "zephyr")]
    Zephyr,
}

pub const PROJECTS: [ProjectId; 5] = [
    ProjectId::Manifest,
    ProjectId::SensorApp,
    ProjectId::HmiApp,
    ProjectId::Shared,
    ProjectId::Zephyr,
];

impl ProjectId {
    /// Human readable name; also the middle part of a build triplet.
    pub fn name(self) -> &'static str {
        match self {
            ProjectId::Manifest => "manifest",
            ProjectId::SensorApp => "sensor-app",
            ProjectId::HmiApp => "hmi-app",
            ProjectId::Shared => "shared",
            ProjectId::Zephyr => "zephyr",
        }
    }

    /// Third-party projects are never touched by `checkout`/`push`.
    pub fn upstream(self) -> bool {
        matches!(self, ProjectId::Zephyr)
    }

    /// Directory holding the project's CMakeLists.txt.
    pub fn dir(self, workspace: &Workspace) -> PathBuf {
        match self {
            ProjectId::Manifest => workspace.manifest_dir(),
            ProjectId::SensorApp => workspace.projects_dir().join("sensor_app"),
            ProjectId::HmiApp => workspace.projects_dir().join("hmi_app"),
            ProjectId::Shared => workspace.projects_dir().join("shared"),
            ProjectId::Zephyr => workspace.projects_dir().join("zephyr"),
        }
    }

    /// Projects owned by us, in registry order.
    pub fn user_projects() -> impl Iterator<Item = ProjectId> {
        PROJECTS.into_iter().filter(|p| !p.upstream())
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
