// tests/registry.rs

mod common;

use std::path::Path;

use common::{TestResult, init_tracing};
use gale::data::{BoardId, PROJECTS, ProjectId, TargetId};
use gale::errors::GaleError;
use gale::workspace::{Workspace, source_environment};
use gale_test_utils::builders::{FakeWorkspace, write_file};
use gale_test_utils::fake_runner::FakeRunner;

#[test]
fn workspace_layout() {
    let ws = Workspace::new("/work");
    assert_eq!(ws.manifest_dir(), Path::new("/work/gale"));
    assert_eq!(ws.projects_dir(), Path::new("/work/gale/projects"));
    assert_eq!(ws.tools_dir(), Path::new("/work/gale/projects/tools"));
    assert_eq!(ws.bsim_dir(), Path::new("/work/gale/projects/tools/bsim"));
    assert_eq!(ws.config_path(), Path::new("/work/gale/gale.toml"));
}

#[test]
fn project_dirs() {
    let ws = Workspace::new("/work");
    assert_eq!(ProjectId::Manifest.dir(&ws), Path::new("/work/gale"));
    assert_eq!(ProjectId::HmiApp.dir(&ws), Path::new("/work/gale/projects/hmi_app"));
    assert_eq!(ProjectId::Zephyr.dir(&ws), Path::new("/work/gale/projects/zephyr"));
}

#[test]
fn upstream_projects_are_not_user_projects() {
    let user: Vec<_> = ProjectId::user_projects().collect();
    assert_eq!(
        user,
        vec![ProjectId::Manifest, ProjectId::SensorApp, ProjectId::HmiApp, ProjectId::Shared]
    );
    assert!(PROJECTS.iter().filter(|p| p.upstream()).eq([ProjectId::Zephyr].iter()));
}

#[test]
fn targets_know_their_project() {
    assert_eq!(TargetId::HmiApp.project(), ProjectId::HmiApp);
    assert_eq!(TargetId::SensorApp.project(), ProjectId::SensorApp);
    assert_eq!(TargetId::SensorApp.cmake_target(), "sensor_app");
    assert_eq!(TargetId::HmiApp.build_subdir(), Some("hmi_app"));
}

#[test]
fn boards_know_whether_they_simulate() {
    assert!(!BoardId::Nrf54l15Dk.is_bsim());
    assert!(BoardId::Nrf54l15Bsim.is_bsim());
    assert!(BoardId::Nrf5340Bsim.is_bsim());
    assert_eq!(BoardId::Nrf5340Bsim.west_board(), "nrf5340bsim/nrf5340/cpuapp");
}

#[test]
fn board_env_file_must_exist() -> TestResult {
    let ws = Workspace::new("/definitely/not/here");
    match BoardId::Nrf54l15Dk.env_file(&ws) {
        Err(GaleError::ConfigError(msg)) => assert!(msg.contains("nrf54l15dk")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }

    let fake = FakeWorkspace::new()?;
    let env = BoardId::Nrf54l15Dk.env_file(fake.workspace())?;
    assert!(env.ends_with("shared/boards/nrf54l15dk/environment"));
    Ok(())
}

#[test]
fn environment_file_is_loaded_into_process_env() -> TestResult {
    init_tracing();
    let dir = tempfile::TempDir::new()?;
    let env = dir.path().join("environment");
    write_file(&env, "GALE_REGISTRY_TEST_ZEPHYR_VAR=loaded\n")?;

    source_environment(&env)?;

    assert_eq!(std::env::var("GALE_REGISTRY_TEST_ZEPHYR_VAR")?, "loaded");
    Ok(())
}

#[test]
fn missing_environment_file_is_an_error() {
    let result = source_environment(Path::new("/definitely/not/here/environment"));
    assert!(matches!(result, Err(GaleError::ConfigError(_))));
}

#[tokio::test]
async fn discovery_asks_west() -> TestResult {
    init_tracing();
    if std::env::var_os(gale::workspace::TOPDIR_ENV).is_some() {
        return Ok(());
    }
    let runner = FakeRunner::new().respond("west topdir", 0, "/home/dev/gale-ws");

    let ws = Workspace::discover(&runner).await?;

    assert_eq!(ws.topdir(), Path::new("/home/dev/gale-ws"));
    let requests = runner.requests();
    assert_eq!(requests[0].cmd, "west topdir");
    assert_eq!(requests[0].mode, gale::exec::CmdMode::CaptureResult);
    assert_eq!(requests[0].cwd.as_deref(), Some(Path::new(".")));
    Ok(())
}
