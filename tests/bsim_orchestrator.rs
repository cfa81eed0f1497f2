// tests/bsim_orchestrator.rs

mod common;

use common::{TestResult, init_tracing};
use gale::bsim::{BsimOptions, FlashLayout, RunDir, Simulation, run_app_in_bsim};
use gale::build::{BuildCache, BuildType, Configuration};
use gale::data::{BoardId, ProjectId, TargetId};
use gale::errors::GaleError;
use gale::exec::CmdMode;
use gale_test_utils::builders::{FakeWorkspace, write_file};
use gale_test_utils::fake_runner::FakeRunner;

fn build_cache(ws: &FakeWorkspace, board: BoardId) -> Result<BuildCache, Box<dyn std::error::Error>> {
    ws.write_build(board, TargetId::HmiApp, BuildType::Default)?;
    let conf = Configuration::new(ws.workspace(), board, TargetId::HmiApp, BuildType::Default);
    Ok(conf.build_cache()?)
}

fn run_dir(ws: &FakeWorkspace, cache: &BuildCache) -> RunDir {
    RunDir::new(&ProjectId::HmiApp.dir(ws.workspace()), &cache.triplet)
}

#[tokio::test]
async fn plain_run_launches_app_then_phy() -> TestResult {
    init_tracing();
    let ws = FakeWorkspace::new()?;
    let cache = build_cache(&ws, BoardId::Nrf54l15Bsim)?;
    let runner = FakeRunner::new();

    run_app_in_bsim(&runner, ws.workspace(), &cache, &BsimOptions::default()).await?;

    let dirs = run_dir(&ws, &cache);
    let results = dirs.results.display();
    let requests = runner.requests();
    assert_eq!(requests.len(), 2);

    let app = &requests[0];
    assert_eq!(app.mode, CmdMode::Background);
    assert_eq!(
        app.cmd,
        format!(
            "{exe} -s=hmi_app -d=0 --uart_pty_wait \
             --uart1_pty_attach_cmd=\"gale monitor --port %s --new-terminal\" \
             --uart4_pty_attach_cmd=\"gale monitor --port %s --new-terminal\" \
             --trace-file={results}/trace_data --flash_file={results}/flash.bin",
            exe = dirs.bin.join("zephyr.exe").display(),
        )
    );

    let phy = &requests[1];
    assert_eq!(phy.mode, CmdMode::Foreground);
    assert_eq!(phy.cmd, "./bs_2G4_phy_v1 -s=hmi_app -D=1");

    for req in &requests {
        assert_eq!(req.cwd.as_deref(), Some(dirs.bin.as_path()));
        assert!(req.fatal);
    }
    Ok(())
}

#[tokio::test]
async fn run_dir_is_staged() -> TestResult {
    init_tracing();
    let ws = FakeWorkspace::new()?;
    let cache = build_cache(&ws, BoardId::Nrf54l15Bsim)?;
    let runner = FakeRunner::new();

    run_app_in_bsim(&runner, ws.workspace(), &cache, &BsimOptions::default()).await?;

    let dirs = run_dir(&ws, &cache);
    assert!(dirs.root.ends_with("bsim/nrf54l15bsim:hmi-app:hmi_app"));
    assert!(dirs.bin.join("bs_2G4_phy_v1").is_file());
    assert!(dirs.bin.join("bs_device_handbrake").is_file());
    assert!(dirs.bin.join("zephyr.exe").is_file());
    assert!(dirs.lib.join("libUtilv1.so").is_file());
    assert!(dirs.lib.join("hw_models/libnrf.so").is_file());
    assert_eq!(
        std::fs::read_to_string(dirs.results.join("metadata"))?,
        "/* CTF 1.8 */\n"
    );
    Ok(())
}

#[tokio::test]
async fn real_time_adds_handbrake_and_resync_offset() -> TestResult {
    init_tracing();
    let ws = FakeWorkspace::new()?;
    let cache = build_cache(&ws, BoardId::Nrf54l15Bsim)?;
    let runner = FakeRunner::new();
    let options = BsimOptions {
        real_time: true,
        ..BsimOptions::default()
    };

    run_app_in_bsim(&runner, ws.workspace(), &cache, &options).await?;

    let requests = runner.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[0].cmd.contains(" -d=0 "));
    assert!(requests[0].cmd.ends_with("/flash.bin --mro=5000"), "{}", requests[0].cmd);

    assert_eq!(requests[1].mode, CmdMode::Background);
    assert_eq!(requests[1].cmd, "./bs_device_handbrake -s=hmi_app -d=1 --pp=5000");

    assert_eq!(requests[2].cmd, "./bs_2G4_phy_v1 -s=hmi_app -D=2");
    Ok(())
}

#[tokio::test]
async fn handbrake_interval_is_configurable() -> TestResult {
    init_tracing();
    let ws = FakeWorkspace::new()?;
    let cache = build_cache(&ws, BoardId::Nrf54l15Bsim)?;
    let runner = FakeRunner::new();
    let options = BsimOptions {
        real_time: true,
        handbrake_interval_ns: 2_000_000,
        ..BsimOptions::default()
    };

    run_app_in_bsim(&runner, ws.workspace(), &cache, &options).await?;

    let cmds = runner.commands();
    assert!(cmds[0].contains("--mro=2000000"));
    assert!(cmds[1].ends_with("--pp=2000000"));
    Ok(())
}

#[tokio::test]
async fn gdb_runs_app_in_new_terminal() -> TestResult {
    init_tracing();
    let ws = FakeWorkspace::new()?;
    let cache = build_cache(&ws, BoardId::Nrf54l15Bsim)?;
    let runner = FakeRunner::new();
    let options = BsimOptions {
        gdb: true,
        ..BsimOptions::default()
    };

    run_app_in_bsim(&runner, ws.workspace(), &cache, &options).await?;

    let dirs = run_dir(&ws, &cache);
    let requests = runner.requests();
    assert_eq!(requests.len(), 2);

    let app = &requests[0];
    assert_eq!(app.mode, CmdMode::SpawnNewTerminal);
    let gdbinit = ProjectId::Shared
        .dir(ws.workspace())
        .join("share/gdb/.gdbconf");
    let expected_prefix = format!(
        "/usr/bin/gdb --tui -x {} --args {} -s=hmi_app -d=0 --uart_pty_wait",
        gdbinit.display(),
        dirs.bin.join("zephyr.exe").display()
    );
    assert!(app.cmd.starts_with(&expected_prefix), "{}", app.cmd);
    let attach = r"echo App\ halted\ until\ UART\ attached!\ Use:\ gale\ monitor\ --port\ %s";
    assert!(app.cmd.contains(&format!("--uart0_pty_attach_cmd=\"{attach}\"")));
    assert!(app.cmd.contains(&format!("--uart1_pty_attach_cmd=\"{attach}\"")));

    assert_eq!(requests[1].cmd, "./bs_2G4_phy_v1 -s=hmi_app -D=1");
    Ok(())
}

#[tokio::test]
async fn dual_core_board_gets_two_flash_files() -> TestResult {
    init_tracing();
    let ws = FakeWorkspace::new()?;
    let cache = build_cache(&ws, BoardId::Nrf5340Bsim)?;
    let runner = FakeRunner::new();

    run_app_in_bsim(&runner, ws.workspace(), &cache, &BsimOptions::default()).await?;

    let results = run_dir(&ws, &cache).results;
    let app = &runner.commands()[0];
    assert!(app.contains(&format!(
        "--flash_app_file={r}/flash_app.bin --flash_net_file={r}/flash_net.bin",
        r = results.display()
    )));
    assert!(!app.contains("--flash_file="));
    Ok(())
}

#[tokio::test]
async fn tracing_can_be_disabled() -> TestResult {
    init_tracing();
    let ws = FakeWorkspace::new()?;
    let cache = build_cache(&ws, BoardId::Nrf54l15Bsim)?;
    let runner = FakeRunner::new();
    let options = BsimOptions {
        tracing: false,
        ..BsimOptions::default()
    };

    run_app_in_bsim(&runner, ws.workspace(), &cache, &options).await?;

    assert!(!runner.commands()[0].contains("--trace-file"));
    assert!(!run_dir(&ws, &cache).results.join("metadata").exists());
    Ok(())
}

#[tokio::test]
async fn extra_args_are_passed_to_the_app_only() -> TestResult {
    init_tracing();
    let ws = FakeWorkspace::new()?;
    let cache = build_cache(&ws, BoardId::Nrf54l15Bsim)?;
    let runner = FakeRunner::new();
    let options = BsimOptions {
        extra_args: vec!["--seed=7".to_string()],
        ..BsimOptions::default()
    };

    run_app_in_bsim(&runner, ws.workspace(), &cache, &options).await?;

    let cmds = runner.commands();
    assert!(cmds[0].ends_with(" --seed=7"));
    assert!(!cmds[1].contains("--seed"));
    Ok(())
}

#[tokio::test]
async fn restaging_overwrites_previous_run() -> TestResult {
    init_tracing();
    let ws = FakeWorkspace::new()?;
    let cache = build_cache(&ws, BoardId::Nrf54l15Bsim)?;
    let runner = FakeRunner::new();

    run_app_in_bsim(&runner, ws.workspace(), &cache, &BsimOptions::default()).await?;
    let dirs = run_dir(&ws, &cache);
    write_file(&dirs.bin.join("bs_2G4_phy_v1"), "stale")?;
    write_file(&dirs.results.join("flash.bin"), "persisted")?;

    run_app_in_bsim(&runner, ws.workspace(), &cache, &BsimOptions::default()).await?;

    assert_eq!(std::fs::read_to_string(dirs.bin.join("bs_2G4_phy_v1"))?, "#!/bin/sh\n");
    // Flash contents survive between runs.
    assert_eq!(std::fs::read_to_string(dirs.results.join("flash.bin"))?, "persisted");
    assert_eq!(runner.requests().len(), 4);
    Ok(())
}

#[tokio::test]
async fn hardware_board_is_rejected() -> TestResult {
    init_tracing();
    let ws = FakeWorkspace::new()?;
    let cache = build_cache(&ws, BoardId::Nrf54l15Dk)?;
    let runner = FakeRunner::new();

    let result = run_app_in_bsim(&runner, ws.workspace(), &cache, &BsimOptions::default()).await;

    match result {
        Err(GaleError::NotBsimBoard(name)) => assert_eq!(name, "nrf54l15dk"),
        other => panic!("Expected NotBsimBoard, got: {:?}", other),
    }
    assert!(runner.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn missing_executable_is_reported_before_anything_runs() -> TestResult {
    init_tracing();
    let ws = FakeWorkspace::new()?;
    let cache = build_cache(&ws, BoardId::Nrf54l15Bsim)?;
    let exe = cache.cmake_cache.exe_path()?;
    std::fs::remove_file(&exe)?;
    let runner = FakeRunner::new();

    let result = run_app_in_bsim(&runner, ws.workspace(), &cache, &BsimOptions::default()).await;

    match result {
        Err(GaleError::MissingBinary(path)) => assert_eq!(path, exe),
        other => panic!("Expected MissingBinary, got: {:?}", other),
    }
    assert!(runner.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn failing_phy_is_propagated() -> TestResult {
    init_tracing();
    let ws = FakeWorkspace::new()?;
    let cache = build_cache(&ws, BoardId::Nrf54l15Bsim)?;
    let runner = FakeRunner::new().respond("./bs_2G4_phy_v1", 1, "phy crashed");

    let result = run_app_in_bsim(&runner, ws.workspace(), &cache, &BsimOptions::default()).await;

    match result {
        Err(GaleError::CommandFailed { code, output, .. }) => {
            assert_eq!(code, 1);
            assert_eq!(output, "phy crashed");
        }
        other => panic!("Expected CommandFailed, got: {:?}", other),
    }
    Ok(())
}

#[test]
fn devices_are_numbered_in_launch_order() {
    let mut sim = Simulation::new("sensor_app");
    assert_eq!(sim.id(), "sensor_app");
    assert_eq!(sim.device_count(), 0);
    assert_eq!(sim.add_device(), 0);
    assert_eq!(sim.add_device(), 1);
    assert_eq!(sim.device_count(), 2);
}

#[test]
fn flash_layout_per_board() {
    assert_eq!(BoardId::Nrf54l15Bsim.flash_layout(), Some(FlashLayout::Single));
    assert_eq!(BoardId::Nrf5340Bsim.flash_layout(), Some(FlashLayout::AppNet));
    assert_eq!(BoardId::Nrf54l15Dk.flash_layout(), None);

    let args = FlashLayout::Single.args(std::path::Path::new("/r"));
    assert_eq!(args, vec!["--flash_file=/r/flash.bin"]);
}
