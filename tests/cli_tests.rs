mod common;

use std::process::Command;

fn vkgen() -> Command {
    Command::new(env!("CARGO_BIN_EXE_vkgen"))
}

#[test]
fn generates_target_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let registry = common::write_fixture_registry(dir.path());

    let output = vkgen()
        .arg("--registry")
        .arg(&registry)
        .arg("-o")
        .arg(dir.path())
        .arg("--feature")
        .arg("VK_VERSION_1_0 VK_VERSION_1_1")
        .arg("--verbose")
        .arg("vk_typemap_helper.h")
        .output()
        .expect("run vkgen");
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("* Building vk_typemap_helper.h"));
    assert!(stderr.contains("* options.versions          = ^(VK_VERSION_1_0|VK_VERSION_1_1)$"));
    assert!(stderr.contains("* Generated vk_typemap_helper.h"));

    let artifact =
        std::fs::read_to_string(dir.path().join("vk_typemap_helper.h")).unwrap();
    assert!(artifact.contains("LvlTypeMap<VkDeviceCreateInfo>"));
}

#[test]
fn scenario_c_missing_target_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let registry = common::write_fixture_registry(dir.path());

    let output = vkgen()
        .arg("--registry")
        .arg(&registry)
        .arg("-o")
        .arg(dir.path())
        .output()
        .expect("run vkgen");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("configuration error"));
    assert!(stderr.contains("no generation target"));

    // No artifact was produced.
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("vk.xml")]);
}

#[test]
fn unknown_target_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let registry = common::write_fixture_registry(dir.path());

    let output = vkgen()
        .arg("--registry")
        .arg(&registry)
        .arg("-o")
        .arg(dir.path())
        .arg("bogus_target.h")
        .output()
        .expect("run vkgen");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("No generator options for unknown target: bogus_target.h"));
}

#[test]
fn missing_registry_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = vkgen()
        .arg("--registry")
        .arg(dir.path().join("absent.xml"))
        .arg("vk_typemap_helper.h")
        .output()
        .expect("run vkgen");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load registry"));
}

#[test]
fn diagfile_redirects_progress_lines() {
    let dir = tempfile::tempdir().unwrap();
    let registry = common::write_fixture_registry(dir.path());
    let diagfile = dir.path().join("diag.txt");

    let output = vkgen()
        .arg("--registry")
        .arg(&registry)
        .arg("-o")
        .arg(dir.path())
        .arg("--diagfile")
        .arg(&diagfile)
        .arg("--verbose")
        .arg("--time")
        .arg("vulkaninfo.hpp")
        .output()
        .expect("run vkgen");
    assert!(output.status.success());

    let diag = std::fs::read_to_string(&diagfile).unwrap();
    assert!(diag.contains("* Building vulkaninfo.hpp"));
    assert!(diag.contains("* Time to generate vulkaninfo.hpp ="));
    assert!(!String::from_utf8_lossy(&output.stderr).contains("* Building"));
}

#[test]
fn no_protect_drops_the_inclusion_guard() {
    let dir = tempfile::tempdir().unwrap();
    let registry = common::write_fixture_registry(dir.path());

    let status = vkgen()
        .arg("--registry")
        .arg(&registry)
        .arg("-o")
        .arg(dir.path())
        .arg("--no-protect")
        .arg("mock_icd_commands.h")
        .status()
        .expect("run vkgen");
    assert!(status.success());

    let artifact =
        std::fs::read_to_string(dir.path().join("mock_icd_commands.h")).unwrap();
    assert!(!artifact.contains("#ifndef MOCK_ICD_COMMANDS_H"));
    assert!(artifact.contains("vkCreateInstance"));
}

#[test]
fn dump_writes_regdump() {
    let dir = tempfile::tempdir().unwrap();
    let registry = common::write_fixture_registry(dir.path());

    let status = vkgen()
        .current_dir(dir.path())
        .arg("--registry")
        .arg(&registry)
        .arg("-o")
        .arg(dir.path())
        .arg("--dump")
        .arg("vulkaninfo.hpp")
        .status()
        .expect("run vkgen");
    assert!(status.success());
    let dump = std::fs::read_to_string(dir.path().join("regdump.txt")).unwrap();
    assert!(dump.contains("registry dump"));
    assert!(dump.contains("feature VK_VERSION_1_0"));
}

#[test]
fn profile_mode_prints_top_entries() {
    let dir = tempfile::tempdir().unwrap();
    let registry = common::write_fixture_registry(dir.path());

    let output = vkgen()
        .arg("--registry")
        .arg(&registry)
        .arg("-o")
        .arg(dir.path())
        .arg("--profile")
        .arg("mock_icd_commands.h")
        .output()
        .expect("run vkgen");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("* Profile (top entries by cumulative time):"));
    assert!(stderr.contains("generate mock_icd_commands.h"));
    assert!(dir.path().join("mock_icd_commands.h").exists());
}
