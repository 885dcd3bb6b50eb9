mod common;

use vkgen::catalog::{build_catalog, CatalogFilters};
use vkgen::driver::{generate_target, GenOutcome};
use vkgen::run::RunContext;
use vkgen::DiagSink;

fn context(quiet: bool) -> RunContext {
    RunContext {
        diag: DiagSink::buffer(),
        err_warn: DiagSink::buffer(),
        time: false,
        quiet,
        profiler: None,
    }
}

fn filters(dir: &std::path::Path) -> CatalogFilters {
    CatalogFilters {
        default_extensions: "vulkan".to_string(),
        protect: true,
        directory: dir.to_path_buf(),
        ..Default::default()
    }
}

#[test]
fn unknown_target_is_soft_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let reg = common::load_fixture(dir.path());
    let catalog = build_catalog(&filters(dir.path())).unwrap();
    let ctx = context(false);

    let outcome = generate_target("no_such_target.h", &catalog, &reg, &ctx).unwrap();
    assert_eq!(outcome, GenOutcome::UnknownTarget);
    assert!(ctx
        .diag
        .contents()
        .contains("No generator options for unknown target: no_such_target.h"));

    // Nothing but the fixture registry in the output directory.
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("vk.xml")]);
}

#[test]
fn scenario_a_generates_one_artifact_with_diag_lines() {
    let dir = tempfile::tempdir().unwrap();
    let reg = common::load_fixture(dir.path());
    let mut f = filters(dir.path());
    f.features = vec!["VK_VERSION_1_0".to_string()];
    let catalog = build_catalog(&f).unwrap();
    let ctx = context(false);

    let outcome = generate_target("vk_typemap_helper.h", &catalog, &reg, &ctx).unwrap();
    let path = dir.path().join("vk_typemap_helper.h");
    assert_eq!(outcome, GenOutcome::Generated(path.clone()));
    assert!(path.exists());

    let diag = ctx.diag.contents();
    assert!(diag.contains("* Building vk_typemap_helper.h"));
    assert!(diag.contains("* Generated vk_typemap_helper.h"));
    let building = diag.find("* Building").unwrap();
    let generated = diag.find("* Generated").unwrap();
    assert!(building < generated);

    let artifact = std::fs::read_to_string(&path).unwrap();
    assert!(artifact.contains("The Khronos Group Inc."));
    assert!(artifact.contains("#ifndef VK_TYPEMAP_HELPER_H"));
    assert!(artifact.contains("LvlTypeMap<VkInstanceCreateInfo>"));
    // VK_VERSION_1_1 was filtered out, so its types stay out of the artifact.
    assert!(!artifact.contains("VkDeviceCreateInfo"));
}

#[test]
fn quiet_run_suppresses_progress_but_still_generates() {
    let dir = tempfile::tempdir().unwrap();
    let reg = common::load_fixture(dir.path());
    let catalog = build_catalog(&filters(dir.path())).unwrap();
    let ctx = context(true);

    generate_target("mock_icd_commands.h", &catalog, &reg, &ctx).unwrap();
    assert!(ctx.diag.contents().is_empty());
    assert!(dir.path().join("mock_icd_commands.h").exists());
}

#[test]
fn timing_emits_elapsed_line_on_the_diag_stream() {
    let dir = tempfile::tempdir().unwrap();
    let reg = common::load_fixture(dir.path());
    let catalog = build_catalog(&filters(dir.path())).unwrap();
    let mut ctx = context(true);
    ctx.time = true;

    generate_target("vulkaninfo.hpp", &catalog, &reg, &ctx).unwrap();
    let diag = ctx.diag.contents();
    assert_eq!(diag.lines().count(), 1);
    assert!(diag.starts_with("* Time to generate vulkaninfo.hpp = "));
}

#[test]
fn mock_icd_sections_render_their_shapes() {
    let dir = tempfile::tempdir().unwrap();
    let reg = common::load_fixture(dir.path());
    let catalog = build_catalog(&filters(dir.path())).unwrap();
    let ctx = context(true);

    generate_target("mock_icd_extension_list.h", &catalog, &reg, &ctx).unwrap();
    let ext_list =
        std::fs::read_to_string(dir.path().join("mock_icd_extension_list.h")).unwrap();
    assert!(ext_list.contains("{\"VK_KHR_surface\", 25}"));
    assert!(ext_list.contains("device_extension_map"));
    assert!(!ext_list.contains("VK_TEST_disabled"));

    generate_target("mock_icd_commands.cpp.inc", &catalog, &reg, &ctx).unwrap();
    let stubs =
        std::fs::read_to_string(dir.path().join("mock_icd_commands.cpp.inc")).unwrap();
    assert!(stubs.contains("vkCreateInstance("));
    assert!(stubs.contains("return VK_SUCCESS;"));

    generate_target("mock_icd_wsi_exports.cpp.inc", &catalog, &reg, &ctx).unwrap();
    let wsi =
        std::fs::read_to_string(dir.path().join("mock_icd_wsi_exports.cpp.inc")).unwrap();
    assert!(wsi.contains("vkCreateSwapchainKHR"));
    assert!(wsi.contains("vkDestroySurfaceKHR"));
    assert!(!wsi.contains("vkCreateInstance"));
}

#[test]
fn undeclared_required_command_goes_to_warning_stream() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vk.xml");
    std::fs::write(
        &path,
        r#"<registry>
             <feature api="vulkan" name="VK_VERSION_1_0" number="1.0">
               <require><command name="vkGhost"/></require>
             </feature>
           </registry>"#,
    )
    .unwrap();
    let reg = vkgen::registry::load(&path).unwrap();
    let catalog = build_catalog(&filters(dir.path())).unwrap();
    let ctx = context(true);

    generate_target("mock_icd_commands.h", &catalog, &reg, &ctx).unwrap();
    assert!(ctx.err_warn.contents().contains("vkGhost"));
    assert!(dir.path().join("mock_icd_commands.h").exists());
}
