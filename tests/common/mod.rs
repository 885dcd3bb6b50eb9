use std::path::PathBuf;

/// A small but complete registry document covering every element kind the
/// loader accepts: core features, instance/device extensions, struct types
/// with sType bindings, commands with parameters, and enum groups.
pub const FIXTURE_REGISTRY: &str = r#"<registry>
  <types>
    <type name="VkInstance" category="handle"/>
    <type name="VkDevice" category="handle"/>
    <type name="VkResult" category="enum"/>
    <type name="VkInstanceCreateInfo" category="struct"
          stype="VK_STRUCTURE_TYPE_INSTANCE_CREATE_INFO"/>
    <type name="VkDeviceCreateInfo" category="struct"
          stype="VK_STRUCTURE_TYPE_DEVICE_CREATE_INFO"/>
    <type name="VkSwapchainCreateInfoKHR" category="struct"
          stype="VK_STRUCTURE_TYPE_SWAPCHAIN_CREATE_INFO_KHR"/>
  </types>
  <enums name="VkResult">
    <enum name="VK_SUCCESS" value="0"/>
    <enum name="VK_NOT_READY" value="1"/>
    <enum name="VK_ERROR_OUT_OF_HOST_MEMORY" value="-1"/>
  </enums>
  <commands>
    <command name="vkCreateInstance" returntype="VkResult">
      <param name="pCreateInfo" type="const VkInstanceCreateInfo*"/>
      <param name="pInstance" type="VkInstance*"/>
    </command>
    <command name="vkDestroyInstance" returntype="void">
      <param name="instance" type="VkInstance"/>
    </command>
    <command name="vkCreateDevice" returntype="VkResult">
      <param name="pCreateInfo" type="const VkDeviceCreateInfo*"/>
      <param name="pDevice" type="VkDevice*"/>
    </command>
    <command name="vkCreateSwapchainKHR" returntype="VkResult">
      <param name="device" type="VkDevice"/>
      <param name="pCreateInfo" type="const VkSwapchainCreateInfoKHR*"/>
    </command>
    <command name="vkDestroySurfaceKHR" returntype="void">
      <param name="instance" type="VkInstance"/>
    </command>
  </commands>
  <feature api="vulkan" name="VK_VERSION_1_0" number="1.0">
    <require>
      <type name="VkInstance"/>
      <type name="VkInstanceCreateInfo"/>
      <type name="VkResult"/>
      <command name="vkCreateInstance"/>
      <command name="vkDestroyInstance"/>
      <enum name="VK_SUCCESS"/>
    </require>
  </feature>
  <feature api="vulkan" name="VK_VERSION_1_1" number="1.1">
    <require>
      <type name="VkDeviceCreateInfo"/>
      <command name="vkCreateDevice"/>
    </require>
  </feature>
  <extensions>
    <extension name="VK_KHR_surface" number="25" supported="vulkan" type="instance">
      <require><command name="vkDestroySurfaceKHR"/></require>
    </extension>
    <extension name="VK_KHR_swapchain" number="70" supported="vulkan" type="device">
      <require>
        <type name="VkSwapchainCreateInfoKHR"/>
        <command name="vkCreateSwapchainKHR"/>
      </require>
    </extension>
    <extension name="VK_TEST_disabled" number="99" supported="disabled" type="device"/>
  </extensions>
</registry>
"#;

/// Write the fixture registry into `dir` and return its path.
pub fn write_fixture_registry(dir: &std::path::Path) -> PathBuf {
    let path = dir.join("vk.xml");
    std::fs::write(&path, FIXTURE_REGISTRY).unwrap();
    path
}

#[allow(dead_code)]
pub fn load_fixture(dir: &std::path::Path) -> vkgen::Registry {
    vkgen::registry::load(&write_fixture_registry(dir)).unwrap()
}
