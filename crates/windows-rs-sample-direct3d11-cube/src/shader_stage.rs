use crate::error::MyResult;
use crate::feature_level::FeatureLevel;
use eyre::bail;
use eyre::WrapErr;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Pixel,
}

/// (feature level, vertex profile, pixel profile)
const PROFILES: [(FeatureLevel, &str, &str); 7] = [
    (FeatureLevel::Level11_1, "vs_5_0", "ps_5_0"),
    (FeatureLevel::Level11_0, "vs_5_0", "ps_5_0"),
    (FeatureLevel::Level10_1, "vs_4_1", "ps_4_1"),
    (FeatureLevel::Level10_0, "vs_4_0", "ps_4_0"),
    (FeatureLevel::Level9_3, "vs_4_0_level_9_3", "ps_4_0_level_9_3"),
    (FeatureLevel::Level9_2, "vs_4_0_level_9_1", "ps_4_0_level_9_1"),
    (FeatureLevel::Level9_1, "vs_4_0_level_9_1", "ps_4_0_level_9_1"),
];

impl ShaderStage {
    /// The newest HLSL profile a device at `level` can run for this stage.
    pub fn latest_profile(self, level: FeatureLevel) -> &'static str {
        let (_, vertex, pixel) = PROFILES
            .iter()
            .find(|(l, _, _)| *l == level)
            .copied()
            .unwrap_or(PROFILES[PROFILES.len() - 1]);
        match self {
            ShaderStage::Vertex => vertex,
            ShaderStage::Pixel => pixel,
        }
    }

    fn base_name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "SimpleVertexShader",
            ShaderStage::Pixel => "SimplePixelShader",
        }
    }

    /// HLSL entry point; the functions are named after their files.
    pub fn entry_point(self) -> &'static str {
        self.base_name()
    }

    /// Compiled object file. Debug builds load the `_d` variant.
    pub fn compiled_file_name(self) -> String {
        let suffix = if cfg!(debug_assertions) { "_d" } else { "" };
        format!("{}{}.cso", self.base_name(), suffix)
    }

    pub fn source_file_name(self) -> String {
        format!("{}.hlsl", self.base_name())
    }
}

/// Where shader files are looked for, in order: next to the executable, the
/// build script's output (where the `.cso` objects are compiled to), then the
/// crate's `shaders/` sources.
pub fn shader_search_dirs() -> MyResult<Vec<PathBuf>> {
    let exe_path = std::env::current_exe().wrap_err("Failed to get executable path")?;
    let exe_dir = exe_path
        .parent()
        .ok_or_else(|| eyre::eyre!("Executable path {} has no parent", exe_path.display()))?;
    Ok(vec![
        exe_dir.to_path_buf(),
        PathBuf::from(env!("OUT_DIR")),
        Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders"),
    ])
}

pub fn find_shader_file(file_name: &str) -> MyResult<PathBuf> {
    let dirs = shader_search_dirs()?;
    for (index, dir) in dirs.iter().enumerate() {
        let path = dir.join(file_name);
        if path.exists() {
            if index > 0 {
                debug!("{} not found next to executable, using {}", file_name, path.display());
            }
            return Ok(path);
        }
    }
    bail!("Failed to load shader: {} not found in {:?}", file_name, dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_level::REQUESTED_FEATURE_LEVELS;

    #[test]
    fn every_requested_level_has_a_profile_for_both_stages() {
        for level in REQUESTED_FEATURE_LEVELS {
            assert!(ShaderStage::Vertex.latest_profile(level).starts_with("vs_"));
            assert!(ShaderStage::Pixel.latest_profile(level).starts_with("ps_"));
        }
    }

    #[test]
    fn profiles_follow_the_feature_level() {
        use FeatureLevel::*;
        assert_eq!(ShaderStage::Vertex.latest_profile(Level11_1), "vs_5_0");
        assert_eq!(ShaderStage::Pixel.latest_profile(Level11_0), "ps_5_0");
        assert_eq!(ShaderStage::Vertex.latest_profile(Level10_1), "vs_4_1");
        assert_eq!(ShaderStage::Pixel.latest_profile(Level10_0), "ps_4_0");
        assert_eq!(ShaderStage::Vertex.latest_profile(Level9_3), "vs_4_0_level_9_3");
        assert_eq!(ShaderStage::Pixel.latest_profile(Level9_2), "ps_4_0_level_9_1");
    }

    #[test]
    fn file_names_follow_the_build_configuration() {
        let vertex = ShaderStage::Vertex.compiled_file_name();
        if cfg!(debug_assertions) {
            assert_eq!(vertex, "SimpleVertexShader_d.cso");
        } else {
            assert_eq!(vertex, "SimpleVertexShader.cso");
        }
        assert_eq!(ShaderStage::Pixel.source_file_name(), "SimplePixelShader.hlsl");
        assert_eq!(ShaderStage::Pixel.entry_point(), "SimplePixelShader");
    }

    #[test]
    fn search_starts_next_to_the_executable() {
        let dirs = shader_search_dirs().unwrap();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(dirs[0], exe.parent().unwrap());
        assert!(dirs[1].ends_with("out"));
        assert!(dirs[2].ends_with("shaders"));
    }

    #[test]
    fn hlsl_sources_are_found_in_the_crate() {
        for stage in [ShaderStage::Vertex, ShaderStage::Pixel] {
            let path = find_shader_file(&stage.source_file_name()).unwrap();
            assert!(path.ends_with(stage.source_file_name()));
        }
    }

    #[test]
    fn missing_shader_names_the_file() {
        let error = find_shader_file("MissingShader.cso").unwrap_err();
        assert!(error.to_string().contains("MissingShader.cso"));
    }

    #[cfg(windows)]
    #[test]
    fn build_script_provides_the_default_shader_objects() {
        for stage in [ShaderStage::Vertex, ShaderStage::Pixel] {
            let path = find_shader_file(&stage.compiled_file_name()).unwrap();
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }
}
