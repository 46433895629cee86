/// Where the two shader programs come from at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderSource {
    /// `.cso` blobs next to the executable, produced by `fxc` ahead of time.
    Precompiled,
    /// `.hlsl` files next to the executable, compiled with the latest profile
    /// the negotiated feature level supports.
    Hlsl,
}

/// Everything the template needs to know before it opens a window.
///
/// None of this comes from the command line or from disk; these are the
/// compile-time choices of the template.
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    pub title: &'static str,
    pub class_name: &'static str,
    /// Client area in pixels, not including the window frame.
    pub client_size: (u32, u32),
    pub vsync: bool,
    pub shader_source: ShaderSource,
    /// RGBA, cornflower blue.
    pub clear_color: [f32; 4],
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            title: "DirectX11 Template",
            class_name: "DirectXWindowClass",
            client_size: (640, 480),
            vsync: false,
            shader_source: ShaderSource::Precompiled,
            clear_color: [0.392_156_9, 0.584_313_7, 0.929_411_8, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_template_window() {
        let config = TemplateConfig::default();
        assert_eq!(config.client_size, (640, 480));
        assert!(!config.vsync);
        assert_eq!(config.shader_source, ShaderSource::Precompiled);
    }
}
