use super::created;
use crate::config::ShaderSource;
use crate::error::MyResult;
use crate::feature_level::FeatureLevel;
use crate::shader_stage::find_shader_file;
use crate::shader_stage::ShaderStage;
use eyre::WrapErr;
use std::ffi::CString;
use std::path::Path;
use tracing::debug;
use tracing::error;
use windows::core::*;
use windows::Win32::Graphics::Direct3D::Fxc::*;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D11::*;

/// Bytecode for `stage`, either read from its precompiled object or compiled
/// from HLSL against the newest profile `feature_level` supports.
pub fn load_bytecode(
    stage: ShaderStage,
    source: ShaderSource,
    feature_level: FeatureLevel,
) -> MyResult<ID3DBlob> {
    match source {
        ShaderSource::Precompiled => {
            let path = find_shader_file(&stage.compiled_file_name())?;
            let blob = unsafe { D3DReadFileToBlob(&HSTRING::from(path.as_path())) }
                .wrap_err_with(|| format!("Failed to load shader: {}", path.display()))?;
            debug!("Read {:?} shader from {}", stage, path.display());
            Ok(blob)
        }
        ShaderSource::Hlsl => {
            let path = find_shader_file(&stage.source_file_name())?;
            let profile = stage.latest_profile(feature_level);
            let mut flags = D3DCOMPILE_ENABLE_STRICTNESS;
            if cfg!(debug_assertions) {
                flags |= D3DCOMPILE_DEBUG;
            }
            let blob = compile_shader(&path, stage.entry_point(), profile, flags)
                .wrap_err_with(|| format!("Failed to compile shader: {}", path.display()))?;
            debug!("Compiled {:?} shader from {} as {}", stage, path.display(), profile);
            Ok(blob)
        }
    }
}

fn compile_shader(
    hlsl_path: &Path,
    entry_point: &str,
    profile: &str,
    flags: u32,
) -> MyResult<ID3DBlob> {
    let entry_point_c = CString::new(entry_point)?;
    let profile_c = CString::new(profile)?;

    let mut shader_blob = None;
    let mut error_blob = None;
    let result = unsafe {
        D3DCompileFromFile(
            &HSTRING::from(hlsl_path),
            None, // Defines
            None, // Include handler
            PCSTR(entry_point_c.as_ptr() as *const u8),
            PCSTR(profile_c.as_ptr() as *const u8),
            flags,
            0, // Effect flags
            &mut shader_blob,
            Some(&mut error_blob),
        )
    };

    if let Err(e) = result {
        if let Some(error_blob) = error_blob {
            error!(
                "Shader compile error ({} {}): {}",
                entry_point,
                profile,
                String::from_utf8_lossy(blob_bytes(&error_blob))
            );
        }
        return Err(e.into());
    }
    created(shader_blob, "shader blob")
}

pub fn blob_bytes(blob: &ID3DBlob) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(blob.GetBufferPointer() as *const u8, blob.GetBufferSize())
    }
}

pub fn create_vertex_shader(device: &ID3D11Device, bytecode: &ID3DBlob) -> MyResult<ID3D11VertexShader> {
    let mut shader = None;
    unsafe { device.CreateVertexShader(blob_bytes(bytecode), None, Some(&mut shader)) }
        .wrap_err("Failed to create vertex shader")?;
    created(shader, "vertex shader")
}

pub fn create_pixel_shader(device: &ID3D11Device, bytecode: &ID3DBlob) -> MyResult<ID3D11PixelShader> {
    let mut shader = None;
    unsafe { device.CreatePixelShader(blob_bytes(bytecode), None, Some(&mut shader)) }
        .wrap_err("Failed to create pixel shader")?;
    created(shader, "pixel shader")
}
