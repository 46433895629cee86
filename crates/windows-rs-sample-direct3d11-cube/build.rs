//! Compiles `shaders/*.hlsl` into the `.cso` objects the template loads by
//! default. Debug builds get the `_d` objects with debug info.

use std::env;
use std::path::Path;
use std::path::PathBuf;

/// (base name, profile). The 9.1 profiles run on every requested feature level.
const SHADERS: [(&str, &str); 2] = [
    ("SimpleVertexShader", "vs_4_0_level_9_1"),
    ("SimplePixelShader", "ps_4_0_level_9_1"),
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    for (name, _) in SHADERS {
        println!("cargo:rerun-if-changed=shaders/{name}.hlsl");
    }

    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows") {
        return;
    }

    // "debug" covers the dev and test profiles.
    let debug = env::var("PROFILE").as_deref() == Ok("debug");
    let suffix = if debug { "_d" } else { "" };
    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("cargo sets OUT_DIR"));
    // OUT_DIR is <target>/<profile>/build/<package>-<hash>/out; the binaries
    // land in <target>/<profile>.
    let exe_dir = out_dir.ancestors().nth(3).map(Path::to_path_buf);

    for (name, profile) in SHADERS {
        let source = Path::new("shaders").join(format!("{name}.hlsl"));
        let Some(bytecode) = compile(&source, name, profile, debug) else {
            continue;
        };
        let file_name = format!("{name}{suffix}.cso");
        for dir in std::iter::once(&out_dir).chain(exe_dir.as_ref()) {
            let path = dir.join(&file_name);
            if let Err(e) = std::fs::write(&path, &bytecode) {
                println!("cargo:warning=Failed to write {}: {}", path.display(), e);
            }
        }
    }
}

#[cfg(windows)]
fn compile(source: &Path, entry_point: &str, profile: &str, debug: bool) -> Option<Vec<u8>> {
    use windows::core::HSTRING;
    use windows::core::PCSTR;
    use windows::Win32::Graphics::Direct3D::Fxc::*;

    let blob_bytes = |blob: &windows::Win32::Graphics::Direct3D::ID3DBlob| unsafe {
        std::slice::from_raw_parts(blob.GetBufferPointer() as *const u8, blob.GetBufferSize())
            .to_vec()
    };

    let entry_point_c = std::ffi::CString::new(entry_point).expect("entry point has no NUL");
    let profile_c = std::ffi::CString::new(profile).expect("profile has no NUL");
    let mut flags = D3DCOMPILE_ENABLE_STRICTNESS;
    if debug {
        flags |= D3DCOMPILE_DEBUG | D3DCOMPILE_SKIP_OPTIMIZATION;
    }

    let mut shader_blob = None;
    let mut error_blob = None;
    let result = unsafe {
        D3DCompileFromFile(
            &HSTRING::from(source),
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
        let message = error_blob
            .map(|blob| String::from_utf8_lossy(&blob_bytes(&blob)).into_owned())
            .unwrap_or_default();
        panic!("Failed to compile {} ({}): {} {}", source.display(), profile, e, message);
    }
    shader_blob.map(|blob| blob_bytes(&blob))
}

/// Cross builds have no D3DCompiler on the host; the objects have to be
/// compiled with fxc on Windows and placed next to the executable.
#[cfg(not(windows))]
fn compile(source: &Path, _entry_point: &str, profile: &str, _debug: bool) -> Option<Vec<u8>> {
    println!(
        "cargo:warning=Skipping {} ({}): shaders can only be compiled on a Windows host",
        source.display(),
        profile
    );
    None
}
