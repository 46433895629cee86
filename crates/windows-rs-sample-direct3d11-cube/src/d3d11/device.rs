use super::window::WindowHost;
use crate::error::MyResult;
use crate::feature_level::negotiate;
use crate::feature_level::FeatureLevel;
use crate::feature_level::REQUESTED_FEATURE_LEVELS;
use crate::refresh_rate::select_refresh_rate;
use crate::refresh_rate::DisplayMode;
use crate::refresh_rate::RefreshRate;
use eyre::WrapErr;
use tracing::debug;
use tracing::info;
use windows::core::*;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::Win32::Graphics::Dxgi::*;

impl FeatureLevel {
    pub fn to_d3d(self) -> D3D_FEATURE_LEVEL {
        match self {
            FeatureLevel::Level9_1 => D3D_FEATURE_LEVEL_9_1,
            FeatureLevel::Level9_2 => D3D_FEATURE_LEVEL_9_2,
            FeatureLevel::Level9_3 => D3D_FEATURE_LEVEL_9_3,
            FeatureLevel::Level10_0 => D3D_FEATURE_LEVEL_10_0,
            FeatureLevel::Level10_1 => D3D_FEATURE_LEVEL_10_1,
            FeatureLevel::Level11_0 => D3D_FEATURE_LEVEL_11_0,
            FeatureLevel::Level11_1 => D3D_FEATURE_LEVEL_11_1,
        }
    }

    pub fn from_d3d(level: D3D_FEATURE_LEVEL) -> Option<Self> {
        REQUESTED_FEATURE_LEVELS
            .into_iter()
            .find(|candidate| candidate.to_d3d() == level)
    }
}

/// The device, its immediate context and the swap chain presenting into the
/// window. Fields drop in declaration order, swap chain first.
pub struct DeviceContext {
    pub swap_chain: IDXGISwapChain,
    pub context: ID3D11DeviceContext,
    pub device: ID3D11Device,
    pub feature_level: FeatureLevel,
    pub client_size: (u32, u32),
    pub vsync: bool,
}

impl DeviceContext {
    pub fn create(window: &WindowHost, vsync: bool) -> MyResult<Self> {
        let (width, height) = window.client_size()?;
        let refresh_rate = query_refresh_rate(width, height, vsync)
            .wrap_err("Failed to query the display refresh rate")?;
        debug!(
            "Swap chain {}x{} at {:.2} Hz (vsync: {})",
            width,
            height,
            refresh_rate.hertz(),
            vsync
        );

        let swap_chain_desc = DXGI_SWAP_CHAIN_DESC {
            BufferDesc: DXGI_MODE_DESC {
                Width: width,
                Height: height,
                RefreshRate: DXGI_RATIONAL {
                    Numerator: refresh_rate.numerator,
                    Denominator: refresh_rate.denominator,
                },
                Format: DXGI_FORMAT_R8G8B8A8_UNORM,
                ..Default::default()
            },
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: 1,
                Quality: 0,
            },
            BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
            BufferCount: 1,
            OutputWindow: window.hwnd(),
            Windowed: TRUE,
            SwapEffect: DXGI_SWAP_EFFECT_DISCARD,
            Flags: 0,
        };

        let flags = if cfg!(debug_assertions) {
            D3D11_CREATE_DEVICE_DEBUG
        } else {
            D3D11_CREATE_DEVICE_FLAG(0)
        };

        let (swap_chain, device, context, level) = negotiate(
            &REQUESTED_FEATURE_LEVELS,
            |e: &Error| e.code() == E_INVALIDARG,
            |levels| create_device_and_swap_chain(&swap_chain_desc, flags, levels),
        )
        .wrap_err("Failed to create DirectX device and swap chain")?;

        let feature_level = FeatureLevel::from_d3d(level)
            .ok_or_else(|| eyre::eyre!("Device reported unrequested feature level {:?}", level))?;
        info!("Created Direct3D 11 device at feature level {}", feature_level);

        Ok(Self {
            swap_chain,
            context,
            device,
            feature_level,
            client_size: (width, height),
            vsync,
        })
    }

    /// Sync interval 1 waits for vertical blank, 0 presents immediately.
    pub fn present(&self) -> MyResult<()> {
        let sync_interval = if self.vsync { 1 } else { 0 };
        unsafe { self.swap_chain.Present(sync_interval, DXGI_PRESENT::default()) }
            .ok()
            .wrap_err("Present failed")?;
        Ok(())
    }
}

fn create_device_and_swap_chain(
    swap_chain_desc: &DXGI_SWAP_CHAIN_DESC,
    flags: D3D11_CREATE_DEVICE_FLAG,
    levels: &[FeatureLevel],
) -> Result<(IDXGISwapChain, ID3D11Device, ID3D11DeviceContext, D3D_FEATURE_LEVEL)> {
    let levels: Vec<D3D_FEATURE_LEVEL> = levels.iter().map(|level| level.to_d3d()).collect();

    let mut swap_chain = None;
    let mut device = None;
    let mut context = None;
    let mut feature_level = D3D_FEATURE_LEVEL::default();
    unsafe {
        D3D11CreateDeviceAndSwapChain(
            None::<&IDXGIAdapter>, // default adapter
            D3D_DRIVER_TYPE_HARDWARE,
            HMODULE::default(), // no software rasterizer
            flags,
            Some(levels.as_slice()),
            D3D11_SDK_VERSION,
            Some(swap_chain_desc),
            Some(&mut swap_chain),
            Some(&mut device),
            Some(&mut feature_level),
            Some(&mut context),
        )?
    };

    match (swap_chain, device, context) {
        (Some(swap_chain), Some(device), Some(context)) => {
            Ok((swap_chain, device, context, feature_level))
        }
        _ => Err(Error::new(E_POINTER, "Device creation returned null objects")),
    }
}

/// Refresh rate of the primary output's display mode matching the client
/// area. Only consulted when vsync is on; otherwise the driver picks.
pub fn query_refresh_rate(width: u32, height: u32, vsync: bool) -> MyResult<RefreshRate> {
    if !vsync {
        return Ok(RefreshRate::default());
    }

    let factory: IDXGIFactory1 =
        unsafe { CreateDXGIFactory1() }.wrap_err("Could not create DXGIFactory instance")?;
    let adapter = unsafe { factory.EnumAdapters(0) }.wrap_err("Failed to enumerate adapters")?;
    let output =
        unsafe { adapter.EnumOutputs(0) }.wrap_err("Failed to enumerate adapter outputs")?;

    let mut mode_count = 0u32;
    unsafe {
        output.GetDisplayModeList(
            DXGI_FORMAT_B8G8R8A8_UNORM,
            DXGI_ENUM_MODES_INTERLACED,
            &mut mode_count,
            None,
        )
    }
    .wrap_err("Failed to query display mode list")?;

    let mut modes = vec![DXGI_MODE_DESC::default(); mode_count as usize];
    unsafe {
        output.GetDisplayModeList(
            DXGI_FORMAT_B8G8R8A8_UNORM,
            DXGI_ENUM_MODES_INTERLACED,
            &mut mode_count,
            Some(modes.as_mut_ptr()),
        )
    }
    .wrap_err("Failed to query display mode list")?;
    modes.truncate(mode_count as usize);
    debug!("Primary output reports {} display modes", modes.len());

    Ok(select_refresh_rate(
        modes.iter().map(|mode| DisplayMode {
            width: mode.Width,
            height: mode.Height,
            refresh_rate: RefreshRate {
                numerator: mode.RefreshRate.Numerator,
                denominator: mode.RefreshRate.Denominator,
            },
        }),
        width,
        height,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_levels_round_trip_through_d3d_constants() {
        for level in REQUESTED_FEATURE_LEVELS {
            assert_eq!(FeatureLevel::from_d3d(level.to_d3d()), Some(level));
        }
        assert_eq!(FeatureLevel::from_d3d(D3D_FEATURE_LEVEL_12_0), None);
    }
}
