use super::created;
use super::device::DeviceContext;
use crate::error::MyResult;
use eyre::WrapErr;
use tracing::debug;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::*;

/// Color and depth targets plus the fixed-function state that goes with them.
pub struct FrameTargets {
    render_target_view: ID3D11RenderTargetView,
    depth_stencil_view: ID3D11DepthStencilView,
    // Backs the view; released after it.
    _depth_stencil_buffer: ID3D11Texture2D,
    depth_stencil_state: ID3D11DepthStencilState,
    rasterizer_state: ID3D11RasterizerState,
    viewport: D3D11_VIEWPORT,
}

impl FrameTargets {
    pub fn create(graphics: &DeviceContext) -> MyResult<Self> {
        let device = &graphics.device;
        let (width, height) = graphics.client_size;

        let back_buffer: ID3D11Texture2D = unsafe { graphics.swap_chain.GetBuffer(0) }
            .wrap_err("Failed to get the swap chain back buffer")?;
        let mut render_target_view = None;
        unsafe { device.CreateRenderTargetView(&back_buffer, None, Some(&mut render_target_view)) }
            .wrap_err("Failed to create the render target view")?;
        let render_target_view = created(render_target_view, "render target view")?;

        let depth_stencil_buffer_desc = D3D11_TEXTURE2D_DESC {
            Width: width,
            Height: height,
            MipLevels: 1,
            ArraySize: 1,
            Format: DXGI_FORMAT_D24_UNORM_S8_UINT,
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: 1,
                Quality: 0,
            },
            Usage: D3D11_USAGE_DEFAULT,
            BindFlags: D3D11_BIND_DEPTH_STENCIL.0 as u32,
            CPUAccessFlags: 0, // no CPU access
            MiscFlags: 0,
        };
        let mut depth_stencil_buffer = None;
        unsafe {
            device.CreateTexture2D(
                &depth_stencil_buffer_desc,
                None,
                Some(&mut depth_stencil_buffer),
            )
        }
        .wrap_err("Failed to create the depth/stencil buffer")?;
        let depth_stencil_buffer = created(depth_stencil_buffer, "depth/stencil buffer")?;

        let mut depth_stencil_view = None;
        unsafe {
            device.CreateDepthStencilView(
                &depth_stencil_buffer,
                None,
                Some(&mut depth_stencil_view),
            )
        }
        .wrap_err("Failed to create the depth/stencil view")?;
        let depth_stencil_view = created(depth_stencil_view, "depth/stencil view")?;

        let depth_stencil_state_desc = D3D11_DEPTH_STENCIL_DESC {
            DepthEnable: TRUE,
            DepthWriteMask: D3D11_DEPTH_WRITE_MASK_ALL,
            DepthFunc: D3D11_COMPARISON_LESS,
            StencilEnable: FALSE,
            ..Default::default()
        };
        let mut depth_stencil_state = None;
        unsafe {
            device.CreateDepthStencilState(&depth_stencil_state_desc, Some(&mut depth_stencil_state))
        }
        .wrap_err("Failed to create the depth/stencil state")?;
        let depth_stencil_state = created(depth_stencil_state, "depth/stencil state")?;

        let rasterizer_desc = D3D11_RASTERIZER_DESC {
            FillMode: D3D11_FILL_SOLID,
            CullMode: D3D11_CULL_BACK,
            FrontCounterClockwise: FALSE, // clockwise triangles face the camera
            DepthBias: 0,
            DepthBiasClamp: 0.0,
            SlopeScaledDepthBias: 0.0,
            DepthClipEnable: TRUE,
            ScissorEnable: FALSE,
            MultisampleEnable: FALSE,
            AntialiasedLineEnable: FALSE,
        };
        let mut rasterizer_state = None;
        unsafe { device.CreateRasterizerState(&rasterizer_desc, Some(&mut rasterizer_state)) }
            .wrap_err("Failed to create the rasterizer state")?;
        let rasterizer_state = created(rasterizer_state, "rasterizer state")?;

        let viewport = D3D11_VIEWPORT {
            TopLeftX: 0.0,
            TopLeftY: 0.0,
            Width: width as f32,
            Height: height as f32,
            MinDepth: 0.0,
            MaxDepth: 1.0,
        };

        debug!("Created frame targets for a {}x{} client area", width, height);
        Ok(Self {
            render_target_view,
            depth_stencil_view,
            _depth_stencil_buffer: depth_stencil_buffer,
            depth_stencil_state,
            rasterizer_state,
            viewport,
        })
    }

    pub fn clear(&self, context: &ID3D11DeviceContext, color: &[f32; 4], depth: f32, stencil: u8) {
        unsafe {
            context.ClearRenderTargetView(&self.render_target_view, color);
            context.ClearDepthStencilView(
                &self.depth_stencil_view,
                (D3D11_CLEAR_DEPTH.0 | D3D11_CLEAR_STENCIL.0) as u32,
                depth,
                stencil,
            );
        }
    }

    pub fn bind_rasterizer(&self, context: &ID3D11DeviceContext) {
        unsafe {
            context.RSSetState(&self.rasterizer_state);
            context.RSSetViewports(Some(&[self.viewport]));
        }
    }

    pub fn bind_output(&self, context: &ID3D11DeviceContext) {
        unsafe {
            context.OMSetRenderTargets(
                Some(&[Some(self.render_target_view.clone())]),
                &self.depth_stencil_view,
            );
            context.OMSetDepthStencilState(&self.depth_stencil_state, 0);
        }
    }
}
