use super::created;
use super::device::DeviceContext;
use super::shader::blob_bytes;
use super::shader::create_pixel_shader;
use super::shader::create_vertex_shader;
use super::shader::load_bytecode;
use crate::config::ShaderSource;
use crate::error::MyResult;
use crate::mesh::COLOR_OFFSET;
use crate::mesh::CUBE_INDICES;
use crate::mesh::CUBE_VERTICES;
use crate::mesh::POSITION_OFFSET;
use crate::mesh::VERTEX_STRIDE;
use crate::shader_stage::ShaderStage;
use crate::slot::Slot;
use crate::transforms::projection_matrix;
use bevy_math::Mat4;
use eyre::WrapErr;
use tracing::info;
use windows::core::*;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::*;

/// The three vertex-stage constant buffers, in register order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantBuffer {
    /// Projection, written once at load.
    Application,
    /// View, written every tick.
    Frame,
    /// World, written every tick.
    Object,
}

impl ConstantBuffer {
    pub const COUNT: usize = 3;

    pub fn register(self) -> usize {
        match self {
            ConstantBuffer::Application => 0,
            ConstantBuffer::Frame => 1,
            ConstantBuffer::Object => 2,
        }
    }
}

const MATRIX_BYTE_WIDTH: u32 = std::mem::size_of::<[f32; 16]>() as u32;

/// Cube geometry, shaders and the constant buffers feeding them.
pub struct PipelineResources {
    vertex_buffer: Slot<ID3D11Buffer>,
    index_buffer: Slot<ID3D11Buffer>,
    constant_buffers: Slot<[Option<ID3D11Buffer>; ConstantBuffer::COUNT]>,
    input_layout: Slot<ID3D11InputLayout>,
    vertex_shader: Slot<ID3D11VertexShader>,
    pixel_shader: Slot<ID3D11PixelShader>,
}

impl PipelineResources {
    pub fn new() -> Self {
        Self {
            vertex_buffer: Slot::empty("vertex buffer"),
            index_buffer: Slot::empty("index buffer"),
            constant_buffers: Slot::empty("constant buffers"),
            input_layout: Slot::empty("input layout"),
            vertex_shader: Slot::empty("vertex shader"),
            pixel_shader: Slot::empty("pixel shader"),
        }
    }

    /// Creates everything the draw call needs and uploads the projection.
    /// On failure whatever was created stays loaded until [`Self::unload`].
    pub fn load(&mut self, graphics: &DeviceContext, shader_source: ShaderSource) -> MyResult<()> {
        let device = &graphics.device;

        self.vertex_buffer.fill(create_immutable_buffer(
            device,
            &CUBE_VERTICES,
            D3D11_BIND_VERTEX_BUFFER,
        )?);
        self.index_buffer.fill(create_immutable_buffer(
            device,
            &CUBE_INDICES,
            D3D11_BIND_INDEX_BUFFER,
        )?);

        let constant_buffer_desc = D3D11_BUFFER_DESC {
            ByteWidth: MATRIX_BYTE_WIDTH,
            Usage: D3D11_USAGE_DEFAULT,
            BindFlags: D3D11_BIND_CONSTANT_BUFFER.0 as u32,
            CPUAccessFlags: 0,
            MiscFlags: 0,
            StructureByteStride: 0,
        };
        let constant_buffers = array_init::try_array_init(|register| -> MyResult<_> {
            let mut buffer = None;
            unsafe { device.CreateBuffer(&constant_buffer_desc, None, Some(&mut buffer)) }
                .wrap_err_with(|| format!("Failed to create constant buffer b{}", register))?;
            Ok(Some(created(buffer, "constant buffer")?))
        })?;
        self.constant_buffers.fill(constant_buffers);

        let vertex_bytecode =
            load_bytecode(ShaderStage::Vertex, shader_source, graphics.feature_level)?;
        self.vertex_shader
            .fill(create_vertex_shader(device, &vertex_bytecode)?);

        let pixel_bytecode =
            load_bytecode(ShaderStage::Pixel, shader_source, graphics.feature_level)?;
        self.pixel_shader
            .fill(create_pixel_shader(device, &pixel_bytecode)?);

        let input_element_descs = [
            D3D11_INPUT_ELEMENT_DESC {
                SemanticName: s!("POSITION"),
                SemanticIndex: 0,
                Format: DXGI_FORMAT_R32G32B32_FLOAT,
                InputSlot: 0,
                AlignedByteOffset: POSITION_OFFSET,
                InputSlotClass: D3D11_INPUT_PER_VERTEX_DATA,
                InstanceDataStepRate: 0,
            },
            D3D11_INPUT_ELEMENT_DESC {
                SemanticName: s!("COLOR"),
                SemanticIndex: 0,
                Format: DXGI_FORMAT_R32G32B32_FLOAT,
                InputSlot: 0,
                AlignedByteOffset: COLOR_OFFSET,
                InputSlotClass: D3D11_INPUT_PER_VERTEX_DATA,
                InstanceDataStepRate: 0,
            },
        ];
        let mut input_layout = None;
        // Validated against the vertex shader's input signature.
        unsafe {
            device.CreateInputLayout(
                &input_element_descs,
                blob_bytes(&vertex_bytecode),
                Some(&mut input_layout),
            )
        }
        .wrap_err("Failed to create input layout")?;
        self.input_layout
            .fill(created(input_layout, "input layout")?);

        let (width, height) = graphics.client_size;
        self.upload(
            &graphics.context,
            ConstantBuffer::Application,
            &projection_matrix(width, height),
        )?;

        info!("Loaded cube content");
        Ok(())
    }

    pub fn upload(
        &self,
        context: &ID3D11DeviceContext,
        which: ConstantBuffer,
        matrix: &Mat4,
    ) -> MyResult<()> {
        let buffers = self.constant_buffers.require()?;
        let buffer = buffers[which.register()]
            .as_ref()
            .ok_or_else(|| eyre::eyre!("{:?} constant buffer is missing", which))?;
        let columns = matrix.to_cols_array();
        unsafe {
            context.UpdateSubresource(buffer, 0, None, columns.as_ptr() as *const _, 0, 0);
        }
        Ok(())
    }

    /// Vertex buffer, input layout, index buffer and topology.
    pub fn bind_input_assembler(&self, context: &ID3D11DeviceContext) -> MyResult<()> {
        self.vertex_buffer.require()?;
        let index_buffer = self.index_buffer.require()?;
        let input_layout = self.input_layout.require()?;
        let stride = VERTEX_STRIDE;
        let offset = 0u32;
        unsafe {
            context.IASetVertexBuffers(
                0,
                1,
                Some(self.vertex_buffer.as_option()),
                Some(&stride),
                Some(&offset),
            );
            context.IASetInputLayout(input_layout);
            context.IASetIndexBuffer(index_buffer, DXGI_FORMAT_R16_UINT, 0);
            context.IASetPrimitiveTopology(D3D11_PRIMITIVE_TOPOLOGY_TRIANGLELIST);
        }
        Ok(())
    }

    /// Vertex shader plus all three constant buffers in registers b0 to b2.
    pub fn bind_vertex_stage(&self, context: &ID3D11DeviceContext) -> MyResult<()> {
        let vertex_shader = self.vertex_shader.require()?;
        let constant_buffers = self.constant_buffers.require()?;
        unsafe {
            context.VSSetShader(vertex_shader, None);
            context.VSSetConstantBuffers(0, Some(constant_buffers));
        }
        Ok(())
    }

    pub fn bind_pixel_stage(&self, context: &ID3D11DeviceContext) -> MyResult<()> {
        let pixel_shader = self.pixel_shader.require()?;
        unsafe { context.PSSetShader(pixel_shader, None) };
        Ok(())
    }

    pub fn index_count(&self) -> u32 {
        CUBE_INDICES.len() as u32
    }

    /// Releases everything that was created. Safe to call repeatedly and
    /// after a partial load.
    pub fn unload(&mut self) {
        self.index_buffer.release();
        self.vertex_buffer.release();
        self.constant_buffers.release();
        self.input_layout.release();
        self.vertex_shader.release();
        self.pixel_shader.release();
    }
}

impl Default for PipelineResources {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PipelineResources {
    fn drop(&mut self) {
        self.unload();
    }
}

fn create_immutable_buffer<T: Copy>(
    device: &ID3D11Device,
    contents: &[T],
    bind_flag: D3D11_BIND_FLAG,
) -> MyResult<ID3D11Buffer> {
    let buffer_desc = D3D11_BUFFER_DESC {
        ByteWidth: std::mem::size_of_val(contents) as u32,
        Usage: D3D11_USAGE_IMMUTABLE,
        BindFlags: bind_flag.0 as u32,
        CPUAccessFlags: 0,
        MiscFlags: 0,
        StructureByteStride: 0,
    };
    let initial_data = D3D11_SUBRESOURCE_DATA {
        pSysMem: contents.as_ptr() as *const _,
        SysMemPitch: 0,
        SysMemSlicePitch: 0,
    };
    let mut buffer = None;
    unsafe { device.CreateBuffer(&buffer_desc, Some(&initial_data), Some(&mut buffer)) }
        .wrap_err("Failed to create geometry buffer")?;
    created(buffer, "geometry buffer")
}
