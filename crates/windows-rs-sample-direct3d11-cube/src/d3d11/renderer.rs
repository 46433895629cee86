use super::device::DeviceContext;
use super::pipeline::ConstantBuffer;
use super::pipeline::PipelineResources;
use super::targets::FrameTargets;
use crate::error::MyResult;
use crate::frame_loop::FrameStep;
use crate::transforms::CubeRotation;
use tracing::debug;

/// Everything the frame loop drives once startup succeeded.
///
/// Fields drop top to bottom, the reverse of the order they were created in.
pub struct Renderer {
    pipeline: PipelineResources,
    targets: FrameTargets,
    graphics: DeviceContext,
    rotation: CubeRotation,
    clear_color: [f32; 4],
}

impl Renderer {
    pub fn new(
        graphics: DeviceContext,
        targets: FrameTargets,
        pipeline: PipelineResources,
        clear_color: [f32; 4],
    ) -> Self {
        Self {
            pipeline,
            targets,
            graphics,
            rotation: CubeRotation::default(),
            clear_color,
        }
    }

    /// Releases the cube content ahead of the device.
    pub fn shutdown(&mut self) {
        self.pipeline.unload();
        debug!(
            "Renderer shut down at {:.1} degrees",
            self.rotation.angle_degrees()
        );
    }
}

impl FrameStep for Renderer {
    fn update(&mut self, delta_seconds: f32) -> MyResult<()> {
        let context = &self.graphics.context;
        let transforms = self.rotation.advance(delta_seconds);
        // The camera never moves, but the view is rewritten every tick anyway.
        self.pipeline
            .upload(context, ConstantBuffer::Frame, &transforms.view)?;
        self.pipeline
            .upload(context, ConstantBuffer::Object, &transforms.world)?;
        Ok(())
    }

    fn render(&mut self) -> MyResult<()> {
        let context = &self.graphics.context;

        self.targets.clear(context, &self.clear_color, 1.0, 0);

        self.pipeline.bind_input_assembler(context)?;
        self.pipeline.bind_vertex_stage(context)?;
        self.targets.bind_rasterizer(context);
        self.pipeline.bind_pixel_stage(context)?;
        self.targets.bind_output(context);

        unsafe { context.DrawIndexed(self.pipeline.index_count(), 0, 0) };

        self.graphics.present()
    }
}
