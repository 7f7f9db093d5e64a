use crate::core::assembler::{TriangleAssembler, primitive_starts};
use crate::core::framebuffer::FrameBuffer;
use crate::core::pipeline::PixelShader;
use crate::core::rasterizer::Rasterizer;
use crate::core::vertex_stage::{project_to_screen, transform_vertices};
use crate::pipeline::settings::RenderSettings;
use crate::pipeline::shaders::shaded::ShadedShader;
use crate::scene::camera::Camera;
use crate::scene::context::RenderContext;
use crate::scene::mesh::Mesh;
use log::debug;
use nalgebra::Matrix4;

/// The high-level renderer that orchestrates the pipeline stages.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height),
        }
    }

    /// Resets colors to `color` and depth to `f32::MAX`.
    pub fn clear(&mut self, color: nalgebra::Vector3<f32>) {
        self.framebuffer.clear(color, f32::MAX);
    }

    /// Renders every object of the scene into the framebuffer.
    pub fn render_frame(&mut self, context: &mut RenderContext, settings: &RenderSettings) {
        self.clear(settings.clear_color());
        self.rasterizer.show_depth = settings.show_depth;
        self.rasterizer.show_bounding_box = settings.show_bounding_box;

        let RenderContext {
            camera,
            light,
            shininess,
            scene_objects,
        } = context;

        for obj in scene_objects.iter_mut() {
            let shader = ShadedShader::new(
                &obj.material,
                light,
                *shininess,
                settings.shading_mode,
                settings.use_normal_map,
            );
            self.draw_mesh(&mut obj.mesh, &obj.transform, camera, &shader);
        }
    }

    /// Transforms, assembles and rasterizes one mesh.
    pub fn draw_mesh<S: PixelShader + ?Sized>(
        &mut self,
        mesh: &mut Mesh,
        world: &Matrix4<f32>,
        camera: &Camera,
        shader: &S,
    ) {
        let (width, height) = (self.framebuffer.width, self.framebuffer.height);

        // 1. Vertex processing
        transform_vertices(mesh, world, camera);
        let screen = project_to_screen(mesh.vertices_out(), width, height);

        // 2. Primitive assembly + rasterization
        let assembler = TriangleAssembler::new(camera, width, height);
        let mut drawn = 0usize;
        for start in primitive_starts(mesh.topology, mesh.indices().len()) {
            let Some(triangle) =
                assembler.assemble(mesh.indices(), start, &screen, mesh.vertices_out())
            else {
                continue;
            };
            self.rasterizer
                .rasterize_triangle(&mut self.framebuffer, shader, &triangle);
            drawn += 1;
        }

        debug!(
            "Mesh drawn: {} vertices, {} triangles submitted",
            mesh.vertices().len(),
            drawn
        );
    }
}
