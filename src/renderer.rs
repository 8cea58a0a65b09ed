use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::mesh::GpuMesh;
use crate::shader::{Program, Shader, ShaderError};
use crate::sphere::Sphere;

pub const VERTEX_SHADER: &str = "sphere.vert";
pub const FRAGMENT_SHADER: &str = "sphere.frag";

struct Uniforms {
    view_pos: gl::types::GLint,
    shininess: gl::types::GLint,
    projection: gl::types::GLint,
    view: gl::types::GLint,
    model: gl::types::GLint,
}

impl Uniforms {
    fn locate(program: &Program) -> Result<Uniforms, ShaderError> {
        Ok(Uniforms {
            view_pos: program.uniform_location("viewPos")?,
            shininess: program.uniform_location("material.shininess")?,
            projection: program.uniform_location("projection")?,
            view: program.uniform_location("view")?,
            model: program.uniform_location("model")?,
        })
    }
}

/// Draws one sphere mesh with a single shader program.
pub struct Renderer {
    // fields drop in declaration order: the mesh goes before the program
    mesh: GpuMesh,
    program: Program,
    uniforms: Uniforms,
    clear_color: [f32; 4],
    shininess: f32,
    near: f32,
    far: f32,
}

impl Renderer {
    pub fn new(config: &RenderConfig, sphere: &Sphere) -> Result<Renderer, ShaderError> {
        let vertex_shader = Shader::from_file(
            &config.shader_dir.join(VERTEX_SHADER),
            gl::VERTEX_SHADER
        )?;
        let fragment_shader = Shader::from_file(
            &config.shader_dir.join(FRAGMENT_SHADER),
            gl::FRAGMENT_SHADER
        )?;
        let program = Program::from_shaders(&[vertex_shader, fragment_shader])?;
        let uniforms = Uniforms::locate(&program)?;

        let mesh = GpuMesh::upload(sphere);

        unsafe {
            gl::Enable(gl::DEPTH_TEST);
            // triangles wind clockwise seen from outside
            gl::Enable(gl::CULL_FACE);
            gl::FrontFace(gl::CCW);
            gl::CullFace(gl::FRONT);

            if config.wireframe {
                gl::PolygonMode(gl::FRONT_AND_BACK, gl::LINE);
            }
        }

        Ok(Renderer {
            mesh,
            program,
            uniforms,
            clear_color: config.clear_color,
            shininess: config.shininess,
            near: config.near,
            far: config.far,
        })
    }

    pub fn resize(&self, width: u32, height: u32) {
        log::debug!("viewport resized to {}x{}", width, height);
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn draw(&self, camera: &Camera, aspect: f32) {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }

        let projection = camera.projection_matrix(aspect, self.near, self.far);
        let view = camera.view_matrix();
        let model: glm::Mat4 = glm::identity();

        self.program.set_used();
        self.program.set_vec3(self.uniforms.view_pos, &camera.position());
        self.program.set_float(self.uniforms.shininess, self.shininess);
        self.program.set_mat4(self.uniforms.projection, &projection);
        self.program.set_mat4(self.uniforms.view, &view);
        self.program.set_mat4(self.uniforms.model, &model);

        self.mesh.draw();
    }
}
