use crate::sphere::Sphere;

/// Vertex array with its vertex and index buffers.
///
/// The buffers live as long as the value and are released in reverse order
/// of creation when it drops.
pub struct GpuMesh {
    vao: gl::types::GLuint,
    vbo: gl::types::GLuint,
    ebo: gl::types::GLuint,
    index_count: gl::types::GLsizei,
}

impl GpuMesh {
    pub fn upload(sphere: &Sphere) -> GpuMesh {
        let mut vao: gl::types::GLuint = 0;
        let mut vbo: gl::types::GLuint = 0;
        let mut ebo: gl::types::GLuint = 0;

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);

            gl::GenBuffers(1, &mut vbo);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (sphere.vertices.len() * std::mem::size_of::<f32>()) as gl::types::GLsizeiptr,
                sphere.vertices.as_ptr() as *const gl::types::GLvoid,
                gl::STATIC_DRAW
            );

            gl::GenBuffers(1, &mut ebo);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                (sphere.indices.len() * std::mem::size_of::<u32>()) as gl::types::GLsizeiptr,
                sphere.indices.as_ptr() as *const gl::types::GLvoid,
                gl::STATIC_DRAW
            );

            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(
                0,
                3,
                gl::FLOAT,
                gl::FALSE,
                (3 * std::mem::size_of::<f32>()) as gl::types::GLint,
                std::ptr::null()
            );

            // the element buffer binding is part of the VAO, so unbind it last
            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, 0);
        }

        GpuMesh {
            vao,
            vbo,
            ebo,
            // Sphere::generate keeps the index count within i32
            index_count: gl::types::GLsizei::try_from(sphere.indices.len())
                .unwrap_or(gl::types::GLsizei::MAX),
        }
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawElements(
                gl::TRIANGLES,
                self.index_count,
                gl::UNSIGNED_INT,
                std::ptr::null()
            );
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for GpuMesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.ebo);
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}
