use std::ffi::CString;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to read shader {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("shader source contains a NUL byte")]
    InvalidSource,
    #[error("uniform name {0:?} contains a NUL byte")]
    InvalidName(String),
    #[error("shader compilation failed: {0}")]
    Compile(String),
    #[error("program link failed: {0}")]
    Link(String),
    #[error("uniform {0:?} is not active in the program")]
    MissingUniform(String),
}

pub struct Shader {
    id: gl::types::GLuint,
}

impl Shader {
    pub fn from_source(
        source: &str,
        shader_type: gl::types::GLenum
    ) -> Result<Shader, ShaderError> {
        let id = shader_from_source(source, shader_type)?;
        Ok(Shader { id })
    }

    pub fn from_file(
        path: &Path,
        shader_type: gl::types::GLenum
    ) -> Result<Shader, ShaderError> {
        let source = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.to_owned(),
            source,
        })?;

        log::debug!("compiling shader {}", path.display());
        Shader::from_source(&source, shader_type)
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.id);
        }
    }
}

pub struct Program {
    id: gl::types::GLuint,
}

impl Program {
    pub fn from_shaders(shaders: &[Shader]) -> Result<Program, ShaderError> {
        let id = unsafe { gl::CreateProgram() };

        for shader in shaders {
            unsafe {
                gl::AttachShader(id, shader.id);
            }
        }

        let mut success: gl::types::GLint = 1;
        unsafe {
            gl::LinkProgram(id);
            gl::GetProgramiv(id, gl::LINK_STATUS, &mut success);
        }

        for shader in shaders {
            unsafe {
                gl::DetachShader(id, shader.id);
            }
        }

        if success == 0 {
            let mut len: gl::types::GLint = 0;
            unsafe {
                gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len);
            }

            let mut buffer = info_log_buffer(len);
            unsafe {
                gl::GetProgramInfoLog(
                    id,
                    len,
                    std::ptr::null_mut(),
                    buffer.as_mut_ptr() as *mut gl::types::GLchar
                );
                gl::DeleteProgram(id);
            }

            return Err(ShaderError::Link(info_log_to_string(buffer)));
        }

        Ok(Program { id })
    }

    pub fn set_used(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }

    pub fn uniform_location(&self, name: &str) -> Result<gl::types::GLint, ShaderError> {
        let c_name = CString::new(name)
            .map_err(|_| ShaderError::InvalidName(name.to_owned()))?;

        let location = unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) };
        if location < 0 {
            return Err(ShaderError::MissingUniform(name.to_owned()));
        }

        Ok(location)
    }

    // setters expect the program to be bound with `set_used`

    pub fn set_float(&self, location: gl::types::GLint, value: f32) {
        unsafe {
            gl::Uniform1f(location, value);
        }
    }

    pub fn set_vec3(&self, location: gl::types::GLint, value: &glm::Vec3) {
        unsafe {
            gl::Uniform3f(location, value.x, value.y, value.z);
        }
    }

    pub fn set_mat4(&self, location: gl::types::GLint, value: &glm::Mat4) {
        unsafe {
            gl::UniformMatrix4fv(
                location,
                1,
                gl::FALSE,
                glm::value_ptr(value).as_ptr()
            );
        }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

fn shader_from_source(
    source: &str,
    shader_type: gl::types::GLenum
) -> Result<gl::types::GLuint, ShaderError> {
    let source = CString::new(source).map_err(|_| ShaderError::InvalidSource)?;
    let id = unsafe { gl::CreateShader(shader_type) };

    let mut success: gl::types::GLint = 1;
    unsafe {
        gl::ShaderSource(
            id,
            1,
            &source.as_ptr(),
            std::ptr::null());
        gl::CompileShader(id);
        gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut success);
    }

    if success == 0 {
        let mut len: gl::types::GLint = 0;
        unsafe {
            gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);
        }

        let mut buffer = info_log_buffer(len);
        unsafe {
            gl::GetShaderInfoLog(
                id,
                len,
                std::ptr::null_mut(),
                buffer.as_mut_ptr() as *mut gl::types::GLchar
            );
            gl::DeleteShader(id);
        }

        return Err(ShaderError::Compile(info_log_to_string(buffer)));
    }

    Ok(id)
}

fn info_log_buffer(len: gl::types::GLint) -> Vec<u8> {
    vec![0u8; len.max(1) as usize]
}

fn info_log_to_string(buffer: Vec<u8>) -> String {
    let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    String::from_utf8_lossy(&buffer[..end]).trim_end().to_owned()
}
