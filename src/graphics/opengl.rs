//! Safe wrappers over the handful of raw OpenGL objects the demos use.
//!
//! Each wrapper owns one GL object and deletes it on drop, so a demo's resources go away with the
//! `Scene` that holds them. They all assume `gl::load_with` has run and the context is current on
//! this thread.

use std::ffi::{c_void, CStr};
use std::mem::size_of;
use std::ptr::null;

use anyhow::{bail, Result};
use gl;
use image::RgbaImage;

/// Vertex array object: remembers the attribute layout and the element buffer bound while it was
/// bound.
pub struct GlVertexArray {
    id: u32
}

impl GlVertexArray {
    pub fn id(&self) -> u32 { self.id }

    pub fn generate() -> Self {
        let mut vao = 0u32;
        unsafe { gl::GenVertexArrays(1, &mut vao) };
        Self { id: vao }
    }

    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.id) }
    }
}

impl Drop for GlVertexArray {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.id) }
    }
}

pub enum GlBufferType {
    Array = gl::ARRAY_BUFFER as isize,
    Element = gl::ELEMENT_ARRAY_BUFFER as isize
}

/// Vertex data sent to the graphics card. Vertices don't have to be spatial; they can carry
/// colors, texture coordinates, or anything else the vertex shader reads.
pub struct GlVertexBuffer {
    id: u32
}

impl GlVertexBuffer {
    pub fn id(&self) -> u32 { self.id }

    pub fn init(data: &[f32]) -> Self {
        let vbo = Self::generate();
        vbo.bind();
        unsafe {
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (data.len() * size_of::<f32>()) as isize,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW
            );
        }

        vbo
    }

    pub fn generate() -> Self {
        let mut vbo = 0u32;
        unsafe { gl::GenBuffers(1, &mut vbo) };
        Self { id: vbo }
    }

    pub fn bind(&self) {
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, self.id) }
    }
}

impl Drop for GlVertexBuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.id) }
    }
}

/// A list of vertex indices, so vertices shared between triangles are only sent once. Has to be
/// created while the owning vertex array is bound.
pub struct GlElementBuffer {
    id: u32,
    len: usize,
}

impl GlElementBuffer {
    pub fn id(&self) -> u32 { self.id }

    pub fn len(&self) -> usize { self.len }

    pub fn init(data: &[u32]) -> Self {
        let mut ebo = Self::generate();
        ebo.bind();
        unsafe {
            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                (data.len() * size_of::<u32>()) as isize,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW
            );
        }
        ebo.len = data.len();

        ebo
    }

    pub fn generate() -> Self {
        let mut ebo = 0u32;
        unsafe { gl::GenBuffers(1, &mut ebo) };
        Self { id: ebo, len: 0 }
    }

    pub fn bind(&self) {
        unsafe { gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, self.id) }
    }
}

impl Drop for GlElementBuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.id) }
    }
}

/// An RGBA image uploaded for sampling in the fragment shader.
pub struct GlTexture {
    id: u32,
}

impl GlTexture {
    pub fn id(&self) -> u32 { self.id }

    pub fn from_image(img: &RgbaImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            bail!("Cannot upload an empty {}x{} texture", width, height);
        }

        let mut id: u32 = 0;
        unsafe {
            gl::GenTextures(1, &mut id);
            gl::BindTexture(gl::TEXTURE_2D, id);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR_MIPMAP_LINEAR as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA as i32,
                width as i32,
                height as i32,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                img.as_raw().as_ptr() as *const c_void
            );
            gl::GenerateMipmap(gl::TEXTURE_2D);
        }

        Ok(GlTexture { id })
    }

    /// Binds to texture unit `unit`, i.e. the value the sampler uniform should hold.
    pub fn bind_to_unit(&self, unit: u32) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit);
            gl::BindTexture(gl::TEXTURE_2D, self.id);
        }
    }
}

impl Drop for GlTexture {
    fn drop(&mut self) {
        unsafe { gl::DeleteTextures(1, &self.id) }
    }
}

pub fn unbind_buffers(buffer_type: GlBufferType) {
    unsafe { gl::BindBuffer(buffer_type as u32, 0); }
}

/// Describes attribute `index` as `size` floats starting `offset` floats into each vertex of
/// `stride` floats, reading from the currently bound array buffer.
pub fn set_vertex_attrib(index: u32, offset: usize, size: i32, stride: usize) {
    unsafe {
        gl::VertexAttribPointer(
            index,
            size,
            gl::FLOAT,
            gl::FALSE,
            (stride * size_of::<f32>()) as i32,
            (offset * size_of::<f32>()) as *const c_void
        );
        gl::EnableVertexAttribArray(index);
    }
}

pub fn set_wireframe(on: bool) {
    let mode = if on { gl::LINE } else { gl::FILL };
    unsafe { gl::PolygonMode(gl::FRONT_AND_BACK, mode) }
}

pub fn set_viewport(width: u32, height: u32) {
    unsafe { gl::Viewport(0, 0, width as i32, height as i32) }
}

pub fn clear(color: [f32; 4]) {
    unsafe {
        gl::ClearColor(color[0], color[1], color[2], color[3]);
        gl::Clear(gl::COLOR_BUFFER_BIT);
    }
}

pub fn enable_alpha_blending() {
    unsafe {
        gl::Enable(gl::BLEND);
        gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
    }
}

/// `GL_VERSION`, or an empty string if the driver returns nothing.
pub fn version_string() -> String {
    let ptr = unsafe { gl::GetString(gl::VERSION) };
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr as *const _) }
        .to_string_lossy()
        .into_owned()
}

pub fn draw_arrays(count: i32) {
    unsafe { gl::DrawArrays(gl::TRIANGLES, 0, count) }
}

pub fn draw_elements(count: usize) {
    unsafe { gl::DrawElements(gl::TRIANGLES, count as i32, gl::UNSIGNED_INT, null()) }
}
