use anyhow::{Context, Result};
use image::RgbaImage;
use log::{debug, warn};
use shader::ShaderProgram;

use crate::graphics::opengl::*;
use crate::graphics::utils::spin_transform;

use super::DemoKind;

const SAMPLER_NAMES: [&str; 2] = ["texture1", "texture2"];

/// Everything a running demo owns on the GPU. Built once after the context is up and dropped
/// before it goes away.
pub struct Scene {
    kind: DemoKind,
    program: ShaderProgram,
    vao: GlVertexArray,
    _vbo: GlVertexBuffer,
    ebo: Option<GlElementBuffer>,
    textures: Vec<GlTexture>,
    transform: Option<i32>,
}

impl Scene {
    /// Uploads `kind`'s geometry and `images`, and wires the program's samplers to them. `program`
    /// must already be built and active.
    pub fn build(kind: DemoKind, program: ShaderProgram, images: &[RgbaImage]) -> Result<Self> {
        let geometry = kind.geometry();

        let vao = GlVertexArray::generate();
        vao.bind();

        let vbo = GlVertexBuffer::init(geometry.vertices);
        for attr in geometry.attributes {
            set_vertex_attrib(attr.index, attr.offset, attr.size, geometry.stride);
        }

        // The element buffer binding is part of the VAO's state, so it is set up while bound
        let ebo = geometry.indices.map(GlElementBuffer::init);
        unbind_buffers(GlBufferType::Array);

        let mut textures = Vec::with_capacity(images.len());
        for (unit, img) in images.iter().enumerate() {
            let texture = GlTexture::from_image(img)
                .with_context(|| format!("Error uploading texture {}", unit))?;
            textures.push(texture);

            match SAMPLER_NAMES.get(unit).and_then(|name| program.uniform_location(name)) {
                Some(loc) => unsafe { gl::Uniform1i(loc, unit as i32) },
                None => warn!("Shader program has no sampler for texture unit {}", unit),
            }
        }

        let transform = if kind == DemoKind::Transform {
            let loc = program.uniform_location("transform");
            if loc.is_none() {
                warn!("Shader program has no `transform` uniform; the quad won't spin");
            }
            loc
        } else {
            None
        };

        debug!("Built {} scene: {} vertices, {} textures", kind, geometry.vertex_count(), textures.len());

        Ok(Self { kind, program, vao, _vbo: vbo, ebo, textures, transform })
    }

    pub fn kind(&self) -> DemoKind { self.kind }

    /// Draws one frame's worth of geometry. `seconds` is the time since the demo started.
    pub fn draw(&self, seconds: f32) {
        self.program.set_used();

        for (unit, texture) in self.textures.iter().enumerate() {
            texture.bind_to_unit(unit as u32);
        }

        if let Some(loc) = self.transform {
            let matrix = spin_transform(seconds).to_cols_array();
            unsafe { gl::UniformMatrix4fv(loc, 1, gl::FALSE, matrix.as_ptr()) };
        }

        self.vao.bind();
        match &self.ebo {
            Some(ebo) => draw_elements(ebo.len()),
            None => draw_arrays(self.kind.geometry().vertex_count() as i32),
        }
    }
}
