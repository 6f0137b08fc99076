//! The demo variants: what each one uploads, which shaders it builds, and what it needs loaded.

pub mod scene;

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use image::RgbaImage;
use log::{info, warn};

use crate::graphics::utils::{checkerboard, load_texture_image};

pub use self::scene::Scene;

/// How many textures the textured demos sample from.
pub const TEXTURE_SLOTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoKind {
    /// One white triangle from three vertices.
    Triangle,
    /// Indexed quad, drawn as wireframe to show its two triangles.
    Quad,
    /// Quad with per-vertex colors blending two textures.
    Textured,
    /// Textured quad spinning about its center.
    Transform,
}

impl DemoKind {
    pub const ALL: [DemoKind; 4] = [
        DemoKind::Triangle,
        DemoKind::Quad,
        DemoKind::Textured,
        DemoKind::Transform,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DemoKind::Triangle => "triangle",
            DemoKind::Quad => "quad",
            DemoKind::Textured => "textured",
            DemoKind::Transform => "transform",
        }
    }

    /// Built-in (vertex, fragment) source pair.
    pub fn shader_sources(self) -> (&'static str, &'static str) {
        match self {
            DemoKind::Triangle | DemoKind::Quad => (
                include_str!("../graphics/shaders/basic.vert"),
                include_str!("../graphics/shaders/white.frag"),
            ),
            DemoKind::Textured => (
                include_str!("../graphics/shaders/textured.vert"),
                include_str!("../graphics/shaders/textured.frag"),
            ),
            DemoKind::Transform => (
                include_str!("../graphics/shaders/transform.vert"),
                include_str!("../graphics/shaders/transform.frag"),
            ),
        }
    }

    pub fn starts_in_wireframe(self) -> bool {
        self == DemoKind::Quad
    }

    pub fn uses_textures(self) -> bool {
        match self {
            DemoKind::Textured | DemoKind::Transform => true,
            _ => false,
        }
    }

    pub fn geometry(self) -> Geometry {
        match self {
            DemoKind::Triangle => Geometry {
                vertices: &TRIANGLE_VERTICES,
                indices: None,
                attributes: &[Attribute { index: 0, size: 3, offset: 0 }],
                stride: 3,
            },
            DemoKind::Quad => Geometry {
                vertices: &QUAD_VERTICES,
                indices: Some(&QUAD_INDICES),
                attributes: &[Attribute { index: 0, size: 3, offset: 0 }],
                stride: 3,
            },
            DemoKind::Textured => Geometry {
                vertices: &COLORED_QUAD_VERTICES,
                indices: Some(&QUAD_INDICES),
                attributes: &[
                    Attribute { index: 0, size: 3, offset: 0 },
                    Attribute { index: 1, size: 3, offset: 3 },
                    Attribute { index: 2, size: 2, offset: 6 },
                ],
                stride: 8,
            },
            DemoKind::Transform => Geometry {
                vertices: &TEXTURED_QUAD_VERTICES,
                indices: Some(&QUAD_INDICES),
                attributes: &[
                    Attribute { index: 0, size: 3, offset: 0 },
                    Attribute { index: 1, size: 2, offset: 3 },
                ],
                stride: 5,
            },
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DemoKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        DemoKind::ALL.iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| anyhow!("Unknown demo {:?}", s))
    }
}

/// One vertex attribute, in floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub index: u32,
    pub size: i32,
    pub offset: usize,
}

/// The hard-coded vertex data of a demo. `stride` is in floats.
#[derive(Debug, Clone, Copy)]
pub struct Geometry {
    pub vertices: &'static [f32],
    pub indices: Option<&'static [u32]>,
    pub attributes: &'static [Attribute],
    pub stride: usize,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.stride
    }
}

const TRIANGLE_VERTICES: [f32; 9] = [
    // x     y     z
    -0.5, -0.5, 0.0,
     0.5, -0.5, 0.0,
     0.0,  0.5, 0.0,
];

const QUAD_VERTICES: [f32; 12] = [
    // x     y     z
     0.5,  0.5, 0.0, // top right
     0.5, -0.5, 0.0, // bottom right
    -0.5,  0.5, 0.0, // top left
    -0.5, -0.5, 0.0, // bottom left
];

const QUAD_INDICES: [u32; 6] = [
    0, 1, 2, // triangle 1
    1, 2, 3, // triangle 2
];

const COLORED_QUAD_VERTICES: [f32; 32] = [
    // x     y     z      r    g    b      u    v
     0.5,  0.5, 0.0,   1.0, 0.0, 0.0,   1.0, 1.0,
     0.5, -0.5, 0.0,   0.0, 1.0, 0.0,   1.0, 0.0,
    -0.5,  0.5, 0.0,   1.0, 1.0, 0.0,   0.0, 1.0,
    -0.5, -0.5, 0.0,   0.0, 0.0, 1.0,   0.0, 0.0,
];

const TEXTURED_QUAD_VERTICES: [f32; 20] = [
    // x     y     z      u    v
     0.5,  0.5, 0.0,   1.0, 1.0,
     0.5, -0.5, 0.0,   1.0, 0.0,
    -0.5,  0.5, 0.0,   0.0, 1.0,
    -0.5, -0.5, 0.0,   0.0, 0.0,
];

/// Reads `path` if given, otherwise uses the built-in source.
fn source_or_builtin(path: Option<&Path>, builtin: &'static str) -> Result<Cow<'static, str>> {
    match path {
        Some(p) => {
            let src = fs::read_to_string(p)
                .with_context(|| format!("Error reading shader source {}", p.display()))?;
            info!("Using shader source from {}", p.display());
            Ok(Cow::Owned(src))
        }
        None => Ok(Cow::Borrowed(builtin)),
    }
}

/// The (vertex, fragment) sources to build for `kind`, with optional files replacing either one.
pub fn resolve_shader_sources(
    kind: DemoKind,
    vert: Option<&Path>,
    frag: Option<&Path>,
) -> Result<(Cow<'static, str>, Cow<'static, str>)> {
    let (builtin_vert, builtin_frag) = kind.shader_sources();
    Ok((
        source_or_builtin(vert, builtin_vert)?,
        source_or_builtin(frag, builtin_frag)?,
    ))
}

/// Decodes the images for `kind`'s texture slots. Slots without a file get a checkerboard.
/// Demos that don't sample textures get none, and any files passed are ignored.
pub fn load_textures(kind: DemoKind, paths: &[PathBuf]) -> Result<Vec<RgbaImage>> {
    if !kind.uses_textures() {
        if !paths.is_empty() {
            warn!("The {} demo doesn't use textures; ignoring {} file(s)", kind, paths.len());
        }
        return Ok(vec![]);
    }

    if paths.len() > TEXTURE_SLOTS {
        warn!("Only {} textures are used; ignoring the rest", TEXTURE_SLOTS);
    }

    let fallbacks = [
        checkerboard(256, 32, [230, 150, 60, 255], [90, 50, 20, 255]),
        checkerboard(256, 64, [255, 255, 255, 0], [255, 255, 255, 255]),
    ];

    let mut images = Vec::with_capacity(TEXTURE_SLOTS);
    for (slot, fallback) in fallbacks.iter().enumerate() {
        match paths.get(slot) {
            Some(path) => images.push(load_texture_image(path)?),
            None => images.push(fallback.clone()),
        }
    }

    Ok(images)
}
