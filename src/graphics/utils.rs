use std::path::Path;

use anyhow::{Context, Result};
use glam::Mat4;
use image::{Rgba, RgbaImage};

/// Decodes an image file for upload. Rows are flipped because OpenGL puts texture coordinate
/// (0, 0) at the bottom left, image files at the top left.
pub fn load_texture_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)
        .with_context(|| format!("Error loading texture {}", path.display()))?;

    Ok(img.flipv().to_rgba8())
}

/// A `size`x`size` checkerboard of `cell`-pixel squares, used when no texture file is given.
pub fn checkerboard(size: u32, cell: u32, a: [u8; 4], b: [u8; 4]) -> RgbaImage {
    let cell = cell.max(1);
    RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 { Rgba(a) } else { Rgba(b) }
    })
}

/// Rotation about the Z axis by `seconds` radians, the way the transform demo spins its quad.
pub fn spin_transform(seconds: f32) -> Mat4 {
    Mat4::from_rotation_z(seconds)
}

#[cfg(test)]
mod test {
    use super::*;
    use glam::Vec4;

    #[test]
    fn checkerboard_alternates_cells() {
        let white = [255, 255, 255, 255];
        let black = [0, 0, 0, 255];
        let img = checkerboard(8, 2, white, black);

        assert_eq!(img.dimensions(), (8, 8));
        assert_eq!(img.get_pixel(0, 0).0, white);
        assert_eq!(img.get_pixel(1, 1).0, white);
        assert_eq!(img.get_pixel(2, 0).0, black);
        assert_eq!(img.get_pixel(0, 2).0, black);
        assert_eq!(img.get_pixel(2, 2).0, white);
    }

    #[test]
    fn checkerboard_with_zero_cell_does_not_divide_by_zero() {
        let img = checkerboard(2, 0, [1, 1, 1, 1], [2, 2, 2, 2]);
        assert_eq!(img.get_pixel(0, 0).0, [1, 1, 1, 1]);
        assert_eq!(img.get_pixel(1, 0).0, [2, 2, 2, 2]);
    }

    #[test]
    fn spin_rotates_counter_clockwise() {
        let quarter = spin_transform(std::f32::consts::FRAC_PI_2);
        let v = quarter * Vec4::new(1.0, 0.0, 0.0, 1.0);

        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
        assert!((v.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn no_spin_is_identity() {
        assert_eq!(spin_transform(0.0), Mat4::IDENTITY);
    }

    #[test]
    fn missing_texture_file_names_the_path() {
        let err = load_texture_image(Path::new("no/such/texture.png")).unwrap_err();
        assert!(err.to_string().contains("no/such/texture.png"));
    }
}
