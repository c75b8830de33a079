//! Album art for the disc.
//! The image is decoded once, uploaded as a texture and painted as a
//! textured circle whose UVs turn with the disc.

use egui::epaint::{Mesh, Vertex};
use egui::{pos2, Color32, ColorImage, Context, Pos2, TextureHandle, TextureId, TextureOptions};
use std::f32::consts::TAU;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Edge segments of the painted circle
const SEGMENTS: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum CoverError {
    #[error("Cannot read cover {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot decode cover: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decode encoded image bytes (PNG or JPEG) into an egui image
pub fn decode_cover(bytes: &[u8]) -> Result<ColorImage, CoverError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    let pixels = image.into_raw();
    Ok(ColorImage::from_rgba_unmultiplied(size, &pixels))
}

pub fn read_cover(path: &Path) -> Result<ColorImage, CoverError> {
    let bytes = fs::read(path).map_err(|source| CoverError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_cover(&bytes)
}

/// Upload the cover at `path`, if there is a usable one
pub fn load_cover(ctx: &Context, path: &Path) -> Option<TextureHandle> {
    match read_cover(path) {
        Ok(image) => {
            info!(path = %path.display(), size = ?image.size, "cover loaded");
            Some(ctx.load_texture("album-cover", image, TextureOptions::LINEAR))
        }
        Err(CoverError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no cover art");
            None
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cover art unusable");
            None
        }
    }
}

/// Circle of `radius` textured with the centred square of an image of
/// `image_size` pixels, turned by `angle` radians.
pub fn cover_mesh(
    texture: TextureId,
    image_size: [usize; 2],
    center: Pos2,
    radius: f32,
    angle: f32,
) -> Mesh {
    let [width, height] = image_size;
    let side = width.min(height).max(1) as f32;
    // half extent of the square crop in UV units
    let half_u = side / width.max(1) as f32 / 2.0;
    let half_v = side / height.max(1) as f32 / 2.0;

    let mut mesh = Mesh::with_texture(texture);
    mesh.vertices.push(Vertex {
        pos: center,
        uv: pos2(0.5, 0.5),
        color: Color32::WHITE,
    });
    for index in 0..SEGMENTS {
        let theta = TAU * index as f32 / SEGMENTS as f32;
        // the image turns with the disc, so sample it at the unturned angle
        let (sin, cos) = (theta - angle).sin_cos();
        mesh.vertices.push(Vertex {
            pos: center + radius * egui::vec2(theta.cos(), theta.sin()),
            uv: pos2(0.5 + half_u * cos, 0.5 + half_v * sin),
            color: Color32::WHITE,
        });
    }
    for index in 0..SEGMENTS as u32 {
        let next = (index + 1) % SEGMENTS as u32;
        mesh.add_triangle(0, index + 1, next + 1);
    }
    mesh
}
