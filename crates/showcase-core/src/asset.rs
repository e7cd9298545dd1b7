//! Binary glTF to CPU mesh conversion.
//!
//! Only self-contained `.glb` files are accepted: every buffer must live in
//! the binary chunk, and no extension may be required. All triangle
//! primitives of the default scene are merged into one vertex stream with
//! node transforms baked in, then recentered on the bounds center.

use crate::error::AssetError;
use crate::framing::Aabb;
use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3, Vec4};

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

/// Merged, recentered geometry plus its local bounds.
#[derive(Clone, Debug)]
pub struct ModelAsset {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub bounds: Aabb,
}

impl ModelAsset {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

pub fn parse_glb(path: &str, bytes: &[u8]) -> Result<ModelAsset, AssetError> {
    let gltf = gltf::Gltf::from_slice(bytes).map_err(|source| AssetError::Parse {
        path: path.to_string(),
        source,
    })?;

    if let Some(ext) = gltf.extensions_required().next() {
        return Err(AssetError::UnsupportedExtension {
            path: path.to_string(),
            extension: ext.to_string(),
        });
    }
    if gltf
        .buffers()
        .any(|b| !matches!(b.source(), gltf::buffer::Source::Bin))
    {
        return Err(AssetError::ExternalBuffer {
            path: path.to_string(),
        });
    }

    let blob = gltf.blob.as_deref();
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let roots: Vec<gltf::Node> = match gltf.default_scene().or_else(|| gltf.scenes().next()) {
        Some(scene) => scene.nodes().collect(),
        None => gltf.nodes().collect(),
    };
    for node in &roots {
        collect_node(path, node, Mat4::IDENTITY, blob, &mut vertices, &mut indices)?;
    }

    let bounds = Aabb::from_points(vertices.iter().map(|v| Vec3::from_array(v.position)));
    if indices.is_empty() || bounds.is_empty() {
        return Err(AssetError::Empty {
            path: path.to_string(),
        });
    }

    let center = bounds.center();
    for v in &mut vertices {
        v.position = (Vec3::from_array(v.position) - center).to_array();
    }
    let bounds = Aabb::new(bounds.min - center, bounds.max - center);

    log::info!(
        "[asset] {path}: {} vertices, {} triangles, radius {:.2}",
        vertices.len(),
        indices.len() / 3,
        bounds.bounding_radius()
    );
    Ok(ModelAsset {
        vertices,
        indices,
        bounds,
    })
}

fn collect_node(
    path: &str,
    node: &gltf::Node,
    parent: Mat4,
    blob: Option<&[u8]>,
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u32>,
) -> Result<(), AssetError> {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        let normal_m = Mat3::from_mat4(world).inverse().transpose();
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::debug!("[asset] {path}: skipping {:?} primitive", primitive.mode());
                continue;
            }
            let reader = primitive.reader(|buffer| match buffer.source() {
                gltf::buffer::Source::Bin => blob,
                gltf::buffer::Source::Uri(_) => None,
            });

            let positions: Vec<Vec3> = reader
                .read_positions()
                .ok_or_else(|| AssetError::MissingPositions {
                    path: path.to_string(),
                })?
                .map(|p| world.transform_point3(Vec3::from_array(p)))
                .collect();
            let normals: Option<Vec<Vec3>> = reader.read_normals().map(|iter| {
                iter.map(|n| (normal_m * Vec3::from_array(n)).normalize_or_zero())
                    .collect()
            });
            let colors: Option<Vec<Vec4>> = reader
                .read_colors(0)
                .map(|iter| iter.into_rgba_f32().map(Vec4::from_array).collect());
            let factor = Vec4::from_array(
                primitive
                    .material()
                    .pbr_metallic_roughness()
                    .base_color_factor(),
            );

            let local: Vec<u32> = match reader.read_indices() {
                Some(iter) => iter.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };

            let base = vertices.len() as u32;
            for (i, p) in positions.iter().enumerate() {
                let color = colors
                    .as_ref()
                    .and_then(|c| c.get(i))
                    .map_or(factor, |c| *c * factor);
                vertices.push(Vertex {
                    position: p.to_array(),
                    normal: normals
                        .as_ref()
                        .and_then(|n| n.get(i))
                        .copied()
                        .unwrap_or(Vec3::ZERO)
                        .to_array(),
                    color: color.to_array(),
                });
            }

            let start = indices.len();
            indices.extend(
                local
                    .chunks_exact(3)
                    .filter(|t| t.iter().all(|&i| (i as usize) < positions.len()))
                    .flat_map(|t| t.iter().map(|&i| base + i)),
            );
            if normals.is_none() {
                flat_normals(vertices, &indices[start..]);
            }
        }
    }

    for child in node.children() {
        collect_node(path, &child, world, blob, vertices, indices)?;
    }
    Ok(())
}

/// Accumulate face normals into vertices that came without any.
fn flat_normals(vertices: &mut [Vertex], tris: &[u32]) {
    for t in tris.chunks_exact(3) {
        let [a, b, c] = [t[0] as usize, t[1] as usize, t[2] as usize];
        let pa = Vec3::from_array(vertices[a].position);
        let pb = Vec3::from_array(vertices[b].position);
        let pc = Vec3::from_array(vertices[c].position);
        let n = (pb - pa).cross(pc - pa);
        for i in [a, b, c] {
            let acc = Vec3::from_array(vertices[i].normal) + n;
            vertices[i].normal = acc.to_array();
        }
    }
    for i in tris {
        let v = &mut vertices[*i as usize];
        v.normal = Vec3::from_array(v.normal).normalize_or_zero().to_array();
    }
}
