//! CPU-built mesh geometry shared by instances.
//!
//! Geometry is built once at init and uploaded by the host renderer. Each
//! piece is addressed by `GeometryId`; instances reference it by id and
//! supply their own model matrix and material.

use std::f32::consts::{PI, TAU};
use std::fmt;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use lyon::math::point;
use lyon::path::{FillRule, Path};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor, VertexBuffers,
};
use crate::api::types::GeometryId;

/// Segments used to approximate each ring circle.
pub const RING_SEGMENTS: u32 = 64;

/// Position, normal and UV. 8 floats = 32 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub const FLOATS: usize = 8;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Topology {
    Triangles = 0,
    Points = 1,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeometryData {
    pub vertices: Vec<MeshVertex>,
    /// Empty for point clouds.
    pub indices: Vec<u32>,
    pub topology: Topology,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    InvalidRing { inner: f32, outer: f32 },
    Tessellation(String),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidRing { inner, outer } => {
                write!(f, "ring needs 0 <= inner < outer, got inner={inner} outer={outer}")
            }
            GeometryError::Tessellation(reason) => write!(f, "ring tessellation failed: {reason}"),
        }
    }
}

impl std::error::Error for GeometryError {}

/// UV-sphere centered at the origin, poles on the Y axis.
pub fn build_sphere(radius: f32, width_segments: u32, height_segments: u32) -> GeometryData {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let mut vertices = Vec::with_capacity(((w + 1) * (h + 1)) as usize);
    let mut indices = Vec::with_capacity((w * h * 6) as usize);

    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let dir = Vec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            vertices.push(MeshVertex {
                position: (dir * radius).to_array(),
                normal: dir.normalize_or_zero().to_array(),
                uv: [u, 1.0 - v],
            });
        }
    }

    let row = w + 1;
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            // Pole rows collapse to a single triangle per quad
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    GeometryData { vertices, indices, topology: Topology::Triangles }
}

/// Vertex constructor for the annulus fill: flat in XY, facing +Z.
struct RingVertexCtor {
    outer: f32,
}

impl FillVertexConstructor<MeshVertex> for RingVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> MeshVertex {
        let p = vertex.position();
        MeshVertex {
            position: [p.x, p.y, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [
                (p.x / self.outer + 1.0) / 2.0,
                (p.y / self.outer + 1.0) / 2.0,
            ],
        }
    }
}

/// Flat annulus in the XY plane, tessellated with an even-odd fill of the
/// outer and inner circles.
pub fn build_ring(inner: f32, outer: f32, segments: u32) -> Result<GeometryData, GeometryError> {
    if !(inner >= 0.0 && outer > inner) {
        return Err(GeometryError::InvalidRing { inner, outer });
    }
    let segments = segments.max(3);

    let mut builder = Path::builder();
    for radius in [outer, inner] {
        if radius <= 0.0 {
            continue;
        }
        builder.begin(point(radius, 0.0));
        for i in 1..segments {
            let theta = i as f32 / segments as f32 * TAU;
            builder.line_to(point(radius * theta.cos(), radius * theta.sin()));
        }
        builder.close();
    }
    let path: Path = builder.build();

    let mut buffers: VertexBuffers<MeshVertex, u32> = VertexBuffers::new();
    let mut tessellator = FillTessellator::new();
    tessellator
        .tessellate_path(
            &path,
            &FillOptions::tolerance(0.01).with_fill_rule(FillRule::EvenOdd),
            &mut BuffersBuilder::new(&mut buffers, RingVertexCtor { outer }),
        )
        .map_err(|e| GeometryError::Tessellation(format!("{e:?}")))?;

    Ok(GeometryData {
        vertices: buffers.vertices,
        indices: buffers.indices,
        topology: Topology::Triangles,
    })
}

/// Unindexed point cloud.
pub fn build_points(positions: &[Vec3]) -> GeometryData {
    let vertices = positions
        .iter()
        .map(|p| MeshVertex { position: p.to_array(), ..Default::default() })
        .collect();
    GeometryData { vertices, indices: Vec::new(), topology: Topology::Points }
}

/// All geometry for the scene, indexed by `GeometryId`.
#[derive(Debug, Default)]
pub struct GeometryLibrary {
    items: Vec<GeometryData>,
}

impl GeometryLibrary {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn add(&mut self, data: GeometryData) -> GeometryId {
        let id = GeometryId(self.items.len() as u32);
        self.items.push(data);
        id
    }

    pub fn sphere(&mut self, radius: f32, width_segments: u32, height_segments: u32) -> GeometryId {
        self.add(build_sphere(radius, width_segments, height_segments))
    }

    pub fn ring(&mut self, inner: f32, outer: f32, segments: u32) -> Result<GeometryId, GeometryError> {
        Ok(self.add(build_ring(inner, outer, segments)?))
    }

    pub fn points(&mut self, positions: &[Vec3]) -> GeometryId {
        self.add(build_points(positions))
    }

    pub fn get(&self, id: GeometryId) -> Option<&GeometryData> {
        self.items.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // -- Host accessors. Unknown ids read as empty. --

    pub fn vertices_ptr(&self, id: GeometryId) -> *const f32 {
        self.get(id).map_or(std::ptr::null(), |g| g.vertices.as_ptr() as *const f32)
    }

    pub fn vertex_count(&self, id: GeometryId) -> u32 {
        self.get(id).map_or(0, |g| g.vertices.len() as u32)
    }

    pub fn indices_ptr(&self, id: GeometryId) -> *const u32 {
        self.get(id).map_or(std::ptr::null(), |g| g.indices.as_ptr())
    }

    pub fn index_count(&self, id: GeometryId) -> u32 {
        self.get(id).map_or(0, |g| g.indices.len() as u32)
    }

    pub fn topology(&self, id: GeometryId) -> Option<Topology> {
        self.get(id).map(|g| g.topology)
    }
}
