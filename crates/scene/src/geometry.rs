use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// A single vertex: position, unit normal, texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Which parametric shape produced a geometry, with its construction arguments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryKind {
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Plane {
        width: f32,
        height: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
}

/// Immutable indexed triangle list.
///
/// Built once by one of the constructors and never modified afterwards; only
/// read accessors are exposed.
#[derive(Debug, Clone)]
pub struct Geometry {
    kind: GeometryKind,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Geometry {
    /// UV sphere centred at the origin.
    ///
    /// `width_segments` runs around the equator (min 3), `height_segments`
    /// from pole to pole (min 2). Pole rows emit one triangle per quad.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let ws = width_segments.max(3);
        let hs = height_segments.max(2);
        let row = ws + 1;

        let mut vertices = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);
        for iy in 0..=hs {
            let v = iy as f32 / hs as f32;
            // Centre the texture seam on the single pole vertex.
            let u_offset = if iy == 0 {
                0.5 / ws as f32
            } else if iy == hs {
                -0.5 / ws as f32
            } else {
                0.0
            };
            for ix in 0..=ws {
                let u = ix as f32 / ws as f32;
                let phi = u * TAU;
                let theta = v * PI;
                let position = Vec3::new(
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                );
                vertices.push(Vertex {
                    position: position.to_array(),
                    normal: position.normalize_or_zero().to_array(),
                    uv: [u + u_offset, 1.0 - v],
                });
            }
        }

        let mut indices = Vec::with_capacity((ws * (2 * hs - 2) * 3) as usize);
        for iy in 0..hs {
            for ix in 0..ws {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != hs - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self {
            kind: GeometryKind::Sphere {
                radius,
                width_segments: ws,
                height_segments: hs,
            },
            vertices,
            indices,
        }
    }

    /// Rectangle in the XY plane facing +Z, centred at the origin.
    pub fn plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        let ws = width_segments.max(1);
        let hs = height_segments.max(1);
        let row = ws + 1;
        let segment_width = width / ws as f32;
        let segment_height = height / hs as f32;

        let mut vertices = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);
        for iy in 0..=hs {
            let y = iy as f32 * segment_height - height / 2.0;
            for ix in 0..=ws {
                let x = ix as f32 * segment_width - width / 2.0;
                vertices.push(Vertex {
                    position: [x, -y, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    uv: [ix as f32 / ws as f32, 1.0 - iy as f32 / hs as f32],
                });
            }
        }

        let mut indices = Vec::with_capacity((ws * hs * 6) as usize);
        for iy in 0..hs {
            for ix in 0..ws {
                let a = ix + row * iy;
                let b = ix + row * (iy + 1);
                let c = ix + 1 + row * (iy + 1);
                let d = ix + 1 + row * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            kind: GeometryKind::Plane {
                width,
                height,
                width_segments: ws,
                height_segments: hs,
            },
            vertices,
            indices,
        }
    }

    /// Ring torus lying in the XY plane.
    ///
    /// `radius` is the distance from the centre to the middle of the tube,
    /// `tube` the tube radius. `radial_segments` go around the tube,
    /// `tubular_segments` along the ring.
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let rs = radial_segments.max(3);
        let ts = tubular_segments.max(3);
        let row = ts + 1;

        let mut vertices = Vec::with_capacity(((rs + 1) * (ts + 1)) as usize);
        for j in 0..=rs {
            let v = j as f32 / rs as f32 * TAU;
            for i in 0..=ts {
                let u = i as f32 / ts as f32 * TAU;
                let position = Vec3::new(
                    (radius + tube * v.cos()) * u.cos(),
                    (radius + tube * v.cos()) * u.sin(),
                    tube * v.sin(),
                );
                let centre = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
                vertices.push(Vertex {
                    position: position.to_array(),
                    normal: (position - centre).normalize_or_zero().to_array(),
                    uv: [i as f32 / ts as f32, j as f32 / rs as f32],
                });
            }
        }

        let mut indices = Vec::with_capacity((rs * ts * 6) as usize);
        for j in 1..=rs {
            for i in 1..=ts {
                let a = row * j + i - 1;
                let b = row * (j - 1) + i - 1;
                let c = row * (j - 1) + i;
                let d = row * j + i;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            kind: GeometryKind::Torus {
                radius,
                tube,
                radial_segments: rs,
                tubular_segments: ts,
            },
            vertices,
            indices,
        }
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
