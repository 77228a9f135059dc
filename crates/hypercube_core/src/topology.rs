//! Hyper-rectangle wireframe topology
//!
//! A wireframe of `dims` dimensions has `2^dims` nodes, `dims * 2^(dims-1)`
//! edges and `C(dims, 2) * 2^(dims-2)` square faces. It is built by repeated
//! extension: starting from a single point, every dimension doubles the node
//! set and sweeps each existing edge into a face.
//!
//! Node coordinates live in a [`NodeMatrix`] and are mutated in place by
//! transforms. The topology itself never changes after the build.

use bitflags::bitflags;
use hypercube_math::{HMatrix, NodeMatrix};

use crate::colors::{self, Color, FaceColors};

/// Axis that maps to on-screen depth
pub const DEPTH_AXIS: usize = 2;

bitflags! {
    /// Lists whose depth order is stale and must be re-sorted before drawing
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// Edges need sorting
        const EDGES = 1 << 0;
        /// Faces need sorting
        const FACES = 1 << 1;
        /// Both lists need sorting
        const ALL = Self::EDGES.bits() | Self::FACES.bits();
    }
}

/// A line between two nodes that differ along exactly one axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// First node index
    pub a: usize,
    /// Second node index
    pub b: usize,
    /// The axis along which the two nodes differ
    pub axis: usize,
    pub color: Color,
}

/// Winding of a face relative to the face it was copied from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Front,
    Back,
}

impl Orientation {
    /// The opposite orientation
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Front => Orientation::Back,
            Orientation::Back => Orientation::Front,
        }
    }
}

/// A planar quad spanned by two axes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    /// Corner node indices, in drawing order around the quad
    pub nodes: [usize; 4],
    pub orientation: Orientation,
    /// The two axes spanning the face's plane (lower first)
    pub plane: [usize; 2],
    pub color: Color,
}

/// An N-dimensional hyper-rectangle
#[derive(Clone, Debug)]
pub struct Wireframe {
    dims: usize,
    nodes: NodeMatrix,
    edges: Vec<Edge>,
    faces: Vec<Face>,
    center: Vec<f64>,
    dirty: DirtyFlags,
}

impl Wireframe {
    /// Build a hyper-rectangle with a private face color table.
    ///
    /// See [`Wireframe::build_with_colors`].
    pub fn build(dims: usize, origin: &[f64], sizes: &[f64]) -> Self {
        Self::build_with_colors(dims, origin, sizes, &mut FaceColors::new())
    }

    /// Build a hyper-rectangle.
    ///
    /// # Arguments
    /// * `dims` - Number of dimensions (at least 1)
    /// * `origin` - Minimum corner, one coordinate per axis
    /// * `sizes` - Extent per axis; padded by repeating the last value when
    ///   shorter than `dims`
    /// * `face_colors` - Memo table for face plane colors
    ///
    /// # Panics
    /// If `dims` is 0, `sizes` is empty, or `origin` is shorter than `dims`.
    pub fn build_with_colors(
        dims: usize,
        origin: &[f64],
        sizes: &[f64],
        face_colors: &mut FaceColors,
    ) -> Self {
        assert!(dims >= 1, "a wireframe needs at least one dimension");
        assert!(!sizes.is_empty(), "at least one size is required");
        assert!(origin.len() >= dims, "origin needs {} coordinates", dims);

        let sizes = pad_sizes(sizes, dims);

        // Faces hold their plane while building; colors come afterwards.
        let mut points: Vec<Vec<f64>> = vec![Vec::new()];
        let mut edges: Vec<Edge> = Vec::new();
        let mut faces: Vec<Face> = Vec::new();

        for d in 0..dims {
            let begin = origin[d];
            let end = begin + sizes[d];
            let n = points.len();

            // Copies of everything that exists so far, moved into the new half
            let shifted_faces: Vec<Face> = faces
                .iter()
                .map(|f| Face {
                    nodes: f.nodes.map(|i| i + n),
                    orientation: f.orientation.flipped(),
                    ..*f
                })
                .collect();
            let shifted_edges: Vec<Edge> = edges
                .iter()
                .map(|e| Edge {
                    a: e.a + n,
                    b: e.b + n,
                    ..*e
                })
                .collect();

            // Sweeping an edge along the new axis traces out a face
            for e in &edges {
                faces.push(Face {
                    nodes: [e.a, e.b, e.b + n, e.a + n],
                    orientation: Orientation::Front,
                    plane: [e.axis, d],
                    color: Color::BLACK,
                });
            }

            let mut new_points = Vec::with_capacity(n);
            let edge_color = colors::edge_color(d);
            for (i, point) in points.iter_mut().enumerate() {
                let mut copy = point.clone();
                point.push(begin);
                copy.push(end);
                new_points.push(copy);
                edges.push(Edge {
                    a: i,
                    b: i + n,
                    axis: d,
                    color: edge_color,
                });
            }

            points.extend(new_points);
            edges.extend(shifted_edges);
            faces.extend(shifted_faces);
        }

        for face in &mut faces {
            face.color = face_colors.color_for(face.plane[0], face.plane[1]);
        }

        let center = (0..dims).map(|d| origin[d] + sizes[d] / 2.0).collect();

        log::debug!(
            "Built {}-D wireframe: {} nodes, {} edges, {} faces",
            dims,
            points.len(),
            edges.len(),
            faces.len()
        );

        Self {
            dims,
            nodes: NodeMatrix::from_points(dims, &points),
            edges,
            faces,
            center,
            dirty: DirtyFlags::ALL,
        }
    }

    /// Number of spatial dimensions
    #[inline]
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Homogeneous node coordinates
    #[inline]
    pub fn nodes(&self) -> &NodeMatrix {
        &self.nodes
    }

    /// Edges, in their current draw order
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Faces, in their current draw order
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Pivot for rotation and scaling
    #[inline]
    pub fn center(&self) -> &[f64] {
        &self.center
    }

    /// Which lists still need depth sorting
    #[inline]
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Mark lists as needing a depth sort
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Apply a transform to every node
    pub fn transform(&mut self, matrix: &HMatrix) {
        self.nodes.transform(matrix);
    }

    /// Wrap `matrix` so it acts about the center: move to the origin,
    /// apply, move back.
    pub fn about_center(&self, matrix: &HMatrix) -> HMatrix {
        let normalize: Vec<f64> = self.center.iter().map(|c| -c).collect();
        HMatrix::translation(&normalize)
            .mul(matrix)
            .mul(&HMatrix::translation(&self.center))
    }

    /// Move every node by `delta` along `axis`, carrying the center along.
    pub fn translate_axis(&mut self, axis: usize, delta: f64) {
        assert!(axis < self.dims, "axis {} out of range", axis);
        let mut vector = vec![0.0; self.dims];
        vector[axis] = delta;
        self.nodes.transform(&HMatrix::translation(&vector));
        self.center[axis] += delta;
    }

    /// Depth key of an edge: sum of its nodes' z coordinates
    pub fn edge_depth(&self, edge: &Edge) -> f64 {
        depth_of(&self.nodes, self.dims, &[edge.a, edge.b])
    }

    /// Depth key of a face: sum of its corners' z coordinates
    pub fn face_depth(&self, face: &Face) -> f64 {
        depth_of(&self.nodes, self.dims, &face.nodes)
    }

    /// Sort the requested lists farthest-first if they are dirty.
    ///
    /// Returns the flags that were actually sorted.
    pub fn sort_if_dirty(&mut self, wanted: DirtyFlags) -> DirtyFlags {
        let todo = self.dirty & wanted;
        if todo.contains(DirtyFlags::EDGES) {
            self.sort_edges();
        }
        if todo.contains(DirtyFlags::FACES) {
            self.sort_faces();
        }
        todo
    }

    /// Sort edges so the farthest comes first (painter's algorithm)
    pub fn sort_edges(&mut self) {
        let (nodes, dims) = (&self.nodes, self.dims);
        self.edges.sort_by(|x, y| {
            let kx = depth_of(nodes, dims, &[x.a, x.b]);
            let ky = depth_of(nodes, dims, &[y.a, y.b]);
            ky.total_cmp(&kx)
        });
        self.dirty.remove(DirtyFlags::EDGES);
    }

    /// Sort faces so the farthest comes first
    pub fn sort_faces(&mut self) {
        let (nodes, dims) = (&self.nodes, self.dims);
        self.faces.sort_by(|x, y| {
            depth_of(nodes, dims, &y.nodes).total_cmp(&depth_of(nodes, dims, &x.nodes))
        });
        self.dirty.remove(DirtyFlags::FACES);
    }
}

fn depth_of(nodes: &NodeMatrix, dims: usize, indices: &[usize]) -> f64 {
    if dims <= DEPTH_AXIS {
        return 0.0;
    }
    indices.iter().map(|&i| nodes.coord(i, DEPTH_AXIS)).sum()
}

fn pad_sizes(sizes: &[f64], dims: usize) -> Vec<f64> {
    let last = sizes[sizes.len() - 1];
    (0..dims).map(|d| sizes.get(d).copied().unwrap_or(last)).collect()
}

/// Fraction of the smaller viewport side given to the largest axis.
///
/// Chosen so the shape nearly always stays on screen whatever the rotation:
/// 0.56 for 3 dimensions shrinking geometrically to 0.30 at 10.
pub fn screen_fraction(dims: usize) -> f64 {
    const R3: f64 = 0.56;
    const R10: f64 = 0.3;
    if dims <= 3 {
        return R3;
    }
    let ratio = (R10 / R3).powf(1.0 / 7.0);
    R3 * ratio.powi(dims as i32 - 3)
}

/// Placement of a wireframe inside a viewport
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub origin: Vec<f64>,
    pub sizes: Vec<f64>,
}

impl Layout {
    /// Center a hyper-rectangle with the given aspect ratios in a viewport.
    ///
    /// The largest ratio gets `min(width, height) * screen_fraction(dims)`
    /// pixels and the others scale with it. Axes past the second start at 0.
    pub fn for_view(dims: usize, ratios: &[u32], width: u32, height: u32) -> Self {
        assert!(!ratios.is_empty(), "at least one aspect ratio is required");
        let max_ratio = ratios.iter().copied().max().unwrap_or(1).max(1) as f64;
        let screen_size = width.min(height) as f64 * screen_fraction(dims);
        let sizes: Vec<f64> = ratios
            .iter()
            .map(|&r| screen_size * r as f64 / max_ratio)
            .collect();
        let sizes = pad_sizes(&sizes, dims.max(2));

        let mut origin = vec![0.0; dims.max(2)];
        origin[0] = (width as f64 - sizes[0]) / 2.0;
        origin[1] = (height as f64 - sizes[1]) / 2.0;

        Self { origin, sizes }
    }
}
