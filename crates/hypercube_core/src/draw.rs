//! Frame composition
//!
//! [`draw`] turns the current wireframe into an ordered list of 2D
//! primitives. Nothing here touches pixels: a renderer walks the
//! [`DrawList`] front to back, after fading the previous frame by
//! [`DrawList::fade`].

use crate::colors::{self, Color};
use crate::projection::Projector;
use crate::settings::Settings;
use crate::topology::{DirtyFlags, Wireframe};

/// Nodes at or past this index belong to the fourth dimension and above
const FIRST_HIGH_NODE: usize = 8;

pub type Point = (i32, i32);

/// One thing to draw
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: u32,
    },
    /// A filled quad; `alpha` 1.0 is opaque
    Polygon {
        points: [Point; 4],
        color: Color,
        alpha: f64,
    },
    /// A filled circle
    Circle {
        center: Point,
        radius: u32,
        color: Color,
    },
    Label {
        at: Point,
        text: String,
        color: Color,
        size: f64,
    },
}

/// Everything needed to render one frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    /// Multiply the previous frame by this before drawing (0 clears it)
    pub fade: f64,
    /// Primitives in painting order
    pub primitives: Vec<Primitive>,
}

impl DrawList {
    pub fn lines(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line { .. }))
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Polygon { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Circle { .. }))
    }

    pub fn labels(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Label { .. }))
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

/// Compose a frame.
///
/// Lists that are shown and dirty get depth sorted first, so the wireframe
/// is borrowed mutably. Painting order: vanishing point, center, edges,
/// faces, nodes and their labels.
pub fn draw(wireframe: &mut Wireframe, settings: &Settings, projector: &Projector) -> DrawList {
    let mut list = DrawList {
        fade: settings.ghost_factor(),
        primitives: Vec::new(),
    };

    if settings.show_vp {
        list.primitives.push(Primitive::Circle {
            center: projector.vanishing_point.screen_xy(),
            radius: settings.vp_radius,
            color: colors::VANISHING_POINT,
        });
    }

    if settings.show_center {
        list.primitives.push(Primitive::Circle {
            center: projector.get_xy(wireframe.center()),
            radius: settings.center_radius,
            color: colors::CENTER,
        });
    }

    if settings.show_edges {
        wireframe.sort_if_dirty(DirtyFlags::EDGES);
        push_edges(&mut list, wireframe, settings, projector);
    }

    if settings.show_faces {
        wireframe.sort_if_dirty(DirtyFlags::FACES);
        push_faces(&mut list, wireframe, settings, projector);
    }

    if settings.show_nodes || settings.show_node_ids || settings.show_coords {
        push_nodes(&mut list, wireframe, settings, projector);
    }

    list
}

fn push_edges(list: &mut DrawList, wireframe: &Wireframe, settings: &Settings, projector: &Projector) {
    let nodes = wireframe.nodes();
    for edge in wireframe.edges() {
        let high = edge.a >= FIRST_HIGH_NODE || edge.b >= FIRST_HIGH_NODE;
        let width = if high && settings.show_4_narrow {
            1
        } else {
            settings.edge_width
        };
        let color = if high && settings.show_4_gray {
            colors::DIM4_GRAY
        } else {
            edge.color
        };
        list.primitives.push(Primitive::Line {
            from: projector.get_xy(nodes.row(edge.a)),
            to: projector.get_xy(nodes.row(edge.b)),
            color,
            width,
        });
    }
}

/// Opaque faces hide the far half entirely, so only the nearer half is
/// drawn. Translucent faces are all drawn, growing more opaque with
/// distance so the back of the shape shows through the front.
fn push_faces(list: &mut DrawList, wireframe: &Wireframe, settings: &Settings, projector: &Projector) {
    let faces = wireframe.faces();
    let (Some(farthest), Some(nearest)) = (faces.first(), faces.last()) else {
        return;
    };
    let nodes = wireframe.nodes();
    let corners = |nodes_of: &[usize; 4]| nodes_of.map(|i| projector.get_xy(nodes.row(i)));

    if settings.opacity >= 1.0 {
        for face in &faces[faces.len() / 2..] {
            list.primitives.push(Primitive::Polygon {
                points: corners(&face.nodes),
                color: face.color,
                alpha: 1.0,
            });
        }
        return;
    }

    let z_max = wireframe.face_depth(farthest);
    let z_min = wireframe.face_depth(nearest);
    let z_range = z_max - z_min;
    for face in faces {
        let alpha = if z_range > 0.0 {
            let z = wireframe.face_depth(face);
            settings.opacity + (z - z_min) / z_range * (1.0 - settings.opacity)
        } else {
            settings.opacity
        };
        list.primitives.push(Primitive::Polygon {
            points: corners(&face.nodes),
            color: face.color,
            alpha,
        });
    }
}

fn push_nodes(list: &mut DrawList, wireframe: &Wireframe, settings: &Settings, projector: &Projector) {
    let radius = if settings.show_nodes { settings.node_radius } else { 0 };
    for (index, node) in wireframe.nodes().rows().enumerate() {
        let (x, y) = projector.get_xy(node);
        if settings.show_nodes {
            list.primitives.push(Primitive::Circle {
                center: (x, y),
                radius,
                color: colors::NODE,
            });
        }
        let text = match (settings.show_node_ids, settings.show_coords) {
            (true, true) => format!("{}:{}", index, format_coords(&node[..wireframe.dims()])),
            (true, false) => index.to_string(),
            (false, true) => format_coords(&node[..wireframe.dims()]),
            (false, false) => continue,
        };
        list.primitives.push(Primitive::Label {
            at: (x + radius as i32, y + 3),
            text,
            color: colors::TEXT,
            size: settings.font_size,
        });
    }
}

/// `[x, y, z, ...]` rounded to whole pixels
fn format_coords(coords: &[f64]) -> String {
    let parts: Vec<String> = coords
        .iter()
        .map(|c| format!("{}", c.round() as i64))
        .collect();
    format!("[{}]", parts.join(", "))
}
