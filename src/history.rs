//! Command-based undo/redo over the mesh store.
//!
//! Every mutation is a `Command` variant carrying exactly the state it
//! needs to invert itself; nothing captures references into the live mesh.

use log::debug;

use crate::mesh::Mesh;
use crate::model::{Rgb, Triangle, Vec2, VertexId};
use crate::sampler::{average_color, ImageData};

#[derive(Clone, Debug)]
pub enum Command {
    AddTriangle {
        triangle: Triangle,
    },
    RemoveTriangle {
        triangle: Triangle,
        /// Position in the mesh list; order affects top-most hit testing,
        /// so undo must re-insert at the same slot.
        index: usize,
    },
    MoveVertex {
        vertex: VertexId,
        from: Vec2,
        to: Vec2,
        /// Incident triangles with their pre-move colors, captured at
        /// construction. Revert restores these verbatim instead of
        /// resampling, so a float round-trip cannot drift the colors.
        affected: Vec<(usize, Rgb)>,
    },
    Replace {
        old: Vec<Triangle>,
        new: Vec<Triangle>,
    },
}

impl Command {
    /// Build a MoveVertex command. Must be called while the incident
    /// triangles still hold their pre-move colors.
    pub fn move_vertex(mesh: &Mesh, vertex: VertexId, from: Vec2, to: Vec2) -> Command {
        let affected = mesh
            .triangles_with_vertex(vertex)
            .into_iter()
            .map(|i| (i, mesh.triangles()[i].color))
            .collect();
        Command::MoveVertex {
            vertex,
            from,
            to,
            affected,
        }
    }

    /// Build a Replace command. Both the outgoing and incoming lists are
    /// snapshotted now, so later mutation of the caller's vector cannot
    /// corrupt history.
    pub fn replace(mesh: &Mesh, new: Vec<Triangle>) -> Command {
        Command::Replace {
            old: mesh.triangles().to_vec(),
            new,
        }
    }

    pub fn apply(&self, mesh: &mut Mesh, image: Option<&ImageData>) {
        match self {
            Command::AddTriangle { triangle } => mesh.push_triangle(*triangle),
            Command::RemoveTriangle { index, .. } => {
                mesh.remove_triangle(*index);
            }
            Command::MoveVertex {
                vertex,
                to,
                affected,
                ..
            } => {
                mesh.set_vertex(*vertex, *to);
                for &(i, _) in affected {
                    let t = mesh.triangles()[i];
                    let color = match image {
                        Some(img) => average_color(
                            img,
                            mesh.vertex(t.v[0]),
                            mesh.vertex(t.v[1]),
                            mesh.vertex(t.v[2]),
                        ),
                        None => Rgb::NEUTRAL,
                    };
                    mesh.set_color(i, color);
                }
            }
            Command::Replace { new, .. } => mesh.set_triangles(new.clone()),
        }
    }

    pub fn revert(&self, mesh: &mut Mesh) {
        match self {
            // The freshly-applied triangle is necessarily last.
            Command::AddTriangle { .. } => {
                mesh.pop_triangle();
            }
            Command::RemoveTriangle { triangle, index } => {
                mesh.insert_triangle(*index, *triangle);
            }
            Command::MoveVertex {
                vertex,
                from,
                affected,
                ..
            } => {
                mesh.set_vertex(*vertex, *from);
                for &(i, color) in affected {
                    mesh.set_color(i, color);
                }
            }
            Command::Replace { old, .. } => mesh.set_triangles(old.clone()),
        }
    }
}

#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    /// Apply a command and record it. Any redoable future is discarded.
    pub fn execute(&mut self, cmd: Command, mesh: &mut Mesh, image: Option<&ImageData>) {
        cmd.apply(mesh, image);
        self.undo_stack.push(cmd);
        self.redo_stack.clear();
    }

    /// Revert the most recent command. No-op on an empty stack.
    pub fn undo(&mut self, mesh: &mut Mesh) -> bool {
        let Some(cmd) = self.undo_stack.pop() else {
            return false;
        };
        cmd.revert(mesh);
        debug!("undo ({} left)", self.undo_stack.len());
        self.redo_stack.push(cmd);
        true
    }

    /// Re-apply the most recently undone command. No-op on an empty stack.
    pub fn redo(&mut self, mesh: &mut Mesh, image: Option<&ImageData>) -> bool {
        let Some(cmd) = self.redo_stack.pop() else {
            return false;
        };
        cmd.apply(mesh, image);
        debug!("redo ({} left)", self.redo_stack.len());
        self.undo_stack.push(cmd);
        true
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
