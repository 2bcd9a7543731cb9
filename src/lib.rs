//! Low-poly triangulation editor core.
//!
//! Overlays an editable triangle mesh on a raster image: triangles are
//! colored by sampling the pixels they cover, every mutation is undoable,
//! and the mesh stays topologically valid (no crossing edges, no
//! containment). The host owns decoding, rendering and file I/O; this
//! crate consumes decoded pixel buffers and abstract pointer/wheel/key
//! events, and produces JSON/SVG/raster exports.

pub mod error;
pub mod geometry {
    pub mod intersect;
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod history;
pub mod interact;
pub mod mesh;
pub mod model;
pub mod sampler;
pub mod view;
mod json;
mod raster;
mod svg;

use log::info;

pub use error::{Error, Rejection, Result};
pub use history::{Command, History};
pub use interact::{HIT_RADIUS, POINT_RADIUS};
pub use mesh::Mesh;
pub use model::{Button, EdgeRef, Hover, Key, KeyEvent, Rgb, Triangle, Vec2, VertexId};
pub use sampler::{average_color, ImageData};
pub use view::ViewTransform;

/// Where the interaction state machine currently is. Derived from the
/// editor's flags; useful for hosts and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    Panning,
    DraggingVertex,
    /// 1..=2 vertices collected toward a triangle.
    Building(u8),
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct DragState {
    pub vertex: VertexId,
    pub start: Vec2,
    pub invalid: bool,
}

/// The owning session context: mesh, history, view transform, image and
/// all transient interaction state. One editor per loaded image; handlers
/// run to completion, so there is exactly one writer at a time.
pub struct Editor {
    pub(crate) mesh: Mesh,
    pub(crate) history: History,
    pub(crate) view: ViewTransform,
    pub(crate) image: Option<ImageData>,

    pub(crate) pending: Vec<VertexId>,
    pub(crate) hovered: Option<Hover>,
    pub(crate) dragging: Option<DragState>,
    pub(crate) panning: Option<Vec2>,
    pub(crate) did_start_drag_on_vertex: bool,

    pub(crate) show_image: bool,
    pub(crate) show_triangles: bool,
    pub(crate) show_wireframe: bool,

    pub(crate) notice: Option<String>,
}

impl Default for Editor {
    fn default() -> Self {
        Editor::new()
    }
}

impl Editor {
    pub fn new() -> Editor {
        Editor {
            mesh: Mesh::new(),
            history: History::new(),
            view: ViewTransform::default(),
            image: None,
            pending: Vec::new(),
            hovered: None,
            dragging: None,
            panning: None,
            did_start_drag_on_vertex: false,
            show_image: true,
            show_triangles: true,
            show_wireframe: false,
            notice: None,
        }
    }

    /// Install a freshly decoded image and reset the session: mesh,
    /// history, pending construction, view and visibility all start over.
    /// Returns false (and changes nothing) if the buffer size does not
    /// match the dimensions.
    pub fn load_image(&mut self, width: u32, height: u32, rgba: Vec<u8>) -> bool {
        let Some(img) = ImageData::new(width, height, rgba) else {
            return false;
        };
        info!("image loaded ({}x{})", width, height);
        self.image = Some(img);
        self.mesh.clear();
        self.history.clear();
        self.pending.clear();
        self.hovered = None;
        self.dragging = None;
        self.panning = None;
        self.did_start_drag_on_vertex = false;
        self.show_image = true;
        self.show_triangles = true;
        self.show_wireframe = false;
        self.view = ViewTransform::default();
        true
    }

    /// Center the loaded image in a viewport without scaling up.
    pub fn fit_view(&mut self, viewport_w: f32, viewport_h: f32) {
        if let Some(img) = &self.image {
            self.view
                .fit(img.width(), img.height(), viewport_w, viewport_h);
        }
    }

    // State inspection

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn state(&self) -> EditorState {
        if self.dragging.is_some() {
            EditorState::DraggingVertex
        } else if self.panning.is_some() {
            EditorState::Panning
        } else if !self.pending.is_empty() {
            EditorState::Building(self.pending.len() as u8)
        } else {
            EditorState::Idle
        }
    }

    pub fn hover(&self) -> Option<Hover> {
        self.hovered
    }

    /// Vertices collected so far toward a new triangle.
    pub fn pending(&self) -> &[VertexId] {
        &self.pending
    }

    /// True while a drag sits at a position that would break the mesh.
    pub fn drag_invalid(&self) -> bool {
        self.dragging.map_or(false, |d| d.invalid)
    }

    /// Take the pending transient notice, if any. Rejections queue their
    /// message here for the host to flash at the user.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub fn show_image(&self) -> bool {
        self.show_image
    }

    pub fn show_triangles(&self) -> bool {
        self.show_triangles
    }

    pub fn show_wireframe(&self) -> bool {
        self.show_wireframe
    }

    pub fn toggle_image(&mut self) {
        self.show_image = !self.show_image;
    }

    pub fn toggle_triangles(&mut self) {
        self.show_triangles = !self.show_triangles;
    }

    pub fn toggle_wireframe(&mut self) {
        self.show_wireframe = !self.show_wireframe;
    }

    // History

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        // Triangle indices may shift; drop the hover until the next move.
        self.hovered = None;
        self.history.undo(&mut self.mesh)
    }

    pub fn redo(&mut self) -> bool {
        self.hovered = None;
        self.history.redo(&mut self.mesh, self.image.as_ref())
    }

    /// Replace the whole mesh with nothing, as one undoable step. No-op on
    /// an empty mesh.
    pub fn clear_all(&mut self) {
        if self.mesh.is_empty() {
            return;
        }
        let cmd = history::Command::replace(&self.mesh, Vec::new());
        self.history.execute(cmd, &mut self.mesh, self.image.as_ref());
        self.pending.clear();
        self.hovered = None;
    }

    // Events

    pub fn pointer_down(&mut self, screen: Vec2, button: Button) {
        interact::pointer_down_impl(self, screen, button);
    }

    pub fn pointer_move(&mut self, screen: Vec2) {
        interact::pointer_move_impl(self, screen);
    }

    pub fn pointer_up(&mut self, screen: Vec2, button: Button) {
        interact::pointer_up_impl(self, screen, button);
    }

    /// A completed primary click, delivered after `pointer_up` the way
    /// host event systems do.
    pub fn pointer_click(&mut self, screen: Vec2) {
        interact::pointer_click_impl(self, screen);
    }

    /// Secondary action: cancel a pending construction, else remove the
    /// hovered triangle.
    pub fn context_click(&mut self, screen: Vec2) {
        interact::context_click_impl(self, screen);
    }

    pub fn pointer_leave(&mut self) {
        interact::pointer_leave_impl(self);
    }

    /// `zoom_modifier` is the ctrl/pinch flag: zoom when set, pan by the
    /// raw delta otherwise.
    pub fn wheel(&mut self, screen: Vec2, dx: f32, dy: f32, zoom_modifier: bool) {
        interact::wheel_impl(self, screen, dx, dy, zoom_modifier);
    }

    pub fn key_down(&mut self, ev: KeyEvent) {
        interact::key_down_impl(self, ev);
    }

    // Import/export

    pub fn export_mesh_json(&self) -> Result<String> {
        if self.mesh.is_empty() {
            return Err(Error::Precondition("No mesh to export."));
        }
        Ok(json::export_impl(&self.mesh))
    }

    /// Parse, validate and apply a mesh file as a single undoable
    /// replacement. Nothing is mutated unless the whole document is valid.
    pub fn import_mesh_json(&mut self, text: &str) -> Result<()> {
        json::import_impl(self, text)
    }

    pub fn export_fill_svg(&self) -> Result<String> {
        let img = self.require_exportable()?;
        Ok(svg::fill_impl(&self.mesh, img.width(), img.height()))
    }

    pub fn export_wireframe_svg(&self) -> Result<String> {
        let img = self.require_exportable()?;
        Ok(svg::wireframe_impl(&self.mesh, img.width(), img.height()))
    }

    pub fn export_combined_svg(&self) -> Result<String> {
        let img = self.require_exportable()?;
        Ok(svg::combined_impl(&self.mesh, img.width(), img.height()))
    }

    /// RGBA8 buffer the size of the image: filled triangles over a
    /// transparent background, no stroke.
    pub fn render_raster(&self) -> Result<Vec<u8>> {
        let img = self.require_exportable()?;
        Ok(raster::render_impl(&self.mesh, img.width(), img.height()))
    }

    fn require_exportable(&self) -> Result<&ImageData> {
        let img = self
            .image
            .as_ref()
            .ok_or(Error::Precondition("No triangles to export."))?;
        if self.mesh.is_empty() {
            return Err(Error::Precondition("No triangles to export."));
        }
        Ok(img)
    }
}
