//! 3D scene to 2D draw commands.
//!
//! Projects every visible mesh and point cloud through the camera, shades
//! lit surfaces, and orders the result back-to-front (painter's algorithm)
//! so a plain 2D canvas can present it.

use glam::{Mat4, Vec2, Vec3};
use crate::api::types::EntityId;
use crate::components::layer::RenderLayer;
use crate::components::mesh::{Color, Geometry, MeshComponent, Shading};
use crate::components::points::PointsComponent;
use crate::core::scene::Scene;
use crate::renderer::camera::{PerspectiveCamera, Viewport};
use crate::systems::lighting::LightState;

/// Smallest on-screen size for points and lines, in pixels.
const MIN_PIXEL: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub pos: Vec2,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawItem {
    /// Square dots (starfield).
    Points { points: Vec<ScreenPoint>, color: Color },
    /// Stroked line strip in surface pixels.
    Polyline { points: Vec<Vec2>, closed: bool, width: f32, color: Color },
    /// Shaded sphere silhouette. `light_dir` points from the center toward
    /// the lit side; `None` means flat color.
    Disc { center: Vec2, radius: f32, lit: Color, shadow: Color, light_dir: Option<Vec2> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub entity: EntityId,
    pub layer: RenderLayer,
    /// Camera distance; larger draws first within a layer.
    pub depth: f32,
    pub item: DrawItem,
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub clear_color: Color,
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Draw command produced for `entity`, if it was visible this frame.
    pub fn find(&self, entity: EntityId) -> Option<&DrawCommand> {
        self.commands.iter().find(|c| c.entity == entity)
    }

    /// Sort back-to-front: by layer, then farthest first.
    pub fn sort(&mut self) {
        self.commands.sort_by(|a, b| {
            a.layer.cmp(&b.layer).then(
                b.depth
                    .partial_cmp(&a.depth)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
        });
    }
}

/// Rebuild `list` from the scene as seen by `camera`.
pub fn build_draw_list(
    scene: &Scene,
    camera: &PerspectiveCamera,
    lights: &LightState,
    viewport: Viewport,
    list: &mut DrawList,
) {
    list.clear();
    list.clear_color = scene.background;
    list.viewport = viewport;

    for entity in scene.iter() {
        if !scene.is_visible(entity.id) {
            continue;
        }
        let Some(world) = scene.world_matrix(entity.id) else {
            continue;
        };
        let projector = Projector { camera, viewport };

        if let Some(points) = &entity.points {
            if let Some((item, depth)) = projector.points(points, world) {
                list.push(DrawCommand { entity: entity.id, layer: entity.layer, depth, item });
            }
        }
        if let Some(mesh) = &entity.mesh {
            for (item, depth) in projector.mesh(mesh, world, lights) {
                list.push(DrawCommand { entity: entity.id, layer: entity.layer, depth, item });
            }
        }
    }

    list.sort();
}

struct Projector<'a> {
    camera: &'a PerspectiveCamera,
    viewport: Viewport,
}

impl Projector<'_> {
    fn points(&self, points: &PointsComponent, world: Mat4) -> Option<(DrawItem, f32)> {
        let mut screen = Vec::with_capacity(points.len());
        let mut far = 0.0_f32;
        for &p in &points.positions {
            let Some(proj) = self.camera.project(world.transform_point3(p), self.viewport) else {
                continue;
            };
            if !self.on_screen(proj.pos) {
                continue;
            }
            far = far.max(proj.depth);
            screen.push(ScreenPoint {
                pos: proj.pos,
                size: (points.size * proj.scale).max(MIN_PIXEL),
            });
        }
        if screen.is_empty() {
            return None;
        }
        Some((DrawItem::Points { points: screen, color: points.color }, far))
    }

    fn mesh(&self, mesh: &MeshComponent, world: Mat4, lights: &LightState) -> Vec<(DrawItem, f32)> {
        match mesh.geometry {
            Geometry::Sphere { radius, .. } => self
                .sphere(mesh, radius, world, lights)
                .into_iter()
                .collect(),
            Geometry::Ring { inner_radius, outer_radius, segments } => {
                self.ring(mesh, inner_radius, outer_radius, segments, world)
            }
        }
    }

    fn sphere(
        &self,
        mesh: &MeshComponent,
        radius: f32,
        world: Mat4,
        lights: &LightState,
    ) -> Option<(DrawItem, f32)> {
        let (scale, _, center) = world.to_scale_rotation_translation();
        let radius = radius * scale.max_element();
        let proj = self.camera.project(center, self.viewport)?;
        let screen_radius = radius * proj.scale;

        let albedo = mesh.material.color;
        let (lit, shadow, light_dir) = match mesh.material.shading {
            Shading::Unlit => (albedo, albedo, None),
            Shading::Lambert => match lights.dominant_light(center) {
                Some(light_pos) => {
                    let n = (light_pos - center).normalize_or_zero();
                    let lit = lights.lambert(albedo, center + n * radius, n);
                    let shadow = lights.lambert(albedo, center - n * radius, -n);
                    let dir = self
                        .camera
                        .project(center + n * radius, self.viewport)
                        .map(|p| (p.pos - proj.pos).normalize_or_zero());
                    (lit, shadow, dir)
                }
                None => {
                    let ambient = lights.lambert(albedo, center, Vec3::Y);
                    (ambient, ambient, None)
                }
            },
        };

        Some((
            DrawItem::Disc {
                center: proj.pos,
                radius: screen_radius,
                lit,
                shadow,
                light_dir,
            },
            proj.depth,
        ))
    }

    /// A thin ring becomes its center line; arcs behind the camera split it.
    fn ring(
        &self,
        mesh: &MeshComponent,
        inner: f32,
        outer: f32,
        segments: u32,
        world: Mat4,
    ) -> Vec<(DrawItem, f32)> {
        let mid = (inner + outer) * 0.5;
        let segments = segments.max(3);
        let mut runs: Vec<Vec<(Vec2, f32, f32)>> = vec![Vec::new()];
        let mut culled = false;
        let mut first_visible = false;

        for i in 0..segments {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            let local = Vec3::new(mid * angle.cos(), mid * angle.sin(), 0.0);
            match self.camera.project(world.transform_point3(local), self.viewport) {
                Some(p) => {
                    first_visible |= i == 0;
                    if let Some(run) = runs.last_mut() {
                        run.push((p.pos, p.depth, p.scale));
                    }
                }
                None => {
                    culled = true;
                    if runs.last().is_some_and(|r| !r.is_empty()) {
                        runs.push(Vec::new());
                    }
                }
            }
        }

        if !culled {
            return Self::polyline(&runs[0], true, outer - inner, mesh.material.color)
                .into_iter()
                .collect();
        }

        // Re-join the wrap-around: the last run continues into the first.
        if first_visible && runs.len() > 1 && runs.last().is_some_and(|r| !r.is_empty()) {
            let first = runs.remove(0);
            if let Some(last) = runs.last_mut() {
                last.extend(first);
            }
        }

        runs.iter()
            .filter_map(|run| Self::polyline(run, false, outer - inner, mesh.material.color))
            .collect()
    }

    fn polyline(run: &[(Vec2, f32, f32)], closed: bool, thickness: f32, color: Color) -> Option<(DrawItem, f32)> {
        if run.len() < 2 {
            return None;
        }
        let n = run.len() as f32;
        let depth = run.iter().map(|r| r.1).sum::<f32>() / n;
        let scale = run.iter().map(|r| r.2).sum::<f32>() / n;
        Some((
            DrawItem::Polyline {
                points: run.iter().map(|r| r.0).collect(),
                closed,
                width: (thickness * scale).max(MIN_PIXEL),
                color,
            },
            depth,
        ))
    }

    fn on_screen(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.viewport.width && p.y <= self.viewport.height
    }
}
