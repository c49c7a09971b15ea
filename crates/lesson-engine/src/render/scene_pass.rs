use std::ops::Range;

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::camera::PerspectiveCamera;
use crate::paint::Color;
use crate::scene::{ObjectKind, Scene};

use super::geometry::{box_edges, box_triangles, CameraUniform, Instance, Vertex};
use super::{RenderCtx, RenderTarget};

/// What one frame draws, flattened into GPU-ready arrays.
///
/// There is no depth buffer: filled meshes are culled back faces and drawn
/// far-to-near, wireframes follow, and line sets overlay everything.
#[derive(Debug, Default)]
pub(super) struct DrawPlan {
    pub instances: Vec<Instance>,
    pub solids: Range<u32>,
    pub wires: Range<u32>,
    /// World-space line vertices, drawn with the trailing identity instance.
    pub lines: Vec<Vertex>,
}

impl DrawPlan {
    pub(super) fn build(scene: &Scene, camera: &PerspectiveCamera) -> Self {
        let mut solids = Vec::new();
        let mut wires = Vec::new();

        for object in scene.visible_meshes() {
            let ObjectKind::Mesh(mesh) = &object.kind else { continue };
            let model = object.transform.matrix() * Mat4::from_scale(mesh.geometry.extent());
            let depth = camera.view_depth(object.transform.position);
            let entry = (object.render_order, depth, Instance::new(model, mesh.material.color));
            if mesh.material.wireframe {
                wires.push(entry);
            } else {
                solids.push(entry);
            }
        }

        // Lower render_order first; within an order, farthest first.
        let by_order_then_far = |a: &(i32, f32, Instance), b: &(i32, f32, Instance)| {
            a.0.cmp(&b.0).then(b.1.total_cmp(&a.1))
        };
        solids.sort_by(by_order_then_far);
        wires.sort_by(by_order_then_far);

        let n_solid = solids.len() as u32;
        let n_wire = wires.len() as u32;

        let mut instances: Vec<Instance> = solids
            .into_iter()
            .chain(wires)
            .map(|(_, _, instance)| instance)
            .collect();
        instances.push(Instance::identity());

        let mut lines = Vec::new();
        for object in scene.visible_lines() {
            let ObjectKind::Lines(set) = &object.kind else { continue };
            let model = object.transform.matrix();
            lines.extend(set.vertices.iter().map(|v| {
                Vertex::new(model.transform_point3(v.position), v.color)
            }));
        }

        Self {
            instances,
            solids: 0..n_solid,
            wires: n_solid..n_solid + n_wire,
            lines,
        }
    }

    fn line_instance(&self) -> Range<u32> {
        let last = self.wires.end;
        last..last + 1
    }
}

/// Draws a `Scene` with flat-colored meshes and line overlays.
#[derive(Default)]
pub(super) struct ScenePass {
    pipeline_format: Option<wgpu::TextureFormat>,
    triangle_pipeline: Option<wgpu::RenderPipeline>,
    line_pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    camera_ubo: Option<wgpu::Buffer>,

    box_triangles: Option<(wgpu::Buffer, u32)>,
    box_edges: Option<(wgpu::Buffer, u32)>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    line_vbo: Option<wgpu::Buffer>,
    line_capacity: usize,
}

impl ScenePass {
    pub(super) fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        scene: &Scene,
        camera: &PerspectiveCamera,
        clear: Color,
    ) {
        self.ensure_pipelines(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);

        let plan = DrawPlan::build(scene, camera);

        // Mutating methods must happen before borrowing pipelines/buffers immutably.
        self.write_camera_uniform(ctx, camera);
        self.ensure_instance_capacity(ctx, plan.instances.len());
        self.ensure_line_capacity(ctx, plan.lines.len());

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&plan.instances));
        if let Some(line_vbo) = self.line_vbo.as_ref() {
            if !plan.lines.is_empty() {
                ctx.queue.write_buffer(line_vbo, 0, bytemuck::cast_slice(&plan.lines));
            }
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lesson scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let Some(bind_group) = self.bind_group.as_ref() else { return };
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));

        if let (Some(pipeline), Some((vbo, count))) =
            (self.triangle_pipeline.as_ref(), self.box_triangles.as_ref())
        {
            if !plan.solids.is_empty() {
                rpass.set_pipeline(pipeline);
                rpass.set_vertex_buffer(0, vbo.slice(..));
                rpass.draw(0..*count, plan.solids.clone());
            }
        }

        let Some(line_pipeline) = self.line_pipeline.as_ref() else { return };

        if let Some((vbo, count)) = self.box_edges.as_ref() {
            if !plan.wires.is_empty() {
                rpass.set_pipeline(line_pipeline);
                rpass.set_vertex_buffer(0, vbo.slice(..));
                rpass.draw(0..*count, plan.wires.clone());
            }
        }

        if let Some(line_vbo) = self.line_vbo.as_ref() {
            if !plan.lines.is_empty() {
                rpass.set_pipeline(line_pipeline);
                rpass.set_vertex_buffer(0, line_vbo.slice(..));
                rpass.draw(0..plan.lines.len() as u32, plan.line_instance());
            }
        }
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.triangle_pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lesson scene shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("lesson scene bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<CameraUniform>() as u64,
                            ),
                        },
                        count: None,
                    }],
                });

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lesson scene pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let build = |label: &str,
                     topology: wgpu::PrimitiveTopology,
                     cull_mode: Option<wgpu::Face>| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[Vertex::layout(), Instance::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        self.triangle_pipeline = Some(build(
            "lesson mesh pipeline",
            wgpu::PrimitiveTopology::TriangleList,
            Some(wgpu::Face::Back),
        ));
        self.line_pipeline = Some(build(
            "lesson line pipeline",
            wgpu::PrimitiveTopology::LineList,
            None,
        ));
        self.pipeline_format = Some(ctx.surface_format);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.camera_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.camera_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let camera_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lesson camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lesson scene bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        self.camera_ubo = Some(camera_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.box_triangles.is_some() && self.box_edges.is_some() {
            return;
        }

        let upload = |label: &str, verts: Vec<Vertex>| {
            let buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&verts),
                usage: wgpu::BufferUsages::VERTEX,
            });
            (buffer, verts.len() as u32)
        };

        self.box_triangles = Some(upload("lesson box triangles", box_triangles()));
        self.box_edges = Some(upload("lesson box edges", box_edges()));
    }

    fn write_camera_uniform(&mut self, ctx: &RenderCtx<'_>, camera: &PerspectiveCamera) {
        let Some(ubo) = self.camera_ubo.as_ref() else { return };
        let u = CameraUniform::new(camera.view_projection());
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(64);
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lesson instance vbo"),
            size: (new_cap * std::mem::size_of::<Instance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }

    fn ensure_line_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required == 0 || (required <= self.line_capacity && self.line_vbo.is_some()) {
            return;
        }

        let new_cap = required.next_power_of_two().max(256);
        self.line_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lesson line vbo"),
            size: (new_cap * std::mem::size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.line_capacity = new_cap;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::{BasicMaterial, BoxGeometry, LineSegments, Mesh, Object3D, Transform};

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::default();
        camera.position = Vec3::new(0.0, 0.0, 3.0);
        camera.look_at(Vec3::ZERO);
        camera
    }

    fn mesh_at(z: f32, color: Color, wireframe: bool) -> Object3D {
        let material = BasicMaterial { color, wireframe };
        Object3D::from(Mesh::new(BoxGeometry::default(), material))
            .with_transform(Transform::from_position(Vec3::new(0.0, 0.0, z)))
    }

    #[test]
    fn solids_draw_far_to_near_before_wireframes() {
        let near = Color::rgb(1.0, 0.0, 0.0);
        let far = Color::rgb(0.0, 1.0, 0.0);
        let wire = Color::rgb(0.0, 0.0, 1.0);

        let mut scene = Scene::new();
        scene.add(mesh_at(1.0, near, false));
        scene.add(mesh_at(-5.0, far, false));
        scene.add(mesh_at(0.0, wire, true));

        let plan = DrawPlan::build(&scene, &camera());
        assert_eq!(plan.solids, 0..2);
        assert_eq!(plan.wires, 2..3);
        assert_eq!(plan.instances.len(), 4);

        let tints: Vec<_> = plan.instances.iter().map(|i| i.tint).collect();
        assert_eq!(tints[..3], [far.to_array(), near.to_array(), wire.to_array()]);
        assert_eq!(plan.line_instance(), 3..4);
    }

    #[test]
    fn box_extent_is_folded_into_model_matrix() {
        let mut scene = Scene::new();
        scene.add(Mesh::new(BoxGeometry::new(2.0, 3.0, 4.0), BasicMaterial::default()));

        let plan = DrawPlan::build(&scene, &camera());
        let model = Mat4::from_cols_array_2d(&plan.instances[0].model);
        assert_eq!(model.transform_point3(Vec3::splat(0.5)), Vec3::new(1.0, 1.5, 2.0));
    }

    #[test]
    fn lines_are_transformed_to_world_space() {
        let mut scene = Scene::new();
        let axes = Object3D::from(LineSegments::axes(1.0))
            .with_transform(Transform::from_position(Vec3::new(0.0, 2.0, 0.0)));
        scene.add(axes);

        let plan = DrawPlan::build(&scene, &camera());
        assert_eq!(plan.lines.len(), 6);
        assert_eq!(plan.lines[1].position, [1.0, 2.0, 0.0]);
        assert!(plan.solids.is_empty());
    }
}
