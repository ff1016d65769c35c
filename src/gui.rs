use egui::{Align2, Color32, Context, RichText};
use egui_wgpu::Renderer;
use egui_winit::State;
use field_simulation::FieldParams;
use wgpu::{Device, TextureFormat};
use winit::{event::WindowEvent, window::Window};

const EYEBROW: &str = "R&D · AI · Data Science · MVP Development";
const HEADLINE: &str = "Start Small. Scale Smart.";
const HEADLINE_ACCENT: &str = "Build with DataGlimpse.";

const ACCENT: Color32 = Color32::from_rgb(0, 136, 255);
const MUTED: Color32 = Color32::from_rgb(150, 170, 200);

pub struct UiState {
    pub fps: f32,
    pub frame_time: f32,
    pub particle_count: usize,
    pub link_count: usize,
    pub generation: u64,
    pub seed: u64,
    pub typed_text: &'static str,
    pub scroll_progress: f32,
    pub indicator_visible: bool,
    pub show_controls: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: 0.0,
            particle_count: 0,
            link_count: 0,
            generation: 0,
            seed: 0,
            typed_text: "",
            scroll_progress: 0.0,
            indicator_visible: true,
            show_controls: false,
        }
    }
}

/// What the user asked for this frame
#[derive(Clone, Copy, Debug, Default)]
pub struct GuiActions {
    pub regenerate: bool,
}

pub struct Gui {
    context: Context,
    state: State,
    renderer: Renderer,
}

impl Gui {
    pub fn new(device: &Device, output_color_format: TextureFormat, window: &Window) -> Self {
        let context = Context::default();
        let id = context.viewport_id();

        let state = State::new(
            context.clone(),
            id,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );

        let renderer = Renderer::new(
            device,
            output_color_format,
            egui_wgpu::RendererOptions {
                msaa_samples: 1,
                depth_stencil_format: None,
                dithering: false,
                predictable_texture_filtering: false,
            },
        );

        Self {
            context,
            state,
            renderer,
        }
    }

    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &Window,
        view: &wgpu::TextureView,
        ui_state: &mut UiState,
        params: &mut FieldParams,
    ) -> GuiActions {
        let raw_input = self.state.take_egui_input(window);

        let mut actions = GuiActions::default();
        let full_output = self.context.run(raw_input, |ctx| {
            actions = Self::ui(ctx, ui_state, params);
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let clipped_primitives = self
            .context
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let size = window.inner_size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        // Draw over the particle field
        let mut render_pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();

        self.renderer
            .render(&mut render_pass, &clipped_primitives, &screen_descriptor);
        drop(render_pass);

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        actions
    }

    fn ui(ctx: &Context, state: &mut UiState, params: &mut FieldParams) -> GuiActions {
        Self::hero(ctx, state);
        Self::scroll_overlay(ctx, state);

        // Diagnostics Panel (Top Left)
        egui::Window::new("Diagnostics")
            .anchor(Align2::LEFT_TOP, [10.0, 10.0])
            .resizable(false)
            .collapsible(true)
            .default_open(false)
            .show(ctx, |ui| {
                ui.label(format!("FPS: {:.1}", state.fps));
                ui.label(format!("Frame Time: {:.2} ms", state.frame_time));
                ui.separator();
                ui.label(format!("Particles: {}", state.particle_count));
                ui.label(format!("Links: {}", state.link_count));
                ui.label(format!("Generation: {}", state.generation));
                ui.label(format!("Seed: {}", state.seed));
                ui.separator();
                ui.checkbox(&mut state.show_controls, "Field Controls (F)");
            });

        if !state.show_controls {
            return GuiActions::default();
        }

        let mut actions = GuiActions::default();

        // Field Controls (Bottom Left)
        egui::Window::new("Field Controls")
            .anchor(Align2::LEFT_BOTTOM, [10.0, -10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                ui.heading("Pointer");
                ui.add(egui::Slider::new(&mut params.pointer_radius, 0.0..=400.0).text("Radius"));
                ui.add(
                    egui::Slider::new(&mut params.pointer_attraction, 0.0..=0.001)
                        .text("Attraction")
                        .logarithmic(true),
                );

                ui.separator();
                ui.heading("Motion");
                ui.add(egui::Slider::new(&mut params.max_speed, 0.05..=3.0).text("Max Speed"));

                ui.separator();
                ui.heading("Links");
                ui.add(
                    egui::Slider::new(&mut params.link_distance, 10.0..=300.0).text("Distance"),
                );
                ui.add(egui::Slider::new(&mut params.link_opacity, 0.0..=1.0).text("Opacity"));

                ui.separator();
                ui.heading("Spawning");
                ui.add(
                    egui::Slider::new(&mut params.initial_speed, 0.0..=2.0).text("Initial Speed"),
                );
                ui.add(egui::Slider::new(&mut params.max_count, 0..=400).text("Wide Count"));
                if ui.button("Regenerate (R)").clicked() {
                    actions.regenerate = true;
                }
                if ui.button("Reset Defaults").clicked() {
                    *params = FieldParams::default();
                    actions.regenerate = true;
                }
            });

        actions
    }

    /// Eyebrow, two-line headline and the typewriter line, centered
    fn hero(ctx: &Context, state: &UiState) {
        // Blinking caret, half a second on and off
        let caret_on = ctx.input(|i| i.time).fract() < 0.5;
        let caret = if caret_on { "|" } else { " " };

        egui::Area::new(egui::Id::new("hero_content"))
            .anchor(Align2::CENTER_CENTER, [0.0, -20.0])
            .interactable(false)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(EYEBROW).size(14.0).color(ACCENT));
                    ui.add_space(16.0);
                    ui.label(
                        RichText::new(HEADLINE)
                            .size(52.0)
                            .strong()
                            .color(Color32::WHITE),
                    );
                    ui.label(RichText::new(HEADLINE_ACCENT).size(52.0).strong().color(ACCENT));
                    ui.add_space(20.0);
                    ui.label(
                        RichText::new(format!("{}{}", state.typed_text, caret))
                            .size(22.0)
                            .monospace()
                            .color(MUTED),
                    );
                    ui.add_space(28.0);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("See Our Work").size(16.0).color(Color32::WHITE));
                        ui.add_space(24.0);
                        ui.label(RichText::new("Get in Touch").size(16.0).color(MUTED));
                    });
                });
            });
    }

    /// Progress bar along the top edge and the fading scroll hint
    fn scroll_overlay(ctx: &Context, state: &UiState) {
        let screen = ctx.screen_rect();

        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("scroll_progress"),
        ));
        let bar = egui::Rect::from_min_size(
            screen.min,
            egui::vec2(screen.width() * state.scroll_progress.clamp(0.0, 1.0), 3.0),
        );
        painter.rect_filled(bar, 0.0, ACCENT);

        let opacity = ctx.animate_bool_with_time(
            egui::Id::new("scroll_indicator"),
            state.indicator_visible,
            0.3,
        );
        if opacity <= 0.0 {
            return;
        }

        let [r, g, b, _] = MUTED.to_array();
        let color = Color32::from_rgba_unmultiplied(r, g, b, (opacity * 255.0) as u8);
        egui::Area::new(egui::Id::new("scroll_indicator"))
            .anchor(Align2::CENTER_BOTTOM, [0.0, -24.0])
            .interactable(false)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("Scroll to explore").size(12.0).color(color));
                    ui.label(RichText::new("↓").size(18.0).color(color));
                });
            });
    }
}
