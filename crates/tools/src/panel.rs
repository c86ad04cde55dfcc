use crate::inspector::{SceneInspector, SceneSummary};
use glasslab_common::MaterialHandle;
use glasslab_scene::{MaterialParam, Scene};

/// Debug panel with one slider per [`MaterialParam`], followed by the scene
/// summary.
pub struct MaterialPanel;

impl MaterialPanel {
    pub const TITLE: &'static str = "Debug";

    /// Draw the panel in its own window. Returns `true` when a slider moved.
    ///
    /// An unknown handle draws no sliders.
    pub fn show(
        ctx: &egui::Context,
        scene: &mut Scene,
        handle: MaterialHandle,
        summary: &SceneSummary,
    ) -> bool {
        let mut changed = false;
        egui::Window::new(Self::TITLE)
            .default_width(260.0)
            .resizable(false)
            .show(ctx, |ui| {
                changed = Self::sliders(ui, scene, handle);
                ui.separator();
                egui::CollapsingHeader::new("Scene")
                    .default_open(false)
                    .show(ui, |ui| SceneInspector::show(ui, summary));
            });
        changed
    }

    /// The sliders alone, for embedding in another container.
    pub fn sliders(ui: &mut egui::Ui, scene: &mut Scene, handle: MaterialHandle) -> bool {
        Self::slider_responses(ui, scene, handle)
            .iter()
            .any(egui::Response::changed)
    }

    /// One response per [`MaterialParam::ALL`] entry, empty for an unknown handle.
    fn slider_responses(
        ui: &mut egui::Ui,
        scene: &mut Scene,
        handle: MaterialHandle,
    ) -> Vec<egui::Response> {
        let Some(material) = scene.material_mut(handle) else {
            return Vec::new();
        };

        let mut responses = Vec::with_capacity(MaterialParam::ALL.len());
        for param in MaterialParam::ALL {
            let range = param.range();
            let response = ui.add(
                egui::Slider::new(material.field_mut(param), range)
                    .step_by(MaterialParam::STEP as f64)
                    .max_decimals(4)
                    .text(param.label()),
            );
            if response.changed() {
                // Keyboard and text entry may bypass the slider range.
                let value = material.set(param, material.get(param));
                tracing::debug!(param = param.label(), value, "material edited");
            }
            responses.push(response);
        }
        responses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use glasslab_scene::{DemoScene, PhysicalMaterial};

    fn run_frame(ctx: &egui::Context, scene: &mut Scene, handle: MaterialHandle) -> bool {
        let summary = SceneInspector::summary(scene, 0.0, Vec3::ZERO);
        let mut changed = false;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            changed = MaterialPanel::show(ctx, scene, handle, &summary);
        });
        changed
    }

    #[test]
    fn idle_panel_leaves_material_untouched() {
        let ctx = egui::Context::default();
        let mut demo = DemoScene::build();
        for _ in 0..3 {
            assert!(!run_frame(&ctx, &mut demo.scene, demo.material));
        }
        assert_eq!(
            *demo.scene.material(demo.material).unwrap(),
            PhysicalMaterial::clear_glass()
        );
    }

    #[test]
    fn unknown_handle_is_ignored() {
        let ctx = egui::Context::default();
        let mut scene = Scene::new();
        assert!(!run_frame(&ctx, &mut scene, MaterialHandle(7)));
    }

    /// Run one frame with the sliders in a central panel, feeding `events`.
    /// Returns the Metalness slider's rect.
    fn slider_frame(
        ctx: &egui::Context,
        scene: &mut Scene,
        handle: MaterialHandle,
        events: Vec<egui::Event>,
    ) -> egui::Rect {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(800.0, 600.0),
            )),
            events,
            ..Default::default()
        };
        let mut rect = egui::Rect::NOTHING;
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let responses = MaterialPanel::slider_responses(ui, scene, handle);
                rect = responses[0].rect;
            });
        });
        rect
    }

    fn press(pos: egui::Pos2) -> Vec<egui::Event> {
        vec![
            egui::Event::PointerMoved(pos),
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed: true,
                modifiers: egui::Modifiers::default(),
            },
        ]
    }

    fn release(pos: egui::Pos2) -> Vec<egui::Event> {
        vec![egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: false,
            modifiers: egui::Modifiers::default(),
        }]
    }

    fn metalness_of_every_mesh(demo: &DemoScene) -> Vec<f32> {
        demo.mesh_ids()
            .iter()
            .map(|&id| demo.scene.material_of(id).unwrap().metalness)
            .collect()
    }

    #[test]
    fn dragging_metalness_updates_every_mesh() {
        let ctx = egui::Context::default();
        let mut demo = DemoScene::build();
        let handle = demo.material;
        assert_eq!(metalness_of_every_mesh(&demo), vec![0.0; 3]);

        // Lay out once so the slider has a rect to hit.
        let rect = slider_frame(&ctx, &mut demo.scene, handle, Vec::new());
        let rail = ctx.style().spacing.slider_width;
        let mid = egui::pos2(rect.left() + rail * 0.5, rect.center().y);
        let nudged = mid + egui::vec2(1.0, 0.0);

        slider_frame(&ctx, &mut demo.scene, handle, press(mid));
        slider_frame(
            &ctx,
            &mut demo.scene,
            handle,
            vec![egui::Event::PointerMoved(nudged)],
        );
        slider_frame(&ctx, &mut demo.scene, handle, release(nudged));

        let values = metalness_of_every_mesh(&demo);
        assert!(values.windows(2).all(|w| w[0] == w[1]));
        assert!(values[0] > 0.0 && values[0] < 1.0, "metalness {}", values[0]);

        // Dragging far past the end of the rail stops at the range limit.
        let past_end = egui::pos2(rect.right() + 400.0, mid.y);
        slider_frame(&ctx, &mut demo.scene, handle, press(mid));
        slider_frame(
            &ctx,
            &mut demo.scene,
            handle,
            vec![egui::Event::PointerMoved(past_end)],
        );
        slider_frame(&ctx, &mut demo.scene, handle, release(past_end));

        assert_eq!(metalness_of_every_mesh(&demo), vec![1.0; 3]);
        let material = demo.scene.material(handle).unwrap();
        assert_eq!(material.roughness, 0.0);
        assert_eq!(material.ior, 2.5);
    }
}
