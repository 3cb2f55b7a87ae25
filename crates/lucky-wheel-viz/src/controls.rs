//! Bottom control bar: spin and voice test buttons, result and help text.

use egui::{Color32, RichText, Ui};
use lucky_wheel_core::SpinOutcome;

/// Shown under the wheel.
pub const HELP_TEXT: &str = "提示：双击转盘可编辑选项，长按转盘可重置选项";

const SPIN_LABEL: &str = "开始";
const TEST_VOICE_LABEL: &str = "测试语音";

/// Button pressed this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Spin,
    TestVoice,
}

/// Render the control bar. The spin button is disabled while spinning.
pub fn show_controls(
    ui: &mut Ui,
    spinning: bool,
    last_result: Option<&SpinOutcome>,
) -> Option<ControlAction> {
    let mut action = None;

    ui.vertical_centered(|ui| {
        render_result(ui, spinning, last_result);
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            // Center the two buttons.
            let width = 2.0 * 110.0 + ui.spacing().item_spacing.x;
            ui.add_space(((ui.available_width() - width) / 2.0).max(0.0));

            let spin = egui::Button::new(RichText::new(SPIN_LABEL).size(18.0).strong())
                .min_size(egui::vec2(110.0, 40.0));
            if ui.add_enabled(!spinning, spin).clicked() {
                action = Some(ControlAction::Spin);
            }

            let test = egui::Button::new(RichText::new(TEST_VOICE_LABEL).size(15.0))
                .min_size(egui::vec2(110.0, 40.0));
            if ui.add(test).clicked() {
                action = Some(ControlAction::TestVoice);
            }
        });

        ui.add_space(6.0);
        ui.label(RichText::new(HELP_TEXT).size(12.0).color(Color32::GRAY));
    });

    action
}

fn render_result(ui: &mut Ui, spinning: bool, last_result: Option<&SpinOutcome>) {
    if spinning {
        ui.horizontal(|ui| {
            ui.spinner();
        });
        return;
    }
    match last_result {
        Some(outcome) => {
            ui.label(
                RichText::new(&outcome.label)
                    .size(22.0)
                    .strong()
                    .color(Color32::from_rgb(255, 196, 0)),
            );
        }
        None => {
            ui.label(RichText::new(" ").size(22.0));
        }
    }
}
