//! Main application state and frame loop.

use std::cell::Cell;
use std::rc::Rc;

use eframe::{App, CreationContext};
use egui::{Context, Pos2, Response, Sense, Ui};
use lucky_wheel_core::{
    Announcement, EditOutcome, Instant, KeyValueStore, LongPress, SpeechSynth, WheelConfig, Widget,
    EDIT_PROMPT, RESET_CONFIRM, RESET_DONE, WRONG_COUNT_MESSAGE,
};
use tracing::{debug, info};

use crate::controls::{show_controls, ControlAction};
use crate::dialogs::{DialogEvent, DialogQueue};
use crate::platform::Host;
use crate::render::{paint_pointer, paint_wheel, SpinAnimation};
use crate::settings::WheelStyle;
use crate::ui::{draw_press_progress, draw_result_highlight};

type HostWidget = Widget<Box<dyn KeyValueStore>, Box<dyn SpeechSynth>>;

/// The lucky wheel application.
pub struct LuckyWheelApp {
    widget: HostWidget,
    /// Raised by the host when its voice list changes
    voices_changed: Rc<Cell<bool>>,
    dialogs: DialogQueue,
    /// Transition towards the current target; `None` when at rest
    animation: Option<SpinAnimation>,
    long_press: LongPress,
    was_pointer_down: bool,
    style: WheelStyle,
    dark_mode: bool,
}

impl LuckyWheelApp {
    /// Create the app for the current platform with default configuration.
    pub fn new(cc: &CreationContext<'_>) -> Self {
        let config = WheelConfig::default();

        #[cfg(target_arch = "wasm32")]
        let host = {
            let host = Host::browser(&config, &cc.egui_ctx);
            crate::platform::register_offline_worker(
                &host.capabilities,
                &config.service_worker_path,
            );
            host
        };

        #[cfg(not(target_arch = "wasm32"))]
        let host = Host::native(&config, None);

        Self::with_host(cc, config, host)
    }

    /// Create the app over an explicit host.
    pub fn with_host(cc: &CreationContext<'_>, config: WheelConfig, host: Host) -> Self {
        #[cfg(target_arch = "wasm32")]
        crate::fonts::fetch_web_fallback(&cc.egui_ctx);
        #[cfg(not(target_arch = "wasm32"))]
        crate::fonts::install_system_fallback(&cc.egui_ctx);

        Self::from_parts(&cc.egui_ctx, config, host)
    }

    fn from_parts(ctx: &Context, config: WheelConfig, host: Host) -> Self {
        let Host {
            capabilities,
            store,
            speech,
            voices_changed,
        } = host;
        let long_press = LongPress::new(config.long_press());
        let widget = Widget::new(config, capabilities, store, speech);
        let dark_mode = ctx.style().visuals.dark_mode;

        Self {
            widget,
            voices_changed,
            dialogs: DialogQueue::default(),
            animation: None,
            long_press,
            was_pointer_down: false,
            style: WheelStyle::for_mode(dark_mode),
            dark_mode,
        }
    }

    /// Rotation to draw at `now`.
    fn displayed_rotation(&self, now: Instant) -> f64 {
        match &self.animation {
            Some(animation) => animation.angle_at(now),
            None => self.widget.rotation(),
        }
    }

    fn start_spin(&mut self, now: Instant) {
        let from = self.displayed_rotation(now);
        let Some(plan) = self.widget.spin(now) else {
            debug!("Spin ignored, wheel already spinning");
            return;
        };
        self.long_press.release();
        self.animation = Some(SpinAnimation {
            from,
            to: plan.target_angle,
            started: now,
            duration: plan.duration,
        });
    }

    fn present(&mut self, announcement: Announcement) {
        if let Announcement::Alert(message) = announcement {
            self.dialogs.alert(message);
        }
    }

    /// Advance timers: voice list, spin completion, long press.
    fn tick(&mut self, now: Instant) {
        if self.voices_changed.replace(false) {
            self.widget.voices_changed();
        }

        if let Some((_, announcement)) = self.widget.poll(now) {
            self.present(announcement);
        }
        if !self.widget.is_spinning()
            && self.animation.is_some_and(|animation| animation.is_finished(now))
        {
            self.animation = None;
        }

        if self.long_press.poll(now) {
            self.dialogs.confirm(RESET_CONFIRM);
        }
    }

    fn open_editor(&mut self) {
        match self.widget.edit_prompt() {
            Some(current) => self.dialogs.prompt(EDIT_PROMPT, current),
            None => debug!("Edit ignored while spinning"),
        }
    }

    fn handle_action(&mut self, action: ControlAction, now: Instant) {
        match action {
            ControlAction::Spin => self.start_spin(now),
            ControlAction::TestVoice => {
                let announcement = self.widget.test_voice();
                self.present(announcement);
            }
        }
    }

    fn handle_dialog(&mut self, event: DialogEvent) {
        match event {
            DialogEvent::AlertDismissed => {}
            DialogEvent::PromptClosed(input) => match self.widget.submit_edit(input.as_deref()) {
                EditOutcome::Updated => {
                    info!(labels = %self.widget.options().join(","), "Options updated")
                }
                EditOutcome::Rejected { found } => {
                    debug!(found, "Edit rejected");
                    self.dialogs.alert(WRONG_COUNT_MESSAGE);
                }
                EditOutcome::Cancelled | EditOutcome::Busy => {}
            },
            DialogEvent::ConfirmClosed(confirmed) => {
                if self.widget.reset(confirmed) {
                    info!("Options reset");
                    self.dialogs.alert(RESET_DONE);
                }
            }
        }
    }

    fn wheel_ui(&mut self, ui: &mut Ui, now: Instant) {
        let available = ui.available_size();
        let side = available.x.min(available.y);
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(available.x, side), Sense::click_and_drag());
        let center = rect.center();
        let radius = side * self.style.radius_fraction;
        let rotation = self.displayed_rotation(now) as f32;

        let painter = ui.painter_at(rect);
        paint_wheel(
            &painter,
            center,
            radius,
            rotation,
            self.widget.options(),
            &self.style,
        );
        if !self.widget.is_spinning() {
            if let Some(outcome) = self.widget.last_result() {
                draw_result_highlight(
                    &painter,
                    center,
                    radius,
                    outcome.index,
                    rotation,
                    self.dark_mode,
                );
            }
        }
        paint_pointer(&painter, center, radius, &self.style);
        if let Some(progress) = self.long_press.progress(now) {
            draw_press_progress(&painter, center, radius, progress, self.dark_mode);
        }

        self.handle_wheel_input(&response, center, radius, now);
    }

    /// Double-click edits, press-and-hold resets.
    fn handle_wheel_input(&mut self, response: &Response, center: Pos2, radius: f32, now: Instant) {
        let on_wheel = response
            .interact_pointer_pos()
            .is_some_and(|pos| pos.distance(center) <= radius);

        if response.double_clicked() && on_wheel {
            self.long_press.release();
            self.open_editor();
            return;
        }

        let down = response.is_pointer_button_down_on();
        if down && !self.was_pointer_down && on_wheel {
            self.long_press.press(now, self.widget.is_spinning());
        } else if !down && self.was_pointer_down {
            self.long_press.release();
        }
        self.was_pointer_down = down;
    }
}

impl App for LuckyWheelApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        let dark_mode = ctx.style().visuals.dark_mode;
        if dark_mode != self.dark_mode {
            self.dark_mode = dark_mode;
            self.style = WheelStyle::for_mode(dark_mode);
        }

        self.tick(now);

        if let Some(event) = self.dialogs.show(ctx) {
            self.handle_dialog(event);
        }

        let action = egui::TopBottomPanel::bottom("controls")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                let action = show_controls(ui, self.widget.is_spinning(), self.widget.last_result());
                ui.add_space(8.0);
                action
            })
            .inner;
        if let Some(action) = action {
            self.handle_action(action, now);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.wheel_ui(ui, now);
        });

        if self.widget.is_spinning() || self.animation.is_some() || self.long_press.is_armed() {
            ctx.request_repaint();
        }
    }
}
