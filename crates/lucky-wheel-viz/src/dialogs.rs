//! Modal alert / prompt / confirm dialogs.
//!
//! Dialogs are queued and shown one at a time. While one is open it blocks
//! interaction with the wheel, but scheduled work (the spin task, speech)
//! keeps running.

use std::collections::VecDeque;

use egui::{Context, Id, Modal, RichText};

/// A dialog waiting to be shown or answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Message with a single OK button.
    Alert(String),
    /// Text prompt pre-filled with `buffer`.
    Prompt { message: String, buffer: String },
    /// Yes/no question.
    Confirm(String),
}

/// What the user did with the front dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    AlertDismissed,
    /// `None` when the prompt was cancelled.
    PromptClosed(Option<String>),
    ConfirmClosed(bool),
}

/// FIFO of pending dialogs.
#[derive(Debug, Default)]
pub struct DialogQueue {
    queue: VecDeque<Dialog>,
}

impl DialogQueue {
    pub fn alert(&mut self, message: impl Into<String>) {
        self.queue.push_back(Dialog::Alert(message.into()));
    }

    pub fn prompt(&mut self, message: impl Into<String>, initial: impl Into<String>) {
        self.queue.push_back(Dialog::Prompt {
            message: message.into(),
            buffer: initial.into(),
        });
    }

    pub fn confirm(&mut self, message: impl Into<String>) {
        self.queue.push_back(Dialog::Confirm(message.into()));
    }

    pub fn is_open(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn front(&self) -> Option<&Dialog> {
        self.queue.front()
    }

    /// Resolve the front dialog without rendering it.
    pub fn resolve(&mut self, event: DialogEvent) -> Option<DialogEvent> {
        self.queue.pop_front().map(|_| event)
    }

    /// Render the front dialog; returns an event once it closes.
    pub fn show(&mut self, ctx: &Context) -> Option<DialogEvent> {
        let dialog = self.queue.front_mut()?;

        let modal = Modal::new(Id::new("lucky_wheel_dialog")).show(ctx, |ui| {
            ui.set_min_width(280.0);
            match dialog {
                Dialog::Alert(message) => {
                    ui.label(RichText::new(message.as_str()).size(15.0));
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        ui.button("确定")
                            .clicked()
                            .then_some(DialogEvent::AlertDismissed)
                    })
                    .inner
                }
                Dialog::Prompt { message, buffer } => {
                    ui.label(message.as_str());
                    let edit =
                        ui.add(egui::TextEdit::singleline(&mut *buffer).desired_width(f32::INFINITY));
                    let submitted =
                        edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("确定").clicked() || submitted {
                            Some(DialogEvent::PromptClosed(Some(buffer.clone())))
                        } else if ui.button("取消").clicked() {
                            Some(DialogEvent::PromptClosed(None))
                        } else {
                            None
                        }
                    })
                    .inner
                }
                Dialog::Confirm(message) => {
                    ui.label(RichText::new(message.as_str()).size(15.0));
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("确定").clicked() {
                            Some(DialogEvent::ConfirmClosed(true))
                        } else if ui.button("取消").clicked() {
                            Some(DialogEvent::ConfirmClosed(false))
                        } else {
                            None
                        }
                    })
                    .inner
                }
            }
        });

        let should_close = modal.should_close();
        let event = modal.inner.or_else(|| {
            // Escape or a click on the backdrop dismisses, like closing a browser dialog.
            should_close.then(|| match self.queue.front() {
                Some(Dialog::Alert(_)) => DialogEvent::AlertDismissed,
                Some(Dialog::Prompt { .. }) => DialogEvent::PromptClosed(None),
                _ => DialogEvent::ConfirmClosed(false),
            })
        })?;
        self.resolve(event)
    }
}
