use gpui::*;
use gpui::prelude::*;

use crate::app::SmokeAlertApp;
use crate::state::TimerState;
use crate::theme::Theme;

const DISABLED_OPACITY: f32 = 0.4;

pub struct ControlPanel {
    state: TimerState,
    interval_text: String,
    is_editing_interval: bool,
    theme: Theme,
    view: Entity<SmokeAlertApp>,
}

impl ControlPanel {
    pub fn new(
        state: TimerState,
        interval_text: String,
        is_editing_interval: bool,
        theme: Theme,
        view: Entity<SmokeAlertApp>,
    ) -> Self {
        Self {
            state,
            interval_text,
            is_editing_interval,
            theme,
            view,
        }
    }

    fn render_title(&self) -> impl IntoElement {
        div()
            .text_size(px(22.0))
            .font_weight(FontWeight::BOLD)
            .text_color(self.theme.foreground)
            .child("Smoke Alert")
    }

    fn render_interval_row(&self) -> impl IntoElement {
        let enabled = !self.state.is_running;

        div()
            .flex()
            .flex_row()
            .items_center()
            .gap_2()
            .child(
                div()
                    .text_sm()
                    .text_color(self.theme.foreground)
                    .child("Interval (s):")
            )
            .child(self.render_stepper("-", enabled, |app, _window, cx| app.handle_step_interval(-1, cx)))
            .child(self.render_interval_field(enabled))
            .child(self.render_stepper("+", enabled, |app, _window, cx| app.handle_step_interval(1, cx)))
    }

    fn render_interval_field(&self, enabled: bool) -> impl IntoElement {
        let view = self.view.clone();
        let text = if self.is_editing_interval {
            format!("{}|", self.interval_text)
        } else {
            self.interval_text.clone()
        };

        div()
            .min_w(px(64.0))
            .px_2()
            .py_1()
            .rounded(px(4.0))
            .border_2()
            .bg(self.theme.input_background)
            .border_color(if self.is_editing_interval {
                self.theme.countdown
            } else {
                self.theme.border
            })
            .text_sm()
            .text_align(TextAlign::Center)
            .text_color(self.theme.foreground)
            .when(!enabled, |div| div.opacity(DISABLED_OPACITY))
            .when(enabled, |div| {
                div.cursor_text()
                    .on_mouse_down(MouseButton::Left, move |_event, _window, cx| {
                        cx.update_entity(&view, |app, cx| app.handle_edit_interval(cx));
                    })
            })
            .child(text)
    }

    fn render_stepper(
        &self,
        label: &'static str,
        enabled: bool,
        on_click: impl Fn(&mut SmokeAlertApp, &mut Window, &mut Context<'_, SmokeAlertApp>) + 'static,
    ) -> impl IntoElement {
        let view = self.view.clone();

        div()
            .flex()
            .items_center()
            .justify_center()
            .size(px(24.0))
            .rounded(px(4.0))
            .bg(self.theme.secondary)
            .text_color(self.theme.secondary_foreground)
            .text_sm()
            .font_weight(FontWeight::BOLD)
            .when(!enabled, |div| div.opacity(DISABLED_OPACITY))
            .when(enabled, |div| {
                div.cursor_pointer()
                    .hover(|style| style.opacity(0.8))
                    .on_mouse_down(MouseButton::Left, move |_event, window, cx| {
                        cx.update_entity(&view, |app, cx| on_click(app, window, cx));
                    })
            })
            .child(label)
    }

    fn render_countdown(&self) -> impl IntoElement {
        let progress = self.state.progress();

        div()
            .flex()
            .flex_col()
            .items_center()
            .gap_1()
            .child(
                div()
                    .text_size(px(16.0))
                    .font_weight(FontWeight::MEDIUM)
                    .text_color(self.theme.countdown)
                    .child(self.state.remaining_label())
            )
            .child(
                // Elapsed part of the current interval
                div()
                    .w(px(200.0))
                    .h(px(4.0))
                    .rounded(px(2.0))
                    .bg(self.theme.secondary)
                    .child(
                        div()
                            .h_full()
                            .w(relative(progress))
                            .rounded(px(2.0))
                            .bg(self.theme.countdown)
                    )
            )
    }

    fn render_button(
        &self,
        label: &str,
        color: Hsla,
        enabled: bool,
        on_click: impl Fn(&mut SmokeAlertApp, &mut Window, &mut Context<'_, SmokeAlertApp>) + 'static,
    ) -> impl IntoElement {
        let view = self.view.clone();

        div()
            .w(px(120.0))
            .py_1()
            .flex()
            .justify_center()
            .rounded(px(6.0))
            .bg(color)
            .text_sm()
            .font_weight(FontWeight::MEDIUM)
            .text_color(rgb(0xffffff))
            .when(!enabled, |div| div.opacity(DISABLED_OPACITY))
            .when(enabled, |div| {
                div.cursor_pointer()
                    .hover(|style| style.opacity(0.8))
                    .on_mouse_down(MouseButton::Left, move |_event, window, cx| {
                        cx.update_entity(&view, |app, cx| on_click(app, window, cx));
                    })
            })
            .child(label.to_string())
    }
}

impl IntoElement for ControlPanel {
    type Element = Div;

    fn into_element(self) -> Self::Element {
        let can_start = self.state.can_start();
        let can_stop = self.state.can_stop();
        let pin_label = self.state.pin_button_label();

        div()
            .w_full()
            .h_full()
            .flex()
            .flex_col()
            .items_center()
            .justify_center()
            .gap_3()
            .bg(self.theme.background)
            .child(self.render_title())
            .child(self.render_interval_row())
            .child(self.render_countdown())
            .child(self.render_button("Start", self.theme.start, can_start, |app, window, cx| {
                app.handle_start(window, cx)
            }))
            .child(self.render_button("Stop", self.theme.stop, can_stop, |app, _window, cx| {
                app.handle_stop(cx)
            }))
            .child(self.render_button(pin_label, self.theme.secondary_foreground, true, |app, window, cx| {
                app.handle_toggle_pin(window, cx)
            }))
    }
}
