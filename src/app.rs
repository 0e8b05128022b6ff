use gpui::*;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::alert::{AlertJob, AlertPlayer};
use crate::config::Config;
use crate::input::IntervalInput;
use crate::notifications::{self, Notice, Severity};
use crate::state::TimerState;
use crate::theme::Theme;
use crate::timer::Timer;
use crate::topmost::{self, PinStrategy, PinTarget, TopmostError};
use crate::ui::ControlPanel;

actions!(smoke_alert, [QuitApp]);

const TICK_PERIOD: Duration = Duration::from_secs(1);
const WINDOW_TITLE: &str = "Smoke Alert";

pub struct SmokeAlertApp {
    timer: Timer,
    interval: IntervalInput,
    is_editing_interval: bool,
    config: Config,
    tick_task: Option<Task<()>>,
    window_handle: Option<AnyWindowHandle>,
    focus_handle: FocusHandle,
    _quit_subscription: Subscription,
}

impl SmokeAlertApp {
    pub fn new(
        config: Config,
        player: Arc<dyn AlertPlayer>,
        window: &mut Window,
        cx: &mut Context<'_, Self>,
    ) -> Self {
        // A reopened window is born pinned; otherwise pin once it is on screen
        let born_pinned = config.start_pinned && topmost::strategy() == PinStrategy::ReopenWindow;
        let state = TimerState::new(config.interval_secs, born_pinned);
        if config.start_pinned && !born_pinned {
            let this = cx.weak_entity();
            window.defer(cx, move |window, cx| {
                let _ = this.update(cx, |app, cx| app.handle_toggle_pin(window, cx));
            });
        }

        // Silence any playing alarm before the process goes away
        let quit_subscription = cx.on_app_quit(|app, _cx| {
            app.stop_ticking();
            async {}
        });

        Self {
            timer: Timer::new(state, player),
            interval: IntervalInput::new(config.interval_secs),
            is_editing_interval: false,
            config,
            tick_task: None,
            window_handle: Some(window.window_handle()),
            focus_handle: cx.focus_handle(),
            _quit_subscription: quit_subscription,
        }
    }

    pub fn handle_start(&mut self, window: &mut Window, cx: &mut Context<'_, Self>) {
        match self.timer.start(self.interval.value()) {
            Ok(()) => {
                self.is_editing_interval = false;
                self.schedule_ticks(cx);
                cx.notify();
            }
            Err(notice) => {
                warn!("Start rejected: {}", notice.message());
                show_notice(&notice, window, cx);
            }
        }
    }

    pub fn handle_stop(&mut self, cx: &mut Context<'_, Self>) {
        self.stop_ticking();
        cx.notify();
    }

    pub fn handle_toggle_pin(&mut self, window: &mut Window, cx: &mut Context<'_, Self>) {
        let result = self.timer.toggle_pinned(&mut MainWindow {
            window: &mut *window,
            cx: &mut *cx,
        });
        match result {
            Ok(_) => cx.notify(),
            Err(notice) => {
                warn!("Pin toggle failed: {}", notice.message());
                show_notice(&notice, window, cx);
            }
        }
    }

    pub fn handle_edit_interval(&mut self, cx: &mut Context<'_, Self>) {
        if self.timer.state().is_running {
            return;
        }
        self.is_editing_interval = !self.is_editing_interval;
        cx.notify();
    }

    pub fn handle_step_interval(&mut self, delta: i32, cx: &mut Context<'_, Self>) {
        if self.timer.state().is_running {
            return;
        }
        if delta > 0 {
            self.interval.increment();
        } else {
            self.interval.decrement();
        }
        cx.notify();
    }

    fn handle_key(&mut self, key: &str, window: &mut Window, cx: &mut Context<'_, Self>) {
        match key {
            "enter" => self.handle_start(window, cx),
            "escape" => self.handle_stop(cx),
            _ if self.is_editing_interval => {
                if self.interval.handle_key(key) {
                    cx.notify();
                }
            }
            _ => {}
        }
    }

    fn schedule_ticks(&mut self, cx: &mut Context<'_, Self>) {
        self.tick_task = Some(cx.spawn(async move |this, cx| {
            loop {
                cx.background_executor().timer(TICK_PERIOD).await;

                let still_running = this
                    .update(cx, |app, cx| app.handle_tick(cx))
                    .unwrap_or(false);
                if !still_running {
                    break;
                }
            }
        }));
    }

    fn handle_tick(&mut self, cx: &mut Context<'_, Self>) -> bool {
        if let Some(job) = self.timer.tick() {
            self.fire_alert(job, cx);
        }
        cx.notify();
        self.timer.state().is_running
    }

    fn fire_alert(&mut self, job: AlertJob, cx: &mut Context<'_, Self>) {
        if self.config.enable_notifications {
            notifications::notify_alert_fired(self.timer.state().interval_secs);
        }

        let playback = cx.background_spawn(async move { job.run() });
        cx.spawn(async move |this, cx| {
            let result = playback.await;
            if let Err(e) = &result {
                error!("Alarm playback failed: {}", e);
            }

            let Ok((Some(notice), Some(handle))) = this.update(cx, |app, _| {
                (app.timer.alert_finished(result), app.window_handle)
            }) else {
                return;
            };
            let _ = handle.update(cx, |_, window, cx| show_notice(&notice, window, cx));
        })
        .detach();
    }

    fn stop_ticking(&mut self) {
        self.tick_task = None;
        self.timer.stop();
    }
}

fn show_notice(notice: &Notice, window: &mut Window, cx: &mut App) {
    let level = match notice.severity() {
        Severity::Info => PromptLevel::Info,
        Severity::Error => PromptLevel::Critical,
    };
    let message = notice.message();
    let _ = window.prompt(level, notice.title(), Some(message.as_str()), &["OK"], cx);
}

/// The window showing the app, as seen by the pin toggle.
struct MainWindow<'a, 'b> {
    window: &'a mut Window,
    cx: &'a mut Context<'b, SmokeAlertApp>,
}

impl PinTarget for MainWindow<'_, '_> {
    fn set_pinned(&mut self, pinned: bool) -> Result<(), TopmostError> {
        match topmost::strategy() {
            PinStrategy::InPlace => topmost::set_topmost(self.window, pinned),
            PinStrategy::ReopenWindow => {
                // Move the view into a fresh window of the right kind and
                // close this one once it is up.
                let bounds = self.window.bounds();
                let view = self.cx.entity().clone();
                self.window.defer(self.cx, move |window, cx| {
                    match open_main_window(view, Some(bounds), pinned, cx) {
                        Ok(_) => window.remove_window(),
                        Err(e) => error!("Failed to reopen window: {}", e),
                    }
                });
                Ok(())
            }
        }
    }
}

pub fn window_options(bounds: Option<Bounds<Pixels>>, pinned: bool, cx: &App) -> WindowOptions {
    let bounds = bounds.unwrap_or_else(|| Bounds::centered(None, size(px(400.0), px(300.0)), cx));

    WindowOptions {
        window_bounds: Some(WindowBounds::Windowed(bounds)),
        titlebar: Some(TitlebarOptions {
            title: Some(WINDOW_TITLE.into()),
            ..Default::default()
        }),
        kind: topmost::window_kind(topmost::strategy(), pinned),
        is_movable: true,
        is_resizable: false,
        focus: true,
        show: true,
        app_id: Some("smoke-alert".to_string()),
        ..Default::default()
    }
}

/// Open a window showing an existing view.
pub fn open_main_window(
    view: Entity<SmokeAlertApp>,
    bounds: Option<Bounds<Pixels>>,
    pinned: bool,
    cx: &mut App,
) -> anyhow::Result<WindowHandle<SmokeAlertApp>> {
    let handle = cx.open_window(window_options(bounds, pinned, cx), move |window, cx| {
        let window_handle = window.window_handle();
        view.update(cx, |app, _| app.window_handle = Some(window_handle));
        view
    })?;
    info!("Window opened (pinned: {})", pinned);
    Ok(handle)
}

impl Render for SmokeAlertApp {
    fn render(&mut self, window: &mut Window, cx: &mut Context<'_, Self>) -> impl IntoElement {
        let view_for_keyboard = cx.entity().clone();
        let view_for_ui = cx.entity().clone();
        let focus_handle = self.focus_handle.clone();

        self.focus_handle.focus(window);

        let theme = Theme::resolve(self.config.theme, window.appearance());

        div()
            .w_full()
            .h_full()
            .track_focus(&focus_handle)
            .on_key_down(move |event, window, cx| {
                let key = event.keystroke.key.as_str();
                cx.update_entity(&view_for_keyboard, |app, cx| app.handle_key(key, window, cx));
            })
            .on_action(|_: &QuitApp, _window, cx| {
                cx.quit();
            })
            .child(ControlPanel::new(
                self.timer.state().clone(),
                self.interval.text().to_string(),
                self.is_editing_interval,
                theme,
                view_for_ui,
            ))
    }
}
