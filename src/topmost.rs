//! Keeping the main window above all other windows.
//!
//! gpui has no runtime always-on-top switch. On macOS a `PopUp` window sits
//! at a raised level, so pinning there means reopening the view in such a
//! window. Elsewhere the existing native window is restacked through its raw
//! handle: `SetWindowPos` on Windows, `_NET_WM_STATE_ABOVE` on X11. Wayland
//! offers no way for a client to do this.

use gpui::{Window, WindowKind};
use raw_window_handle::{HandleError, HasWindowHandle, RawWindowHandle};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinStrategy {
    /// Move the view into a window whose kind floats above others.
    ReopenWindow,
    /// Restack the existing window.
    InPlace,
}

#[derive(Error, Debug)]
pub enum TopmostError {
    #[error("keeping the window on top is not supported on {0}")]
    Unsupported(&'static str),

    #[error("window handle unavailable: {0}")]
    Handle(#[from] HandleError),

    #[cfg(target_os = "windows")]
    #[error("SetWindowPos failed: {0}")]
    Win32(#[from] windows::core::Error),

    #[cfg(any(target_os = "linux", target_os = "freebsd"))]
    #[error("X11 request failed: {0}")]
    X11(String),
}

/// Something whose always-on-top attribute can be switched.
pub trait PinTarget {
    fn set_pinned(&mut self, pinned: bool) -> Result<(), TopmostError>;
}

pub fn strategy() -> PinStrategy {
    if cfg!(target_os = "macos") {
        PinStrategy::ReopenWindow
    } else {
        PinStrategy::InPlace
    }
}

/// Kind of window to open for the given pin state.
pub fn window_kind(strategy: PinStrategy, pinned: bool) -> WindowKind {
    match (strategy, pinned) {
        (PinStrategy::ReopenWindow, true) => WindowKind::PopUp,
        _ => WindowKind::Normal,
    }
}

/// Restack an open window above (or back among) other windows.
pub fn set_topmost(window: &Window, pinned: bool) -> Result<(), TopmostError> {
    let handle = HasWindowHandle::window_handle(window)?;

    match handle.as_raw() {
        #[cfg(target_os = "windows")]
        RawWindowHandle::Win32(h) => win32::set_topmost(h.hwnd.get(), pinned),
        #[cfg(any(target_os = "linux", target_os = "freebsd"))]
        RawWindowHandle::Xcb(h) => x11::set_above(h.window.get(), pinned),
        #[cfg(any(target_os = "linux", target_os = "freebsd"))]
        RawWindowHandle::Xlib(h) => x11::set_above(h.window as u32, pinned),
        RawWindowHandle::Wayland(_) => Err(TopmostError::Unsupported("Wayland")),
        _ => Err(TopmostError::Unsupported(std::env::consts::OS)),
    }
}

#[cfg(target_os = "windows")]
mod win32 {
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::WindowsAndMessaging::{
        SetWindowPos, HWND_NOTOPMOST, HWND_TOPMOST, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE,
    };

    use super::TopmostError;

    pub fn insert_after(pinned: bool) -> HWND {
        if pinned {
            HWND_TOPMOST
        } else {
            HWND_NOTOPMOST
        }
    }

    pub fn set_topmost(hwnd: isize, pinned: bool) -> Result<(), TopmostError> {
        let hwnd = HWND(hwnd as *mut _);
        unsafe {
            SetWindowPos(
                hwnd,
                insert_after(pinned),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )?;
        }
        Ok(())
    }
}

#[cfg(any(target_os = "linux", target_os = "freebsd"))]
mod x11 {
    use std::fmt::Display;

    use x11rb::atom_manager;
    use x11rb::connection::Connection;
    use x11rb::protocol::xproto::{ClientMessageEvent, ConnectionExt as _, EventMask};

    use super::TopmostError;

    atom_manager! {
        pub StateAtoms: StateAtomsCookie {
            _NET_WM_STATE,
            _NET_WM_STATE_ABOVE,
        }
    }

    const NET_WM_STATE_REMOVE: u32 = 0;
    const NET_WM_STATE_ADD: u32 = 1;
    /// Source indication for a normal application.
    const SOURCE_APPLICATION: u32 = 1;

    pub fn state_action(pinned: bool) -> u32 {
        if pinned {
            NET_WM_STATE_ADD
        } else {
            NET_WM_STATE_REMOVE
        }
    }

    fn x11_error(e: impl Display) -> TopmostError {
        TopmostError::X11(e.to_string())
    }

    /// Ask the window manager to add or drop the "above" state. A mapped
    /// window's `_NET_WM_STATE` belongs to the WM, so this goes through a
    /// client message to the root window rather than a property write.
    pub fn set_above(window: u32, pinned: bool) -> Result<(), TopmostError> {
        let (conn, screen_num) = x11rb::connect(None).map_err(x11_error)?;
        let root = conn.setup().roots[screen_num].root;
        let atoms = StateAtoms::new(&conn)
            .map_err(x11_error)?
            .reply()
            .map_err(x11_error)?;

        let event = ClientMessageEvent::new(
            32,
            window,
            atoms._NET_WM_STATE,
            [
                state_action(pinned),
                atoms._NET_WM_STATE_ABOVE,
                0,
                SOURCE_APPLICATION,
                0,
            ],
        );
        conn.send_event(
            false,
            root,
            EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY,
            event,
        )
        .map_err(x11_error)?;
        conn.flush().map_err(x11_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reopen_strategy_floats_only_when_pinned() {
        assert!(window_kind(PinStrategy::ReopenWindow, true) == WindowKind::PopUp);
        assert!(window_kind(PinStrategy::ReopenWindow, false) == WindowKind::Normal);
    }

    #[test]
    fn in_place_strategy_never_uses_popup_windows() {
        assert!(window_kind(PinStrategy::InPlace, true) == WindowKind::Normal);
        assert!(window_kind(PinStrategy::InPlace, false) == WindowKind::Normal);
    }

    #[test]
    fn window_kind_round_trips_over_two_toggles() {
        let strategy = PinStrategy::ReopenWindow;
        let original = window_kind(strategy, false);
        let pinned = window_kind(strategy, true);
        assert!(pinned != original);
        assert!(window_kind(strategy, false) == original);
    }

    #[test]
    fn only_macos_reopens_windows() {
        let expected = if cfg!(target_os = "macos") {
            PinStrategy::ReopenWindow
        } else {
            PinStrategy::InPlace
        };
        assert_eq!(strategy(), expected);
    }

    #[test]
    fn unsupported_message_names_platform() {
        let err = TopmostError::Unsupported("Wayland");
        assert_eq!(
            err.to_string(),
            "keeping the window on top is not supported on Wayland"
        );
    }

    #[cfg(any(target_os = "linux", target_os = "freebsd"))]
    #[test]
    fn x11_action_adds_then_removes_above_state() {
        assert_eq!(x11::state_action(true), 1);
        assert_eq!(x11::state_action(false), 0);
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn win32_insert_after_switches_topmost_band() {
        use windows::Win32::UI::WindowsAndMessaging::{HWND_NOTOPMOST, HWND_TOPMOST};
        assert_eq!(win32::insert_after(true), HWND_TOPMOST);
        assert_eq!(win32::insert_after(false), HWND_NOTOPMOST);
    }
}
