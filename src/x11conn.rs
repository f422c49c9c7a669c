//! The real Display Facade implementation, built directly on Xlib via the
//! `x11` crate — the teacher's own approach (`examples/blinklad-rdwm`'s
//! `Rdwm::init`/`register_root`/error handler), generalized from a single
//! reparenting frame-per-client model to the borderless, non-reparenting
//! model this spec calls for (border color/width are set directly on each
//! client window; there is no frame window).

use std::convert::TryInto;
use std::ffi::CString;
use std::os::raw::{c_int, c_uint, c_ulong};
use std::sync::Mutex;

use libc::c_long;
use x11::xlib::*;

use crate::config::{BORDER_WIDTH, FOCUS_COLOR, UNFOCUS_COLOR};
use crate::error::WmError;
use crate::xconn::{Atoms, ClassHint, WindowGeometry, XConn, XEventKind, XId};

lazy_static! {
    /// Set by the startup-only error handler when another client already
    /// holds `SubstructureRedirectMask` on the root (`spec.md` §5, §7).
    static ref WM_DETECTED: Mutex<bool> = Mutex::new(false);
}

const ROOT_EVENT_MASK: c_long =
    SubstructureRedirectMask | SubstructureNotifyMask | ButtonPressMask | PropertyChangeMask;

const CLIENT_EVENT_MASK: c_long =
    PropertyChangeMask | StructureNotifyMask | FocusChangeMask;

pub struct X11Conn {
    display: *mut Display,
    root: Window,
    screen: c_int,
    screen_w: i32,
    screen_h: i32,
    atoms: Atoms,
    numlockmask: u32,
    focus_pixel: c_ulong,
    unfocus_pixel: c_ulong,
}

unsafe extern "C" fn startup_error_handler(_display: *mut Display, event: *mut XErrorEvent) -> c_int {
    unsafe {
        if (*event).error_code == BadAccess {
            error!("another window manager is already running");
            *WM_DETECTED.lock().unwrap() = true;
        }
    }
    0
}

/// Swallows the race errors `spec.md` §5 names (BadWindow; BadMatch on
/// SetInputFocus/ConfigureWindow; BadDrawable on drawing ops; BadAccess on
/// GrabKey) and logs anything else before delegating is moot here because
/// Xlib's default handler aborts the process — we just log instead.
unsafe extern "C" fn runtime_error_handler(_display: *mut Display, event: *mut XErrorEvent) -> c_int {
    unsafe {
        match (*event).error_code {
            BadWindow => {}
            BadMatch | BadDrawable | BadAccess => {}
            code => error!("X error: code {}, request {}", code, (*event).request_code),
        }
    }
    0
}

impl X11Conn {
    pub fn init() -> Result<Self, WmError> {
        let display = unsafe { XOpenDisplay(std::ptr::null()) };
        if display.is_null() {
            return Err(WmError::DisplayOpenFailed);
        }

        let screen = unsafe { XDefaultScreen(display) };
        let root = unsafe { XRootWindow(display, screen) };
        let screen_w = unsafe { XDisplayWidth(display, screen) };
        let screen_h = unsafe { XDisplayHeight(display, screen) };

        *WM_DETECTED.lock().unwrap() = false;
        unsafe {
            XSetErrorHandler(Some(startup_error_handler));
            XSelectInput(display, root, ROOT_EVENT_MASK);
            XSync(display, False);
        }
        if *WM_DETECTED.lock().unwrap() {
            unsafe { XCloseDisplay(display) };
            return Err(WmError::AnotherWmRunning);
        }
        unsafe { XSetErrorHandler(Some(runtime_error_handler)) };

        let atoms = Self::intern_atoms(display);
        let numlockmask = Self::discover_numlock_mask(display);
        let colormap = unsafe { XDefaultColormap(display, screen) };
        let focus_pixel = Self::alloc_color(display, colormap, FOCUS_COLOR);
        let unfocus_pixel = Self::alloc_color(display, colormap, UNFOCUS_COLOR);

        Self::announce_ewmh_support(display, root, &atoms);

        info!("display opened: screen {}x{}", screen_w, screen_h);

        Ok(X11Conn {
            display,
            root,
            screen,
            screen_w,
            screen_h,
            atoms,
            numlockmask,
            focus_pixel,
            unfocus_pixel,
        })
    }

    fn intern_atoms(display: *mut Display) -> Atoms {
        let intern = |name: &str| -> XId {
            let c = CString::new(name).unwrap();
            unsafe { XInternAtom(display, c.as_ptr(), False) as XId }
        };
        Atoms {
            wm_protocols: intern("WM_PROTOCOLS"),
            wm_delete_window: intern("WM_DELETE_WINDOW"),
            net_supported: intern("_NET_SUPPORTED"),
            net_active_window: intern("_NET_ACTIVE_WINDOW"),
            net_wm_state: intern("_NET_WM_STATE"),
            net_wm_state_fullscreen: intern("_NET_WM_STATE_FULLSCREEN"),
        }
    }

    fn announce_ewmh_support(display: *mut Display, root: Window, atoms: &Atoms) {
        let supported: [c_ulong; 3] = [
            atoms.net_active_window as c_ulong,
            atoms.net_wm_state as c_ulong,
            atoms.net_wm_state_fullscreen as c_ulong,
        ];
        unsafe {
            XChangeProperty(
                display,
                root,
                atoms.net_supported as Atom,
                XA_ATOM,
                32,
                PropModeReplace,
                supported.as_ptr() as *const u8,
                supported.len() as c_int,
            );
        }
    }

    /// Locates the modifier bit NumLock is bound to, per `spec.md` §4.3
    /// "NumLock discovery".
    fn discover_numlock_mask(display: *mut Display) -> u32 {
        unsafe {
            let keycode = XKeysymToKeycode(display, x11::keysym::XK_Num_Lock as u64);
            if keycode == 0 {
                return 0;
            }
            let map = XGetModifierMapping(display);
            if map.is_null() {
                return 0;
            }
            let modmap = &*map;
            let mut found = 0u32;
            for i in 0..(8 * modmap.max_keypermod) {
                let kc = *modmap.modifiermap.offset(i as isize);
                if kc == keycode {
                    found = 1 << (i / modmap.max_keypermod);
                    break;
                }
            }
            XFreeModifiermap(map);
            found
        }
    }

    fn alloc_color(display: *mut Display, colormap: Colormap, rgb: u64) -> c_ulong {
        let mut color: XColor = unsafe { std::mem::zeroed() };
        color.red = (((rgb >> 16) & 0xff) * 257) as u16;
        color.green = (((rgb >> 8) & 0xff) * 257) as u16;
        color.blue = ((rgb & 0xff) * 257) as u16;
        color.flags = (DoRed | DoGreen | DoBlue) as i8;
        let ok = unsafe { XAllocColor(display, colormap, &mut color) };
        if ok == 0 {
            error!("color allocation failed for 0x{:06x}, falling back to black", rgb);
            0
        } else {
            color.pixel
        }
    }

    fn apply_geometry(&self, w: Window, geom: WindowGeometry, border_width: u32) {
        let content_w = (geom.w - 2 * border_width as i32).max(1) as c_uint;
        let content_h = (geom.h - 2 * border_width as i32).max(1) as c_uint;
        unsafe {
            XMoveResizeWindow(self.display, w, geom.x, geom.y, content_w, content_h);
        }
    }
}

impl Drop for X11Conn {
    fn drop(&mut self) {
        unsafe {
            XCloseDisplay(self.display);
        }
        info!("display closed");
    }
}

impl XConn for X11Conn {
    fn root(&self) -> XId {
        self.root as XId
    }

    fn screen_size(&self) -> (i32, i32) {
        (self.screen_w, self.screen_h)
    }

    fn atoms(&self) -> &Atoms {
        &self.atoms
    }

    fn numlock_mask(&self) -> u32 {
        self.numlockmask
    }

    fn next_event(&self) -> XEventKind {
        let mut ev: XEvent = unsafe { std::mem::zeroed() };
        unsafe { XNextEvent(self.display, &mut ev) };
        trace!("X event: {:#?}", ev);

        #[allow(non_upper_case_globals)]
        match unsafe { ev.get_type() } {
            MapRequest => XEventKind::MapRequest {
                window: unsafe { ev.map_request.window as XId },
            },
            DestroyNotify => XEventKind::DestroyNotify {
                window: unsafe { ev.destroy_window.window as XId },
            },
            UnmapNotify => XEventKind::UnmapNotify {
                window: unsafe { ev.unmap.window as XId },
                send_event: unsafe { ev.unmap.send_event != 0 },
            },
            ConfigureRequest => {
                let e = unsafe { ev.configure_request };
                XEventKind::ConfigureRequest {
                    window: e.window as XId,
                    geometry: WindowGeometry { x: e.x, y: e.y, w: e.width, h: e.height },
                    border_width: e.border_width as u32,
                    value_mask: e.value_mask as u64,
                }
            }
            ClientMessage => {
                let e = unsafe { ev.client_message };
                XEventKind::ClientMessage {
                    window: e.window as XId,
                    message_type: e.message_type as XId,
                    data: unsafe { e.data.as_longs()[..5].try_into().unwrap() },
                }
            }
            PropertyNotify => {
                let e = unsafe { ev.property };
                XEventKind::PropertyNotify { window: e.window as XId, atom: e.atom as XId }
            }
            EnterNotify => {
                let e = unsafe { ev.crossing };
                XEventKind::EnterNotify {
                    window: e.window as XId,
                    normal: e.mode == NotifyNormal,
                    inferior: e.detail == NotifyInferior,
                }
            }
            FocusIn => XEventKind::FocusIn { window: unsafe { ev.focus_change.window as XId } },
            KeyPress => {
                let e = unsafe { ev.key };
                XEventKind::KeyPress { keycode: e.keycode, state: e.state }
            }
            ButtonPress => {
                let e = unsafe { ev.button };
                XEventKind::ButtonPress {
                    window: e.window as XId,
                    button: e.button,
                    state: e.state,
                    root_x: e.x_root,
                    root_y: e.y_root,
                }
            }
            ButtonRelease => XEventKind::ButtonRelease,
            MotionNotify => {
                let e = unsafe { ev.motion };
                XEventKind::MotionNotify { root_x: e.x_root, root_y: e.y_root }
            }
            _ => XEventKind::Other,
        }
    }

    fn flush(&self) {
        unsafe { XFlush(self.display) };
    }

    fn sync(&self) {
        unsafe { XSync(self.display, False) };
    }

    fn keysym_for_keycode(&self, keycode: u32) -> u64 {
        unsafe { XKeycodeToKeysym(self.display, keycode as u8, 0) as u64 }
    }

    fn map_window(&self, w: XId) {
        unsafe { XMapWindow(self.display, w as Window) };
    }

    fn unmap_window(&self, w: XId) {
        unsafe { XUnmapWindow(self.display, w as Window) };
    }

    fn kill_client(&self, w: XId) {
        unsafe { XKillClient(self.display, w as Window) };
    }

    fn destroy_window(&self, w: XId) {
        unsafe { XDestroyWindow(self.display, w as Window) };
    }

    fn move_resize(&self, w: XId, geom: WindowGeometry) {
        self.apply_geometry(w as Window, geom, BORDER_WIDTH);
    }

    fn set_border_width(&self, w: XId, width: u32) {
        unsafe { XSetWindowBorderWidth(self.display, w as Window, width) };
    }

    fn set_border_color(&self, w: XId, focused: bool) {
        let pixel = if focused { self.focus_pixel } else { self.unfocus_pixel };
        unsafe { XSetWindowBorder(self.display, w as Window, pixel) };
    }

    fn restack(&self, windows: &[XId]) {
        if windows.is_empty() {
            return;
        }
        let mut raw: Vec<Window> = windows.iter().map(|&w| w as Window).collect();
        unsafe { XRestackWindows(self.display, raw.as_mut_ptr(), raw.len() as c_int) };
    }

    fn set_input_focus(&self, w: XId) {
        unsafe { XSetInputFocus(self.display, w as Window, RevertToPointerRoot, CurrentTime) };
    }

    fn set_active_window(&self, w: Option<XId>) {
        match w {
            Some(w) => {
                let data: [c_ulong; 1] = [w as c_ulong];
                unsafe {
                    XChangeProperty(
                        self.display,
                        self.root,
                        self.atoms.net_active_window as Atom,
                        XA_WINDOW,
                        32,
                        PropModeReplace,
                        data.as_ptr() as *const u8,
                        1,
                    );
                }
            }
            None => unsafe {
                XDeleteProperty(self.display, self.root, self.atoms.net_active_window as Atom);
            },
        }
    }

    fn select_input_for_client(&self, w: XId) {
        unsafe { XSelectInput(self.display, w as Window, CLIENT_EVENT_MASK) };
    }

    fn grab_buttons(&self, w: XId, click_to_focus_unfocused: bool) {
        let lock_combos = [0u32, LockMask, self.numlockmask, LockMask | self.numlockmask];
        unsafe {
            if click_to_focus_unfocused {
                // An unfocused client still needs a raw Button1 click to
                // focus it without the click reaching the application
                // (spec.md §4.4); `set_border_color`'s caller ungrabs this
                // again the moment the client becomes current.
                XGrabButton(
                    self.display,
                    Button1 as c_uint,
                    AnyModifier,
                    w as Window,
                    False,
                    ButtonPressMask as c_uint,
                    GrabModeAsync,
                    GrabModeAsync,
                    0,
                    0,
                );
            }
            for binding in crate::config::BUTTONS {
                for &extra in &lock_combos {
                    XGrabButton(
                        self.display,
                        binding.button,
                        binding.modifiers | extra,
                        w as Window,
                        False,
                        ButtonPressMask as c_uint,
                        GrabModeAsync,
                        GrabModeAsync,
                        0,
                        0,
                    );
                }
            }
        }
    }

    /// Releases only the focus-click catcher (`Button1`/`AnyModifier`)
    /// installed by `grab_buttons`; the configured action bindings are left
    /// grabbed so they keep working on the now-current client.
    fn ungrab_buttons(&self, w: XId) {
        unsafe { XUngrabButton(self.display, Button1 as c_uint, AnyModifier, w as Window) };
    }

    fn grab_keys(&self) {
        let lock_combos = [0u32, LockMask, self.numlockmask, LockMask | self.numlockmask];
        for binding in crate::config::KEYS {
            let keycode = unsafe { XKeysymToKeycode(self.display, binding.keysym) };
            if keycode == 0 {
                continue;
            }
            for &extra in &lock_combos {
                unsafe {
                    XGrabKey(
                        self.display,
                        keycode as c_int,
                        binding.modifiers | extra,
                        self.root,
                        True,
                        GrabModeAsync,
                        GrabModeAsync,
                    );
                }
            }
        }
    }

    fn grab_pointer_for_drag(&self) {
        const MASK: c_uint = (ButtonPressMask | ButtonReleaseMask | PointerMotionMask) as c_uint;
        unsafe {
            XGrabPointer(
                self.display,
                self.root,
                False,
                MASK,
                GrabModeAsync,
                GrabModeAsync,
                0,
                0,
                CurrentTime,
            );
        }
    }

    fn ungrab_pointer(&self) {
        unsafe { XUngrabPointer(self.display, CurrentTime) };
    }

    fn warp_pointer(&self, w: XId, x: i32, y: i32) {
        unsafe { XWarpPointer(self.display, 0, w as Window, 0, 0, 0, 0, x, y) };
    }

    fn query_pointer_root(&self) -> (i32, i32) {
        let mut root_ret: Window = 0;
        let mut child_ret: Window = 0;
        let (mut rx, mut ry, mut wx, mut wy): (c_int, c_int, c_int, c_int) = (0, 0, 0, 0);
        let mut mask: c_uint = 0;
        unsafe {
            XQueryPointer(
                self.display,
                self.root,
                &mut root_ret,
                &mut child_ret,
                &mut rx,
                &mut ry,
                &mut wx,
                &mut wy,
                &mut mask,
            );
        }
        (rx, ry)
    }

    fn get_window_attributes(&self, w: XId) -> Option<WindowGeometry> {
        let mut attrs: XWindowAttributes = unsafe { std::mem::zeroed() };
        let ok = unsafe { XGetWindowAttributes(self.display, w as Window, &mut attrs) };
        if ok == 0 {
            return None;
        }
        Some(WindowGeometry { x: attrs.x, y: attrs.y, w: attrs.width, h: attrs.height })
    }

    fn is_override_redirect(&self, w: XId) -> bool {
        let mut attrs: XWindowAttributes = unsafe { std::mem::zeroed() };
        let ok = unsafe { XGetWindowAttributes(self.display, w as Window, &mut attrs) };
        ok != 0 && attrs.override_redirect != 0
    }

    fn get_class_hint(&self, w: XId) -> Option<ClassHint> {
        let mut hint: XClassHint = unsafe { std::mem::zeroed() };
        let ok = unsafe { XGetClassHint(self.display, w as Window, &mut hint) };
        if ok == 0 {
            return None;
        }
        let class = unsafe { c_str_to_string(hint.res_class) };
        let instance = unsafe { c_str_to_string(hint.res_name) };
        unsafe {
            if !hint.res_class.is_null() {
                XFree(hint.res_class as *mut _);
            }
            if !hint.res_name.is_null() {
                XFree(hint.res_name as *mut _);
            }
        }
        Some(ClassHint { class, instance })
    }

    fn get_transient_for(&self, w: XId) -> Option<XId> {
        let mut transient_for: Window = 0;
        let ok = unsafe { XGetTransientForHint(self.display, w as Window, &mut transient_for) };
        if ok != 0 && transient_for != 0 {
            Some(transient_for as XId)
        } else {
            None
        }
    }

    fn get_wm_hints_urgent(&self, w: XId) -> bool {
        unsafe {
            let hints = XGetWMHints(self.display, w as Window);
            if hints.is_null() {
                return false;
            }
            let urgent = (*hints).flags & XUrgencyHint != 0;
            XFree(hints as *mut _);
            urgent
        }
    }

    fn get_wm_protocols(&self, w: XId) -> Vec<XId> {
        let mut protocols: *mut Atom = std::ptr::null_mut();
        let mut count: c_int = 0;
        let ok = unsafe { XGetWMProtocols(self.display, w as Window, &mut protocols, &mut count) };
        if ok == 0 || protocols.is_null() {
            return Vec::new();
        }
        let slice = unsafe { std::slice::from_raw_parts(protocols, count as usize) };
        let out = slice.iter().map(|&a| a as XId).collect();
        unsafe { XFree(protocols as *mut _) };
        out
    }

    fn get_net_wm_state(&self, w: XId) -> Vec<XId> {
        let mut actual_type: Atom = 0;
        let mut actual_format: c_int = 0;
        let mut nitems: c_ulong = 0;
        let mut bytes_after: c_ulong = 0;
        let mut data: *mut u8 = std::ptr::null_mut();
        let status = unsafe {
            XGetWindowProperty(
                self.display,
                w as Window,
                self.atoms.net_wm_state as Atom,
                0,
                i64::MAX / 4,
                False,
                XA_ATOM,
                &mut actual_type,
                &mut actual_format,
                &mut nitems,
                &mut bytes_after,
                &mut data,
            )
        };
        if status != 0 || data.is_null() {
            return Vec::new();
        }
        let atoms = unsafe { std::slice::from_raw_parts(data as *const c_ulong, nitems as usize) };
        let out = atoms.iter().map(|&a| a as XId).collect();
        unsafe { XFree(data as *mut _) };
        out
    }

    fn set_net_wm_state(&self, w: XId, atoms: &[XId]) {
        let data: Vec<c_ulong> = atoms.iter().map(|&a| a as c_ulong).collect();
        unsafe {
            XChangeProperty(
                self.display,
                w as Window,
                self.atoms.net_wm_state as Atom,
                XA_ATOM,
                32,
                PropModeReplace,
                data.as_ptr() as *const u8,
                data.len() as c_int,
            );
        }
    }

    fn send_client_message(&self, w: XId, message_type: XId, data: [i64; 5]) {
        let mut ev: XClientMessageEvent = unsafe { std::mem::zeroed() };
        ev.type_ = ClientMessage;
        ev.window = w as Window;
        ev.message_type = message_type as Atom;
        ev.format = 32;
        for (i, v) in data.iter().enumerate() {
            ev.data.set_long(i as usize, *v);
        }
        let mut wrapped = XEvent { client_message: ev };
        unsafe { XSendEvent(self.display, w as Window, False, NoEventMask, &mut wrapped) };
    }

    fn configure_window_raw(&self, w: XId, geom: WindowGeometry, border_width: u32, value_mask: u64) {
        let mut changes = XWindowChanges {
            x: geom.x,
            y: geom.y,
            width: geom.w,
            height: geom.h,
            border_width: border_width as c_int,
            sibling: 0,
            stack_mode: 0,
        };
        unsafe {
            XConfigureWindow(self.display, w as Window, value_mask as c_uint, &mut changes);
        }
    }
}

unsafe fn c_str_to_string(ptr: *mut std::os::raw::c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned() }
}

#[cfg(test)]
pub use mock::MockConn;

#[cfg(test)]
mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// In-memory stand-in for [`XConn`] used to unit-test the event
    /// dispatcher, focus manager and drag session without a live display.
    #[derive(Default)]
    pub struct MockConn {
        events: RefCell<VecDeque<XEventKind>>,
        pointer: RefCell<(i32, i32)>,
        pub restack_calls: RefCell<Vec<Vec<XId>>>,
        pub focus_calls: RefCell<Vec<XId>>,
        pub active_window: RefCell<Option<XId>>,
        pub border_widths: RefCell<std::collections::HashMap<XId, u32>>,
        pub border_focused: RefCell<std::collections::HashMap<XId, bool>>,
        pub geometries: RefCell<std::collections::HashMap<XId, WindowGeometry>>,
        pub mapped: RefCell<std::collections::HashSet<XId>>,
        pub click_grabbed: RefCell<std::collections::HashSet<XId>>,
        atoms: Atoms,
    }

    impl MockConn {
        pub fn new() -> Self {
            MockConn {
                atoms: Atoms {
                    wm_protocols: 1,
                    wm_delete_window: 2,
                    net_supported: 3,
                    net_active_window: 4,
                    net_wm_state: 5,
                    net_wm_state_fullscreen: 6,
                },
                ..Default::default()
            }
        }

        pub fn queue_events(&self, events: Vec<XEventKind>) {
            self.events.borrow_mut().extend(events);
        }

        pub fn push_pointer(&self, x: i32, y: i32) {
            *self.pointer.borrow_mut() = (x, y);
        }
    }

    impl XConn for MockConn {
        fn root(&self) -> XId {
            0
        }

        fn screen_size(&self) -> (i32, i32) {
            (1000, 600)
        }

        fn atoms(&self) -> &Atoms {
            &self.atoms
        }

        fn numlock_mask(&self) -> u32 {
            0x10
        }

        fn next_event(&self) -> XEventKind {
            self.events.borrow_mut().pop_front().unwrap_or(XEventKind::Other)
        }

        fn flush(&self) {}
        fn sync(&self) {}

        fn keysym_for_keycode(&self, keycode: u32) -> u64 {
            keycode as u64
        }

        fn map_window(&self, w: XId) {
            self.mapped.borrow_mut().insert(w);
        }

        fn unmap_window(&self, w: XId) {
            self.mapped.borrow_mut().remove(&w);
        }

        fn kill_client(&self, _w: XId) {}
        fn destroy_window(&self, _w: XId) {}

        fn move_resize(&self, w: XId, geom: WindowGeometry) {
            self.geometries.borrow_mut().insert(w, geom);
        }

        fn set_border_width(&self, w: XId, width: u32) {
            self.border_widths.borrow_mut().insert(w, width);
        }

        fn set_border_color(&self, w: XId, focused: bool) {
            self.border_focused.borrow_mut().insert(w, focused);
        }

        fn restack(&self, windows: &[XId]) {
            self.restack_calls.borrow_mut().push(windows.to_vec());
        }

        fn set_input_focus(&self, w: XId) {
            self.focus_calls.borrow_mut().push(w);
        }

        fn set_active_window(&self, w: Option<XId>) {
            *self.active_window.borrow_mut() = w;
        }

        fn select_input_for_client(&self, _w: XId) {}

        fn grab_buttons(&self, w: XId, click_to_focus_unfocused: bool) {
            if click_to_focus_unfocused {
                self.click_grabbed.borrow_mut().insert(w);
            }
        }

        fn ungrab_buttons(&self, w: XId) {
            self.click_grabbed.borrow_mut().remove(&w);
        }
        fn grab_keys(&self) {}
        fn grab_pointer_for_drag(&self) {}
        fn ungrab_pointer(&self) {}
        fn warp_pointer(&self, _w: XId, _x: i32, _y: i32) {}

        fn query_pointer_root(&self) -> (i32, i32) {
            *self.pointer.borrow()
        }

        fn get_window_attributes(&self, w: XId) -> Option<WindowGeometry> {
            self.geometries.borrow().get(&w).copied()
        }

        fn is_override_redirect(&self, _w: XId) -> bool {
            false
        }

        fn get_class_hint(&self, _w: XId) -> Option<ClassHint> {
            None
        }

        fn get_transient_for(&self, _w: XId) -> Option<XId> {
            None
        }

        fn get_wm_hints_urgent(&self, _w: XId) -> bool {
            false
        }

        fn get_wm_protocols(&self, _w: XId) -> Vec<XId> {
            Vec::new()
        }

        fn get_net_wm_state(&self, _w: XId) -> Vec<XId> {
            Vec::new()
        }

        fn set_net_wm_state(&self, _w: XId, _atoms: &[XId]) {}
        fn send_client_message(&self, _w: XId, _message_type: XId, _data: [i64; 5]) {}
        fn configure_window_raw(&self, _w: XId, _geom: WindowGeometry, _border_width: u32, _value_mask: u64) {}
    }
}
