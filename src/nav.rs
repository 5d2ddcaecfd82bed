use crate::env::SharedEnv;

pub const NAV_OPEN_CLASS: &str = "bm-nav-open";

/// Mobile navigation drawer. The open/closed state is the presence of the
/// `bm-nav-open` class on `<body>`, so it resets on every fresh load.
pub struct NavDrawer {
    env: SharedEnv,
}

impl NavDrawer {
    pub fn new(env: SharedEnv) -> Self {
        Self { env }
    }

    pub fn is_open(&self) -> bool {
        self.env.body_has_class(NAV_OPEN_CLASS)
    }

    pub fn toggle(&self) {
        self.env.toggle_body_class(NAV_OPEN_CLASS);
    }

    pub fn close(&self) {
        self.env.remove_body_class(NAV_OPEN_CLASS);
    }

    /// Sidebar link clicks close the drawer only when it is open.
    pub fn close_if_open(&self) {
        if self.is_open() {
            self.close();
        }
    }

    /// Crossing into the desktop breakpoint always closes the drawer.
    pub fn on_viewport_change(&self, desktop: bool) {
        if desktop {
            self.close();
        }
    }
}
