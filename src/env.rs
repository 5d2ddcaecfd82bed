use std::rc::Rc;

pub type Callback = Box<dyn FnMut()>;

/// Handle for a registered listener; dropping it unregisters.
pub struct Subscription {
    unhook: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unhook: impl FnOnce() + 'static) -> Self {
        Self {
            unhook: Some(Box::new(unhook)),
        }
    }

    /// A registration that stays active for the rest of the page's life.
    pub fn forever() -> Self {
        Self { unhook: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unhook) = self.unhook.take() {
            unhook();
        }
    }
}

/// Everything the page template and host browser supply to the controllers,
/// bundled into one context object constructed per page load.
///
/// Capability checks are explicit: storage and media-query accessors return
/// `None`/`false` when the facility is unavailable, and every `on_*` hook
/// returns `None` when its collaborating element or signal is absent. Callers
/// treat all of these as "feature off" and keep going.
pub trait PageEnv {
    fn storage_get(&self, key: &str) -> Option<String>;
    fn storage_set(&self, key: &str, value: &str) -> bool;

    fn root_lang(&self) -> Option<String>;
    fn root_attr(&self, name: &str) -> Option<String>;
    fn set_root_attr(&self, name: &str, value: &str);

    fn body_has_class(&self, class: &str) -> bool;
    fn add_body_class(&self, class: &str);
    fn remove_body_class(&self, class: &str);
    fn toggle_body_class(&self, class: &str);

    fn set_theme_toggle_label(&self, label: &str);
    fn on_theme_toggle_click(&self, cb: Callback) -> Option<Subscription>;

    fn on_nav_toggle_click(&self, cb: Callback) -> Option<Subscription>;
    fn on_overlay_click(&self, cb: Callback) -> Option<Subscription>;
    /// Fires only for clicks that land on a link inside the sidebar.
    fn on_sidebar_link_click(&self, cb: Callback) -> Option<Subscription>;

    fn prefers_dark(&self) -> Option<bool>;
    fn on_color_scheme_change(&self, cb: Callback) -> Option<Subscription>;
    /// The callback receives whether the viewport now matches the desktop
    /// breakpoint.
    fn on_desktop_change(&self, cb: Box<dyn FnMut(bool)>) -> Option<Subscription>;

    fn path(&self) -> String;
    fn navigate(&self, path: &str);
    fn browser_language(&self) -> Option<String>;

    fn set_lang_select_value(&self, value: &str);
    fn on_lang_select_change(&self, cb: Box<dyn FnMut(String)>) -> Option<Subscription>;
}

pub type SharedEnv = Rc<dyn PageEnv>;
