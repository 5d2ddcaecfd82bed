use crate::controller::{self, Page};
use crate::env::{Callback, PageEnv, Subscription};
use anyhow::{Context, Result};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlSelectElement, MediaQueryList,
    MediaQueryListEvent, Storage, Window,
};

const THEME_TOGGLE_ID: &str = "bm-theme-toggle";
const NAV_TOGGLE_ID: &str = "bm-nav-toggle";
const NAV_OVERLAY_ID: &str = "bm-nav-overlay";
const SIDEBAR_SELECTOR: &str = ".bm-sidebar";
const LANG_SELECT_ID: &str = "bm-lang-select";
const COLOR_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";
const DESKTOP_QUERY: &str = "(min-width: 961px)";

/// Browser-backed environment. Collaborating elements and media queries are
/// looked up once at mount; any of them may be absent.
struct WebEnv {
    window: Window,
    root: Element,
    body: HtmlElement,
    storage: Option<Storage>,
    theme_toggle: Option<Element>,
    nav_toggle: Option<Element>,
    nav_overlay: Option<Element>,
    sidebar: Option<Element>,
    lang_select: Option<HtmlSelectElement>,
    color_scheme: Option<MediaQueryList>,
    desktop: Option<MediaQueryList>,
}

impl WebEnv {
    fn new() -> Result<Self> {
        let window = web_sys::window().context("no window")?;
        let document: Document = window.document().context("no document")?;
        let root = document.document_element().context("no document root")?;
        let body = document.body().context("no body")?;

        Ok(Self {
            storage: window.local_storage().ok().flatten(),
            color_scheme: window.match_media(COLOR_SCHEME_QUERY).ok().flatten(),
            desktop: window.match_media(DESKTOP_QUERY).ok().flatten(),
            theme_toggle: document.get_element_by_id(THEME_TOGGLE_ID),
            nav_toggle: document.get_element_by_id(NAV_TOGGLE_ID),
            nav_overlay: document.get_element_by_id(NAV_OVERLAY_ID),
            sidebar: document.query_selector(SIDEBAR_SELECTOR).ok().flatten(),
            lang_select: document
                .get_element_by_id(LANG_SELECT_ID)
                .and_then(|el| el.dyn_into().ok()),
            window,
            root,
            body,
        })
    }
}

/// Attaches a DOM listener; the returned subscription removes it on drop and
/// keeps the closure alive until then.
fn listen(target: &EventTarget, kind: &'static str, mut cb: Callback) -> Option<Subscription> {
    let closure = Closure::wrap(Box::new(move |_: Event| cb()) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .ok()?;
    let target = target.clone();
    Some(Subscription::new(move || {
        let _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    }))
}

impl PageEnv for WebEnv {
    fn storage_get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn storage_set(&self, key: &str, value: &str) -> bool {
        self.storage
            .as_ref()
            .is_some_and(|s| s.set_item(key, value).is_ok())
    }

    fn root_lang(&self) -> Option<String> {
        self.root.get_attribute("lang")
    }

    fn root_attr(&self, name: &str) -> Option<String> {
        self.root.get_attribute(name)
    }

    fn set_root_attr(&self, name: &str, value: &str) {
        let _ = self.root.set_attribute(name, value);
    }

    fn body_has_class(&self, class: &str) -> bool {
        self.body.class_list().contains(class)
    }

    fn add_body_class(&self, class: &str) {
        let _ = self.body.class_list().add_1(class);
    }

    fn remove_body_class(&self, class: &str) {
        let _ = self.body.class_list().remove_1(class);
    }

    fn toggle_body_class(&self, class: &str) {
        let _ = self.body.class_list().toggle(class);
    }

    fn set_theme_toggle_label(&self, label: &str) {
        if let Some(button) = &self.theme_toggle {
            button.set_text_content(Some(label));
        }
    }

    fn on_theme_toggle_click(&self, cb: Callback) -> Option<Subscription> {
        listen(self.theme_toggle.as_ref()?.as_ref(), "click", cb)
    }

    fn on_nav_toggle_click(&self, cb: Callback) -> Option<Subscription> {
        listen(self.nav_toggle.as_ref()?.as_ref(), "click", cb)
    }

    fn on_overlay_click(&self, cb: Callback) -> Option<Subscription> {
        listen(self.nav_overlay.as_ref()?.as_ref(), "click", cb)
    }

    fn on_sidebar_link_click(&self, mut cb: Callback) -> Option<Subscription> {
        let sidebar = self.sidebar.as_ref()?.clone();
        let closure = Closure::wrap(Box::new(move |event: Event| {
            let on_link = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|el| el.tag_name().eq_ignore_ascii_case("a"));
            if on_link {
                cb();
            }
        }) as Box<dyn FnMut(Event)>);
        sidebar
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Subscription::new(move || {
            let _ = sidebar
                .remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        }))
    }

    fn prefers_dark(&self) -> Option<bool> {
        self.color_scheme.as_ref().map(MediaQueryList::matches)
    }

    fn on_color_scheme_change(&self, cb: Callback) -> Option<Subscription> {
        listen(self.color_scheme.as_ref()?.as_ref(), "change", cb)
    }

    fn on_desktop_change(&self, mut cb: Box<dyn FnMut(bool)>) -> Option<Subscription> {
        let mql = self.desktop.as_ref()?.clone();
        let closure = Closure::wrap(Box::new(move |event: MediaQueryListEvent| {
            cb(event.matches());
        }) as Box<dyn FnMut(MediaQueryListEvent)>);
        mql.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Subscription::new(move || {
            let _ =
                mql.remove_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        }))
    }

    fn path(&self) -> String {
        self.window
            .location()
            .pathname()
            .unwrap_or_else(|_| "/".to_string())
    }

    fn navigate(&self, path: &str) {
        let _ = self.window.location().set_pathname(path);
    }

    fn browser_language(&self) -> Option<String> {
        self.window.navigator().language()
    }

    fn set_lang_select_value(&self, value: &str) {
        if let Some(select) = &self.lang_select {
            select.set_value(value);
        }
    }

    fn on_lang_select_change(&self, mut cb: Box<dyn FnMut(String)>) -> Option<Subscription> {
        let select = self.lang_select.as_ref()?.clone();
        let source = select.clone();
        let closure = Closure::wrap(Box::new(move |_: Event| cb(source.value())) as Box<dyn FnMut(Event)>);
        select
            .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Subscription::new(move || {
            let _ = select
                .remove_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        }))
    }
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    match WebEnv::new() {
        Ok(env) => {
            let page = controller::mount(Rc::new(env));
            PAGE.with(|slot| *slot.borrow_mut() = Some(page));
        }
        // No document to control; leave the page static.
        Err(err) => warn!("page controller disabled: {err:#}"),
    }
}
