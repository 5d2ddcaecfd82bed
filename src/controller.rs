use crate::env::{SharedEnv, Subscription};
use crate::i18n;
use crate::locale::{self, LANG_KEY, Locale};
use crate::nav::NavDrawer;
use crate::theme::{self, THEME_KEY, ThemeController};
use std::rc::Rc;
use tracing::debug;

/// A mounted page. Holds the listener registrations alive; dropping it tears
/// them all down again.
pub struct Page {
    pub theme: Rc<ThemeController>,
    pub nav: Rc<NavDrawer>,
    subs: Vec<Subscription>,
}

impl Page {
    pub fn subscriptions(&self) -> usize {
        self.subs.len()
    }
}

/// The single synchronous initialization pass that runs on page load. All
/// later behavior is driven by the callbacks registered here.
pub fn mount(env: SharedEnv) -> Page {
    let label_locale = i18n::page_locale(env.root_lang().as_deref());
    let theme = Rc::new(ThemeController::new(env.clone(), &label_locale));
    let nav = Rc::new(NavDrawer::new(env.clone()));

    let mut subs = Vec::new();

    // Register the OS listener before the first apply so a scheme flip during
    // load is not missed.
    {
        let theme = Rc::clone(&theme);
        if let Some(sub) = env.on_color_scheme_change(Box::new(move || theme.on_system_change())) {
            subs.push(sub);
        }
    }

    let stored = env.storage_get(THEME_KEY);
    theme.apply(theme::parse_mode(stored.as_deref()));

    {
        let theme = Rc::clone(&theme);
        if let Some(sub) = env.on_theme_toggle_click(Box::new(move || theme.cycle())) {
            subs.push(sub);
        }
    }

    {
        let nav = Rc::clone(&nav);
        if let Some(sub) = env.on_nav_toggle_click(Box::new(move || nav.toggle())) {
            subs.push(sub);
        }
    }
    {
        let nav = Rc::clone(&nav);
        if let Some(sub) = env.on_overlay_click(Box::new(move || nav.close())) {
            subs.push(sub);
        }
    }
    {
        let nav = Rc::clone(&nav);
        if let Some(sub) = env.on_sidebar_link_click(Box::new(move || nav.close_if_open())) {
            subs.push(sub);
        }
    }
    {
        let nav = Rc::clone(&nav);
        if let Some(sub) =
            env.on_desktop_change(Box::new(move |desktop| nav.on_viewport_change(desktop)))
        {
            subs.push(sub);
        }
    }

    wire_locale(&env, &mut subs);

    Page { theme, nav, subs }
}

fn wire_locale(env: &SharedEnv, subs: &mut Vec<Subscription>) {
    let current = Locale::from_path(&env.path());
    let stored = env
        .storage_get(LANG_KEY)
        .and_then(|s| s.parse::<Locale>().ok());

    // A locale the user picked earlier always wins over the URL; the redirect
    // is terminal for this load, so the selector is not even wired up.
    if let Some(stored) = stored {
        if stored != current {
            debug!(
                from = current.as_str(),
                to = stored.as_str(),
                "redirecting to stored locale"
            );
            env.navigate(&locale::build_path_for_lang(&env.path(), stored));
            return;
        }
    }

    env.set_lang_select_value(stored.unwrap_or(current).as_str());
    {
        let handler_env = Rc::clone(env);
        if let Some(sub) = env.on_lang_select_change(Box::new(move |value| {
            let target = value.parse::<Locale>().unwrap_or_default();
            handler_env.storage_set(LANG_KEY, target.as_str());
            handler_env.navigate(&locale::build_path_for_lang(&handler_env.path(), target));
        })) {
            subs.push(sub);
        }
    }

    // First visit only: prefer zh for zh-* browsers. A stored choice, even
    // one matching the URL, disables auto-detection for good.
    if stored.is_none() {
        let tag = env.browser_language().unwrap_or_default();
        if Locale::from_browser_tag(&tag) == Locale::Zh && current != Locale::Zh {
            debug!(tag = tag.as_str(), "browser language auto-detect redirect");
            env.navigate(&locale::build_path_for_lang(&env.path(), Locale::Zh));
        }
    }
}
