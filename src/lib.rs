//! Page controller for the BM documentation site: theme switching, the
//! mobile navigation drawer, and locale-aware redirects for the en/zh builds.

rust_i18n::i18n!("locales", fallback = "en");

pub mod controller;
pub mod env;
pub mod i18n;
pub mod locale;
pub mod nav;
pub mod theme;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use controller::{Page, mount};
pub use env::{PageEnv, SharedEnv, Subscription};
