use crate::utils::*;
use serde::{Deserialize, Serialize};

/// Explicit color scheme override. `None` means no preference, which leaves
/// the scheme to the browser.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const ATTR_NAME: &'static str = "data-theme";

    pub(crate) const fn scheme(self) -> &'static str {
        use Theme::*;
        match self {
            Light => "light",
            Dark => "dark",
        }
    }

    pub(crate) const fn cycle(theme: Option<Self>) -> Option<Self> {
        use Theme::*;
        match theme {
            None => Some(Light),
            Some(Light) => Some(Dark),
            Some(Dark) => None,
        }
    }

    pub(crate) const fn glyph(theme: Option<Self>) -> &'static str {
        use Theme::*;
        match theme {
            None => "◐",
            Some(Light) => "○",
            Some(Dark) => "●",
        }
    }

    fn update_html(theme: Option<Self>) {
        use gloo::utils::document;
        let html = document()
            .query_selector("html")
            .expect("query must be correct")
            .expect("must have html element");
        if let Some(theme) = theme {
            let scheme = theme.scheme();
            log::debug!("theme-scheme: {}", scheme);
            if let Err(err) = html.set_attribute(Self::ATTR_NAME, scheme) {
                log::error!("failed to set theme: {:?}", err);
            }
        } else {
            log::debug!("no theme preference");
            if let Err(err) = html.remove_attribute(Self::ATTR_NAME) {
                log::error!("failed to set theme: {:?}", err);
            }
        }
    }

    pub(crate) fn init() {
        Self::update_html(LocalOrDefault::local_or_default());
    }

    pub(crate) fn apply(theme: Option<Self>) {
        theme.local_save();
        Self::update_html(theme);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Light
    }
}

impl StorageKey for Theme {
    const KEY: &'static str = "hanbunko:theme";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_cycle_visits_every_state_and_returns_to_auto() {
        let auto = None;
        let light = Theme::cycle(auto);
        let dark = Theme::cycle(light);

        assert_eq!(light, Some(Theme::Light));
        assert_eq!(dark, Some(Theme::Dark));
        assert_eq!(Theme::cycle(dark), auto);
    }

    #[test]
    fn storage_key_uses_the_app_namespace_across_the_auto_state() {
        assert_eq!(<Theme as StorageKey>::KEY, "hanbunko:theme");
        assert_eq!(<Option<Theme> as StorageKey>::KEY, Theme::KEY);
    }
}
