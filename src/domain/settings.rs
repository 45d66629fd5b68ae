//! Typed application settings read through [`ConfigPort`].

use chrono::NaiveDate;

use crate::domain::dataset::default_cutoff;
use crate::domain::error::LinedeckError;
use crate::domain::pages::APP_TITLE;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_DATASET_PATH: &str = "data/stocks.csv";
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8501";

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSettings {
    pub path: String,
    pub cutoff: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Wide,
    Centered,
}

impl Layout {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "wide" => Some(Layout::Wide),
            "centered" => Some(Layout::Centered),
            _ => None,
        }
    }
}

/// Initial state of the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarState {
    Expanded,
    Collapsed,
}

impl SidebarState {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "expanded" => Some(SidebarState::Expanded),
            "collapsed" => Some(SidebarState::Collapsed),
            _ => None,
        }
    }
}

/// Page chrome, the equivalent of a dashboard's page config.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSettings {
    pub title: String,
    pub layout: Layout,
    pub sidebar: SidebarState,
}

impl PageSettings {
    pub fn is_wide(&self) -> bool {
        self.layout == Layout::Wide
    }

    pub fn sidebar_expanded(&self) -> bool {
        self.sidebar == SidebarState::Expanded
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            title: APP_TITLE.to_string(),
            layout: Layout::Wide,
            sidebar: SidebarState::Expanded,
        }
    }
}

/// Looks up `[section] key` and parses it with `parse`, naming the accepted
/// values in the error.
fn parse_choice<T>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    expected: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, LinedeckError> {
    match config.get_string(section, key) {
        Some(raw) => parse(&raw).map(Some).ok_or_else(|| LinedeckError::ConfigInvalid {
            section: section.into(),
            key: key.into(),
            reason: format!("expected {expected}, got '{}'", raw.trim()),
        }),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub dataset: DatasetSettings,
    pub listen: String,
    pub page: PageSettings,
}

impl Settings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, LinedeckError> {
        let cutoff = match config.get_string("dataset", "cutoff") {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                LinedeckError::ConfigInvalid {
                    section: "dataset".into(),
                    key: "cutoff".into(),
                    reason: "invalid date format (expected YYYY-MM-DD)".into(),
                }
            })?,
            None => default_cutoff(),
        };

        let path = config
            .get_string("dataset", "path")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATASET_PATH.to_string());

        let listen = config
            .get_string("web", "listen")
            .unwrap_or_else(|| DEFAULT_LISTEN.to_string());

        let defaults = PageSettings::default();
        let page = PageSettings {
            title: config.get_string("page", "title").unwrap_or(defaults.title),
            layout: parse_choice(config, "page", "layout", "wide or centered", Layout::parse)?
                .unwrap_or(defaults.layout),
            sidebar: parse_choice(
                config,
                "page",
                "sidebar",
                "expanded or collapsed",
                SidebarState::parse,
            )?
            .unwrap_or(defaults.sidebar),
        };

        Ok(Self {
            dataset: DatasetSettings { path, cutoff },
            listen,
            page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    #[test]
    fn defaults_apply_to_empty_config() {
        let settings = Settings::from_config(&FileConfigAdapter::empty()).unwrap();
        assert_eq!(settings.dataset.path, DEFAULT_DATASET_PATH);
        assert_eq!(settings.dataset.cutoff, default_cutoff());
        assert_eq!(settings.listen, DEFAULT_LISTEN);
        assert_eq!(settings.page, PageSettings::default());
    }

    #[test]
    fn reads_every_section() {
        let ini = "[dataset]\npath = /srv/stocks.csv\ncutoff = 2006-06-30\n\
                   [web]\nlisten = 0.0.0.0:8080\n\
                   [page]\ntitle = Stocks\nlayout = centered\nsidebar = collapsed\n";
        let settings = Settings::from_config(&FileConfigAdapter::from_string(ini).unwrap()).unwrap();

        assert_eq!(settings.dataset.path, "/srv/stocks.csv");
        assert_eq!(
            settings.dataset.cutoff,
            NaiveDate::from_ymd_opt(2006, 6, 30).unwrap()
        );
        assert_eq!(settings.listen, "0.0.0.0:8080");
        assert_eq!(settings.page.title, "Stocks");
        assert_eq!(settings.page.layout, Layout::Centered);
        assert_eq!(settings.page.sidebar, SidebarState::Collapsed);
        assert!(!settings.page.is_wide());
        assert!(!settings.page.sidebar_expanded());
    }

    #[test]
    fn layout_centered_keeps_sidebar_default() {
        let adapter = FileConfigAdapter::from_string("[page]\nlayout = Centered\n").unwrap();
        let page = Settings::from_config(&adapter).unwrap().page;
        assert_eq!(page.layout, Layout::Centered);
        assert_eq!(page.sidebar, SidebarState::Expanded);
    }

    #[test]
    fn unknown_layout_is_config_error() {
        let adapter = FileConfigAdapter::from_string("[page]\nlayout = narrow\n").unwrap();
        let err = Settings::from_config(&adapter).unwrap_err();
        assert!(matches!(
            err,
            LinedeckError::ConfigInvalid { ref key, ref reason, .. }
                if key == "layout" && reason.contains("narrow")
        ));
    }

    #[test]
    fn unknown_sidebar_state_is_config_error() {
        let adapter = FileConfigAdapter::from_string("[page]\nsidebar = hidden\n").unwrap();
        let err = Settings::from_config(&adapter).unwrap_err();
        assert!(matches!(
            err,
            LinedeckError::ConfigInvalid { ref section, ref key, .. }
                if section == "page" && key == "sidebar"
        ));
    }

    #[test]
    fn invalid_cutoff_is_config_error() {
        let adapter = FileConfigAdapter::from_string("[dataset]\ncutoff = 01/01/2004\n").unwrap();
        let err = Settings::from_config(&adapter).unwrap_err();
        assert!(matches!(
            err,
            LinedeckError::ConfigInvalid { ref key, .. } if key == "cutoff"
        ));
    }
}
