//! # Graph Selection
//!
//! Local rendering state for the historical graph panel. Nothing here
//! touches the network: swapping graphs only changes which image locator
//! the display layer should load next.

/// One selectable graph in the sibling set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphOption {
    /// Bare image locator, without any cache-busting suffix.
    pub url: String,
    /// Whether this option carries the selected styling.
    pub selected: bool,
}

/// Exclusive selector over the graph buttons, plus the locator the display
/// should currently show.
///
/// Every swap appends a fresh random query suffix so that re-selecting the
/// same graph forces a re-fetch instead of serving a cached image. At most
/// one option is marked selected at a time, none once cleared.
#[derive(Debug, Default)]
pub struct GraphSelector {
    options: Vec<GraphOption>,
    display: Option<String>,
}

impl GraphSelector {
    /// Build a selector over the given sibling set, nothing selected.
    #[must_use]
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: urls
                .into_iter()
                .map(|url| GraphOption {
                    url: url.into(),
                    selected: false,
                })
                .collect(),
            display: None,
        }
    }

    /// Select a graph by locator, or clear with `None`.
    ///
    /// Marks exactly the matching option selected (none when clearing) and
    /// returns the display locator carrying a fresh cache-busting suffix.
    pub fn select(&mut self, url: Option<&str>) -> Option<&str> {
        match url {
            None => {
                for option in &mut self.options {
                    option.selected = false;
                }
                self.display = None;
            }
            Some(url) => {
                for option in &mut self.options {
                    option.selected = option.url == url;
                }
                self.display = Some(format!("{url}?{:016x}", rand::random::<u64>()));
            }
        }
        self.display()
    }

    /// Locator the display layer should load right now, with its suffix.
    #[must_use]
    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// The selected option's bare locator, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.selected)
            .map(|option| option.url.as_str())
    }

    /// The sibling set in display order.
    #[must_use]
    pub fn options(&self) -> &[GraphOption] {
        &self.options
    }
}
