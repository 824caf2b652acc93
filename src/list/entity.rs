use crate::api::resources::Resource;
use serde::de::DeserializeOwned;

/// Filter value meaning "no restriction".
pub const ALL: &str = "all";

/// Sort key that is resolved client-side against the display name.
pub const NAME_SORT_KEY: &str = "name";

/// Where a filter is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterScope {
    /// Sent to the backend as a query parameter.
    Server,
    /// Applied to the fetched page because the backend cannot express it.
    Client,
}

/// A discrete, string-enum filter control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDef {
    pub name: &'static str,
    pub scope: FilterScope,
    /// Allowed values; the first one is the default.
    pub options: &'static [&'static str],
}

impl FilterDef {
    pub const fn server(name: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            name,
            scope: FilterScope::Server,
            options,
        }
    }

    pub const fn client(name: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            name,
            scope: FilterScope::Client,
            options,
        }
    }

    pub fn default_value(&self) -> &'static str {
        self.options.first().copied().unwrap_or(ALL)
    }

    pub fn accepts(&self, value: &str) -> bool {
        self.options.contains(&value)
    }

    /// Option following `current`, wrapping around.
    pub fn next_option(&self, current: &str) -> &'static str {
        let position = self.options.iter().position(|option| *option == current);
        match position {
            Some(index) => self.options[(index + 1) % self.options.len()],
            None => self.default_value(),
        }
    }
}

/// A backend record that can be listed, filtered, sorted and rendered as a row.
pub trait ListEntity: Clone + Send + Sync + DeserializeOwned + 'static {
    const RESOURCE: Resource;

    /// Filter controls offered on the list screen.
    const FILTERS: &'static [FilterDef] = &[];

    /// Column headers, matching `cells`.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> &str;

    fn display_name(&self) -> &str;

    /// Evaluate a client-scope filter. `value` is never [`ALL`].
    fn matches_client_filter(&self, _name: &str, _value: &str) -> bool {
        true
    }

    fn cells(&self) -> Vec<String>;

    fn filter_def(name: &str) -> Option<&'static FilterDef> {
        Self::FILTERS.iter().find(|def| def.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: FilterDef = FilterDef::server("status", &["all", "pending", "accepted"]);

    #[test]
    fn next_option_wraps() {
        assert_eq!(STATUS.next_option("all"), "pending");
        assert_eq!(STATUS.next_option("accepted"), "all");
        assert_eq!(STATUS.next_option("bogus"), "all");
    }

    #[test]
    fn accepts_only_declared_options() {
        assert!(STATUS.accepts("pending"));
        assert!(!STATUS.accepts("Pending"));
        assert_eq!(STATUS.default_value(), "all");
    }
}
