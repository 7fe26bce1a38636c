//! Widget configuration.

use serde::{Deserialize, Serialize};

/// Configuration for an [`AutoComplete`](crate::AutoComplete) widget.
///
/// Field names follow the host-facing camelCase config surface, so options
/// arriving as JSON (`{"separator": ", ", "minLength": 3}`) deserialize
/// directly. Unset fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoCompleteOptions {
    /// Separator for multi-value entry. Empty (the default) allows only a
    /// single value.
    pub separator: String,

    /// Minimum number of characters in the current word before a search is
    /// requested.
    pub min_length: usize,

    /// Whether to auto-type the rest of the highlighted suggestion into the
    /// input, pre-selected for overwrite.
    pub suggest: bool,

    /// Whether installing fresh suggestions highlights the first item even
    /// when `suggest` is off.
    pub highlight_first: bool,
}

impl Default for AutoCompleteOptions {
    fn default() -> Self {
        Self {
            separator: String::new(),
            min_length: 1,
            suggest: false,
            highlight_first: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_allow_single_value_entry() {
        let options = AutoCompleteOptions::default();
        assert_eq!(options.separator, "");
        assert_eq!(options.min_length, 1);
        assert!(!options.suggest);
        assert!(!options.highlight_first);
    }

    #[test]
    fn deserializes_camel_case_config() {
        let options: AutoCompleteOptions =
            serde_json::from_str(r#"{"separator": ", ", "minLength": 3, "suggest": true}"#)
                .unwrap();
        assert_eq!(options.separator, ", ");
        assert_eq!(options.min_length, 3);
        assert!(options.suggest);
        assert!(!options.highlight_first);
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let options: AutoCompleteOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, AutoCompleteOptions::default());
    }

    #[test]
    fn round_trips_through_json() {
        let options = AutoCompleteOptions {
            separator: "; ".to_string(),
            min_length: 2,
            suggest: true,
            highlight_first: true,
        };
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("minLength"));
        assert_eq!(
            serde_json::from_str::<AutoCompleteOptions>(&json).unwrap(),
            options
        );
    }
}
