//! Class filter dropdown options.

use crate::model::ClassRef;

/// Label of the option that clears the filter.
pub const ALL_CLASSES: &str = "All Classes";

/// One dropdown option. An empty `value` means "no filter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Builds the dropdown: "All Classes" followed by every class with an id.
pub fn class_options(classes: &[ClassRef], selected: Option<&str>) -> Vec<ClassOption> {
    let mut options = vec![ClassOption {
        value: String::new(),
        label: ALL_CLASSES.to_string(),
        selected: selected.is_none(),
    }];
    options.extend(classes.iter().filter_map(|class| {
        let value = class.record_id()?.to_string();
        Some(ClassOption {
            selected: selected == Some(value.as_str()),
            value,
            label: class.name.clone(),
        })
    }));
    options
}
