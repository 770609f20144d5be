//! Per-field inclusion and naming policy.
//!
//! Pure function of (field, direction, configuration, active filter). The
//! synthesizer consults it once per field; nothing here recurses or mutates.

use std::collections::BTreeSet;

use crate::config::{Direction, SynthConfig};
use crate::model::FieldDescriptor;

/// Active serialization view/group sets for one root invocation. An empty
/// axis means "no filtering on that axis".
#[derive(Clone, Debug, Default)]
pub struct SerializationFilter {
    pub groups: BTreeSet<String>,
    pub views: BTreeSet<String>,
}

impl SerializationFilter {
    pub fn none() -> Self {
        SerializationFilter::default()
    }

    fn admits(&self, field: &FieldDescriptor) -> bool {
        if !self.groups.is_empty() && self.groups.is_disjoint(&field.groups) {
            return false;
        }
        if !self.views.is_empty() && self.views.is_disjoint(&field.views) {
            return false;
        }
        true
    }
}

pub struct FieldPolicy<'a> {
    config: &'a SynthConfig,
}

impl<'a> FieldPolicy<'a> {
    pub fn new(config: &'a SynthConfig) -> Self {
        FieldPolicy { config }
    }

    /// Whether the field appears in the output at all.
    pub fn includes(
        &self,
        field: &FieldDescriptor,
        direction: Direction,
        filter: &SerializationFilter,
    ) -> bool {
        if field.ignored || self.config.ignored_fields.contains(&field.name) {
            return false;
        }
        if field.transient && !self.config.serialize_transients(direction) {
            return false;
        }
        filter.admits(field)
    }

    /// Output name under the naming convention configured for the direction.
    pub fn output_name(&self, field: &FieldDescriptor, direction: Direction) -> String {
        self.config.field_style(direction).apply(&field.name)
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamingStyle;

    fn field(name: &str) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            signature: "java.lang.String".into(),
            transient: false,
            mock: None,
            ignored: false,
            groups: BTreeSet::new(),
            views: BTreeSet::new(),
        }
    }

    #[test]
    fn ignore_list_and_source_flag_exclude() {
        let mut config = SynthConfig::default();
        config.ignored_fields.insert("password".into());
        let policy = FieldPolicy::new(&config);
        let filter = SerializationFilter::none();

        assert!(!policy.includes(&field("password"), Direction::Response, &filter));
        let mut flagged = field("internal");
        flagged.ignored = true;
        assert!(!policy.includes(&flagged, Direction::Response, &filter));
        assert!(policy.includes(&field("taskType"), Direction::Response, &filter));
    }

    #[test]
    fn transients_follow_the_direction_toggle() {
        let mut config = SynthConfig::default();
        config.serialize_response_transients = true;
        let policy = FieldPolicy::new(&config);
        let filter = SerializationFilter::none();

        let mut f = field("cache");
        f.transient = true;
        assert!(policy.includes(&f, Direction::Response, &filter));
        assert!(!policy.includes(&f, Direction::Request, &filter));
    }

    #[test]
    fn view_filter_requires_membership_only_when_active() {
        let config = SynthConfig::default();
        let policy = FieldPolicy::new(&config);

        let mut f = field("email");
        f.views.insert("Public".into());

        let mut active = SerializationFilter::none();
        active.views.insert("Internal".into());
        assert!(!policy.includes(&f, Direction::Response, &active));

        active.views.insert("Public".into());
        assert!(policy.includes(&f, Direction::Response, &active));

        // No active views: everything passes.
        assert!(policy.includes(&f, Direction::Response, &SerializationFilter::none()));
    }

    #[test]
    fn group_filter_requires_membership_only_when_active() {
        let config = SynthConfig::default();
        let policy = FieldPolicy::new(&config);

        let mut f = field("balance");
        f.groups.insert("Billing".into());

        let mut active = SerializationFilter::none();
        active.groups.insert("Profile".into());
        assert!(!policy.includes(&f, Direction::Response, &active));

        active.groups.insert("Billing".into());
        assert!(policy.includes(&f, Direction::Response, &active));

        // No active groups: everything passes.
        assert!(policy.includes(&f, Direction::Response, &SerializationFilter::none()));
    }

    #[test]
    fn naming_transform_is_per_direction() {
        let config = SynthConfig {
            response_field_style: NamingStyle::SnakeCase,
            ..SynthConfig::default()
        };
        let policy = FieldPolicy::new(&config);
        let f = field("taskType");
        assert_eq!(policy.output_name(&f, Direction::Response), "task_type");
        assert_eq!(policy.output_name(&f, Direction::Request), "taskType");
    }
}
