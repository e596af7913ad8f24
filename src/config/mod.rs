//! View configuration loading and resolution
//!
//! Configuration is plain YAML keyed by view name:
//!
//! ```yaml
//! views:
//!   students:
//!     page_size: 10
//!     default_sort: name:asc
//!     search_fields: [name, student_id, parent_name]
//!     quick_filters:
//!       - id: primary
//!         label: Primary
//!         any_of:
//!           - kind: equals
//!             field: grade
//!             values: ["1", "2", "Grade 1", "Grade 2"]
//!       - id: recently-enrolled
//!         any_of:
//!           - kind: within_days
//!             field: enrolled_at
//!             days: 30
//! ```
//!
//! Field names stay strings until [`ViewConfig::resolve`] parses them against
//! a record's field enum.

use crate::core::{ConfigError, FieldKey};
use crate::filter::quick::earliest_within;
use crate::filter::{Condition, QuickFilter, QuickFilterCatalog};
use crate::paginate::{DEFAULT_PAGE_SIZE, PageState};
use crate::sort::SortState;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One condition of a quick filter, as written in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConditionConfig {
    Equals {
        field: String,
        values: Vec<String>,
    },
    Present {
        field: String,
    },
    Missing {
        field: String,
    },
    Range {
        field: String,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    WithinDays {
        field: String,
        days: i64,
    },
}

impl ConditionConfig {
    pub fn equals(field: &str, values: &[&str]) -> Self {
        ConditionConfig::Equals {
            field: field.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn field(&self) -> &str {
        match self {
            ConditionConfig::Equals { field, .. }
            | ConditionConfig::Present { field }
            | ConditionConfig::Missing { field }
            | ConditionConfig::Range { field, .. }
            | ConditionConfig::WithinDays { field, .. } => field.as_str(),
        }
    }
}

/// A quick filter, as written in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickFilterConfig {
    pub id: String,

    /// Display label (defaults to the id)
    #[serde(default)]
    pub label: Option<String>,

    pub any_of: Vec<ConditionConfig>,
}

/// Configuration of a single roster view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// `field[:direction]`; unknown fields fall back to the record's default
    #[serde(default)]
    pub default_sort: Option<String>,

    /// Overrides the record's searchable fields when non-empty
    #[serde(default)]
    pub search_fields: Vec<String>,

    #[serde(default)]
    pub quick_filters: Vec<QuickFilterConfig>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            default_sort: None,
            search_fields: Vec::new(),
            quick_filters: Vec::new(),
        }
    }
}

/// A view configuration resolved against a record's field enum
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedView<F> {
    pub page_size: usize,
    pub default_sort: SortState<F>,
    pub search_fields: Vec<F>,
    pub catalog: QuickFilterCatalog<F>,
}

impl ViewConfig {
    /// Parse field names and compile quick filters
    ///
    /// `reference_time` anchors time-relative conditions such as `within_days`.
    pub fn resolve<F: FieldKey>(
        &self,
        resource: &str,
        reference_time: DateTime<Utc>,
    ) -> Result<ResolvedView<F>, ConfigError> {
        let parse_field = |name: &str, context: &str| {
            F::parse(name).ok_or_else(|| ConfigError::UnknownField {
                resource: resource.to_string(),
                field: name.to_string(),
                context: context.to_string(),
            })
        };

        let search_fields = self
            .search_fields
            .iter()
            .map(|name| parse_field(name.as_str(), "search_fields"))
            .collect::<Result<Vec<F>, _>>()?;

        let mut seen = HashSet::new();
        let mut catalog = QuickFilterCatalog::new(reference_time);
        for quick in &self.quick_filters {
            if !seen.insert(quick.id.as_str()) {
                return Err(ConfigError::DuplicateQuickFilter {
                    id: quick.id.clone(),
                });
            }
            if quick.any_of.is_empty() {
                return Err(ConfigError::EmptyQuickFilter {
                    id: quick.id.clone(),
                });
            }

            let context = format!("quick filter '{}'", quick.id);
            let mut filter = QuickFilter::new(
                quick.id.as_str(),
                quick.label.as_deref().unwrap_or(&quick.id),
            );
            for condition in &quick.any_of {
                let field = parse_field(condition.field(), context.as_str())?;
                let compiled = match condition {
                    ConditionConfig::Equals { values, .. } => Condition::Equals {
                        field,
                        values: values.clone(),
                    },
                    ConditionConfig::Present { .. } => Condition::Present(field),
                    ConditionConfig::Missing { .. } => Condition::Missing(field),
                    ConditionConfig::Range { min, max, .. } => {
                        if let (Some(lo), Some(hi)) = (min, max)
                            && lo > hi
                        {
                            return Err(ConfigError::InvalidRange {
                                id: quick.id.clone(),
                                min: *lo,
                                max: *hi,
                            });
                        }
                        Condition::Range {
                            field,
                            min: *min,
                            max: *max,
                        }
                    }
                    ConditionConfig::WithinDays { days, .. } => {
                        if *days < 0 || earliest_within(reference_time, *days).is_none() {
                            return Err(ConfigError::InvalidDays {
                                id: quick.id.clone(),
                                days: *days,
                            });
                        }
                        Condition::WithinDays {
                            field,
                            days: *days,
                        }
                    }
                };
                filter = filter.or(compiled);
            }
            catalog.insert(filter);
        }

        let default_sort = self
            .default_sort
            .as_deref()
            .map(SortState::parse)
            .unwrap_or_default();

        Ok(ResolvedView {
            page_size: PageState::new(self.page_size).page_size(),
            default_sort,
            search_fields,
            catalog,
        })
    }
}

/// Complete configuration: every roster view by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewsConfig {
    #[serde(default)]
    pub views: IndexMap<String, ViewConfig>,
}

impl ViewsConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn view(&self, name: &str) -> Option<&ViewConfig> {
        self.views.get(name)
    }

    /// Resolve a named view for a record type
    pub fn resolve<F: FieldKey>(
        &self,
        name: &str,
        reference_time: DateTime<Utc>,
    ) -> Result<ResolvedView<F>, ConfigError> {
        let view = self.view(name).ok_or_else(|| ConfigError::UnknownView {
            view: name.to_string(),
        })?;
        view.resolve(name, reference_time)
    }

    /// Merge several configurations
    ///
    /// Later configurations win: a view present in several inputs takes the
    /// last definition, while first-seen view order is kept.
    pub fn merge(configs: Vec<ViewsConfig>) -> Self {
        let mut merged = ViewsConfig::default();
        for config in configs {
            for (name, view) in config.views {
                merged.views.insert(name, view);
            }
        }
        merged
    }

    /// Built-in configuration for the student and teacher screens
    pub fn default_config() -> Self {
        let students = ViewConfig {
            page_size: 10,
            default_sort: Some("name:asc".to_string()),
            search_fields: Vec::new(),
            quick_filters: vec![
                QuickFilterConfig {
                    id: "preschool".to_string(),
                    label: Some("Preschool".to_string()),
                    any_of: vec![ConditionConfig::equals(
                        "grade",
                        &["K", "KG", "Kindergarten", "Nursery", "Pre-K"],
                    )],
                },
                QuickFilterConfig {
                    id: "primary".to_string(),
                    label: Some("Primary (grades 1-6)".to_string()),
                    any_of: vec![
                        ConditionConfig::equals("grade", &["1", "2", "3", "4", "5", "6"]),
                        ConditionConfig::equals(
                            "grade",
                            &["Grade 1", "Grade 2", "Grade 3", "Grade 4", "Grade 5", "Grade 6"],
                        ),
                        ConditionConfig::equals("grade", &["P1", "P2", "P3", "P4", "P5", "P6"]),
                    ],
                },
                QuickFilterConfig {
                    id: "secondary".to_string(),
                    label: Some("Secondary (grades 7-12)".to_string()),
                    any_of: vec![
                        ConditionConfig::equals("grade", &["7", "8", "9", "10", "11", "12"]),
                        ConditionConfig::equals(
                            "grade",
                            &["Grade 7", "Grade 8", "Grade 9", "Grade 10", "Grade 11", "Grade 12"],
                        ),
                        ConditionConfig::equals("grade", &["S1", "S2", "S3", "S4", "S5", "S6"]),
                    ],
                },
                QuickFilterConfig {
                    id: "recently-enrolled".to_string(),
                    label: Some("Enrolled in the last 30 days".to_string()),
                    any_of: vec![ConditionConfig::WithinDays {
                        field: "enrolled_at".to_string(),
                        days: 30,
                    }],
                },
                QuickFilterConfig {
                    id: "missing-contact".to_string(),
                    label: Some("Missing contact number".to_string()),
                    any_of: vec![
                        ConditionConfig::Missing {
                            field: "phone".to_string(),
                        },
                        ConditionConfig::Missing {
                            field: "parent_phone".to_string(),
                        },
                    ],
                },
                QuickFilterConfig {
                    id: "low-attendance".to_string(),
                    label: Some("Attendance below 75%".to_string()),
                    any_of: vec![ConditionConfig::Range {
                        field: "attendance_rate".to_string(),
                        min: None,
                        max: Some(75.0),
                    }],
                },
            ],
        };

        let teachers = ViewConfig {
            page_size: 10,
            default_sort: Some("name:asc".to_string()),
            search_fields: Vec::new(),
            quick_filters: vec![
                QuickFilterConfig {
                    id: "experienced".to_string(),
                    label: Some("5+ years of experience".to_string()),
                    any_of: vec![ConditionConfig::Range {
                        field: "years_experience".to_string(),
                        min: Some(5.0),
                        max: None,
                    }],
                },
                QuickFilterConfig {
                    id: "on-leave".to_string(),
                    label: Some("On leave".to_string()),
                    any_of: vec![ConditionConfig::equals("status", &["on_leave"])],
                },
                QuickFilterConfig {
                    id: "recently-joined".to_string(),
                    label: Some("Joined in the last 90 days".to_string()),
                    any_of: vec![ConditionConfig::WithinDays {
                        field: "joined_at".to_string(),
                        days: 90,
                    }],
                },
            ],
        };

        let mut views = IndexMap::new();
        views.insert("students".to_string(), students);
        views.insert("teachers".to_string(), teachers);
        Self { views }
    }
}
