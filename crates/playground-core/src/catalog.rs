//! Catalog tree types and the aggregation pass that builds them.
//!
//! The store hands over one [`CatalogRecord`] per example that survived the
//! join; [`assemble`] groups them into SDK -> category -> objects.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{ExampleEntity, PrecompiledObjectType, Sdk, SdkEntity, SnippetEntity};

/// One catalog object: an example as shown in the picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Example name.
    pub name: String,
    /// `{SDK}/{ObjectType}/{Name}`.
    pub cloud_path: String,
    /// Example description.
    pub description: String,
    /// Catalog object type.
    #[serde(rename = "type")]
    pub object_type: PrecompiledObjectType,
    /// All categories the example belongs to.
    pub categories: Vec<String>,
    /// Pipeline options from the example's snippet.
    pub pipeline_options: String,
    /// Link to the example source.
    pub link: String,
    /// Whether the example's snippet has more than one file.
    pub multifile: bool,
    /// Context line of the main file.
    pub context_line: i32,
    /// Whether this is the SDK's default example.
    pub default_example: bool,
}

impl ObjectInfo {
    /// Build the catalog object for a joined record.
    #[must_use]
    pub fn from_record(record: &CatalogRecord, default_example: bool) -> Self {
        let example = &record.example;
        let mut categories: Vec<String> = Vec::with_capacity(example.categories.len());
        for category in &example.categories {
            if !categories.contains(category) {
                categories.push(category.clone());
            }
        }
        Self {
            name: example.name.clone(),
            cloud_path: example.cloud_path(),
            description: example.description.clone(),
            object_type: example.object_type,
            categories,
            pipeline_options: record.snippet.pipeline_options.clone(),
            link: example.content_path.clone(),
            multifile: record.snippet.number_of_files > 1,
            context_line: record.context_line,
            default_example,
        }
    }
}

/// A named group of catalog objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    /// Category name.
    pub category_name: String,
    /// Objects in the category.
    pub precompiled_objects: Vec<ObjectInfo>,
}

/// The catalog for one SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkCatalogEntry {
    /// The SDK.
    pub sdk: Sdk,
    /// Categories sorted by name.
    pub categories: Vec<CategoryEntry>,
}

/// An example joined with its snippet, ready for aggregation.
#[derive(Debug, Clone)]
pub struct CatalogRecord {
    /// The example record.
    pub example: ExampleEntity,
    /// The snippet holding the example's code.
    pub snippet: SnippetEntity,
    /// Context line of the snippet's main file.
    pub context_line: i32,
}

/// Group joined records into the catalog tree.
///
/// SDK entries follow SDK order and categories are sorted by name. Objects keep
/// the order of `records`. An example listed under several categories appears
/// once in each. SDKs without objects are left out.
#[must_use]
pub fn assemble(records: &[CatalogRecord], sdk_catalog: &[SdkEntity]) -> Vec<SdkCatalogEntry> {
    let defaults: HashMap<Sdk, &str> = sdk_catalog
        .iter()
        .map(|sdk| (sdk.name, sdk.default_example.as_str()))
        .collect();

    let mut tree: BTreeMap<Sdk, BTreeMap<String, Vec<ObjectInfo>>> = BTreeMap::new();
    for record in records {
        let sdk = record.example.sdk;
        let is_default = defaults
            .get(&sdk)
            .is_some_and(|name| *name == record.example.name);
        let info = ObjectInfo::from_record(record, is_default);

        let categories = tree.entry(sdk).or_default();
        for category in &info.categories {
            categories
                .entry(category.clone())
                .or_default()
                .push(info.clone());
        }
    }

    tree.into_iter()
        .map(|(sdk, categories)| SdkCatalogEntry {
            sdk,
            categories: categories
                .into_iter()
                .map(|(name, objects)| CategoryEntry {
                    category_name: name,
                    precompiled_objects: objects,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Complexity, Origin};
    use chrono::Utc;

    fn record(sdk: Sdk, name: &str, categories: &[&str], files: usize) -> CatalogRecord {
        let now = Utc::now();
        CatalogRecord {
            example: ExampleEntity {
                name: name.into(),
                sdk,
                description: "MOCK_DESCR".into(),
                categories: categories.iter().map(ToString::to_string).collect(),
                complexity: Complexity::Basic,
                content_path: "MOCK_PATH".into(),
                object_type: PrecompiledObjectType::Example,
                origin: Origin::PgExamples,
                schema_version: "MOCK_VERSION".into(),
            },
            snippet: SnippetEntity {
                sdk,
                pipeline_options: "MOCK_OPTIONS".into(),
                created: now,
                last_visited: now,
                origin: Origin::PgExamples,
                visit_count: 0,
                number_of_files: files,
                schema_version: None,
                owner_id: None,
            },
            context_line: 32,
        }
    }

    #[test]
    fn single_example_shape() {
        let catalog = assemble(
            &[record(Sdk::Java, "MOCK_EXAMPLE", &["X"], 1)],
            &[SdkEntity::new(Sdk::Java, "OTHER")],
        );

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].sdk, Sdk::Java);
        assert_eq!(catalog[0].categories.len(), 1);
        let category = &catalog[0].categories[0];
        assert_eq!(category.category_name, "X");
        assert_eq!(category.precompiled_objects.len(), 1);

        let object = &category.precompiled_objects[0];
        assert_eq!(
            object.cloud_path,
            "SDK_JAVA/PRECOMPILED_OBJECT_TYPE_EXAMPLE/MOCK_EXAMPLE"
        );
        assert!(!object.multifile);
        assert!(!object.default_example);
        assert_eq!(object.context_line, 32);
        assert_eq!(object.link, "MOCK_PATH");
        assert_eq!(object.pipeline_options, "MOCK_OPTIONS");
    }

    #[test]
    fn example_in_two_categories_appears_twice() {
        let catalog = assemble(&[record(Sdk::Go, "Both", &["B", "A", "B"], 3)], &[]);
        let categories = &catalog[0].categories;
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].category_name, "A");
        assert_eq!(categories[1].category_name, "B");
        assert_eq!(categories[1].precompiled_objects.len(), 1);
        assert!(categories[0].precompiled_objects[0].multifile);
    }

    #[test]
    fn record_order_is_kept_and_sdks_are_ordered() {
        let records = [
            record(Sdk::Python, "Zeta", &["Core"], 1),
            record(Sdk::Java, "Beta", &["Core"], 1),
            record(Sdk::Java, "Alpha", &["Core"], 1),
        ];
        let catalog = assemble(&records, &[SdkEntity::new(Sdk::Java, "Alpha")]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].sdk, Sdk::Java);
        assert_eq!(catalog[1].sdk, Sdk::Python);
        let names: Vec<&str> = catalog[0].categories[0]
            .precompiled_objects
            .iter()
            .map(|object| object.name.as_str())
            .collect();
        assert_eq!(names, ["Beta", "Alpha"]);
        assert!(catalog[0].categories[0].precompiled_objects[1].default_example);
    }

    #[test]
    fn object_type_serializes_as_type() {
        let info = ObjectInfo::from_record(&record(Sdk::Java, "E", &["X"], 1), true);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["type"], "PRECOMPILED_OBJECT_TYPE_EXAMPLE");
        assert_eq!(json["default_example"], true);
    }

    #[test]
    fn repeated_categories_are_listed_once() {
        let info = ObjectInfo::from_record(&record(Sdk::Go, "E", &["B", "A", "B"], 1), false);
        assert_eq!(info.categories, vec!["B".to_string(), "A".to_string()]);
    }
}
