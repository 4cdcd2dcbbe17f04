use crate::model::version::trim_patch_version;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::io::Read;

/// Closed vocabulary of taxonomy and badge tags an item may carry.
///
/// Unrecognized tags deserialize to [`Tag::Unknown`] so a newer catalog does
/// not fail to load on an older engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tag {
    Popup,
    EasterEgg,
    Theme,
    Community,
    Editor,
    CodeEditor,
    CostumeEditor,
    ProjectPlayer,
    Profiles,
    ProjectPage,
    Forums,
    Recommended,
    Featured,
    Beta,
    Danger,
    #[serde(other)]
    Unknown,
}

/// A credited contributor on an item's settings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub name: String,
}

/// Per-item record of the most recent release that touched it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    pub version: String,
}

/// Release-level metadata for the catalog's current version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseUpdate {
    #[serde(default)]
    pub is_major: bool,
    #[serde(default)]
    pub new_settings: Vec<String>,
}

/// One entry in the static catalog. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub enabled_by_default: bool,
    #[serde(default)]
    pub settings: bool,
    #[serde(default)]
    pub presets: bool,
    #[serde(default)]
    pub preview: bool,
    #[serde(default)]
    pub info: bool,
    /// Easter-egg override: the item keeps its regular category but is also
    /// revealed by the Konami code, so the easter-egg question stays open.
    #[serde(default)]
    pub secret: bool,
    #[serde(default)]
    pub credits: Vec<Credit>,
    #[serde(default)]
    pub version_added: Option<String>,
    #[serde(default)]
    pub latest_update: Option<ItemUpdate>,
}

impl Item {
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Parse(serde_json::Error),
    Io(std::io::Error),
    Empty,
    MissingId { position: usize },
    MissingName { id: String },
    DuplicateId { id: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Parse(source) => write!(f, "failed to parse catalog: {source}"),
            CatalogError::Io(source) => write!(f, "failed to read catalog: {source}"),
            CatalogError::Empty => write!(f, "catalog contains no items"),
            CatalogError::MissingId { position } => {
                write!(f, "catalog item at position {position} has an empty id")
            }
            CatalogError::MissingName { id } => {
                write!(f, "catalog item {id:?} has an empty name")
            }
            CatalogError::DuplicateId { id } => {
                write!(f, "catalog item id {id:?} appears more than once")
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Parse(source) => Some(source),
            CatalogError::Io(source) => Some(source),
            _ => None,
        }
    }
}

/// The static item catalog plus the release metadata the compiler needs for
/// version-gated questions. Fields are private so every constructed catalog
/// has passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawCatalog")]
pub struct Catalog {
    version: String,
    #[serde(default)]
    latest_update: Option<ReleaseUpdate>,
    items: Vec<Item>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalog {
    version: String,
    #[serde(default)]
    latest_update: Option<ReleaseUpdate>,
    items: Vec<Item>,
}

impl TryFrom<RawCatalog> for Catalog {
    type Error = CatalogError;

    fn try_from(raw: RawCatalog) -> Result<Self, CatalogError> {
        Catalog::new(raw.version, raw.latest_update, raw.items)
    }
}

impl Catalog {
    pub fn new(
        version: String,
        latest_update: Option<ReleaseUpdate>,
        items: Vec<Item>,
    ) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for (position, item) in items.iter().enumerate() {
            if item.id.is_empty() {
                return Err(CatalogError::MissingId { position });
            }
            if item.name.is_empty() {
                return Err(CatalogError::MissingName {
                    id: item.id.clone(),
                });
            }
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: item.id.clone(),
                });
            }
        }

        Ok(Self {
            version,
            latest_update,
            items,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(raw).map_err(CatalogError::Parse)
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self, CatalogError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw).map_err(CatalogError::Io)?;
        Self::from_json_str(&raw)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The catalog's `major.minor` release, when the version string is sane.
    pub fn trimmed_version(&self) -> Option<&str> {
        trim_patch_version(&self.version)
    }

    pub fn latest_update(&self) -> Option<&ReleaseUpdate> {
        self.latest_update.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, CatalogError, Item, Tag};

    fn item(id: &str, name: &str) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            tags: Vec::new(),
            enabled_by_default: false,
            settings: false,
            presets: false,
            preview: false,
            info: false,
            secret: false,
            credits: Vec::new(),
            version_added: None,
            latest_update: None,
        }
    }

    #[test]
    fn accepts_a_valid_catalog() {
        let catalog = Catalog::new(
            "1.29.0".to_string(),
            None,
            vec![item("clones", "Clone counter"), item("onion", "Onion skinning")],
        )
        .expect("catalog is valid");
        assert_eq!(catalog.items().len(), 2);
        assert_eq!(catalog.trimmed_version(), Some("1.29"));
    }

    #[test]
    fn rejects_missing_id_and_name() {
        let err = Catalog::new("1.0.0".to_string(), None, vec![item("", "Nameless")])
            .expect_err("empty id must fail");
        assert!(matches!(err, CatalogError::MissingId { position: 0 }));

        let err = Catalog::new("1.0.0".to_string(), None, vec![item("x", "")])
            .expect_err("empty name must fail");
        assert!(matches!(err, CatalogError::MissingName { .. }));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(
            "1.0.0".to_string(),
            None,
            vec![item("dup", "First"), item("dup", "Second")],
        )
        .expect_err("duplicate id must fail");
        assert!(matches!(err, CatalogError::DuplicateId { .. }));
    }

    #[test]
    fn loads_from_json_with_unknown_tags() {
        let catalog = Catalog::from_json_str(
            r#"{
                "version": "1.29.2",
                "latestUpdate": { "isMajor": true },
                "items": [
                    { "id": "paint", "name": "Paint tools", "tags": ["editor", "someFutureTag"] }
                ]
            }"#,
        )
        .expect("json catalog loads");
        let tags = &catalog.items()[0].tags;
        assert_eq!(tags[0], Tag::Editor);
        assert_eq!(tags[1], Tag::Unknown);
        assert!(catalog.latest_update().expect("release metadata").is_major);
    }

    #[test]
    fn json_validation_fails_fast() {
        let err = Catalog::from_json_str(r#"{ "version": "1.0.0", "items": [] }"#)
            .expect_err("empty catalog must fail");
        let rendered = err.to_string();
        assert!(rendered.contains("no items"), "unexpected error: {rendered}");
    }
}
