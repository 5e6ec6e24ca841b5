//! Studio records and the built-in catalogue shown before anything is published.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::warn;

use super::store::{Document, Fields, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Projects,
    Services,
    Leads,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Projects => "projects",
            Collection::Services => "services",
            Collection::Leads => "leads",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub location: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// Fields entered in the portal's "New Entry" form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
    pub name: String,
    pub location: String,
    pub image: String,
}

/// Fields from the public consultation form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLead {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NewProject {
    pub fn validate(&self) -> Result<(), String> {
        require("name", &self.name)?;
        require("location", &self.location)?;
        require("image", &self.image)?;
        if !(self.image.starts_with("https://") || self.image.starts_with("http://")) {
            return Err(format!("image must be an http(s) URL, got {:?}", self.image));
        }
        Ok(())
    }
}

impl NewLead {
    pub fn validate(&self) -> Result<(), String> {
        require("name", &self.name)?;
        require("phone", &self.phone)?;
        require("email", &self.email)?;
        match self.email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(format!("email {:?} is not an address", self.email)),
        }
    }
}

fn require(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(())
    }
}

/// Serialize a record into store fields and append `stamp_field` set to `stamp`.
pub(crate) fn to_fields<T: Serialize>(
    record: &T,
    stamp_field: &str,
    stamp: i64,
) -> Result<Fields, String> {
    match serde_json::to_value(record).map_err(|e| e.to_string())? {
        Value::Object(mut fields) => {
            fields.insert(stamp_field.to_string(), Value::from(stamp));
            Ok(fields)
        }
        other => Err(format!("expected an object, got {other}")),
    }
}

/// Decode one document; the document id overrides any stored `id` field.
pub fn decode<T: DeserializeOwned>(document: &Document) -> Result<T, serde_json::Error> {
    let mut fields = document.fields.clone();
    fields.insert("id".to_string(), Value::String(document.id.clone()));
    serde_json::from_value(Value::Object(fields))
}

/// Decode every well-formed document in a snapshot, skipping the rest.
pub fn decode_snapshot<T: DeserializeOwned>(snapshot: &Snapshot) -> Vec<T> {
    snapshot
        .iter()
        .filter_map(|document| match decode(document) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(id = %document.id, error = %e, "skipping malformed document");
                None
            }
        })
        .collect()
}

fn project(id: &str, name: &str, location: &str, image: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        image: image.to_string(),
        created_at: None,
    }
}

fn service(id: &str, title: &str, description: &str) -> Service {
    Service {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
    }
}

pub fn default_projects() -> Vec<Project> {
    vec![
        project(
            "dp1",
            "The Oak Pavilion",
            "Vancouver, BC",
            "https://images.unsplash.com/photo-1600210492486-724fe5c67fb0?auto=format&fit=crop&q=80&w=1200",
        ),
        project(
            "dp2",
            "Wasabi Minimalist",
            "Kyoto, JP",
            "https://images.unsplash.com/photo-1588854337221-4cf9fa96059c?auto=format&fit=crop&q=80&w=800",
        ),
        project(
            "dp3",
            "Antique Brass Loft",
            "London, UK",
            "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?auto=format&fit=crop&q=80&w=800",
        ),
        project(
            "dp4",
            "Terrace Sanctuary",
            "Mumbai, IN",
            "https://images.unsplash.com/photo-1618221195710-dd6b41faaea6?auto=format&fit=crop&q=80&w=800",
        ),
    ]
}

pub fn default_services() -> Vec<Service> {
    vec![
        service(
            "ds1",
            "Timber Architecture",
            "Specializing in sustainable wood-based interior structural design and custom cabinetry.",
        ),
        service(
            "ds2",
            "Antique Metal Craft",
            "Curated brass, bronze, and copper finishes to add timeless character to modern spaces.",
        ),
        service(
            "ds3",
            "Biophilic Palettes",
            "Nature-inspired color consulting focused on yellow-green hues and earth tones.",
        ),
    ]
}

/// Decode `snapshot`, or use `defaults` when nothing has been published yet.
///
/// A collection that holds only malformed documents yields an empty list,
/// not the defaults.
pub fn decode_or_defaults<T>(snapshot: &Snapshot, defaults: impl FnOnce() -> Vec<T>) -> Vec<T>
where
    T: DeserializeOwned,
{
    if snapshot.is_empty() {
        defaults()
    } else {
        decode_snapshot(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(id: &str, fields: Value) -> Document {
        Document {
            id: id.to_string(),
            fields: fields.as_object().cloned().unwrap(),
        }
    }

    #[test]
    fn test_decode_uses_document_id() {
        let doc = document(
            "abc",
            json!({
                "id": "stale",
                "name": "Cedar House",
                "location": "Oslo, NO",
                "image": "https://example.com/cedar.jpg",
                "createdAt": 1_700_000_000_000_i64
            }),
        );

        let project: Project = decode(&doc).unwrap();
        assert_eq!(project.id, "abc");
        assert_eq!(project.created_at, Some(1_700_000_000_000));
    }

    #[test]
    fn test_malformed_documents_are_skipped() {
        let snapshot = vec![
            document("s1", json!({ "title": "Joinery", "description": "Oak" })),
            document("s2", json!({ "title": 42 })),
        ];

        let services: Vec<Service> = decode_snapshot(&snapshot);
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].title, "Joinery");
    }

    #[test]
    fn test_defaults_only_replace_empty_snapshots() {
        let services: Vec<Service> = decode_or_defaults(&Vec::new(), default_services);
        assert_eq!(services.len(), 3);
        assert_eq!(default_projects()[0].name, "The Oak Pavilion");

        let published = vec![document(
            "s9",
            json!({ "title": "Joinery", "description": "Hand-cut oak joints." }),
        )];
        let services: Vec<Service> = decode_or_defaults(&published, default_services);
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].title, "Joinery");
    }

    #[test]
    fn test_malformed_documents_do_not_bring_back_defaults() {
        let snapshot = vec![document("p9", json!({ "name": "Cedar Retreat" }))];
        let projects: Vec<Project> = decode_or_defaults(&snapshot, default_projects);
        assert!(projects.is_empty());
    }

    #[test]
    fn test_to_fields_adds_stamp() {
        let lead = NewLead {
            name: "Asha".to_string(),
            phone: "+91 98765 43210".to_string(),
            email: "asha@example.com".to_string(),
            message: None,
        };

        let fields = to_fields(&lead, "timestamp", 42).unwrap();
        assert_eq!(fields["timestamp"], 42);
        assert_eq!(fields["email"], "asha@example.com");
        assert!(!fields.contains_key("message"));
    }

    #[test]
    fn test_validation() {
        let mut project = NewProject {
            name: "Loft".to_string(),
            location: "London, UK".to_string(),
            image: "https://example.com/loft.jpg".to_string(),
        };
        assert!(project.validate().is_ok());

        project.image = "loft.jpg".to_string();
        assert!(project.validate().is_err());

        let lead = NewLead {
            name: "Asha".to_string(),
            phone: "123".to_string(),
            email: "not-an-email".to_string(),
            message: None,
        };
        assert!(lead.validate().is_err());
    }
}
