use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch.
pub type Millis = i64;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    pub created_at: Millis,
    pub updated_at: Millis,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NewNote {
    pub title: String,
    pub body: String,
    pub image_uri: Option<String>,
}

/// Fields to overwrite on update; `None` keeps the stored value.
///
/// `image_uri: Some(None)` removes the image.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub image_uri: Option<Option<String>>,
}

impl NotePatch {
    pub(crate) fn apply_to(self, note: &mut Note) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(body) = self.body {
            note.body = body;
        }
        if let Some(image_uri) = self.image_uri {
            note.image_uri = image_uri;
        }
    }
}
