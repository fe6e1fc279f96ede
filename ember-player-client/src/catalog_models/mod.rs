use serde::{Deserialize, Serialize};

pub mod playlist;
pub mod recommendations;
pub mod search_results;
pub mod track;

/// Identifiers arrive as strings from most endpoints and as numbers from a few.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    /// The id as a string, or `None` when it is blank.
    pub fn usable(&self) -> Option<String> {
        match self {
            RawId::Text(text) if text.trim().is_empty() => None,
            RawId::Text(text) => Some(text.clone()),
            RawId::Number(number) => Some(number.to_string()),
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sources {
    pub sources: Option<Vec<ImageSource>>,
}

impl Sources {
    pub fn first_url(&self) -> Option<String> {
        first_url(self.sources.as_deref())
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileItem {
    pub profile: Option<Profile>,
}

impl ProfileItem {
    pub fn name(&self) -> Option<&str> {
        self.profile.as_ref().and_then(|p| p.name.as_deref())
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileItems {
    pub items: Option<Vec<ProfileItem>>,
}

pub fn first_url(images: Option<&[ImageSource]>) -> Option<String> {
    images
        .and_then(|images| images.first())
        .and_then(|image| image.url.clone())
}
