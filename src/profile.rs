use serde::{Deserialize, Serialize};

/// Dashboard owner profile, loaded from profile.json.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub image: ProfileImage,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProfileImage {
    pub src: String,
    pub alt: String,
}
