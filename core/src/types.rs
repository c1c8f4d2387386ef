//! Domain records returned by the resource interfaces.
//!
//! # Design
//! Plain data, populated field by field from response payloads. Fields the
//! service may omit are `Option`s or default to empty/`false`; identifiers
//! are plain `String`s because the service treats them as opaque. Every type
//! derives `Serialize`/`Deserialize` with `#[serde(default)]` so JSON test
//! vectors only need to spell out the fields they care about.

use serde::{Deserialize, Serialize};

/// Presence indicator for `flickr.people.getOnlineList`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnlineStatus {
    Offline,
    Away,
    Online,
}

impl OnlineStatus {
    /// Map the service's numeric code (`0`, `1`, `2`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(OnlineStatus::Offline),
            "1" => Some(OnlineStatus::Away),
            "2" => Some(OnlineStatus::Online),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// The NSID. Always present in responses that describe a user.
    pub id: String,
    pub username: String,
    pub realname: Option<String>,
    pub location: Option<String>,
    pub icon_server: Option<String>,
    pub admin: bool,
    pub pro: bool,
    pub online: Option<OnlineStatus>,
    pub away_message: Option<String>,
    pub photos_first_date: Option<String>,
    pub photos_first_date_taken: Option<String>,
    pub photos_count: Option<u32>,
    pub profile_url: Option<String>,
    pub photos_url: Option<String>,
}

impl User {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub id: Option<String>,
    pub author: Option<String>,
    pub raw: Option<String>,
    pub value: String,
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoData {
    pub latitude: String,
    pub longitude: String,
    pub accuracy: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Photo {
    pub id: String,
    pub owner: Option<User>,
    pub secret: String,
    pub server: String,
    pub farm: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub public_flag: bool,
    pub friend_flag: bool,
    pub family_flag: bool,
    pub favorite: bool,
    pub license: Option<String>,
    pub date_posted: Option<String>,
    pub date_taken: Option<String>,
    pub last_update: Option<String>,
    pub original_format: Option<String>,
    pub icon_server: Option<String>,
    pub rotation: Option<u32>,
    pub views: Option<u32>,
    pub comments: Option<u32>,
    pub tags: Vec<Tag>,
    pub geo: Option<GeoData>,
    pub url: Option<String>,
}

/// Image size suffixes on the static photo host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Square,
    Thumbnail,
    Small,
    Medium,
    Large,
}

impl ImageSize {
    fn suffix(self) -> &'static str {
        match self {
            ImageSize::Square => "_s",
            ImageSize::Thumbnail => "_t",
            ImageSize::Small => "_m",
            ImageSize::Medium => "",
            ImageSize::Large => "_b",
        }
    }
}

impl Photo {
    /// Static image URL for this photo at `size`.
    pub fn image_url(&self, size: ImageSize) -> String {
        format!(
            "https://live.staticflickr.com/{}/{}_{}{}.jpg",
            self.server,
            self.id,
            self.secret,
            size.suffix()
        )
    }
}

/// One page of a photo listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoList {
    pub page: u32,
    pub pages: u32,
    pub per_page: u32,
    pub total: u32,
    pub photos: Vec<Photo>,
}

/// The photos either side of a photo within a pool, set or photostream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoContext {
    pub previous: Option<Photo>,
    pub next: Option<Photo>,
}

/// One available rendition from `flickr.photos.getSizes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Size {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub source: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub members: Option<u32>,
    pub privacy: Option<String>,
    pub admin: bool,
    pub eighteen_plus: bool,
    pub photo_count: Option<u32>,
    pub icon_server: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Photoset {
    pub id: String,
    pub owner: Option<User>,
    pub title: String,
    pub description: Option<String>,
    pub primary_photo_id: Option<String>,
    pub secret: Option<String>,
    pub server: Option<String>,
    pub photo_count: Option<u32>,
}

/// A photoset page from `flickr.photosets.getPhotos`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotosetPhotos {
    pub photoset_id: String,
    pub primary_photo_id: Option<String>,
    pub list: PhotoList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub id: String,
    pub username: String,
    pub realname: Option<String>,
    pub friend: bool,
    pub family: bool,
    pub ignored: bool,
    pub online: Option<OnlineStatus>,
    pub icon_server: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct License {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Blog {
    pub id: String,
    pub name: String,
    pub needs_password: bool,
    pub url: Option<String>,
}

/// Something that happened to an activity item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityEvent {
    pub kind: String,
    pub user: String,
    pub username: String,
    pub date_added: Option<String>,
    pub value: String,
}

/// A photo or photoset with recent activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityItem {
    pub kind: String,
    pub id: String,
    pub owner: String,
    pub title: String,
    pub secret: Option<String>,
    pub server: Option<String>,
    pub comments_old: Option<u32>,
    pub comments_new: Option<u32>,
    pub views: Option<u32>,
    pub events: Vec<ActivityEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn online_status_codes() {
        assert_eq!(OnlineStatus::from_code("0"), Some(OnlineStatus::Offline));
        assert_eq!(OnlineStatus::from_code("1"), Some(OnlineStatus::Away));
        assert_eq!(OnlineStatus::from_code("2"), Some(OnlineStatus::Online));
        assert_eq!(OnlineStatus::from_code(""), None);
    }

    #[test]
    fn image_url_uses_size_suffix() {
        let photo = Photo {
            id: "2636".to_string(),
            secret: "a123456".to_string(),
            server: "2".to_string(),
            ..Photo::default()
        };
        assert_eq!(
            photo.image_url(ImageSize::Small),
            "https://live.staticflickr.com/2/2636_a123456_m.jpg"
        );
        assert_eq!(
            photo.image_url(ImageSize::Medium),
            "https://live.staticflickr.com/2/2636_a123456.jpg"
        );
    }

    #[test]
    fn partial_json_fills_defaults() {
        let user: User = serde_json::from_str(r#"{"id":"123","username":"bob"}"#).unwrap();
        assert_eq!(user, User {
            id: "123".to_string(),
            username: "bob".to_string(),
            ..User::default()
        });
    }
}
