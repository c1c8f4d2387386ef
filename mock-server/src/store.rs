//! In-memory fixtures the mock service answers from.

use std::collections::HashMap;

/// Access level of a frob or token. Ordered so `>=` means "at least".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Perms {
    Read,
    Write,
    Delete,
}

impl Perms {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "read" => Some(Perms::Read),
            "write" => Some(Perms::Write),
            "delete" => Some(Perms::Delete),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Perms::Read => "read",
            Perms::Write => "write",
            Perms::Delete => "delete",
        }
    }
}

#[derive(Clone, Debug)]
pub struct User {
    pub nsid: String,
    pub username: String,
    pub email: String,
    pub realname: String,
    pub location: String,
    pub pro: bool,
}

#[derive(Clone, Debug)]
pub struct Photo {
    pub id: String,
    pub owner: String,
    pub secret: String,
    pub server: String,
    pub title: String,
    pub description: String,
    pub public: bool,
    pub posted: u64,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub privacy: u8,
    /// Photo ids in the order they were added.
    pub pool: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct Token {
    pub user: String,
    pub perms: Perms,
}

#[derive(Debug)]
pub struct Store {
    pub users: Vec<User>,
    pub photos: Vec<Photo>,
    pub groups: Vec<Group>,
    /// Favorite photo ids per user nsid.
    pub favorites: HashMap<String, Vec<String>>,
    /// Outstanding frobs; `Some` once the user has approved them.
    pub frobs: HashMap<String, Option<Perms>>,
    pub tokens: HashMap<String, Token>,
    /// The account that approves frobs on the authorization page.
    pub browser_user: String,
}

pub const LICENSES: &[(&str, &str, &str)] = &[
    ("0", "All Rights Reserved", ""),
    ("1", "Attribution-NonCommercial-ShareAlike License", "http://creativecommons.org/licenses/by-nc-sa/2.0/"),
    ("4", "Attribution License", "http://creativecommons.org/licenses/by/2.0/"),
];

impl Store {
    pub fn user(&self, nsid: &str) -> Option<&User> {
        self.users.iter().find(|u| u.nsid == nsid)
    }

    pub fn photo(&self, id: &str) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == id)
    }

    pub fn photo_mut(&mut self, id: &str) -> Option<&mut Photo> {
        self.photos.iter_mut().find(|p| p.id == id)
    }

    pub fn group_mut(&mut self, id: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }
}

impl Default for Store {
    fn default() -> Self {
        let bees = "12037949754@N01";
        let photo = |id: &str, title: &str, posted: u64, tags: &[&str]| Photo {
            id: id.to_string(),
            owner: bees.to_string(),
            secret: format!("s{id}"),
            server: "1".to_string(),
            title: title.to_string(),
            description: String::new(),
            public: true,
            posted,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        };
        Self {
            users: vec![
                User {
                    nsid: bees.to_string(),
                    username: "bees".to_string(),
                    email: "bees@example.com".to_string(),
                    realname: "Cal Henderson".to_string(),
                    location: "San Francisco".to_string(),
                    pro: true,
                },
                User {
                    nsid: "123@N01".to_string(),
                    username: "bob".to_string(),
                    email: "bob@example.com".to_string(),
                    realname: "Bob Example".to_string(),
                    location: String::new(),
                    pro: false,
                },
            ],
            photos: vec![
                photo("2733", "orford castle", 1100897479, &["castle", "suffolk"]),
                photo("2734", "harbour", 1100897480, &["sea"]),
                photo("2735", "bridge", 1100897481, &[]),
            ],
            groups: vec![
                Group {
                    id: "34427469792@N01".to_string(),
                    name: "FlickrCentral".to_string(),
                    privacy: 3,
                    pool: vec!["2733".to_string(), "2734".to_string()],
                },
                Group {
                    id: "34427465446@N01".to_string(),
                    name: "FlickrIdeas".to_string(),
                    privacy: 3,
                    pool: Vec::new(),
                },
            ],
            favorites: HashMap::new(),
            frobs: HashMap::new(),
            tokens: HashMap::new(),
            browser_user: bees.to_string(),
        }
    }
}
