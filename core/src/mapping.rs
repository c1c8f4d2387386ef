//! Payload-to-domain mapping shared by the resource interfaces.
//!
//! Attributes are read by name, element-valued fields from the first child
//! with that tag, and repeated elements in document order. Nothing here
//! fails: a missing required attribute maps to an empty string, a missing
//! optional one to `None`, and a `"0"`/`"1"` flag to `false` unless it is
//! exactly `"1"`.

use crate::context::{Auth, Permission};
use crate::types::{
    ActivityEvent, ActivityItem, Blog, Contact, GeoData, Group, License, OnlineStatus, Photo, PhotoContext,
    PhotoList, Photoset, PhotosetPhotos, Size, Tag, User,
};
use crate::xml::Element;

/// Map every descendant `tag` of `parent`, in document order.
pub fn list<T>(parent: &Element, tag: &str, map: impl Fn(&Element) -> T) -> Vec<T> {
    parent.descendants(tag).into_iter().map(map).collect()
}

/// Users are identified by `nsid` in most payloads and `id` in a few.
fn user_id(e: &Element) -> String {
    e.attr("nsid").or_else(|| e.attr("id")).unwrap_or_default().to_string()
}

/// Attribute first, then the first child element of the same name.
fn attr_or_child(e: &Element, name: &str) -> Option<String> {
    e.attr_string(name).or_else(|| e.child_text(name).filter(|t| !t.is_empty()))
}

/// `<user nsid=".."><username>..</username></user>`
pub fn user_ref(e: &Element) -> User {
    User {
        id: user_id(e),
        username: e
            .child_text("username")
            .or_else(|| e.attr_string("username"))
            .unwrap_or_default(),
        ..User::default()
    }
}

/// `flickr.people.getInfo`
pub fn user_info(e: &Element) -> User {
    let photos = e.child("photos");
    User {
        id: user_id(e),
        username: e.child_text("username").unwrap_or_default(),
        realname: e.child_text("realname"),
        location: e.child_text("location"),
        icon_server: e.attr_string("iconserver"),
        admin: e.flag("isadmin"),
        pro: e.flag("ispro"),
        photos_first_date: photos.and_then(|p| p.child_text("firstdate")),
        photos_first_date_taken: photos.and_then(|p| p.child_text("firstdatetaken")),
        photos_count: photos
            .and_then(|p| p.child_text("count"))
            .and_then(|c| c.trim().parse().ok()),
        profile_url: e.child_text("profileurl"),
        photos_url: e.child_text("photosurl"),
        ..User::default()
    }
}

/// An entry of `flickr.people.getOnlineList`. Away users carry their away
/// message as the element's text.
pub fn online_user(e: &Element) -> User {
    let online = e.attr("online").and_then(OnlineStatus::from_code);
    let away_message = match online {
        Some(OnlineStatus::Away) => Some(e.text()).filter(|t| !t.is_empty()),
        _ => None,
    };
    User {
        id: user_id(e),
        username: e.attr_or_empty("username"),
        online,
        away_message,
        ..User::default()
    }
}

/// A photo as it appears in list payloads, including any requested extras.
pub fn list_photo(e: &Element) -> Photo {
    let owner = e.attr_string("owner").map(|id| User {
        username: e.attr_or_empty("ownername"),
        ..User::with_id(id)
    });
    let geo = e.attr_string("latitude").map(|latitude| GeoData {
        latitude,
        longitude: e.attr_or_empty("longitude"),
        accuracy: e.attr_parse("accuracy"),
    });
    let mut tags = split_tags(e.attr("tags"));
    tags.extend(split_tags(e.attr("machine_tags")));

    Photo {
        id: e.attr_or_empty("id"),
        owner,
        secret: e.attr_or_empty("secret"),
        server: e.attr_or_empty("server"),
        farm: e.attr_string("farm"),
        title: e.attr("title").or_else(|| e.attr("name")).unwrap_or_default().to_string(),
        public_flag: e.flag("ispublic"),
        friend_flag: e.flag("isfriend"),
        family_flag: e.flag("isfamily"),
        license: e.attr_string("license"),
        date_posted: e.attr_string("dateupload"),
        date_taken: e.attr_string("datetaken"),
        last_update: e.attr_string("lastupdate"),
        original_format: e.attr_string("originalformat"),
        icon_server: e.attr_string("iconserver"),
        tags,
        geo,
        ..Photo::default()
    }
}

fn split_tags(raw: Option<&str>) -> Vec<Tag> {
    raw.unwrap_or_default()
        .split_whitespace()
        .map(|t| Tag {
            value: t.to_string(),
            ..Tag::default()
        })
        .collect()
}

/// `<photos page=".." pages=".." perpage=".." total="..">` with `photo` children.
pub fn photo_list(e: &Element) -> PhotoList {
    PhotoList {
        page: e.attr_parse("page").unwrap_or_default(),
        pages: e.attr_parse("pages").unwrap_or_default(),
        per_page: e
            .attr_parse("perpage")
            .or_else(|| e.attr_parse("per_page"))
            .unwrap_or_default(),
        total: e.attr_parse("total").unwrap_or_default(),
        photos: list(e, "photo", list_photo),
    }
}

/// `flickr.photos.getInfo`
pub fn photo_info(e: &Element) -> Photo {
    let owner = e.child("owner").map(|o| User {
        id: user_id(o),
        username: o.attr_or_empty("username"),
        realname: o.attr_string("realname"),
        location: o.attr_string("location"),
        ..User::default()
    });
    let visibility = e.child("visibility");
    let dates = e.child("dates");
    let tags = e
        .child("tags")
        .map(|t| t.children_named("tag").map(tag).collect())
        .unwrap_or_default();
    let geo = e.child("location").map(|l| GeoData {
        latitude: l.attr_or_empty("latitude"),
        longitude: l.attr_or_empty("longitude"),
        accuracy: l.attr_parse("accuracy"),
    });
    let url = e
        .child("urls")
        .and_then(|u| u.children_named("url").find(|u| u.attr("type") == Some("photopage")))
        .map(Element::text);

    Photo {
        id: e.attr_or_empty("id"),
        owner,
        secret: e.attr_or_empty("secret"),
        server: e.attr_or_empty("server"),
        farm: e.attr_string("farm"),
        title: e.child_text("title").unwrap_or_default(),
        description: e.child_text("description").filter(|d| !d.is_empty()),
        public_flag: visibility.is_some_and(|v| v.flag("ispublic")),
        friend_flag: visibility.is_some_and(|v| v.flag("isfriend")),
        family_flag: visibility.is_some_and(|v| v.flag("isfamily")),
        favorite: e.flag("isfavorite"),
        license: e.attr_string("license"),
        date_posted: dates.and_then(|d| d.attr_string("posted")),
        date_taken: dates.and_then(|d| d.attr_string("taken")),
        last_update: dates.and_then(|d| d.attr_string("lastupdate")),
        original_format: e.attr_string("originalformat"),
        rotation: e.attr_parse("rotation"),
        views: e.attr_parse("views"),
        comments: e.child_text("comments").and_then(|c| c.trim().parse().ok()),
        tags,
        geo,
        url,
        ..Photo::default()
    }
}

/// `<tag id=".." author=".." raw="..">value</tag>`
pub fn tag(e: &Element) -> Tag {
    Tag {
        id: e.attr_string("id"),
        author: e.attr_string("author"),
        raw: e.attr_string("raw"),
        value: e.text(),
        count: e.attr_parse("count"),
    }
}

/// `<prevphoto/>` and `<nextphoto/>` siblings. An id of `0` marks the end of
/// the sequence.
pub fn photo_context(payload: &[Element]) -> PhotoContext {
    let neighbour = |name: &str| {
        payload
            .iter()
            .find(|e| e.name() == name)
            .filter(|e| !matches!(e.attr("id"), None | Some("") | Some("0")))
            .map(|e| Photo {
                id: e.attr_or_empty("id"),
                secret: e.attr_or_empty("secret"),
                server: e.attr_or_empty("server"),
                farm: e.attr_string("farm"),
                title: e.attr_or_empty("title"),
                url: e.attr_string("url"),
                ..Photo::default()
            })
    };
    PhotoContext {
        previous: neighbour("prevphoto"),
        next: neighbour("nextphoto"),
    }
}

pub fn size(e: &Element) -> Size {
    Size {
        label: e.attr_or_empty("label"),
        width: e.attr_parse("width").unwrap_or_default(),
        height: e.attr_parse("height").unwrap_or_default(),
        source: e.attr_or_empty("source"),
        url: e.attr_or_empty("url"),
    }
}

/// Groups come in attribute form (`pools.getGroups`, `groups.search`) and
/// element form (`groups.getInfo`); both are accepted.
pub fn group(e: &Element) -> Group {
    Group {
        id: user_id(e),
        name: attr_or_child(e, "name").unwrap_or_default(),
        description: e.child_text("description").filter(|d| !d.is_empty()),
        members: attr_or_child(e, "members").and_then(|m| m.trim().parse().ok()),
        privacy: attr_or_child(e, "privacy"),
        admin: e.flag("admin"),
        eighteen_plus: e.flag("eighteenplus"),
        photo_count: e.attr_parse("photos"),
        icon_server: e.attr_string("iconserver"),
    }
}

/// `<group id=".."><groupname>..</groupname></group>` from `flickr.urls.lookupGroup`.
pub fn group_ref(e: &Element) -> Group {
    Group {
        id: user_id(e),
        name: e.child_text("groupname").unwrap_or_default(),
        ..Group::default()
    }
}

pub fn photoset(e: &Element) -> Photoset {
    Photoset {
        id: e.attr_or_empty("id"),
        owner: e.attr_string("owner").map(User::with_id),
        title: e.child_text("title").unwrap_or_default(),
        description: e.child_text("description").filter(|d| !d.is_empty()),
        primary_photo_id: e.attr_string("primary"),
        secret: e.attr_string("secret"),
        server: e.attr_string("server"),
        photo_count: e.attr_parse("photos"),
    }
}

/// `flickr.photosets.getPhotos`: a paged `photoset` element of `photo`s.
pub fn photoset_photos(e: &Element) -> PhotosetPhotos {
    PhotosetPhotos {
        photoset_id: e.attr_or_empty("id"),
        primary_photo_id: e.attr_string("primary"),
        list: photo_list(e),
    }
}

pub fn contact(e: &Element) -> Contact {
    Contact {
        id: user_id(e),
        username: e.attr_or_empty("username"),
        realname: e.attr_string("realname"),
        friend: e.flag("friend"),
        family: e.flag("family"),
        ignored: e.flag("ignored"),
        online: e.attr("online").and_then(OnlineStatus::from_code),
        icon_server: e.attr_string("iconserver"),
    }
}

pub fn license(e: &Element) -> License {
    License {
        id: e.attr_or_empty("id"),
        name: e.attr_or_empty("name"),
        url: e.attr_string("url"),
    }
}

pub fn blog(e: &Element) -> Blog {
    Blog {
        id: e.attr_or_empty("id"),
        name: e.attr_or_empty("name"),
        needs_password: e.flag("needspassword"),
        url: e.attr_string("url"),
    }
}

pub fn activity_item(e: &Element) -> ActivityItem {
    let events = e
        .child("activity")
        .map(|a| {
            a.children_named("event")
                .map(|ev| ActivityEvent {
                    kind: ev.attr_or_empty("type"),
                    user: ev.attr_or_empty("user"),
                    username: ev.attr_or_empty("username"),
                    date_added: ev.attr_string("dateadded"),
                    value: ev.text(),
                })
                .collect()
        })
        .unwrap_or_default();
    ActivityItem {
        kind: e.attr_or_empty("type"),
        id: e.attr_or_empty("id"),
        owner: e.attr_or_empty("owner"),
        title: e.child_text("title").unwrap_or_default(),
        secret: e.attr_string("secret"),
        server: e.attr_string("server"),
        comments_old: e.attr_parse("commentsold"),
        comments_new: e.attr_parse("commentsnew"),
        views: e.attr_parse("views"),
        events,
    }
}

/// `<auth><token/><perms/><user/></auth>`. Unknown permission strings map
/// to [`Permission::None`].
pub fn auth(e: &Element) -> Auth {
    let permission = e
        .child_text("perms")
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(Permission::None);
    let user = e.child("user").map(|u| User {
        id: user_id(u),
        username: u.attr_or_empty("username"),
        realname: u.attr_string("fullname"),
        ..User::default()
    });
    Auth {
        token: e.child_text("token").unwrap_or_default(),
        permission,
        user,
    }
}
