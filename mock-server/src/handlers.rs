//! Per-method handlers. Each validates against the store first and only then
//! writes its payload, so a fault never leaves a half-written document.

use uuid::Uuid;

use crate::store::{Perms, Photo, Store, Token, User, LICENSES};
use crate::xml::{self, XmlWriter};
use crate::{Call, Fault};

pub fn dispatch(store: &mut Store, call: &Call, token: Option<&Token>, w: &mut XmlWriter) -> Result<(), Fault> {
    match call.method() {
        "flickr.test.echo" => echo(call, w),
        "flickr.test.null" => require(token, Perms::Read).map(|_| ()),
        "flickr.test.login" => login(store, token, w),
        "flickr.auth.getFrob" => get_frob(store, w),
        "flickr.auth.getToken" => get_token(store, call, w),
        "flickr.auth.checkToken" => check_token(store, call, token, w),
        "flickr.people.findByEmail" => find_user(store, w, |u| Some(u.email.as_str()) == call.get("find_email")),
        "flickr.people.findByUsername" => find_user(store, w, |u| Some(u.username.as_str()) == call.get("username")),
        "flickr.people.getInfo" => person_info(store, call, w),
        "flickr.people.getPublicPhotos" => public_photos(store, call, w),
        "flickr.groups.pools.add" => pool_add(store, call, token),
        "flickr.groups.pools.remove" => pool_remove(store, call, token),
        "flickr.groups.pools.getContext" => pool_context(store, call, w),
        "flickr.groups.pools.getGroups" => pool_groups(store, token, w),
        "flickr.groups.pools.getPhotos" => pool_photos(store, call, w),
        "flickr.photos.getInfo" => photo_info(store, call, token, w),
        "flickr.photos.addTags" => add_tags(store, call, token),
        "flickr.favorites.add" => favorite_add(store, call, token),
        "flickr.favorites.remove" => favorite_remove(store, call, token),
        "flickr.favorites.getList" => favorite_list(store, call, token, w),
        "flickr.photos.licenses.getInfo" => licenses(w),
        other => Err(Fault::new(112, format!("Method \"{other}\" not found"))),
    }
}

fn require(token: Option<&Token>, needed: Perms) -> Result<&Token, Fault> {
    match token {
        Some(t) if t.perms >= needed => Ok(t),
        Some(t) => Err(Fault::new(
            99,
            format!(
                "Insufficient permissions. Method requires {} privileges; {} granted.",
                needed.as_str(),
                t.perms.as_str()
            ),
        )),
        None => Err(Fault::new(
            99,
            format!("Insufficient permissions. Method requires {} privileges; none granted.", needed.as_str()),
        )),
    }
}

fn echo(call: &Call, w: &mut XmlWriter) -> Result<(), Fault> {
    for (name, value) in call.params() {
        xml::text(w, name, value)?;
    }
    Ok(())
}

fn login(store: &Store, token: Option<&Token>, w: &mut XmlWriter) -> Result<(), Fault> {
    let token = require(token, Perms::Read)?;
    let user = store.user(&token.user).ok_or_else(|| Fault::new(98, "Invalid auth token"))?;
    w.create_element("user")
        .with_attribute(("id", user.nsid.as_str()))
        .write_inner_content(|w| xml::text(w, "username", &user.username))?;
    Ok(())
}

fn get_frob(store: &mut Store, w: &mut XmlWriter) -> Result<(), Fault> {
    let frob = Uuid::new_v4().simple().to_string();
    store.frobs.insert(frob.clone(), None);
    xml::text(w, "frob", &frob)?;
    Ok(())
}

fn get_token(store: &mut Store, call: &Call, w: &mut XmlWriter) -> Result<(), Fault> {
    let frob = call.get("frob").unwrap_or_default();
    let Some(Some(perms)) = store.frobs.get(frob).copied() else {
        return Err(Fault::new(108, "Invalid frob"));
    };
    store.frobs.remove(frob);

    let token = Token {
        user: store.browser_user.clone(),
        perms,
    };
    let value = Uuid::new_v4().to_string();
    store.tokens.insert(value.clone(), token.clone());
    write_auth(store, &value, &token, w)
}

fn check_token(store: &Store, call: &Call, token: Option<&Token>, w: &mut XmlWriter) -> Result<(), Fault> {
    let token = token.ok_or_else(|| Fault::new(98, "Invalid auth token"))?;
    write_auth(store, call.get("auth_token").unwrap_or_default(), token, w)
}

fn write_auth(store: &Store, value: &str, token: &Token, w: &mut XmlWriter) -> Result<(), Fault> {
    let user = store.user(&token.user).ok_or_else(|| Fault::new(98, "Invalid auth token"))?;
    w.create_element("auth").write_inner_content(|w| {
        xml::text(w, "token", value)?;
        xml::text(w, "perms", token.perms.as_str())?;
        xml::empty(
            w,
            "user",
            &[
                ("nsid", user.nsid.as_str()),
                ("username", user.username.as_str()),
                ("fullname", user.realname.as_str()),
            ],
        )
    })?;
    Ok(())
}

fn find_user(store: &Store, w: &mut XmlWriter, pred: impl Fn(&User) -> bool) -> Result<(), Fault> {
    let user = store
        .users
        .iter()
        .find(|u| pred(*u))
        .ok_or_else(|| Fault::new(1, "User not found"))?;
    w.create_element("user")
        .with_attributes([("id", user.nsid.as_str()), ("nsid", user.nsid.as_str())])
        .write_inner_content(|w| xml::text(w, "username", &user.username))?;
    Ok(())
}

fn person_info(store: &Store, call: &Call, w: &mut XmlWriter) -> Result<(), Fault> {
    let user = call
        .get("user_id")
        .and_then(|id| store.user(id))
        .ok_or_else(|| Fault::new(1, "User not found"))?;
    let owned: Vec<&Photo> = store.photos.iter().filter(|p| p.owner == user.nsid).collect();
    let first = owned.iter().map(|p| p.posted).min().unwrap_or_default().to_string();
    let count = owned.len().to_string();

    w.create_element("person")
        .with_attributes([
            ("nsid", user.nsid.as_str()),
            ("isadmin", "0"),
            ("ispro", xml::flag(user.pro)),
            ("iconserver", "1"),
        ])
        .write_inner_content(|w| {
            xml::text(w, "username", &user.username)?;
            xml::text(w, "realname", &user.realname)?;
            xml::text(w, "location", &user.location)?;
            w.create_element("photos").write_inner_content(|w| {
                xml::text(w, "firstdate", &first)?;
                xml::text(w, "count", &count)
            })?;
            Ok(())
        })?;
    Ok(())
}

fn public_photos(store: &Store, call: &Call, w: &mut XmlWriter) -> Result<(), Fault> {
    let user = call
        .get("user_id")
        .and_then(|id| store.user(id))
        .ok_or_else(|| Fault::new(1, "User not found"))?;
    let photos: Vec<&Photo> = store
        .photos
        .iter()
        .filter(|p| p.owner == user.nsid && p.public)
        .collect();
    write_photo_list(store, call, "photos", &photos, w)
}

fn pool_add(store: &mut Store, call: &Call, token: Option<&Token>) -> Result<(), Fault> {
    require(token, Perms::Write)?;
    let photo_id = call.get("photo_id").unwrap_or_default().to_string();
    if store.photo(&photo_id).is_none() {
        return Err(Fault::new(1, "Photo not found"));
    }
    let group = store
        .group_mut(call.get("group_id").unwrap_or_default())
        .ok_or_else(|| Fault::new(2, "Group not found"))?;
    if group.pool.contains(&photo_id) {
        return Err(Fault::new(3, "Photo already in pool"));
    }
    group.pool.push(photo_id);
    Ok(())
}

fn pool_remove(store: &mut Store, call: &Call, token: Option<&Token>) -> Result<(), Fault> {
    require(token, Perms::Write)?;
    let photo_id = call.get("photo_id").unwrap_or_default();
    let group = store
        .group_mut(call.get("group_id").unwrap_or_default())
        .ok_or_else(|| Fault::new(1, "Group not found"))?;
    let pos = group
        .pool
        .iter()
        .position(|id| id == photo_id)
        .ok_or_else(|| Fault::new(2, "Photo not in pool"))?;
    group.pool.remove(pos);
    Ok(())
}

fn pool_context(store: &Store, call: &Call, w: &mut XmlWriter) -> Result<(), Fault> {
    let group = store
        .group(call.get("group_id").unwrap_or_default())
        .ok_or_else(|| Fault::new(2, "Group not found"))?;
    let photo_id = call.get("photo_id").unwrap_or_default();
    let pos = group
        .pool
        .iter()
        .position(|id| id == photo_id)
        .ok_or_else(|| Fault::new(1, "Photo not in pool"))?;

    let prev = pos.checked_sub(1).and_then(|i| group.pool.get(i)).and_then(|id| store.photo(id));
    let next = group.pool.get(pos + 1).and_then(|id| store.photo(id));
    write_neighbour(w, "prevphoto", prev)?;
    write_neighbour(w, "nextphoto", next)?;
    Ok(())
}

fn write_neighbour(w: &mut XmlWriter, tag: &str, photo: Option<&Photo>) -> std::io::Result<()> {
    match photo {
        Some(p) => {
            let url = format!("/photos/{}/{}/", p.owner, p.id);
            xml::empty(
                w,
                tag,
                &[
                    ("id", p.id.as_str()),
                    ("secret", p.secret.as_str()),
                    ("title", p.title.as_str()),
                    ("url", url.as_str()),
                ],
            )
        }
        None => xml::empty(w, tag, &[("id", "0")]),
    }
}

fn pool_groups(store: &Store, token: Option<&Token>, w: &mut XmlWriter) -> Result<(), Fault> {
    require(token, Perms::Read)?;
    w.create_element("groups").write_inner_content(|w| {
        for group in &store.groups {
            let privacy = group.privacy.to_string();
            let photos = group.pool.len().to_string();
            xml::empty(
                w,
                "group",
                &[
                    ("id", group.id.as_str()),
                    ("name", group.name.as_str()),
                    ("admin", "0"),
                    ("privacy", privacy.as_str()),
                    ("photos", photos.as_str()),
                ],
            )?;
        }
        Ok(())
    })?;
    Ok(())
}

fn pool_photos(store: &Store, call: &Call, w: &mut XmlWriter) -> Result<(), Fault> {
    let group = store
        .group(call.get("group_id").unwrap_or_default())
        .ok_or_else(|| Fault::new(2, "Group not found"))?;
    let tag = call.get("tags");
    let photos: Vec<&Photo> = group
        .pool
        .iter()
        .filter_map(|id| store.photo(id))
        .filter(|p| tag.is_none_or(|t| p.tags.iter().any(|pt| pt == t)))
        .collect();
    write_photo_list(store, call, "photos", &photos, w)
}

fn photo_info(store: &Store, call: &Call, token: Option<&Token>, w: &mut XmlWriter) -> Result<(), Fault> {
    let photo = call
        .get("photo_id")
        .and_then(|id| store.photo(id))
        .ok_or_else(|| Fault::new(1, "Photo not found"))?;
    let owner = store.user(&photo.owner).ok_or_else(|| Fault::new(1, "Photo not found"))?;
    let favorite = token
        .and_then(|t| store.favorites.get(&t.user))
        .is_some_and(|favs| favs.contains(&photo.id));
    let posted = photo.posted.to_string();
    let page = format!("https://www.flickr.com/photos/{}/{}/", owner.username, photo.id);

    w.create_element("photo")
        .with_attributes([
            ("id", photo.id.as_str()),
            ("secret", photo.secret.as_str()),
            ("server", photo.server.as_str()),
            ("isfavorite", xml::flag(favorite)),
            ("license", "0"),
            ("rotation", "0"),
            ("originalformat", "jpg"),
            ("views", "0"),
        ])
        .write_inner_content(|w| {
            xml::empty(
                w,
                "owner",
                &[
                    ("nsid", owner.nsid.as_str()),
                    ("username", owner.username.as_str()),
                    ("realname", owner.realname.as_str()),
                    ("location", owner.location.as_str()),
                ],
            )?;
            xml::text(w, "title", &photo.title)?;
            xml::text(w, "description", &photo.description)?;
            xml::empty(
                w,
                "visibility",
                &[("ispublic", xml::flag(photo.public)), ("isfriend", "0"), ("isfamily", "0")],
            )?;
            xml::empty(w, "dates", &[("posted", posted.as_str()), ("lastupdate", posted.as_str())])?;
            xml::text(w, "comments", "0")?;
            w.create_element("tags").write_inner_content(|w| {
                for (i, tag) in photo.tags.iter().enumerate() {
                    let id = format!("{}-{i}", photo.id);
                    w.create_element("tag")
                        .with_attributes([("id", id.as_str()), ("author", owner.nsid.as_str()), ("raw", tag.as_str())])
                        .write_text_content(quick_xml::events::BytesText::new(tag))?;
                }
                Ok(())
            })?;
            w.create_element("urls").write_inner_content(|w| {
                w.create_element("url")
                    .with_attribute(("type", "photopage"))
                    .write_text_content(quick_xml::events::BytesText::new(&page))?;
                Ok(())
            })?;
            Ok(())
        })?;
    Ok(())
}

fn add_tags(store: &mut Store, call: &Call, token: Option<&Token>) -> Result<(), Fault> {
    require(token, Perms::Write)?;
    let tags = split_tags(call.get("tags").unwrap_or_default());
    let photo = store
        .photo_mut(call.get("photo_id").unwrap_or_default())
        .ok_or_else(|| Fault::new(1, "Photo not found"))?;
    for tag in tags {
        if !photo.tags.contains(&tag) {
            photo.tags.push(tag);
        }
    }
    Ok(())
}

/// Space-separated tags; double quotes group words into one tag.
fn split_tags(raw: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for c in raw.chars() {
        match c {
            '"' => quoted = !quoted,
            ' ' if !quoted => {
                if !current.is_empty() {
                    tags.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tags.push(current);
    }
    tags
}

fn favorite_add(store: &mut Store, call: &Call, token: Option<&Token>) -> Result<(), Fault> {
    let user = require(token, Perms::Write)?.user.clone();
    let photo_id = call.get("photo_id").unwrap_or_default().to_string();
    if store.photo(&photo_id).is_none() {
        return Err(Fault::new(1, "Photo not found"));
    }
    let favorites = store.favorites.entry(user).or_default();
    if favorites.contains(&photo_id) {
        return Err(Fault::new(2, "Photo is already in favorites"));
    }
    favorites.push(photo_id);
    Ok(())
}

fn favorite_remove(store: &mut Store, call: &Call, token: Option<&Token>) -> Result<(), Fault> {
    let user = require(token, Perms::Write)?.user.clone();
    let photo_id = call.get("photo_id").unwrap_or_default();
    let favorites = store.favorites.entry(user).or_default();
    let pos = favorites
        .iter()
        .position(|id| id == photo_id)
        .ok_or_else(|| Fault::new(1, "Photo not in favorites"))?;
    favorites.remove(pos);
    Ok(())
}

fn favorite_list(store: &Store, call: &Call, token: Option<&Token>, w: &mut XmlWriter) -> Result<(), Fault> {
    let user = match call.get("user_id") {
        Some(id) => id.to_string(),
        None => require(token, Perms::Read)?.user.clone(),
    };
    let photos: Vec<&Photo> = store
        .favorites
        .get(&user)
        .map(|ids| ids.iter().filter_map(|id| store.photo(id)).collect())
        .unwrap_or_default();
    write_photo_list(store, call, "photos", &photos, w)
}

fn licenses(w: &mut XmlWriter) -> Result<(), Fault> {
    w.create_element("licenses").write_inner_content(|w| {
        for (id, name, url) in LICENSES {
            xml::empty(w, "license", &[("id", *id), ("name", *name), ("url", *url)])?;
        }
        Ok(())
    })?;
    Ok(())
}

/// One page of `photos` under `tag`, honouring `per_page`, `page` and the
/// `owner_name`, `date_upload`, `tags` and `license` extras.
fn write_photo_list(
    store: &Store,
    call: &Call,
    tag: &str,
    photos: &[&Photo],
    w: &mut XmlWriter,
) -> Result<(), Fault> {
    let per_page = call.positive("per_page").unwrap_or(100);
    let page = call.positive("page").unwrap_or(1);
    let total = photos.len();
    let pages = total.div_ceil(per_page);
    let extras: Vec<&str> = call.get("extras").map(|e| e.split(',').collect()).unwrap_or_default();
    let shown = photos.iter().skip(page.saturating_sub(1).saturating_mul(per_page)).take(per_page);

    let (page_s, pages_s, per_page_s, total_s) =
        (page.to_string(), pages.to_string(), per_page.to_string(), total.to_string());

    w.create_element(tag)
        .with_attributes([
            ("page", page_s.as_str()),
            ("pages", pages_s.as_str()),
            ("perpage", per_page_s.as_str()),
            ("total", total_s.as_str()),
        ])
        .write_inner_content(|w| {
            for photo in shown {
                let owner_name = store.user(&photo.owner).map(|u| u.username.as_str()).unwrap_or_default();
                let posted = photo.posted.to_string();
                let tags = photo.tags.join(" ");
                let mut photo_attrs = vec![
                    ("id", photo.id.as_str()),
                    ("owner", photo.owner.as_str()),
                    ("secret", photo.secret.as_str()),
                    ("server", photo.server.as_str()),
                    ("title", photo.title.as_str()),
                    ("ispublic", xml::flag(photo.public)),
                    ("isfriend", "0"),
                    ("isfamily", "0"),
                ];
                for extra in &extras {
                    match *extra {
                        "owner_name" => photo_attrs.push(("ownername", owner_name)),
                        "date_upload" => photo_attrs.push(("dateupload", posted.as_str())),
                        "tags" => photo_attrs.push(("tags", tags.as_str())),
                        "license" => photo_attrs.push(("license", "0")),
                        _ => {}
                    }
                }
                xml::empty(w, "photo", &photo_attrs)?;
            }
            Ok(())
        })?;
    Ok(())
}
