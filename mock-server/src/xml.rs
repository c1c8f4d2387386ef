//! `rsp` envelope and element writers.

use std::io::{self, Write};

use quick_xml::events::BytesText;
use quick_xml::Writer;

pub type XmlWriter = Writer<Vec<u8>>;

pub fn writer() -> XmlWriter {
    Writer::new(Vec::with_capacity(256))
}

/// `<rsp stat="ok">` around an already-written payload.
pub fn ok(payload: &[u8]) -> io::Result<Vec<u8>> {
    let mut writer = writer();
    writer
        .create_element("rsp")
        .with_attribute(("stat", "ok"))
        .write_inner_content(|w| w.get_mut().write_all(payload))?;
    Ok(writer.into_inner())
}

/// `<rsp stat="fail"><err code=".." msg=".."/></rsp>`
pub fn fail(code: u32, message: &str) -> io::Result<Vec<u8>> {
    let code = code.to_string();
    let mut writer = writer();
    writer
        .create_element("rsp")
        .with_attribute(("stat", "fail"))
        .write_inner_content(|w| empty(w, "err", &[("code", code.as_str()), ("msg", message)]))?;
    Ok(writer.into_inner())
}

/// `<tag>text</tag>`
pub fn text(w: &mut XmlWriter, tag: &str, text: &str) -> io::Result<()> {
    w.create_element(tag).write_text_content(BytesText::new(text))?;
    Ok(())
}

/// `<tag a=".." b=".."/>`
pub fn empty(w: &mut XmlWriter, tag: &str, attrs: &[(&str, &str)]) -> io::Result<()> {
    w.create_element(tag).with_attributes(attrs.iter().copied()).write_empty()?;
    Ok(())
}

pub fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}
