use crate::errors::transport_error::TransportError;
use crate::models::record::{Record, Value};
use quick_xml::encoding::Decoder;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fmt::Display;

struct Element {
    name: String,
    attributes: Record,
    children: Record,
    text: String,
}

impl Element {
    /// Attributes come first. A child element with an attribute's name replaces the attribute.
    fn into_field(self) -> (String, Value) {
        let text = self.text.trim();
        let mut fields = self.attributes;

        let value = if !self.children.is_empty() {
            for (name, value) in self.children {
                fields.insert(name, value);
            }

            Value::Record(fields)
        } else if fields.is_empty() {
            Value::Text(text.to_string())
        } else {
            if !text.is_empty() {
                fields.insert("content", text);
            }

            Value::Record(fields)
        };

        (self.name, value)
    }
}

/// Converts a response document into a [Record] keyed by its top-level element name. An empty body gives an
/// empty [Record], anything else without a root element is malformed.
pub(crate) fn parse(xml: &str) -> Result<Record, TransportError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().expand_empty_elements = true;

    let mut document = Record::new();
    let mut open: Vec<Element> = Vec::new();

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(start) => {
                let decoder = reader.decoder();
                let name = decode(decoder, start.name().as_ref())?;

                let mut attributes = Record::new();
                for attribute in start.attributes() {
                    let attribute = attribute.map_err(malformed)?;
                    let key = decode(decoder, attribute.key.as_ref())?;
                    let value = attribute
                        .decode_and_unescape_value(decoder)
                        .map_err(malformed)?;

                    attributes.insert(key, value.into_owned());
                }

                open.push(Element {
                    name,
                    attributes,
                    children: Record::new(),
                    text: String::new(),
                });
            }

            Event::End(_) => {
                let element = open
                    .pop()
                    .ok_or_else(|| malformed("closing tag without an opening one"))?;

                let (name, value) = element.into_field();
                match open.last_mut() {
                    Some(parent) => parent.children.push_child(name, value),
                    None => document.push_child(name, value),
                }
            }

            Event::Text(text) => {
                let text = decode(reader.decoder(), &text)?;
                match open.last_mut() {
                    Some(element) => element.text.push_str(&text),
                    None if text.trim().is_empty() => (),
                    None => return Err(malformed("text outside the root element")),
                }
            }

            Event::CData(cdata) => {
                let text = decode(reader.decoder(), &cdata)?;
                open.last_mut()
                    .ok_or_else(|| malformed("CDATA outside the root element"))?
                    .text
                    .push_str(&text);
            }

            Event::GeneralRef(reference) => {
                let name = decode(reader.decoder(), &reference)?;
                open.last_mut()
                    .ok_or_else(|| malformed("reference outside the root element"))?
                    .text
                    .push_str(&resolve_reference(&name)?);
            }

            Event::Eof => break,
            _ => (),
        }
    }

    if let Some(element) = open.last() {
        return Err(malformed(format!("<{}> is never closed", element.name)));
    }

    if document.is_empty() && !xml.trim().is_empty() {
        return Err(malformed("document has no root element"));
    }

    Ok(document)
}

fn resolve_reference(name: &str) -> Result<String, TransportError> {
    if let Some(code) = name.strip_prefix('#') {
        let code = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => code.parse(),
        }
        .map_err(malformed)?;

        return char::from_u32(code)
            .map(String::from)
            .ok_or_else(|| malformed(format!("&{name}; is not a character")));
    }

    resolve_predefined_entity(name)
        .map(str::to_string)
        .ok_or_else(|| malformed(format!("unknown entity &{name};")))
}

fn decode(decoder: Decoder, bytes: &[u8]) -> Result<String, TransportError> {
    decoder
        .decode(bytes)
        .map(|text| text.into_owned())
        .map_err(malformed)
}

fn malformed(error: impl Display) -> TransportError {
    TransportError::MalformedXml(error.to_string())
}
