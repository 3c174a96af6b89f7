//! XML properties documents.
//!
//! ```xml
//! <properties>
//!     <property name="hosts">
//!         <value>a.example</value>
//!         <value>b.example</value>
//!     </property>
//! </properties>
//! ```
//!
//! Every `property` element below the root becomes one entry; its `value`
//! children are joined with `,`. A comma inside a value is therefore
//! indistinguishable from two values.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::Properties;
use crate::error::ResourceError;

/// Parses an XML properties document into a flat map.
pub fn parse(content: &str) -> Result<Properties, ResourceError> {
	let mut reader = Reader::from_str(content);
	let mut doc = Document::default();

	loop {
		match reader.read_event()? {
			Event::Start(e) => doc.open(&e)?,
			Event::Empty(e) => {
				doc.open(&e)?;
				doc.close();
			}
			Event::End(_) => doc.close(),
			Event::Text(t) => {
				if doc.value_depth > 0 {
					doc.value.push_str(&t.unescape()?);
				}
			}
			Event::CData(c) => {
				if doc.value_depth > 0 {
					doc.value.push_str(&String::from_utf8_lossy(&c));
				}
			}
			Event::Eof => break,
			_ => {}
		}
	}

	doc.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
	Root,
	Property,
	Value,
	Other,
}

#[derive(Default)]
struct Document {
	stack: Vec<Element>,
	root_seen: bool,
	/// Open `property` elements as `(name, joined values)`.
	properties: Vec<(String, String)>,
	value_depth: usize,
	value: String,
	out: Properties,
}

impl Document {
	fn open(&mut self, e: &BytesStart<'_>) -> Result<(), ResourceError> {
		let name = e.name();
		let element = if self.stack.is_empty() {
			if self.root_seen {
				return Err(ResourceError::Schema("multiple root elements".into()));
			}
			if name.as_ref() != b"properties" {
				return Err(ResourceError::Schema(format!(
					"root element must be 'properties', found '{}'",
					String::from_utf8_lossy(name.as_ref())
				)));
			}
			self.root_seen = true;
			Element::Root
		} else {
			match name.as_ref() {
				b"property" => {
					let key = property_name(e)?;
					self.properties.push((key, String::new()));
					Element::Property
				}
				b"value" if !self.properties.is_empty() => {
					self.value_depth += 1;
					if self.value_depth == 1 {
						self.value.clear();
					}
					Element::Value
				}
				_ => Element::Other,
			}
		};
		self.stack.push(element);
		Ok(())
	}

	fn close(&mut self) {
		match self.stack.pop() {
			Some(Element::Property) => {
				if let Some((key, value)) = self.properties.pop() {
					self.out.insert(key, value);
				}
			}
			Some(Element::Value) => {
				self.value_depth -= 1;
				if self.value_depth == 0 {
					for (_, joined) in &mut self.properties {
						if !joined.is_empty() {
							joined.push(',');
						}
						joined.push_str(&self.value);
					}
				}
			}
			Some(Element::Root | Element::Other) | None => {}
		}
	}

	fn finish(self) -> Result<Properties, ResourceError> {
		if !self.root_seen {
			return Err(ResourceError::Schema("document has no root element".into()));
		}
		if !self.stack.is_empty() {
			return Err(ResourceError::Schema("unexpected end of document".into()));
		}
		Ok(self.out)
	}
}

fn property_name(e: &BytesStart<'_>) -> Result<String, ResourceError> {
	for attr in e.attributes() {
		let attr = attr.map_err(quick_xml::Error::from)?;
		if attr.key.as_ref() == b"name" {
			let value = attr.unescape_value()?;
			if !value.is_empty() {
				return Ok(value.into_owned());
			}
			break;
		}
	}
	Err(ResourceError::Schema(
		"property element requires a non-empty name attribute".into(),
	))
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn value<'a>(props: &'a Properties, key: &str) -> Option<&'a str> {
		props.get(key).map(String::as_str)
	}

	#[test]
	fn values_are_comma_joined() {
		let props = parse(
			r#"<properties><property name="a"><value>1</value><value>2</value></property></properties>"#,
		)
		.unwrap();
		assert_eq!(value(&props, "a"), Some("1,2"));
	}

	#[test]
	fn property_without_values_is_empty() {
		let props = parse(
			r#"<?xml version="1.0"?>
			<properties>
				<property name="empty"/>
				<property name="none"></property>
			</properties>"#,
		)
		.unwrap();
		assert_eq!(value(&props, "empty"), Some(""));
		assert_eq!(value(&props, "none"), Some(""));
	}

	#[test]
	fn entities_and_cdata() {
		let props = parse(
			r#"<properties>
				<property name="q"><value>a &amp; b</value><value><![CDATA[<raw>]]></value></property>
			</properties>"#,
		)
		.unwrap();
		assert_eq!(value(&props, "q"), Some("a & b,<raw>"));
	}

	#[test]
	fn empty_leading_value_adds_no_separator() {
		let props = parse(
			r#"<properties><property name="k"><value/><value>x</value></property></properties>"#,
		)
		.unwrap();
		assert_eq!(value(&props, "k"), Some("x"));
	}

	#[test]
	fn nested_property_elements_are_found() {
		let props = parse(
			r#"<properties><group><property name="deep"><value>1</value></property></group></properties>"#,
		)
		.unwrap();
		assert_eq!(value(&props, "deep"), Some("1"));
	}

	#[test]
	fn wrong_root_is_rejected() {
		let err = parse(r#"<config><property name="a"/></config>"#).unwrap_err();
		assert!(matches!(err, ResourceError::Schema(msg) if msg.contains("config")));
	}

	#[test]
	fn missing_name_is_rejected() {
		let err = parse(r#"<properties><property><value>1</value></property></properties>"#)
			.unwrap_err();
		assert!(matches!(err, ResourceError::Schema(_)));

		let err = parse(r#"<properties><property name=""/></properties>"#).unwrap_err();
		assert!(matches!(err, ResourceError::Schema(_)));
	}

	#[test]
	fn malformed_xml_is_rejected() {
		let err = parse("<properties><property name=\"a\"></properties>").unwrap_err();
		assert!(matches!(err, ResourceError::Xml(_) | ResourceError::Schema(_)));
	}

	#[test]
	fn empty_document_is_rejected() {
		assert!(matches!(parse("").unwrap_err(), ResourceError::Schema(_)));
	}
}
