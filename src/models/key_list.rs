//! Key signature changes along the timeline
//!
//! A `KeyList` maps ticks to the key signature that starts there. At most
//! one change exists per tick; inserting at an occupied tick overwrites.

use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::key_sig_event::KeySigEvent;
use crate::xml::errors::{Result, SchemaError, XmlError};
use crate::xml::reader::{child_elements, dom_error, int_attribute, schema_error};
use crate::xml::time_base::TimeBase;
use crate::xml::writer::XmlWriter;

/// Container tag used when a key list is written on its own
pub const KEY_LIST_TAG: &str = "KeyList";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyList {
    changes: BTreeMap<i32, KeySigEvent>,
}

impl KeyList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Key signature in effect at `tick`.
    ///
    /// Returns the invalid event when the list is empty or `tick` comes
    /// before the first change.
    pub fn key(&self, tick: i32) -> KeySigEvent {
        self.changes
            .range(..=tick)
            .next_back()
            .map(|(_, event)| *event)
            .unwrap_or_default()
    }

    /// Tick of the first change strictly after `tick`
    pub fn next_key_tick(&self, tick: i32) -> Option<i32> {
        self.changes
            .range((std::ops::Bound::Excluded(tick), std::ops::Bound::Unbounded))
            .next()
            .map(|(t, _)| *t)
    }

    /// Set the key starting at `tick`, returning the change it replaced
    pub fn insert(&mut self, tick: i32, event: KeySigEvent) -> Option<KeySigEvent> {
        self.changes.insert(tick, event)
    }

    pub fn remove(&mut self, tick: i32) -> Option<KeySigEvent> {
        self.changes.remove(&tick)
    }

    pub fn clear(&mut self) {
        self.changes.clear();
    }

    /// Changes in ascending tick order
    pub fn iter(&self) -> impl Iterator<Item = (i32, &KeySigEvent)> + '_ {
        self.changes.iter().map(|(tick, event)| (*tick, event))
    }

    /// Write every change inside a `<name>` container
    pub fn write(&self, xml: &mut XmlWriter, name: &str) {
        xml.stag(name);
        for (tick, event) in self.iter() {
            if event.is_custom() {
                xml.tag_e("key", &[("tick", &tick), ("custom", &event.custom_type())]);
            } else {
                xml.tag_e("key", &[("tick", &tick), ("idx", &event.accidental_type())]);
            }
        }
        xml.etag();
    }

    /// Read the `<key>` children of `node` into this list.
    ///
    /// Unknown children and `<key>` elements with unreadable attributes are
    /// skipped and returned as schema errors; the rest of the list is still
    /// read.
    pub fn read(&mut self, node: Node, time_base: &dyn TimeBase) -> Vec<SchemaError> {
        let mut errors = Vec::new();
        for e in child_elements(node) {
            if e.tag_name().name() != "key" {
                errors.push(dom_error(e));
                continue;
            }
            match read_key(e) {
                Ok((tick, event)) => {
                    self.changes.insert(time_base.file_division(tick), event);
                }
                Err(error) => errors.push(error),
            }
        }
        errors
    }

    /// Serialize into a standalone document
    pub fn to_xml_string(&self, name: &str) -> String {
        let mut xml = XmlWriter::new();
        self.write(&mut xml, name);
        xml.finish()
    }

    /// Parse a standalone document whose root is `<name>`
    pub fn from_xml_str(
        text: &str,
        name: &str,
        time_base: &dyn TimeBase,
    ) -> Result<(KeyList, Vec<SchemaError>)> {
        let doc = Document::parse(text).map_err(|e| XmlError::InvalidXml(e.to_string()))?;
        let root = doc.root_element();
        if root.tag_name().name() != name {
            return Err(XmlError::UnexpectedElement {
                expected: name.to_string(),
                found: root.tag_name().name().to_string(),
            });
        }

        let mut list = KeyList::new();
        let errors = list.read(root, time_base);
        Ok((list, errors))
    }
}

/// Parse one `<key>` element into its raw tick and event
fn read_key(e: Node) -> std::result::Result<(i32, KeySigEvent), SchemaError> {
    let tick = int_attribute(e, "tick")?.unwrap_or(0);
    let mut event = KeySigEvent::default();
    if let Some(custom) = int_attribute(e, "custom")? {
        // the custom pattern is 16 bits wide on disk
        let pattern = u16::try_from(custom).map_err(|_| {
            schema_error(e, format!("attribute custom=\"{}\" is out of range", custom))
        })?;
        event.set_custom_type(pattern);
    } else {
        event.set_accidental_type(int_attribute(e, "idx")?.unwrap_or(0));
    }
    Ok((tick, event))
}

impl<'a> IntoIterator for &'a KeyList {
    type Item = (&'a i32, &'a KeySigEvent);
    type IntoIter = std::collections::btree_map::Iter<'a, i32, KeySigEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::time_base::{FileDivision, SameDivision};

    fn two_keys() -> KeyList {
        let mut list = KeyList::new();
        list.insert(0, KeySigEvent::new(0));
        list.insert(480, KeySigEvent::new(-3));
        list
    }

    #[test]
    fn test_empty_list_is_invalid_everywhere() {
        let list = KeyList::new();
        for tick in [-1, 0, 1, 480, i32::MAX] {
            assert!(list.key(tick).is_invalid());
        }
    }

    #[test]
    fn test_floor_lookup() {
        let list = two_keys();
        assert_eq!(list.key(0).accidental_type(), 0);
        assert_eq!(list.key(240).accidental_type(), 0);
        assert_eq!(list.key(479).accidental_type(), 0);
        assert_eq!(list.key(480).accidental_type(), -3);
        assert_eq!(list.key(1000).accidental_type(), -3);
        assert!(list.key(-1).is_invalid());
    }

    #[test]
    fn test_before_first_change_is_invalid() {
        let mut list = KeyList::new();
        list.insert(960, KeySigEvent::new(1));
        assert!(list.key(0).is_invalid());
        assert!(list.key(959).is_invalid());
        assert!(list.key(960).is_valid());
    }

    #[test]
    fn test_insert_overwrites() {
        let mut list = KeyList::new();
        assert_eq!(list.insert(0, KeySigEvent::new(2)), None);
        assert_eq!(list.insert(0, KeySigEvent::new(4)), Some(KeySigEvent::new(2)));
        assert_eq!(list.len(), 1);
        assert_eq!(list.key(10).accidental_type(), 4);
    }

    #[test]
    fn test_insert_then_query() {
        let mut list = KeyList::new();
        list.insert(0, KeySigEvent::new(2));
        assert_eq!(list.key(100), KeySigEvent::new(2));
    }

    #[test]
    fn test_key_is_repeatable() {
        let list = two_keys();
        assert_eq!(list.key(700), list.key(700));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_next_key_tick_and_remove() {
        let mut list = two_keys();
        assert_eq!(list.next_key_tick(0), Some(480));
        assert_eq!(list.next_key_tick(480), None);
        assert_eq!(list.remove(480), Some(KeySigEvent::new(-3)));
        assert_eq!(list.key(1000).accidental_type(), 0);
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_write() {
        let mut list = two_keys();
        list.insert(1920, KeySigEvent::custom(12));
        assert_eq!(
            list.to_xml_string("KeyList"),
            "<KeyList>\n  <key tick=\"0\" idx=\"0\"/>\n  <key tick=\"480\" idx=\"-3\"/>\n  <key tick=\"1920\" custom=\"12\"/>\n</KeyList>\n"
        );
    }

    #[test]
    fn test_read() {
        let xml = r#"<KeyList>
  <key tick="0" idx="2"/>
  <key tick="960" custom="5"/>
  <key tick="1920" idx="-4"/>
</KeyList>"#;
        let (list, errors) = KeyList::from_xml_str(xml, "KeyList", &SameDivision).unwrap();
        assert!(errors.is_empty());
        assert_eq!(list.len(), 3);
        assert_eq!(list.key(100), KeySigEvent::new(2));
        assert_eq!(list.key(960), KeySigEvent::custom(5));
        assert_eq!(list.key(5000), KeySigEvent::new(-4));
    }

    #[test]
    fn test_read_custom_wins_over_idx() {
        let xml = r#"<KeyList><key tick="0" idx="3" custom="7"/></KeyList>"#;
        let (list, _) = KeyList::from_xml_str(xml, "KeyList", &SameDivision).unwrap();
        assert_eq!(list.key(0), KeySigEvent::custom(7));
        assert_eq!(list.key(0).accidental_type(), 0);
    }

    #[test]
    fn test_read_defaults_and_clamps() {
        let xml = r#"<KeyList><key idx="12"/></KeyList>"#;
        let (list, errors) = KeyList::from_xml_str(xml, "KeyList", &SameDivision).unwrap();
        assert!(errors.is_empty());
        assert_eq!(list.key(0).accidental_type(), 7);
    }

    #[test]
    fn test_read_converts_ticks() {
        let xml = r#"<KeyList><key tick="384" idx="1"/></KeyList>"#;
        let (list, _) = KeyList::from_xml_str(xml, "KeyList", &FileDivision::new(192)).unwrap();
        assert!(list.key(959).is_invalid());
        assert_eq!(list.key(960).accidental_type(), 1);
    }

    #[test]
    fn test_read_skips_unknown_elements() {
        let xml = r#"<KeyList>
  <key tick="0" idx="1"/>
  <tempo tick="0" value="2"/>
  <key tick="480" idx="oops"/>
  <key tick="960" idx="-1"/>
</KeyList>"#;
        let (list, errors) = KeyList::from_xml_str(xml, "KeyList", &SameDivision).unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].tag, "tempo");
        assert_eq!(errors[0].line, 3);
        assert_eq!(errors[1].tag, "key");
        assert_eq!(list.len(), 2);
        assert_eq!(list.key(500).accidental_type(), 1);
        assert_eq!(list.key(960).accidental_type(), -1);
    }

    #[test]
    fn test_read_rejects_custom_out_of_range() {
        let xml = r#"<KeyList>
  <key tick="0" custom="70000"/>
  <key tick="10" custom="-1"/>
  <key tick="20" custom="65535"/>
</KeyList>"#;
        let (list, errors) = KeyList::from_xml_str(xml, "KeyList", &SameDivision).unwrap();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.tag == "key"));
        assert_eq!(errors[0].line, 2);
        assert_eq!(errors[1].line, 3);
        assert_eq!(list.len(), 1);
        assert!(list.key(15).is_invalid());
        assert_eq!(list.key(20), KeySigEvent::custom(u16::MAX));
    }

    #[test]
    fn test_from_xml_str_errors() {
        assert!(matches!(
            KeyList::from_xml_str("<KeyList>", "KeyList", &SameDivision),
            Err(XmlError::InvalidXml(_))
        ));
        assert_eq!(
            KeyList::from_xml_str("<Other/>", "KeyList", &SameDivision).unwrap_err(),
            XmlError::UnexpectedElement {
                expected: "KeyList".to_string(),
                found: "Other".to_string(),
            }
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let list = two_keys();
        let json = serde_json::to_string(&list).unwrap();
        let parsed: KeyList = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, list);
    }
}
