//! AttributeTable - LinkType -> LinkAttributes with a shared fallback

use std::collections::HashMap;

use super::attributes::{Font, LinkAttributes};
use super::color::Color;
use super::snapshot::StyleSnapshot;
use crate::text::LinkType;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeTable {
    entries: HashMap<LinkType, LinkAttributes>,
}

impl AttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh table: every type gets the snapshot's base style with its own color
    pub fn from_snapshot(snapshot: &StyleSnapshot) -> Self {
        let entries = LinkType::ALL
            .iter()
            .map(|&link_type| {
                let attrs = snapshot.base.clone().with_foreground_color(default_color(link_type));
                (link_type, attrs)
            })
            .collect();
        Self { entries }
    }

    /// Table entry, or the shared fallback when the type has none
    pub fn attributes_for_type(&self, link_type: LinkType) -> &LinkAttributes {
        self.entries.get(&link_type).unwrap_or(LinkAttributes::fallback())
    }

    pub fn has_entry(&self, link_type: LinkType) -> bool {
        self.entries.contains_key(&link_type)
    }

    /// Upsert with `Some`, clear with `None`
    pub fn set_attributes_for_type(&mut self, link_type: LinkType, attributes: Option<LinkAttributes>) {
        match attributes {
            Some(attrs) => {
                self.entries.insert(link_type, attrs);
            }
            None => {
                self.entries.remove(&link_type);
            }
        }
    }

    /// Theme every existing entry except Action's
    pub fn override_non_action(&mut self, font: &Font, color: Color) {
        for (link_type, attrs) in self.entries.iter_mut() {
            if *link_type == LinkType::Action {
                continue;
            }
            attrs.foreground_color = Some(color);
            attrs.font = Some(font.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn default_color(link_type: LinkType) -> Color {
    match link_type {
        LinkType::Action => Color::ACTION_GRAY,
        LinkType::Hashtag | LinkType::Url | LinkType::UserHandle => Color::LINK_BLUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_snapshot_colors() {
        let table = AttributeTable::from_snapshot(&StyleSnapshot::default());
        assert_eq!(table.len(), 4);
        assert_eq!(table.attributes_for_type(LinkType::Action).foreground_color, Some(Color::ACTION_GRAY));
        assert_eq!(table.attributes_for_type(LinkType::Url).foreground_color, Some(Color::LINK_BLUE));
        assert_eq!(table.attributes_for_type(LinkType::Hashtag).font, Some(Font::default()));
    }

    #[test]
    fn test_cleared_type_falls_back_to_shared_default() {
        let mut table = AttributeTable::from_snapshot(&StyleSnapshot::default());
        table.set_attributes_for_type(LinkType::Hashtag, None);

        assert!(!table.has_entry(LinkType::Hashtag));
        assert!(std::ptr::eq(table.attributes_for_type(LinkType::Hashtag), LinkAttributes::fallback()));
    }

    #[test]
    fn test_empty_table_uses_fallback() {
        let table = AttributeTable::new();
        assert_eq!(table.attributes_for_type(LinkType::UserHandle), LinkAttributes::fallback());
    }

    #[test]
    fn test_upsert() {
        let mut table = AttributeTable::new();
        let red = LinkAttributes::default().with_foreground_color(Color::rgb(255, 0, 0));
        table.set_attributes_for_type(LinkType::Url, Some(red.clone()));
        assert_eq!(table.attributes_for_type(LinkType::Url), &red);
    }

    #[test]
    fn test_override_skips_action() {
        let mut table = AttributeTable::from_snapshot(&StyleSnapshot::default());
        let font = Font::new("Serif", 20.0);
        let green = Color::rgb(0, 255, 0);
        table.override_non_action(&font, green);

        for link_type in [LinkType::UserHandle, LinkType::Hashtag, LinkType::Url] {
            let attrs = table.attributes_for_type(link_type);
            assert_eq!(attrs.foreground_color, Some(green));
            assert_eq!(attrs.font.as_ref(), Some(&font));
        }
        let action = table.attributes_for_type(LinkType::Action);
        assert_eq!(action.foreground_color, Some(Color::ACTION_GRAY));
        assert_eq!(action.font, Some(Font::default()));
    }

    #[test]
    fn test_override_does_not_create_entries() {
        let mut table = AttributeTable::new();
        table.override_non_action(&Font::default(), Color::WHITE);
        assert!(table.is_empty());
    }
}
