use serde::Serialize;

/// Which element an [`Item`] was extracted from.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    #[serde(rename = "a")]
    Anchor,
    #[serde(rename = "img")]
    Image,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Item {
    pub label: String,
    pub href: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_serializes_with_type_tag() {
        let item = Item {
            label: "Home".to_string(),
            href: "http://example.com/".to_string(),
            kind: ItemKind::Anchor,
        };
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"label": "Home", "href": "http://example.com/", "type": "a"})
        );

        let image = Item { kind: ItemKind::Image, ..item };
        assert_eq!(serde_json::to_value(&image).unwrap()["type"], "img");
    }

    #[test]
    fn item_fields_keep_declaration_order() {
        let item = Item {
            label: "None".to_string(),
            href: "http://example.com/a.png".to_string(),
            kind: ItemKind::Image,
        };
        assert_eq!(
            serde_json::to_string(&item).unwrap(),
            r#"{"label":"None","href":"http://example.com/a.png","type":"img"}"#
        );
    }
}
