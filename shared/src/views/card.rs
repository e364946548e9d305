//! Search result card view model
//!
//! Holds the fields shown on a single entity card and derives the display
//! rows from them: tier label, owner/tier/usage/type info, merged tag list,
//! match breakdown and the click target.

use serde::{Deserialize, Serialize};

use super::format::{start_case, usage_percentile};
use super::navigation::{entity_link, LinkClick, SearchIndex};
use crate::entity::{Container, TagLabel, FQN_SEPARATOR};

const TIER_PREFIX: &str = "Tier.";

/// Tier supplied either as a ready label or as the tier tag itself
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tier {
    Plain(String),
    Tag(TagLabel),
}

impl Tier {
    /// `Tier.Tier1` -> `Tier1`; plain strings are shown as-is
    pub fn display(&self) -> String {
        match self {
            Tier::Plain(label) => label.clone(),
            Tier::Tag(tag) => tag
                .tag_fqn
                .split(FQN_SEPARATOR)
                .nth(1)
                .unwrap_or_default()
                .to_string(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Tier::Plain(label) => label.is_empty(),
            Tier::Tag(tag) => tag.tag_fqn.is_empty(),
        }
    }
}

/// Tag shown on a card; search results carry either plain FQNs or labels
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardTag {
    Text(String),
    Label(TagLabel),
}

impl CardTag {
    /// Identity used for de-duplication
    pub fn key(&self) -> &str {
        match self {
            CardTag::Text(text) => text,
            CardTag::Label(label) => &label.tag_fqn,
        }
    }
}

impl From<Tier> for CardTag {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Plain(label) => CardTag::Text(label),
            Tier::Tag(tag) => CardTag::Label(tag),
        }
    }
}

/// Search hit count for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCount {
    pub key: String,
    pub value: u64,
}

/// Key/value row rendered under the card title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraInfo {
    pub key: &'static str,
    pub value: String,
    pub show_label: bool,
}

impl ExtraInfo {
    fn new(key: &'static str, value: String) -> Self {
        Self {
            key,
            value,
            show_label: false,
        }
    }
}

/// Card inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableDataCardProps {
    pub name: String,
    pub fully_qualified_name: String,
    pub index: SearchIndex,
    pub id: Option<String>,
    pub owner: String,
    pub description: Option<String>,
    pub table_type: Option<String>,
    pub tier: Option<Tier>,

    /// Usage percentile rank (0-100)
    pub usage: Option<f64>,
    pub service: Option<String>,
    pub service_type: Option<String>,
    pub tags: Vec<CardTag>,
    pub matches: Vec<MatchCount>,
    pub database: Option<String>,
    pub database_schema: Option<String>,
    pub deleted: bool,
}

impl TableDataCardProps {
    pub fn new(name: impl Into<String>, fqn: impl Into<String>, index: SearchIndex) -> Self {
        Self {
            name: name.into(),
            fully_qualified_name: fqn.into(),
            index,
            ..Default::default()
        }
    }

    /// Card for a container listed outside search, e.g. on the explore page
    pub fn from_container(container: &Container) -> Self {
        let (tiers, tags): (Vec<&TagLabel>, Vec<&TagLabel>) = container
            .tags
            .iter()
            .partition(|tag| tag.tag_fqn.starts_with(TIER_PREFIX));

        Self {
            name: container.label().to_string(),
            fully_qualified_name: container.fully_qualified_name.clone(),
            index: SearchIndex::Container,
            id: Some(container.id.to_string()),
            owner: container.owner.as_ref().map(|o| o.label()).unwrap_or_default(),
            description: container.description.clone(),
            tier: tiers.first().map(|tag| Tier::Tag((*tag).clone())),
            service: container.service.as_ref().map(|s| s.label()),
            tags: tags.into_iter().cloned().map(CardTag::Label).collect(),
            deleted: container.deleted,
            ..Default::default()
        }
    }

    pub fn display_tier(&self) -> String {
        self.tier.as_ref().map(Tier::display).unwrap_or_default()
    }

    /// `Owner`, `Tier`, then `Usage` (non-dashboard only) and `Type` when known
    pub fn extra_info(&self) -> Vec<ExtraInfo> {
        let mut info = vec![
            ExtraInfo::new("Owner", self.owner.clone()),
            ExtraInfo::new("Tier", self.display_tier()),
        ];

        if let Some(usage) = self.usage {
            if self.index != SearchIndex::Dashboard {
                info.push(ExtraInfo::new("Usage", usage_percentile(usage, true)));
            }
        }

        if let Some(table_type) = &self.table_type {
            info.push(ExtraInfo {
                key: "Type",
                value: table_type.clone(),
                show_label: true,
            });
        }

        info
    }

    /// Tier followed by the tags, with duplicates removed
    pub fn asset_tags(&self) -> Vec<CardTag> {
        let tier = self
            .tier
            .iter()
            .filter(|tier| !tier.is_empty())
            .cloned()
            .map(CardTag::from);

        let mut seen = std::collections::HashSet::new();
        tier.chain(self.tags.iter().cloned())
            .filter(|tag| seen.insert(tag.key().to_string()))
            .collect()
    }

    /// `3 in Name, 1 in Column Names`
    pub fn match_summary(&self) -> Option<String> {
        if self.matches.is_empty() {
            return None;
        }
        Some(
            self.matches
                .iter()
                .map(|m| format!("{} in {}", m.value, start_case(&m.key)))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    /// `database.schema` line shown above the title
    pub fn meta_info(&self) -> Option<String> {
        match (&self.database, &self.database_schema) {
            (Some(database), Some(schema)) => Some(format!("{}{}{}", database, FQN_SEPARATOR, schema)),
            _ => None,
        }
    }

    pub fn link(&self) -> String {
        entity_link(self.index, &self.fully_qualified_name)
    }

    pub fn on_link_click(&self, current_path: &str) -> LinkClick {
        LinkClick::resolve(current_path, self.index, &self.fully_qualified_name)
    }
}

#[cfg(test)]
mod tests {
    use super::super::navigation::testing::{RecordingNavigator, RecordingTour};
    use super::super::navigation::TourPage;
    use super::*;

    fn card() -> TableDataCardProps {
        let mut card = TableDataCardProps::new("orders", "s3_prod.sales.orders", SearchIndex::Container);
        card.owner = "data-eng".to_string();
        card
    }

    #[test]
    fn test_plain_tier_is_displayed_verbatim() {
        let mut card = card();
        card.tier = Some(Tier::Plain("Tier1".to_string()));
        assert_eq!(card.display_tier(), "Tier1");
    }

    #[test]
    fn test_tag_tier_uses_second_segment() {
        let mut card = card();
        card.tier = Some(Tier::Tag(TagLabel::new("a.b")));
        assert_eq!(card.display_tier(), "b");

        card.tier = Some(Tier::Tag(TagLabel::new("Tier")));
        assert_eq!(card.display_tier(), "");

        card.tier = None;
        assert_eq!(card.display_tier(), "");
    }

    #[test]
    fn test_asset_tags_are_deduplicated() {
        let mut card = card();
        card.tier = Some(Tier::Tag(TagLabel::new("Tier.Tier2")));
        card.tags = vec![
            CardTag::Label(TagLabel::new("PII.Sensitive")),
            CardTag::Label(TagLabel::new("Tier.Tier2")),
            CardTag::Text("PII.Sensitive".to_string()),
        ];

        let tags = card.asset_tags();
        let keys: Vec<&str> = tags.iter().map(CardTag::key).collect();
        assert_eq!(keys, vec!["Tier.Tier2", "PII.Sensitive"]);
    }

    #[test]
    fn test_empty_tier_is_not_a_tag() {
        let mut card = card();
        card.tier = Some(Tier::Plain(String::new()));
        card.tags = vec![CardTag::Text("Finance".to_string())];
        assert_eq!(card.asset_tags(), vec![CardTag::Text("Finance".to_string())]);
    }

    #[test]
    fn test_extra_info_rows() {
        let mut card = card();
        card.tier = Some(Tier::Plain("Tier3".to_string()));
        card.usage = Some(87.0);
        card.table_type = Some("Regular".to_string());

        let info = card.extra_info();
        let keys: Vec<&str> = info.iter().map(|i| i.key).collect();
        assert_eq!(keys, vec!["Owner", "Tier", "Usage", "Type"]);
        assert_eq!(info[2].value, "Usage - 87th pctile");
        assert!(info[3].show_label);
    }

    #[test]
    fn test_dashboard_cards_hide_usage() {
        let mut card = card();
        card.index = SearchIndex::Dashboard;
        card.usage = Some(50.0);
        assert!(card.extra_info().iter().all(|i| i.key != "Usage"));
    }

    #[test]
    fn test_match_summary_and_meta() {
        let mut card = card();
        assert_eq!(card.match_summary(), None);
        card.matches = vec![
            MatchCount { key: "name".to_string(), value: 3 },
            MatchCount { key: "columnNames".to_string(), value: 1 },
        ];
        assert_eq!(card.match_summary().as_deref(), Some("3 in Name, 1 in Column Names"));

        assert_eq!(card.meta_info(), None);
        card.database = Some("ecommerce".to_string());
        card.database_schema = Some("shopify".to_string());
        assert_eq!(card.meta_info().as_deref(), Some("ecommerce.shopify"));
    }

    #[test]
    fn test_click_routing() {
        let card = card();
        let navigator = RecordingNavigator::default();
        let tour = RecordingTour::default();

        card.on_link_click("/tour").apply(&navigator, &tour);
        assert!(navigator.visited.borrow().is_empty());
        assert_eq!(tour.page.get(), Some(TourPage::DatasetPage));

        card.on_link_click("/explore/containers").apply(&navigator, &tour);
        assert_eq!(*navigator.visited.borrow(), vec![card.link()]);
        assert_eq!(card.link(), "/container/s3_prod.sales.orders");
    }

    #[test]
    fn test_tier_deserializes_from_string_or_tag() {
        let plain: Tier = serde_json::from_str("\"Tier1\"").unwrap();
        assert_eq!(plain, Tier::Plain("Tier1".to_string()));

        let tag: Tier = serde_json::from_value(serde_json::json!({ "tagFQN": "Tier.Tier1" })).unwrap();
        assert_eq!(tag.display(), "Tier1");
    }

    #[test]
    fn test_card_from_container_splits_tier() {
        let container: Container = serde_json::from_value(serde_json::json!({
            "id": "b5b9b3d4-3f5e-4f38-8d5b-2df1d5a4e0e1",
            "name": "orders",
            "displayName": "Orders",
            "fullyQualifiedName": "s3_prod.orders",
            "owner": { "id": "8f4f1c3e-8d35-4b2e-9f0f-63c1d0a7c111", "type": "team", "name": "data-eng" },
            "tags": [{ "tagFQN": "Tier.Tier2" }, { "tagFQN": "PII.Sensitive" }]
        }))
        .unwrap();

        let card = TableDataCardProps::from_container(&container);
        assert_eq!(card.name, "Orders");
        assert_eq!(card.index, SearchIndex::Container);
        assert_eq!(card.owner, "data-eng");
        assert_eq!(card.display_tier(), "Tier2");
        assert_eq!(card.link(), "/container/s3_prod.orders");
        let keys: Vec<String> = card.asset_tags().iter().map(|t| t.key().to_string()).collect();
        assert_eq!(keys, vec!["Tier.Tier2", "PII.Sensitive"]);
    }
}
