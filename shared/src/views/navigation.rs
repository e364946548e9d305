//! Entity links and card click routing
//!
//! The guided tour keeps track of which page it is showing. Instead of a
//! process-wide marker, the current tour page lives behind [`TourContext`],
//! which the caller hands to the click handler alongside a [`Navigator`].

use serde::{Deserialize, Serialize};

use crate::fqn::encode_fqn;

/// Route prefix of the guided tour
pub const TOUR_ROUTE: &str = "/tour";

/// Search index an entity was found in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchIndex {
    #[default]
    #[serde(rename = "table_search_index")]
    Table,
    #[serde(rename = "topic_search_index")]
    Topic,
    #[serde(rename = "dashboard_search_index")]
    Dashboard,
    #[serde(rename = "pipeline_search_index")]
    Pipeline,
    #[serde(rename = "mlmodel_search_index")]
    MlModel,
    #[serde(rename = "container_search_index")]
    Container,
}

impl SearchIndex {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchIndex::Table => "table_search_index",
            SearchIndex::Topic => "topic_search_index",
            SearchIndex::Dashboard => "dashboard_search_index",
            SearchIndex::Pipeline => "pipeline_search_index",
            SearchIndex::MlModel => "mlmodel_search_index",
            SearchIndex::Container => "container_search_index",
        }
    }

    /// First path segment of the entity's detail page
    pub fn route_segment(&self) -> &'static str {
        match self {
            SearchIndex::Table => "table",
            SearchIndex::Topic => "topic",
            SearchIndex::Dashboard => "dashboard",
            SearchIndex::Pipeline => "pipeline",
            SearchIndex::MlModel => "mlmodel",
            SearchIndex::Container => "container",
        }
    }
}

impl std::str::FromStr for SearchIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table_search_index" | "table" => Ok(SearchIndex::Table),
            "topic_search_index" | "topic" => Ok(SearchIndex::Topic),
            "dashboard_search_index" | "dashboard" => Ok(SearchIndex::Dashboard),
            "pipeline_search_index" | "pipeline" => Ok(SearchIndex::Pipeline),
            "mlmodel_search_index" | "mlmodel" => Ok(SearchIndex::MlModel),
            "container_search_index" | "container" => Ok(SearchIndex::Container),
            _ => Err(format!("Unknown search index: {}", s)),
        }
    }
}

/// Canonical detail page for an entity, e.g. `/container/s3.sales`
pub fn entity_link(index: SearchIndex, fqn: &str) -> String {
    format!("/{}/{}", index.route_segment(), encode_fqn(fqn))
}

pub fn is_tour_route(path: &str) -> bool {
    path.contains(TOUR_ROUTE)
}

/// Pages the guided tour walks through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TourPage {
    MyDataPage,
    ExplorePage,
    DatasetPage,
}

/// Receives the current tour page
pub trait TourContext {
    fn set_current_page(&self, page: TourPage);
}

/// Performs client-side navigation
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// What a click on an entity title should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkClick {
    /// Advance the tour without leaving the tour route
    Tour(TourPage),
    /// Go to the entity's detail page
    Navigate(String),
}

impl LinkClick {
    pub fn resolve(current_path: &str, index: SearchIndex, fqn: &str) -> Self {
        if is_tour_route(current_path) {
            LinkClick::Tour(TourPage::DatasetPage)
        } else {
            LinkClick::Navigate(entity_link(index, fqn))
        }
    }

    pub fn apply(&self, navigator: &impl Navigator, tour: &impl TourContext) {
        match self {
            LinkClick::Tour(page) => tour.set_current_page(*page),
            LinkClick::Navigate(path) => navigator.navigate(path),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::{Cell, RefCell};

    use super::*;

    #[derive(Default)]
    pub struct RecordingNavigator {
        pub visited: RefCell<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, path: &str) {
            self.visited.borrow_mut().push(path.to_string());
        }
    }

    #[derive(Default)]
    pub struct RecordingTour {
        pub page: Cell<Option<TourPage>>,
    }

    impl TourContext for RecordingTour {
        fn set_current_page(&self, page: TourPage) {
            self.page.set(Some(page));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{RecordingNavigator, RecordingTour};
    use super::*;

    #[test]
    fn test_entity_link_encodes_fqn() {
        assert_eq!(entity_link(SearchIndex::Container, "s3.sales"), "/container/s3.sales");
        assert_eq!(
            entity_link(SearchIndex::Table, "pg.db.\"my schema\".t"),
            "/table/pg.db.%22my%20schema%22.t"
        );
    }

    #[test]
    fn test_tour_click_sets_page_without_navigation() {
        let navigator = RecordingNavigator::default();
        let tour = RecordingTour::default();

        let click = LinkClick::resolve("/tour", SearchIndex::Table, "sample.db.orders");
        click.apply(&navigator, &tour);

        assert_eq!(click, LinkClick::Tour(TourPage::DatasetPage));
        assert_eq!(tour.page.get(), Some(TourPage::DatasetPage));
        assert!(navigator.visited.borrow().is_empty());
    }

    #[test]
    fn test_click_outside_tour_navigates() {
        let navigator = RecordingNavigator::default();
        let tour = RecordingTour::default();

        LinkClick::resolve("/explore/tables", SearchIndex::Container, "s3.sales")
            .apply(&navigator, &tour);

        assert_eq!(*navigator.visited.borrow(), vec!["/container/s3.sales".to_string()]);
        assert_eq!(tour.page.get(), None);
    }

    #[test]
    fn test_search_index_parsing() {
        assert_eq!("container_search_index".parse::<SearchIndex>().unwrap(), SearchIndex::Container);
        assert_eq!("topic".parse::<SearchIndex>().unwrap(), SearchIndex::Topic);
        assert!("glossary".parse::<SearchIndex>().is_err());
    }
}
