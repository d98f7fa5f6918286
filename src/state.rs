use crate::config::PropertyNames;
use crate::notion::NotionClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub notion: Arc<NotionClient>,
    pub properties: Arc<PropertyNames>,
}

impl AppState {
    pub fn new(notion: NotionClient, properties: PropertyNames) -> Self {
        Self {
            notion: Arc::new(notion),
            properties: Arc::new(properties),
        }
    }
}
