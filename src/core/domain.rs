use std::env;
use serde::{Deserialize, Serialize};
use crate::core::library::Locale;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> i64;
    fn version(&self) -> i64;
}


// Configuration abstracts config options for library system
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    // partitions the in-memory store; informational for DynamoDB
    pub branch_id: String,
    pub locale: Locale,
    pub page_size: usize,
    pub admin_username: String,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            locale: Locale::English,
            page_size: 100,
            admin_username: "admin".to_string(),
        }
    }

    pub fn from_env() -> Self {
        let mut config = Configuration::new(
            env::var("LIBRARY_BRANCH").unwrap_or_else(|_| "main".to_string()).as_str());
        if let Ok(locale) = env::var("LIBRARY_LOCALE") {
            config.locale = Locale::from(locale);
        }
        if let Some(page_size) = env::var("LIBRARY_PAGE_SIZE").ok().and_then(|s| s.parse::<usize>().ok()) {
            if page_size > 0 {
                config.page_size = page_size;
            }
        }
        config
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}
