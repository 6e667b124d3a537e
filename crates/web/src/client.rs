//! Page-wide client instance

use std::cell::RefCell;
use taskgrid_client::{ClientError, TaskGridClient, TaskGridConfig};

thread_local! {
    static CLIENT: RefCell<Option<TaskGridClient>> = const { RefCell::new(None) };
}

/// Configuration compiled into the bundle
///
/// `TASKGRID_API_BASE_URL` at build time overrides the default backend.
pub fn page_config() -> TaskGridConfig {
    match option_env!("TASKGRID_API_BASE_URL") {
        Some(url) => TaskGridConfig::with_base_url(url),
        None => TaskGridConfig::default(),
    }
}

/// Get the shared API client, creating it on first use
pub fn api_client() -> Result<TaskGridClient, ClientError> {
    CLIENT.with(|cell| {
        if let Some(client) = cell.borrow().as_ref() {
            return Ok(client.clone());
        }

        let client = TaskGridClient::builder().config(page_config()).build()?;
        *cell.borrow_mut() = Some(client.clone());
        Ok(client)
    })
}
