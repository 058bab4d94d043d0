//! Browser implementations of the ports the shared crate is written against.

use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen::JsValue;

use pahadi::api::LoginRedirect;
use pahadi::errors::StorageError;
use pahadi::log::error;
use pahadi::storage::SessionStorage;

use crate::routes::Route;
use yew_router::Routable;

fn js_reason(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// `window.localStorage`, holding raw strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|err| StorageError::Read {
                key: key.to_string(),
                reason: js_reason(err),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                reason: js_reason(err),
            })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|err| StorageError::Write {
                key: key.to_string(),
                reason: js_reason(err),
            })
    }
}

/// Full page navigation to the login route, which also drops any in-memory view state.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowRedirect;

impl LoginRedirect for WindowRedirect {
    fn redirect_to_login(&self) {
        let Some(window) = web_sys::window() else {
            error!("No window to redirect from");
            return;
        };
        if let Err(err) = window.location().set_href(&Route::Login.to_path()) {
            error!("Failed to redirect to login: {}", js_reason(err));
        }
    }
}
