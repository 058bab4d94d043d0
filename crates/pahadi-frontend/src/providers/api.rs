use std::rc::Rc;

use pahadi::api::{GlooTransport, HttpApiClient};
use pahadi::services::Api;
use pahadi::session::SessionStore;

use crate::browser::{BrowserStorage, WindowRedirect};
use crate::config::Config;

/// Wires the backend API against the browser: `localStorage` for the session, `fetch` for
/// requests and a full-page redirect on expired credentials.
pub fn create() -> Api {
    let config = Config::load();
    let session = SessionStore::new(Rc::new(BrowserStorage));
    let client = HttpApiClient::new(
        config.api_url,
        Rc::new(GlooTransport),
        session.clone(),
        Rc::new(WindowRedirect),
    );
    Api::new(client, session)
}
