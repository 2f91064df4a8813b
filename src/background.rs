/// Background worker: answers popup requests

use crate::chrome::ChromeHost;
use crate::error::SnapshotError;
use crate::messages::{Request, Response};
use crate::service::SnapshotService;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

/// Answer one `runtime.onMessage` request. The worker script registers the
/// listener itself and hands each request here once the module is ready.
pub fn handle_message(request_js: JsValue) -> js_sys::Promise {
    future_to_promise(async move {
        let response = match serde_wasm_bindgen::from_value::<Request>(request_js) {
            Ok(request) => {
                log::debug!("Handling {:?}", request);
                SnapshotService::new(ChromeHost).handle(request).await
            }
            Err(e) => {
                log::warn!("Malformed request: {}", e);
                Response::failed(&SnapshotError::MalformedRequest(e.to_string()))
            }
        };

        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        response
            .serialize(&serializer)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    })
}
