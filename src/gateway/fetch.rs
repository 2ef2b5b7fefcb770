//! Browser `fetch` transport

use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::error::{EditorError, Result};

/// Transport backed by `window.fetch`
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

fn js_err(context: &str) -> impl Fn(JsValue) -> EditorError + '_ {
    move |e| EditorError::remote(format!("{}: {:?}", context, e))
}

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn post_json(&self, request: HttpRequest) -> Result<HttpResponse> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&request.body));

        let req = Request::new_with_str_and_init(&request.url, &opts)
            .map_err(js_err("build request"))?;
        let headers = req.headers();
        headers
            .set("Content-Type", "application/json")
            .map_err(js_err("set header"))?;
        for (name, value) in &request.headers {
            headers.set(name, value).map_err(js_err("set header"))?;
        }

        let window = web_sys::window().ok_or_else(|| EditorError::remote("no window available"))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&req))
            .await
            .map_err(js_err("fetch"))?
            .dyn_into()
            .map_err(js_err("fetch response"))?;

        let body = JsFuture::from(response.text().map_err(js_err("read body"))?)
            .await
            .map_err(js_err("read body"))?;

        Ok(HttpResponse {
            status: response.status(),
            body: body.as_string().unwrap_or_default(),
        })
    }
}
