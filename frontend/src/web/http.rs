//! HTTP 传输实现
//!
//! 基于 `web_sys::fetch` 实现核心库的 [`HttpClient`]，把通用请求翻译为浏览器请求。
//! multipart 请求体由 `FormData` 构造，Content-Type（含 boundary）交给浏览器生成。

use costwise::{FormPart, HttpClient, HttpRequest, HttpResponse, RequestBody, TransportError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response};

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

fn js_error(context: &'static str) -> impl Fn(JsValue) -> TransportError {
    move |e| TransportError::new(format!("{}: {:?}", context, e))
}

/// 把表单字段编码为 `FormData`
fn form_data(parts: &[FormPart]) -> Result<FormData, TransportError> {
    let form = FormData::new().map_err(js_error("创建 FormData 失败"))?;

    for part in parts {
        match part {
            FormPart::Text { name, value } => form
                .append_with_str(name, value)
                .map_err(js_error("写入表单字段失败"))?,
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let chunks = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes.as_slice()));
                let options = BlobPropertyBag::new();
                options.set_type(content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&chunks, &options)
                    .map_err(js_error("创建 Blob 失败"))?;
                form.append_with_blob_and_filename(name, &blob, file_name)
                    .map_err(js_error("写入文件字段失败"))?;
            }
        }
    }

    Ok(form)
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let headers = Headers::new().map_err(js_error("创建 Headers 失败"))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(js_error("设置 Header 失败"))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        match &req.body {
            RequestBody::Empty => {}
            RequestBody::Json(body) => opts.set_body(&JsValue::from_str(body)),
            RequestBody::Multipart(parts) => opts.set_body(&form_data(parts)?.into()),
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(js_error("构建请求失败"))?;

        let window =
            web_sys::window().ok_or_else(|| TransportError::new("无法获取 window 对象"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error("网络请求失败"))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(js_error("Response 类型转换失败"))?;

        let status = response.status();
        let text = JsFuture::from(response.text().map_err(js_error("读取响应体失败"))?)
            .await
            .map_err(js_error("读取响应体失败"))?;

        Ok(HttpResponse::new(status, text.as_string().unwrap_or_default()))
    }
}
