//! 文件读取
//!
//! 把 `<input type="file">` 选中的文件读成字节，供 multipart 上传使用。

use costwise::{ImageUpload, TransportError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, HtmlInputElement};

/// 取出 change 事件对应输入框中的第一个文件
pub fn selected_file(ev: &Event) -> Option<File> {
    let input: HtmlInputElement = ev.target()?.dyn_into().ok()?;
    input.files()?.get(0)
}

/// 读取整个文件
pub async fn read_upload(file: File) -> Result<ImageUpload, TransportError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| TransportError::new(format!("读取文件失败: {:?}", e)))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    Ok(ImageUpload {
        file_name: file.name(),
        content_type: file.type_(),
        bytes,
    })
}
