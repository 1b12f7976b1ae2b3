//! 物品 API 客户端
//!
//! 四个操作都附带 `Authorization: Token <token>`，既不重试也不预先检查 token，
//! 过期的 token 只会表现为服务端返回的 HTTP 失败。

use crate::api::{ServiceClient, decode};
use crate::error::{ClientError, ClientResult};
use crate::request::{FormPart, HttpClient};
use crate::session::AuthToken;
use costwise_shared::protocol::{CreateItem, DeleteItem, ListItems, UpdateItem};
use costwise_shared::{Item, ItemId, Money, PurchaseDate};
use tracing::warn;

/// 用户选择的图片文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// 已校验、可直接提交的物品表单
#[derive(Debug, Clone, PartialEq)]
pub struct ItemForm {
    pub name: String,
    pub price: Money,
    pub purchase_date: PurchaseDate,
    pub image: Option<ImageUpload>,
}

impl ItemForm {
    /// 编码为 multipart 字段；未选择图片时省略 `image` 字段
    pub fn to_parts(&self) -> Vec<FormPart> {
        let mut parts = vec![
            FormPart::text("name", self.name.clone()),
            FormPart::text("price", self.price.to_plain_string()),
            FormPart::text("purchase_date", self.purchase_date.to_string()),
        ];
        if let Some(image) = &self.image {
            parts.push(FormPart::File {
                name: "image".to_string(),
                file_name: image.file_name.clone(),
                content_type: image.content_type.clone(),
                bytes: image.bytes.clone(),
            });
        }
        parts
    }
}

#[derive(Clone)]
pub struct ItemsApi<C> {
    service: ServiceClient<C>,
}

impl<C: HttpClient> ItemsApi<C> {
    pub fn new(service: ServiceClient<C>) -> Self {
        Self { service }
    }

    /// 获取物品列表（保持服务端顺序）
    pub async fn list(&self, token: &AuthToken) -> ClientResult<Vec<Item>> {
        let req = self.service.request(&ListItems, Some(token));
        let resp = self.service.execute(req).await?;

        if !resp.ok() {
            warn!(status = resp.status, "list items failed");
            return Err(ClientError::FetchError {
                status: resp.status,
            });
        }

        decode::<ListItems>(&resp)
    }

    /// 创建物品
    pub async fn create(&self, token: &AuthToken, form: &ItemForm) -> ClientResult<Item> {
        let req = self
            .service
            .request(&CreateItem, Some(token))
            .with_multipart(form.to_parts());
        let resp = self.service.execute(req).await?;

        if !resp.ok() {
            warn!(status = resp.status, "create item failed");
            return Err(ClientError::CreateError {
                status: resp.status,
            });
        }

        decode::<CreateItem>(&resp)
    }

    /// 整体替换物品（非部分更新）
    pub async fn update(&self, token: &AuthToken, id: ItemId, form: &ItemForm) -> ClientResult<()> {
        let req = self
            .service
            .request(&UpdateItem { id }, Some(token))
            .with_multipart(form.to_parts());
        let resp = self.service.execute(req).await?;

        if !resp.ok() {
            warn!(status = resp.status, %id, "update item failed");
            return Err(ClientError::UpdateError {
                status: resp.status,
            });
        }
        Ok(())
    }

    /// 删除物品
    pub async fn delete(&self, token: &AuthToken, id: ItemId) -> ClientResult<()> {
        let req = self.service.request(&DeleteItem { id }, Some(token));
        let resp = self.service.execute(req).await?;

        if !resp.ok() {
            warn!(status = resp.status, %id, "delete item failed");
            return Err(ClientError::DeleteError {
                status: resp.status,
            });
        }
        Ok(())
    }
}
