//! 表单草稿
//!
//! 保存用户正在编辑、尚未提交的原始输入。`editing_id` 是区分
//! “创建”与“更新”的唯一状态。

use crate::error::{ClientError, ClientResult};
use crate::items::{ImageUpload, ItemForm};
use costwise_shared::{Item, ItemId, Money, PurchaseDate};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub price: String,
    pub purchase_date: String,
    pub image: Option<ImageUpload>,
    pub editing_id: Option<ItemId>,
}

impl ItemDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// 复制物品的可编辑字段并进入更新模式
    ///
    /// 使用本地缓存的副本，不会重新拉取该物品。已存储的图片保留在服务端，
    /// 只有重新选择文件时才会替换。
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price.to_plain_string(),
            purchase_date: item.purchase_date.to_string(),
            image: None,
            editing_id: Some(item.id),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// 重置表单到初始状态
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// 校验并转换为可提交的表单
    pub fn to_form(&self) -> ClientResult<ItemForm> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ClientError::InvalidDraft("Item name is required".to_string()));
        }
        let price: Money = self
            .price
            .parse()
            .map_err(|_| ClientError::InvalidDraft("Price must be a number".to_string()))?;
        let purchase_date: PurchaseDate = self
            .purchase_date
            .parse()
            .map_err(|_| ClientError::InvalidDraft("Purchase date is required".to_string()))?;

        Ok(ItemForm {
            name: name.to_string(),
            price,
            purchase_date,
            image: self.image.clone(),
        })
    }
}
