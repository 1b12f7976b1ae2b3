use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub mod date;
pub mod money;
pub mod protocol;

pub use date::{DateParseError, PurchaseDate};
pub use money::{Money, MoneyParseError};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
/// 认证服务签发的 token 使用 `Token <key>` 方案，而不是 `Bearer`
pub const TOKEN_SCHEME: &str = "Token";

/// 构造 `Authorization` 头的值
pub fn authorization_value(token: &str) -> String {
    format!("{} {}", TOKEN_SCHEME, token)
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 物品 ID，由服务端分配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 服务端返回的物品记录
///
/// `cost_per_day` 完全由服务端根据价格和持有天数计算，客户端只负责展示。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub price: Money,
    pub purchase_date: PurchaseDate,
    /// 图片 URL（服务端存储），可能为空
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub cost_per_day: Option<Money>,
}

// =========================================================
// 认证载荷 (Auth Payloads)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub auth_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub re_password: String,
}

/// 注册成功后服务端返回的用户记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredUser {
    #[serde(default)]
    pub id: Option<u64>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

// =========================================================
// 字段错误 (Field Errors)
// =========================================================

/// 服务端校验失败时返回的 `{field: [messages]}` 结构
///
/// 单个字段的值既可能是字符串数组，也可能是单个字符串，两种形式都接受。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

/// 展示单条消息时的字段优先级，其余字段按字母序排在后面
const FIELD_PRIORITY: [&str; 4] = ["username", "password", "re_password", "non_field_errors"];

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// 按固定优先级取出第一条消息
    pub fn first_message(&self) -> Option<&str> {
        let prioritized = FIELD_PRIORITY.iter().filter_map(|field| self.0.get(*field));
        let rest = self
            .0
            .iter()
            .filter(|(field, _)| !FIELD_PRIORITY.contains(&field.as_str()))
            .map(|(_, messages)| messages);

        prioritized
            .chain(rest)
            .find_map(|messages| messages.first())
            .map(String::as_str)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Messages {
    Many(Vec<String>),
    One(String),
}

impl<'de> Deserialize<'de> for FieldErrors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Messages>::deserialize(deserializer)?;
        let map = raw
            .into_iter()
            .map(|(field, messages)| match messages {
                Messages::Many(list) => (field, list),
                Messages::One(single) => (field, vec![single]),
            })
            .collect();
        Ok(Self(map))
    }
}
