//! 金额类型
//!
//! 服务端以十进制字符串（如 `"12.50"`）传输金额，这里用 [`Decimal`] 保存，
//! 避免浮点误差。

pub use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 货币符号，界面统一以英镑展示
pub const CURRENCY_SYMBOL: &str = "£";

/// 金额
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid amount `{input}`")]
pub struct MoneyParseError {
    input: String,
}

impl Money {
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// 提交给服务端的原始十进制表示（保留用户输入的小数位）
    pub fn to_plain_string(&self) -> String {
        self.0.to_string()
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Decimal::from_str(trimmed)
            .map(Self)
            .map_err(|_| MoneyParseError {
                input: trimmed.to_string(),
            })
    }
}

/// 以两位小数展示，如 `£12.50`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", CURRENCY_SYMBOL, self.0.round_dp(2))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}
