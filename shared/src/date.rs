//! 购买日期类型
//!
//! 表单中的 `<input type="date">` 与服务端都使用 `YYYY-MM-DD` 格式，
//! 这里统一解析与输出。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 购买日期（无时区的日历日期）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseDate(NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date `{input}`, expected YYYY-MM-DD")]
pub struct DateParseError {
    input: String,
}

impl PurchaseDate {
    #[inline]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// 由年月日构造，非法日期返回 None
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    #[inline]
    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for PurchaseDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(Self)
            .map_err(|_| DateParseError {
                input: trimmed.to_string(),
            })
    }
}

impl fmt::Display for PurchaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl From<NaiveDate> for PurchaseDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let date: PurchaseDate = "2024-01-01".parse().unwrap();
        assert_eq!(date, PurchaseDate::from_ymd(2024, 1, 1).unwrap());
        assert_eq!(date.to_string(), "2024-01-01");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(" 2023-12-31 ".parse::<PurchaseDate>().is_ok());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<PurchaseDate>().is_err());
        assert!("31/12/2023".parse::<PurchaseDate>().is_err());
        assert!("2023-02-30".parse::<PurchaseDate>().is_err());
    }
}
