//! 公开站点使用的房源目录
//!
//! 自动化后端返回两张平铺的表：`kost`（房源）和 `kamar`（房间，通过
//! `id_kost` 关联到房源）。这里的发布与可用状态过滤规则与站点渲染卡片、
//! 房间下拉框时一致。

use serde::{Deserialize, Serialize};
use serde_json::Value;

const PUBLISHED_STATUSES: [&str; 4] = ["publish", "published", "true", "1"];
const AVAILABLE_STATUS: &str = "tersedia";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listings {
    pub kost: Vec<Value>,
    pub kamar: Vec<Value>,
}

/// 一个已发布的房源及其房间
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingGroup<'a> {
    pub kost: &'a Value,
    pub kamar: Vec<&'a Value>,
}

impl Listings {
    /// 同时接受裸的 `{kost, kamar}` 和完整的成功信封
    pub fn from_response(raw: &Value) -> Self {
        if raw.get("kost").is_some_and(Value::is_array)
            || raw.get("kamar").is_some_and(Value::is_array)
        {
            return Self::from_sheets(raw);
        }

        if raw.get("success") == Some(&Value::Bool(true)) {
            if let Some(data) = raw.get("data").filter(|d| !d.is_null()) {
                return Self::from_sheets(data);
            }
        }

        Self::default()
    }

    fn from_sheets(value: &Value) -> Self {
        let rows = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        };

        Self {
            kost: rows("kost"),
            kamar: rows("kamar"),
        }
    }

    pub fn published_kost(&self) -> Vec<&Value> {
        self.kost
            .iter()
            .filter(|row| PUBLISHED_STATUSES.contains(&normalize_status(row.get("status_publish")).as_str()))
            .collect()
    }

    pub fn available_rooms(&self) -> Vec<&Value> {
        self.kamar
            .iter()
            .filter(|row| normalize_status(row.get("status_ketersediaan")) == AVAILABLE_STATUS)
            .collect()
    }

    pub fn rooms_for(&self, kost_id: &str) -> Vec<&Value> {
        let kost_id = kost_id.trim();
        self.kamar
            .iter()
            .filter(|room| cell_text(room.get("id_kost")).trim() == kost_id)
            .collect()
    }

    pub fn grouped(&self) -> Vec<ListingGroup<'_>> {
        self.published_kost()
            .into_iter()
            .map(|kost| ListingGroup {
                kost,
                kamar: self.rooms_for(&cell_text(kost.get("id_kost"))),
            })
            .collect()
    }
}

fn normalize_status(value: Option<&Value>) -> String {
    cell_text(value).trim().to_lowercase()
}

/// 表格单元格可能是字符串、数字或布尔值
fn cell_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
