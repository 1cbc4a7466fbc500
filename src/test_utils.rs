//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use serde_json::{
    Map,
    Value,
};

use crate::input::translation::{
    Payload,
    payload_from_json,
};
use crate::service::list::Record;

/// JSON オブジェクトから Payload を作成する
///
/// オブジェクト以外が渡された場合は空の Payload を返す
pub(crate) fn payload(json: &Value) -> Payload {
    payload_from_json(json).unwrap_or_default()
}

/// 従業員データのテスト用レコードを作成する
///
/// # Arguments
/// * `rows` - (name, position) のペア
pub(crate) fn employees(rows: &[(&str, &str)]) -> Vec<Map<String, Value>> {
    rows.iter()
        .map(|(name, position)| {
            let mut record = Map::new();
            record.insert("name".to_string(), Value::String((*name).to_string()));
            record.insert("position".to_string(), Value::String((*position).to_string()));
            record
        })
        .collect()
}

/// レコードの指定フィールドの値を順に取り出す
pub(crate) fn field_values<R: Record>(records: &[R], field: &str) -> Vec<String> {
    records.iter().map(|r| r.field(field).unwrap_or_default().to_string()).collect()
}
