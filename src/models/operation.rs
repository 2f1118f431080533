// ============================================================================
// OPERATION - İş emirleri (confirmaciones) de un iş merkezi
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::format_date_time;

/// Estado derivado de los flags STATUS3/STATUS4 del ERP.
/// No confundir con el código de transacción que devuelven los endpoints de
/// producción: son dos modelos distintos que pueden discrepar y la
/// habilitación de botones usa solo el segundo.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum DisplayStatus {
    New,
    Started,
    Pending,
    Completed,
}

impl DisplayStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayStatus::New => "Yeni",
            DisplayStatus::Started => "Başladı",
            DisplayStatus::Pending => "Beklemede",
            DisplayStatus::Completed => "Tamamlandı",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            DisplayStatus::New => "#722ed1",
            DisplayStatus::Started => "#1890ff",
            DisplayStatus::Pending => "#faad14",
            DisplayStatus::Completed => "#52c41a",
        }
    }
}

/// Mapeo fijo (STATUS3, STATUS4) → estado mostrado
pub fn derive_status(status3: &str, status4: &str) -> DisplayStatus {
    match (status3, status4) {
        ("1", "0") => DisplayStatus::Started,
        ("0", "1") => DisplayStatus::Pending,
        ("1", "1") => DisplayStatus::Completed,
        _ => DisplayStatus::New,
    }
}

/// Fila cruda de data.TBLRETURN.ROW tal como la envía el ERP
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct RawOperation {
    #[serde(rename = "PRDORDER", default, with = "string_or_number")]
    pub prd_order: String,
    #[serde(rename = "CONFIRMATION", default, with = "string_or_number")]
    pub confirmation: String,
    #[serde(rename = "MATERIAL", default, with = "string_or_number")]
    pub material: String,
    #[serde(rename = "STEXT", default)]
    pub stext: String,
    #[serde(rename = "TARGETOUT", default, with = "string_or_number")]
    pub target_out: String,
    #[serde(rename = "TARGETSTART", default)]
    pub target_start: String,
    #[serde(rename = "TARGETEND", default)]
    pub target_end: String,
    #[serde(rename = "STATUS2", default, with = "string_or_number")]
    pub status2: String,
    #[serde(rename = "STATUS3", default, with = "string_or_number")]
    pub status3: String,
    #[serde(rename = "STATUS4", default, with = "string_or_number")]
    pub status4: String,
    #[serde(rename = "OPERATION", default, with = "string_or_number")]
    pub operation: String,
    #[serde(rename = "BOMLEVEL", default, with = "string_or_number")]
    pub bom_level: String,
    #[serde(rename = "POTYPE", default, with = "string_or_number")]
    pub po_type: String,
    #[serde(rename = "WORKCENTER", default, with = "string_or_number")]
    pub workcenter: String,
    #[serde(rename = "COMPANY", default, with = "string_or_number")]
    pub company: String,
    #[serde(rename = "PLANT", default, with = "string_or_number")]
    pub plant: String,
    #[serde(rename = "CAPGRP", default, with = "string_or_number")]
    pub capgrp: String,
    #[serde(rename = "CONFIRMPOS", default, with = "string_or_number")]
    pub confirm_pos: String,
    #[serde(rename = "OPENDATE", default)]
    pub open_date: String,
    #[serde(rename = "RETVALUE", default, with = "string_or_number")]
    pub ret_value: String,
    #[serde(rename = "ISCOMBINED", default, with = "string_or_number")]
    pub is_combined: String,
    #[serde(rename = "ISEXTERN", default, with = "string_or_number")]
    pub is_extern: String,
}

/// Fila de iş emri transformada para la tabla y la persistencia local
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct OperationRow {
    pub key: String,
    pub prd_order: String,
    pub confirmation: String,
    pub material: String,
    pub stext: String,
    pub target_out: String,
    pub target_start: String,
    pub target_end: String,
    pub status: DisplayStatus,
    pub status3: String,
    pub status4: String,
    pub operation: String,
    pub bom_level: String,
    pub po_type: String,
    pub workcenter: String,
    pub confirm_pos: String,
    pub open_date: String,
}

impl OperationRow {
    fn from_raw(raw: RawOperation, index: usize) -> Self {
        let key = if !raw.confirmation.is_empty() {
            raw.confirmation.clone()
        } else if !raw.prd_order.is_empty() {
            raw.prd_order.clone()
        } else {
            format!("op-{}", index)
        };
        let status = derive_status(&raw.status3, &raw.status4);
        Self {
            key,
            prd_order: raw.prd_order,
            confirmation: raw.confirmation,
            material: raw.material,
            stext: raw.stext,
            target_out: raw.target_out,
            target_start: raw.target_start,
            target_end: raw.target_end,
            status,
            status3: raw.status3,
            status4: raw.status4,
            operation: raw.operation,
            bom_level: raw.bom_level,
            po_type: raw.po_type,
            workcenter: raw.workcenter,
            confirm_pos: raw.confirm_pos,
            open_date: raw.open_date,
        }
    }

    pub fn target_start_display(&self) -> String {
        format_date_time(&self.target_start)
    }

    pub fn target_end_display(&self) -> String {
        format_date_time(&self.target_end)
    }
}

/// Transformar filas crudas en filas de tabla
pub fn transform_operations(rows: Vec<RawOperation>) -> Vec<OperationRow> {
    rows.into_iter()
        .enumerate()
        .map(|(index, raw)| OperationRow::from_raw(raw, index))
        .collect()
}

/// Extraer las filas de `data`. El ERP es inconsistente: TBLRETURN puede
/// faltar, ser el string vacío, traer un ROW único o un array de ROWs.
pub fn parse_operation_rows(data: &Value) -> Vec<RawOperation> {
    let Some(tblreturn) = data.get("TBLRETURN") else {
        return Vec::new();
    };
    let Some(row) = tblreturn.get("ROW") else {
        return Vec::new();
    };
    match row {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        Value::Object(_) => serde_json::from_value(row.clone())
            .map(|single| vec![single])
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Cache persistido de operaciones con timestamp (para diagnóstico de frescura)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct OperationsCache {
    pub operations: Vec<OperationRow>,
    pub saved_at: String,
}

impl OperationsCache {
    pub fn new(operations: Vec<OperationRow>) -> Self {
        Self {
            operations,
            saved_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mapeo_de_estados_completo() {
        assert_eq!(derive_status("1", "0"), DisplayStatus::Started);
        assert_eq!(derive_status("0", "1"), DisplayStatus::Pending);
        assert_eq!(derive_status("1", "1"), DisplayStatus::Completed);
        // Cualquier par no mapeado cae a Yeni
        assert_eq!(derive_status("0", "0"), DisplayStatus::New);
        assert_eq!(derive_status("", ""), DisplayStatus::New);
        assert_eq!(derive_status("2", "1"), DisplayStatus::New);
        assert_eq!(derive_status("1", "2"), DisplayStatus::New);
    }

    #[test]
    fn etiquetas_turcas() {
        assert_eq!(DisplayStatus::Started.label(), "Başladı");
        assert_eq!(DisplayStatus::Pending.label(), "Beklemede");
        assert_eq!(DisplayStatus::Completed.label(), "Tamamlandı");
        assert_eq!(DisplayStatus::New.label(), "Yeni");
    }

    #[test]
    fn key_usa_confirmation_luego_prdorder_luego_indice() {
        let rows = vec![
            RawOperation {
                confirmation: "C100".to_string(),
                prd_order: "P1".to_string(),
                ..Default::default()
            },
            RawOperation { prd_order: "P2".to_string(), ..Default::default() },
            RawOperation::default(),
        ];
        let transformed = transform_operations(rows);
        assert_eq!(transformed[0].key, "C100");
        assert_eq!(transformed[1].key, "P2");
        assert_eq!(transformed[2].key, "op-2");
    }

    #[test]
    fn tblreturn_vacio_o_ausente_da_lista_vacia() {
        assert!(parse_operation_rows(&json!({})).is_empty());
        assert!(parse_operation_rows(&json!({ "TBLRETURN": "" })).is_empty());
        assert!(parse_operation_rows(&json!({ "TBLRETURN": { } })).is_empty());
    }

    #[test]
    fn row_unico_se_trata_como_lista_de_uno() {
        let data = json!({ "TBLRETURN": { "ROW": { "CONFIRMATION": "C100", "STATUS3": "1", "STATUS4": "0" } } });
        let rows = parse_operation_rows(&data);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].confirmation, "C100");
    }

    #[test]
    fn array_de_rows_con_numeros() {
        let data = json!({ "TBLRETURN": { "ROW": [
            { "CONFIRMATION": 100, "PRDORDER": 555, "OPERATION": 10, "BOMLEVEL": 0, "STATUS3": "1", "STATUS4": "1" },
            { "CONFIRMATION": "C200", "STATUS3": "0", "STATUS4": "1" }
        ] } });
        let rows = transform_operations(parse_operation_rows(&data));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].confirmation, "100");
        assert_eq!(rows[0].operation, "10");
        assert_eq!(rows[0].status, DisplayStatus::Completed);
        assert_eq!(rows[1].status, DisplayStatus::Pending);
    }

    #[test]
    fn escenario_wc01_c100_empieza() {
        // Una fila con STATUS3=1/STATUS4=0 se muestra como Başladı
        let data = json!({ "TBLRETURN": { "ROW": { "CONFIRMATION": "C100", "STATUS3": "1", "STATUS4": "0", "WORKCENTER": "WC01" } } });
        let rows = transform_operations(parse_operation_rows(&data));
        assert_eq!(rows[0].status.label(), "Başladı");
    }
}

/// Deserializador tolerante: acepta string, número o null donde el ERP
/// no es consistente con los tipos
pub(crate) mod string_or_number {
    use serde::de::{self, Deserializer, Visitor};
    use serde::Serializer;
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        struct StringOrNumber;

        impl<'de> Visitor<'de> for StringOrNumber {
            type Value = String;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("string, número o null")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_unit<E: de::Error>(self) -> Result<String, E> {
                Ok(String::new())
            }

            fn visit_none<E: de::Error>(self) -> Result<String, E> {
                Ok(String::new())
            }
        }

        deserializer.deserialize_any(StringOrNumber)
    }
}
