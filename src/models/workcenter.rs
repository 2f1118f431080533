// ============================================================================
// WORKCENTER - Stands e iş merkezleri del directorio CANIAS
// ============================================================================

use serde::{Deserialize, Serialize};

use super::string_or_number;

/// Fila cruda de /canias/list-workcenters, agrupada por stand
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RawStand {
    #[serde(rename = "standName", default)]
    pub stand_name: String,
    #[serde(default)]
    pub workcenters: Vec<RawWorkcenter>,
}

/// Fila cruda de iş merkezi tal como la envía el ERP (campos en mayúsculas)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct RawWorkcenter {
    #[serde(rename = "WORKCENTER", default, with = "string_or_number")]
    pub workcenter: String,
    #[serde(rename = "STEXT", default)]
    pub stext: String,
    #[serde(rename = "COMPANY", default, with = "string_or_number")]
    pub company: String,
    #[serde(rename = "PLANT", default, with = "string_or_number")]
    pub plant: String,
    #[serde(rename = "STAND_NAME", default)]
    pub stand_name: String,
    #[serde(rename = "PREDECESSOR", default, with = "string_or_number")]
    pub predecessor: String,
    #[serde(rename = "COSTCENTER", default, with = "string_or_number")]
    pub costcenter: String,
    #[serde(rename = "RESPONSIBLE", default)]
    pub responsible: String,
    #[serde(rename = "STAND", default, with = "string_or_number")]
    pub stand: String,
    #[serde(rename = "WCUSAGE", default, with = "string_or_number")]
    pub wcusage: String,
    #[serde(rename = "VALIDFROM", default)]
    pub valid_from: String,
    #[serde(rename = "VALIDUNTIL", default)]
    pub valid_until: String,
}

/// Nodo agrupador (no seleccionable) del directorio
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Stand {
    pub title: String,
    pub key: String,
    pub workcenters: Vec<WorkCenter>,
}

/// Iş merkezi seleccionable, con los campos ya aplanados para la UI
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct WorkCenter {
    /// Texto mostrado en el selector: "WORKCENTER - STEXT"
    pub title: String,
    /// Valor/key único: "WORKCENTER-COMPANY-PLANT"
    pub value: String,
    /// Código del iş merkezi (lo que esperan los endpoints como workcenterId)
    pub name: String,
    pub description: String,
    pub location: String,
    pub responsible: String,
    pub company: String,
    pub plant: String,
    pub costcenter: String,
    pub valid_from: String,
    pub valid_until: String,
    /// "Aktif" / "Pasif", derivado de WCUSAGE
    pub status: String,
}

/// Transformar la respuesta cruda al árbol stand → iş merkezleri
pub fn transform_workcenters(stands: Vec<RawStand>) -> Vec<Stand> {
    stands
        .into_iter()
        .enumerate()
        .map(|(index, stand)| {
            let title = if stand.stand_name.is_empty() {
                format!("Stand {}", index + 1)
            } else {
                stand.stand_name.clone()
            };
            Stand {
                title,
                key: format!("stand-{}", index),
                workcenters: stand
                    .workcenters
                    .into_iter()
                    .map(WorkCenter::from_raw)
                    .collect(),
            }
        })
        .collect()
}

impl WorkCenter {
    pub fn from_raw(raw: RawWorkcenter) -> Self {
        let status = if raw.wcusage == "0" { "Pasif" } else { "Aktif" };
        Self {
            title: format!("{} - {}", raw.workcenter, raw.stext),
            value: format!("{}-{}-{}", raw.workcenter, raw.company, raw.plant),
            name: raw.workcenter,
            description: raw.stext,
            location: raw.stand_name,
            responsible: raw.responsible,
            company: raw.company,
            plant: raw.plant,
            costcenter: raw.costcenter,
            valid_from: raw.valid_from,
            valid_until: raw.valid_until,
            status: status.to_string(),
        }
    }
}

/// Buscar un iş merkezi por su value ("WORKCENTER-COMPANY-PLANT") en el árbol
pub fn find_workcenter<'a>(stands: &'a [Stand], value: &str) -> Option<&'a WorkCenter> {
    stands
        .iter()
        .flat_map(|s| s.workcenters.iter())
        .find(|wc| wc.value == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(code: &str, stext: &str, company: &str, plant: &str) -> RawWorkcenter {
        RawWorkcenter {
            workcenter: code.to_string(),
            stext: stext.to_string(),
            company: company.to_string(),
            plant: plant.to_string(),
            wcusage: "1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn arbol_con_titulos_y_keys() {
        let stands = vec![RawStand {
            stand_name: "Pres Hattı".to_string(),
            workcenters: vec![raw("WC01", "Pres 250T", "01", "01")],
        }];
        let tree = transform_workcenters(stands);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].key, "stand-0");
        assert_eq!(tree[0].title, "Pres Hattı");
        assert_eq!(tree[0].workcenters[0].title, "WC01 - Pres 250T");
        assert_eq!(tree[0].workcenters[0].value, "WC01-01-01");
        assert_eq!(tree[0].workcenters[0].status, "Aktif");
    }

    #[test]
    fn stand_sin_nombre_usa_indice() {
        let stands = vec![
            RawStand { stand_name: String::new(), workcenters: vec![] },
            RawStand { stand_name: String::new(), workcenters: vec![] },
        ];
        let tree = transform_workcenters(stands);
        assert_eq!(tree[0].title, "Stand 1");
        assert_eq!(tree[1].title, "Stand 2");
    }

    #[test]
    fn busqueda_por_value() {
        let tree = transform_workcenters(vec![RawStand {
            stand_name: "A".to_string(),
            workcenters: vec![raw("WC01", "X", "01", "01"), raw("WC02", "Y", "01", "01")],
        }]);
        let found = find_workcenter(&tree, "WC02-01-01").expect("debe existir");
        assert_eq!(found.name, "WC02");
        assert!(find_workcenter(&tree, "WC99-01-01").is_none());
    }

    #[test]
    fn wcusage_cero_es_pasif() {
        let mut r = raw("WC01", "X", "01", "01");
        r.wcusage = "0".to_string();
        assert_eq!(WorkCenter::from_raw(r).status, "Pasif");
    }

    #[test]
    fn deserializa_campos_numericos_como_string() {
        let json = r#"{"WORKCENTER":"WC01","STEXT":"Pres","COMPANY":1,"PLANT":"01","WCUSAGE":1}"#;
        let raw: RawWorkcenter = serde_json::from_str(json).unwrap();
        assert_eq!(raw.company, "1");
        assert_eq!(raw.wcusage, "1");
    }
}
