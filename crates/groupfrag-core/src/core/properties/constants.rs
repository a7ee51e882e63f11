use crate::core::catalog::descriptor::GroupId;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

const JOBACK_GROUPS: &str = include_str!("../../../data/joback_groups.csv");

/// Tabulated Joback contributions of one group. Empty cells are `None`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroupConstants {
    pub id: GroupId,
    pub symbol: String,
    pub tc: Option<f64>,
    pub pc: Option<f64>,
    pub vc: Option<f64>,
    pub tb: Option<f64>,
    pub tm: Option<f64>,
    pub hform: Option<f64>,
    pub gform: Option<f64>,
    pub cpa: Option<f64>,
    pub cpb: Option<f64>,
    pub cpc: Option<f64>,
    pub cpd: Option<f64>,
    pub hfus: Option<f64>,
    pub hvap: Option<f64>,
    pub mua: Option<f64>,
    pub mub: Option<f64>,
}

#[derive(Debug, Error)]
pub enum ConstantsLoadError {
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Group {group} appears more than once in '{path}'")]
    DuplicateGroup { path: String, group: GroupId },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupConstantsTable {
    groups: BTreeMap<GroupId, GroupConstants>,
}

impl GroupConstantsTable {
    pub fn load(path: &Path) -> Result<Self, ConstantsLoadError> {
        let origin = path.to_string_lossy().to_string();
        let reader = csv::Reader::from_path(path).map_err(|e| ConstantsLoadError::Csv {
            path: origin.clone(),
            source: e,
        })?;
        Self::collect(reader, &origin)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConstantsLoadError> {
        Self::collect(csv::Reader::from_reader(reader), "<reader>")
    }

    /// The Joback contribution table for the 41 standard groups.
    pub fn joback() -> Result<Self, ConstantsLoadError> {
        Self::collect(
            csv::Reader::from_reader(JOBACK_GROUPS.as_bytes()),
            "<embedded joback table>",
        )
    }

    fn collect<R: Read>(mut reader: csv::Reader<R>, origin: &str) -> Result<Self, ConstantsLoadError> {
        let mut groups = BTreeMap::new();
        for result in reader.deserialize::<GroupConstants>() {
            let record = result.map_err(|e| ConstantsLoadError::Csv {
                path: origin.to_string(),
                source: e,
            })?;
            let id = record.id;
            if groups.insert(id, record).is_some() {
                return Err(ConstantsLoadError::DuplicateGroup {
                    path: origin.to_string(),
                    group: id,
                });
            }
        }
        Ok(Self { groups })
    }

    pub fn get(&self, id: GroupId) -> Option<&GroupConstants> {
        self.groups.get(&id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
