//! Compound records as returned by the backend and shown in tables

use crate::client::{DescriptorSet, PredictionResponse};
use serde::{Deserialize, Serialize};

/// One bioactivity row from the backend dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BioactivityRow {
    pub activity_id: i64,
    pub mw_freebase: f64,
    pub alogp: f64,
    pub psa: f64,
    pub hbd: u32,
    pub hba: u32,
    pub rtb: u32,
    /// 0/1 experimental activity flag thresholded on pChEMBL
    pub is_active: u8,
    pub compound_id: String,
    pub target_name: String,
}

impl Default for BioactivityRow {
    fn default() -> Self {
        Self {
            activity_id: 0,
            mw_freebase: 0.0,
            alogp: 0.0,
            psa: 0.0,
            hbd: 0,
            hba: 0,
            rtb: 0,
            is_active: 0,
            compound_id: String::new(),
            target_name: String::new(),
        }
    }
}

/// A compound record ready for display
///
/// Built from a [`BioactivityRow`]; the prediction fields start as
/// placeholders mirroring the experimental flag and are overwritten once the
/// backend model has been consulted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Compound {
    pub compound_id: String,
    pub target_name: String,
    pub mol_weight: f64,
    pub log_p: f64,
    pub tpsa: f64,
    pub hbd: u32,
    pub hba: u32,
    pub rotatable_bonds: u32,
    pub is_active: bool,
    pub predicted_active: bool,
    pub confidence: f64,
}

impl From<BioactivityRow> for Compound {
    fn from(row: BioactivityRow) -> Self {
        let is_active = row.is_active == 1;
        Self {
            compound_id: row.compound_id,
            target_name: row.target_name,
            mol_weight: row.mw_freebase,
            log_p: row.alogp,
            tpsa: row.psa,
            hbd: row.hbd,
            hba: row.hba,
            rotatable_bonds: row.rtb,
            is_active,
            predicted_active: is_active,
            confidence: 0.0,
        }
    }
}

impl Compound {
    /// The molecular descriptors the prediction models take as input
    pub fn descriptors(&self) -> DescriptorSet {
        DescriptorSet {
            mw_freebase: self.mol_weight,
            alogp: self.log_p,
            psa: self.tpsa,
            hbd: self.hbd,
            hba: self.hba,
            rtb: self.rotatable_bonds,
        }
    }

    pub fn apply_prediction(&mut self, prediction: &PredictionResponse) {
        self.predicted_active = prediction.is_active();
        self.confidence = prediction.probability;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_row() -> BioactivityRow {
        BioactivityRow {
            activity_id: 7,
            mw_freebase: 312.4,
            alogp: 2.1,
            psa: 88.0,
            hbd: 2,
            hba: 5,
            rtb: 4,
            is_active: 1,
            compound_id: "CHEMBL1201".to_string(),
            target_name: "Beta-Secretase 1".to_string(),
        }
    }

    #[test]
    fn test_prediction_placeholder_mirrors_experimental_flag() {
        let compound = Compound::from(test_row());
        assert!(compound.is_active);
        assert!(compound.predicted_active);
        assert_eq!(compound.confidence, 0.0);
    }

    #[test]
    fn test_apply_prediction_overwrites_placeholder() {
        let mut compound = Compound::from(test_row());
        compound.apply_prediction(&PredictionResponse {
            model: "xgboost".to_string(),
            prediction: "Inactive".to_string(),
            probability: 0.73,
        });
        assert!(!compound.predicted_active);
        assert_eq!(compound.confidence, 0.73);
    }

    #[test]
    fn test_row_deserializes_with_missing_fields() {
        let row: BioactivityRow =
            serde_json::from_str(r#"{"compound_id":"CHEMBL99","mw_freebase":210.0}"#).unwrap();
        assert_eq!(row.compound_id, "CHEMBL99");
        assert_eq!(row.is_active, 0);
    }
}
