use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extract::{BaselineRecord, PredictionsRecord, ValidationRecord};

/// Operator-editable facts about one service visit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceMetadata {
    pub sensor_id: String,
    pub date: String,
    pub technician: String,
    pub client: String,
    pub location: String,
    pub model: String,
    pub context: String,
    pub notes: String,
    pub maintenance_performed: bool,
    pub baseline_adjusted: bool,
    pub optical_validation_performed: bool,
    pub predictions_performed: bool,
    pub reference_lamp: String,
    pub new_lamp: String,
}

/// Metadata fields a report can contribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Contribution {
    sensor_id: Option<String>,
    date: Option<String>,
    technician: Option<String>,
    client: Option<String>,
    location: Option<String>,
    model: Option<String>,
}

impl ServiceMetadata {
    /// Fills empty fields from the extracted reports.
    ///
    /// Sources are tried baseline, validation, predictions; each one only
    /// fills fields still empty, and the search stops at the first source
    /// that provided a sensor id.
    pub fn autofill(
        &mut self,
        baseline: Option<&BaselineRecord>,
        validation: Option<&ValidationRecord>,
        predictions: Option<&PredictionsRecord>,
    ) {
        let contributions = [
            baseline.map(from_baseline),
            validation.map(from_validation),
            predictions.map(from_predictions),
        ];

        for contribution in contributions.into_iter().flatten() {
            let has_sensor_id = contribution
                .sensor_id
                .as_deref()
                .is_some_and(|value| !value.trim().is_empty());
            self.apply(contribution);
            if has_sensor_id {
                break;
            }
        }

        debug!(sensor_id = %self.sensor_id, date = %self.date, "service metadata auto-filled");
    }

    pub fn from_reports(
        baseline: Option<&BaselineRecord>,
        validation: Option<&ValidationRecord>,
        predictions: Option<&PredictionsRecord>,
    ) -> Self {
        let mut metadata = Self::default();
        metadata.autofill(baseline, validation, predictions);
        metadata
    }

    fn apply(&mut self, contribution: Contribution) {
        fill(&mut self.sensor_id, contribution.sensor_id);
        fill(&mut self.date, contribution.date);
        fill(&mut self.technician, contribution.technician);
        fill(&mut self.client, contribution.client);
        fill(&mut self.location, contribution.location);
        fill(&mut self.model, contribution.model);
    }

    pub fn has_maintenance_context(&self) -> bool {
        self.maintenance_performed
            || self.baseline_adjusted
            || self.optical_validation_performed
            || self.predictions_performed
            || !self.reference_lamp.is_empty()
            || !self.new_lamp.is_empty()
    }
}

fn fill(slot: &mut String, value: Option<String>) {
    if slot.is_empty()
        && let Some(value) = value.filter(|value| !value.trim().is_empty())
    {
        *slot = value;
    }
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

fn from_baseline(record: &BaselineRecord) -> Contribution {
    let info = &record.client_info;
    Contribution {
        sensor_id: owned(record.sensor_id()),
        date: owned(info.get_any(&["Fecha del Informe", "Fecha"])),
        technician: owned(info.get("Técnico")),
        client: owned(info.get_any(&["Cliente", "Empresa"])),
        location: owned(info.get("Ubicación")),
        model: owned(info.get("Modelo")),
    }
}

fn from_validation(record: &ValidationRecord) -> Contribution {
    let info = &record.service_info;
    Contribution {
        sensor_id: owned(record.sensor_id()),
        date: owned(info.get("Fecha del Informe")),
        client: owned(info.get("Cliente")),
        model: owned(info.get("Modelo del Equipo")),
        ..Contribution::default()
    }
}

fn from_predictions(record: &PredictionsRecord) -> Contribution {
    Contribution {
        sensor_id: owned(record.sensor_id()),
        date: owned(record.general.report_date()),
        ..Contribution::default()
    }
}
