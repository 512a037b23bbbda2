use serde::{Deserialize, Serialize};

use super::form::{optional_text, Checker, FieldSpec, FormDraft, QueryFilter, ValidationError};
use super::window::TimeWindow;
use super::Resource;

/// A rate rule keyed by vehicle type, sub-type, distance range and optional time slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    #[serde(alias = "_id")]
    pub id: String,
    pub vehicle_type: String,
    #[serde(default)]
    pub sub_type: String,
    pub min_km: f64,
    pub max_km: f64,
    /// Rate per kilometre.
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<TimeWindow>,
}

/// Create/update payload for a price entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PriceDraft {
    pub vehicle_type: String,
    #[serde(default)]
    pub sub_type: String,
    pub min_km: f64,
    pub max_km: f64,
    pub rate: f64,
    /// Sent as `null` when cleared so an update removes the stored window.
    #[serde(default)]
    pub time_slot: Option<TimeWindow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PriceFilter {
    pub vehicle_type: Option<String>,
    pub sub_type: Option<String>,
}

impl Resource for Price {
    type Draft = PriceDraft;
    type Filter = PriceFilter;

    const COLLECTION: &'static str = "prices";
    const LABEL: &'static str = "price";

    fn id(&self) -> &str {
        &self.id
    }

    fn to_draft(&self) -> PriceDraft {
        PriceDraft {
            vehicle_type: self.vehicle_type.clone(),
            sub_type: self.sub_type.clone(),
            min_km: self.min_km,
            max_km: self.max_km,
            rate: self.rate,
            time_slot: self.time_slot.clone(),
        }
    }
}

const PRICE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("vehicleType", "Vehicle type", "bike, auto, car, truck"),
    FieldSpec::optional("subType", "Sub-type", "mini, sedan, suv"),
    FieldSpec::required("minKm", "Min km", "0"),
    FieldSpec::required("maxKm", "Max km", "10"),
    FieldSpec::required("rate", "Rate / km", "12.5"),
    FieldSpec::optional("timeSlot", "Time slot", "HH:MM-HH:MM"),
];

impl FormDraft for PriceDraft {
    fn fields() -> &'static [FieldSpec] {
        PRICE_FIELDS
    }

    /// Presence and range checks applied before anything is sent.
    fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::default();
        if self.vehicle_type.trim().is_empty() {
            check.fail("vehicleType", "is required");
        }
        for (field, value) in [("minKm", self.min_km), ("maxKm", self.max_km), ("rate", self.rate)] {
            if !value.is_finite() || value < 0.0 {
                check.fail(field, "must be a non-negative number");
            }
        }
        if self.min_km > self.max_km {
            check.fail("maxKm", "must not be below min km");
        }
        check.finish(())
    }

    fn to_values(&self) -> Vec<String> {
        vec![
            self.vehicle_type.clone(),
            self.sub_type.clone(),
            self.min_km.to_string(),
            self.max_km.to_string(),
            self.rate.to_string(),
            self.time_slot.as_ref().map(ToString::to_string).unwrap_or_default(),
        ]
    }

    fn from_values(values: &[String]) -> Result<Self, ValidationError> {
        let mut check = Checker::default();
        let vehicle_type = check.required("vehicleType", values.first());
        let sub_type = optional_text(values.get(1)).unwrap_or_default();
        let min_km = check.number("minKm", values.get(2));
        let max_km = check.number("maxKm", values.get(3));
        let rate = check.number("rate", values.get(4));
        let time_slot = match optional_text(values.get(5)) {
            Some(text) => {
                let parsed = TimeWindow::parse(&text);
                if parsed.is_none() {
                    check.fail("timeSlot", "must look like HH:MM-HH:MM");
                }
                parsed
            }
            None => None,
        };
        if min_km > max_km {
            check.fail("maxKm", "must not be below min km");
        }
        check.finish(PriceDraft {
            vehicle_type,
            sub_type,
            min_km,
            max_km,
            rate,
            time_slot,
        })
    }
}

const PRICE_FILTER_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("vehicleType", "Vehicle type", "any"),
    FieldSpec::optional("subType", "Sub-type", "any"),
];

impl FormDraft for PriceFilter {
    fn fields() -> &'static [FieldSpec] {
        PRICE_FILTER_FIELDS
    }

    fn to_values(&self) -> Vec<String> {
        vec![
            self.vehicle_type.clone().unwrap_or_default(),
            self.sub_type.clone().unwrap_or_default(),
        ]
    }

    fn from_values(values: &[String]) -> Result<Self, ValidationError> {
        Ok(PriceFilter {
            vehicle_type: optional_text(values.first()),
            sub_type: optional_text(values.get(1)),
        })
    }
}

impl QueryFilter for PriceFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(v) = self.vehicle_type.as_deref().filter(|v| !v.is_empty()) {
            pairs.push(("vehicleType", v.to_string()));
        }
        if let Some(v) = self.sub_type.as_deref().filter(|v| !v.is_empty()) {
            pairs.push(("subType", v.to_string()));
        }
        pairs
    }
}
