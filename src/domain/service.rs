use serde::{Deserialize, Serialize};

use super::form::{optional_text, Checker, FieldSpec, FormDraft, QueryFilter, ValidationError};
use super::window::TimeWindow;
use super::Resource;

/// An operating-city record for a vehicle type/sub-type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(alias = "_id")]
    pub id: String,
    pub vehicle_type: String,
    #[serde(default)]
    pub sub_type: String,
    pub city: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_hours: Option<TimeWindow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDraft {
    pub vehicle_type: String,
    #[serde(default)]
    pub sub_type: String,
    pub city: String,
    pub is_active: bool,
    #[serde(default)]
    pub service_hours: Option<TimeWindow>,
}

impl Default for ServiceDraft {
    fn default() -> Self {
        Self {
            vehicle_type: String::new(),
            sub_type: String::new(),
            city: String::new(),
            is_active: true,
            service_hours: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceFilter {
    pub vehicle_type: Option<String>,
    pub sub_type: Option<String>,
    pub city: Option<String>,
    pub is_active: Option<bool>,
}

impl Resource for Service {
    type Draft = ServiceDraft;
    type Filter = ServiceFilter;

    const COLLECTION: &'static str = "services";
    const LABEL: &'static str = "service";

    fn id(&self) -> &str {
        &self.id
    }

    fn to_draft(&self) -> ServiceDraft {
        ServiceDraft {
            vehicle_type: self.vehicle_type.clone(),
            sub_type: self.sub_type.clone(),
            city: self.city.clone(),
            is_active: self.is_active,
            service_hours: self.service_hours.clone(),
        }
    }
}

/// Accepts yes/no style answers; `None` for anything else.
fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" | "active" | "on" => Some(true),
        "n" | "no" | "false" | "0" | "inactive" | "off" => Some(false),
        _ => None,
    }
}

fn flag_text(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}

const SERVICE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("vehicleType", "Vehicle type", "bike, auto, car, truck"),
    FieldSpec::optional("subType", "Sub-type", "mini, sedan, suv"),
    FieldSpec::required("city", "City", "Pune"),
    FieldSpec::required("isActive", "Active", "yes/no"),
    FieldSpec::optional("serviceHours", "Service hours", "HH:MM-HH:MM"),
];

impl FormDraft for ServiceDraft {
    fn fields() -> &'static [FieldSpec] {
        SERVICE_FIELDS
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut check = Checker::default();
        if self.vehicle_type.trim().is_empty() {
            check.fail("vehicleType", "is required");
        }
        if self.city.trim().is_empty() {
            check.fail("city", "is required");
        }
        check.finish(())
    }

    fn to_values(&self) -> Vec<String> {
        vec![
            self.vehicle_type.clone(),
            self.sub_type.clone(),
            self.city.clone(),
            flag_text(self.is_active),
            self.service_hours.as_ref().map(ToString::to_string).unwrap_or_default(),
        ]
    }

    fn from_values(values: &[String]) -> Result<Self, ValidationError> {
        let mut check = Checker::default();
        let vehicle_type = check.required("vehicleType", values.first());
        let sub_type = optional_text(values.get(1)).unwrap_or_default();
        let city = check.required("city", values.get(2));
        let active_text = check.required("isActive", values.get(3));
        let is_active = if active_text.is_empty() {
            true
        } else {
            parse_flag(&active_text).unwrap_or_else(|| {
                check.fail("isActive", "must be yes or no");
                true
            })
        };
        let service_hours = match optional_text(values.get(4)) {
            Some(text) => {
                let parsed = TimeWindow::parse(&text);
                if parsed.is_none() {
                    check.fail("serviceHours", "must look like HH:MM-HH:MM");
                }
                parsed
            }
            None => None,
        };
        check.finish(ServiceDraft {
            vehicle_type,
            sub_type,
            city,
            is_active,
            service_hours,
        })
    }
}

const SERVICE_FILTER_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("vehicleType", "Vehicle type", "any"),
    FieldSpec::optional("subType", "Sub-type", "any"),
    FieldSpec::optional("city", "City", "any"),
    FieldSpec::optional("isActive", "Active", "any / yes / no"),
];

impl FormDraft for ServiceFilter {
    fn fields() -> &'static [FieldSpec] {
        SERVICE_FILTER_FIELDS
    }

    fn to_values(&self) -> Vec<String> {
        vec![
            self.vehicle_type.clone().unwrap_or_default(),
            self.sub_type.clone().unwrap_or_default(),
            self.city.clone().unwrap_or_default(),
            self.is_active.map(flag_text).unwrap_or_default(),
        ]
    }

    fn from_values(values: &[String]) -> Result<Self, ValidationError> {
        let mut check = Checker::default();
        let is_active = match optional_text(values.get(3)) {
            Some(text) if text.eq_ignore_ascii_case("any") => None,
            Some(text) => {
                let flag = parse_flag(&text);
                if flag.is_none() {
                    check.fail("isActive", "must be any, yes or no");
                }
                flag
            }
            None => None,
        };
        check.finish(ServiceFilter {
            vehicle_type: optional_text(values.first()),
            sub_type: optional_text(values.get(1)),
            city: optional_text(values.get(2)),
            is_active,
        })
    }
}

impl QueryFilter for ServiceFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let text = [
            ("vehicleType", &self.vehicle_type),
            ("subType", &self.sub_type),
            ("city", &self.city),
        ];
        for (name, value) in text {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push((name, v.to_string()));
            }
        }
        if let Some(active) = self.is_active {
            pairs.push(("isActive", active.to_string()));
        }
        pairs
    }
}
