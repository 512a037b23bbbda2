//! Column layout for each resource table.

use ratatui::layout::Constraint;

use crate::domain::{Price, Service, TimeWindow};

pub trait TableRow {
    fn headers() -> &'static [&'static str];

    fn widths() -> Vec<Constraint>;

    fn cells(&self) -> Vec<String>;
}

fn window_text(window: &Option<TimeWindow>) -> String {
    window
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "all day".to_string())
}

fn or_dash(text: &str) -> String {
    if text.is_empty() {
        "-".to_string()
    } else {
        text.to_string()
    }
}

impl TableRow for Price {
    fn headers() -> &'static [&'static str] {
        &["Vehicle", "Sub-type", "Range (km)", "Rate/km", "Time slot"]
    }

    fn widths() -> Vec<Constraint> {
        vec![
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
            Constraint::Percentage(25),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.vehicle_type.clone(),
            or_dash(&self.sub_type),
            format!("{} – {}", self.min_km, self.max_km),
            format!("{:.2}", self.rate),
            window_text(&self.time_slot),
        ]
    }
}

impl TableRow for Service {
    fn headers() -> &'static [&'static str] {
        &["Vehicle", "Sub-type", "City", "Status", "Hours"]
    }

    fn widths() -> Vec<Constraint> {
        vec![
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(25),
            Constraint::Percentage(12),
            Constraint::Percentage(23),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.vehicle_type.clone(),
            or_dash(&self.sub_type),
            self.city.clone(),
            if self.is_active { "active" } else { "inactive" }.to_string(),
            window_text(&self.service_hours),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_cells_match_headers() {
        let price = Price {
            id: "p".into(),
            vehicle_type: "auto".into(),
            sub_type: String::new(),
            min_km: 0.0,
            max_km: 3.5,
            rate: 11.0,
            time_slot: None,
        };
        let cells = price.cells();
        assert_eq!(cells.len(), Price::headers().len());
        assert_eq!(cells[1], "-");
        assert_eq!(cells[3], "11.00");
        assert_eq!(cells[4], "all day");
    }

    #[test]
    fn service_widths_cover_columns() {
        assert_eq!(Service::widths().len(), Service::headers().len());
    }
}
