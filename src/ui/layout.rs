use ratatui::layout::Rect;

/// Header, body and footer bands; the body takes what is left.
pub fn layout_regions(area: Rect) -> (Rect, Rect, Rect) {
    let header_height = area.height.min(3);
    let footer_height = 3.min(area.height.saturating_sub(header_height));
    let header = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: header_height,
    };
    let footer = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(footer_height),
        width: area.width,
        height: footer_height,
    };
    let body = Rect {
        x: area.x,
        y: area.y + header_height,
        width: area.width,
        height: area.height.saturating_sub(header_height + footer_height),
    };
    (header, body, footer)
}

/// Splits the body into tab bar, table and status line.
pub fn body_regions(body: Rect) -> (Rect, Rect, Rect) {
    let tabs_height = body.height.min(1);
    let status_height = 1.min(body.height.saturating_sub(tabs_height));
    let tabs = Rect {
        height: tabs_height,
        ..body
    };
    let status = Rect {
        y: body.y + body.height.saturating_sub(status_height),
        height: status_height,
        ..body
    };
    let table = Rect {
        y: body.y + tabs_height,
        height: body.height.saturating_sub(tabs_height + status_height),
        ..body
    };
    (tabs, table, status)
}
