//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the navigation sidebar
const SIDEBAR_WIDTH: u16 = 22;
/// Height of the KPI card row
const KPI_HEIGHT: u16 = 5;

/// Main screen layout areas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MainLayout {
    pub sidebar: Option<Rect>,
    pub content: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Areas of the dashboard tab
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardLayout {
    pub kpis: [Rect; 4],
    pub recent: Rect,
    pub feed: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate main screen layout
pub fn calculate_main_layout(area: Rect, show_sidebar: bool, has_status: bool) -> MainLayout {
    // Main vertical layout: content + (optional status) + help bar
    let main_chunks = if has_status {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area)
    };

    let (sidebar, content) = if show_sidebar {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(main_chunks[0]);
        (Some(chunks[0]), chunks[1])
    } else {
        (None, main_chunks[0])
    };

    let (status, help) = if has_status {
        (Some(main_chunks[1]), main_chunks[2])
    } else {
        (None, main_chunks[1])
    };

    MainLayout {
        sidebar,
        content,
        status,
        help,
    }
}

/// Split the dashboard content into KPI cards, recent table and feed
pub fn calculate_dashboard_layout(content: Rect) -> DashboardLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(KPI_HEIGHT), Constraint::Min(0)])
        .split(content);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[1]);

    DashboardLayout {
        kpis: [cards[0], cards[1], cards[2], cards[3]],
        recent: body[0],
        feed: body[1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_is_clamped_and_offset() {
        let area = Rect::new(10, 5, 40, 20);
        let popup = centered_popup(area, 20, 10);
        assert_eq!(popup, Rect::new(20, 10, 20, 10));

        let huge = centered_popup(area, 100, 100);
        assert_eq!(huge.width, 40);
        assert_eq!(huge.height, 20);
    }

    #[test]
    fn test_main_layout_without_sidebar() {
        let layout = calculate_main_layout(Rect::new(0, 0, 100, 40), false, true);
        assert!(layout.sidebar.is_none());
        assert_eq!(layout.content.width, 100);
        assert_eq!(layout.status.map(|s| s.height), Some(1));
        assert_eq!(layout.help.height, 3);
    }

    #[test]
    fn test_main_layout_with_sidebar() {
        let layout = calculate_main_layout(Rect::new(0, 0, 100, 40), true, false);
        assert_eq!(layout.sidebar.map(|s| s.width), Some(SIDEBAR_WIDTH));
        assert_eq!(layout.content.width, 100 - SIDEBAR_WIDTH);
        assert!(layout.status.is_none());
    }

    #[test]
    fn test_dashboard_layout_has_kpi_row() {
        let layout = calculate_dashboard_layout(Rect::new(0, 0, 80, 30));
        assert!(layout.kpis.iter().all(|k| k.height == KPI_HEIGHT));
        assert_eq!(layout.recent.y, KPI_HEIGHT);
        assert!(layout.recent.width > layout.feed.width);
    }
}
