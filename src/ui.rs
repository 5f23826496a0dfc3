use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame,
};

use crate::analytics::display::{format_currency, format_seller_detail, LeaderboardRow};
use crate::analytics::types::{AnalyticsReport, SellerDetail};

const ACCENT: Color = Color::Rgb(0x00, 0xFF, 0xAA);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Leaderboard,
    Sellers,
    Snacks,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Leaderboard, Tab::Sellers, Tab::Snacks];

    fn title(&self) -> &'static str {
        match self {
            Tab::Leaderboard => "1. Leaderboard",
            Tab::Sellers => "2. Seller Analytics",
            Tab::Snacks => "3. Snack Analytics",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub tab: Tab,
    pub sellers: TableState,
    pub detail: Option<SellerDetail>,
    pub status: Option<String>,
}

impl DashboardState {
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = self.sellers.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.sellers.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        let previous = self.sellers.selected().map_or(0, |i| i.saturating_sub(1));
        self.sellers.select(Some(previous));
    }
}

pub fn render(f: &mut Frame<'_>, report: &AnalyticsReport, state: &mut DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // View
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let tabs = Tabs::new(Tab::ALL.iter().map(Tab::title).collect::<Vec<_>>())
        .select(state.tab.index())
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title("Snack Trade Analytics"));
    f.render_widget(tabs, chunks[0]);

    if let Some(detail) = &state.detail {
        render_detail(f, chunks[1], detail);
    } else {
        match state.tab {
            Tab::Leaderboard => render_leaderboard(f, chunks[1], report),
            Tab::Sellers => render_sellers(f, chunks[1], report, &mut state.sellers),
            Tab::Snacks => render_snacks(f, chunks[1], report),
        }
    }

    let help = state.status.clone().unwrap_or_else(|| {
        format!(
            "Tab/1-3 switch view  ↑/↓ select  Enter seller detail  r refresh  q quit   (computed {})",
            report.generated_at.format("%H:%M:%S")
        )
    });
    let help = Paragraph::new(help)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);
}

fn render_leaderboard(f: &mut Frame<'_>, area: Rect, report: &AnalyticsReport) {
    let rows = report.leaderboard.iter().map(LeaderboardRow::from).map(|row| {
        Row::new(vec![
            Cell::from(format!("{}. {}", row.rank, row.display_name)),
            Cell::from(format!(" {} ", row.room_badge)).style(Style::default().fg(ACCENT)),
            Cell::from(Line::from(row.earnings).alignment(Alignment::Right))
                .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        ])
    });

    let title = format!("Top {} Sellers by Total Earnings", report.leaderboard.len());
    let table = Table::new(
        rows,
        [Constraint::Percentage(55), Constraint::Percentage(15), Constraint::Percentage(30)],
    )
    .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, area);
}

fn render_sellers(f: &mut Frame<'_>, area: Rect, report: &AnalyticsReport, state: &mut TableState) {
    let header = Row::new(vec![
        "Name",
        "Email",
        "Total Sales",
        "Total Earnings",
        "Completed Orders",
        "Unique Buyers",
        "Room No",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = report.sellers.iter().map(|s| {
        Row::new(vec![
            s.name.clone(),
            s.email.clone(),
            s.total_sales_line_items.to_string(),
            format_currency(s.total_earnings),
            s.completed_orders.to_string(),
            s.unique_buyers.to_string(),
            s.room_no.clone(),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(16),
            Constraint::Percentage(26),
            Constraint::Percentage(10),
            Constraint::Percentage(14),
            Constraint::Percentage(13),
            Constraint::Percentage(12),
            Constraint::Percentage(9),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .block(Block::default().borders(Borders::ALL).title("Seller Analytics"));
    f.render_stateful_widget(table, area, state);
}

fn render_snacks(f: &mut Frame<'_>, area: Rect, report: &AnalyticsReport) {
    let header = Row::new(vec!["Name", "Listed By", "Price", "Units Sold", "Revenue", "Created At"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = report.snacks.iter().map(|s| {
        Row::new(vec![
            s.name.clone(),
            s.listed_by.clone(),
            format_currency(s.price),
            s.units_sold.to_string(),
            format_currency(s.revenue),
            s.created_at.clone(),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(26),
            Constraint::Percentage(20),
            Constraint::Percentage(12),
            Constraint::Percentage(12),
            Constraint::Percentage(14),
            Constraint::Percentage(16),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Snack Analytics"));
    f.render_widget(table, area);
}

fn render_detail(f: &mut Frame<'_>, area: Rect, detail: &SellerDetail) {
    let widget = Paragraph::new(format_seller_detail(detail))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} (Esc to go back)", detail.name)),
        );
    f.render_widget(widget, area);
}
