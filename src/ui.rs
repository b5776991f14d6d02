use crate::catalog::Listing;
use crate::filter::{
    BedroomFilter, FilterCriteria, FilterOutcome, ListingView, PriceBand, TypeFilter,
    NO_RESULTS_MESSAGE,
};
use crate::mortgage::{self, LoanParameters};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

// Indicative quote assumptions shown in the detail panel
const QUOTE_DOWN_PAYMENT_FRACTION: f64 = 0.20;
const QUOTE_RATE_PCT: f64 = 5.0;
const QUOTE_YEARS: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Listings,
    Filters,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Listings => Page::Filters,
            Page::Filters => Page::Listings,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Listings => "Listings",
            Page::Filters => "Filters",
        }
    }
}

pub struct App {
    pub view: ListingView,
    pub state: TableState,
    pub current_page: Page,
    pub show_detail: bool,
    pub search_mode: bool,
}

impl App {
    pub fn new(view: ListingView) -> Self {
        let mut state = TableState::default();
        if !view.visible().is_empty() {
            state.select(Some(0));
        }

        Self {
            view,
            state,
            current_page: Page::Listings,
            show_detail: false,
            search_mode: false,
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_listing(&self) -> Option<&Listing> {
        self.state.selected().and_then(|i| self.view.visible().get(i))
    }

    fn reset_selection(&mut self) {
        if self.view.visible().is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn set_price_band(&mut self, band: PriceBand) {
        let criteria = FilterCriteria {
            price: band,
            ..self.view.criteria().clone()
        };
        self.view.apply_filters(criteria);
        self.reset_selection();
    }

    pub fn set_type_filter(&mut self, type_filter: TypeFilter) {
        let criteria = FilterCriteria {
            property_type: type_filter,
            ..self.view.criteria().clone()
        };
        self.view.apply_filters(criteria);
        self.reset_selection();
    }

    /// Any -> 2 -> 3 -> 4 -> Any
    pub fn cycle_bedrooms(&mut self) {
        let next = match self.view.criteria().bedrooms {
            BedroomFilter::Any => BedroomFilter::Exactly(2),
            BedroomFilter::Exactly(2) => BedroomFilter::Exactly(3),
            BedroomFilter::Exactly(3) => BedroomFilter::Exactly(4),
            BedroomFilter::Exactly(_) => BedroomFilter::Any,
        };
        let criteria = FilterCriteria {
            bedrooms: next,
            ..self.view.criteria().clone()
        };
        self.view.apply_filters(criteria);
        self.reset_selection();
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut criteria = self.view.criteria().clone();
        criteria.search.push(c);
        self.view.apply_filters(criteria);
        self.reset_selection();
    }

    pub fn pop_search_char(&mut self) {
        let mut criteria = self.view.criteria().clone();
        criteria.search.pop();
        self.view.apply_filters(criteria);
        self.reset_selection();
    }

    pub fn clear_filters(&mut self) {
        self.view.clear_filters();
        self.reset_selection();
    }

    pub fn next(&mut self) {
        let len = self.view.visible().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.view.visible().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Indicative monthly quote for a listing at the standing assumptions
    pub fn quote_for(&self, listing: &Listing) -> mortgage::MortgageResult {
        let params = LoanParameters {
            home_price: listing.price,
            down_payment: listing.price * QUOTE_DOWN_PAYMENT_FRACTION,
            annual_interest_rate_pct: QUOTE_RATE_PCT,
            amortization_years: QUOTE_YEARS,
            annual_property_tax: 0.0,
            annual_insurance: 0.0,
        };
        mortgage::calculate(&params)
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Search mode captures typing until Enter/Esc
            if app.search_mode {
                match key.code {
                    KeyCode::Esc | KeyCode::Enter => app.search_mode = false,
                    KeyCode::Backspace => app.pop_search_char(),
                    KeyCode::Char(c) => app.push_search_char(c),
                    _ => {}
                }
                continue;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Tab => app.current_page = app.current_page.next(),
                KeyCode::Char('/') => {
                    app.search_mode = true;
                    app.current_page = Page::Listings;
                }
                KeyCode::Char('c') => {
                    app.clear_filters();
                    app.current_page = Page::Listings;
                }
                KeyCode::Char('1') if app.current_page == Page::Filters => {
                    app.set_price_band(PriceBand::Any);
                    app.current_page = Page::Listings;
                }
                KeyCode::Char('2') if app.current_page == Page::Filters => {
                    app.set_price_band(PriceBand::Between(0.0, 400_000.0));
                    app.current_page = Page::Listings;
                }
                KeyCode::Char('3') if app.current_page == Page::Filters => {
                    app.set_price_band(PriceBand::Between(400_000.0, 600_000.0));
                    app.current_page = Page::Listings;
                }
                KeyCode::Char('4') if app.current_page == Page::Filters => {
                    app.set_price_band(PriceBand::AtLeast(600_000.0));
                    app.current_page = Page::Listings;
                }
                KeyCode::Char('h') if app.current_page == Page::Filters => {
                    app.set_type_filter(TypeFilter::Only("house".to_string()));
                    app.current_page = Page::Listings;
                }
                KeyCode::Char('o') if app.current_page == Page::Filters => {
                    app.set_type_filter(TypeFilter::Only("condo".to_string()));
                    app.current_page = Page::Listings;
                }
                KeyCode::Char('t') if app.current_page == Page::Filters => {
                    app.set_type_filter(TypeFilter::Any);
                    app.current_page = Page::Listings;
                }
                KeyCode::Char('b') => app.cycle_bedrooms(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Home => app.state.select(Some(0)),
                KeyCode::End => {
                    if !app.view.visible().is_empty() {
                        app.state.select(Some(app.view.visible().len() - 1));
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.show_detail && app.current_page == Page::Listings {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(60), // Listing table
                Constraint::Percentage(40), // Detail panel
            ])
            .split(chunks[1]);

        render_table(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        match app.current_page {
            Page::Listings => render_table(f, chunks[1], app),
            Page::Filters => render_filters(f, chunks[1], app),
        }
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::Listings, Page::Filters];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Catalog: {}", app.view.catalog().len()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Showing: {}", app.view.visible().len()),
        Style::default().fg(Color::Green),
    ));

    if app.search_mode || !app.view.criteria().search.is_empty() {
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(
            format!("Search: {}_", app.view.criteria().search),
            Style::default().fg(Color::Cyan),
        ));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    if app.view.outcome() == FilterOutcome::NoMatches {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", NO_RESULTS_MESSAGE),
                Style::default().fg(Color::Yellow),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  Press c to clear filters.",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Listings "),
        );
        f.render_widget(empty, area);
        return;
    }

    let header_cells = ["Address", "Neighborhood", "Price", "Beds", "Baths", "Sq Ft", "Type"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.view.visible().iter().map(|listing| {
        let type_color = match listing.property_type.as_str() {
            "house" => Color::Green,
            "condo" => Color::Cyan,
            _ => Color::White,
        };

        let card = listing.card();
        let cells = vec![
            Cell::from(truncate(&listing.address, 28)),
            Cell::from(truncate(&listing.neighborhood, 18)),
            Cell::from(card.price),
            Cell::from(format!("{}", listing.bedrooms)),
            Cell::from(format!("{}", listing.bathrooms)),
            Cell::from(format!("{}", listing.sqft)),
            Cell::from(listing.property_type.clone()).style(Style::default().fg(type_color)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(30),
            Constraint::Length(20),
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Listings "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_filters(f: &mut Frame, area: Rect, app: &App) {
    let criteria = app.view.criteria();

    let marker = |active: bool| {
        if active {
            Span::styled("→", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else {
            Span::raw(" ")
        }
    };

    let bedrooms_label = match criteria.bedrooms {
        BedroomFilter::Any => "any".to_string(),
        BedroomFilter::Exactly(n) => format!("exactly {}", n),
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Quick Filters",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            marker(criteria.price == PriceBand::Any),
            Span::styled("1", Style::default().fg(Color::Yellow)),
            Span::raw(". Any price"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            marker(criteria.price == PriceBand::Between(0.0, 400_000.0)),
            Span::styled("2", Style::default().fg(Color::Yellow)),
            Span::raw(". Under $400,000"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            marker(criteria.price == PriceBand::Between(400_000.0, 600_000.0)),
            Span::styled("3", Style::default().fg(Color::Yellow)),
            Span::raw(". $400,000 - $600,000"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            marker(criteria.price == PriceBand::AtLeast(600_000.0)),
            Span::styled("4", Style::default().fg(Color::Yellow)),
            Span::raw(". $600,000 and up"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            marker(criteria.property_type == TypeFilter::Only("house".to_string())),
            Span::styled("h", Style::default().fg(Color::Yellow)),
            Span::raw(". Houses only"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            marker(criteria.property_type == TypeFilter::Only("condo".to_string())),
            Span::styled("o", Style::default().fg(Color::Yellow)),
            Span::raw(". Condos only"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            marker(criteria.property_type == TypeFilter::Any),
            Span::styled("t", Style::default().fg(Color::Yellow)),
            Span::raw(". Any type"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("   "),
            Span::styled("b", Style::default().fg(Color::Yellow)),
            Span::raw(format!(". Bedrooms: {}", bedrooms_label)),
        ]),
        Line::from(vec![
            Span::raw("   "),
            Span::styled("/", Style::default().fg(Color::Yellow)),
            Span::raw(". Search address or neighborhood"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  Hint: ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ),
            Span::styled(
                "filters combine; press c to clear them all",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Filters "),
    );

    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.view.visible().len();

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    if let FilterOutcome::Matches(n) = app.view.outcome() {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!("Filtered: {} match", n),
            Style::default().fg(Color::Green),
        ));
        status_spans.push(Span::raw(" ("));
        status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" clear)"));
    }

    if app.search_mode {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            "typing search - Enter/Esc to finish",
            Style::default().fg(Color::Cyan),
        ));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Details | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("/", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Search | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let listing = match app.selected_listing() {
        Some(l) => l,
        None => {
            let no_selection = Paragraph::new("No listing selected").block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Listing Details "),
            );
            f.render_widget(no_selection, area);
            return;
        }
    };

    let card = listing.card();
    let quote = app.quote_for(listing);

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  Address: ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(&listing.address),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  Neighborhood: ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(&listing.neighborhood),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  Price: ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(card.price.clone(), Style::default().fg(Color::Green)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  Features: ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(card.features.clone()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  Type: ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(&listing.property_type),
        ]),
        Line::from(""),
        Line::from("  ─────────────────────────────────────"),
        Line::from(""),
        Line::from(Span::styled(
            "  MORTGAGE QUOTE",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("  20% down, 5.0% over 25 years"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  Loan amount: ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(quote.loan_amount_display()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  Monthly P&I: ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(quote.monthly_pi_display(), Style::default().fg(Color::Green)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  Total interest: ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(quote.total_interest_display()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Enter to close",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let detail_panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Listing Details "),
    );

    f.render_widget(detail_panel, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        // Take whole characters so multi-byte addresses never split
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn test_app() -> App {
        App::new(ListingView::new(Catalog::from_sample()))
    }

    #[test]
    fn test_selection_follows_filters() {
        let mut app = test_app();
        assert_eq!(app.state.selected(), Some(0));

        app.set_price_band(PriceBand::AtLeast(600_000.0));
        assert_eq!(app.view.visible().len(), 1);
        assert_eq!(app.selected_listing().unwrap().address, "789 Pine Road");

        // Nothing matches: selection clears instead of pointing past the end
        app.cycle_bedrooms(); // exactly 2
        assert_eq!(app.state.selected(), None);
        assert_eq!(app.view.outcome(), FilterOutcome::NoMatches);

        app.clear_filters();
        assert_eq!(app.state.selected(), Some(0));
    }

    #[test]
    fn test_search_typing_narrows_live() {
        let mut app = test_app();

        for c in "glen".chars() {
            app.push_search_char(c);
        }
        assert_eq!(app.view.visible().len(), 1);

        app.pop_search_char();
        app.pop_search_char();
        app.pop_search_char();
        app.pop_search_char();
        assert_eq!(app.view.visible().len(), 3);
    }

    #[test]
    fn test_quote_uses_listing_price() {
        let app = test_app();
        let listing = &app.view.catalog().listings()[0];

        let quote = app.quote_for(listing);
        assert_eq!(quote.loan_amount, 450_000.0 * 0.8);
        assert_eq!(quote.down_payment_percent_display(), "20.0%");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("123 Maple Street", 28), "123 Maple Street");
        assert_eq!(truncate("123 Maple Street", 10), "123 Map...");
        // Multi-byte addresses must not split mid-character
        assert_eq!(truncate("12 Rue de l'Église Montréal", 12), "12 Rue de...");
        assert_eq!(truncate("ééééééééééééééé", 8), "ééééé...");
    }

    #[test]
    fn test_bedroom_cycle_wraps() {
        let mut app = test_app();

        app.cycle_bedrooms();
        assert_eq!(app.view.criteria().bedrooms, BedroomFilter::Exactly(2));
        app.cycle_bedrooms();
        app.cycle_bedrooms();
        assert_eq!(app.view.criteria().bedrooms, BedroomFilter::Exactly(4));
        app.cycle_bedrooms();
        assert_eq!(app.view.criteria().bedrooms, BedroomFilter::Any);
    }
}
