//! TUI application for the tournament lobby.
//!
//! This is the view layer: it toggles between the list and details screens,
//! fetches lobby data through [`ApiClient`], and wires the single user
//! action (joining a pending tournament). Fetches run as background tasks
//! reporting over a channel; each carries the [`NavToken`] it was issued
//! under so that a completion arriving after the user navigated away is
//! dropped instead of rendered.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Clear, List, ListDirection, ListItem, ListState, Padding, Paragraph, Wrap},
};
use tokio::sync::mpsc;
use tourneygram::{
    HostUser, JoinReceipt, NavToken, Navigation, TournamentDetail, TournamentId,
    TournamentSummary, View,
};

use crate::api_client::{ApiClient, ApiError};

const MAX_LOG_RECORDS: usize = 256;
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

const EMPTY_LIST_MESSAGE: &str = "No tournaments yet. Check back soon!";
const LIST_FAILED_MESSAGE: &str = "Failed to load tournaments.";
const DETAIL_FAILED_MESSAGE: &str = "Failed to load tournament details.";
const EMPTY_ROSTER_MESSAGE: &str = "No players have registered yet.";
const JOIN_READY_LABEL: &str = "[ Join Tournament (j) ]";
const JOIN_BUSY_LABEL: &str = "[ Joining... ]";
const JOIN_DISABLED_LABEL: &str = "[ Joining disabled: no user identity ]";
const JOIN_RETRY_MESSAGE: &str = "Could not reach the server. Please try again.";

/// A completion from a background fetch task.
enum UiEvent {
    ListLoaded(NavToken, Result<Vec<TournamentSummary>, ApiError>),
    DetailLoaded(NavToken, Result<TournamentDetail, ApiError>),
    JoinFinished(TournamentId, Result<JoinReceipt, ApiError>),
}

type UiSender = mpsc::UnboundedSender<UiEvent>;

/// Contents of the list area.
enum ListPane {
    Loading,
    Loaded(Vec<TournamentSummary>),
    Failed,
}

/// Contents of the details area.
enum DetailPane {
    Loading,
    Loaded(TournamentDetail),
    Failed,
}

/// The join affordance, shown only on a loaded details view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JoinControl {
    Hidden,
    Ready,
    Busy,
    /// No host identity was supplied, so joining is impossible.
    Disabled,
}

#[derive(Clone, Copy)]
enum RecordKind {
    Info,
    Error,
}

/// A timestamped activity message shown at the bottom of the screen.
struct Record {
    datetime: DateTime<Utc>,
    kind: RecordKind,
    content: String,
}

impl Record {
    fn new(kind: RecordKind, content: String) -> Self {
        Self {
            datetime: Utc::now(),
            kind,
            content,
        }
    }
}

fn make_record_line(record: &Record) -> Line<'static> {
    let label = match record.kind {
        RecordKind::Info => "INFO".light_blue(),
        RecordKind::Error => "ERROR".light_red(),
    };

    Line::from(vec![
        format!("[{} ", record.datetime.format("%H:%M:%S")).into(),
        Span::styled(format!("{:5}", label.content), label.style),
        format!("]: {}", record.content).into(),
    ])
}

/// One clickable card of the tournament list: "name / game / Status".
fn make_summary_line(summary: &TournamentSummary) -> Line<'static> {
    let game = summary.game.as_deref().unwrap_or("?");
    Line::from(vec![
        Span::styled(summary.name.clone(), Style::default().bold()),
        Span::raw(format!(" / {game} / ")),
        Span::styled(summary.status.to_string(), Style::default().light_yellow()),
    ])
}

/// The details screen body: header, roster, and the join affordance line.
fn make_detail_text(detail: &TournamentDetail, join_line: Option<Line<'static>>) -> Text<'static> {
    let mut lines = vec![
        Line::from(Span::styled(detail.name.clone(), Style::default().bold())),
        Line::from(format!("Game: {}", detail.game.as_deref().unwrap_or("?"))),
        Line::from(format!("Status: {}", detail.status)),
        Line::raw(""),
        Line::from(Span::styled(
            "Players".to_string(),
            Style::default().underlined(),
        )),
    ];

    if detail.players.is_empty() {
        lines.push(Line::raw(EMPTY_ROSTER_MESSAGE));
    } else {
        for player in &detail.players {
            lines.push(Line::raw(format!(
                "- {} (#{})",
                player.username, player.user_id
            )));
        }
    }

    if let Some(join_line) = join_line {
        lines.push(Line::raw(""));
        lines.push(join_line);
    }

    Text::from(lines)
}

fn make_join_line(control: JoinControl) -> Option<Line<'static>> {
    match control {
        JoinControl::Hidden => None,
        JoinControl::Ready => Some(Line::from(
            Span::raw(JOIN_READY_LABEL).light_green().bold(),
        )),
        JoinControl::Busy => Some(Line::from(Span::raw(JOIN_BUSY_LABEL).dark_gray())),
        JoinControl::Disabled => Some(Line::from(Span::raw(JOIN_DISABLED_LABEL).dark_gray())),
    }
}

/// TUI app state
pub struct TuiApp {
    /// Identity supplied by the host platform at launch, if any.
    user: Option<HostUser>,
    /// Active view, selection, and the fetch-generation counter.
    nav: Navigation,
    list_pane: ListPane,
    list_state: ListState,
    detail_pane: DetailPane,
    join_control: JoinControl,
    /// A dismissible notice, rendered as a modal over whatever is active.
    alert: Option<String>,
    /// History of recorded messages
    log: Vec<Record>,
}

impl TuiApp {
    pub fn new(user: Option<HostUser>) -> Self {
        let mut app = Self {
            user,
            nav: Navigation::new(),
            list_pane: ListPane::Loading,
            list_state: ListState::default(),
            detail_pane: DetailPane::Loading,
            join_control: JoinControl::Hidden,
            alert: None,
            log: Vec::new(),
        };
        if app.user.is_none() {
            app.push_record(
                RecordKind::Info,
                "no host identity supplied; joining is disabled".to_string(),
            );
        }
        app
    }

    /// Add an activity record
    fn push_record(&mut self, kind: RecordKind, content: String) {
        if self.log.len() == MAX_LOG_RECORDS {
            self.log.remove(0);
        }
        self.log.push(Record::new(kind, content));
    }

    fn spawn_list_fetch(&self, api: &Arc<ApiClient>, tx: &UiSender, token: NavToken) {
        let api = Arc::clone(api);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = api.list_tournaments().await;
            let _ = tx.send(UiEvent::ListLoaded(token, result));
        });
    }

    fn spawn_detail_fetch(
        &self,
        api: &Arc<ApiClient>,
        tx: &UiSender,
        token: NavToken,
        id: TournamentId,
    ) {
        let api = Arc::clone(api);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = api.get_tournament(&id).await;
            let _ = tx.send(UiEvent::DetailLoaded(token, result));
        });
    }

    /// Navigate to the details view for `id` and start its fetch. The view
    /// switches before any data arrives; the old roster is cleared and the
    /// join affordance hidden until the response lands.
    fn open_details(&mut self, api: &Arc<ApiClient>, tx: &UiSender, id: TournamentId) {
        let token = self.nav.open_details(id.clone());
        self.detail_pane = DetailPane::Loading;
        self.join_control = JoinControl::Hidden;
        self.spawn_detail_fetch(api, tx, token, id);
    }

    /// Open whichever list entry is highlighted.
    fn open_selected(&mut self, api: &Arc<ApiClient>, tx: &UiSender) {
        let ListPane::Loaded(summaries) = &self.list_pane else {
            return;
        };
        let Some(idx) = self.list_state.selected() else {
            return;
        };
        let Some(summary) = summaries.get(idx) else {
            return;
        };
        let id = summary.id.clone();
        self.open_details(api, tx, id);
    }

    /// Return to the list view and reload it exactly once.
    fn go_back(&mut self, api: &Arc<ApiClient>, tx: &UiSender) {
        let token = self.nav.back_to_list();
        self.detail_pane = DetailPane::Loading;
        self.join_control = JoinControl::Hidden;
        self.list_pane = ListPane::Loading;
        self.spawn_list_fetch(api, tx, token);
    }

    /// Re-fetch whatever view is active.
    fn reload_active_view(&mut self, api: &Arc<ApiClient>, tx: &UiSender) {
        match self.nav.view() {
            View::List => {
                let token = self.nav.reload();
                self.list_pane = ListPane::Loading;
                self.spawn_list_fetch(api, tx, token);
            }
            View::Details => {
                let Some(id) = self.nav.selected().cloned() else {
                    return;
                };
                let token = self.nav.reload();
                self.detail_pane = DetailPane::Loading;
                self.join_control = JoinControl::Hidden;
                self.spawn_detail_fetch(api, tx, token, id);
            }
        }
    }

    /// Submit a join request for the selected tournament. No-op unless the
    /// affordance is ready, which implies a known user and a selection.
    fn request_join(&mut self, api: &Arc<ApiClient>, tx: &UiSender) {
        if self.join_control != JoinControl::Ready {
            return;
        }
        let Some(user) = self.user.clone() else {
            return;
        };
        let Some(id) = self.nav.selected().cloned() else {
            return;
        };

        self.join_control = JoinControl::Busy;
        self.push_record(RecordKind::Info, format!("joining tournament {id}"));

        let api = Arc::clone(api);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = api.join_tournament(&id, &user).await;
            let _ = tx.send(UiEvent::JoinFinished(id, result));
        });
    }

    fn handle_ui_event(&mut self, api: &Arc<ApiClient>, tx: &UiSender, ui_event: UiEvent) {
        match ui_event {
            UiEvent::ListLoaded(token, result) => {
                if !self.nav.is_current(token) || self.nav.view() != View::List {
                    return;
                }
                match result {
                    Ok(summaries) => {
                        self.list_state
                            .select((!summaries.is_empty()).then_some(0));
                        self.list_pane = ListPane::Loaded(summaries);
                    }
                    Err(e) => {
                        self.push_record(
                            RecordKind::Error,
                            format!("failed to load tournaments: {e}"),
                        );
                        self.list_pane = ListPane::Failed;
                    }
                }
            }
            UiEvent::DetailLoaded(token, result) => {
                if !self.nav.is_current(token) || self.nav.view() != View::Details {
                    return;
                }
                match result {
                    Ok(detail) => {
                        self.join_control = match &self.user {
                            Some(user) if detail.can_join(user.id) => JoinControl::Ready,
                            None if detail.status.is_pending() => JoinControl::Disabled,
                            _ => JoinControl::Hidden,
                        };
                        self.detail_pane = DetailPane::Loaded(detail);
                    }
                    Err(e) => {
                        self.push_record(
                            RecordKind::Error,
                            format!("failed to load tournament: {e}"),
                        );
                        // Roster and join affordance keep their cleared state.
                        self.detail_pane = DetailPane::Failed;
                    }
                }
            }
            UiEvent::JoinFinished(id, result) => {
                let still_here =
                    self.nav.view() == View::Details && self.nav.selected() == Some(&id);
                match result {
                    Ok(receipt) if receipt.success => {
                        self.alert = Some(if receipt.message.is_empty() {
                            "Successfully registered".to_string()
                        } else {
                            receipt.message
                        });
                        // Full re-fetch rather than a local roster update.
                        if still_here {
                            let token = self.nav.reload();
                            self.detail_pane = DetailPane::Loading;
                            self.join_control = JoinControl::Hidden;
                            self.spawn_detail_fetch(api, tx, token, id);
                        }
                    }
                    Ok(receipt) => {
                        self.alert = Some(receipt.message);
                        if still_here {
                            self.join_control = JoinControl::Ready;
                        }
                    }
                    Err(ApiError::Rejected { message, .. }) => {
                        self.alert = Some(message);
                        if still_here {
                            self.join_control = JoinControl::Ready;
                        }
                    }
                    Err(e) => {
                        self.push_record(RecordKind::Error, format!("join request failed: {e}"));
                        self.alert = Some(JOIN_RETRY_MESSAGE.to_string());
                        if still_here {
                            self.join_control = JoinControl::Ready;
                        }
                    }
                }
            }
        }
    }

    /// Render the tournament list area
    fn draw_list(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .padding(Padding::uniform(1))
            .title(" tournaments  ");

        match &self.list_pane {
            ListPane::Loading => {
                frame.render_widget(Paragraph::new("Loading tournaments...").block(block), area);
            }
            ListPane::Failed => {
                frame.render_widget(Paragraph::new(LIST_FAILED_MESSAGE).block(block), area);
            }
            ListPane::Loaded(summaries) if summaries.is_empty() => {
                frame.render_widget(Paragraph::new(EMPTY_LIST_MESSAGE).block(block), area);
            }
            ListPane::Loaded(summaries) => {
                let items: Vec<ListItem> = summaries
                    .iter()
                    .map(|summary| ListItem::new(make_summary_line(summary)))
                    .collect();
                let list = List::new(items)
                    .block(block)
                    .highlight_symbol("> ")
                    .highlight_style(Style::default().bold().white());
                frame.render_stateful_widget(list, area, &mut self.list_state);
            }
        }
    }

    /// Render the tournament details area
    fn draw_details(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .padding(Padding::uniform(1))
            .title(" tournament  ");

        let body = match &self.detail_pane {
            DetailPane::Loading => Text::raw("Loading tournament..."),
            DetailPane::Failed => Text::raw(DETAIL_FAILED_MESSAGE),
            DetailPane::Loaded(detail) => {
                make_detail_text(detail, make_join_line(self.join_control))
            }
        };

        frame.render_widget(
            Paragraph::new(body).wrap(Wrap { trim: false }).block(block),
            area,
        );
    }

    /// Render the activity log window
    fn draw_log(&self, frame: &mut Frame, area: Rect) {
        let records: Vec<ListItem> = self
            .log
            .iter()
            .rev()
            .map(|record| ListItem::new(make_record_line(record)))
            .collect();
        let records = List::new(records)
            .direction(ListDirection::BottomToTop)
            .block(Block::bordered().title(" activity  "));
        frame.render_widget(records, area);
    }

    /// Render the help/status bar at the bottom. The back affordance only
    /// appears outside the list view.
    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let help_message: Vec<Span> = match self.nav.view() {
            View::List => vec![
                "press ".into(),
                "Enter".bold().white(),
                " to open a tournament, ".into(),
                "r".bold().white(),
                " to reload, or ".into(),
                "Esc".bold().white(),
                " to exit".into(),
            ],
            View::Details => vec![
                "press ".into(),
                "j".bold().white(),
                " to join, ".into(),
                "r".bold().white(),
                " to refresh, or ".into(),
                "Esc".bold().white(),
                " to go back".into(),
            ],
        };
        frame.render_widget(Paragraph::new(Line::from(help_message)), area);
    }

    /// Render the dismissible alert modal
    fn draw_alert(&self, frame: &mut Frame, message: &str) {
        let vertical = Layout::vertical([Constraint::Max(7)]).flex(Flex::Center);
        let horizontal = Layout::horizontal([Constraint::Max(60)]).flex(Flex::Center);
        let [alert_area] = vertical.areas(frame.area());
        let [alert_area] = horizontal.areas(alert_area);
        frame.render_widget(Clear, alert_area);

        let notice = Paragraph::new(message.to_string())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .padding(Padding::uniform(1))
                    .title(" notice  ")
                    .title_bottom(" press Enter to dismiss  "),
            );
        frame.render_widget(notice, alert_area);
    }

    /// Main draw function
    fn draw(&mut self, frame: &mut Frame) {
        let window = Layout::vertical([
            Constraint::Min(8),    // Active view
            Constraint::Length(5), // Activity log
            Constraint::Length(1), // Help bar
        ]);
        let [view_area, log_area, help_area] = window.areas(frame.area());

        match self.nav.view() {
            View::List => self.draw_list(frame, view_area),
            View::Details => self.draw_details(frame, view_area),
        }
        self.draw_log(frame, log_area);
        self.draw_help_bar(frame, help_area);

        if let Some(message) = self.alert.clone() {
            self.draw_alert(frame, &message);
        }
    }

    /// Run the TUI application
    pub async fn run(mut self, api: ApiClient, mut terminal: DefaultTerminal) -> Result<()> {
        let api = Arc::new(api);
        let (tx, mut rx) = mpsc::unbounded_channel::<UiEvent>();

        // Initial list load
        let token = self.nav.reload();
        self.spawn_list_fetch(&api, &tx, token);

        loop {
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(POLL_TIMEOUT)?
                && let Event::Key(KeyEvent { code, kind, .. }) = event::read()?
                && kind == KeyEventKind::Press
            {
                if self.alert.is_some() {
                    if matches!(code, KeyCode::Enter | KeyCode::Esc) {
                        self.alert = None;
                    }
                } else {
                    match self.nav.view() {
                        View::List => match code {
                            KeyCode::Up => self.list_state.select_previous(),
                            KeyCode::Down => self.list_state.select_next(),
                            KeyCode::Enter => self.open_selected(&api, &tx),
                            KeyCode::Char('r') => self.reload_active_view(&api, &tx),
                            KeyCode::Esc | KeyCode::Char('q') => return Ok(()),
                            _ => {}
                        },
                        View::Details => match code {
                            KeyCode::Char('j') | KeyCode::Enter => self.request_join(&api, &tx),
                            KeyCode::Char('r') => self.reload_active_view(&api, &tx),
                            KeyCode::Esc => self.go_back(&api, &tx),
                            KeyCode::Char('q') => return Ok(()),
                            _ => {}
                        },
                    }
                }
            }

            // Drain fetch completions
            while let Ok(ui_event) = rx.try_recv() {
                self.handle_ui_event(&api, &tx, ui_event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourneygram::{Player, TournamentStatus};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn text_content(text: &Text) -> String {
        text.lines
            .iter()
            .map(line_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn summary(name: &str, game: &str, status: &str) -> TournamentSummary {
        TournamentSummary {
            id: TournamentId::new("1"),
            name: name.to_string(),
            game: Some(game.to_string()),
            status: TournamentStatus::new(status),
        }
    }

    fn detail(status: &str, players: Vec<Player>) -> TournamentDetail {
        TournamentDetail {
            id: TournamentId::new("1"),
            name: "Cup".to_string(),
            game: Some("Chess".to_string()),
            status: TournamentStatus::new(status),
            creator_id: None,
            players,
        }
    }

    fn host_user(id: i64) -> HostUser {
        HostUser {
            id,
            username: Some("alice".to_string()),
            first_name: "Alice".to_string(),
            last_name: None,
        }
    }

    fn test_api() -> (Arc<ApiClient>, UiSender, mpsc::UnboundedReceiver<UiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(ApiClient::new("http://localhost:19999".to_string())), tx, rx)
    }

    // === Render helpers ===

    #[test]
    fn test_summary_line_renders_name_game_and_capitalized_status() {
        let line = make_summary_line(&summary("Cup", "Chess", "pending"));
        assert_eq!(line_text(&line), "Cup / Chess / Pending");
    }

    #[test]
    fn test_summary_line_without_game() {
        let mut entry = summary("Cup", "", "pending");
        entry.game = None;
        assert_eq!(line_text(&make_summary_line(&entry)), "Cup / ? / Pending");
    }

    #[test]
    fn test_detail_text_with_empty_roster_shows_placeholder() {
        let text = make_detail_text(&detail("pending", vec![]), None);
        assert!(text_content(&text).contains(EMPTY_ROSTER_MESSAGE));
    }

    #[test]
    fn test_detail_text_lists_players() {
        let roster = vec![Player {
            user_id: 42,
            username: "alice".to_string(),
        }];
        let text = make_detail_text(&detail("pending", roster), None);
        let content = text_content(&text);
        assert!(content.contains("alice"));
        assert!(!content.contains(EMPTY_ROSTER_MESSAGE));
    }

    #[test]
    fn test_detail_text_includes_join_affordance_when_given() {
        let text = make_detail_text(
            &detail("pending", vec![]),
            make_join_line(JoinControl::Ready),
        );
        assert!(text_content(&text).contains("Join Tournament"));
    }

    #[test]
    fn test_join_line_labels() {
        assert!(make_join_line(JoinControl::Hidden).is_none());
        let ready = make_join_line(JoinControl::Ready).unwrap();
        assert!(line_text(&ready).contains("Join Tournament"));
        let busy = make_join_line(JoinControl::Busy).unwrap();
        assert!(line_text(&busy).contains("Joining..."));
    }

    // === Event handling ===

    #[tokio::test]
    async fn test_list_load_selects_first_entry() {
        let (api, tx, _rx) = test_api();
        let mut app = TuiApp::new(Some(host_user(42)));
        let token = app.nav.reload();

        app.handle_ui_event(
            &api,
            &tx,
            UiEvent::ListLoaded(token, Ok(vec![summary("Cup", "Chess", "pending")])),
        );

        assert_eq!(app.list_state.selected(), Some(0));
        assert!(matches!(&app.list_pane, ListPane::Loaded(s) if s.len() == 1));
    }

    #[tokio::test]
    async fn test_stale_list_load_is_discarded() {
        let (api, tx, _rx) = test_api();
        let mut app = TuiApp::new(Some(host_user(42)));
        let stale = app.nav.reload();
        app.nav.reload();

        app.handle_ui_event(
            &api,
            &tx,
            UiEvent::ListLoaded(stale, Ok(vec![summary("Cup", "Chess", "pending")])),
        );

        assert!(matches!(app.list_pane, ListPane::Loading));
    }

    #[tokio::test]
    async fn test_detail_load_shows_join_when_pending_and_not_registered() {
        let (api, tx, _rx) = test_api();
        let mut app = TuiApp::new(Some(host_user(42)));
        let token = app.nav.open_details(TournamentId::new("1"));

        app.handle_ui_event(
            &api,
            &tx,
            UiEvent::DetailLoaded(token, Ok(detail("pending", vec![]))),
        );

        assert_eq!(app.join_control, JoinControl::Ready);
    }

    #[tokio::test]
    async fn test_detail_load_hides_join_when_already_registered() {
        let (api, tx, _rx) = test_api();
        let mut app = TuiApp::new(Some(host_user(42)));
        let token = app.nav.open_details(TournamentId::new("1"));

        let roster = vec![Player {
            user_id: 42,
            username: "alice".to_string(),
        }];
        app.handle_ui_event(
            &api,
            &tx,
            UiEvent::DetailLoaded(token, Ok(detail("pending", roster))),
        );

        assert_eq!(app.join_control, JoinControl::Hidden);
    }

    #[tokio::test]
    async fn test_detail_load_hides_join_when_not_pending() {
        let (api, tx, _rx) = test_api();
        let mut app = TuiApp::new(Some(host_user(42)));
        let token = app.nav.open_details(TournamentId::new("1"));

        app.handle_ui_event(
            &api,
            &tx,
            UiEvent::DetailLoaded(token, Ok(detail("completed", vec![]))),
        );

        assert_eq!(app.join_control, JoinControl::Hidden);
    }

    #[tokio::test]
    async fn test_detail_load_disables_join_without_identity() {
        let (api, tx, _rx) = test_api();
        let mut app = TuiApp::new(None);
        let token = app.nav.open_details(TournamentId::new("1"));

        app.handle_ui_event(
            &api,
            &tx,
            UiEvent::DetailLoaded(token, Ok(detail("pending", vec![]))),
        );

        assert_eq!(app.join_control, JoinControl::Disabled);
    }

    #[tokio::test]
    async fn test_detail_failure_keeps_join_hidden() {
        let (api, tx, _rx) = test_api();
        let mut app = TuiApp::new(Some(host_user(42)));
        let token = app.nav.open_details(TournamentId::new("1"));

        app.handle_ui_event(
            &api,
            &tx,
            UiEvent::DetailLoaded(
                token,
                Err(ApiError::Rejected {
                    status: 404,
                    message: "Tournament not found".to_string(),
                }),
            ),
        );

        assert!(matches!(app.detail_pane, DetailPane::Failed));
        assert_eq!(app.join_control, JoinControl::Hidden);
    }

    #[tokio::test]
    async fn test_join_rejection_restores_affordance_and_raises_alert() {
        let (api, tx, _rx) = test_api();
        let mut app = TuiApp::new(Some(host_user(42)));
        let id = TournamentId::new("1");
        let token = app.nav.open_details(id.clone());
        app.handle_ui_event(
            &api,
            &tx,
            UiEvent::DetailLoaded(token, Ok(detail("pending", vec![]))),
        );
        app.join_control = JoinControl::Busy;

        app.handle_ui_event(
            &api,
            &tx,
            UiEvent::JoinFinished(
                id,
                Err(ApiError::Rejected {
                    status: 409,
                    message: "Already registered".to_string(),
                }),
            ),
        );

        assert_eq!(app.alert.as_deref(), Some("Already registered"));
        assert_eq!(app.join_control, JoinControl::Ready);
    }

    #[tokio::test]
    async fn test_join_success_raises_alert_and_refetches_detail() {
        let (api, tx, _rx) = test_api();
        let mut app = TuiApp::new(Some(host_user(42)));
        let id = TournamentId::new("1");
        let token = app.nav.open_details(id.clone());
        app.handle_ui_event(
            &api,
            &tx,
            UiEvent::DetailLoaded(token, Ok(detail("pending", vec![]))),
        );
        app.join_control = JoinControl::Busy;

        app.handle_ui_event(
            &api,
            &tx,
            UiEvent::JoinFinished(
                id,
                Ok(JoinReceipt {
                    success: true,
                    message: "Successfully registered".to_string(),
                }),
            ),
        );

        assert_eq!(app.alert.as_deref(), Some("Successfully registered"));
        // The detail view re-fetches in full; the affordance hides until
        // the fresh roster lands.
        assert!(matches!(app.detail_pane, DetailPane::Loading));
        assert_eq!(app.join_control, JoinControl::Hidden);
    }

    #[tokio::test]
    async fn test_join_transport_failure_shows_generic_retry_notice() {
        let (api, tx, _rx) = test_api();
        let mut app = TuiApp::new(Some(host_user(42)));
        let id = TournamentId::new("1");
        let token = app.nav.open_details(id.clone());
        app.handle_ui_event(
            &api,
            &tx,
            UiEvent::DetailLoaded(token, Ok(detail("pending", vec![]))),
        );
        app.join_control = JoinControl::Busy;

        // A real transport error, produced without any server listening.
        let transport = api.list_tournaments().await.unwrap_err();
        app.handle_ui_event(&api, &tx, UiEvent::JoinFinished(id, Err(transport)));

        assert_eq!(app.alert.as_deref(), Some(JOIN_RETRY_MESSAGE));
        assert_eq!(app.join_control, JoinControl::Ready);
    }

    #[tokio::test]
    async fn test_stale_detail_after_back_navigation_is_not_rendered() {
        let (api, tx, _rx) = test_api();
        let mut app = TuiApp::new(Some(host_user(42)));
        let detail_token = app.nav.open_details(TournamentId::new("1"));
        app.go_back(&api, &tx);

        app.handle_ui_event(
            &api,
            &tx,
            UiEvent::DetailLoaded(detail_token, Ok(detail("pending", vec![]))),
        );

        assert_eq!(app.nav.view(), View::List);
        assert!(matches!(app.detail_pane, DetailPane::Loading));
        assert_eq!(app.join_control, JoinControl::Hidden);
    }
}
