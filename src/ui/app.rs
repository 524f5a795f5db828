use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::config::Settings;
use crate::drafting::{spawn_draft, Draft, DraftRequest, DraftingService};
use crate::proposal::{build_proposal, export_proposal, parse_setlist, DateStyle, ProposalDocument};
use crate::wizard::{Action, FieldKind, Mode, Session};

use super::forms::{render_field, FieldInput, StepForm};
use super::helpers::{key_hints, step_indicator, surface_error};
use super::screens::ProposalScreen;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Title line, step chips and the divider under them.
const HEADER_HEIGHT: u16 = 3;
/// Lines moved per PageUp/PageDown on the proposal.
const PAGE_SCROLL: i32 = 10;

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    session: Session,
    form: StepForm,
    /// Present exactly while the session is presenting.
    proposal: Option<ProposalScreen>,
    status: Option<StatusMessage>,
    drafting: Arc<dyn DraftingService>,
    draft_tx: Sender<Draft>,
    draft_rx: Receiver<Draft>,
    /// Running drafting request, if any. Only one is allowed at a time.
    draft_worker: Option<JoinHandle<()>>,
    dates: DateStyle,
    brand_line: String,
    export_dir: PathBuf,
    open_exports: bool,
}

impl App {
    pub fn new(settings: &Settings, drafting: Arc<dyn DraftingService>, export_dir: PathBuf) -> Self {
        let (draft_tx, draft_rx) = mpsc::channel();
        let status = if settings.has_api_key() {
            None
        } else {
            Some(StatusMessage {
                text: "Sem chave de API: a geração com IA vai devolver o texto padrão.".into(),
                kind: StatusKind::Error,
            })
        };
        Self {
            session: Session::new(),
            form: StepForm::default(),
            proposal: None,
            status,
            drafting,
            draft_tx,
            draft_rx,
            draft_worker: None,
            dates: DateStyle::default(),
            brand_line: settings.brand_line.clone(),
            export_dir,
            open_exports: true,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns `true` when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        match self.session.mode() {
            Mode::Editing => Ok(self.handle_editing_key(code)),
            Mode::Presenting => self.handle_presenting_key(code),
        }
    }

    /// Control-modified keys. Returns `true` when the app should exit.
    pub(crate) fn handle_ctrl(&mut self, ch: char) -> Result<bool> {
        if matches!(ch, 'c' | 'q') {
            return Ok(true);
        }
        if self.session.mode() != Mode::Editing {
            return Ok(false);
        }
        match ch {
            'n' => self.next_step(),
            'b' => self.previous_step(),
            'g' => self.request_draft(),
            _ => {}
        }
        Ok(false)
    }

    fn handle_editing_key(&mut self, code: KeyCode) -> bool {
        let step = self.session.step();
        match code {
            KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(step),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_previous(step),
            other => match self.form.handle_key(self.session.record(), step, other) {
                FieldInput::Apply(action) => {
                    self.session.apply(action);
                }
                FieldInput::FocusNext => self.form.focus_next(step),
                FieldInput::Ignored => {}
            },
        }
        false
    }

    fn handle_presenting_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char('e') => {
                if self.session.apply(Action::Edit) {
                    self.proposal = None;
                    self.status = None;
                }
            }
            KeyCode::Char('x') => self.export(),
            KeyCode::Tab => {
                if let Some(screen) = self.proposal.as_mut() {
                    screen.toggle_treatment();
                }
            }
            KeyCode::Up => self.scroll_proposal(-1),
            KeyCode::Down => self.scroll_proposal(1),
            KeyCode::PageUp => self.scroll_proposal(-PAGE_SCROLL),
            KeyCode::PageDown => self.scroll_proposal(PAGE_SCROLL),
            KeyCode::Home => {
                if let Some(screen) = self.proposal.as_mut() {
                    screen.scroll = 0;
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn next_step(&mut self) {
        if self.session.sequencer().is_final() {
            self.finalize();
        } else if self.session.apply(Action::Advance) {
            self.form.reset();
            self.status = None;
        }
    }

    fn previous_step(&mut self) {
        if self.session.apply(Action::Retreat) {
            self.form.reset();
            self.status = None;
        }
    }

    fn finalize(&mut self) {
        if !self.session.apply(Action::Finalize) {
            return;
        }
        self.proposal = Some(ProposalScreen::new(self.build_document()));
        self.set_status(
            "Proposta pronta. Tab alterna tela/impressão, x exporta.",
            StatusKind::Info,
        );
    }

    fn build_document(&self) -> ProposalDocument {
        let record = self.session.record();
        let setlist = parse_setlist(&record.suggested_setlist);
        build_proposal(record, &setlist, &self.dates, &self.brand_line)
    }

    fn scroll_proposal(&mut self, delta: i32) {
        if let Some(screen) = self.proposal.as_mut() {
            screen.scroll_by(delta);
        }
    }

    fn request_draft(&mut self) {
        if self.draft_worker.is_some() {
            self.set_status(
                "Aguarde: a IA ainda está gerando o conteúdo anterior.",
                StatusKind::Error,
            );
            return;
        }
        let request = DraftRequest::from_record(self.session.record());
        log::info!("requesting draft for event type {:?}", request.event_type);
        self.draft_worker = Some(spawn_draft(
            Arc::clone(&self.drafting),
            request,
            self.draft_tx.clone(),
        ));
        self.set_status("Gerando conceito e setlist com IA...", StatusKind::Info);
    }

    /// Apply every draft the worker has posted since the last frame. A worker
    /// that finished without posting anything died mid-request; it is cleared
    /// so a new request can be made.
    pub(crate) fn drain_drafts(&mut self) {
        while let Ok(draft) = self.draft_rx.try_recv() {
            self.apply_draft(draft);
        }

        let finished = self
            .draft_worker
            .as_ref()
            .is_some_and(JoinHandle::is_finished);
        if !finished {
            return;
        }
        // The worker may have posted between the drain above and the check.
        if let Ok(draft) = self.draft_rx.try_recv() {
            self.apply_draft(draft);
            return;
        }
        if let Some(worker) = self.draft_worker.take() {
            if worker.join().is_err() {
                log::error!("drafting worker panicked before posting a draft");
            }
        }
        self.set_status(
            "A geração com IA foi interrompida. Tente novamente.",
            StatusKind::Error,
        );
    }

    fn apply_draft(&mut self, draft: Draft) {
        self.draft_worker = None;
        let failed = draft.failed;
        self.session.apply(Action::ApplyDraft(draft));
        if self.proposal.is_some() {
            let document = self.build_document();
            if let Some(screen) = self.proposal.as_mut() {
                screen.refresh(document);
            }
        }
        if failed {
            self.set_status(
                "Não foi possível gerar com IA. O texto padrão foi inserido.",
                StatusKind::Error,
            );
        } else {
            self.set_status("Conceito e setlist preenchidos pela IA.", StatusKind::Info);
        }
    }

    /// Show a start-up problem in the footer, e.g. an unreadable config file.
    pub fn report_startup_error(&mut self, err: &anyhow::Error) {
        self.set_status(
            format!("Configuração ignorada: {}", surface_error(err)),
            StatusKind::Error,
        );
    }

    fn export(&mut self) {
        let Some(screen) = self.proposal.as_ref() else {
            return;
        };
        match export_proposal(&screen.document, &self.export_dir) {
            Ok(path) => {
                log::info!("proposal exported to {}", path.display());
                let mut message = format!("Proposta salva em {}", path.display());
                let mut kind = StatusKind::Info;
                if self.open_exports {
                    if let Err(err) = open::that(&path) {
                        log::warn!("could not open {}: {err}", path.display());
                        message.push_str(" (não foi possível abrir o arquivo)");
                        kind = StatusKind::Error;
                    }
                }
                self.set_status(message, kind);
            }
            Err(err) => {
                log::error!("export failed: {err:#}");
                self.set_status(surface_error(&err), StatusKind::Error);
            }
        }
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.proposal {
            Some(screen) => self.draw_proposal(frame, content_area, screen),
            None => self.draw_wizard(frame, content_area),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }
    }

    fn draw_wizard(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
            .split(area);

        let step = self.session.step();
        let mut title = vec![
            Span::styled(
                "PLANEJAMENTO MUSICAL",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "  •  Passo {} de {}",
                step.number(),
                self.session.sequencer().len()
            )),
        ];
        if self.draft_worker.is_some() {
            title.push(Span::styled(
                "  •  IA trabalhando...",
                Style::default().fg(Color::Yellow),
            ));
        }
        let header = Paragraph::new(vec![Line::from(title), step_indicator(step)])
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, chunks[0]);

        let block = Block::default()
            .title(step.title())
            .borders(Borders::ALL);
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        let record = self.session.record();
        let mut lines = Vec::new();
        let mut focus_top = 0u16;
        let mut cursor = None;
        for (idx, field) in step.fields().iter().enumerate() {
            let focused = idx == self.form.focus;
            let view = render_field(record, *field, focused, self.form.option);
            if focused {
                focus_top = lines.len() as u16;
                cursor = view.cursor;
            }
            lines.extend(view.lines);
        }

        let total = lines.len() as u16;
        let offset = if total > inner.height {
            focus_top
                .saturating_sub(inner.height / 3)
                .min(total - inner.height)
        } else {
            0
        };
        frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), inner);

        if let Some((row, col)) = cursor {
            let y = (focus_top + row).saturating_sub(offset);
            if y < inner.height && inner.width > 0 {
                frame.set_cursor_position((inner.x + col.min(inner.width - 1), inner.y + y));
            }
        }
    }

    fn draw_proposal(&self, frame: &mut Frame, area: Rect, screen: &ProposalScreen) {
        let block = Block::default()
            .title(screen.treatment.title())
            .borders(Borders::ALL);
        let paragraph = Paragraph::new(screen.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((screen.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        if self.proposal.is_some() {
            return key_hints(&[
                ("↑↓", "Rolar"),
                ("Tab", "Tela/Impressão"),
                ("x", "Exportar"),
                ("e", "Editar"),
                ("q", "Sair"),
            ]);
        }

        let step = self.session.step();
        let mut hints = vec![("Tab/↑↓", "Campo")];
        match self.form.focused_field(step).kind() {
            FieldKind::Choice | FieldKind::Exclusive => hints.push(("←→", "Escolher")),
            FieldKind::MultiChoice => {
                hints.push(("←→", "Opção"));
                hints.push(("Space", "Marcar"));
            }
            FieldKind::Flag => hints.push(("Space", "Alternar")),
            _ => {}
        }
        if !self.session.sequencer().is_first() {
            hints.push(("Ctrl+B", "Voltar"));
        }
        if self.session.sequencer().is_final() {
            hints.push(("Ctrl+N", "Gerar Proposta"));
        } else {
            hints.push(("Ctrl+N", "Próximo"));
        }
        hints.push(("Ctrl+G", "IA"));
        hints.push(("Esc", "Sair"));
        key_hints(&hints)
    }
}
